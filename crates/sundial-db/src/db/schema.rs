diesel::table! {
    scheduler (id) {
        id -> BigInt,
        date -> Text,
        title -> Text,
        comment -> Text,
        repeat -> Text,
    }
}
