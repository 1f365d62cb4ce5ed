/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const TASK_ROUTE_COMPONENT: &str = "task";
pub const TASKS_ROUTE_COMPONENT: &str = "tasks";
pub const NEXT_DATE_ROUTE_COMPONENT: &str = "nextdate";
pub const SIGN_IN_ROUTE_COMPONENT: &str = "signin";
pub const DONE_ROUTE_COMPONENT: &str = "done";

/// Maximum number of tasks returned by a single list/search request.
pub const TASK_LIST_LIMIT: i64 = 50;
