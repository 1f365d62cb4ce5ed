use salvo::http::StatusCode;
use salvo::{Request, Response, handler, writing::Text};

use sundial_core::date::{parse_date, today};

use super::render_error;

/// ## Summary
/// GET /api/nextdate?now=YYYYMMDD&date=YYYYMMDD&repeat=... - Recurrence
/// preview: computes the next occurrence without touching storage. `now`
/// defaults to today.
///
/// ## Errors
/// Returns HTTP 400 for a malformed `now`, `date` or `repeat`.
#[handler]
pub async fn next_date_handler(req: &mut Request, res: &mut Response) {
    let now = match req.query::<String>("now") {
        Some(raw) if !raw.is_empty() => match parse_date(&raw) {
            Ok(now) => now,
            Err(_) => {
                render_error(res, StatusCode::BAD_REQUEST, "incorrect now");
                return;
            }
        },
        _ => today(),
    };

    let date = req.query::<String>("date").unwrap_or_default();
    let repeat = req.query::<String>("repeat").unwrap_or_default();

    match sundial_repeat::next_date(now, &date, &repeat) {
        Ok(next) => res.render(Text::Plain(next)),
        Err(err) => render_error(res, StatusCode::BAD_REQUEST, err.to_string()),
    }
}
