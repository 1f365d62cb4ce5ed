use salvo::{Response, handler, writing::Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthcheckResponse {
    pub status: &'static str,
}

/// GET /healthz - liveness probe.
#[handler]
pub async fn healthcheck_handler(res: &mut Response) {
    res.render(Json(HealthcheckResponse { status: "ok" }));
}
