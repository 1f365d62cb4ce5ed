use salvo::Depot;
use salvo::http::StatusCode;
use tracing::error;

use sundial_service::auth::verify_token;

use crate::app::api::render_error;
use crate::config::get_config_from_depot;

/// Authentication middleware for the task endpoints. When a password is
/// configured, requests must carry the session token in a `token` cookie
/// or an `Authorization: Bearer` header; otherwise the API is open.
pub struct AuthMiddleware;

#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        let config = match get_config_from_depot(depot) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!(error = ?e, "Failed to get config from depot");
                res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
                return;
            }
        };

        if !config.auth.enabled() {
            return;
        }

        let verified = presented_token(req)
            .is_some_and(|token| verify_token(&config.auth, &token).is_ok());

        if !verified {
            tracing::debug!("Rejecting request without a valid session token");
            render_error(res, StatusCode::UNAUTHORIZED, "authentication required");
            ctrl.skip_rest();
        }
    }
}

fn presented_token(req: &salvo::Request) -> Option<String> {
    if let Some(cookie) = req.cookie("token") {
        return Some(cookie.value().to_string());
    }

    req.header::<String>("authorization")
        .and_then(|header| header.strip_prefix("Bearer ").map(str::to_string))
}
