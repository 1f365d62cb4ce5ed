use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, handler, writing::Json};
use serde::{Deserialize, Serialize};
use tracing::error;

use sundial_service::auth::{check_password, issue_token};

use super::{render_app_error, render_error};
use crate::config::get_config_from_depot;
use crate::error::AppError;

/// ## Summary
/// Sign-in request payload
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub password: String,
}

/// ## Summary
/// Sign-in response payload
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub token: String,
}

/// ## Summary
/// POST /api/signin - Exchanges the configured password for a session
/// token.
///
/// ## Errors
/// Returns HTTP 400 for a missing password or unconfigured auth and
/// HTTP 401 for a wrong password.
#[handler]
pub async fn sign_in_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let payload: SignInRequest = match req.parse_json().await {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = ?e, "Failed to parse sign-in request");
            render_error(res, StatusCode::BAD_REQUEST, "Invalid request body");
            return;
        }
    };

    if payload.password.is_empty() {
        render_error(res, StatusCode::BAD_REQUEST, "empty password");
        return;
    }

    let config = match get_config_from_depot(depot) {
        Ok(config) => config,
        Err(err) => {
            render_app_error(res, &err);
            return;
        }
    };

    if let Err(err) = check_password(&config.auth, &payload.password) {
        render_app_error(res, &AppError::from(err));
        return;
    }

    match issue_token(&config.auth) {
        Ok(token) => {
            tracing::debug!("Session token issued");
            res.render(Json(SignInResponse { token }));
        }
        Err(err) => render_app_error(res, &AppError::from(err)),
    }
}
