//! Auth middleware.

use std::sync::Arc;

use reelbite_app::auth::AuthServiceError;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use crate::{errors::ApiError, extensions::*, state::State};

/// Cookie holding the session token issued at login.
pub(crate) const SESSION_COOKIE: &str = "token";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_session_token(req) else {
        res.render(ApiError::unauthorized("Authentication required"));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(ApiError::internal());
            ctrl.skip_rest();

            return;
        }
    };

    let actor = match state.app.auth.authenticate_session(&token).await {
        Ok(actor) => actor,
        Err(AuthServiceError::NotFound) => {
            res.render(ApiError::unauthorized("Invalid session"));
            ctrl.skip_rest();

            return;
        }
        Err(AuthServiceError::Sql(source)) => {
            error!("failed to look up session: {source}");

            res.render(ApiError::internal());
            ctrl.skip_rest();

            return;
        }
        Err(AuthServiceError::Token(source)) => {
            error!("failed to process session token: {source}");

            res.render(ApiError::internal());
            ctrl.skip_rest();

            return;
        }
    };

    depot.insert_actor(actor);

    ctrl.call_next(req, depot, res).await;
}

/// The session cookie wins over an `Authorization: Bearer` header.
fn extract_session_token(req: &Request) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        let value = cookie.value().trim();

        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    extract_bearer_token(req).map(str::to_string)
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
