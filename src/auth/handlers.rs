use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{ActivationRequest, LoginRequest, RegisterRequest},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::User,
    },
    response::{ApiError, ApiResponse},
    state::AppState,
};

type HandlerResult = Result<(StatusCode, Json<ApiResponse>), ApiError>;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/activate", post(request_activation))
        .route("/auth/activate/:token", get(confirm_activation))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> HandlerResult {
    let hash = hash_password(&payload.password)?;

    // is_deactivated is left to the schema default (true): the account
    // stays locked until the activation flow clears it.
    match User::create(&state.db, &payload.email, &payload.name, &hash).await? {
        Some(user) => {
            info!(user_id = %user.id, email = %user.email, "user registered");
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    "Registration done!",
                    json!({ "userId": user.id }),
                )),
            ))
        }
        None => {
            warn!(email = %payload.email, "insert returned no row");
            Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("No result found")),
            ))
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> HandlerResult {
    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login unknown email");
            ApiError::unauthorized("No user exist")
        })?;

    if user.is_deactivated {
        warn!(user_id = %user.id, "login attempt on deactivated account");
        return Err(ApiError::unauthorized("Account is deactivated!"));
    }

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::unauthorized("Credential mismatch"));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign_session(user.id)?;

    info!(user_id = %user.id, "user logged in");
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Logged in", json!({ "token": token }))),
    ))
}

#[instrument(skip(state, payload))]
pub async fn request_activation(
    State(state): State<AppState>,
    Json(payload): Json<ActivationRequest>,
) -> HandlerResult {
    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %payload.email, "activation request for unknown email");
            ApiError::unauthorized("No user exist")
        })?;

    if !user.is_deactivated {
        return Err(ApiError::unprocessable("User is already activated!"));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign_activation(user.id)?;
    let body = activation_email_body(&activation_link(&state.config.base_url, &token));

    // Fire-and-forget: the response does not wait on delivery, and a
    // dispatch failure is only logged.
    let mailer = state.mailer.clone();
    let to = user.email.clone();
    tokio::spawn(async move {
        if let Err(e) = mailer.send(&to, "Verify Email", &body).await {
            warn!(error = %e, %to, "activation email dispatch failed");
        }
    });

    info!(user_id = %user.id, "activation email queued");
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "An Email has been sent to your account please verify!",
            json!({}),
        )),
    ))
}

#[instrument(skip(state, token))]
pub async fn confirm_activation(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> HandlerResult {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys.verify(&token).map_err(|e| {
        warn!(error = %e, "activation token rejected");
        ApiError::unauthorized("Invalid link!")
    })?;

    let user = User::find_by_id(&state.db, claims.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found!"))?;

    User::mark_activated(&state.db, user.id).await?;

    info!(user_id = %user.id, "account activated");
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Account activated!", json!({}))),
    ))
}

fn activation_link(base_url: &str, token: &str) -> String {
    format!("http://{base_url}/auth/activate/{token}")
}

fn activation_email_body(link: &str) -> String {
    format!(
        "Click on the below link to activate your account:\n{link}\n\n\
         (Note: If the link is not clickable kindly copy the link and paste it in the browser.)"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_link_embeds_base_url_and_token() {
        let link = activation_link("example.com:8080", "tok123");
        assert_eq!(link, "http://example.com:8080/auth/activate/tok123");
    }

    #[test]
    fn activation_email_body_contains_the_link() {
        let link = activation_link("localhost:8080", "abc");
        let body = activation_email_body(&link);
        assert!(body.contains(&link));
        assert!(body.contains("activate your account"));
    }

    #[test]
    fn register_success_envelope_carries_user_id() {
        let user_id = uuid::Uuid::new_v4();
        let resp = ApiResponse::success("Registration done!", json!({ "userId": user_id }));
        let body = serde_json::to_value(&resp).unwrap();
        assert_eq!(body["message"], "Registration done!");
        assert_eq!(body["data"]["userId"], json!(user_id));
    }
}
