use std::sync::Arc;

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiJson, ApiResult};
use crate::main_lib::AppState;
use crate::models::{ResendCodeRequest, SigninRequest, SignupRequest, VerifyCodeRequest, VerifyCodeResponse};
use teamline_core::auth::VerificationPurpose;

async fn signup(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    state
        .verification_service
        .request_signup(&body.email, &body.name, &body.password)
        .await?;
    Ok(ApiJson(json!({ "message": "Verification code sent" })))
}

async fn signin(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SigninRequest>,
) -> ApiResult<impl IntoResponse> {
    state
        .verification_service
        .request_signin(&body.email, &body.password)
        .await?;
    Ok(ApiJson(json!({ "message": "Verification code sent" })))
}

async fn verify_code(
    State(state): State<Arc<AppState>>,
    Json(body): Json<VerifyCodeRequest>,
) -> ApiResult<impl IntoResponse> {
    let purpose = VerificationPurpose::parse(&body.purpose)
        .map_err(|_| ApiError::bad_request("type must be \"signup\" or \"signin\""))?;
    let user = state
        .verification_service
        .verify(&body.email, &body.code, purpose)
        .await?;

    let token = state.session.issue(&user.id)?;
    let cookie = state.session.session_cookie(&token);
    let redirect_to = match purpose {
        VerificationPurpose::Signup => "/onboarding".to_string(),
        VerificationPurpose::Signin => "/dashboard".to_string(),
    };
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        ApiJson(VerifyCodeResponse {
            user: user.profile(),
            redirect_to,
        }),
    ))
}

async fn resend_code(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ResendCodeRequest>,
) -> ApiResult<impl IntoResponse> {
    let purpose = VerificationPurpose::parse(&body.purpose)
        .map_err(|_| ApiError::bad_request("type must be \"signup\" or \"signin\""))?;
    state
        .verification_service
        .resend(&body.email, purpose)
        .await?;
    Ok(ApiJson(json!({ "message": "Verification code sent" })))
}

async fn logout(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let cookie = state.session.clear_cookie();
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        ApiJson(json!({ "message": "Signed out" })),
    ))
}

async fn me(CurrentUser(user): CurrentUser) -> ApiResult<impl IntoResponse> {
    Ok(ApiJson(user.profile()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/signin", post(signin))
        .route("/auth/verify-code", post(verify_code))
        .route("/auth/resend-code", post(resend_code))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}
