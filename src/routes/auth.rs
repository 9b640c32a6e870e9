use axum::{Json, extract::State};

use crate::{
    dto::auth::{AuthResponse, SignInRequest, SignUpRequest, UpdateProfileRequest},
    error::AppResult,
    middleware::{auth::AuthUser, json::AppJson},
    models::User,
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/signUp",
    request_body = SignUpRequest,
    responses(
        (status = 200, description = "Register user", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Invalid input or email already registered")
    ),
    tag = "Auth"
)]
pub async fn sign_up(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignUpRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let resp = auth_service::sign_up(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/signIn",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Login user", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn sign_in(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignInRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let resp = auth_service::sign_in(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<User>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = auth_service::get_profile(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<User>),
        (status = 400, description = "Name is required"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = auth_service::update_profile(&state, &user, payload).await?;
    Ok(Json(resp))
}
