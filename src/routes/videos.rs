use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    dto::videos::{CreateVideoRequest, UpdateVideoRequest, VideoDeleted},
    error::AppResult,
    middleware::{auth::AuthUser, json::AppJson},
    models::Video,
    response::ApiResponse,
    services::video_service,
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/video",
    request_body = CreateVideoRequest,
    responses(
        (status = 200, description = "Create video", body = ApiResponse<Video>),
        (status = 400, description = "Invalid input or module not found"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Videos"
)]
pub async fn create_video(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateVideoRequest>,
) -> AppResult<Json<ApiResponse<Video>>> {
    let resp = video_service::create_video(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/video/{id}",
    params(
        ("id" = String, Path, description = "Video ID")
    ),
    request_body = UpdateVideoRequest,
    responses(
        (status = 200, description = "Updated video", body = ApiResponse<Video>),
        (status = 400, description = "No fields provided to update"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Video not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Videos"
)]
pub async fn update_video(
    State(state): State<AppState>,
    user: AuthUser,
    Path(video_id): Path<String>,
    AppJson(payload): AppJson<UpdateVideoRequest>,
) -> AppResult<Json<ApiResponse<Video>>> {
    let resp = video_service::update_video(&state, &user, &video_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/video/{id}",
    params(
        ("id" = String, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video deleted", body = ApiResponse<VideoDeleted>),
        (status = 400, description = "Invalid video ID"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Video not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Videos"
)]
pub async fn delete_video(
    State(state): State<AppState>,
    user: AuthUser,
    Path(video_id): Path<String>,
) -> AppResult<Json<ApiResponse<VideoDeleted>>> {
    let resp = video_service::delete_video(&state, &user, &video_id).await?;
    Ok(Json(resp))
}
