use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    dto::comments::{CommentList, CreateCommentRequest},
    error::AppResult,
    middleware::{auth::AuthUser, json::AppJson},
    models::Comment,
    response::ApiResponse,
    services::comment_service,
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/comment",
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment added", body = ApiResponse<Comment>),
        (status = 400, description = "Missing fields or video not found"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Comments"
)]
pub async fn create_comment(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Comment>>)> {
    let resp = comment_service::create_comment(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/video/{id}",
    params(
        ("id" = String, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Comments on a video, newest first", body = ApiResponse<CommentList>),
        (status = 400, description = "Invalid video ID"),
    ),
    tag = "Comments"
)]
pub async fn list_comments(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> AppResult<Json<ApiResponse<CommentList>>> {
    let resp = comment_service::list_comments(&state, &video_id).await?;
    Ok(Json(resp))
}
