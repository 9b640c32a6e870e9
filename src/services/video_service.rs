use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, Set, TransactionTrait};

use crate::{
    audit,
    dto::videos::{CreateVideoRequest, UpdateVideoRequest, VideoDeleted},
    entity::videos::{ActiveModel as VideoActive, Entity as Videos},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Video,
    response::{ApiResponse, Meta},
    services::hierarchy,
    state::AppState,
    validation::{optional_text, parse_id, require_id, require_text},
};

pub async fn create_video(
    state: &AppState,
    user: &AuthUser,
    payload: CreateVideoRequest,
) -> AppResult<ApiResponse<Video>> {
    ensure_admin(user)?;
    let title = require_text(payload.title, "Video title")?;
    let url = require_text(payload.url, "Video url")?;
    let module_id = require_id(payload.module_id.as_ref(), "moduleId")?;

    let module = hierarchy::module_as_parent(&state.orm, module_id).await?;

    let video = VideoActive {
        id: NotSet,
        title: Set(title),
        url: Set(url),
        thumbnail: Set(optional_text(payload.thumbnail)),
        module_id: Set(module.id),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await
    .map_err(|err| hierarchy::child_insert_failed(err, hierarchy::MODULE_NOT_FOUND))?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "video_create",
        "videos",
        serde_json::json!({ "video_id": video.id, "module_id": module.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Video created",
        Video::from(video),
        Some(Meta::empty()),
    ))
}

pub async fn update_video(
    state: &AppState,
    user: &AuthUser,
    video_id: &str,
    payload: UpdateVideoRequest,
) -> AppResult<ApiResponse<Video>> {
    ensure_admin(user)?;
    let video_id = parse_id(video_id, "video ID")?;

    let title = optional_text(payload.title);
    let url = optional_text(payload.url);
    let thumbnail = optional_text(payload.thumbnail);
    if title.is_none() && url.is_none() && thumbnail.is_none() {
        return Err(AppError::InvalidInput("No fields provided to update".into()));
    }

    let existing = Videos::find_by_id(video_id).one(&state.orm).await?;
    let existing = match existing {
        Some(v) => v,
        None => return Err(AppError::not_found("Video")),
    };

    let mut active: VideoActive = existing.into();
    if let Some(title) = title {
        active.title = Set(title);
    }
    if let Some(url) = url {
        active.url = Set(url);
    }
    if let Some(thumbnail) = thumbnail {
        active.thumbnail = Set(Some(thumbnail));
    }
    let video = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "video_update",
        "videos",
        serde_json::json!({ "video_id": video.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Video updated",
        Video::from(video),
        Some(Meta::empty()),
    ))
}

pub async fn delete_video(
    state: &AppState,
    user: &AuthUser,
    video_id: &str,
) -> AppResult<ApiResponse<VideoDeleted>> {
    ensure_admin(user)?;
    let video_id = parse_id(video_id, "video ID")?;

    let deletion = state
        .orm
        .transaction::<_, _, AppError>(|txn| {
            Box::pin(async move { hierarchy::delete_video_tree(txn, video_id).await })
        })
        .await?;

    tracing::info!(video_id, comments = deletion.comments, "video deleted");
    audit::record(
        &state.orm,
        Some(user.user_id),
        "video_delete",
        "videos",
        serde_json::json!({ "video_id": video_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Video deleted successfully",
        VideoDeleted {
            deleted_video: deletion.title,
            deleted_comments_count: deletion.comments,
        },
        Some(Meta::empty()),
    ))
}
