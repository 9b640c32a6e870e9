use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    dto::comments::{CommentAuthor, CommentList, CommentWithAuthor, CreateCommentRequest},
    entity::{
        comments::{ActiveModel as CommentActive, Column as CommentCol, Entity as Comments},
        users::Entity as Users,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::Comment,
    response::{ApiResponse, Meta},
    services::hierarchy,
    state::AppState,
    validation::{parse_id, require_id, require_text},
};

pub async fn create_comment(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCommentRequest,
) -> AppResult<ApiResponse<Comment>> {
    let text = require_text(payload.comment, "Comment")?;
    let video_id = require_id(payload.video_id.as_ref(), "videoId")?;
    let video = hierarchy::video_as_parent(&state.orm, video_id).await?;

    let comment = CommentActive {
        id: NotSet,
        user_id: Set(user.user_id),
        video_id: Set(video.id),
        text: Set(text),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await
    .map_err(|err| hierarchy::child_insert_failed(err, hierarchy::VIDEO_NOT_FOUND))?;

    Ok(ApiResponse::success(
        "Comment added",
        Comment::from(comment),
        Some(Meta::empty()),
    ))
}

/// Comments on a video, newest first.
pub async fn list_comments(state: &AppState, video_id: &str) -> AppResult<ApiResponse<CommentList>> {
    let video_id = parse_id(video_id, "video ID")?;

    let items: Vec<CommentWithAuthor> = Comments::find()
        .filter(CommentCol::VideoId.eq(video_id))
        .order_by_desc(CommentCol::CreatedAt)
        .order_by_desc(CommentCol::Id)
        .find_also_related(Users)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(comment, author)| CommentWithAuthor {
            comment: comment.into(),
            user: author.map(|u| CommentAuthor { name: u.name }),
        })
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Comments", CommentList { items }, Some(meta)))
}
