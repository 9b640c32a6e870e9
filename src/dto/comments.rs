use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{models::Comment, validation::RawId};

#[derive(Debug, Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[schema(value_type = Option<String>)]
    pub video_id: Option<RawId>,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentAuthor {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentWithAuthor {
    #[serde(flatten)]
    pub comment: Comment,
    pub user: Option<CommentAuthor>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CommentList {
    #[schema(value_type = Vec<CommentWithAuthor>)]
    pub items: Vec<CommentWithAuthor>,
}
