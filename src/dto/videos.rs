use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::RawId;

#[derive(Debug, Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    #[schema(value_type = Option<String>)]
    pub module_id: Option<RawId>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct UpdateVideoRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoDeleted {
    pub deleted_video: String,
    pub deleted_comments_count: u64,
}
