use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    models::{Module, Video},
    validation::RawId,
};

#[derive(Debug, Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateModuleRequest {
    pub title: Option<String>,
    #[schema(value_type = Option<String>)]
    pub course_id: Option<RawId>,
}

#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct UpdateModuleRequest {
    pub title: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModuleWithVideos {
    #[serde(flatten)]
    pub module: Module,
    pub videos: Vec<Video>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ModuleList {
    #[schema(value_type = Vec<ModuleWithVideos>)]
    pub items: Vec<ModuleWithVideos>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDeleted {
    pub deleted_module: String,
    pub deleted_videos_count: u64,
    pub deleted_comments_count: u64,
}
