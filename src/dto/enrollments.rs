use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{models::Course, validation::RawId};

#[derive(Debug, Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    #[schema(value_type = Option<String>)]
    pub course_id: Option<RawId>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct MyCourseList {
    #[schema(value_type = Vec<Course>)]
    pub items: Vec<Course>,
}
