use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{dto::modules::ModuleWithVideos, models::Course};

#[derive(Debug, Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub price: Option<i64>,
    pub original_price: Option<i64>,
}

#[derive(Debug, Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub price: Option<i64>,
    pub original_price: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CourseList {
    #[schema(value_type = Vec<Course>)]
    pub items: Vec<Course>,
}

/// A course with its full module/video tree.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub modules: Vec<ModuleWithVideos>,
    pub enrollment_count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseDeleted {
    pub deleted_course: String,
    pub deleted_modules_count: u64,
    pub deleted_videos_count: u64,
    pub deleted_comments_count: u64,
    pub deleted_enrollments_count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentStats {
    pub course_id: i32,
    pub title: String,
    pub enrollment_count: u64,
}
