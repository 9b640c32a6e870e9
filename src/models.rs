use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{comments, courses, enrollments, modules, users, users::Role, videos};

/// Public view of an account. The password hash never leaves the service.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub price: i64,
    pub original_price: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: i32,
    pub title: String,
    pub course_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: i32,
    pub title: String,
    pub url: String,
    pub thumbnail: Option<String>,
    pub module_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i32,
    pub user_id: i32,
    pub video_id: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            role: model.role,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<courses::Model> for Course {
    fn from(model: courses::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            thumbnail: model.thumbnail,
            price: model.price,
            original_price: model.original_price,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<modules::Model> for Module {
    fn from(model: modules::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            course_id: model.course_id,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<videos::Model> for Video {
    fn from(model: videos::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            url: model.url,
            thumbnail: model.thumbnail,
            module_id: model.module_id,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<enrollments::Model> for Enrollment {
    fn from(model: enrollments::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            course_id: model.course_id,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<comments::Model> for Comment {
    fn from(model: comments::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            video_id: model.video_id,
            comment: model.text,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
