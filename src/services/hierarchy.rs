//! Referential integrity for the course tree.
//!
//! Every cascade removes rows leaf-first (comments, videos, modules, then the
//! root) so the tree stays consistent after each statement. Callers run these
//! functions inside one transaction and roll back on any error, which makes
//! the whole subtree disappear atomically or not at all.

use sea_orm::sea_query::LockType;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, LoaderTrait, ModelTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::{
    entity::{
        comments::{Column as CommentCol, Entity as Comments},
        courses::{Entity as Courses, Model as CourseModel},
        enrollments::{Column as EnrollmentCol, Entity as Enrollments},
        modules::{Column as ModuleCol, Entity as Modules, Model as ModuleModel},
        videos::{Column as VideoCol, Entity as Videos, Model as VideoModel},
    },
    error::{AppError, AppResult, is_foreign_key_violation},
};

pub const COURSE_NOT_FOUND: &str = "Invalid courseId. Course not found.";
pub const MODULE_NOT_FOUND: &str = "Invalid moduleId. Module not found.";
pub const VIDEO_NOT_FOUND: &str = "Invalid videoId. Video not found.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDeletion {
    pub title: String,
    pub comments: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDeletion {
    pub title: String,
    pub videos: u64,
    pub comments: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDeletion {
    pub title: String,
    pub modules: u64,
    pub videos: u64,
    pub comments: u64,
    pub enrollments: u64,
}

/// Title to report for a deleted row; blank titles fall back to the id.
pub fn display_name(title: &str, kind: &str, id: i32) -> String {
    if title.trim().is_empty() {
        format!("{kind} ID: {id}")
    } else {
        title.to_string()
    }
}

/// Parent lookup for module creation. A missing course is a body error.
pub async fn course_as_parent<C: ConnectionTrait>(conn: &C, course_id: i32) -> AppResult<CourseModel> {
    Courses::find_by_id(course_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::ParentNotFound(COURSE_NOT_FOUND.into()))
}

/// Parent lookup for video creation.
pub async fn module_as_parent<C: ConnectionTrait>(conn: &C, module_id: i32) -> AppResult<ModuleModel> {
    Modules::find_by_id(module_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::ParentNotFound(MODULE_NOT_FOUND.into()))
}

/// Parent lookup for comment creation.
pub async fn video_as_parent<C: ConnectionTrait>(conn: &C, video_id: i32) -> AppResult<VideoModel> {
    Videos::find_by_id(video_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::ParentNotFound(VIDEO_NOT_FOUND.into()))
}

/// Child insert failed after the parent check passed. A foreign-key violation
/// means the parent was deleted in between.
pub fn child_insert_failed(err: DbErr, parent_missing: &str) -> AppError {
    if is_foreign_key_violation(&err) {
        AppError::ParentNotFound(parent_missing.to_string())
    } else {
        AppError::OrmError(err)
    }
}

pub async fn delete_video_tree<C: ConnectionTrait>(conn: &C, video_id: i32) -> AppResult<VideoDeletion> {
    let video = Videos::find_by_id(video_id)
        .lock(LockType::Update)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Video"))?;

    let comments = Comments::delete_many()
        .filter(CommentCol::VideoId.eq(video.id))
        .exec(conn)
        .await?
        .rows_affected;

    let removed = Videos::delete_by_id(video.id).exec(conn).await?.rows_affected;
    if removed != 1 {
        return Err(AppError::not_found("Video"));
    }

    Ok(VideoDeletion {
        title: display_name(&video.title, "Video", video.id),
        comments,
    })
}

pub async fn delete_module_tree<C: ConnectionTrait>(conn: &C, module_id: i32) -> AppResult<ModuleDeletion> {
    let module = Modules::find_by_id(module_id)
        .lock(LockType::Update)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Module"))?;
    let videos = module.find_related(Videos).all(conn).await?;

    let (videos, comments) = purge_videos(conn, &module, &videos).await?;

    let removed = Modules::delete_by_id(module.id).exec(conn).await?.rows_affected;
    if removed != 1 {
        return Err(AppError::not_found("Module"));
    }

    Ok(ModuleDeletion {
        title: display_name(&module.title, "Module", module.id),
        videos,
        comments,
    })
}

pub async fn delete_course_tree<C: ConnectionTrait>(conn: &C, course_id: i32) -> AppResult<CourseDeletion> {
    let course = Courses::find_by_id(course_id)
        .lock(LockType::Update)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Course"))?;
    let modules = course
        .find_related(Modules)
        .order_by_asc(ModuleCol::Id)
        .all(conn)
        .await?;
    let videos_per_module = modules.load_many(Videos, conn).await?;

    let mut videos = 0;
    let mut comments = 0;
    for (module, module_videos) in modules.iter().zip(videos_per_module.iter()) {
        let (v, c) = purge_videos(conn, module, module_videos).await?;
        videos += v;
        comments += c;
    }

    let modules = Modules::delete_many()
        .filter(ModuleCol::CourseId.eq(course.id))
        .exec(conn)
        .await?
        .rows_affected;

    let enrollments = Enrollments::delete_many()
        .filter(EnrollmentCol::CourseId.eq(course.id))
        .exec(conn)
        .await?
        .rows_affected;

    let removed = Courses::delete_by_id(course.id).exec(conn).await?.rows_affected;
    if removed != 1 {
        return Err(AppError::not_found("Course"));
    }

    Ok(CourseDeletion {
        title: display_name(&course.title, "Course", course.id),
        modules,
        videos,
        comments,
        enrollments,
    })
}

/// Remove every video of `module` (and their comments). Returns (videos, comments).
async fn purge_videos<C: ConnectionTrait>(
    conn: &C,
    module: &ModuleModel,
    videos: &[VideoModel],
) -> AppResult<(u64, u64)> {
    if videos.is_empty() {
        return Ok((0, 0));
    }

    let video_ids: Vec<i32> = videos.iter().map(|v| v.id).collect();
    let comments = Comments::delete_many()
        .filter(CommentCol::VideoId.is_in(video_ids))
        .exec(conn)
        .await?
        .rows_affected;

    let videos = Videos::delete_many()
        .filter(VideoCol::ModuleId.eq(module.id))
        .exec(conn)
        .await?
        .rows_affected;

    Ok((videos, comments))
}
