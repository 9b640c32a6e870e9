use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, LoaderTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::{
    audit,
    dto::{
        courses::{CourseDeleted, CourseDetail, CourseList, CreateCourseRequest, UpdateCourseRequest},
        modules::ModuleWithVideos,
    },
    entity::{
        courses::{ActiveModel as CourseActive, Column as CourseCol, Entity as Courses},
        enrollments::{Column as EnrollmentCol, Entity as Enrollments},
        modules::{Column as ModuleCol, Entity as Modules},
        videos::{Column as VideoCol, Entity as Videos},
    },
    error::{AppError, AppResult, is_unique_violation},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Course, Video},
    response::{ApiResponse, Meta},
    services::hierarchy,
    state::AppState,
    validation::{optional_text, parse_id, require_price, require_text},
};

pub async fn list_courses(state: &AppState) -> AppResult<ApiResponse<CourseList>> {
    let items: Vec<Course> = Courses::find()
        .order_by_asc(CourseCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Course::from)
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Courses", CourseList { items }, Some(meta)))
}

pub async fn get_course(state: &AppState, course_id: &str) -> AppResult<ApiResponse<CourseDetail>> {
    let course_id = parse_id(course_id, "course ID")?;

    let course = Courses::find_by_id(course_id).one(&state.orm).await?;
    let course = match course {
        Some(c) => c,
        None => return Err(AppError::not_found("Course")),
    };

    let modules = course
        .find_related(Modules)
        .order_by_asc(ModuleCol::Id)
        .all(&state.orm)
        .await?;
    let videos = modules
        .load_many(Videos::find().order_by_asc(VideoCol::Id), &state.orm)
        .await?;
    let enrollment_count = Enrollments::find()
        .filter(EnrollmentCol::CourseId.eq(course.id))
        .count(&state.orm)
        .await?;

    let modules = modules
        .into_iter()
        .zip(videos)
        .map(|(module, videos)| ModuleWithVideos {
            module: module.into(),
            videos: videos.into_iter().map(Video::from).collect(),
        })
        .collect();

    Ok(ApiResponse::success(
        "Course",
        CourseDetail {
            course: course.into(),
            modules,
            enrollment_count,
        },
        None,
    ))
}

pub async fn create_course(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCourseRequest,
) -> AppResult<ApiResponse<Course>> {
    ensure_admin(user)?;
    let title = require_text(payload.title, "Course title")?;
    let price = match payload.price {
        Some(price) => require_price(price, "price")?,
        None => return Err(AppError::InvalidInput("price is required".into())),
    };
    let original_price = payload
        .original_price
        .map(|p| require_price(p, "originalPrice"))
        .transpose()?;

    let taken = Courses::find()
        .filter(CourseCol::Title.eq(title.as_str()))
        .one(&state.orm)
        .await?;
    if taken.is_some() {
        return Err(AppError::DuplicateTitle);
    }

    let course = CourseActive {
        id: NotSet,
        title: Set(title),
        description: Set(optional_text(payload.description)),
        thumbnail: Set(optional_text(payload.thumbnail)),
        price: Set(price),
        original_price: Set(original_price),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await
    .map_err(title_conflict)?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "course_create",
        "courses",
        serde_json::json!({ "course_id": course.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Course created",
        Course::from(course),
        Some(Meta::empty()),
    ))
}

pub async fn update_course(
    state: &AppState,
    user: &AuthUser,
    course_id: &str,
    payload: UpdateCourseRequest,
) -> AppResult<ApiResponse<Course>> {
    ensure_admin(user)?;
    let course_id = parse_id(course_id, "course ID")?;

    let UpdateCourseRequest {
        title,
        description,
        thumbnail,
        price,
        original_price,
    } = payload;
    if title.is_none()
        && description.is_none()
        && thumbnail.is_none()
        && price.is_none()
        && original_price.is_none()
    {
        return Err(AppError::InvalidInput("No fields provided to update".into()));
    }
    let title = title.map(|t| require_text(Some(t), "Course title")).transpose()?;
    let price = price.map(|p| require_price(p, "price")).transpose()?;
    let original_price = original_price
        .map(|p| require_price(p, "originalPrice"))
        .transpose()?;

    let existing = Courses::find_by_id(course_id).one(&state.orm).await?;
    let existing = match existing {
        Some(c) => c,
        None => return Err(AppError::not_found("Course")),
    };

    let mut active: CourseActive = existing.into();
    if let Some(title) = title {
        active.title = Set(title);
    }
    if let Some(description) = description {
        active.description = Set(optional_text(Some(description)));
    }
    if let Some(thumbnail) = thumbnail {
        active.thumbnail = Set(optional_text(Some(thumbnail)));
    }
    if let Some(price) = price {
        active.price = Set(price);
    }
    if let Some(original_price) = original_price {
        active.original_price = Set(Some(original_price));
    }
    let course = active.update(&state.orm).await.map_err(title_conflict)?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "course_update",
        "courses",
        serde_json::json!({ "course_id": course.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Course updated",
        Course::from(course),
        Some(Meta::empty()),
    ))
}

/// Delete a course with its modules, videos, comments and enrollments.
pub async fn delete_course(
    state: &AppState,
    user: &AuthUser,
    course_id: &str,
) -> AppResult<ApiResponse<CourseDeleted>> {
    ensure_admin(user)?;
    let course_id = parse_id(course_id, "course ID")?;

    let deletion = state
        .orm
        .transaction::<_, _, AppError>(|txn| {
            Box::pin(async move { hierarchy::delete_course_tree(txn, course_id).await })
        })
        .await?;

    tracing::info!(
        course_id,
        modules = deletion.modules,
        videos = deletion.videos,
        comments = deletion.comments,
        enrollments = deletion.enrollments,
        "course deleted"
    );
    audit::record(
        &state.orm,
        Some(user.user_id),
        "course_delete",
        "courses",
        serde_json::json!({
            "course_id": course_id,
            "modules": deletion.modules,
            "videos": deletion.videos,
        }),
    )
    .await;

    Ok(ApiResponse::success(
        "Course and all related content deleted successfully",
        CourseDeleted {
            deleted_course: deletion.title,
            deleted_modules_count: deletion.modules,
            deleted_videos_count: deletion.videos,
            deleted_comments_count: deletion.comments,
            deleted_enrollments_count: deletion.enrollments,
        },
        Some(Meta::empty()),
    ))
}

fn title_conflict(err: sea_orm::DbErr) -> AppError {
    if is_unique_violation(&err) {
        AppError::DuplicateTitle
    } else {
        AppError::OrmError(err)
    }
}
