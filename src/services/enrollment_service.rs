use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::{
    audit,
    dto::{
        courses::EnrollmentStats,
        enrollments::{EnrollRequest, MyCourseList},
    },
    entity::{
        courses::Entity as Courses,
        enrollments::{ActiveModel as EnrollmentActive, Column as EnrollmentCol, Entity as Enrollments},
    },
    error::{AppError, AppResult, is_unique_violation},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Course, Enrollment},
    response::{ApiResponse, Meta},
    services::hierarchy,
    state::AppState,
    validation::{parse_id, require_id},
};

/// Enroll the caller in a course. The (user, course) unique index decides
/// races: whichever insert loses reports `AlreadyEnrolled`.
pub async fn enroll(
    state: &AppState,
    user: &AuthUser,
    payload: EnrollRequest,
) -> AppResult<ApiResponse<Enrollment>> {
    let course_id = require_id(payload.course_id.as_ref(), "courseId")?;
    let course = hierarchy::course_as_parent(&state.orm, course_id).await?;

    let enrollment = EnrollmentActive {
        id: NotSet,
        user_id: Set(user.user_id),
        course_id: Set(course.id),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await
    .map_err(|err| {
        if is_unique_violation(&err) {
            AppError::AlreadyEnrolled
        } else {
            hierarchy::child_insert_failed(err, hierarchy::COURSE_NOT_FOUND)
        }
    })?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "course_enroll",
        "enrollments",
        serde_json::json!({ "course_id": course.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Enrolled",
        Enrollment::from(enrollment),
        Some(Meta::empty()),
    ))
}

pub async fn list_user_courses(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<MyCourseList>> {
    let items: Vec<Course> = Enrollments::find()
        .filter(EnrollmentCol::UserId.eq(user.user_id))
        .order_by_asc(EnrollmentCol::Id)
        .find_also_related(Courses)
        .all(&state.orm)
        .await?
        .into_iter()
        .filter_map(|(_, course)| course.map(Course::from))
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("My courses", MyCourseList { items }, Some(meta)))
}

pub async fn course_enrollment_count(
    state: &AppState,
    user: &AuthUser,
    course_id: &str,
) -> AppResult<ApiResponse<EnrollmentStats>> {
    ensure_admin(user)?;
    let course_id = parse_id(course_id, "course ID")?;

    let course = Courses::find_by_id(course_id).one(&state.orm).await?;
    let course = match course {
        Some(c) => c,
        None => return Err(AppError::not_found("Course")),
    };

    let enrollment_count = Enrollments::find()
        .filter(EnrollmentCol::CourseId.eq(course.id))
        .count(&state.orm)
        .await?;

    Ok(ApiResponse::success(
        "Enrollment stats",
        EnrollmentStats {
            course_id: course.id,
            title: course.title,
            enrollment_count,
        },
        Some(Meta::empty()),
    ))
}
