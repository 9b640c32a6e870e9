use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    dto::{
        courses::EnrollmentStats,
        enrollments::{EnrollRequest, MyCourseList},
    },
    error::AppResult,
    middleware::{auth::AuthUser, json::AppJson},
    models::Enrollment,
    response::ApiResponse,
    services::enrollment_service,
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/enroll",
    request_body = EnrollRequest,
    responses(
        (status = 200, description = "Enrolled", body = ApiResponse<Enrollment>),
        (status = 400, description = "Already enrolled, invalid or unknown course"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
pub async fn enroll(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<EnrollRequest>,
) -> AppResult<Json<ApiResponse<Enrollment>>> {
    let resp = enrollment_service::enroll(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/mycourses",
    responses(
        (status = 200, description = "Courses the caller is enrolled in", body = ApiResponse<MyCourseList>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
pub async fn my_courses(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<MyCourseList>>> {
    let resp = enrollment_service::list_user_courses(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/enrollment-stats",
    params(
        ("course_id" = String, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Enrollment count", body = ApiResponse<EnrollmentStats>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Course not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
pub async fn enrollment_stats(
    State(state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<String>,
) -> AppResult<Json<ApiResponse<EnrollmentStats>>> {
    let resp = enrollment_service::course_enrollment_count(&state, &user, &course_id).await?;
    Ok(Json(resp))
}
