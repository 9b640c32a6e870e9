use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    dto::courses::{CourseDeleted, CourseDetail, CourseList, CreateCourseRequest, UpdateCourseRequest},
    error::AppResult,
    middleware::{auth::AuthUser, json::AppJson},
    models::Course,
    response::ApiResponse,
    services::course_service,
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "List courses", body = ApiResponse<CourseList>)
    ),
    tag = "Courses"
)]
pub async fn list_courses(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CourseList>>> {
    let resp = course_service::list_courses(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/courses/{course_id}",
    params(
        ("course_id" = String, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course with modules and videos", body = ApiResponse<CourseDetail>),
        (status = 400, description = "Invalid course ID"),
        (status = 404, description = "Course not found"),
    ),
    tag = "Courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> AppResult<Json<ApiResponse<CourseDetail>>> {
    let resp = course_service::get_course(&state, &course_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 200, description = "Create course", body = ApiResponse<Course>),
        (status = 400, description = "Invalid input or duplicate title"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateCourseRequest>,
) -> AppResult<Json<ApiResponse<Course>>> {
    let resp = course_service::create_course(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/courses/{course_id}",
    params(
        ("course_id" = String, Path, description = "Course ID")
    ),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Updated course", body = ApiResponse<Course>),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Course not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn update_course(
    State(state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<String>,
    AppJson(payload): AppJson<UpdateCourseRequest>,
) -> AppResult<Json<ApiResponse<Course>>> {
    let resp = course_service::update_course(&state, &user, &course_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}",
    params(
        ("course_id" = String, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course and all related content deleted", body = ApiResponse<CourseDeleted>),
        (status = 400, description = "Invalid course ID"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Transaction failed, nothing was deleted"),
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<String>,
) -> AppResult<Json<ApiResponse<CourseDeleted>>> {
    let resp = course_service::delete_course(&state, &user, &course_id).await?;
    Ok(Json(resp))
}
