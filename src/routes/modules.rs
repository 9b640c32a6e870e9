use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    dto::modules::{CreateModuleRequest, ModuleDeleted, ModuleList, UpdateModuleRequest},
    error::AppResult,
    middleware::{auth::AuthUser, json::AppJson},
    models::Module,
    response::ApiResponse,
    services::module_service,
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/modules/{id}",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Modules of a course with their videos", body = ApiResponse<ModuleList>),
        (status = 400, description = "Invalid course ID"),
    ),
    tag = "Modules"
)]
pub async fn list_modules(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> AppResult<Json<ApiResponse<ModuleList>>> {
    let resp = module_service::list_modules(&state, &course_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/module",
    request_body = CreateModuleRequest,
    responses(
        (status = 200, description = "Create module", body = ApiResponse<Module>),
        (status = 400, description = "Invalid input or course not found"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Modules"
)]
pub async fn create_module(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateModuleRequest>,
) -> AppResult<Json<ApiResponse<Module>>> {
    let resp = module_service::create_module(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/modules/{id}",
    params(
        ("id" = String, Path, description = "Module ID")
    ),
    request_body = UpdateModuleRequest,
    responses(
        (status = 200, description = "Updated module", body = ApiResponse<Module>),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Module not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Modules"
)]
pub async fn update_module(
    State(state): State<AppState>,
    user: AuthUser,
    Path(module_id): Path<String>,
    AppJson(payload): AppJson<UpdateModuleRequest>,
) -> AppResult<Json<ApiResponse<Module>>> {
    let resp = module_service::update_module(&state, &user, &module_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/modules/{id}",
    params(
        ("id" = String, Path, description = "Module ID")
    ),
    responses(
        (status = 200, description = "Module and all related videos deleted", body = ApiResponse<ModuleDeleted>),
        (status = 400, description = "Invalid module ID"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Module not found"),
        (status = 500, description = "Transaction failed, nothing was deleted"),
    ),
    security(("bearer_auth" = [])),
    tag = "Modules"
)]
pub async fn delete_module(
    State(state): State<AppState>,
    user: AuthUser,
    Path(module_id): Path<String>,
) -> AppResult<Json<ApiResponse<ModuleDeleted>>> {
    let resp = module_service::delete_module(&state, &user, &module_id).await?;
    Ok(Json(resp))
}
