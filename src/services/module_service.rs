use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, LoaderTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::{
    audit,
    dto::modules::{
        CreateModuleRequest, ModuleDeleted, ModuleList, ModuleWithVideos, UpdateModuleRequest,
    },
    entity::{
        modules::{ActiveModel as ModuleActive, Column as ModuleCol, Entity as Modules},
        videos::{Column as VideoCol, Entity as Videos},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Module, Video},
    response::{ApiResponse, Meta},
    services::hierarchy,
    state::AppState,
    validation::{parse_id, require_id, require_text},
};

pub async fn list_modules(state: &AppState, course_id: &str) -> AppResult<ApiResponse<ModuleList>> {
    let course_id = parse_id(course_id, "course ID")?;

    let modules = Modules::find()
        .filter(ModuleCol::CourseId.eq(course_id))
        .order_by_asc(ModuleCol::Id)
        .all(&state.orm)
        .await?;
    let videos = modules
        .load_many(Videos::find().order_by_asc(VideoCol::Id), &state.orm)
        .await?;

    let items: Vec<ModuleWithVideos> = modules
        .into_iter()
        .zip(videos)
        .map(|(module, videos)| ModuleWithVideos {
            module: module.into(),
            videos: videos.into_iter().map(Video::from).collect(),
        })
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Modules", ModuleList { items }, Some(meta)))
}

pub async fn create_module(
    state: &AppState,
    user: &AuthUser,
    payload: CreateModuleRequest,
) -> AppResult<ApiResponse<Module>> {
    ensure_admin(user)?;
    let title = require_text(payload.title, "Module title")?;
    let course_id = require_id(payload.course_id.as_ref(), "courseId")?;

    let course = hierarchy::course_as_parent(&state.orm, course_id).await?;

    let module = ModuleActive {
        id: NotSet,
        title: Set(title),
        course_id: Set(course.id),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await
    .map_err(|err| hierarchy::child_insert_failed(err, hierarchy::COURSE_NOT_FOUND))?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "module_create",
        "modules",
        serde_json::json!({ "module_id": module.id, "course_id": course.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Module created",
        Module::from(module),
        Some(Meta::empty()),
    ))
}

pub async fn update_module(
    state: &AppState,
    user: &AuthUser,
    module_id: &str,
    payload: UpdateModuleRequest,
) -> AppResult<ApiResponse<Module>> {
    ensure_admin(user)?;
    let module_id = parse_id(module_id, "module ID")?;
    let title = require_text(payload.title, "Module title")?;

    let existing = Modules::find_by_id(module_id).one(&state.orm).await?;
    let existing = match existing {
        Some(m) => m,
        None => return Err(AppError::not_found("Module")),
    };

    let mut active: ModuleActive = existing.into();
    active.title = Set(title);
    let module = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "module_update",
        "modules",
        serde_json::json!({ "module_id": module.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Module updated",
        Module::from(module),
        Some(Meta::empty()),
    ))
}

/// Delete a module and every video under it in one transaction.
pub async fn delete_module(
    state: &AppState,
    user: &AuthUser,
    module_id: &str,
) -> AppResult<ApiResponse<ModuleDeleted>> {
    ensure_admin(user)?;
    let module_id = parse_id(module_id, "module ID")?;

    let deletion = state
        .orm
        .transaction::<_, _, AppError>(|txn| {
            Box::pin(async move { hierarchy::delete_module_tree(txn, module_id).await })
        })
        .await?;

    tracing::info!(
        module_id,
        videos = deletion.videos,
        comments = deletion.comments,
        "module deleted"
    );
    audit::record(
        &state.orm,
        Some(user.user_id),
        "module_delete",
        "modules",
        serde_json::json!({ "module_id": module_id, "videos": deletion.videos }),
    )
    .await;

    Ok(ApiResponse::success(
        "Module and all related videos deleted successfully",
        ModuleDeleted {
            deleted_module: deletion.title,
            deleted_videos_count: deletion.videos,
            deleted_comments_count: deletion.comments,
        },
        Some(Meta::empty()),
    ))
}
