#![allow(dead_code)]

use chrono::Utc;
use course_platform_api::{
    config::AppConfig,
    db::run_migrations,
    dto::{
        courses::CreateCourseRequest, modules::CreateModuleRequest, videos::CreateVideoRequest,
    },
    entity::users::{ActiveModel as UserActive, Role},
    middleware::auth::AuthUser,
    services::{course_service, module_service, video_service},
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, EntityTrait, PaginatorTrait, Set};

pub const ADMIN_EMAIL: &str = "admin@courses.dev";
pub const JWT_SECRET: &str = "integration-secret";

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: JWT_SECRET.into(),
        jwt_ttl_hours: 1,
        admin_email: Some(ADMIN_EMAIL.into()),
    }
}

// A single pooled connection keeps every query on the same in-memory database.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let orm = Database::connect(options).await?;
    run_migrations(&orm).await?;

    Ok(AppState::new(orm, test_config()))
}

pub async fn create_user(
    state: &AppState,
    name: &str,
    email: &str,
    role: Role,
) -> anyhow::Result<AuthUser> {
    let user = UserActive {
        id: NotSet,
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        password_hash: Set("dummy".into()),
        role: Set(role),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: user.id,
        email: user.email,
        role: user.role,
    })
}

pub async fn admin(state: &AppState) -> anyhow::Result<AuthUser> {
    create_user(state, "Admin", ADMIN_EMAIL, Role::Admin).await
}

pub async fn member(state: &AppState, email: &str) -> anyhow::Result<AuthUser> {
    create_user(state, "Learner", email, Role::Member).await
}

pub async fn create_course(state: &AppState, admin: &AuthUser, title: &str) -> anyhow::Result<i32> {
    let resp = course_service::create_course(
        state,
        admin,
        CreateCourseRequest {
            title: Some(title.into()),
            price: Some(4900),
            ..Default::default()
        },
    )
    .await?;
    Ok(resp.data.expect("course").id)
}

pub async fn create_module(
    state: &AppState,
    admin: &AuthUser,
    course_id: i32,
    title: &str,
) -> anyhow::Result<i32> {
    let resp = module_service::create_module(
        state,
        admin,
        CreateModuleRequest {
            title: Some(title.into()),
            course_id: Some(course_id.into()),
        },
    )
    .await?;
    Ok(resp.data.expect("module").id)
}

pub async fn create_video(
    state: &AppState,
    admin: &AuthUser,
    module_id: i32,
    title: &str,
) -> anyhow::Result<i32> {
    let resp = video_service::create_video(
        state,
        admin,
        CreateVideoRequest {
            title: Some(title.into()),
            url: Some(format!("https://videos.example.com/{module_id}/{title}")),
            module_id: Some(module_id.into()),
            thumbnail: None,
        },
    )
    .await?;
    Ok(resp.data.expect("video").id)
}

pub async fn count<E>(state: &AppState) -> anyhow::Result<u64>
where
    E: EntityTrait,
    E::Model: Sync,
{
    Ok(E::find().count(&state.orm).await?)
}
