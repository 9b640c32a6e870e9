use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::{
    audit,
    config::AppConfig,
    dto::auth::{AuthResponse, Claims, SignInRequest, SignUpRequest, UpdateProfileRequest},
    entity::users::{self, ActiveModel as UserActive, Column as UserCol, Entity as Users, Role},
    error::{AppError, AppResult, is_unique_violation},
    middleware::auth::AuthUser,
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
    validation::require_text,
};

const MIN_PASSWORD_LEN: usize = 6;

pub async fn sign_up(state: &AppState, payload: SignUpRequest) -> AppResult<ApiResponse<AuthResponse>> {
    let name = require_text(payload.name, "Name")?;
    let email = require_text(payload.email, "Email")?.to_lowercase();
    let password = payload.password.unwrap_or_default();
    if !email.contains('@') {
        return Err(AppError::InvalidInput("Email is invalid".into()));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::InvalidInput(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let exist = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::EmailTaken);
    }

    let password_hash = hash_password(&password)?;
    let role = Role::for_new_account(&email, state.config.admin_email.as_deref());

    let user = UserActive {
        id: NotSet,
        name: Set(name),
        email: Set(email),
        password_hash: Set(password_hash),
        role: Set(role),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await
    .map_err(|err| {
        if is_unique_violation(&err) {
            AppError::EmailTaken
        } else {
            AppError::OrmError(err)
        }
    })?;

    audit::record(
        &state.orm,
        Some(user.id),
        "user_register",
        "users",
        serde_json::json!({ "user_id": user.id, "role": user.role }),
    )
    .await;

    let token = issue_token(&state.config, &user)?;
    Ok(ApiResponse::success(
        "User created",
        AuthResponse {
            token,
            user: user.into(),
        },
        Some(Meta::empty()),
    ))
}

pub async fn sign_in(state: &AppState, payload: SignInRequest) -> AppResult<ApiResponse<AuthResponse>> {
    let email = require_text(payload.email, "Email")?.to_lowercase();
    let password = payload.password.unwrap_or_default();

    let user = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;
    let user = match user {
        Some(u) => u,
        None => return Err(AppError::InvalidCredentials),
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let argon2 = Argon2::default();
    if argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::InvalidCredentials);
    }

    let token = issue_token(&state.config, &user)?;
    let message = match user.role {
        Role::Admin => "Welcome Admin",
        Role::Member => "Logged in",
    };

    Ok(ApiResponse::success(
        message,
        AuthResponse {
            token,
            user: user.into(),
        },
        Some(Meta::empty()),
    ))
}

pub async fn get_profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<User>> {
    let found = Users::find_by_id(user.user_id).one(&state.orm).await?;
    let found = match found {
        Some(u) => u,
        None => return Err(AppError::not_found("User")),
    };
    Ok(ApiResponse::success("Profile", User::from(found), None))
}

pub async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<User>> {
    let name = require_text(payload.name, "Name")?;

    let existing = Users::find_by_id(user.user_id).one(&state.orm).await?;
    let existing = match existing {
        Some(u) => u,
        None => return Err(AppError::not_found("User")),
    };

    let mut active: UserActive = existing.into();
    active.name = Set(name);
    let updated = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Profile updated",
        User::from(updated),
        Some(Meta::empty()),
    ))
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn issue_token(config: &AppConfig, user: &users::Model) -> AppResult<String> {
    let expiration = TimeDelta::try_hours(config.jwt_ttl_hours)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: user.role,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}
