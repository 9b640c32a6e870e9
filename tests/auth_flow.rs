mod common;

use common::{ADMIN_EMAIL, JWT_SECRET, setup_state};
use course_platform_api::{
    dto::auth::{SignInRequest, SignUpRequest, UpdateProfileRequest},
    entity::users::Role,
    error::AppError,
    middleware::auth::authenticate,
    services::auth_service,
};

fn sign_up_request(name: &str, email: &str, password: &str) -> SignUpRequest {
    SignUpRequest {
        name: Some(name.into()),
        email: Some(email.into()),
        password: Some(password.into()),
    }
}

#[tokio::test]
async fn configured_address_signs_up_as_admin() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let resp = auth_service::sign_up(
        &state,
        sign_up_request("Admin", &ADMIN_EMAIL.to_uppercase(), "s3cret-pass"),
    )
    .await?;
    assert_eq!(resp.message, "User created");
    let auth = resp.data.expect("auth");
    assert_eq!(auth.user.role, Role::Admin);
    assert_eq!(auth.user.email, ADMIN_EMAIL);

    let caller = authenticate(Some(&format!("Bearer {}", auth.token)), JWT_SECRET)?;
    assert_eq!(caller.user_id, auth.user.id);
    assert_eq!(caller.role, Role::Admin);

    let resp = auth_service::sign_in(
        &state,
        SignInRequest {
            email: Some(ADMIN_EMAIL.into()),
            password: Some("s3cret-pass".into()),
        },
    )
    .await?;
    assert_eq!(resp.message, "Welcome Admin");

    Ok(())
}

#[tokio::test]
async fn members_sign_up_and_sign_in() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let auth = auth_service::sign_up(
        &state,
        sign_up_request("Learner", "learner@courses.dev", "hunter22"),
    )
    .await?
    .data
    .expect("auth");
    assert_eq!(auth.user.role, Role::Member);

    let resp = auth_service::sign_in(
        &state,
        SignInRequest {
            email: Some("Learner@Courses.dev".into()),
            password: Some("hunter22".into()),
        },
    )
    .await?;
    assert_eq!(resp.message, "Logged in");
    let token = resp.data.expect("auth").token;
    let caller = authenticate(Some(&format!("Bearer {token}")), JWT_SECRET)?;
    assert_eq!(caller.role, Role::Member);

    let err = auth_service::sign_in(
        &state,
        SignInRequest {
            email: Some("learner@courses.dev".into()),
            password: Some("wrong-pass".into()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));

    let err = auth_service::sign_in(
        &state,
        SignInRequest {
            email: Some("nobody@courses.dev".into()),
            password: Some("hunter22".into()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));

    Ok(())
}

#[tokio::test]
async fn sign_up_validates_input() -> anyhow::Result<()> {
    let state = setup_state().await?;

    auth_service::sign_up(
        &state,
        sign_up_request("Learner", "learner@courses.dev", "hunter22"),
    )
    .await?;

    let err = auth_service::sign_up(
        &state,
        sign_up_request("Again", "LEARNER@courses.dev", "hunter22"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::EmailTaken));

    let err = auth_service::sign_up(&state, sign_up_request("Short", "short@courses.dev", "abc"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    let err = auth_service::sign_up(&state, sign_up_request("   ", "blank@courses.dev", "hunter22"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(ref m) if m == "Name is required"));

    Ok(())
}

#[tokio::test]
async fn profile_can_be_renamed() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let auth = auth_service::sign_up(
        &state,
        sign_up_request("Learner", "learner@courses.dev", "hunter22"),
    )
    .await?
    .data
    .expect("auth");
    let caller = authenticate(Some(&format!("Bearer {}", auth.token)), JWT_SECRET)?;

    let updated = auth_service::update_profile(
        &state,
        &caller,
        UpdateProfileRequest {
            name: Some("Ferris".into()),
        },
    )
    .await?
    .data
    .expect("user");
    assert_eq!(updated.name, "Ferris");

    let profile = auth_service::get_profile(&state, &caller)
        .await?
        .data
        .expect("user");
    assert_eq!(profile.name, "Ferris");
    assert_eq!(profile.email, "learner@courses.dev");

    let err = auth_service::update_profile(&state, &caller, UpdateProfileRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    Ok(())
}
