mod common;

use common::{admin, count, create_course, create_module, create_video, member, setup_state};
use course_platform_api::{
    dto::{
        comments::CreateCommentRequest,
        enrollments::EnrollRequest,
        modules::{CreateModuleRequest, UpdateModuleRequest},
        videos::{CreateVideoRequest, UpdateVideoRequest},
    },
    entity::{Comments, Courses, Enrollments, Modules, Videos},
    error::AppError,
    services::{comment_service, course_service, enrollment_service, module_service, video_service},
};
use sea_orm::ConnectionTrait;

// Course with M1 (V1, V2) and an empty M2, one enrollment and one comment.
#[tokio::test]
async fn deleting_a_course_removes_the_whole_tree() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state).await?;
    let learner = member(&state, "learner@courses.dev").await?;

    let course_id = create_course(&state, &admin, "Rust Foundations").await?;
    let m1 = create_module(&state, &admin, course_id, "Getting started").await?;
    let _m2 = create_module(&state, &admin, course_id, "Ownership").await?;
    let v1 = create_video(&state, &admin, m1, "setup").await?;
    create_video(&state, &admin, m1, "cargo").await?;

    // Untouched sibling course.
    let other_id = create_course(&state, &admin, "Async Rust").await?;
    let other_module = create_module(&state, &admin, other_id, "Runtimes").await?;
    create_video(&state, &admin, other_module, "tokio").await?;

    enrollment_service::enroll(
        &state,
        &learner,
        EnrollRequest {
            course_id: Some(course_id.into()),
        },
    )
    .await?;
    comment_service::create_comment(
        &state,
        &learner,
        CreateCommentRequest {
            video_id: Some(v1.into()),
            comment: Some("Great intro".into()),
        },
    )
    .await?;

    let resp = course_service::delete_course(&state, &admin, &course_id.to_string()).await?;
    assert_eq!(
        resp.message,
        "Course and all related content deleted successfully"
    );
    let deleted = resp.data.expect("deletion summary");
    assert_eq!(deleted.deleted_course, "Rust Foundations");
    assert_eq!(deleted.deleted_modules_count, 2);
    assert_eq!(deleted.deleted_videos_count, 2);
    assert_eq!(deleted.deleted_comments_count, 1);
    assert_eq!(deleted.deleted_enrollments_count, 1);

    assert_eq!(count::<Courses>(&state).await?, 1);
    assert_eq!(count::<Modules>(&state).await?, 1);
    assert_eq!(count::<Videos>(&state).await?, 1);
    assert_eq!(count::<Comments>(&state).await?, 0);
    assert_eq!(count::<Enrollments>(&state).await?, 0);

    let err = course_service::get_course(&state, &course_id.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // Already gone: the second attempt reports NotFound and changes nothing.
    let err = course_service::delete_course(&state, &admin, &course_id.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref m) if m == "Course not found"));
    assert_eq!(count::<Videos>(&state).await?, 1);

    Ok(())
}

#[tokio::test]
async fn deleting_a_module_reports_its_video_count() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state).await?;

    let course_id = create_course(&state, &admin, "Rust Foundations").await?;
    let full = create_module(&state, &admin, course_id, "Traits").await?;
    let empty = create_module(&state, &admin, course_id, "Macros").await?;
    let kept = create_module(&state, &admin, course_id, "Generics").await?;
    for title in ["one", "two", "three"] {
        create_video(&state, &admin, full, title).await?;
    }
    create_video(&state, &admin, kept, "bounds").await?;

    let resp = module_service::delete_module(&state, &admin, &full.to_string()).await?;
    assert_eq!(
        resp.message,
        "Module and all related videos deleted successfully"
    );
    let deleted = resp.data.expect("deletion summary");
    assert_eq!(deleted.deleted_module, "Traits");
    assert_eq!(deleted.deleted_videos_count, 3);

    let deleted = module_service::delete_module(&state, &admin, &empty.to_string())
        .await?
        .data
        .expect("deletion summary");
    assert_eq!(deleted.deleted_videos_count, 0);

    assert_eq!(count::<Modules>(&state).await?, 1);
    assert_eq!(count::<Videos>(&state).await?, 1);

    let listed = module_service::list_modules(&state, &course_id.to_string())
        .await?
        .data
        .expect("modules");
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].module.id, kept);
    assert_eq!(listed.items[0].videos.len(), 1);

    let err = module_service::delete_module(&state, &admin, &full.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref m) if m == "Module not found"));

    Ok(())
}

// A trigger aborts the delete of the second module's videos after the first
// module's videos are already gone inside the transaction.
#[tokio::test]
async fn failed_cascade_leaves_the_tree_intact() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state).await?;
    let learner = member(&state, "learner@courses.dev").await?;

    let course_id = create_course(&state, &admin, "Rust Foundations").await?;
    let m1 = create_module(&state, &admin, course_id, "Getting started").await?;
    let m2 = create_module(&state, &admin, course_id, "Ownership").await?;
    let v1 = create_video(&state, &admin, m1, "setup").await?;
    create_video(&state, &admin, m2, "poison").await?;
    comment_service::create_comment(
        &state,
        &learner,
        CreateCommentRequest {
            video_id: Some(v1.into()),
            comment: Some("First!".into()),
        },
    )
    .await?;

    let snapshot = serde_json::to_value(
        course_service::get_course(&state, &course_id.to_string())
            .await?
            .data,
    )?;

    state
        .orm
        .execute_unprepared(
            "CREATE TRIGGER abort_poison BEFORE DELETE ON videos \
             WHEN OLD.title = 'poison' BEGIN SELECT RAISE(ABORT, 'injected fault'); END;",
        )
        .await?;

    let err = course_service::delete_course(&state, &admin, &course_id.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::TransactionFailure(_)), "got {err:?}");

    assert_eq!(count::<Courses>(&state).await?, 1);
    assert_eq!(count::<Modules>(&state).await?, 2);
    assert_eq!(count::<Videos>(&state).await?, 2);
    assert_eq!(count::<Comments>(&state).await?, 1);
    let after = serde_json::to_value(
        course_service::get_course(&state, &course_id.to_string())
            .await?
            .data,
    )?;
    assert_eq!(after, snapshot);

    let err = module_service::delete_module(&state, &admin, &m2.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::TransactionFailure(_)));
    assert_eq!(count::<Modules>(&state).await?, 2);

    state
        .orm
        .execute_unprepared("DROP TRIGGER abort_poison;")
        .await?;

    let deleted = course_service::delete_course(&state, &admin, &course_id.to_string())
        .await?
        .data
        .expect("deletion summary");
    assert_eq!(deleted.deleted_videos_count, 2);
    assert_eq!(count::<Videos>(&state).await?, 0);

    Ok(())
}

#[tokio::test]
async fn children_require_an_existing_parent() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state).await?;
    let learner = member(&state, "learner@courses.dev").await?;

    let err = module_service::create_module(
        &state,
        &admin,
        CreateModuleRequest {
            title: Some("Orphan".into()),
            course_id: Some(9999.into()),
        },
    )
    .await
    .unwrap_err();
    assert!(
        matches!(err, AppError::ParentNotFound(ref m) if m == "Invalid courseId. Course not found.")
    );

    let err = video_service::create_video(
        &state,
        &admin,
        CreateVideoRequest {
            title: Some("Orphan".into()),
            url: Some("https://videos.example.com/orphan".into()),
            module_id: Some("9999".into()),
            thumbnail: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::ParentNotFound(_)));

    let err = comment_service::create_comment(
        &state,
        &learner,
        CreateCommentRequest {
            video_id: Some(9999.into()),
            comment: Some("Hello?".into()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::ParentNotFound(_)));

    let err = module_service::create_module(
        &state,
        &admin,
        CreateModuleRequest {
            title: Some("No parent".into()),
            course_id: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    assert_eq!(count::<Modules>(&state).await?, 0);
    assert_eq!(count::<Videos>(&state).await?, 0);
    assert_eq!(count::<Comments>(&state).await?, 0);

    Ok(())
}

#[tokio::test]
async fn malformed_ids_are_rejected_before_any_lookup() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state).await?;

    let err = module_service::delete_module(&state, &admin, "abc")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(ref m) if m == "Invalid module ID"));

    let err = course_service::delete_course(&state, &admin, "1; DROP TABLE courses")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(ref m) if m == "Invalid course ID"));

    let err = video_service::delete_video(&state, &admin, "-4")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    let err = video_service::delete_video(&state, &admin, "42")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref m) if m == "Video not found"));

    Ok(())
}

#[tokio::test]
async fn members_cannot_change_the_catalog() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state).await?;
    let learner = member(&state, "learner@courses.dev").await?;

    let course_id = create_course(&state, &admin, "Rust Foundations").await?;
    let module_id = create_module(&state, &admin, course_id, "Getting started").await?;

    let err = course_service::delete_course(&state, &learner, &course_id.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let err = module_service::delete_module(&state, &learner, &module_id.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let err = module_service::create_module(
        &state,
        &learner,
        CreateModuleRequest {
            title: Some("Sneaky".into()),
            course_id: Some(course_id.into()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    // Authorization comes before input validation.
    let err = module_service::delete_module(&state, &learner, "abc")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    assert_eq!(count::<Courses>(&state).await?, 1);
    assert_eq!(count::<Modules>(&state).await?, 1);

    Ok(())
}

#[tokio::test]
async fn video_updates_and_deletes() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state).await?;
    let learner = member(&state, "learner@courses.dev").await?;

    let course_id = create_course(&state, &admin, "Rust Foundations").await?;
    let module_id = create_module(&state, &admin, course_id, "Getting started").await?;
    let video_id = create_video(&state, &admin, module_id, "setup").await?;

    let err = video_service::update_video(
        &state,
        &admin,
        &video_id.to_string(),
        UpdateVideoRequest::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(ref m) if m == "No fields provided to update"));

    let updated = video_service::update_video(
        &state,
        &admin,
        &video_id.to_string(),
        UpdateVideoRequest {
            title: Some("Installing rustup".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("video");
    assert_eq!(updated.title, "Installing rustup");
    assert_eq!(updated.module_id, module_id);

    for text in ["one", "two"] {
        comment_service::create_comment(
            &state,
            &learner,
            CreateCommentRequest {
                video_id: Some(video_id.into()),
                comment: Some(text.into()),
            },
        )
        .await?;
    }

    let resp = video_service::delete_video(&state, &admin, &video_id.to_string()).await?;
    assert_eq!(resp.message, "Video deleted successfully");
    let deleted = resp.data.expect("deletion summary");
    assert_eq!(deleted.deleted_video, "Installing rustup");
    assert_eq!(deleted.deleted_comments_count, 2);

    assert_eq!(count::<Videos>(&state).await?, 0);
    assert_eq!(count::<Comments>(&state).await?, 0);
    assert_eq!(count::<Modules>(&state).await?, 1);

    Ok(())
}

// The parent passes the existence check, then a trigger deletes it right
// before the child row lands.
#[tokio::test]
async fn parent_deleted_before_insert_is_reported_as_missing() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state).await?;

    let course_id = create_course(&state, &admin, "Rust Foundations").await?;
    state
        .orm
        .execute_unprepared(
            "CREATE TRIGGER course_vanishes BEFORE INSERT ON modules \
             BEGIN DELETE FROM courses WHERE id = NEW.course_id; END;",
        )
        .await?;

    let err = module_service::create_module(
        &state,
        &admin,
        CreateModuleRequest {
            title: Some("Getting started".into()),
            course_id: Some(course_id.into()),
        },
    )
    .await
    .unwrap_err();
    assert!(
        matches!(err, AppError::ParentNotFound(ref m) if m == "Invalid courseId. Course not found."),
        "got {err:?}"
    );
    assert_eq!(count::<Modules>(&state).await?, 0);

    state
        .orm
        .execute_unprepared("DROP TRIGGER course_vanishes;")
        .await?;

    let course_id = create_course(&state, &admin, "Async Rust").await?;
    let module_id = create_module(&state, &admin, course_id, "Runtimes").await?;
    state
        .orm
        .execute_unprepared(
            "CREATE TRIGGER module_vanishes BEFORE INSERT ON videos \
             BEGIN DELETE FROM modules WHERE id = NEW.module_id; END;",
        )
        .await?;

    let err = video_service::create_video(
        &state,
        &admin,
        CreateVideoRequest {
            title: Some("tokio".into()),
            url: Some("https://videos.example.com/tokio".into()),
            module_id: Some(module_id.into()),
            thumbnail: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::ParentNotFound(_)), "got {err:?}");
    assert_eq!(count::<Videos>(&state).await?, 0);

    Ok(())
}

#[tokio::test]
async fn module_rename_rules() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state).await?;
    let learner = member(&state, "learner@courses.dev").await?;

    let course_id = create_course(&state, &admin, "Rust Foundations").await?;
    let module_id = create_module(&state, &admin, course_id, "Getting started").await?;

    let err = module_service::update_module(
        &state,
        &admin,
        &module_id.to_string(),
        UpdateModuleRequest {
            title: Some("   ".into()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(ref m) if m == "Module title is required"));

    let err = module_service::update_module(
        &state,
        &admin,
        &module_id.to_string(),
        UpdateModuleRequest::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    let resp = module_service::update_module(
        &state,
        &admin,
        &module_id.to_string(),
        UpdateModuleRequest {
            title: Some("  Setting up  ".into()),
        },
    )
    .await?;
    assert_eq!(resp.message, "Module updated");
    let module = resp.data.expect("module");
    assert_eq!(module.id, module_id);
    assert_eq!(module.title, "Setting up");
    assert_eq!(module.course_id, course_id);

    let err = module_service::update_module(
        &state,
        &admin,
        "999",
        UpdateModuleRequest {
            title: Some("Ghost".into()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref m) if m == "Module not found"));

    let err = module_service::update_module(
        &state,
        &admin,
        "abc",
        UpdateModuleRequest {
            title: Some("Ghost".into()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(ref m) if m == "Invalid module ID"));

    let err = module_service::update_module(
        &state,
        &learner,
        &module_id.to_string(),
        UpdateModuleRequest {
            title: Some("Hijacked".into()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let listed = module_service::list_modules(&state, &course_id.to_string())
        .await?
        .data
        .expect("modules");
    assert_eq!(listed.items[0].module.title, "Setting up");

    Ok(())
}
