use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod auth;
pub mod comments;
pub mod courses;
pub mod doc;
pub mod enrollments;
pub mod health;
pub mod modules;
pub mod videos;

// Build the API router without binding state; it will be provided at the top level.
// GET `/modules/{id}` takes a course id (module listing); GET `/video/{id}` lists
// the video's comments.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/signUp", post(auth::sign_up))
        .route("/signIn", post(auth::sign_in))
        .route("/profile", get(auth::get_profile).put(auth::update_profile))
        .route("/courses", get(courses::list_courses).post(courses::create_course))
        .route(
            "/courses/{course_id}",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
        .route(
            "/courses/{course_id}/enrollment-stats",
            get(enrollments::enrollment_stats),
        )
        .route("/enroll", post(enrollments::enroll))
        .route("/mycourses", get(enrollments::my_courses))
        .route("/module", post(modules::create_module))
        .route(
            "/modules/{id}",
            get(modules::list_modules)
                .put(modules::update_module)
                .delete(modules::delete_module),
        )
        .route("/video", post(videos::create_video))
        .route(
            "/video/{id}",
            get(comments::list_comments)
                .put(videos::update_video)
                .delete(videos::delete_video),
        )
        .route("/comment", post(comments::create_comment))
}
