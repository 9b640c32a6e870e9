pub mod auth_service;
pub mod comment_service;
pub mod course_service;
pub mod enrollment_service;
pub mod hierarchy;
pub mod module_service;
pub mod video_service;
