pub mod auth;
pub mod comments;
pub mod courses;
pub mod enrollments;
pub mod modules;
pub mod videos;
