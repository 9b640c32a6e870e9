pub mod audit_logs;
pub mod comments;
pub mod courses;
pub mod enrollments;
pub mod modules;
pub mod users;
pub mod videos;

pub use audit_logs::Entity as AuditLogs;
pub use comments::Entity as Comments;
pub use courses::Entity as Courses;
pub use enrollments::Entity as Enrollments;
pub use modules::Entity as Modules;
pub use users::Entity as Users;
pub use videos::Entity as Videos;
