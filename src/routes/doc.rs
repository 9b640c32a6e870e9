use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{AuthResponse, SignInRequest, SignUpRequest, UpdateProfileRequest},
        comments::{CommentAuthor, CommentList, CommentWithAuthor, CreateCommentRequest},
        courses::{
            CourseDeleted, CourseDetail, CourseList, CreateCourseRequest, EnrollmentStats,
            UpdateCourseRequest,
        },
        enrollments::{EnrollRequest, MyCourseList},
        modules::{CreateModuleRequest, ModuleDeleted, ModuleList, ModuleWithVideos, UpdateModuleRequest},
        videos::{CreateVideoRequest, UpdateVideoRequest, VideoDeleted},
    },
    entity::users::Role,
    models::{Comment, Course, Enrollment, Module, User, Video},
    response::{ApiResponse, Meta},
    routes::{auth, comments, courses, enrollments, health, modules, videos},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::sign_up,
        auth::sign_in,
        auth::get_profile,
        auth::update_profile,
        courses::list_courses,
        courses::get_course,
        courses::create_course,
        courses::update_course,
        courses::delete_course,
        modules::list_modules,
        modules::create_module,
        modules::update_module,
        modules::delete_module,
        videos::create_video,
        videos::update_video,
        videos::delete_video,
        comments::create_comment,
        comments::list_comments,
        enrollments::enroll,
        enrollments::my_courses,
        enrollments::enrollment_stats
    ),
    components(
        schemas(
            Role,
            User,
            Course,
            Module,
            Video,
            Enrollment,
            Comment,
            SignUpRequest,
            SignInRequest,
            UpdateProfileRequest,
            AuthResponse,
            CreateCourseRequest,
            UpdateCourseRequest,
            CourseList,
            CourseDetail,
            CourseDeleted,
            EnrollmentStats,
            CreateModuleRequest,
            UpdateModuleRequest,
            ModuleWithVideos,
            ModuleList,
            ModuleDeleted,
            CreateVideoRequest,
            UpdateVideoRequest,
            VideoDeleted,
            CreateCommentRequest,
            CommentAuthor,
            CommentWithAuthor,
            CommentList,
            EnrollRequest,
            MyCourseList,
            Meta,
            ApiResponse<Course>,
            ApiResponse<CourseDetail>,
            ApiResponse<CourseDeleted>,
            ApiResponse<ModuleDeleted>,
            ApiResponse<Enrollment>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Sign-up, sign-in and profile endpoints"),
        (name = "Courses", description = "Course catalog and course tree deletion"),
        (name = "Modules", description = "Module endpoints"),
        (name = "Videos", description = "Video endpoints"),
        (name = "Comments", description = "Video comment endpoints"),
        (name = "Enrollments", description = "Enrollment endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
