//! Create the course tree (`courses` -> `modules` -> `videos`) together with
//! `enrollments` and `comments`.
//!
//! Foreign keys carry no database-level cascade: the services delete
//! children before parents inside one transaction.
use sea_orm_migration::{prelude::*, schema::*};

use super::m20250601_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(pk_auto(Courses::Id))
                    .col(string(Courses::Title).unique_key())
                    .col(text_null(Courses::Description))
                    .col(string_null(Courses::Thumbnail))
                    .col(big_integer(Courses::Price))
                    .col(big_integer_null(Courses::OriginalPrice))
                    .col(timestamp_with_time_zone(Courses::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Modules::Table)
                    .if_not_exists()
                    .col(pk_auto(Modules::Id))
                    .col(string(Modules::Title))
                    .col(integer(Modules::CourseId))
                    .col(timestamp_with_time_zone(Modules::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_modules_course")
                            .from(Modules::Table, Modules::CourseId)
                            .to(Courses::Table, Courses::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Videos::Table)
                    .if_not_exists()
                    .col(pk_auto(Videos::Id))
                    .col(string(Videos::Title))
                    .col(string(Videos::Url))
                    .col(string_null(Videos::Thumbnail))
                    .col(integer(Videos::ModuleId))
                    .col(timestamp_with_time_zone(Videos::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_videos_module")
                            .from(Videos::Table, Videos::ModuleId)
                            .to(Modules::Table, Modules::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(pk_auto(Enrollments::Id))
                    .col(integer(Enrollments::UserId))
                    .col(integer(Enrollments::CourseId))
                    .col(timestamp_with_time_zone(Enrollments::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollments_user")
                            .from(Enrollments::Table, Enrollments::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollments_course")
                            .from(Enrollments::Table, Enrollments::CourseId)
                            .to(Courses::Table, Courses::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one enrollment per (user, course); concurrent enrolls race on this.
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_user_course")
                    .table(Enrollments::Table)
                    .col(Enrollments::UserId)
                    .col(Enrollments::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(pk_auto(Comments::Id))
                    .col(integer(Comments::UserId))
                    .col(integer(Comments::VideoId))
                    .col(text(Comments::Text))
                    .col(timestamp_with_time_zone(Comments::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_user")
                            .from(Comments::Table, Comments::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_video")
                            .from(Comments::Table, Comments::VideoId)
                            .to(Videos::Table, Videos::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comments_video_created")
                    .table(Comments::Table)
                    .col(Comments::VideoId)
                    .col(Comments::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Videos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Modules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
    Title,
    Description,
    Thumbnail,
    Price,
    OriginalPrice,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Modules {
    Table,
    Id,
    Title,
    CourseId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Videos {
    Table,
    Id,
    Title,
    Url,
    Thumbnail,
    ModuleId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Enrollments {
    Table,
    Id,
    UserId,
    CourseId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    Id,
    UserId,
    VideoId,
    Text,
    CreatedAt,
}
