use chrono::Utc;
use course_platform_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        courses::{ActiveModel as CourseActive, Column as CourseCol, Entity as Courses},
        modules::ActiveModel as ModuleActive,
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Role},
        videos::ActiveModel as VideoActive,
    },
    services::auth_service::hash_password,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let admin_email = config
        .admin_email
        .clone()
        .unwrap_or_else(|| "admin@example.com".to_string());
    let admin_id = ensure_user(&orm, "Admin", &admin_email, "admin123", Role::Admin).await?;
    let user_id = ensure_user(&orm, "Learner", "user@example.com", "user123", Role::Member).await?;
    seed_catalog(&orm).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    orm: &DatabaseConnection,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> anyhow::Result<i32> {
    if let Some(existing) = Users::find()
        .filter(UserCol::Email.eq(email))
        .one(orm)
        .await?
    {
        let mut active: UserActive = existing.into();
        active.role = Set(role);
        let user = active.update(orm).await?;
        println!("Ensured user {email} (role={role:?})");
        return Ok(user.id);
    }

    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let user = UserActive {
        id: NotSet,
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(password_hash),
        role: Set(role),
        created_at: Set(Utc::now().into()),
    }
    .insert(orm)
    .await?;

    println!("Created user {email} (role={role:?})");
    Ok(user.id)
}

async fn seed_catalog(orm: &DatabaseConnection) -> anyhow::Result<()> {
    let catalog: Vec<(&str, &str, i64, Vec<(&str, Vec<(&str, &str)>)>)> = vec![
        (
            "Rust Foundations",
            "Ownership, borrowing and the type system",
            4900,
            vec![
                (
                    "Getting started",
                    vec![
                        ("Installing the toolchain", "https://videos.example.com/rust/setup"),
                        ("Hello, Cargo", "https://videos.example.com/rust/cargo"),
                    ],
                ),
                (
                    "Ownership",
                    vec![("Moves and borrows", "https://videos.example.com/rust/borrows")],
                ),
            ],
        ),
        (
            "Async Rust in Practice",
            "Futures, tasks and Tokio",
            7900,
            vec![(
                "Runtimes",
                vec![("What a runtime does", "https://videos.example.com/async/runtime")],
            )],
        ),
    ];

    for (title, description, price, modules) in catalog {
        let exists = Courses::find()
            .filter(CourseCol::Title.eq(title))
            .one(orm)
            .await?;
        if exists.is_some() {
            continue;
        }

        let course = CourseActive {
            id: NotSet,
            title: Set(title.to_string()),
            description: Set(Some(description.to_string())),
            thumbnail: Set(None),
            price: Set(price),
            original_price: Set(Some(price * 2)),
            created_at: Set(Utc::now().into()),
        }
        .insert(orm)
        .await?;

        for (module_title, videos) in modules {
            let module = ModuleActive {
                id: NotSet,
                title: Set(module_title.to_string()),
                course_id: Set(course.id),
                created_at: Set(Utc::now().into()),
            }
            .insert(orm)
            .await?;

            for (video_title, url) in videos {
                VideoActive {
                    id: NotSet,
                    title: Set(video_title.to_string()),
                    url: Set(url.to_string()),
                    thumbnail: Set(None),
                    module_id: Set(module.id),
                    created_at: Set(Utc::now().into()),
                }
                .insert(orm)
                .await?;
            }
        }
    }

    println!("Seeded catalog");
    Ok(())
}
