#![allow(dead_code)]

use std::sync::Arc;

use blog_api::config::AppConfig;
use blog_api::entities::post::PostStatus;
use blog_api::entities::{category, post, user};
use blog_api::migration::Migrator;
use blog_api::{AppState, auth};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;

pub async fn test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("connect in-memory sqlite");
    Migrator::up(&db, None).await.expect("apply migrations");
    db
}

pub fn test_config() -> AppConfig {
    AppConfig {
        secret_key: "test-secret".to_string(),
        debug: false,
        allowed_hosts: vec![],
        database_url: "sqlite::memory:".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        language_code: "en".to_string(),
        time_zone: "UTC".to_string(),
        media_root: std::env::temp_dir().join("blog-api-test-media"),
        static_root: std::env::temp_dir().join("blog-api-test-static"),
        token_ttl_secs: 3600,
    }
}

pub async fn test_state() -> AppState {
    AppState {
        db: test_db().await,
        config: Arc::new(test_config()),
    }
}

pub async fn create_user(db: &DatabaseConnection, username: &str, is_staff: bool) -> user::Model {
    user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(format!("{username}@example.com")),
        password_hash: Set(auth::hash_password("s3cret-pass").expect("hash")),
        is_staff: Set(is_staff),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert user")
}

pub async fn create_category(db: &DatabaseConnection, name: &str) -> category::Model {
    category::ActiveModel {
        name: Set(name.to_string()),
        slug: Set(String::new()),
        description: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert category")
}

pub async fn create_post(
    db: &DatabaseConnection,
    title: &str,
    status: PostStatus,
    published_at: Option<DateTime<Utc>>,
) -> post::Model {
    post::ActiveModel {
        title: Set(title.to_string()),
        slug: Set(String::new()),
        summary: Set(None),
        content: Set(format!("<p>{title}</p>")),
        cover_image: Set(None),
        status: Set(status),
        published_at: match published_at {
            Some(t) => Set(Some(t)),
            None => sea_orm::ActiveValue::NotSet,
        },
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert post")
}
