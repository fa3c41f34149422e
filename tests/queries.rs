mod common;

use blog_api::entities::post::PostStatus;
use blog_api::entities::{comment, post_category};
use blog_api::queries;
use chrono::{Duration, Utc};
use common::{create_category, create_post, create_user, test_db};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbBackend, Set, Statement};

async fn link(db: &DatabaseConnection, post_id: i64, category_id: i64) {
    post_category::ActiveModel {
        post_id: Set(post_id),
        category_id: Set(category_id),
    }
    .insert(db)
    .await
    .expect("link post to category");
}

#[tokio::test]
async fn published_listing_applies_both_visibility_flags() {
    let db = test_db().await;
    let now = Utc::now();

    let visible = create_post(&db, "Visible", PostStatus::Published, Some(now)).await;
    create_post(&db, "Draft", PostStatus::Draft, None).await;

    // A published status with no timestamp, written behind the save hook's
    // back, must stay invisible.
    let orphan = create_post(&db, "Orphan", PostStatus::Draft, None).await;
    db.execute(Statement::from_string(
        DbBackend::Sqlite,
        format!(
            "UPDATE posts SET status = 'published', published_at = NULL WHERE id = {}",
            orphan.id
        ),
    ))
    .await
    .expect("force inconsistent row");

    let page = queries::published_page(&db, 1).await.expect("page");
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, visible.id);
}

#[tokio::test]
async fn published_listing_orders_newest_first_and_paginates_by_ten() {
    let db = test_db().await;
    let base = Utc::now() - Duration::hours(100);

    for i in 0..13 {
        let stamp = base + Duration::hours(i);
        create_post(&db, &format!("Post {i}"), PostStatus::Published, Some(stamp)).await;
    }

    let first = queries::published_page(&db, 1).await.expect("page 1");
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.total_items, 13);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.items[0].title, "Post 12");
    assert_eq!(first.items[9].title, "Post 3");

    let second = queries::published_page(&db, 2).await.expect("page 2");
    assert_eq!(second.items.len(), 3);
    assert_eq!(second.items[2].title, "Post 0");
}

#[tokio::test]
async fn category_counts_track_visible_posts_only() {
    let db = test_db().await;
    let now = Utc::now();

    let news = create_category(&db, "News").await;
    let empty = create_category(&db, "Archive").await;

    let published = create_post(&db, "In News", PostStatus::Published, Some(now)).await;
    let draft = create_post(&db, "Draft In News", PostStatus::Draft, None).await;
    link(&db, published.id, news.id).await;
    link(&db, draft.id, news.id).await;

    // The full listing keeps zero-count categories, ordered by name.
    let all = queries::categories_with_counts(&db, false).await.expect("all");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "Archive");
    assert_eq!(all[0].posts_count, 0);
    assert_eq!(all[1].name, "News");
    assert_eq!(all[1].posts_count, 1);

    // The sidebar suppresses them.
    let sidebar = queries::categories_with_counts(&db, true).await.expect("sidebar");
    assert_eq!(sidebar.len(), 1);
    assert_eq!(sidebar[0].id, news.id);
    let _ = empty;
}

#[tokio::test]
async fn category_detail_filters_by_membership_and_visibility() {
    let db = test_db().await;
    let now = Utc::now();

    let news = create_category(&db, "News").await;
    let inside = create_post(&db, "Inside", PostStatus::Published, Some(now)).await;
    let outside = create_post(&db, "Outside", PostStatus::Published, Some(now)).await;
    let draft = create_post(&db, "Hidden", PostStatus::Draft, None).await;
    link(&db, inside.id, news.id).await;
    link(&db, draft.id, news.id).await;

    let category = queries::category_by_slug(&db, "news")
        .await
        .expect("query")
        .expect("category exists");
    let page = queries::category_posts_page(&db, &category, 1).await.expect("page");
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, inside.id);
    let _ = outside;
}

#[tokio::test]
async fn missing_category_slug_yields_none() {
    let db = test_db().await;
    let missing = queries::category_by_slug(&db, "does-not-exist")
        .await
        .expect("query");
    assert!(missing.is_none());
}

#[tokio::test]
async fn draft_posts_stay_reachable_by_slug() {
    let db = test_db().await;
    create_post(&db, "Secret Draft", PostStatus::Draft, None).await;

    let found = queries::post_by_slug(&db, "secret-draft").await.expect("query");
    assert!(found.is_some());
    assert_eq!(found.unwrap().status, PostStatus::Draft);
}

#[tokio::test]
async fn comments_are_filtered_to_approved_and_ordered_oldest_first() {
    let db = test_db().await;
    let post = create_post(&db, "Discussed", PostStatus::Published, Some(Utc::now())).await;
    let alice = create_user(&db, "alice", false).await;
    let bob = create_user(&db, "bob", false).await;

    for (user, body, approved) in [
        (&alice, "first", true),
        (&bob, "hidden", false),
        (&bob, "second", true),
    ] {
        comment::ActiveModel {
            post_id: Set(post.id),
            user_id: Set(user.id),
            body: Set(body.to_string()),
            is_approved: Set(approved),
            ..Default::default()
        }
        .insert(&db)
        .await
        .expect("insert comment");
    }

    let comments = queries::approved_comments(&db, &post).await.expect("comments");
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].body, "first");
    assert_eq!(comments[0].author, "alice");
    assert_eq!(comments[1].body, "second");
    assert_eq!(comments[1].author, "bob");
    assert!(comments[0].created_at <= comments[1].created_at);
}
