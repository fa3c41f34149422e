//! Read-side assembly: paginated listings, category counts, detail lookups.

use std::collections::HashMap;

use poem_openapi::Object;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, JoinType, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use serde::Serialize;

use crate::entities::post::PostStatus;
use crate::entities::{category, comment, post, post_category, user};

pub const PAGE_SIZE: u64 = 10;

/// The published-visibility predicate. Both flags are checked independently:
/// a row can carry a published status with no timestamp when it was written
/// without going through the save hook.
pub fn visible() -> Condition {
    Condition::all()
        .add(post::Column::Status.eq(PostStatus::Published))
        .add(post::Column::PublishedAt.is_not_null())
}

#[derive(Debug, Object, Serialize)]
pub struct PostPage {
    pub items: Vec<post::Model>,
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

pub async fn published_page(db: &DatabaseConnection, page: u64) -> Result<PostPage, DbErr> {
    let page = page.max(1);
    let paginator = post::Entity::find()
        .filter(visible())
        .order_by_desc(post::Column::PublishedAt)
        .paginate(db, PAGE_SIZE);
    let totals = paginator.num_items_and_pages().await?;
    let items = paginator.fetch_page(page - 1).await?;
    Ok(PostPage {
        items,
        page,
        page_size: PAGE_SIZE,
        total_items: totals.number_of_items,
        total_pages: totals.number_of_pages,
    })
}

#[derive(Debug, Object, Serialize)]
pub struct CategorySummary {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub posts_count: i64,
}

/// Categories ordered by name with their visible-post counts. The index
/// sidebar passes `only_non_empty` to suppress zero-count categories; the
/// standalone listing shows them all.
pub async fn categories_with_counts(
    db: &DatabaseConnection,
    only_non_empty: bool,
) -> Result<Vec<CategorySummary>, DbErr> {
    let counts: Vec<(i64, i64)> = post_category::Entity::find()
        .select_only()
        .column(post_category::Column::CategoryId)
        .column_as(post::Column::Id.count(), "posts_count")
        .join(JoinType::InnerJoin, post_category::Relation::Post.def())
        .filter(visible())
        .group_by(post_category::Column::CategoryId)
        .into_tuple()
        .all(db)
        .await?;
    let counts: HashMap<i64, i64> = counts.into_iter().collect();

    let categories = category::Entity::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await?;

    Ok(categories
        .into_iter()
        .filter_map(|c| {
            let posts_count = counts.get(&c.id).copied().unwrap_or(0);
            if only_non_empty && posts_count == 0 {
                return None;
            }
            Some(CategorySummary {
                id: c.id,
                name: c.name,
                slug: c.slug,
                description: c.description,
                posts_count,
            })
        })
        .collect())
}

pub async fn category_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<category::Model>, DbErr> {
    category::Entity::find()
        .filter(category::Column::Slug.eq(slug))
        .one(db)
        .await
}

pub async fn category_posts_page(
    db: &DatabaseConnection,
    category: &category::Model,
    page: u64,
) -> Result<PostPage, DbErr> {
    let page = page.max(1);
    let paginator = category
        .find_related(post::Entity)
        .filter(visible())
        .order_by_desc(post::Column::PublishedAt)
        .paginate(db, PAGE_SIZE);
    let totals = paginator.num_items_and_pages().await?;
    let items = paginator.fetch_page(page - 1).await?;
    Ok(PostPage {
        items,
        page,
        page_size: PAGE_SIZE,
        total_items: totals.number_of_items,
        total_pages: totals.number_of_pages,
    })
}

/// Slug lookup applies no status filter, so drafts stay reachable by exact
/// slug. Long-standing site behavior, kept as-is.
pub async fn post_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<post::Model>, DbErr> {
    post::Entity::find()
        .filter(post::Column::Slug.eq(slug))
        .one(db)
        .await
}

#[derive(Debug, Object, Serialize)]
pub struct CommentView {
    pub id: i64,
    pub body: String,
    pub author: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Approved comments on a post, oldest first, with the author resolved.
pub async fn approved_comments(
    db: &DatabaseConnection,
    post: &post::Model,
) -> Result<Vec<CommentView>, DbErr> {
    let rows = post
        .find_related(comment::Entity)
        .filter(comment::Column::IsApproved.eq(true))
        .order_by_asc(comment::Column::CreatedAt)
        .find_also_related(user::Entity)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(c, author)| CommentView {
            id: c.id,
            body: c.body,
            author: author.map(|u| u.username).unwrap_or_default(),
            created_at: c.created_at,
        })
        .collect())
}
