use std::collections::BTreeSet;
use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::payload::Json;
use poem_openapi::{Object, OpenApi};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use validator::Validate;

use crate::AppState;
use crate::auth::{SessionAuth, require_staff};
use crate::entities::post::PostStatus;
use crate::entities::{category, comment, post, post_category};
use crate::error;
use crate::forms::{CommentInput, PostInput};
use crate::queries;
use crate::queries::{CategorySummary, CommentView, PostPage};

pub struct BlogApi {
    state: Arc<AppState>,
}

impl BlogApi {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

#[derive(Object)]
pub struct IndexResponse {
    pub posts: PostPage,
    /// Sidebar categories; zero-count ones are suppressed here.
    pub categories: Vec<CategorySummary>,
}

#[derive(Object)]
pub struct PostDetailResponse {
    pub post: post::Model,
    pub comments: Vec<CommentView>,
}

#[derive(Object)]
pub struct CategoryDetailResponse {
    pub category: category::Model,
    pub posts: PostPage,
}

#[derive(Object)]
pub struct PostCreated {
    pub message: String,
    /// Canonical detail URL of the new post.
    pub location: String,
    pub post: post::Model,
}

#[derive(Object)]
pub struct CommentCreated {
    pub message: String,
    pub location: String,
    pub comment: CommentView,
}

#[OpenApi]
impl BlogApi {
    /// Paginated index of published posts.
    #[oai(path = "/", method = "get")]
    async fn index(&self, Query(page): Query<Option<u64>>) -> poem::Result<Json<IndexResponse>> {
        let db = &self.state.db;
        let posts = queries::published_page(db, page.unwrap_or(1))
            .await
            .map_err(error::db_error)?;
        let categories = queries::categories_with_counts(db, true)
            .await
            .map_err(error::db_error)?;
        Ok(Json(IndexResponse { posts, categories }))
    }

    /// Data backing the authoring form: the category choices. Staff only.
    #[oai(path = "/post/new/", method = "get")]
    async fn new_post_form(&self, auth: SessionAuth) -> poem::Result<Json<Vec<category::Model>>> {
        require_staff(&auth.0)?;
        let categories = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.state.db)
            .await
            .map_err(error::db_error)?;
        Ok(Json(categories))
    }

    /// Creates a post. Staff only; drafts by default unless a published
    /// status is chosen explicitly.
    #[oai(path = "/post/new/", method = "post")]
    async fn create_post(
        &self,
        auth: SessionAuth,
        Json(input): Json<PostInput>,
    ) -> poem::Result<Json<PostCreated>> {
        require_staff(&auth.0)?;
        input.validate().map_err(|e| error::invalid(&e))?;

        let db = &self.state.db;
        let categories: BTreeSet<i64> = input.categories.into_iter().collect();
        let post = post::ActiveModel {
            title: Set(input.title),
            slug: Set(input.slug.unwrap_or_default()),
            summary: Set(input.summary),
            content: Set(input.content),
            cover_image: Set(input.cover_image),
            status: Set(input.status.unwrap_or(PostStatus::Draft)),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(error::db_error)?;

        for category_id in categories {
            post_category::ActiveModel {
                post_id: Set(post.id),
                category_id: Set(category_id),
            }
            .insert(db)
            .await
            .map_err(error::db_error)?;
        }

        tracing::info!(slug = %post.slug, author = %auth.0.username, "post created");
        Ok(Json(PostCreated {
            message: "Post created successfully.".to_string(),
            location: post.absolute_url(),
            post,
        }))
    }

    /// Post detail with its approved comments, oldest first.
    #[oai(path = "/post/:slug/", method = "get")]
    async fn post_detail(&self, Path(slug): Path<String>) -> poem::Result<Json<PostDetailResponse>> {
        let db = &self.state.db;
        let post = queries::post_by_slug(db, &slug)
            .await
            .map_err(error::db_error)?
            .ok_or_else(|| error::not_found("post"))?;
        let comments = queries::approved_comments(db, &post)
            .await
            .map_err(error::db_error)?;
        Ok(Json(PostDetailResponse { post, comments }))
    }

    /// Comment submission. Any authenticated identity; comments are approved
    /// by default.
    #[oai(path = "/post/:slug/", method = "post")]
    async fn create_comment(
        &self,
        auth: SessionAuth,
        Path(slug): Path<String>,
        Json(input): Json<CommentInput>,
    ) -> poem::Result<Json<CommentCreated>> {
        let db = &self.state.db;
        let post = queries::post_by_slug(db, &slug)
            .await
            .map_err(error::db_error)?
            .ok_or_else(|| error::not_found("post"))?;
        input.validate().map_err(|e| error::invalid(&e))?;

        let comment = comment::ActiveModel {
            post_id: Set(post.id),
            user_id: Set(auth.0.sub),
            body: Set(input.body),
            is_approved: Set(true),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(error::db_error)?;

        tracing::info!(slug = %post.slug, author = %auth.0.username, "comment posted");
        Ok(Json(CommentCreated {
            message: "Comment posted.".to_string(),
            location: post.absolute_url(),
            comment: CommentView {
                id: comment.id,
                body: comment.body,
                author: auth.0.username,
                created_at: comment.created_at,
            },
        }))
    }

    /// All categories with visible-post counts, zero-count ones included.
    #[oai(path = "/categories/", method = "get")]
    async fn categories(&self) -> poem::Result<Json<Vec<CategorySummary>>> {
        let categories = queries::categories_with_counts(&self.state.db, false)
            .await
            .map_err(error::db_error)?;
        Ok(Json(categories))
    }

    /// Published posts in one category, paginated like the index.
    #[oai(path = "/category/:slug/", method = "get")]
    async fn category_detail(
        &self,
        Path(slug): Path<String>,
        Query(page): Query<Option<u64>>,
    ) -> poem::Result<Json<CategoryDetailResponse>> {
        let db = &self.state.db;
        let category = queries::category_by_slug(db, &slug)
            .await
            .map_err(error::db_error)?
            .ok_or_else(|| error::not_found("category"))?;
        let posts = queries::category_posts_page(db, &category, page.unwrap_or(1))
            .await
            .map_err(error::db_error)?;
        Ok(Json(CategoryDetailResponse { category, posts }))
    }
}
