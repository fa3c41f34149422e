use poem_openapi::{Enum, Object};
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::active;
use crate::slugify::slugify;

pub const SLUG_MAX_LEN: usize = 220;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, Enum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[oai(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Object)]
#[sea_orm(table_name = "posts")]
#[oai(rename = "Post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub summary: Option<String>,
    /// Rich-text HTML, stored opaque.
    #[sea_orm(column_type = "Text")]
    pub content: String,
    /// Media path of the cover image, if one was uploaded.
    pub cover_image: Option<String>,
    pub status: PostStatus,
    pub published_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_category::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_category::Relation::Post.def().rev())
    }
}

impl Model {
    /// Canonical detail URL.
    pub fn absolute_url(&self) -> String {
        format!("/post/{}/", self.slug)
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Slug derivation plus the publication transition: the first save that
    /// sees a published status with no timestamp stamps `published_at` with
    /// the current server time. The stamp is never cleared or recomputed,
    /// even when the status later reverts to draft.
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now();
        if insert {
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);

        if active(&self.slug).is_none_or(|s| s.is_empty()) {
            let title = active(&self.title).cloned().unwrap_or_default();
            self.slug = Set(slugify(&title, SLUG_MAX_LEN));
        }

        let published = active(&self.status) == Some(&PostStatus::Published);
        if published && active(&self.published_at).is_none_or(Option::is_none) {
            self.published_at = Set(Some(now));
        }
        Ok(self)
    }
}
