use std::sync::Arc;

use poem_openapi::payload::Json;
use poem_openapi::{Object, OpenApi};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use validator::Validate;

use crate::AppState;
use crate::auth;
use crate::entities::user;
use crate::error;
use crate::forms::{SignupInput, TokenInput};

pub struct AccountsApi {
    state: Arc<AppState>,
}

impl AccountsApi {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

#[derive(Object)]
pub struct Profile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
}

impl From<user::Model> for Profile {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_staff: user.is_staff,
        }
    }
}

#[derive(Object)]
pub struct SessionResponse {
    pub message: String,
    /// Where the client should land next.
    pub location: String,
    /// Bearer token for the established session.
    pub token: String,
    pub user: Profile,
}

#[OpenApi]
impl AccountsApi {
    /// Account signup. Creates the identity and establishes its session in
    /// one step.
    #[oai(path = "/accounts/signup/", method = "post")]
    async fn signup(&self, Json(input): Json<SignupInput>) -> poem::Result<Json<SessionResponse>> {
        input.validate().map_err(|e| error::invalid(&e))?;
        let db = &self.state.db;

        let taken = user::Entity::find()
            .filter(user::Column::Username.eq(input.username.as_str()))
            .one(db)
            .await
            .map_err(error::db_error)?
            .is_some();
        if taken {
            return Err(error::invalid_field(
                "username",
                "a user with that username already exists",
            ));
        }

        let password_hash = auth::hash_password(&input.password).map_err(error::internal)?;
        let user = user::ActiveModel {
            username: Set(input.username),
            email: Set(input.email),
            password_hash: Set(password_hash),
            is_staff: Set(false),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(error::db_error)?;

        let token = auth::issue_token(&self.state.config, &user).map_err(error::internal)?;
        tracing::info!(username = %user.username, "account created");
        Ok(Json(SessionResponse {
            message: "Welcome! Your account has been created.".to_string(),
            location: "/".to_string(),
            token,
            user: user.into(),
        }))
    }

    /// Token issuance for an existing identity.
    #[oai(path = "/accounts/token/", method = "post")]
    async fn token(&self, Json(input): Json<TokenInput>) -> poem::Result<Json<SessionResponse>> {
        input.validate().map_err(|e| error::invalid(&e))?;
        let user = user::Entity::find()
            .filter(user::Column::Username.eq(input.username.as_str()))
            .one(&self.state.db)
            .await
            .map_err(error::db_error)?;
        let user = match user {
            Some(u) if auth::verify_password(&input.password, &u.password_hash) => u,
            _ => {
                return Err(poem::Error::from_string(
                    "invalid credentials",
                    poem::http::StatusCode::UNAUTHORIZED,
                ));
            }
        };
        let token = auth::issue_token(&self.state.config, &user).map_err(error::internal)?;
        Ok(Json(SessionResponse {
            message: "Signed in.".to_string(),
            location: "/".to_string(),
            token,
            user: user.into(),
        }))
    }
}
