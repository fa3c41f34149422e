pub mod category;
pub mod comment;
pub mod post;
pub mod post_category;
pub mod user;

use sea_orm::{ActiveValue, Value};

/// Value carried by an `ActiveValue`, whether pending or already persisted.
pub(crate) fn active<V>(value: &ActiveValue<V>) -> Option<&V>
where
    V: Into<Value>,
{
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(v),
        ActiveValue::NotSet => None,
    }
}
