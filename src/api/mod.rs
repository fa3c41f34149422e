mod accounts;
mod blog;
mod media;

pub use accounts::AccountsApi;
pub use blog::BlogApi;
pub use media::MediaApi;
