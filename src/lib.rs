mod client;
mod errors;
mod hooks;
mod outcome;
pub mod types;
pub use self::client::{Client, Method};
pub use self::errors::ApiError;
pub use self::hooks::{ExpiryReason, LogSessionHooks, SessionHooks};
pub use self::outcome::Outcome;
