pub mod cache;
pub mod compare;
pub mod error;
pub mod models;
pub mod oauth;
pub mod release;
pub mod stats;
pub mod team;

pub use cache::{CacheEntry, ResponseCache};
pub use error::{PulseError, Result};
pub use models::*;
