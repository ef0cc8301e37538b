pub mod fallback;
pub mod health;
mod router;
pub mod types;

pub use router::{create_router, HEALTH_PATH};
