pub mod category;
pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod search;
pub mod section;
pub mod state;
pub mod store;
pub mod topic;
pub mod tracing;
pub mod v1;
pub mod validation;

pub use config::{ApiConfig, Environment};
pub use state::ApiState;
