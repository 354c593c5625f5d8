pub mod error;

pub use error::{ApiError, ApiResult};

use std::sync::Arc;

use crate::config::Config;
use crate::domain::services::NotificationAggregator;

/// Immutable state shared by every request
#[derive(Clone)]
pub struct AppState {
    pub aggregator: NotificationAggregator,
    pub max_batch_size: usize,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            aggregator: NotificationAggregator::with_policy(config.single_actor_policy),
            max_batch_size: config.max_batch_size,
            config: Arc::new(config),
        }
    }
}
