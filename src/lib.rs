//! Notification aggregation: folds a page of activity notifications into
//! "X and others liked your post" style groups.

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::*;
pub use domain::entities::*;
pub use domain::errors::*;
pub use domain::services::{group, NotificationAggregator, SingleActorPolicy};
