pub mod aggregator;
pub mod message_templates;

pub use aggregator::*;
pub use message_templates::synthesize_message;
