pub mod grouped_notification;
pub mod notification;

pub use grouped_notification::*;
pub use notification::*;
