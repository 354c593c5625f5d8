#![allow(unused_imports)]
pub mod notification_helpers;

pub use notification_helpers::*;
