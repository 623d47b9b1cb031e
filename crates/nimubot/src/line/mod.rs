//! LINE Messaging API integration.
//!
//! Webhook event and reply message types, the [`MessagingPlatform`] seam the
//! bot replies through, its HTTP implementation, and webhook signature checks.

pub mod client;
pub mod platform;
pub mod signature;
pub mod types;

pub use client::LineClient;
pub use platform::{MessagingPlatform, PlatformError, MAX_REPLY_MESSAGES};
pub use types::*;
