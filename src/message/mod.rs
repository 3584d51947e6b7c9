//! Push message model and structural validation.
//!
//! This module provides:
//! - The request payload ([`Message`], [`Notification`], [`AndroidConfig`])
//! - Validation against the service limits ([`Message::validate`], [`validate`])
//! - Validation failures ([`MessageError`])
//!
//! Messages serialize sparsely: empty and unset fields are left out of the
//! JSON body entirely.

mod error;
mod model;


pub use error::MessageError;
pub use model::{
    AndroidConfig, MAX_CONDITION_OPERATORS, MAX_TIME_TO_LIVE_SECS, MAX_TOKENS, Message,
    Notification, validate,
};
