//! HTTP route handlers.

pub mod convert;
pub mod emojis;
pub mod health;
