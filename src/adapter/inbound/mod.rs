//! Inbound adapters (driving side).

pub mod cli;

#[cfg(feature = "telegram")]
pub mod telegram;
