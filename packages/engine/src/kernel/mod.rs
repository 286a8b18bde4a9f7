//! Kernel module - engine infrastructure and dependencies.

pub mod db;
pub mod deps;
pub mod stream_hub;

pub use db::{begin_serializable, is_retryable, is_unique_violation, MAX_TX_ATTEMPTS};
pub use deps::EngineDeps;
pub use stream_hub::StreamHub;
