//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of the application.
//!
//! # Tasks
//! - TTL Cleanup: purges expired in-memory entries at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
