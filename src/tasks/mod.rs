//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache sweep: drops expired entries from every route cache at the
//!   configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
