//! Background Tasks
//!
//! Periodic maintenance running alongside the request path.

mod cleanup;

pub use cleanup::spawn_sweep_task;
