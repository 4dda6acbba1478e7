//! Platform abstraction layer
//!
//! Browser scheduling wrapped as explicit tasks:
//! - `IntervalTask`: repeating timer that can be cancelled
//! - `request_frame`: one-shot animation frame

pub mod timer;

pub use timer::{IntervalTask, request_frame};
