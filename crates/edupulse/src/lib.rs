//! Dropout-risk scoring and notification center behind the education dashboard.
//!
//! The scoring core (`risk`) is pure: metrics in, assessment out. Mutable state lives
//! in a per-role [`session::Session`], which owns that role's notification store and,
//! for teachers, the class roster.

pub mod config;
pub mod display;
pub mod error;
pub mod notifications;
pub mod profile;
pub mod risk;
pub mod roster;
pub mod session;
pub mod telemetry;
