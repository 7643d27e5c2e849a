//! Retention windows: which calendar slice of history an archive cycle owns.

mod parameters;
mod strategy;
mod window;

pub use parameters::{RetentionDateParameters, retention_offset};
pub use strategy::ArchiveStrategy;
pub use window::{DateWindow, WindowGenerator};
