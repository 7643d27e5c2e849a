#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod config;
pub mod daemon;
pub mod dates;
pub mod engine;
pub mod error;
pub mod plugins;
pub mod retention;
pub mod selector;
pub mod template;

pub use config::Config;
pub use error::{ArchivistError, Result};
