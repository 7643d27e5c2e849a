//! Archive pass orchestration: window scanning, the per-entry driver, cleanup
//! of archived files, dry-run planning and the outer loop over entries.

pub mod cleanup;
pub mod cycle;
pub mod plan;
pub mod runner;
pub mod scan;

pub use cycle::{ArchiveCycle, CycleReport};
pub use plan::{PlannedWindow, plan};
pub use runner::{EntryOutcome, run_all, run_entry};
pub use scan::{ScannedWindow, WindowScan};
