//! Schedule loading for the worksheet engine.
//!
//! This module loads the income/obligation schedule from a YAML file. The
//! calculation functions never read files themselves; callers load a
//! schedule here and pass its table into every calculation.
//!
//! # Example
//!
//! ```no_run
//! use support_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/schedule.yaml").unwrap();
//! println!("Loaded schedule: {}", loader.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ScheduleConfig, ScheduleMetadata};
