pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command, OutputFormat};

pub use adapters::storage::LocalStorage;
pub use app::{Exporter, Lab, Report};
pub use config::LabConfig;
pub use core::fizzbuzz::{fizzbuzz, FizzBuzz, FIZZBUZZ_MAX};
pub use core::modulo::{
    batch_of, category_of, classify_by_modulo, is_divisible, partition_of, LabelTable,
};
pub use domain::model::{ClassificationResult, FizzBuzzToken, ScheduleEntry};
pub use utils::error::{LabError, Result};
