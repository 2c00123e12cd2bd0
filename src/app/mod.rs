pub mod demos;
pub mod export;
pub mod report;

pub use demos::Lab;
pub use export::{ExportSummary, Exporter};
pub use report::Report;
