pub mod calendar;
pub mod fizzbuzz;
pub mod grouping;
pub mod modulo;
pub mod simulation;
pub mod triggers;

pub use crate::domain::model::{
    Batch, ClassificationResult, DayOfWeek, FizzBuzzToken, ScheduleEntry, Shift, SimulationTable,
};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
