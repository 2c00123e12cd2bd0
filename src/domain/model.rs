use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 以 `key mod modulus` 選出的標籤
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub index: u64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub day: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FizzBuzzToken {
    Number(u64),
    Fizz,
    Buzz,
    FizzBuzz,
}

impl fmt::Display for FizzBuzzToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FizzBuzzToken::Number(n) => write!(f, "{}", n),
            FizzBuzzToken::Fizz => f.write_str("Fizz"),
            FizzBuzzToken::Buzz => f.write_str("Buzz"),
            FizzBuzzToken::FizzBuzz => f.write_str("FizzBuzz"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOfWeek {
    pub day: u64,
    pub weekday: Weekday,
    pub week: u64,
    pub day_in_week: u64,
    /// `(day - 1) mod 7`
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub index: u64,
    pub name: String,
    pub hours: String,
}

/// 連續且不重疊的記錄區段，記錄編號從 1 開始
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub number: u64,
    pub first_record: u64,
    pub last_record: u64,
}

impl Batch {
    pub fn records(&self) -> std::ops::RangeInclusive<u64> {
        self.first_record..=self.last_record
    }

    pub fn size(&self) -> u64 {
        self.last_record - self.first_record + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationTable {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub legend: String,
}
