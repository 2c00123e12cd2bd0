use crate::core::modulo::{batch_of, classify_by_modulo};
use crate::domain::model::{DayOfWeek, ScheduleEntry, Shift};
use crate::utils::error::{LabError, Result};
use crate::utils::validation::validate_range;
use chrono::Weekday;

pub const DAYS_PER_WEEK: i64 = 7;
pub const DEFAULT_MAX_DAY: i64 = 365;
pub const DEFAULT_HORIZON: i64 = 30;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// 將一年中的第幾天轉換成星期幾
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayOfWeekClassifier {
    first_weekday: Weekday,
    max_day: i64,
}

impl Default for DayOfWeekClassifier {
    fn default() -> Self {
        Self {
            first_weekday: Weekday::Mon,
            max_day: DEFAULT_MAX_DAY,
        }
    }
}

impl DayOfWeekClassifier {
    pub fn new(first_weekday: Weekday, max_day: i64) -> Result<Self> {
        if max_day < 1 {
            return Err(LabError::invalid_argument(
                "max_day",
                max_day,
                "must be at least 1",
            ));
        }
        Ok(Self {
            first_weekday,
            max_day,
        })
    }

    pub fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    pub fn classify(&self, day: i64) -> Result<DayOfWeek> {
        validate_range("day", day, 1, self.max_day)?;

        let offset = classify_by_modulo(day - 1, DAYS_PER_WEEK)?;
        let week = batch_of(day, DAYS_PER_WEEK)?;
        let start = self.first_weekday.num_days_from_monday() as u64;
        let weekday = WEEK[((start + offset) % DAYS_PER_WEEK as u64) as usize];

        Ok(DayOfWeek {
            day: day as u64,
            weekday,
            week,
            day_in_week: offset + 1,
            offset,
        })
    }
}

/// 每隔 `interval` 天發生一次的事件，範圍為 `1..=horizon`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurrenceSchedule {
    interval: u64,
    horizon: u64,
}

impl RecurrenceSchedule {
    pub fn new(interval: i64, horizon: i64) -> Result<Self> {
        if horizon < 1 {
            return Err(LabError::invalid_argument(
                "horizon",
                horizon,
                "must be at least 1",
            ));
        }
        validate_range("interval", interval, 1, horizon)?;
        Ok(Self {
            interval: interval as u64,
            horizon: horizon as u64,
        })
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn horizon(&self) -> u64 {
        self.horizon
    }

    pub fn iter(&self) -> impl Iterator<Item = ScheduleEntry> {
        (self.interval..=self.horizon)
            .step_by(self.interval as usize)
            .map(|day| ScheduleEntry { day })
    }

    pub fn days(&self) -> Vec<ScheduleEntry> {
        self.iter().collect()
    }

    pub fn len(&self) -> usize {
        (self.horizon / self.interval) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

const SHIFTS: [(&str, &str); 4] = [
    ("Morning Shift", "4am-7am, 8am-11am"),
    ("Afternoon Shift", "12pm-3pm, 4pm-7pm"),
    ("Evening Shift", "8pm-11pm, 12am-3am"),
    ("Night Shift", "12am-3am, 4am-7am"),
];

/// `hour mod 4` 對應到四個班別
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HourShiftClassifier;

impl HourShiftClassifier {
    pub fn shifts(&self) -> Vec<Shift> {
        SHIFTS
            .iter()
            .enumerate()
            .map(|(index, (name, hours))| Shift {
                index: index as u64,
                name: name.to_string(),
                hours: hours.to_string(),
            })
            .collect()
    }

    pub fn classify(&self, hour: i64) -> Result<Shift> {
        validate_range("hour", hour, 0, 23)?;
        let index = classify_by_modulo(hour, SHIFTS.len() as i64)?;
        let (name, hours) = SHIFTS[index as usize];
        Ok(Shift {
            index,
            name: name.to_string(),
            hours: hours.to_string(),
        })
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// 解析設定檔中的星期名稱，例如 "Monday" 或 "mon"
pub fn parse_weekday(field_name: &str, value: &str) -> Result<Weekday> {
    value.trim().parse::<Weekday>().map_err(|_| LabError::ConfigValidationError {
        field: field_name.to_string(),
        message: format!("'{}' is not a weekday name", value),
    })
}
