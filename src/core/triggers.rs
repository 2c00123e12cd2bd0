use crate::core::modulo::is_divisible;
use crate::utils::error::{LabError, Result};
use serde::{Deserialize, Serialize};

/// A label that fires on every day divisible by `divisor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRule {
    divisor: i64,
    label: String,
}

impl TriggerRule {
    pub fn new(divisor: i64, label: impl Into<String>) -> Result<Self> {
        if divisor < 1 {
            return Err(LabError::invalid_argument(
                "divisor",
                divisor,
                "must be at least 1",
            ));
        }
        Ok(Self {
            divisor,
            label: label.into(),
        })
    }

    pub fn divisor(&self) -> i64 {
        self.divisor
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn fires_on(&self, n: i64) -> bool {
        n.rem_euclid(self.divisor) == 0
    }
}

/// 依宣告順序評估所有規則，回傳觸發的標籤
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerSet {
    rules: Vec<TriggerRule>,
    fallback: Option<String>,
}

impl TriggerSet {
    pub fn new(rules: Vec<TriggerRule>) -> Self {
        Self {
            rules,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, label: impl Into<String>) -> Self {
        self.fallback = Some(label.into());
        self
    }

    fn builtin(rules: &[(i64, &str)]) -> Self {
        Self::new(
            rules
                .iter()
                .map(|(divisor, label)| TriggerRule {
                    divisor: *divisor,
                    label: label.to_string(),
                })
                .collect(),
        )
    }

    pub fn game_events() -> Self {
        Self::builtin(&[
            (7, "Weekly Boss Event"),
            (3, "Special Item Spawn"),
            (5, "Double XP Day"),
            (10, "Monthly Celebration"),
        ])
        .with_fallback("Regular Day")
    }

    /// Short tags used in the real-world simulation table.
    pub fn game_event_tags() -> Self {
        Self::builtin(&[(7, "Boss"), (3, "Item"), (5, "XP")])
    }

    pub fn rules(&self) -> &[TriggerRule] {
        &self.rules
    }

    pub fn evaluate(&self, n: i64) -> Vec<&str> {
        let fired: Vec<&str> = self
            .rules
            .iter()
            .filter(|rule| rule.fires_on(n))
            .map(|rule| rule.label.as_str())
            .collect();

        match (&self.fallback, fired.is_empty()) {
            (Some(fallback), true) => vec![fallback.as_str()],
            _ => fired,
        }
    }
}

/// 每第 `interval` 位顧客享有優惠
pub fn is_offer_eligible(customer_id: i64, interval: i64) -> Result<bool> {
    is_divisible(customer_id, interval)
}

pub fn is_backup_day(day: i64, interval: i64) -> Result<bool> {
    is_divisible(day, interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_events_priority_order() {
        let events = TriggerSet::game_events();
        assert_eq!(
            events.evaluate(30),
            vec!["Special Item Spawn", "Double XP Day", "Monthly Celebration"]
        );
        assert_eq!(events.evaluate(21), vec!["Weekly Boss Event", "Special Item Spawn"]);
        assert_eq!(events.evaluate(1), vec!["Regular Day"]);
    }

    #[test]
    fn test_tags_without_fallback() {
        let tags = TriggerSet::game_event_tags();
        assert!(tags.evaluate(1).is_empty());
        assert_eq!(tags.evaluate(15), vec!["Item", "XP"]);
        assert_eq!(tags.evaluate(14), vec!["Boss"]);
    }

    #[test]
    fn test_custom_rules() {
        let set = TriggerSet::new(vec![
            TriggerRule::new(2, "even").unwrap(),
            TriggerRule::new(4, "quad").unwrap(),
        ]);
        assert_eq!(set.evaluate(8), vec!["even", "quad"]);
        assert_eq!(set.rules().len(), 2);
        assert!(TriggerRule::new(0, "never").is_err());
    }

    #[test]
    fn test_offer_and_backup() {
        assert!(is_offer_eligible(10, 5).unwrap());
        assert!(!is_offer_eligible(11, 5).unwrap());
        assert!(is_backup_day(14, 7).unwrap());
        assert!(is_backup_day(3, 0).is_err());
    }
}
