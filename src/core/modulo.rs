use crate::domain::model::ClassificationResult;
use crate::utils::error::{LabError, Result};

fn require_at_least_one(field_name: &str, value: i64) -> Result<i64> {
    if value < 1 {
        return Err(LabError::invalid_argument(
            field_name,
            value,
            "must be at least 1",
        ));
    }
    Ok(value)
}

/// `key mod modulus`，使用歐幾里得餘數，結果必在 `0..modulus`
pub fn classify_by_modulo(key: i64, modulus: i64) -> Result<u64> {
    let modulus = require_at_least_one("modulus", modulus)?;
    Ok(key.rem_euclid(modulus) as u64)
}

pub fn is_divisible(n: i64, d: i64) -> Result<bool> {
    let d = require_at_least_one("divisor", d)?;
    Ok(n.rem_euclid(d) == 0)
}

/// 連續區段分批：`floor((record_index - 1) / batch_size) + 1`
pub fn batch_of(record_index: i64, batch_size: i64) -> Result<u64> {
    let record_index = require_at_least_one("record_index", record_index)?;
    let batch_size = require_at_least_one("batch_size", batch_size)?;
    Ok(((record_index - 1) / batch_size + 1) as u64)
}

/// 雜湊式分散：`key mod partition_count`，從 0 開始
pub fn partition_of(key: i64, partition_count: i64) -> Result<u64> {
    let partition_count = require_at_least_one("partition_count", partition_count)?;
    Ok(key.rem_euclid(partition_count) as u64)
}

pub fn category_of(key: i64, category_count: i64) -> Result<u64> {
    let category_count = require_at_least_one("category_count", category_count)?;
    Ok(key.rem_euclid(category_count) as u64)
}

/// A fixed table of labels indexed by `key mod len`.
///
/// The table is never empty, so classification cannot fail once a table
/// exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    labels: Vec<String>,
    modulus: i64,
}

impl LabelTable {
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(LabError::invalid_argument(
                "labels",
                "[]",
                "label table needs at least one entry",
            ));
        }
        let modulus = i64::try_from(labels.len()).map_err(|_| {
            LabError::invalid_argument("labels", labels.len(), "label table is too large")
        })?;
        Ok(Self { labels, modulus })
    }

    fn builtin(labels: &[&str]) -> Self {
        Self {
            labels: labels.iter().map(|s| s.to_string()).collect(),
            modulus: labels.len() as i64,
        }
    }

    pub fn product_categories() -> Self {
        Self::builtin(&["Electronics", "Clothing", "Home & Garden"])
    }

    pub fn notification_priorities() -> Self {
        Self::builtin(&["High Priority", "Medium Priority", "Low Priority"])
    }

    pub fn priority_tags() -> Self {
        Self::builtin(&["High", "Medium", "Low"])
    }

    pub fn user_clusters() -> Self {
        Self::builtin(&[
            "Casual Viewers",
            "Regular Users",
            "Power Users",
            "Binge Watchers",
        ])
    }

    pub fn cluster_tags() -> Self {
        Self::builtin(&["Casual", "Regular", "Power", "Binge"])
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn index_of(&self, key: i64) -> u64 {
        key.rem_euclid(self.modulus) as u64
    }

    pub fn classify(&self, key: i64) -> ClassificationResult {
        let index = self.index_of(key);
        ClassificationResult {
            index,
            label: self.labels[index as usize].clone(),
        }
    }
}
