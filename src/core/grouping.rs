use crate::core::modulo::{batch_of, partition_of, LabelTable};
use crate::domain::model::{Batch, ClassificationResult};
use crate::utils::error::{LabError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SIMILARITY_GROUPS: i64 = 5;
pub const CATALOG_SIZE: i64 = 20;
pub const SIMILAR_LIMIT: usize = 5;
pub const CLUSTER_POPULATION: i64 = 20;

/// 固定大小的連續分批
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchAssigner {
    batch_size: i64,
}

impl BatchAssigner {
    pub fn new(batch_size: i64) -> Result<Self> {
        if batch_size < 1 {
            return Err(LabError::invalid_argument(
                "batch_size",
                batch_size,
                "must be at least 1",
            ));
        }
        Ok(Self { batch_size })
    }

    pub fn batch_size(&self) -> i64 {
        self.batch_size
    }

    pub fn assign(&self, record_index: i64) -> Result<u64> {
        batch_of(record_index, self.batch_size)
    }

    /// Splits records `1..=total_records` into batches, lazily.
    pub fn plan(&self, total_records: i64) -> Result<BatchPlan> {
        if total_records < 1 {
            return Err(LabError::invalid_argument(
                "total_records",
                total_records,
                "must be at least 1",
            ));
        }
        Ok(BatchPlan {
            total_records: total_records as u64,
            batch_size: self.batch_size as u64,
            next_first: 1,
        })
    }
}

#[derive(Debug, Clone)]
pub struct BatchPlan {
    total_records: u64,
    batch_size: u64,
    next_first: u64,
}

impl BatchPlan {
    pub fn batch_count(&self) -> u64 {
        self.total_records.div_ceil(self.batch_size)
    }
}

impl Iterator for BatchPlan {
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        if self.next_first > self.total_records {
            return None;
        }
        let first_record = self.next_first;
        let last_record = first_record
            .saturating_add(self.batch_size - 1)
            .min(self.total_records);
        self.next_first = last_record + 1;
        Some(Batch {
            number: (first_record - 1) / self.batch_size + 1,
            first_record,
            last_record,
        })
    }
}

/// `key mod partition_count` 的伺服器分片
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionAssigner {
    partition_count: i64,
}

impl PartitionAssigner {
    pub fn new(partition_count: i64) -> Result<Self> {
        if partition_count < 1 {
            return Err(LabError::invalid_argument(
                "partition_count",
                partition_count,
                "must be at least 1",
            ));
        }
        Ok(Self { partition_count })
    }

    pub fn partition_count(&self) -> i64 {
        self.partition_count
    }

    pub fn assign(&self, key: i64) -> u64 {
        key.rem_euclid(self.partition_count) as u64
    }
}

/// Classifies a key against a caller supplied label table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryClassifier {
    table: LabelTable,
}

impl CategoryClassifier {
    pub fn new(table: LabelTable) -> Self {
        Self { table }
    }

    pub fn category_count(&self) -> usize {
        self.table.len()
    }

    pub fn table(&self) -> &LabelTable {
        &self.table
    }

    pub fn classify(&self, key: i64) -> ClassificationResult {
        self.table.classify(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbGroup {
    A,
    B,
}

impl fmt::Display for AbGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbGroup::A => f.write_str("A"),
            AbGroup::B => f.write_str("B"),
        }
    }
}

/// 偶數 ID 為 A 組，奇數 ID 為 B 組
pub fn ab_group(user_id: i64) -> AbGroup {
    if user_id.rem_euclid(2) == 0 {
        AbGroup::A
    } else {
        AbGroup::B
    }
}

/// IDs in `1..=catalog_size` that share `id mod 5` with `content_id`.
pub fn similar_content(content_id: i64, catalog_size: i64, limit: usize) -> Result<Vec<u64>> {
    let group = partition_of(content_id, SIMILARITY_GROUPS)?;
    Ok((1..=catalog_size.max(0))
        .filter(|&id| id != content_id && id.rem_euclid(SIMILARITY_GROUPS) as u64 == group)
        .take(limit)
        .map(|id| id as u64)
        .collect())
}

/// 同一個 `user_id mod cluster_count` 群組的所有成員
pub fn cluster_members(user_id: i64, cluster_count: i64, population: i64) -> Result<Vec<u64>> {
    let cluster = partition_of(user_id, cluster_count)?;
    Ok((1..=population.max(0))
        .filter(|&id| id.rem_euclid(cluster_count) as u64 == cluster)
        .map(|id| id as u64)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_plan_groups_records() {
        let batches: Vec<Batch> = BatchAssigner::new(4).unwrap().plan(10).unwrap().collect();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].records().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(batches[2].number, 3);
        assert_eq!(batches[2].first_record, 9);
        assert_eq!(batches[2].last_record, 10);
        assert_eq!(batches[2].size(), 2);
    }

    #[test]
    fn test_batch_plan_agrees_with_batch_of() {
        let assigner = BatchAssigner::new(3).unwrap();
        for batch in assigner.plan(17).unwrap() {
            for record in batch.records() {
                assert_eq!(assigner.assign(record as i64).unwrap(), batch.number);
            }
        }
        assert_eq!(assigner.plan(17).unwrap().batch_count(), 6);
    }

    #[test]
    fn test_batch_plan_single_batch_when_size_exceeds_total() {
        let batches: Vec<Batch> = BatchAssigner::new(50).unwrap().plan(7).unwrap().collect();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].last_record, 7);
    }

    #[test]
    fn test_batch_assigner_rejects_bad_input() {
        assert!(BatchAssigner::new(0).is_err());
        assert!(BatchAssigner::new(5).unwrap().plan(0).is_err());
    }

    #[test]
    fn test_partition_assigner() {
        let assigner = PartitionAssigner::new(4).unwrap();
        assert_eq!(assigner.assign(10), 2);
        assert_eq!(assigner.assign(-1), 3);
        assert!(PartitionAssigner::new(0).is_err());
    }

    #[test]
    fn test_category_classifier() {
        let classifier = CategoryClassifier::new(LabelTable::product_categories());
        assert_eq!(classifier.category_count(), 3);
        assert_eq!(classifier.classify(1).label, "Clothing");
        assert_eq!(classifier.classify(9).label, "Electronics");
    }

    #[test]
    fn test_ab_group() {
        assert_eq!(ab_group(2), AbGroup::A);
        assert_eq!(ab_group(7), AbGroup::B);
        assert_eq!(ab_group(-3), AbGroup::B);
        assert_eq!(ab_group(0).to_string(), "A");
    }

    #[test]
    fn test_similar_content() {
        let similar = similar_content(3, CATALOG_SIZE, SIMILAR_LIMIT).unwrap();
        assert_eq!(similar, vec![8, 13, 18]);

        let similar = similar_content(25, CATALOG_SIZE, SIMILAR_LIMIT).unwrap();
        assert_eq!(similar, vec![5, 10, 15, 20]);

        let limited = similar_content(1, 100, 2).unwrap();
        assert_eq!(limited, vec![6, 11]);
    }

    #[test]
    fn test_cluster_members() {
        let members = cluster_members(6, 4, CLUSTER_POPULATION).unwrap();
        assert_eq!(members, vec![2, 6, 10, 14, 18]);
        assert!(cluster_members(6, 0, CLUSTER_POPULATION).is_err());
    }
}
