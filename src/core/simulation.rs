use crate::core::grouping::{ab_group, BatchAssigner, PartitionAssigner};
use crate::core::modulo::LabelTable;
use crate::core::triggers::TriggerSet;
use crate::domain::model::SimulationTable;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum SimulationKind {
    /// 20 products with category, server and batch
    Database,
    /// 20 users with A/B group, server, cluster and content group
    Platform,
    /// 15 ids with offers, priority, game events and backups
    RealWorld,
}

impl SimulationKind {
    pub const ALL: [SimulationKind; 3] = [
        SimulationKind::Database,
        SimulationKind::Platform,
        SimulationKind::RealWorld,
    ];

    pub fn file_stem(&self) -> &'static str {
        match self {
            SimulationKind::Database => "database",
            SimulationKind::Platform => "platform",
            SimulationKind::RealWorld => "real_world",
        }
    }
}

/// Label tables used by the simulation rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationLabels {
    pub categories: LabelTable,
    pub clusters: LabelTable,
    pub priorities: LabelTable,
}

impl Default for SimulationLabels {
    fn default() -> Self {
        Self {
            categories: LabelTable::product_categories(),
            clusters: LabelTable::cluster_tags(),
            priorities: LabelTable::priority_tags(),
        }
    }
}

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

pub fn database_simulation(labels: &SimulationLabels) -> Result<SimulationTable> {
    let servers = PartitionAssigner::new(3)?;
    let batches = BatchAssigner::new(5)?;

    let mut rows = Vec::with_capacity(20);
    for product_id in 1..=20 {
        rows.push(vec![
            product_id.to_string(),
            labels.categories.classify(product_id).label,
            format!("Server {}", servers.assign(product_id)),
            format!("Batch {}", batches.assign(product_id)?),
        ]);
    }

    Ok(SimulationTable {
        title: "Database Simulation: 20 Products".to_string(),
        columns: columns(&["Product ID", "Category", "Server", "Batch"]),
        rows,
        legend: format!(
            "Categories: productId % {} | Servers: productId % 3 | Batches: groups of 5",
            labels.categories.len()
        ),
    })
}

pub fn platform_simulation(labels: &SimulationLabels) -> Result<SimulationTable> {
    let servers = PartitionAssigner::new(5)?;
    let content_groups = PartitionAssigner::new(5)?;

    let mut rows = Vec::with_capacity(20);
    for user_id in 1..=20 {
        rows.push(vec![
            user_id.to_string(),
            format!("Group {}", ab_group(user_id)),
            format!("Server {}", servers.assign(user_id)),
            labels.clusters.classify(user_id).label,
            format!("Content Group {}", content_groups.assign(user_id)),
        ]);
    }

    Ok(SimulationTable {
        title: "Streaming Platform Simulation: 20 Users".to_string(),
        columns: columns(&["User ID", "A/B Group", "Server", "Cluster", "Similar Content"]),
        rows,
        legend: format!(
            "A/B: userId % 2 | Server: userId % 5 | Cluster: userId % {} | Content: userId % 5",
            labels.clusters.len()
        ),
    })
}

pub fn real_world_simulation(labels: &SimulationLabels) -> Result<SimulationTable> {
    let events = TriggerSet::game_event_tags();

    let mut rows = Vec::with_capacity(15);
    for id in 1..=15 {
        let fired = events.evaluate(id);
        let game_events = if fired.is_empty() {
            "None".to_string()
        } else {
            fired.join(", ")
        };
        rows.push(vec![
            id.to_string(),
            yes_no(id % 5 == 0),
            labels.priorities.classify(id).label,
            game_events,
            yes_no(id % 3 == 0),
        ]);
    }

    Ok(SimulationTable {
        title: "Real-World System Simulation: 15 Items".to_string(),
        columns: columns(&[
            "ID",
            "E-commerce Offer",
            "Social Priority",
            "Game Event",
            "System Backup",
        ]),
        rows,
        legend: format!(
            "Offers: id % 5 == 0 | Priority: id % {} | Events: id % 7, 3, 5 | Backup: id % 3 == 0",
            labels.priorities.len()
        ),
    })
}

pub fn simulate(kind: SimulationKind, labels: &SimulationLabels) -> Result<SimulationTable> {
    match kind {
        SimulationKind::Database => database_simulation(labels),
        SimulationKind::Platform => platform_simulation(labels),
        SimulationKind::RealWorld => real_world_simulation(labels),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_rows() {
        let table = database_simulation(&SimulationLabels::default()).unwrap();
        assert_eq!(table.rows.len(), 20);
        assert_eq!(table.columns.len(), 4);
        assert_eq!(table.rows[0], vec!["1", "Clothing", "Server 1", "Batch 1"]);
        assert_eq!(table.rows[5], vec!["6", "Electronics", "Server 0", "Batch 2"]);
        assert_eq!(table.rows[19][3], "Batch 4");
    }

    #[test]
    fn test_platform_rows() {
        let table = platform_simulation(&SimulationLabels::default()).unwrap();
        assert_eq!(table.rows.len(), 20);
        assert_eq!(
            table.rows[3],
            vec!["4", "Group A", "Server 4", "Casual", "Content Group 4"]
        );
        assert_eq!(table.rows[4][1], "Group B");
    }

    #[test]
    fn test_platform_uses_custom_clusters() {
        let labels = SimulationLabels {
            clusters: LabelTable::new(["Casual", "Binge"]).unwrap(),
            ..SimulationLabels::default()
        };
        let table = platform_simulation(&labels).unwrap();
        assert_eq!(table.rows[0][3], "Binge");
        assert_eq!(table.rows[1][3], "Casual");
        assert!(table.legend.contains("Cluster: userId % 2"));
    }

    #[test]
    fn test_real_world_rows() {
        let table = real_world_simulation(&SimulationLabels::default()).unwrap();
        assert_eq!(table.rows.len(), 15);
        assert_eq!(table.rows[0], vec!["1", "No", "Medium", "None", "No"]);
        assert_eq!(table.rows[14], vec!["15", "Yes", "High", "Item, XP", "Yes"]);
        assert_eq!(table.rows[13][3], "Boss");
    }

    #[test]
    fn test_simulate_dispatch_is_deterministic() {
        let labels = SimulationLabels::default();
        for kind in SimulationKind::ALL {
            assert_eq!(simulate(kind, &labels).unwrap(), simulate(kind, &labels).unwrap());
        }
    }
}
