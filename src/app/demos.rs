use crate::app::report::{table_to_text, Report};
use crate::config::LabConfig;
use crate::core::calendar::{weekday_name, HourShiftClassifier, RecurrenceSchedule};
use crate::core::fizzbuzz::FizzBuzz;
use crate::core::grouping::{
    ab_group, cluster_members, similar_content, AbGroup, BatchAssigner, CategoryClassifier,
    PartitionAssigner, CATALOG_SIZE, CLUSTER_POPULATION, SIMILAR_LIMIT, SIMILARITY_GROUPS,
};
use crate::core::modulo::LabelTable;
use crate::core::simulation::{simulate, SimulationKind};
use crate::core::triggers::{is_backup_day, is_offer_eligible, TriggerSet};
use crate::domain::model::Batch;
use crate::utils::error::Result;
use crate::utils::validation::{parse_integer, validate_positive_number, validate_range};
use chrono::{Datelike, NaiveDate};
use serde_json::json;

/// 各個示範的入口：讀取文字輸入、驗證範圍、計算、產生報告
///
/// Every method is independent; nothing is kept between calls.
#[derive(Debug, Clone, Default)]
pub struct Lab {
    config: LabConfig,
}

impl Lab {
    pub fn new(config: LabConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    fn parse_id(field_name: &str, input: &str) -> Result<i64> {
        let id = parse_integer(field_name, input)?;
        validate_positive_number(field_name, id, 1)?;
        Ok(id)
    }

    /// 一年中的第幾天，閏年的第 366 天以 `limits.max_day` 為上限
    fn day_of_year(&self, date: NaiveDate) -> i64 {
        (date.ordinal() as i64).min(self.config.limits.max_day)
    }

    pub fn day(&self, input: Option<&str>) -> Result<Report> {
        let day = match input {
            Some(input) => parse_integer("day", input)?,
            None => {
                let today = self.day_of_year(chrono::Local::now().date_naive());
                tracing::debug!("No day given, using today's day of year {}", today);
                today
            }
        };

        let result = self.config.day_classifier()?.classify(day)?;
        tracing::debug!(day, weekday = %result.weekday, "Classified day of week");

        Ok(Report::new(format!("Day {} falls on:", day), json!(result)).lines([
            weekday_name(result.weekday).to_string(),
            format!("Week: {}, Day in week: {}", result.week, result.day_in_week),
            format!("Calculation: ({} - 1) % 7 = {}", day, result.offset),
        ]))
    }

    pub fn schedule(&self, interval: &str) -> Result<Report> {
        let interval = parse_integer("interval", interval)?;
        let horizon = self.config.limits.schedule_horizon;
        let schedule = RecurrenceSchedule::new(interval, horizon)?;
        let days = schedule.days();

        let listing = days
            .iter()
            .map(|entry| format!("Day {}", entry.day))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Report::new(
            format!("Events occur every {} days:", interval),
            json!({ "interval": interval, "horizon": horizon, "days": days }),
        )
        .lines([
            listing,
            format!("Total events in {} days: {}", horizon, days.len()),
            format!("Pattern: day % {} == 0", interval),
        ]))
    }

    pub fn shift(&self, hour: &str) -> Result<Report> {
        let hour = parse_integer("hour", hour)?;
        let classifier = HourShiftClassifier;
        let shift = classifier.classify(hour)?;

        let all = classifier
            .shifts()
            .into_iter()
            .map(|s| {
                if s.index == shift.index {
                    format!("[{}]", s.name)
                } else {
                    s.name
                }
            })
            .collect::<Vec<_>>()
            .join("  ");

        Ok(
            Report::new(format!("Hour {}:00 belongs to:", hour), json!(shift)).lines([
                shift.name.clone(),
                format!("Category includes: {}", shift.hours),
                format!("Calculation: {} % 4 = {}", hour, shift.index),
                format!("All categories: {}", all),
            ]),
        )
    }

    pub fn batch(&self, total: &str, size: &str) -> Result<Report> {
        let total = Self::parse_id("total_records", total)?;
        let size = Self::parse_id("batch_size", size)?;
        validate_range("total_records", total, 1, self.config.limits.max_records)?;

        let plan = BatchAssigner::new(size)?.plan(total)?;
        let batch_count = plan.batch_count();
        let batches: Vec<Batch> = plan.collect();
        tracing::debug!(total, size, batch_count, "Planned batches");

        let mut report = Report::new(
            format!("Processing {} records in batches of {}:", total, size),
            json!({ "total_records": total, "batch_size": size, "batches": batches }),
        )
        .line(format!("Total batches: {}", batch_count));

        for batch in &batches {
            let records = batch
                .records()
                .map(|id| format!("Record {}", id))
                .collect::<Vec<_>>()
                .join(", ");
            report = report.line(format!("Batch {}: {}", batch.number, records));
        }

        Ok(report.line(format!("Pattern: (record_id - 1) / {} + 1", size)))
    }

    fn route(&self, noun: &str, field_name: &str, key: &str, servers: &str) -> Result<Report> {
        let key = Self::parse_id(field_name, key)?;
        let servers = parse_integer("server_count", servers)?;
        let limits = &self.config.limits;
        validate_range("server_count", servers, limits.min_servers, limits.max_records)?;

        let server = PartitionAssigner::new(servers)?.assign(key);
        let all = (0..servers as u64)
            .map(|i| {
                if i == server {
                    format!("[Server {}]", i)
                } else {
                    format!("Server {}", i)
                }
            })
            .collect::<Vec<_>>()
            .join("  ");

        Ok(Report::new(
            format!("{} {} is assigned to:", noun, key),
            json!({ field_name: key, "server_count": servers, "server": server }),
        )
        .lines([
            format!("Server {}", server),
            format!("Calculation: {} % {} = {}", key, servers, server),
            format!("Server distribution: {}", all),
        ]))
    }

    pub fn partition(&self, record: &str, servers: &str) -> Result<Report> {
        self.route("Record", "record_id", record, servers)
    }

    pub fn load_balance(&self, request: &str, servers: &str) -> Result<Report> {
        self.route("Request", "request_id", request, servers)
    }

    fn classify_with(
        &self,
        noun: &str,
        field_name: &str,
        input: &str,
        table: LabelTable,
    ) -> Result<Report> {
        let key = Self::parse_id(field_name, input)?;
        let classifier = CategoryClassifier::new(table);
        let result = classifier.classify(key);

        let all = classifier
            .table()
            .labels()
            .iter()
            .enumerate()
            .map(|(i, label)| {
                if i as u64 == result.index {
                    format!("[{}]", label)
                } else {
                    label.clone()
                }
            })
            .collect::<Vec<_>>()
            .join("  ");

        Ok(
            Report::new(format!("{} {} belongs to:", noun, key), json!(result)).lines([
                result.label.clone(),
                format!(
                    "Calculation: {} % {} = {}",
                    key,
                    classifier.category_count(),
                    result.index
                ),
                format!("All: {}", all),
            ]),
        )
    }

    pub fn categorize(&self, product: &str) -> Result<Report> {
        self.classify_with("Product ID", "product_id", product, self.config.category_table()?)
    }

    pub fn notify(&self, notification: &str) -> Result<Report> {
        self.classify_with(
            "Notification",
            "notification_id",
            notification,
            self.config.priority_table()?,
        )
    }

    pub fn ab_test(&self, user: &str) -> Result<Report> {
        let user = Self::parse_id("user_id", user)?;
        let group = ab_group(user);
        let parity = match group {
            AbGroup::A => "even",
            AbGroup::B => "odd",
        };

        Ok(Report::new(
            format!("User {} is assigned to:", user),
            json!({ "user_id": user, "group": group }),
        )
        .lines([
            format!("Group {} ({} IDs)", group, parity),
            format!("Calculation: {} % 2 = {}", user, user % 2),
        ]))
    }

    pub fn similar(&self, content: &str) -> Result<Report> {
        let content = Self::parse_id("content_id", content)?;
        let group = content % SIMILARITY_GROUPS;
        let similar = similar_content(content, CATALOG_SIZE, SIMILAR_LIMIT)?;

        let listing = similar
            .iter()
            .map(|id| format!("Content {}", id))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Report::new(
            format!("Content {} is similar to:", content),
            json!({ "content_id": content, "group": group, "similar": similar }),
        )
        .lines([
            if listing.is_empty() {
                "(no similar content)".to_string()
            } else {
                listing
            },
            format!("Calculation: {} % {} = {}", content, SIMILARITY_GROUPS, group),
        ]))
    }

    pub fn cluster(&self, user: &str) -> Result<Report> {
        let user = Self::parse_id("user_id", user)?;
        let table = self.config.cluster_table()?;
        let cluster = table.classify(user);
        let members = cluster_members(user, table.len() as i64, CLUSTER_POPULATION)?;

        let listing = members
            .iter()
            .map(|id| {
                if *id as i64 == user {
                    format!("[User {}]", id)
                } else {
                    format!("User {}", id)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Report::new(
            format!("User {} belongs to cluster:", user),
            json!({ "user_id": user, "cluster": cluster, "members": members }),
        )
        .lines([
            cluster.label.clone(),
            format!("Calculation: {} % {} = {}", user, table.len(), cluster.index),
            format!("Cluster members: {}", listing),
        ]))
    }

    pub fn offer(&self, customer: &str, interval: &str) -> Result<Report> {
        let customer = Self::parse_id("customer_id", customer)?;
        let interval = parse_integer("interval", interval)?;
        validate_positive_number("interval", interval, self.config.limits.min_offer_interval)?;

        let eligible = is_offer_eligible(customer, interval)?;
        Ok(Report::new(
            format!("Customer {}:", customer),
            json!({ "customer_id": customer, "interval": interval, "eligible": eligible }),
        )
        .lines([
            if eligible {
                "Special offer available!".to_string()
            } else {
                "No special offer at this time.".to_string()
            },
            format!("Calculation: {} % {} = {}", customer, interval, customer % interval),
            format!("Every {}th customer gets a special offer", interval),
        ]))
    }

    pub fn game_day(&self, day: &str) -> Result<Report> {
        let day = parse_integer("day", day)?;
        validate_range("day", day, 1, self.config.limits.game_max_day)?;

        let events = TriggerSet::game_events();
        let fired = events.evaluate(day);
        Ok(Report::new(
            format!("Day {} events:", day),
            json!({ "day": day, "events": fired }),
        )
        .line(fired.join(", "))
        .line(
            events
                .rules()
                .iter()
                .map(|rule| format!("{}: day % {} == 0", rule.label(), rule.divisor()))
                .collect::<Vec<_>>()
                .join(" | "),
        ))
    }

    pub fn backup(&self, day: &str, interval: &str) -> Result<Report> {
        let day = parse_integer("day", day)?;
        validate_range("day", day, 1, self.config.limits.backup_max_day)?;
        let interval = Self::parse_id("interval", interval)?;

        let scheduled = is_backup_day(day, interval)?;
        Ok(Report::new(
            format!("Day {}:", day),
            json!({ "day": day, "interval": interval, "backup": scheduled }),
        )
        .lines([
            if scheduled {
                "Backup scheduled, system backup will run today.".to_string()
            } else {
                "No backup scheduled for this day.".to_string()
            },
            format!("Calculation: {} % {} = {}", day, interval, day % interval),
            format!("Backup schedule: every {} days", interval),
        ]))
    }

    pub fn fizzbuzz(&self, n: &str) -> Result<Report> {
        let n = parse_integer("n", n)?;
        let sequence = FizzBuzz::with_limit(n, self.config.limits.fizzbuzz_max)?;
        let tokens: Vec<String> = sequence.iter().map(|t| t.to_string()).collect();
        tracing::debug!(n, "Generated FizzBuzz sequence");

        Ok(Report::new(
            format!("FizzBuzz 1..={}", n),
            json!({ "n": n, "tokens": sequence.iter().collect::<Vec<_>>() }),
        )
        .lines(tokens))
    }

    pub fn simulate(&self, kind: SimulationKind) -> Result<Report> {
        let table = simulate(kind, &self.config.simulation_labels()?)?;
        Ok(Report::new(table.title.clone(), json!(table)).lines(table_to_text(&table)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::LabError;

    fn lab() -> Lab {
        Lab::default()
    }

    #[test]
    fn test_day_report() {
        let report = lab().day(Some("10")).unwrap();
        assert_eq!(report.title, "Day 10 falls on:");
        assert_eq!(report.lines[0], "Wednesday");
        assert_eq!(report.lines[1], "Week: 2, Day in week: 3");
        assert_eq!(report.data["week"], 2);
    }

    #[test]
    fn test_day_rejects_non_numeric_and_out_of_range() {
        assert!(matches!(
            lab().day(Some("abc")),
            Err(LabError::ParseError { .. })
        ));
        assert!(lab().day(Some("366")).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_default_day_caps_leap_year_end() {
        let lab = lab();
        let new_years_eve = NaiveDate::from_ymd_opt(2028, 12, 31).unwrap();
        assert_eq!(new_years_eve.ordinal(), 366);
        assert_eq!(lab.day_of_year(new_years_eve), 365);

        let day = lab.day_of_year(new_years_eve).to_string();
        assert!(lab.day(Some(&day)).is_ok());

        let march_first = NaiveDate::from_ymd_opt(2027, 3, 1).unwrap();
        assert_eq!(lab.day_of_year(march_first), 60);
    }

    #[test]
    fn test_default_day_is_valid() {
        assert!(lab().day(None).is_ok());
    }

    #[test]
    fn test_schedule_report() {
        let report = lab().schedule("10").unwrap();
        assert_eq!(report.lines[0], "Day 10, Day 20, Day 30");
        assert_eq!(report.lines[1], "Total events in 30 days: 3");
        assert!(lab().schedule("31").is_err());
    }

    #[test]
    fn test_shift_report() {
        let report = lab().shift("6").unwrap();
        assert_eq!(report.lines[0], "Evening Shift");
        assert!(report.lines[3].contains("[Evening Shift]"));
    }

    #[test]
    fn test_batch_report() {
        let report = lab().batch("7", "3").unwrap();
        assert_eq!(report.lines[0], "Total batches: 3");
        assert_eq!(report.lines[3], "Batch 3: Record 7");
        assert_eq!(report.lines[4], "Pattern: (record_id - 1) / 3 + 1");
        assert!(lab().batch("7", "0").is_err());
        assert!(lab().batch("0", "3").is_err());
    }

    #[test]
    fn test_partition_requires_two_servers() {
        let report = lab().partition("17", "4").unwrap();
        assert_eq!(report.lines[0], "Server 1");
        assert_eq!(report.data["server"], 1);
        assert!(lab().partition("17", "1").unwrap_err().is_invalid_argument());
        assert!(lab().load_balance("17", "0").is_err());
    }

    #[test]
    fn test_categorize_and_notify() {
        assert_eq!(lab().categorize("4").unwrap().lines[0], "Clothing");
        assert_eq!(lab().notify("3").unwrap().lines[0], "High Priority");
        assert!(lab().categorize("0").is_err());
    }

    #[test]
    fn test_ab_similar_cluster() {
        assert_eq!(lab().ab_test("8").unwrap().lines[0], "Group A (even IDs)");
        assert_eq!(lab().similar("7").unwrap().data["similar"], json!([2, 12, 17]));
        let cluster = lab().cluster("5").unwrap();
        assert_eq!(cluster.lines[0], "Regular Users");
        assert!(cluster.lines[2].contains("[User 5]"));
    }

    #[test]
    fn test_offer_game_backup() {
        assert_eq!(lab().offer("20", "5").unwrap().data["eligible"], true);
        assert!(lab().offer("20", "1").is_err());
        assert_eq!(
            lab().game_day("14").unwrap().lines[0],
            "Weekly Boss Event"
        );
        assert_eq!(lab().game_day("1").unwrap().lines[0], "Regular Day");
        assert!(lab().game_day("31").is_err());
        assert_eq!(lab().backup("12", "4").unwrap().data["backup"], true);
        assert!(lab().backup("32", "4").is_err());
    }

    #[test]
    fn test_fizzbuzz_report() {
        let report = lab().fizzbuzz("15").unwrap();
        assert_eq!(report.lines.len(), 15);
        assert_eq!(report.lines[14], "FizzBuzz");
        assert!(lab().fizzbuzz("10001").is_err());
    }

    #[test]
    fn test_simulate_report() {
        let report = lab().simulate(SimulationKind::Database).unwrap();
        assert_eq!(report.title, "Database Simulation: 20 Products");
        assert_eq!(report.data["rows"].as_array().unwrap().len(), 20);
    }
}
