use crate::core::calendar::{parse_weekday, DayOfWeekClassifier, DEFAULT_HORIZON, DEFAULT_MAX_DAY};
use crate::core::fizzbuzz::FIZZBUZZ_MAX;
use crate::core::modulo::LabelTable;
use crate::core::simulation::SimulationLabels;
use crate::utils::error::{LabError, Result};
use crate::utils::validation::{
    validate_config_minimum, validate_non_empty, validate_path, Validate,
};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub limits: LimitsConfig,
    pub calendar: CalendarConfig,
    pub labels: LabelsConfig,
    pub export: ExportConfig,
}

/// 各個示範的輸入範圍
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub fizzbuzz_max: i64,
    pub schedule_horizon: i64,
    pub max_day: i64,
    pub backup_max_day: i64,
    pub game_max_day: i64,
    pub min_servers: i64,
    pub min_offer_interval: i64,
    pub max_records: i64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            fizzbuzz_max: FIZZBUZZ_MAX,
            schedule_horizon: DEFAULT_HORIZON,
            max_day: DEFAULT_MAX_DAY,
            backup_max_day: 31,
            game_max_day: 30,
            min_servers: 2,
            min_offer_interval: 2,
            max_records: 10_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub first_weekday: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            first_weekday: "Monday".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    pub categories: Option<Vec<String>>,
    pub priorities: Option<Vec<String>>,
    pub clusters: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_path: String,
    pub formats: Vec<String>,
    pub compress: bool,
    pub archive_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: "./output".to_string(),
            formats: vec!["csv".to_string(), "tsv".to_string(), "json".to_string()],
            compress: false,
            archive_name: "simulations.zip".to_string(),
        }
    }
}

impl LabConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LabError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LabError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LabError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let limits = &self.limits;
        validate_config_minimum("limits.fizzbuzz_max", limits.fizzbuzz_max, 1)?;
        validate_config_minimum("limits.schedule_horizon", limits.schedule_horizon, 1)?;
        validate_config_minimum("limits.max_day", limits.max_day, 1)?;
        validate_config_minimum("limits.backup_max_day", limits.backup_max_day, 1)?;
        validate_config_minimum("limits.game_max_day", limits.game_max_day, 1)?;
        validate_config_minimum("limits.min_servers", limits.min_servers, 1)?;
        validate_config_minimum("limits.min_offer_interval", limits.min_offer_interval, 1)?;
        validate_config_minimum("limits.max_records", limits.max_records, 1)?;

        self.first_weekday()?;

        if let Some(categories) = &self.labels.categories {
            validate_non_empty("labels.categories", categories)?;
        }
        if let Some(priorities) = &self.labels.priorities {
            validate_non_empty("labels.priorities", priorities)?;
        }
        if let Some(clusters) = &self.labels.clusters {
            validate_non_empty("labels.clusters", clusters)?;
        }

        validate_path("export.output_path", &self.export.output_path)?;
        validate_path("export.archive_name", &self.export.archive_name)?;

        let valid_formats = ["csv", "tsv", "json"];
        for format in &self.export.formats {
            if !valid_formats.contains(&format.as_str()) {
                return Err(LabError::ConfigValidationError {
                    field: "export.formats".to_string(),
                    message: format!(
                        "Unsupported format '{}'. Valid formats: {}",
                        format,
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn first_weekday(&self) -> Result<Weekday> {
        parse_weekday("calendar.first_weekday", &self.calendar.first_weekday)
    }

    pub fn day_classifier(&self) -> Result<DayOfWeekClassifier> {
        DayOfWeekClassifier::new(self.first_weekday()?, self.limits.max_day)
    }

    fn table_or(labels: &Option<Vec<String>>, builtin: fn() -> LabelTable) -> Result<LabelTable> {
        match labels {
            Some(labels) => LabelTable::new(labels.iter().cloned()),
            None => Ok(builtin()),
        }
    }

    pub fn category_table(&self) -> Result<LabelTable> {
        Self::table_or(&self.labels.categories, LabelTable::product_categories)
    }

    pub fn priority_table(&self) -> Result<LabelTable> {
        Self::table_or(&self.labels.priorities, LabelTable::notification_priorities)
    }

    pub fn cluster_table(&self) -> Result<LabelTable> {
        Self::table_or(&self.labels.clusters, LabelTable::user_clusters)
    }

    /// 模擬表格預設使用簡短標籤，設定檔有覆寫時改用設定值
    pub fn simulation_labels(&self) -> Result<SimulationLabels> {
        Ok(SimulationLabels {
            categories: self.category_table()?,
            clusters: Self::table_or(&self.labels.clusters, LabelTable::cluster_tags)?,
            priorities: Self::table_or(&self.labels.priorities, LabelTable::priority_tags)?,
        })
    }

    pub fn wants_format(&self, format: &str) -> bool {
        self.export.formats.iter().any(|f| f == format)
    }
}

impl Validate for LabConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
