use crate::utils::error::{LabError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 將使用者輸入的文字轉成整數，失敗時回報 ParseError
pub fn parse_integer(field_name: &str, input: &str) -> Result<i64> {
    input.trim().parse::<i64>().map_err(|_| LabError::ParseError {
        field: field_name.to_string(),
        value: input.to_string(),
    })
}

pub fn validate_positive_number(field_name: &str, value: i64, min_value: i64) -> Result<()> {
    if value < min_value {
        return Err(LabError::invalid_argument(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

/// 設定檔中的數值下限，錯誤歸類為設定問題
pub fn validate_config_minimum(field_name: &str, value: i64, min_value: i64) -> Result<()> {
    if value < min_value {
        return Err(LabError::ConfigValidationError {
            field: field_name.to_string(),
            message: format!("Value {} must be at least {}", value, min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(LabError::invalid_argument(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LabError::ConfigValidationError {
            field: field_name.to_string(),
            message: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LabError::ConfigValidationError {
            field: field_name.to_string(),
            message: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(LabError::ConfigValidationError {
            field: field_name.to_string(),
            message: "List cannot be empty".to_string(),
        });
    }
    Ok(())
}
