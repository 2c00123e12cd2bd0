use crate::domain::model::SimulationTable;
use crate::utils::error::{LabError, Result};
use serde::Serialize;

/// Rendered outcome of one demo invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub title: String,
    pub lines: Vec<String>,
    pub data: serde_json::Value,
}

impl Report {
    pub fn new(title: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
            data,
        }
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        for line in &self.lines {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.data)?)
    }
}

/// CSV (`b','`) 或 TSV (`b'\t'`) 輸出
pub fn table_to_delimited(table: &SimulationTable, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }

    let bytes = writer.into_inner().map_err(|e| LabError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| LabError::ConfigError {
        message: format!("table is not valid UTF-8: {}", e),
    })
}

/// 對齊欄位的純文字表格
pub fn table_to_text(table: &SimulationTable) -> Vec<String> {
    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(table.rows.len() + 3);
    lines.push(format_row(&table.columns));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &table.rows {
        lines.push(format_row(row));
    }
    lines.push(table.legend.clone());
    lines
}
