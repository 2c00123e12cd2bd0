use crate::app::report::table_to_delimited;
use crate::config::LabConfig;
use crate::core::simulation::{simulate, SimulationKind};
use crate::core::Storage;
use crate::domain::model::SimulationTable;
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

/// 匯出結果：寫入的檔案名稱
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub files: Vec<String>,
    pub compressed: bool,
}

/// Renders every simulation table and writes it through a [`Storage`].
pub struct Exporter<S: Storage> {
    storage: S,
    config: LabConfig,
}

impl<S: Storage> Exporter<S> {
    pub fn new(storage: S, config: LabConfig) -> Self {
        Self { storage, config }
    }

    /// 每個表格依設定輸出成 csv/tsv/json 檔案
    fn render_files(
        &self,
        tables: &[(SimulationKind, SimulationTable)],
    ) -> Result<Vec<(String, Vec<u8>)>> {
        let mut files = Vec::new();

        for (kind, table) in tables {
            let stem = kind.file_stem();
            if self.config.wants_format("csv") {
                let csv = table_to_delimited(table, b',')?;
                files.push((format!("{}.csv", stem), csv.into_bytes()));
            }
            if self.config.wants_format("tsv") {
                let tsv = table_to_delimited(table, b'\t')?;
                files.push((format!("{}.tsv", stem), tsv.into_bytes()));
            }
        }

        if self.config.wants_format("json") {
            let bundle: serde_json::Map<String, serde_json::Value> = tables
                .iter()
                .map(|(kind, table)| -> Result<(String, serde_json::Value)> {
                    Ok((kind.file_stem().to_string(), serde_json::to_value(table)?))
                })
                .collect::<Result<_>>()?;
            files.push((
                "simulations.json".to_string(),
                serde_json::to_string_pretty(&bundle)?.into_bytes(),
            ));
        }

        let metadata = serde_json::json!({
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "tables": tables.iter().map(|(kind, _)| kind.file_stem()).collect::<Vec<_>>(),
            "formats": self.config.export.formats,
        });
        files.push((
            "metadata.json".to_string(),
            serde_json::to_string_pretty(&metadata)?.into_bytes(),
        ));

        Ok(files)
    }

    fn build_archive(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        for (name, data) in files {
            zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
            zip.write_all(data)?;
        }
        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    pub async fn export(&self) -> Result<ExportSummary> {
        let labels = self.config.simulation_labels()?;
        let tables = SimulationKind::ALL
            .iter()
            .map(|kind| Ok((*kind, simulate(*kind, &labels)?)))
            .collect::<Result<Vec<_>>>()?;

        let files = self.render_files(&tables)?;
        tracing::debug!("Rendered {} export files", files.len());

        if self.config.export.compress {
            let archive = Self::build_archive(&files)?;
            let name = self.config.export.archive_name.clone();
            tracing::debug!("Writing archive {} ({} bytes)", name, archive.len());
            self.storage.write_file(&name, &archive).await?;
            return Ok(ExportSummary {
                files: vec![name],
                compressed: true,
            });
        }

        let mut written = Vec::with_capacity(files.len());
        for (name, data) in files {
            tracing::debug!("Writing {} ({} bytes)", name, data.len());
            self.storage.write_file(&name, &data).await?;
            written.push(name);
        }

        Ok(ExportSummary {
            files: written,
            compressed: false,
        })
    }
}
