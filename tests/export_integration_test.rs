use anyhow::Result;
use modulo_lab::core::Storage;
use modulo_lab::{Exporter, LabConfig, LocalStorage};
use std::io::Read;
use tempfile::TempDir;

fn storage_for(temp_dir: &TempDir) -> LocalStorage {
    LocalStorage::new(temp_dir.path().to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_export_to_local_directory() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let mut config = LabConfig::default();
    config.export.output_path = output_path.clone();

    let summary = Exporter::new(storage_for(&temp_dir), config).export().await?;
    assert!(!summary.compressed);

    let expected = [
        "database.csv",
        "platform.tsv",
        "real_world.csv",
        "simulations.json",
        "metadata.json",
    ];
    for name in expected {
        assert!(temp_dir.path().join(name).exists(), "missing {}", name);
    }

    let csv = std::fs::read_to_string(temp_dir.path().join("platform.csv"))?;
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let headers = reader.headers()?.clone();
    assert_eq!(headers.len(), 5);
    assert_eq!(&headers[1], "A/B Group");
    let rows: Vec<csv::StringRecord> = reader.records().collect::<std::result::Result<_, _>>()?;
    assert_eq!(rows.len(), 20);
    assert_eq!(&rows[1][1], "Group A");

    let metadata: serde_json::Value =
        serde_json::from_slice(&storage_for(&temp_dir).read_file("metadata.json").await?)?;
    assert_eq!(metadata["tables"][2], "real_world");
    assert!(metadata["generated_at"].as_str().is_some());

    Ok(())
}

#[tokio::test]
async fn test_export_zip_bundle() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = LabConfig::from_toml_str(
        r#"
[labels]
categories = ["Books", "Games", "Music", "Video"]

[export]
compress = true
archive_name = "lab.zip"
formats = ["csv", "json"]
"#,
    )?;

    let summary = Exporter::new(storage_for(&temp_dir), config).export().await?;
    assert_eq!(summary.files, vec!["lab.zip"]);

    let data = std::fs::read(temp_dir.path().join("lab.zip"))?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data))?;
    assert_eq!(archive.len(), 5);

    let mut content = String::new();
    archive.by_name("database.csv")?.read_to_string(&mut content)?;
    assert!(content.contains("4,Books,Server 1,Batch 1"));
    assert!(content.contains("3,Video,Server 0,Batch 1"));

    Ok(())
}
