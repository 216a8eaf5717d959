use crate::dataset::Dataset;
use crate::Searchable;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn is_jsonl(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("jsonl")
}

/// Read records from a `.json` file (an array or a single object) or a
/// `.jsonl` file (one record per non-blank line).
pub fn read_records<R: DeserializeOwned>(path: &Path) -> Result<Vec<R>> {
    let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(f);
    if is_jsonl(path) {
        let mut records = Vec::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() { continue; }
            let record = serde_json::from_str(&line)
                .with_context(|| format!("{}:{}", path.display(), lineno + 1))?;
            records.push(record);
        }
        return Ok(records);
    }
    let json: serde_json::Value = serde_json::from_reader(reader)
        .with_context(|| format!("parsing {}", path.display()))?;
    let records = match json {
        serde_json::Value::Array(arr) => arr
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                serde_json::from_value(v).with_context(|| format!("{}: record #{i}", path.display()))
            })
            .collect::<Result<Vec<R>>>()?,
        other => vec![serde_json::from_value(other).with_context(|| format!("{}: record #0", path.display()))?],
    };
    Ok(records)
}

/// Load and validate a dataset from a single file.
pub fn load_dataset<R: Searchable + DeserializeOwned>(path: &Path) -> Result<Dataset<R>> {
    let records = read_records(path)?;
    let dataset = Dataset::new(records).with_context(|| format!("validating {}", path.display()))?;
    tracing::info!(path = %path.display(), records = dataset.len(), "loaded dataset");
    Ok(dataset)
}

/// Load every dataset file under `path` and validate them as one dataset.
/// Record order follows the sorted file order, then the order within each file.
pub fn load_dataset_dir<R: Searchable + DeserializeOwned>(path: &Path) -> Result<Dataset<R>> {
    let mut records = Vec::new();
    for file in collect_dataset_files(path) {
        records.extend(read_records::<R>(&file)?);
    }
    let dataset = Dataset::new(records).with_context(|| format!("validating {}", path.display()))?;
    tracing::info!(path = %path.display(), records = dataset.len(), "loaded dataset directory");
    Ok(dataset)
}

/// `path` itself when it is a file, otherwise every `.json`/`.jsonl` file
/// beneath it, sorted.
pub fn collect_dataset_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }
    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable dataset entry");
                None
            }
        })
        .map(|e| e.into_path())
        .filter(|p| p.is_file())
        .filter(|p| matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")))
        .collect();
    files.sort();
    files
}
