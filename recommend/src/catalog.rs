use crate::error::{RecommendError, Result};
use crate::ItemId;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One catalog entry as seen by the engine: the store's primary key and the
/// free-text description. Read-only here; the catalog store owns it.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub text: String,
}

/// A full read of the current catalog, in stable order. Called on every
/// rebuild; there is no incremental contract. Any failure must surface as
/// `CatalogUnavailable` so refresh orchestration can keep the old model.
pub trait CatalogSource {
    fn load_snapshot(&self) -> Result<Vec<CatalogItem>>;
}

/// File-backed catalog source: a `.json` file (array or single object), a
/// `.jsonl` file, or a directory scanned for both.
pub struct JsonCatalog {
    root: PathBuf,
}

impl JsonCatalog {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    fn files(&self) -> Result<Vec<PathBuf>> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }
        if !self.root.is_dir() {
            return Err(RecommendError::CatalogUnavailable(format!(
                "no catalog at {}",
                self.root.display()
            )));
        }
        let mut files: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| RecommendError::CatalogUnavailable(e.to_string()))?;
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
        Ok(files)
    }
}

impl CatalogSource for JsonCatalog {
    fn load_snapshot(&self) -> Result<Vec<CatalogItem>> {
        let mut items: Vec<CatalogItem> = Vec::new();
        for file in self.files()? {
            if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
                read_jsonl(&file, &mut items)?;
            } else {
                read_json(&file, &mut items)?;
            }
        }
        Ok(items)
    }
}

fn unavailable(file: &Path, err: impl std::fmt::Display) -> RecommendError {
    RecommendError::CatalogUnavailable(format!("{}: {err}", file.display()))
}

fn read_jsonl(file: &Path, items: &mut Vec<CatalogItem>) -> Result<()> {
    let f = File::open(file).map_err(|e| unavailable(file, e))?;
    for line in BufReader::new(f).lines() {
        let line = line.map_err(|e| unavailable(file, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let item: CatalogItem = serde_json::from_str(&line).map_err(|e| unavailable(file, e))?;
        items.push(item);
    }
    Ok(())
}

fn read_json(file: &Path, items: &mut Vec<CatalogItem>) -> Result<()> {
    let f = File::open(file).map_err(|e| unavailable(file, e))?;
    let json: serde_json::Value =
        serde_json::from_reader(BufReader::new(f)).map_err(|e| unavailable(file, e))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let item: CatalogItem =
                    serde_json::from_value(v).map_err(|e| unavailable(file, e))?;
                items.push(item);
            }
        }
        serde_json::Value::Object(_) => {
            let item: CatalogItem =
                serde_json::from_value(json).map_err(|e| unavailable(file, e))?;
            items.push(item);
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reads_json_array_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, r#"[{"id":1,"text":"gauze"},{"id":2,"text":"mask"}]"#).unwrap();
        let items = JsonCatalog::new(&path).load_snapshot().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[1].text, "mask");
    }

    #[test]
    fn reads_jsonl_from_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.jsonl"), "{\"id\":1,\"text\":\"gauze\"}\n\n{\"id\":2,\"text\":\"mask\"}\n").unwrap();
        let items = JsonCatalog::new(dir.path()).load_snapshot().unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn missing_path_is_catalog_unavailable() {
        let err = JsonCatalog::new("/nonexistent/catalog.json")
            .load_snapshot()
            .unwrap_err();
        assert!(matches!(err, RecommendError::CatalogUnavailable(_)));
    }
}
