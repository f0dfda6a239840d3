use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::{
    catalog::{Catalog, CatalogSource},
    error::AppResult,
    models::{Course, PrecomputedSimilarity, User},
};

/// Locations of the three catalog documents
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPaths {
    pub courses: PathBuf,
    pub users: PathBuf,
    pub similarities: PathBuf,
}

/// Catalog backed by flat JSON files, re-read on every load
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    paths: CatalogPaths,
}

impl JsonCatalog {
    pub fn new(paths: CatalogPaths) -> Self {
        Self { paths }
    }
}

#[async_trait::async_trait]
impl CatalogSource for JsonCatalog {
    async fn load(&self) -> AppResult<Catalog> {
        let (courses, users, similarities) = tokio::try_join!(
            read_collection::<Course>(&self.paths.courses, "course"),
            read_collection::<User>(&self.paths.users, "user"),
            read_collection::<PrecomputedSimilarity>(&self.paths.similarities, "similarity"),
        )?;

        tracing::debug!(
            courses = courses.len(),
            users = users.len(),
            similarities = similarities.len(),
            "Catalog loaded"
        );

        Ok(Catalog {
            courses,
            users,
            similarities,
        })
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

/// Reads one document, which must be a JSON array
async fn read_collection<T: DeserializeOwned>(path: &Path, kind: &'static str) -> AppResult<Vec<T>> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to read catalog file");
        e
    })?;

    let raw: Vec<Value> = serde_json::from_slice(&bytes).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to parse catalog file");
        e
    })?;

    Ok(validate_records(raw, kind))
}

/// Converts raw JSON values into typed records, skipping malformed entries
fn validate_records<T: DeserializeOwned>(raw: Vec<Value>, kind: &'static str) -> Vec<T> {
    let total = raw.len();
    let records: Vec<T> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(kind, index, error = %e, "Skipping malformed record");
                None
            }
        })
        .collect();

    if records.len() < total {
        tracing::warn!(
            kind,
            kept = records.len(),
            skipped = total - records.len(),
            "Quarantined malformed records"
        );
    }

    records
}
