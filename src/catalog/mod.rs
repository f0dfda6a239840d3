//! Course catalog storage
//!
//! The scorers work on an immutable `Catalog` snapshot that is loaded fresh
//! for every top-level request. Where that snapshot comes from is behind the
//! `CatalogSource` trait so the file-backed loader can be swapped for an
//! in-memory one (demo harness, tests).

use crate::{
    error::AppResult,
    models::{Course, PrecomputedSimilarity, User},
};

pub mod json;

pub use json::{CatalogPaths, JsonCatalog};

/// Snapshot of the three collections the scorers read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub courses: Vec<Course>,
    pub users: Vec<User>,
    pub similarities: Vec<PrecomputedSimilarity>,
}

impl Catalog {
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn similarity_for(&self, course_id: &str) -> Option<&PrecomputedSimilarity> {
        self.similarities.iter().find(|s| s.course_id == course_id)
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty() && self.users.is_empty() && self.similarities.is_empty()
    }
}

/// Trait for catalog backends
///
/// A load either yields all three collections or fails as a whole; callers
/// never see a partially populated catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> AppResult<Catalog>;

    /// Source name for logging
    fn name(&self) -> &'static str;
}

/// Catalog held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    catalog: Catalog,
}

impl StaticCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

#[async_trait::async_trait]
impl CatalogSource for StaticCatalog {
    async fn load(&self) -> AppResult<Catalog> {
        Ok(self.catalog.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
