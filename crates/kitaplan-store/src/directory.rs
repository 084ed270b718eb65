//! Kindergarten directory used to populate selection menus.

use std::path::Path;

use async_trait::async_trait;
use kitaplan_core::{PlacementSlot, WeeklySchedule};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kindergarten {
    pub id: String,
    pub name: String,
    pub district: String,
    pub available_spots: u32,
}

/// Read access to the municipal kindergarten directory.
#[async_trait]
pub trait KindergartenDirectory: Send + Sync {
    /// All kindergartens, ordered by name.
    async fn list(&self) -> Result<Vec<Kindergarten>, StoreError>;

    async fn get(&self, id: &str) -> Result<Kindergarten, StoreError>;

    /// Kindergartens in `district` (case-insensitive match).
    async fn in_district(&self, district: &str) -> Result<Vec<Kindergarten>, StoreError> {
        let all = self.list().await?;
        Ok(all
            .into_iter()
            .filter(|k| k.district.eq_ignore_ascii_case(district.trim()))
            .collect())
    }

    /// Kindergartens with at least one free spot.
    async fn with_available_spots(&self) -> Result<Vec<Kindergarten>, StoreError> {
        let all = self.list().await?;
        Ok(all.into_iter().filter(|k| k.available_spots > 0).collect())
    }

    /// Build a placement slot for `id`, taking the name from the directory.
    async fn placement_slot(
        &self,
        id: &str,
        schedule: WeeklySchedule,
    ) -> Result<PlacementSlot, StoreError> {
        let kindergarten = self.get(id).await?;
        Ok(PlacementSlot::new(kindergarten.id, kindergarten.name, schedule))
    }
}

/// Directory held entirely in memory.
///
/// Built from a list or from a JSON array of [`Kindergarten`] records.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    entries: Vec<Kindergarten>,
}

impl MemoryDirectory {
    pub fn new(mut entries: Vec<Kindergarten>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Self { entries }
    }

    /// Load a JSON array of kindergartens.
    pub fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::DirectoryNotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let entries: Vec<Kindergarten> = serde_json::from_str(&raw)?;
        info!(count = entries.len(), path = %path.display(), "loaded kindergarten directory");
        Ok(Self::new(entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KindergartenDirectory for MemoryDirectory {
    async fn list(&self) -> Result<Vec<Kindergarten>, StoreError> {
        Ok(self.entries.clone())
    }

    async fn get(&self, id: &str) -> Result<Kindergarten, StoreError> {
        self.entries
            .iter()
            .find(|k| k.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
