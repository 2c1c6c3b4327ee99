//! # Data Store
//!
//! Read-only access to the dashboard's JSON snapshot.
//!
//! ## Snapshot Shape
//! ```json
//! {
//!   "sponsors":     [ { "id": 1, "name": "Acme", "cashValue": 700000, ... } ],
//!   "deliverables": [ { "id": 1, "sponsorId": 1, "title": "...", ... } ],
//!   "departments":  [ { "id": 1, "name": "Marketing" } ]
//! }
//! ```
//!
//! Amounts are integer cents. `deliverables` and `departments` may be
//! omitted; an empty department list falls back to the built-in catalog.

use serde::{Deserialize, Serialize};
use sponsor_core::{default_departments, Deliverable, Department, SponsorRecord};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{DashboardError, DashboardResult};

/// The snapshot file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub sponsors: Vec<SponsorRecord>,
    #[serde(default)]
    pub deliverables: Vec<Deliverable>,
    #[serde(default)]
    pub departments: Vec<Department>,
}

/// Immutable, in-memory view over a loaded snapshot.
#[derive(Debug, Clone)]
pub struct DataStore {
    snapshot: Snapshot,
    departments: Vec<Department>,
}

impl DataStore {
    /// Reads and parses the snapshot at `path`.
    pub fn load(path: &Path) -> DashboardResult<Self> {
        info!(?path, "Loading data snapshot");
        let contents = std::fs::read_to_string(path).map_err(|e| DashboardError::io(path, e))?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> DashboardResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let departments = if snapshot.departments.is_empty() {
            debug!("Snapshot has no departments, using the default catalog");
            default_departments()
        } else {
            snapshot.departments.clone()
        };

        let orphans = snapshot
            .deliverables
            .iter()
            .filter(|d| !snapshot.sponsors.iter().any(|s| s.id == d.sponsor_id))
            .count();
        if orphans > 0 {
            warn!(orphans, "Deliverables reference sponsors missing from the snapshot");
        }

        debug!(
            sponsors = snapshot.sponsors.len(),
            deliverables = snapshot.deliverables.len(),
            departments = departments.len(),
            "Snapshot loaded"
        );

        DataStore { snapshot, departments }
    }

    pub fn sponsors(&self) -> &[SponsorRecord] {
        &self.snapshot.sponsors
    }

    pub fn sponsor(&self, id: u32) -> DashboardResult<&SponsorRecord> {
        self.snapshot
            .sponsors
            .iter()
            .find(|s| s.id == id)
            .ok_or(DashboardError::SponsorNotFound(id))
    }

    /// Deliverables belonging to sponsor `id`, in snapshot order.
    pub fn deliverables_for(&self, id: u32) -> Vec<&Deliverable> {
        self.snapshot
            .deliverables
            .iter()
            .filter(|d| d.sponsor_id == id)
            .collect()
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "sponsors": [
            { "id": 1, "name": "Acme", "cashValue": 700000, "inKindValue": 300000,
              "estimatedCost": 600000, "totalDeliverables": 2, "completedDeliverables": 1 },
            { "id": 2, "name": "Globex", "cashValue": 0, "inKindValue": 50000,
              "estimatedCost": 10000, "actualCost": 12000,
              "totalDeliverables": 0, "completedDeliverables": 0 }
        ],
        "deliverables": [
            { "id": 10, "sponsorId": 1, "title": "Logo on banner", "departmentId": 1,
              "status": "completed" },
            { "id": 11, "sponsorId": 1, "title": "Print posters", "departmentId": 6,
              "status": "in_progress", "taskType": "cost", "costType": "posters",
              "estimatedCost": 25000 },
            { "id": 12, "sponsorId": 99, "title": "Orphan", "departmentId": 2 }
        ]
    }"#;

    #[test]
    fn test_lookup() {
        let store = DataStore::from_json(SNAPSHOT).unwrap();
        assert_eq!(store.sponsors().len(), 2);
        assert_eq!(store.sponsor(2).unwrap().name, "Globex");
        assert!(matches!(store.sponsor(3), Err(DashboardError::SponsorNotFound(3))));
    }

    #[test]
    fn test_deliverables_for() {
        let store = DataStore::from_json(SNAPSHOT).unwrap();
        let ids: Vec<u32> = store.deliverables_for(1).iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![10, 11]);
        assert!(store.deliverables_for(2).is_empty());
    }

    #[test]
    fn test_departments_fall_back_to_catalog() {
        let store = DataStore::from_json(SNAPSHOT).unwrap();
        assert_eq!(store.departments().len(), 6);

        let custom = DataStore::from_snapshot(Snapshot {
            departments: vec![Department::new(42, "Logistics")],
            ..Snapshot::default()
        });
        assert_eq!(custom.departments(), &[Department::new(42, "Logistics")]);
    }

    #[test]
    fn test_rejects_malformed_snapshot() {
        assert!(matches!(DataStore::from_json("{\"sponsors\": 3}"), Err(DashboardError::Json(_))));
        // negative counts are caught when metrics are computed, not here
        assert!(DataStore::from_json("{\"sponsors\": []}").is_ok());
    }
}
