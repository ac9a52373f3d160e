//! Snapshot — the whole store as one document.
//!
//! This is the unit of persistence, export, and import. Parsing goes through
//! [`Snapshot::from_json`], which rejects documents missing any of the five
//! collections and documents with duplicate ids.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::customer::Customer;
use crate::equipment::Equipment;
use crate::error::CorruptDataError;
use crate::id::{CustomerId, EquipmentId, JobId, PartId, TechnicianId};
use crate::inventory::InventoryItem;
use crate::job::Job;
use crate::technician::{Technician, TechnicianStatus};

/// Sites and vans inventory can be stocked at.
pub const PRESET_LOCATIONS: [&str; 5] = ["Van AB", "Van JS", "Van JW", "Service Van", "Shop"];

/// Technicians seeded into a fresh store, as `(name, location)`.
pub const PRESET_TECHNICIANS: [(&str, &str); 4] = [
    ("AB", "Van AB"),
    ("JS", "Van JS"),
    ("JW", "Van JW"),
    ("Service", "Service Van"),
];

fn preset_locations() -> Vec<String> {
    PRESET_LOCATIONS.iter().map(ToString::to_string).collect()
}

/// Every collection in the store plus its seed data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub customers: Vec<Customer>,
    pub jobs: Vec<Job>,
    pub inventory: Vec<InventoryItem>,
    pub equipment: Vec<Equipment>,
    pub technicians: Vec<Technician>,
    #[serde(default = "preset_locations")]
    pub locations: Vec<String>,
}

impl Default for Snapshot {
    /// Empty collections, the preset locations, and the preset technicians, all free.
    fn default() -> Self {
        Self {
            customers: Vec::new(),
            jobs: Vec::new(),
            inventory: Vec::new(),
            equipment: Vec::new(),
            technicians: PRESET_TECHNICIANS
                .iter()
                .map(|(name, location)| Technician::new(*name, *location))
                .collect(),
            locations: preset_locations(),
        }
    }
}

impl Snapshot {
    /// Parse and shape-check a document.
    ///
    /// # Errors
    ///
    /// Returns [`CorruptDataError::Parse`] when the bytes are not a store
    /// document, [`CorruptDataError::DuplicateId`] when a collection
    /// repeats an id, or [`CorruptDataError::UnknownTechnician`] when a job
    /// is assigned to a technician missing from the document.
    pub fn from_json(bytes: &[u8]) -> Result<Self, CorruptDataError> {
        let snapshot: Self = serde_json::from_slice(bytes)?;
        snapshot.check_ids()?;
        snapshot.check_assignments()?;
        Ok(snapshot)
    }

    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error. Every field is plain data,
    /// so this only fails on allocation problems.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    fn check_ids(&self) -> Result<(), CorruptDataError> {
        unique("customers", self.customers.iter().map(|c| c.id.as_str()))?;
        unique("jobs", self.jobs.iter().map(|j| j.id.as_str()))?;
        unique("inventory", self.inventory.iter().map(|p| p.id.as_str()))?;
        unique("equipment", self.equipment.iter().map(|e| e.id.as_str()))?;
        unique("technicians", self.technicians.iter().map(|t| t.id.as_str()))?;
        Ok(())
    }

    fn check_assignments(&self) -> Result<(), CorruptDataError> {
        for job in &self.jobs {
            if let Some(tech) = &job.assigned_tech
                && self.technician(tech).is_none()
            {
                return Err(CorruptDataError::UnknownTechnician {
                    job: job.id.to_string(),
                    technician: tech.to_string(),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn has_location(&self, location: &str) -> bool {
        self.locations.iter().any(|l| l == location)
    }

    #[must_use]
    pub fn customer(&self, id: &CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| &c.id == id)
    }

    pub fn customer_mut(&mut self, id: &CustomerId) -> Option<&mut Customer> {
        self.customers.iter_mut().find(|c| &c.id == id)
    }

    #[must_use]
    pub fn job(&self, id: &JobId) -> Option<&Job> {
        self.jobs.iter().find(|j| &j.id == id)
    }

    pub fn job_mut(&mut self, id: &JobId) -> Option<&mut Job> {
        self.jobs.iter_mut().find(|j| &j.id == id)
    }

    #[must_use]
    pub fn part(&self, id: &PartId) -> Option<&InventoryItem> {
        self.inventory.iter().find(|p| &p.id == id)
    }

    pub fn part_mut(&mut self, id: &PartId) -> Option<&mut InventoryItem> {
        self.inventory.iter_mut().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn equipment(&self, id: &EquipmentId) -> Option<&Equipment> {
        self.equipment.iter().find(|e| &e.id == id)
    }

    pub fn equipment_mut(&mut self, id: &EquipmentId) -> Option<&mut Equipment> {
        self.equipment.iter_mut().find(|e| &e.id == id)
    }

    #[must_use]
    pub fn technician(&self, id: &TechnicianId) -> Option<&Technician> {
        self.technicians.iter().find(|t| &t.id == id)
    }

    /// The status a technician must have given the current jobs: on a call
    /// while any job assigned to them is not completed, free otherwise.
    #[must_use]
    pub fn derived_technician_status(&self, id: &TechnicianId) -> TechnicianStatus {
        let busy = self
            .jobs
            .iter()
            .any(|job| job.assigned_tech.as_ref() == Some(id) && job.is_active());
        if busy {
            TechnicianStatus::OnACall
        } else {
            TechnicianStatus::Free
        }
    }

    /// Recompute and store a technician's status. Returns the new status, or
    /// `None` when no such technician exists.
    pub fn sync_technician(&mut self, id: &TechnicianId) -> Option<TechnicianStatus> {
        let status = self.derived_technician_status(id);
        let tech = self.technicians.iter_mut().find(|t| &t.id == id)?;
        tech.status = status;
        Some(status)
    }

    /// Recompute every technician's status. Returns how many changed.
    pub fn sync_all_technicians(&mut self) -> usize {
        let derived: Vec<_> = self
            .technicians
            .iter()
            .map(|tech| self.derived_technician_status(&tech.id))
            .collect();
        let mut changed = 0;
        for (tech, status) in self.technicians.iter_mut().zip(derived) {
            if tech.status != status {
                tech.status = status;
                changed += 1;
            }
        }
        changed
    }
}

fn unique<'a>(
    collection: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CorruptDataError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CorruptDataError::DuplicateId {
                collection,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{JobStatus, Urgency};
    use chrono::NaiveDate;

    #[test]
    fn should_seed_four_free_technicians_and_five_locations() {
        let snapshot = Snapshot::default();
        assert_eq!(snapshot.technicians.len(), 4);
        assert!(snapshot.technicians.iter().all(Technician::is_free));
        assert_eq!(snapshot.locations.len(), 5);
        assert!(snapshot.customers.is_empty());
        assert!(snapshot.jobs.is_empty());
        assert!(snapshot.inventory.is_empty());
        assert!(snapshot.equipment.is_empty());
    }

    #[test]
    fn should_roundtrip_through_json() {
        let snapshot = Snapshot::default();
        let bytes = snapshot.to_json().unwrap();
        assert_eq!(Snapshot::from_json(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn should_reject_document_missing_a_collection() {
        let json = br#"{"customers":[],"jobs":[],"inventory":[],"equipment":[]}"#;
        assert!(matches!(
            Snapshot::from_json(json),
            Err(CorruptDataError::Parse(_))
        ));
    }

    #[test]
    fn should_reject_non_json() {
        assert!(matches!(
            Snapshot::from_json(b"not json"),
            Err(CorruptDataError::Parse(_))
        ));
    }

    #[test]
    fn should_default_locations_when_absent() {
        let json = br#"{"customers":[],"jobs":[],"inventory":[],"equipment":[],"technicians":[]}"#;
        let snapshot = Snapshot::from_json(json).unwrap();
        assert_eq!(snapshot.locations, PRESET_LOCATIONS);
    }

    #[test]
    fn should_reject_duplicate_ids() {
        let json = br#"{"customers":[{"id":"c1","name":"A"},{"id":"c1","name":"B"}],
            "jobs":[],"inventory":[],"equipment":[],"technicians":[]}"#;
        assert!(matches!(
            Snapshot::from_json(json),
            Err(CorruptDataError::DuplicateId { collection: "customers", ref id }) if id == "c1"
        ));
    }

    #[test]
    fn should_reject_job_assigned_to_unknown_technician() {
        let json = br#"{"customers":[],"inventory":[],"equipment":[],"technicians":[],
            "jobs":[{"id":"j1","date":"2024-05-01","customerId":"c1","urgency":"green",
                "status":"Working","notes":"","assignedTech":"ghost","photos":[],"partsUsed":[]}]}"#;
        assert!(matches!(
            Snapshot::from_json(json),
            Err(CorruptDataError::UnknownTechnician { ref job, ref technician })
                if job == "j1" && technician == "ghost"
        ));
    }

    #[test]
    fn should_derive_technician_status_from_active_jobs() {
        let mut snapshot = Snapshot::default();
        let tech = snapshot.technicians[0].id.clone();
        let mut job = Job::builder()
            .date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
            .customer_id(CustomerId::new())
            .urgency(Urgency::Green)
            .assigned_tech(tech.clone())
            .build()
            .unwrap();
        snapshot.jobs.push(job.clone());
        assert_eq!(snapshot.sync_technician(&tech), Some(TechnicianStatus::OnACall));

        job.set_status(JobStatus::Completed);
        snapshot.jobs[0] = job;
        assert_eq!(snapshot.sync_technician(&tech), Some(TechnicianStatus::Free));
    }

    #[test]
    fn should_repair_stale_technician_statuses() {
        let mut snapshot = Snapshot::default();
        snapshot.technicians[1].status = TechnicianStatus::OnACall;
        assert_eq!(snapshot.sync_all_technicians(), 1);
        assert!(snapshot.technicians[1].is_free());
        assert_eq!(snapshot.sync_all_technicians(), 0);
    }

    #[test]
    fn should_return_none_when_syncing_unknown_technician() {
        let mut snapshot = Snapshot::default();
        assert_eq!(snapshot.sync_technician(&TechnicianId::new()), None);
    }
}
