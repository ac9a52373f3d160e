//! Job — a dated visit to a customer.
//!
//! Status is an unconstrained enumerated value: any status may be set from
//! any other. The one transition with side effects is *entering*
//! [`JobStatus::Completed`], reported by [`Job::set_status`] so the store can
//! deduct parts exactly once per completion.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{FieldServiceError, ValidationError};
use crate::id::{CustomerId, JobId, PartId, TechnicianId};
use crate::photo::Photo;

/// Display-only priority tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Green,
    Yellow,
    Red,
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Green => f.write_str("green"),
            Self::Yellow => f.write_str("yellow"),
            Self::Red => f.write_str("red"),
        }
    }
}

impl std::str::FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "green" => Ok(Self::Green),
            "yellow" => Ok(Self::Yellow),
            "red" => Ok(Self::Red),
            other => Err(format!("unknown urgency {other:?}")),
        }
    }
}

/// Where a job stands. Listed in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JobStatus {
    #[default]
    Scheduled,
    #[serde(rename = "En Route")]
    EnRoute,
    Working,
    Completed,
}

impl JobStatus {
    /// Every status, in the order they are presented.
    pub const ALL: [Self; 4] = [Self::Scheduled, Self::EnRoute, Self::Working, Self::Completed];

    #[must_use]
    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::EnRoute => "En Route",
            Self::Working => "Working",
            Self::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("unknown job status {s:?}"))
    }
}

/// A quantity of one inventory item consumed on a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartUsage {
    pub part_id: PartId,
    pub quantity: u32,
}

/// A job record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub date: NaiveDate,
    pub customer_id: CustomerId,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_tech: Option<TechnicianId>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub parts_used: Vec<PartUsage>,
}

impl Job {
    /// Create a builder for constructing a [`Job`].
    #[must_use]
    pub fn builder() -> JobBuilder {
        JobBuilder::default()
    }

    /// Set the status. Returns `true` when this call moved the job into
    /// [`JobStatus::Completed`] from any other status.
    pub fn set_status(&mut self, status: JobStatus) -> bool {
        let entering = status.is_completed() && !self.status.is_completed();
        self.status = status;
        entering
    }

    /// Whether the job still occupies its technician.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.status.is_completed()
    }

    /// Record `quantity` units of `part_id`. Repeated parts accumulate on one line.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidQuantity`] when `quantity` is zero.
    pub fn add_part_usage(&mut self, part_id: PartId, quantity: u32) -> Result<(), FieldServiceError> {
        if quantity == 0 {
            return Err(ValidationError::InvalidQuantity(quantity).into());
        }
        match self.parts_used.iter_mut().find(|usage| usage.part_id == part_id) {
            Some(usage) => usage.quantity = usage.quantity.saturating_add(quantity),
            None => self.parts_used.push(PartUsage { part_id, quantity }),
        }
        Ok(())
    }

    /// Drop every usage line for `part_id`. Returns `true` if a line was removed.
    pub fn remove_part_usage(&mut self, part_id: &PartId) -> bool {
        let before = self.parts_used.len();
        self.parts_used.retain(|usage| &usage.part_id != part_id);
        self.parts_used.len() != before
    }
}

/// Step-by-step builder for [`Job`]. New jobs always start
/// [`JobStatus::Scheduled`] with no parts or photos.
#[derive(Debug, Default)]
pub struct JobBuilder {
    date: Option<NaiveDate>,
    customer_id: Option<CustomerId>,
    urgency: Urgency,
    notes: String,
    assigned_tech: Option<TechnicianId>,
}

impl JobBuilder {
    #[must_use]
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn customer_id(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    #[must_use]
    pub fn urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    #[must_use]
    pub fn assigned_tech(mut self, tech: TechnicianId) -> Self {
        self.assigned_tech = Some(tech);
        self
    }

    /// Consume the builder, validate, and return a [`Job`].
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::Validation`] if `date` or `customer_id`
    /// is missing.
    pub fn build(self) -> Result<Job, FieldServiceError> {
        let date = self.date.ok_or_else(|| FieldServiceError::missing("Job", "date"))?;
        let customer_id = self
            .customer_id
            .ok_or_else(|| FieldServiceError::missing("Job", "customerId"))?;
        Ok(Job {
            id: JobId::new(),
            date,
            customer_id,
            urgency: self.urgency,
            status: JobStatus::Scheduled,
            notes: self.notes,
            assigned_tech: self.assigned_tech,
            photos: Vec::new(),
            parts_used: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn may_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn job() -> Job {
        Job::builder()
            .date(may_first())
            .customer_id(CustomerId::new())
            .urgency(Urgency::Red)
            .build()
            .unwrap()
    }

    #[test]
    fn should_start_scheduled_with_no_parts() {
        let job = job();
        assert_eq!(job.status, JobStatus::Scheduled);
        assert!(job.parts_used.is_empty());
        assert!(job.photos.is_empty());
        assert_eq!(job.urgency, Urgency::Red);
    }

    #[test]
    fn should_reject_job_without_date() {
        let result = Job::builder().customer_id(CustomerId::new()).build();
        assert!(matches!(
            result,
            Err(FieldServiceError::Validation(ValidationError::MissingField {
                entity: "Job",
                field: "date"
            }))
        ));
    }

    #[test]
    fn should_reject_job_without_customer() {
        let result = Job::builder().date(may_first()).build();
        assert!(matches!(
            result,
            Err(FieldServiceError::Validation(ValidationError::MissingField {
                field: "customerId",
                ..
            }))
        ));
    }

    #[test]
    fn should_report_entering_completed_once() {
        let mut job = job();
        assert!(!job.set_status(JobStatus::Working));
        assert!(job.set_status(JobStatus::Completed));
        assert!(!job.set_status(JobStatus::Completed));
    }

    #[test]
    fn should_allow_any_transition() {
        let mut job = job();
        job.set_status(JobStatus::Completed);
        assert!(!job.set_status(JobStatus::Scheduled));
        assert_eq!(job.status, JobStatus::Scheduled);
        assert!(job.is_active());
    }

    #[test]
    fn should_merge_repeated_part_usage() {
        let mut job = job();
        let part = PartId::new();
        job.add_part_usage(part.clone(), 2).unwrap();
        job.add_part_usage(part.clone(), 3).unwrap();
        assert_eq!(job.parts_used, vec![PartUsage { part_id: part, quantity: 5 }]);
    }

    #[test]
    fn should_reject_zero_quantity_usage() {
        let mut job = job();
        let result = job.add_part_usage(PartId::new(), 0);
        assert!(matches!(
            result,
            Err(FieldServiceError::Validation(ValidationError::InvalidQuantity(0)))
        ));
    }

    #[test]
    fn should_remove_part_usage_line() {
        let mut job = job();
        let part = PartId::new();
        job.add_part_usage(part.clone(), 1).unwrap();
        assert!(job.remove_part_usage(&part));
        assert!(!job.remove_part_usage(&part));
        assert!(job.parts_used.is_empty());
    }

    #[test]
    fn should_serialize_status_label_and_camel_case_fields() {
        let mut job = job();
        job.set_status(JobStatus::EnRoute);
        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["status"], "En Route");
        assert_eq!(json["date"], "2024-05-01");
        assert_eq!(json["urgency"], "red");
        assert!(json["partsUsed"].as_array().unwrap().is_empty());
        assert!(json.get("customerId").is_some());
    }

    #[test]
    fn should_read_legacy_job_without_parts_or_tech() {
        let json = r#"{"id":"j1","date":"2024-05-01","customerId":"c1","urgency":"yellow","status":"Working","notes":"","photos":[]}"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.status, JobStatus::Working);
        assert!(job.assigned_tech.is_none());
        assert!(job.parts_used.is_empty());
    }

    #[test]
    fn should_parse_status_loosely() {
        assert_eq!("en-route".parse::<JobStatus>().unwrap(), JobStatus::EnRoute);
        assert_eq!("Completed".parse::<JobStatus>().unwrap(), JobStatus::Completed);
        assert!("cancelled".parse::<JobStatus>().is_err());
    }

    #[test]
    fn should_list_statuses_in_display_order() {
        let labels: Vec<_> = JobStatus::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["Scheduled", "En Route", "Working", "Completed"]);
    }
}
