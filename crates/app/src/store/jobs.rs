//! Job operations and the job lifecycle rules.
//!
//! Moving a job into `Completed` from any other status deducts every part
//! usage line from inventory (clamped at zero). Setting `Completed` on a job
//! that is already completed changes nothing. After any status or assignment
//! change the affected technicians are re-derived from their jobs.

use chrono::NaiveDate;
use wefield_domain::error::{FieldServiceError, ValidationError};
use wefield_domain::id::{JobId, PartId, TechnicianId};
use wefield_domain::job::{Job, JobStatus};
use wefield_domain::photo::Photo;
use wefield_domain::snapshot::Snapshot;

use super::FieldServiceStore;
use crate::ports::DocumentStore;

impl<S: DocumentStore> FieldServiceStore<S> {
    /// Add a new job and persist. New jobs always start `Scheduled`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::NotFound`] when the customer or the
    /// assigned technician does not exist, [`FieldServiceError::Validation`]
    /// when the id is already taken, or a storage error from the backend.
    #[tracing::instrument(skip(self, job), fields(job_id = %job.id, date = %job.date))]
    pub fn create_job(&mut self, mut job: Job) -> Result<Job, FieldServiceError> {
        job.status = JobStatus::Scheduled;
        self.transact(|snapshot| {
            if snapshot.job(&job.id).is_some() {
                return Err(ValidationError::DuplicateId {
                    entity: "Job",
                    id: job.id.to_string(),
                }
                .into());
            }
            if snapshot.customer(&job.customer_id).is_none() {
                return Err(FieldServiceError::not_found("Customer", &job.customer_id));
            }
            let tech = job.assigned_tech.clone();
            snapshot.jobs.push(job.clone());
            if let Some(tech) = tech {
                sync_technician(snapshot, &tech)?;
            }
            Ok(job)
        })
    }

    /// Set a job's status.
    ///
    /// Entering `Completed` from another status deducts the job's parts and
    /// frees its technician; any other status puts an assigned technician on
    /// a call. Repeating `Completed` deducts nothing.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::NotFound`] when the job, a used part, or
    /// the assigned technician does not exist, or a storage error from the
    /// backend.
    #[tracing::instrument(skip(self))]
    pub fn update_job_status(
        &mut self,
        id: &JobId,
        status: JobStatus,
    ) -> Result<Job, FieldServiceError> {
        self.transact(|snapshot| {
            apply_status(snapshot, id, status)?;
            Ok(job_in(snapshot, id)?.clone())
        })
    }

    /// Save a job's status and notes together, with the same completion
    /// rules as [`update_job_status`](Self::update_job_status).
    ///
    /// # Errors
    ///
    /// Same as [`update_job_status`](Self::update_job_status).
    #[tracing::instrument(skip(self, notes))]
    pub fn save_job(
        &mut self,
        id: &JobId,
        status: JobStatus,
        notes: String,
    ) -> Result<Job, FieldServiceError> {
        self.transact(|snapshot| {
            job_mut_in(snapshot, id)?.notes = notes;
            apply_status(snapshot, id, status)?;
            Ok(job_in(snapshot, id)?.clone())
        })
    }

    /// Assign a technician to a job, or clear the assignment with `None`.
    ///
    /// Both the previously assigned and the newly assigned technician are
    /// re-derived.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::NotFound`] when the job or technician
    /// does not exist, or a storage error from the backend.
    #[tracing::instrument(skip(self))]
    pub fn assign_technician(
        &mut self,
        id: &JobId,
        tech: Option<TechnicianId>,
    ) -> Result<Job, FieldServiceError> {
        self.transact(|snapshot| {
            if let Some(missing) = tech.as_ref().filter(|t| snapshot.technician(t).is_none()) {
                return Err(FieldServiceError::not_found("Technician", missing));
            }
            let job = job_mut_in(snapshot, id)?;
            let previous = std::mem::replace(&mut job.assigned_tech, tech.clone());
            let job = job.clone();
            for affected in previous.iter().chain(tech.iter()) {
                sync_technician(snapshot, affected)?;
            }
            Ok(job)
        })
    }

    /// Record parts used on a job. Inventory is not touched until completion.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::NotFound`] when the job or part does not
    /// exist, [`FieldServiceError::Validation`] when `quantity` is zero, or a
    /// storage error from the backend.
    #[tracing::instrument(skip(self))]
    pub fn add_part_usage(
        &mut self,
        job_id: &JobId,
        part_id: &PartId,
        quantity: u32,
    ) -> Result<Job, FieldServiceError> {
        self.transact(|snapshot| {
            if snapshot.part(part_id).is_none() {
                return Err(FieldServiceError::not_found("InventoryItem", part_id));
            }
            let job = job_mut_in(snapshot, job_id)?;
            job.add_part_usage(part_id.clone(), quantity)?;
            Ok(job.clone())
        })
    }

    /// Remove the usage line for `part_id` from a job.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::NotFound`] when the job does not exist or
    /// has no line for `part_id`, or a storage error from the backend.
    #[tracing::instrument(skip(self))]
    pub fn remove_part_usage(
        &mut self,
        job_id: &JobId,
        part_id: &PartId,
    ) -> Result<Job, FieldServiceError> {
        self.transact(|snapshot| {
            let job = job_mut_in(snapshot, job_id)?;
            if !job.remove_part_usage(part_id) {
                return Err(FieldServiceError::not_found("PartUsage", part_id));
            }
            Ok(job.clone())
        })
    }

    /// Append a photo to a job.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::NotFound`] when the job does not exist, or
    /// a storage error from the backend.
    #[tracing::instrument(skip(self, photo), fields(photo = %photo))]
    pub fn attach_job_photo(&mut self, id: &JobId, photo: Photo) -> Result<Job, FieldServiceError> {
        self.transact(|snapshot| {
            let job = job_mut_in(snapshot, id)?;
            job.photos.push(photo);
            Ok(job.clone())
        })
    }

    /// Look up a job by id.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::NotFound`] when no job with `id` exists.
    pub fn job(&self, id: &JobId) -> Result<&Job, FieldServiceError> {
        job_in(&self.snapshot, id)
    }

    /// All jobs, in creation order.
    #[must_use]
    pub fn jobs(&self) -> &[Job] {
        &self.snapshot.jobs
    }

    /// Jobs scheduled on `date`.
    #[must_use]
    pub fn find_jobs_by_date(&self, date: NaiveDate) -> Vec<&Job> {
        self.snapshot.jobs.iter().filter(|job| job.date == date).collect()
    }
}

fn job_in<'a>(snapshot: &'a Snapshot, id: &JobId) -> Result<&'a Job, FieldServiceError> {
    snapshot
        .job(id)
        .ok_or_else(|| FieldServiceError::not_found("Job", id))
}

fn job_mut_in<'a>(snapshot: &'a mut Snapshot, id: &JobId) -> Result<&'a mut Job, FieldServiceError> {
    snapshot
        .job_mut(id)
        .ok_or_else(|| FieldServiceError::not_found("Job", id))
}

fn sync_technician(snapshot: &mut Snapshot, tech: &TechnicianId) -> Result<(), FieldServiceError> {
    let status = snapshot
        .sync_technician(tech)
        .ok_or_else(|| FieldServiceError::not_found("Technician", tech))?;
    tracing::debug!(technician = %tech, %status, "technician status derived");
    Ok(())
}

fn apply_status(snapshot: &mut Snapshot, id: &JobId, status: JobStatus) -> Result<(), FieldServiceError> {
    let job = job_mut_in(snapshot, id)?;
    let completing = job.set_status(status);
    let tech = job.assigned_tech.clone();
    let usages = if completing {
        job.parts_used.clone()
    } else {
        Vec::new()
    };

    for usage in usages {
        let item = snapshot
            .part_mut(&usage.part_id)
            .ok_or_else(|| FieldServiceError::not_found("InventoryItem", &usage.part_id))?;
        let before = item.quantity;
        if item.deduct(usage.quantity) {
            tracing::warn!(
                part_id = %usage.part_id,
                used = usage.quantity,
                on_hand = before,
                "job used more than on hand, clamped to zero"
            );
        }
        tracing::debug!(part_id = %usage.part_id, before, after = item.quantity, "inventory deducted");
    }

    if let Some(tech) = tech {
        sync_technician(snapshot, &tech)?;
    }
    Ok(())
}
