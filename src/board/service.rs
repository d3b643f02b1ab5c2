use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{
    AccountId, Application, ApplicationId, ApplicationStatus, ApplicationSubmission,
    BusinessProfile, IndividualProfile, JobDraft, JobId, JobPost,
};
use super::repository::{BoardStore, RepositoryError};

pub(crate) const MISSING_JOB: &str = "Job post not found.";
pub(crate) const APPLICANTS_FORBIDDEN: &str =
    "Job not found or you don't have permission to view applicants for this job.";
pub(crate) const JOB_FORBIDDEN: &str = "You don't have permission to modify this job post.";
pub(crate) const MISSING_APPLICATION: &str = "Application not found.";
pub(crate) const MISSING_BUSINESS: &str = "Business profile not found.";
pub(crate) const MISSING_PROFILE: &str = "Profile not found";

/// A job post and its applications, loaded for the owning business.
#[derive(Debug, Clone)]
pub struct JobApplicants {
    pub job: JobPost,
    pub applications: Vec<Application>,
}

/// One listing entry with the viewer's skills that the post asks for.
#[derive(Debug, Clone)]
pub struct ListedJob {
    pub job: JobPost,
    pub matching_skills: Vec<String>,
}

/// Page-level operations over the board store. Every method is at most two
/// sequential store calls.
pub struct JobBoardService<S> {
    store: Arc<S>,
}

impl<S> Clone for JobBoardService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> JobBoardService<S>
where
    S: BoardStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Jobs owned by the account, newest first.
    pub fn my_job_posts(&self, account: &AccountId) -> Result<Vec<JobPost>, BoardError> {
        let jobs = self.store.jobs_by_company(account)?;
        debug!(%account, count = jobs.len(), "loaded job posts");
        Ok(jobs)
    }

    pub fn job_details(&self, id: JobId) -> Result<JobPost, BoardError> {
        self.store
            .fetch_job(id)?
            .ok_or_else(|| BoardError::NotFound(MISSING_JOB.to_string()))
    }

    /// Load a job so its edit form (or delete prompt) can be shown to its owner.
    pub fn job_for_edit(&self, account: &AccountId, id: JobId) -> Result<JobPost, BoardError> {
        self.owned_job(account, id)
    }

    pub fn create_job(&self, account: &AccountId, draft: JobDraft) -> Result<JobPost, BoardError> {
        validate_draft(&draft)?;
        let company_name = self
            .store
            .business_by_id(account)?
            .map(|business| business.business_name)
            .unwrap_or_default();

        let job = self.store.insert_job(draft, account, &company_name)?;
        info!(%account, job_id = %job.id, "job post created");
        Ok(job)
    }

    pub fn update_job(
        &self,
        account: &AccountId,
        id: JobId,
        draft: JobDraft,
    ) -> Result<JobPost, BoardError> {
        validate_draft(&draft)?;
        let mut job = self.owned_job(account, id)?;
        job.apply_draft(draft);
        self.store.update_job(job.clone())?;
        info!(%account, job_id = %id, "job post updated");
        Ok(job)
    }

    pub fn delete_job(&self, account: &AccountId, id: JobId) -> Result<(), BoardError> {
        self.owned_job(account, id)?;
        self.store.delete_job(id)?;
        info!(%account, job_id = %id, "job post deleted");
        Ok(())
    }

    /// Applications for a job, oldest first, visible only to the owning business.
    pub fn job_applicants(
        &self,
        account: &AccountId,
        job_id: JobId,
    ) -> Result<JobApplicants, BoardError> {
        let job = match self.store.fetch_job(job_id)? {
            Some(job) if job.is_owned_by(account) => job,
            _ => return Err(BoardError::Forbidden(APPLICANTS_FORBIDDEN.to_string())),
        };

        let applications = self.store.applications_for_job(job_id)?;
        debug!(%account, job_id = %job_id, count = applications.len(), "loaded applicants");
        Ok(JobApplicants { job, applications })
    }

    /// Move a pending application to approved. Returns the updated row.
    pub fn approve_application(
        &self,
        account: &AccountId,
        application_id: ApplicationId,
    ) -> Result<Application, BoardError> {
        let mut application = self
            .store
            .fetch_application(application_id)?
            .ok_or_else(|| BoardError::NotFound(MISSING_APPLICATION.to_string()))?;

        let owns_job = self
            .store
            .fetch_job(application.job_id)?
            .is_some_and(|job| job.is_owned_by(account));
        if !owns_job {
            return Err(BoardError::Forbidden(APPLICANTS_FORBIDDEN.to_string()));
        }

        if application.status != ApplicationStatus::Pending {
            return Err(BoardError::InvalidTransition {
                from: application.status,
                to: ApplicationStatus::Approved,
            });
        }

        self.store
            .set_application_status(application_id, ApplicationStatus::Approved)?;
        application.status = ApplicationStatus::Approved;
        info!(
            %account,
            application_id = %application_id,
            job_id = %application.job_id,
            "applicant approved"
        );
        Ok(application)
    }

    pub fn apply(
        &self,
        applicant: &AccountId,
        job_id: JobId,
        submission: ApplicationSubmission,
    ) -> Result<Application, BoardError> {
        if submission.full_name.trim().is_empty() || submission.email.trim().is_empty() {
            return Err(BoardError::Validation(
                "Full name and email are required.".to_string(),
            ));
        }
        self.job_details(job_id)?;

        let application = self
            .store
            .insert_application(job_id, applicant, submission)?;
        info!(
            applicant = %applicant,
            job_id = %job_id,
            application_id = %application.id,
            "application submitted"
        );
        Ok(application)
    }

    pub fn business_profile(&self, account: &AccountId) -> Result<BusinessProfile, BoardError> {
        self.store
            .business_by_id(account)?
            .ok_or_else(|| BoardError::NotFound(MISSING_BUSINESS.to_string()))
    }

    /// Public lookup by exact business name. No identity is required.
    pub fn public_business(&self, name: &str) -> Result<BusinessProfile, BoardError> {
        self.store
            .business_by_name(name)?
            .ok_or_else(|| BoardError::NotFound(MISSING_BUSINESS.to_string()))
    }

    pub fn public_profile(&self, user_id: &AccountId) -> Result<IndividualProfile, BoardError> {
        self.store
            .profile_by_user(user_id)?
            .ok_or_else(|| BoardError::NotFound(MISSING_PROFILE.to_string()))
    }

    /// Recent jobs, each annotated with the viewer's matching skills when the
    /// viewer has an individual profile.
    pub fn job_listing(
        &self,
        viewer: Option<&AccountId>,
        limit: usize,
    ) -> Result<Vec<ListedJob>, BoardError> {
        let viewer_skills: HashSet<String> = match viewer {
            Some(account) => self
                .store
                .profile_by_user(account)?
                .map(|profile| profile.normalized_skills().into_iter().collect())
                .unwrap_or_default(),
            None => HashSet::new(),
        };

        let jobs = self.store.recent_jobs(limit)?;
        Ok(jobs
            .into_iter()
            .map(|job| {
                let matching_skills: BTreeSet<String> = job
                    .skills
                    .iter()
                    .flatten()
                    .map(|skill| skill.to_lowercase())
                    .filter(|skill| viewer_skills.contains(skill))
                    .collect();
                ListedJob {
                    job,
                    matching_skills: matching_skills.into_iter().collect(),
                }
            })
            .collect())
    }

    fn owned_job(&self, account: &AccountId, id: JobId) -> Result<JobPost, BoardError> {
        let job = self.job_details(id)?;
        if !job.is_owned_by(account) {
            return Err(BoardError::Forbidden(JOB_FORBIDDEN.to_string()));
        }
        Ok(job)
    }
}

fn validate_draft(draft: &JobDraft) -> Result<(), BoardError> {
    let mut missing = Vec::new();
    if draft.profession.trim().is_empty() {
        missing.push("profession");
    }
    if draft.location.trim().is_empty() {
        missing.push("location");
    }
    if draft.salary.trim().is_empty() {
        missing.push("salary");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(BoardError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Error raised by board operations. `Display` is the message shown to users.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("Application is already {from}; only pending applications can become {to}.")]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
