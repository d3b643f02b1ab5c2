use super::domain::{
    AccountId, Application, ApplicationId, ApplicationStatus, ApplicationSubmission,
    BusinessProfile, IndividualProfile, JobDraft, JobId, JobPost,
};

/// Job post table access.
pub trait JobRepository: Send + Sync {
    /// Store a new post owned by `company`, assigning its id and creation time.
    fn insert_job(
        &self,
        draft: JobDraft,
        company: &AccountId,
        company_name: &str,
    ) -> Result<JobPost, RepositoryError>;
    fn fetch_job(&self, id: JobId) -> Result<Option<JobPost>, RepositoryError>;
    fn update_job(&self, job: JobPost) -> Result<(), RepositoryError>;
    fn delete_job(&self, id: JobId) -> Result<(), RepositoryError>;
    /// Posts owned by `company`, newest first.
    fn jobs_by_company(&self, company: &AccountId) -> Result<Vec<JobPost>, RepositoryError>;
    /// Most recent posts across all companies, newest first.
    fn recent_jobs(&self, limit: usize) -> Result<Vec<JobPost>, RepositoryError>;
}

/// Application table access.
pub trait ApplicationRepository: Send + Sync {
    fn insert_application(
        &self,
        job_id: JobId,
        applicant: &AccountId,
        submission: ApplicationSubmission,
    ) -> Result<Application, RepositoryError>;
    fn fetch_application(&self, id: ApplicationId)
        -> Result<Option<Application>, RepositoryError>;
    /// Applications for one job, oldest first.
    fn applications_for_job(&self, job_id: JobId) -> Result<Vec<Application>, RepositoryError>;
    fn set_application_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), RepositoryError>;
}

/// Business and individual profile tables.
pub trait ProfileRepository: Send + Sync {
    fn business_by_id(&self, id: &AccountId) -> Result<Option<BusinessProfile>, RepositoryError>;
    fn business_by_name(&self, name: &str) -> Result<Option<BusinessProfile>, RepositoryError>;
    fn profile_by_user(
        &self,
        user_id: &AccountId,
    ) -> Result<Option<IndividualProfile>, RepositoryError>;
    fn upsert_business(&self, profile: BusinessProfile) -> Result<(), RepositoryError>;
    fn upsert_profile(&self, profile: IndividualProfile) -> Result<(), RepositoryError>;
}

/// Everything the job board service reads and writes.
pub trait BoardStore: JobRepository + ApplicationRepository + ProfileRepository {}

impl<T> BoardStore for T where T: JobRepository + ApplicationRepository + ProfileRepository {}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
