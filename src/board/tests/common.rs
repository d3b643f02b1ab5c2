use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;

use crate::board::domain::{
    AccountId, Application, ApplicationId, ApplicationStatus, ApplicationSubmission,
    BusinessProfile, IndividualProfile, JobDraft, JobId, JobPost, SocialLinks,
};
use crate::board::identity::ACCOUNT_HEADER;
use crate::board::memory::MemoryStore;
use crate::board::repository::{
    ApplicationRepository, JobRepository, ProfileRepository, RepositoryError,
};
use crate::board::{board_router, JobBoardService};
use crate::config::BoardConfig;

pub(super) const OWNER: &str = "biz-1";
pub(super) const STRANGER: &str = "biz-2";
pub(super) const APPLICANT: &str = "user-1";

pub(super) fn account(id: &str) -> AccountId {
    AccountId(id.to_string())
}

pub(super) fn draft(profession: &str) -> JobDraft {
    JobDraft {
        profession: profession.to_string(),
        description: Some("Prepare and plate dishes for a busy lunch service.".to_string()),
        location: "Mumbai".to_string(),
        job_type: vec!["Full-time".to_string()],
        salary: "35,000".to_string(),
        experience: Some("2+ years".to_string()),
        skills: Some(vec![
            "Rust".to_string(),
            "SQL".to_string(),
            "Excel".to_string(),
        ]),
        contact: Some("Priya".to_string()),
        email: Some("jobs@acme.example".to_string()),
        website: None,
        deadline: None,
    }
}

pub(super) fn submission(full_name: &str) -> ApplicationSubmission {
    ApplicationSubmission {
        full_name: full_name.to_string(),
        email: "applicant@example.com".to_string(),
        phone: Some("+91 99999 00000".to_string()),
        resume_url: Some("https://files.example.com/resume.pdf".to_string()),
        cover_letter_url: None,
    }
}

pub(super) fn business() -> BusinessProfile {
    BusinessProfile {
        id: account(OWNER),
        business_name: "Acme Foods".to_string(),
        industry: Some("Food & Beverage".to_string()),
        logo_url: None,
        website: Some("https://acme.example".to_string()),
        summary: Some("Cloud kitchen serving three cities.".to_string()),
        mobile: Some("+91 98000 12345".to_string()),
        whatsapp: None,
        email: Some("hello@acme.example".to_string()),
        social: SocialLinks {
            linkedin: Some("https://linkedin.com/company/acme".to_string()),
            ..SocialLinks::default()
        },
        created_at: None,
    }
}

pub(super) fn individual() -> IndividualProfile {
    IndividualProfile {
        user_id: account(APPLICANT),
        name: "Kiran Rao".to_string(),
        profession: Some("Data Analyst".to_string()),
        logo_url: None,
        experience: Some(4),
        skills: Some("rust, sql, Tableau".to_string()),
        languages: Some("English, Kannada".to_string()),
        address: None,
        summary: None,
        mobile: None,
        whatsapp: None,
        email: Some("kiran@example.com".to_string()),
        website: None,
        social: SocialLinks::default(),
    }
}

/// Service over a store seeded with the owner's business and the applicant's profile.
pub(super) fn build_service() -> (JobBoardService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    store
        .upsert_business(business())
        .expect("business seeded");
    store
        .upsert_profile(individual())
        .expect("profile seeded");
    (JobBoardService::new(store.clone()), store)
}

pub(super) fn board_app(service: JobBoardService<MemoryStore>) -> Router {
    board_router(Arc::new(service), BoardConfig::default())
}

pub(super) fn get(uri: &str, account: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(id) = account {
        builder = builder.header(ACCOUNT_HEADER, id);
    }
    builder.body(Body::empty()).expect("request builds")
}

pub(super) fn post_form(uri: &str, account: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::post(uri).header(
        header::CONTENT_TYPE,
        "application/x-www-form-urlencoded",
    );
    if let Some(id) = account {
        builder = builder.header(ACCOUNT_HEADER, id);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

pub(super) async fn read_body(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

pub(super) fn location(response: &Response) -> &str {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
}

/// Store whose every call fails as if the backend were down.
#[derive(Default, Clone)]
pub(super) struct UnavailableStore;

fn unavailable<T>() -> Result<T, RepositoryError> {
    Err(RepositoryError::Unavailable("connection refused".to_string()))
}

impl JobRepository for UnavailableStore {
    fn insert_job(
        &self,
        _draft: JobDraft,
        _company: &AccountId,
        _company_name: &str,
    ) -> Result<JobPost, RepositoryError> {
        unavailable()
    }

    fn fetch_job(&self, _id: JobId) -> Result<Option<JobPost>, RepositoryError> {
        unavailable()
    }

    fn update_job(&self, _job: JobPost) -> Result<(), RepositoryError> {
        unavailable()
    }

    fn delete_job(&self, _id: JobId) -> Result<(), RepositoryError> {
        unavailable()
    }

    fn jobs_by_company(&self, _company: &AccountId) -> Result<Vec<JobPost>, RepositoryError> {
        unavailable()
    }

    fn recent_jobs(&self, _limit: usize) -> Result<Vec<JobPost>, RepositoryError> {
        unavailable()
    }
}

impl ApplicationRepository for UnavailableStore {
    fn insert_application(
        &self,
        _job_id: JobId,
        _applicant: &AccountId,
        _submission: ApplicationSubmission,
    ) -> Result<Application, RepositoryError> {
        unavailable()
    }

    fn fetch_application(
        &self,
        _id: ApplicationId,
    ) -> Result<Option<Application>, RepositoryError> {
        unavailable()
    }

    fn applications_for_job(&self, _job_id: JobId) -> Result<Vec<Application>, RepositoryError> {
        unavailable()
    }

    fn set_application_status(
        &self,
        _id: ApplicationId,
        _status: ApplicationStatus,
    ) -> Result<(), RepositoryError> {
        unavailable()
    }
}

impl ProfileRepository for UnavailableStore {
    fn business_by_id(&self, _id: &AccountId) -> Result<Option<BusinessProfile>, RepositoryError> {
        unavailable()
    }

    fn business_by_name(&self, _name: &str) -> Result<Option<BusinessProfile>, RepositoryError> {
        unavailable()
    }

    fn profile_by_user(
        &self,
        _user_id: &AccountId,
    ) -> Result<Option<IndividualProfile>, RepositoryError> {
        unavailable()
    }

    fn upsert_business(&self, _profile: BusinessProfile) -> Result<(), RepositoryError> {
        unavailable()
    }

    fn upsert_profile(&self, _profile: IndividualProfile) -> Result<(), RepositoryError> {
        unavailable()
    }
}
