use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::warn;

use super::domain::{split_list, AccountId, ApplicationId, ApplicationSubmission, JobDraft, JobId};
use super::identity::{CurrentAccount, MaybeAccount};
use super::repository::BoardStore;
use super::service::{BoardError, JobBoardService, MISSING_JOB};
use super::views::{
    render_page, ApplicantsPage, ApplyPage, BusinessCardPage, ConfirmDeletePage, ErrorPage,
    JobDetailsPage, JobFormPage, JobFormValues, JobListPage, ProfileCardPage,
};
use crate::config::BoardConfig;

const MY_POSTS_REFRESHED: &str = "/my-job-posts?refresh=true";

/// Shared handler state: the service plus board settings.
pub struct BoardState<S> {
    pub service: Arc<JobBoardService<S>>,
    pub settings: Arc<BoardConfig>,
}

impl<S> Clone for BoardState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            settings: Arc::clone(&self.settings),
        }
    }
}

/// Router builder exposing the board pages.
pub fn board_router<S>(service: Arc<JobBoardService<S>>, settings: BoardConfig) -> Router
where
    S: BoardStore + 'static,
{
    let state = BoardState {
        service,
        settings: Arc::new(settings),
    };

    Router::new()
        .route("/jobs", get(listing_handler::<S>).post(create_job_handler::<S>))
        .route("/jobs/new", get(new_job_form_handler::<S>))
        .route("/job-details/:job_id", get(job_details_handler::<S>))
        .route("/my-job-posts", get(my_job_posts_handler::<S>))
        .route(
            "/edit-job/:job_id",
            get(edit_job_form_handler::<S>).post(update_job_handler::<S>),
        )
        .route(
            "/my-job-posts/:job_id/delete",
            get(confirm_delete_handler::<S>).post(delete_job_handler::<S>),
        )
        .route(
            "/my-job-posts/:job_id/applicants",
            get(applicants_handler::<S>),
        )
        .route(
            "/applications/:application_id/approve",
            post(approve_handler::<S>),
        )
        .route(
            "/apply-now",
            get(apply_form_handler::<S>).post(apply_handler::<S>),
        )
        .route("/business-profile", get(business_profile_handler::<S>))
        .route("/business/:business_name", get(public_business_handler::<S>))
        .route("/profile/:user_id", get(public_profile_handler::<S>))
        .route("/login-redirect", get(login_redirect_handler::<S>))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListingQuery {
    limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RefreshQuery {
    #[serde(default)]
    refresh: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DetailsQuery {
    #[serde(default)]
    applied: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApplicantsQuery {
    approved: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApplyQuery {
    job: Option<i64>,
}

fn flag_set(value: Option<&str>) -> bool {
    matches!(value, Some("true") | Some("1"))
}

/// Job form fields as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct JobForm {
    #[serde(default)]
    profession: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    job_type: String,
    #[serde(default)]
    salary: String,
    #[serde(default)]
    experience: String,
    #[serde(default)]
    skills: String,
    #[serde(default)]
    contact: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    website: String,
    #[serde(default)]
    deadline: String,
}

impl JobForm {
    fn values(&self) -> JobFormValues {
        JobFormValues {
            profession: self.profession.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            job_type: self.job_type.clone(),
            salary: self.salary.clone(),
            experience: self.experience.clone(),
            skills: self.skills.clone(),
            contact: self.contact.clone(),
            email: self.email.clone(),
            website: self.website.clone(),
            deadline: self.deadline.clone(),
        }
    }

    fn into_draft(self) -> Result<JobDraft, BoardError> {
        let deadline = parse_deadline(&self.deadline)?;
        let skills = split_list(&self.skills);
        Ok(JobDraft {
            profession: self.profession.trim().to_string(),
            description: non_empty(self.description),
            location: self.location.trim().to_string(),
            job_type: split_list(&self.job_type),
            salary: self.salary.trim().to_string(),
            experience: non_empty(self.experience),
            skills: (!skills.is_empty()).then_some(skills),
            contact: non_empty(self.contact),
            email: non_empty(self.email),
            website: non_empty(self.website),
            deadline,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApplyForm {
    job_id: i64,
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    resume_url: String,
    #[serde(default)]
    cover_letter_url: String,
}

impl ApplyForm {
    fn into_submission(self) -> (JobId, ApplicationSubmission) {
        (
            JobId(self.job_id),
            ApplicationSubmission {
                full_name: self.full_name.trim().to_string(),
                email: self.email.trim().to_string(),
                phone: non_empty(self.phone),
                resume_url: non_empty(self.resume_url),
                cover_letter_url: non_empty(self.cover_letter_url),
            },
        )
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Date inputs post `YYYY-MM-DD`; an empty field means no deadline.
pub(crate) fn parse_deadline(raw: &str) -> Result<Option<NaiveDate>, BoardError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| BoardError::Validation(format!("Invalid deadline date: {raw}")))
}

pub(crate) fn error_status(error: &BoardError) -> StatusCode {
    match error {
        BoardError::NotFound(_) => StatusCode::NOT_FOUND,
        BoardError::Forbidden(_) => StatusCode::FORBIDDEN,
        BoardError::InvalidTransition { .. } | BoardError::Validation(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        BoardError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: BoardError) -> Response {
    let status = error_status(&error);
    if status.is_server_error() {
        tracing::error!(error = %error, "board operation failed");
    } else {
        warn!(status = status.as_u16(), error = %error, "board request rejected");
    }
    render_page(status, ErrorPage::new(error.to_string()))
}

pub(crate) async fn listing_handler<S>(
    State(state): State<BoardState<S>>,
    MaybeAccount(viewer): MaybeAccount,
    Query(query): Query<ListingQuery>,
) -> Response
where
    S: BoardStore + 'static,
{
    let cap = state.settings.listing_limit;
    let limit = query.limit.unwrap_or(cap).min(cap);
    match state.service.job_listing(viewer.as_ref(), limit) {
        Ok(jobs) => render_page(StatusCode::OK, JobListPage::listing(&jobs, Utc::now())),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn job_details_handler<S>(
    State(state): State<BoardState<S>>,
    Path(job_id): Path<i64>,
    Query(query): Query<DetailsQuery>,
) -> Response
where
    S: BoardStore + 'static,
{
    match state.service.job_details(JobId(job_id)) {
        Ok(job) => {
            let notice = flag_set(query.applied.as_deref())
                .then(|| "Application submitted!".to_string());
            render_page(StatusCode::OK, JobDetailsPage::new(&job, notice, Utc::now()))
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn my_job_posts_handler<S>(
    State(state): State<BoardState<S>>,
    CurrentAccount(account): CurrentAccount,
    Query(query): Query<RefreshQuery>,
) -> Response
where
    S: BoardStore + 'static,
{
    match state.service.my_job_posts(&account) {
        Ok(jobs) => {
            let refreshed = flag_set(query.refresh.as_deref());
            render_page(
                StatusCode::OK,
                JobListPage::my_posts(&jobs, refreshed, Utc::now()),
            )
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn new_job_form_handler<S>(
    State(_state): State<BoardState<S>>,
    CurrentAccount(_account): CurrentAccount,
) -> Response
where
    S: BoardStore + 'static,
{
    render_page(
        StatusCode::OK,
        JobFormPage::create(JobFormValues::default(), None),
    )
}

pub(crate) async fn create_job_handler<S>(
    State(state): State<BoardState<S>>,
    CurrentAccount(account): CurrentAccount,
    Form(form): Form<JobForm>,
) -> Response
where
    S: BoardStore + 'static,
{
    let values = form.values();
    let result = form
        .into_draft()
        .and_then(|draft| state.service.create_job(&account, draft));

    match result {
        Ok(_) => Redirect::to(MY_POSTS_REFRESHED).into_response(),
        Err(BoardError::Validation(message)) => render_page(
            StatusCode::UNPROCESSABLE_ENTITY,
            JobFormPage::create(values, Some(message)),
        ),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn edit_job_form_handler<S>(
    State(state): State<BoardState<S>>,
    CurrentAccount(account): CurrentAccount,
    Path(job_id): Path<i64>,
) -> Response
where
    S: BoardStore + 'static,
{
    match state.service.job_for_edit(&account, JobId(job_id)) {
        Ok(job) => {
            let values = JobFormValues::from(&JobDraft::from(&job));
            render_page(StatusCode::OK, JobFormPage::edit(job_id, values, None))
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_job_handler<S>(
    State(state): State<BoardState<S>>,
    CurrentAccount(account): CurrentAccount,
    Path(job_id): Path<i64>,
    Form(form): Form<JobForm>,
) -> Response
where
    S: BoardStore + 'static,
{
    let values = form.values();
    let result = form
        .into_draft()
        .and_then(|draft| state.service.update_job(&account, JobId(job_id), draft));

    match result {
        Ok(_) => Redirect::to(MY_POSTS_REFRESHED).into_response(),
        Err(BoardError::Validation(message)) => render_page(
            StatusCode::UNPROCESSABLE_ENTITY,
            JobFormPage::edit(job_id, values, Some(message)),
        ),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn confirm_delete_handler<S>(
    State(state): State<BoardState<S>>,
    CurrentAccount(account): CurrentAccount,
    Path(job_id): Path<i64>,
) -> Response
where
    S: BoardStore + 'static,
{
    match state.service.job_for_edit(&account, JobId(job_id)) {
        Ok(job) => render_page(
            StatusCode::OK,
            ConfirmDeletePage {
                job_id,
                profession: job.profession,
            },
        ),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_job_handler<S>(
    State(state): State<BoardState<S>>,
    CurrentAccount(account): CurrentAccount,
    Path(job_id): Path<i64>,
) -> Response
where
    S: BoardStore + 'static,
{
    match state.service.delete_job(&account, JobId(job_id)) {
        Ok(()) => Redirect::to(MY_POSTS_REFRESHED).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn applicants_handler<S>(
    State(state): State<BoardState<S>>,
    CurrentAccount(account): CurrentAccount,
    Path(job_id): Path<i64>,
    Query(query): Query<ApplicantsQuery>,
) -> Response
where
    S: BoardStore + 'static,
{
    match state.service.job_applicants(&account, JobId(job_id)) {
        Ok(loaded) => {
            let notice = query.approved.map(|_| "Applicant approved!".to_string());
            render_page(
                StatusCode::OK,
                ApplicantsPage::new(&loaded.job, &loaded.applications, notice),
            )
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn approve_handler<S>(
    State(state): State<BoardState<S>>,
    CurrentAccount(account): CurrentAccount,
    Path(application_id): Path<i64>,
) -> Response
where
    S: BoardStore + 'static,
{
    match state
        .service
        .approve_application(&account, ApplicationId(application_id))
    {
        Ok(application) => Redirect::to(&format!(
            "/my-job-posts/{}/applicants?approved={}",
            application.job_id, application.id
        ))
        .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn apply_form_handler<S>(
    State(state): State<BoardState<S>>,
    CurrentAccount(_account): CurrentAccount,
    Query(query): Query<ApplyQuery>,
) -> Response
where
    S: BoardStore + 'static,
{
    let Some(job_id) = query.job else {
        return error_response(BoardError::NotFound(MISSING_JOB.to_string()));
    };
    match state.service.job_details(JobId(job_id)) {
        Ok(job) => render_page(StatusCode::OK, ApplyPage::new(&job, None)),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn apply_handler<S>(
    State(state): State<BoardState<S>>,
    CurrentAccount(account): CurrentAccount,
    Form(form): Form<ApplyForm>,
) -> Response
where
    S: BoardStore + 'static,
{
    let (job_id, submission) = form.into_submission();
    match state.service.apply(&account, job_id, submission) {
        Ok(_) => Redirect::to(&format!("/job-details/{job_id}?applied=true")).into_response(),
        Err(BoardError::Validation(message)) => match state.service.job_details(job_id) {
            Ok(job) => render_page(
                StatusCode::UNPROCESSABLE_ENTITY,
                ApplyPage::new(&job, Some(message)),
            ),
            Err(error) => error_response(error),
        },
        Err(error) => error_response(error),
    }
}

pub(crate) async fn business_profile_handler<S>(
    State(state): State<BoardState<S>>,
    CurrentAccount(account): CurrentAccount,
) -> Response
where
    S: BoardStore + 'static,
{
    match state.service.business_profile(&account) {
        Ok(profile) => render_page(StatusCode::OK, BusinessCardPage::owner(&profile)),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn public_business_handler<S>(
    State(state): State<BoardState<S>>,
    Path(business_name): Path<String>,
) -> Response
where
    S: BoardStore + 'static,
{
    match state.service.public_business(&business_name) {
        Ok(profile) => render_page(StatusCode::OK, BusinessCardPage::public(&profile)),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn public_profile_handler<S>(
    State(state): State<BoardState<S>>,
    Path(user_id): Path<String>,
) -> Response
where
    S: BoardStore + 'static,
{
    match state.service.public_profile(&AccountId(user_id)) {
        Ok(profile) => render_page(StatusCode::OK, ProfileCardPage::from(&profile)),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn login_redirect_handler<S>(
    State(state): State<BoardState<S>>,
    MaybeAccount(account): MaybeAccount,
) -> Response
where
    S: BoardStore + 'static,
{
    match account {
        Some(_) => Redirect::to(&state.settings.landing_route).into_response(),
        None => Redirect::to("/login").into_response(),
    }
}
