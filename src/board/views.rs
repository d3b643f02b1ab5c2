//! View models for the board pages.
//!
//! Handlers never build markup themselves: they map domain rows into the
//! structs below and render them through the askama templates under
//! `templates/`. All conditional-rendering rules live here so they can be
//! tested without going through HTTP.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::domain::{
    Application, ApplicationStatus, BusinessProfile, IndividualProfile, JobDraft, JobPost,
    SocialLinks,
};
use super::format::{
    avatar_initial, format_date, format_deadline, format_posted, format_salary,
    skill_match_label, truncate_description, SKILL_PREVIEW_COUNT,
};
use super::service::ListedJob;

/// Which affordances a job card exposes. Callers decide per page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardActions {
    pub show_edit: bool,
    pub show_delete: bool,
    pub show_view_applicants: bool,
    pub hide_apply: bool,
}

impl CardActions {
    /// Public listing: details and apply only.
    pub const fn public() -> Self {
        Self {
            show_edit: false,
            show_delete: false,
            show_view_applicants: false,
            hide_apply: false,
        }
    }

    /// Owner listing: manage the post, never apply to it.
    pub const fn owner() -> Self {
        Self {
            show_edit: true,
            show_delete: true,
            show_view_applicants: true,
            hide_apply: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillChip {
    pub name: String,
    pub matched: bool,
}

#[derive(Debug, Clone)]
pub struct JobCardView {
    pub id: i64,
    pub profession: String,
    pub company_name: String,
    pub posted: String,
    pub deadline: Option<String>,
    pub description: Option<String>,
    pub location: String,
    pub salary: String,
    pub experience: Option<String>,
    pub job_types: Vec<String>,
    pub skills: Vec<SkillChip>,
    pub more_skills: Option<String>,
    pub match_label: Option<String>,
    pub show_edit: bool,
    pub show_delete: bool,
    pub show_view_applicants: bool,
    pub show_apply: bool,
}

impl JobCardView {
    pub fn new(
        job: &JobPost,
        matching_skills: &[String],
        actions: CardActions,
        now: DateTime<Utc>,
    ) -> Self {
        let all_skills = job.skills.as_deref().unwrap_or_default();
        let skills = all_skills
            .iter()
            .take(SKILL_PREVIEW_COUNT)
            .map(|skill| SkillChip {
                name: skill.clone(),
                matched: matching_skills.contains(&skill.to_lowercase()),
            })
            .collect();
        let more_skills = (all_skills.len() > SKILL_PREVIEW_COUNT)
            .then(|| format!("+{} more", all_skills.len() - SKILL_PREVIEW_COUNT));
        let match_label =
            (!matching_skills.is_empty()).then(|| skill_match_label(matching_skills.len()));

        Self {
            id: job.id.0,
            profession: job.profession.clone(),
            company_name: company_label(&job.company_name),
            posted: format_posted(job.created_at, now),
            deadline: job.deadline.map(format_deadline),
            description: job.description.as_deref().map(truncate_description),
            location: job.location.clone(),
            salary: format_salary(&job.salary),
            experience: job.experience.clone(),
            job_types: job.job_type.clone(),
            skills,
            more_skills,
            match_label,
            show_edit: actions.show_edit,
            show_delete: actions.show_delete,
            show_view_applicants: actions.show_view_applicants,
            show_apply: !actions.hide_apply,
        }
    }
}

fn company_label(name: &str) -> String {
    if name.trim().is_empty() {
        "Not specified".to_string()
    } else {
        name.to_string()
    }
}

#[derive(Template)]
#[template(path = "job_list.html")]
pub struct JobListPage {
    pub heading: String,
    pub notice: Option<String>,
    pub cards: Vec<JobCardView>,
    pub empty_title: String,
    pub empty_message: String,
    pub show_post_button: bool,
}

impl JobListPage {
    /// Cards for the owning business, with a notice when the page was reached
    /// through a refresh signal.
    pub fn my_posts(jobs: &[JobPost], refreshed: bool, now: DateTime<Utc>) -> Self {
        Self {
            heading: "My Job Posts".to_string(),
            notice: refreshed.then(|| "List refreshed.".to_string()),
            cards: jobs
                .iter()
                .map(|job| JobCardView::new(job, &[], CardActions::owner(), now))
                .collect(),
            empty_title: "No job posts found".to_string(),
            empty_message: "You haven't posted any jobs yet.".to_string(),
            show_post_button: true,
        }
    }

    pub fn listing(jobs: &[ListedJob], now: DateTime<Utc>) -> Self {
        Self {
            heading: "Latest Jobs".to_string(),
            notice: None,
            cards: jobs
                .iter()
                .map(|listed| {
                    JobCardView::new(
                        &listed.job,
                        &listed.matching_skills,
                        CardActions::public(),
                        now,
                    )
                })
                .collect(),
            empty_title: "No jobs posted yet".to_string(),
            empty_message: "Check back soon for new openings.".to_string(),
            show_post_button: false,
        }
    }
}

#[derive(Template)]
#[template(path = "job_details.html")]
pub struct JobDetailsPage {
    pub id: i64,
    pub profession: String,
    pub company_name: String,
    pub posted: String,
    pub deadline: Option<String>,
    pub description: Option<String>,
    pub location: String,
    pub salary: String,
    pub experience: Option<String>,
    pub job_types: Vec<String>,
    pub skills: Vec<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub notice: Option<String>,
}

impl JobDetailsPage {
    pub fn new(job: &JobPost, notice: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: job.id.0,
            profession: job.profession.clone(),
            company_name: company_label(&job.company_name),
            posted: format_posted(job.created_at, now),
            deadline: job.deadline.map(format_deadline),
            description: job.description.clone(),
            location: job.location.clone(),
            salary: format_salary(&job.salary),
            experience: job.experience.clone(),
            job_types: job.job_type.clone(),
            skills: job.skills.clone().unwrap_or_default(),
            contact: job.contact.clone(),
            email: job.email.clone(),
            website: job.website.clone(),
            notice,
        }
    }
}

/// Raw form values, echoed back into inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFormValues {
    pub profession: String,
    pub description: String,
    pub location: String,
    pub job_type: String,
    pub salary: String,
    pub experience: String,
    pub skills: String,
    pub contact: String,
    pub email: String,
    pub website: String,
    pub deadline: String,
}

impl From<&JobDraft> for JobFormValues {
    fn from(draft: &JobDraft) -> Self {
        Self {
            profession: draft.profession.clone(),
            description: draft.description.clone().unwrap_or_default(),
            location: draft.location.clone(),
            job_type: draft.job_type.join(", "),
            salary: draft.salary.clone(),
            experience: draft.experience.clone().unwrap_or_default(),
            skills: draft.skills.as_deref().map(|s| s.join(", ")).unwrap_or_default(),
            contact: draft.contact.clone().unwrap_or_default(),
            email: draft.email.clone().unwrap_or_default(),
            website: draft.website.clone().unwrap_or_default(),
            deadline: draft
                .deadline
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "job_form.html")]
pub struct JobFormPage {
    pub heading: String,
    pub action: String,
    pub submit_label: String,
    pub values: JobFormValues,
    pub error: Option<String>,
}

impl JobFormPage {
    pub fn create(values: JobFormValues, error: Option<String>) -> Self {
        Self {
            heading: "Post a New Job".to_string(),
            action: "/jobs".to_string(),
            submit_label: "Post Job".to_string(),
            values,
            error,
        }
    }

    pub fn edit(job_id: i64, values: JobFormValues, error: Option<String>) -> Self {
        Self {
            heading: "Edit Job Post".to_string(),
            action: format!("/edit-job/{job_id}"),
            submit_label: "Update Job".to_string(),
            values,
            error,
        }
    }
}

#[derive(Template)]
#[template(path = "confirm_delete.html")]
pub struct ConfirmDeletePage {
    pub job_id: i64,
    pub profession: String,
}

#[derive(Debug, Clone)]
pub struct ApplicantCardView {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub applied_on: String,
    pub resume_url: Option<String>,
    pub cover_letter_url: Option<String>,
    pub is_pending: bool,
    pub status_class: &'static str,
    pub status_label: &'static str,
}

impl From<&Application> for ApplicantCardView {
    fn from(application: &Application) -> Self {
        Self {
            id: application.id.0,
            full_name: application.full_name.clone(),
            email: application.email.clone(),
            phone: application.phone.clone(),
            applied_on: format!(
                "Applied on: {}",
                format_date(application.created_at.date_naive())
            ),
            resume_url: application.resume_url.clone(),
            cover_letter_url: application.cover_letter_url.clone(),
            is_pending: application.status == ApplicationStatus::Pending,
            status_class: application.status.as_str(),
            status_label: application.status.label(),
        }
    }
}

#[derive(Template)]
#[template(path = "applicants.html")]
pub struct ApplicantsPage {
    pub job_title: String,
    pub notice: Option<String>,
    pub applicants: Vec<ApplicantCardView>,
}

impl ApplicantsPage {
    pub fn new(job: &JobPost, applications: &[Application], notice: Option<String>) -> Self {
        let job_title = if job.profession.trim().is_empty() {
            "Job".to_string()
        } else {
            job.profession.clone()
        };
        Self {
            job_title,
            notice,
            applicants: applications.iter().map(ApplicantCardView::from).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "apply.html")]
pub struct ApplyPage {
    pub job_id: i64,
    pub profession: String,
    pub company_name: String,
    pub error: Option<String>,
}

impl ApplyPage {
    pub fn new(job: &JobPost, error: Option<String>) -> Self {
        Self {
            job_id: job.id.0,
            profession: job.profession.clone(),
            company_name: company_label(&job.company_name),
            error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactLine {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    pub label: &'static str,
    pub url: String,
}

fn contact_lines(fields: [(&'static str, &Option<String>); 3]) -> Vec<ContactLine> {
    fields
        .into_iter()
        .filter_map(|(label, value)| {
            value.as_ref().map(|value| ContactLine {
                label,
                value: value.clone(),
            })
        })
        .collect()
}

fn link_views(social: &SocialLinks) -> Vec<LinkView> {
    social
        .entries()
        .into_iter()
        .map(|(label, url)| LinkView {
            label,
            url: url.to_string(),
        })
        .collect()
}

#[derive(Template)]
#[template(path = "business_card.html")]
pub struct BusinessCardPage {
    pub business_name: String,
    pub initial: String,
    pub logo_url: Option<String>,
    pub industry: Option<String>,
    pub summary: Option<String>,
    pub website: Option<String>,
    pub contacts: Vec<ContactLine>,
    pub links: Vec<LinkView>,
    /// Shareable path, shown on the owner's page only.
    pub share_path: Option<String>,
}

impl BusinessCardPage {
    pub fn public(profile: &BusinessProfile) -> Self {
        Self::build(profile, None)
    }

    pub fn owner(profile: &BusinessProfile) -> Self {
        let share_path = format!("/business/{}", encode_path_segment(&profile.business_name));
        Self::build(profile, Some(share_path))
    }

    fn build(profile: &BusinessProfile, share_path: Option<String>) -> Self {
        Self {
            business_name: profile.business_name.clone(),
            initial: avatar_initial(&profile.business_name),
            logo_url: profile.logo_url.clone(),
            industry: profile.industry.clone(),
            summary: profile.summary.clone(),
            website: profile.website.clone(),
            contacts: contact_lines([
                ("Email", &profile.email),
                ("Mobile", &profile.mobile),
                ("WhatsApp", &profile.whatsapp),
            ]),
            links: link_views(&profile.social),
            share_path,
        }
    }
}

#[derive(Template)]
#[template(path = "profile_card.html")]
pub struct ProfileCardPage {
    pub name: String,
    pub initial: String,
    pub logo_url: Option<String>,
    pub profession: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<String>,
    pub languages: Option<String>,
    pub summary: Option<String>,
    pub address: Option<String>,
    pub contacts: Vec<ContactLine>,
    pub website: Option<String>,
    pub links: Vec<LinkView>,
}

impl From<&IndividualProfile> for ProfileCardPage {
    fn from(profile: &IndividualProfile) -> Self {
        Self {
            name: profile.name.clone(),
            initial: avatar_initial(&profile.name),
            logo_url: profile.logo_url.clone(),
            profession: profile.profession.clone(),
            experience: profile.experience.map(|years| match years {
                1 => "1 year experience".to_string(),
                n => format!("{n} years experience"),
            }),
            skills: profile.skills.clone(),
            languages: profile.languages.clone(),
            summary: profile.summary.clone(),
            address: profile.address.clone(),
            contacts: contact_lines([
                ("Mobile", &profile.mobile),
                ("WhatsApp", &profile.whatsapp),
                ("Email", &profile.email),
            ]),
            website: profile.website.clone(),
            links: link_views(&profile.social),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub message: String,
    pub back_href: Option<String>,
}

impl ErrorPage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            back_href: None,
        }
    }

    pub fn with_back(mut self, href: impl Into<String>) -> Self {
        self.back_href = Some(href.into());
        self
    }
}

/// Render a template, falling back to plain text when rendering fails.
pub fn render_page<T: Template>(status: StatusCode, template: T) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "template rendering failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unable to render page".to_string(),
            )
                .into_response()
        }
    }
}

/// Everything outside the unreserved set is escaped in a path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub(crate) fn encode_path_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}
