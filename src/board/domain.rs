use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account identifier shared by businesses, individual profiles, and applicants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub i64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub i64);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A role advertised by a business account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPost {
    pub id: JobId,
    pub profession: String,
    pub company_id: Option<AccountId>,
    /// Copy of the owning business name taken when the post was created.
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub location: String,
    #[serde(default)]
    pub job_type: Vec<String>,
    pub salary: String,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

impl JobPost {
    pub fn is_owned_by(&self, account: &AccountId) -> bool {
        self.company_id.as_ref() == Some(account)
    }

    /// Replace the editable fields, keeping identity, ownership, and creation time.
    pub fn apply_draft(&mut self, draft: JobDraft) {
        let JobDraft {
            profession,
            description,
            location,
            job_type,
            salary,
            experience,
            skills,
            contact,
            email,
            website,
            deadline,
        } = draft;

        self.profession = profession;
        self.description = description;
        self.location = location;
        self.job_type = job_type;
        self.salary = salary;
        self.experience = experience;
        self.skills = skills;
        self.contact = contact;
        self.email = email;
        self.website = website;
        self.deadline = deadline;
    }
}

/// Editable portion of a job post, shared by the create and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDraft {
    pub profession: String,
    pub description: Option<String>,
    pub location: String,
    pub job_type: Vec<String>,
    pub salary: String,
    pub experience: Option<String>,
    pub skills: Option<Vec<String>>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub deadline: Option<NaiveDate>,
}

impl From<&JobPost> for JobDraft {
    fn from(job: &JobPost) -> Self {
        Self {
            profession: job.profession.clone(),
            description: job.description.clone(),
            location: job.location.clone(),
            job_type: job.job_type.clone(),
            salary: job.salary.clone(),
            experience: job.experience.clone(),
            skills: job.skills.clone(),
            contact: job.contact.clone(),
            email: job.email.clone(),
            website: job.website.clone(),
            deadline: job.deadline,
        }
    }
}

/// Review state of an application. Only the owning business moves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub applicant_id: AccountId,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub cover_letter_url: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

/// Applicant-supplied fields for a new application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume_url: Option<String>,
    pub cover_letter_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub youtube: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub google_my_business: Option<String>,
}

impl SocialLinks {
    /// Present links paired with their display label, in card order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("LinkedIn", &self.linkedin),
            ("Instagram", &self.instagram),
            ("Facebook", &self.facebook),
            ("YouTube", &self.youtube),
            ("Twitter", &self.twitter),
            ("GitHub", &self.github),
            ("Google My Business", &self.google_my_business),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|url| (label, url)))
        .collect()
    }
}

/// Business account card data. The id is the account id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub id: AccountId,
    pub business_name: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, flatten)]
    pub social: SocialLinks,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Individual professional card data keyed by the owning account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualProfile {
    pub user_id: AccountId,
    pub name: String,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Years of experience.
    #[serde(default)]
    pub experience: Option<u32>,
    /// Comma separated skill list as entered by the user.
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub languages: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default, flatten)]
    pub social: SocialLinks,
}

impl IndividualProfile {
    /// Lowercased, trimmed skills used to highlight matches on job cards.
    pub fn normalized_skills(&self) -> Vec<String> {
        self.skills
            .as_deref()
            .map(split_list)
            .unwrap_or_default()
            .into_iter()
            .map(|skill| skill.to_lowercase())
            .collect()
    }
}

/// Split a comma separated form value, dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
