use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::domain::{
    AccountId, Application, ApplicationId, ApplicationStatus, ApplicationSubmission,
    BusinessProfile, IndividualProfile, JobDraft, JobId, JobPost,
};
use super::repository::{ApplicationRepository, JobRepository, ProfileRepository, RepositoryError};

/// Serialized form of every table, used to hydrate a [`MemoryStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardSnapshot {
    #[serde(default)]
    pub jobs: Vec<JobPost>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub businesses: Vec<BusinessProfile>,
    #[serde(default)]
    pub profiles: Vec<IndividualProfile>,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("unable to read snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("snapshot contains duplicate {table} id {id}")]
    Duplicate { table: &'static str, id: String },
}

#[derive(Debug, Default)]
struct Tables {
    jobs: BTreeMap<JobId, JobPost>,
    applications: BTreeMap<ApplicationId, Application>,
    businesses: BTreeMap<AccountId, BusinessProfile>,
    profiles: BTreeMap<AccountId, IndividualProfile>,
    next_job: i64,
    next_application: i64,
}

/// Mutex-guarded tables implementing every repository trait.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        let snapshot: BoardSnapshot = serde_json::from_reader(reader)?;
        Self::from_snapshot(snapshot)
    }

    pub fn from_snapshot(snapshot: BoardSnapshot) -> Result<Self, SnapshotError> {
        let mut tables = Tables::default();

        for job in snapshot.jobs {
            if tables.jobs.contains_key(&job.id) {
                return Err(SnapshotError::Duplicate {
                    table: "job",
                    id: job.id.to_string(),
                });
            }
            tables.jobs.insert(job.id, job);
        }
        for application in snapshot.applications {
            if tables.applications.contains_key(&application.id) {
                return Err(SnapshotError::Duplicate {
                    table: "application",
                    id: application.id.to_string(),
                });
            }
            tables.applications.insert(application.id, application);
        }
        for business in snapshot.businesses {
            if tables.businesses.contains_key(&business.id) {
                return Err(SnapshotError::Duplicate {
                    table: "business",
                    id: business.id.to_string(),
                });
            }
            tables.businesses.insert(business.id.clone(), business);
        }
        for profile in snapshot.profiles {
            if tables.profiles.contains_key(&profile.user_id) {
                return Err(SnapshotError::Duplicate {
                    table: "profile",
                    id: profile.user_id.to_string(),
                });
            }
            tables.profiles.insert(profile.user_id.clone(), profile);
        }

        tables.next_job = tables.jobs.keys().next_back().map_or(0, |id| id.0);
        tables.next_application = tables.applications.keys().next_back().map_or(0, |id| id.0);

        Ok(Self {
            tables: Mutex::new(tables),
        })
    }

    pub fn snapshot(&self) -> Result<BoardSnapshot, RepositoryError> {
        let tables = self.lock()?;
        Ok(BoardSnapshot {
            jobs: tables.jobs.values().cloned().collect(),
            applications: tables.applications.values().cloned().collect(),
            businesses: tables.businesses.values().cloned().collect(),
            profiles: tables.profiles.values().cloned().collect(),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))
    }
}

/// Sequences stop at `i64::MAX`; the counter is left untouched on failure.
fn next_id(current: i64, table: &str) -> Result<i64, RepositoryError> {
    current
        .checked_add(1)
        .ok_or_else(|| RepositoryError::Unavailable(format!("{table} id sequence exhausted")))
}

fn newest_first(jobs: &mut [JobPost]) {
    jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

impl JobRepository for MemoryStore {
    fn insert_job(
        &self,
        draft: JobDraft,
        company: &AccountId,
        company_name: &str,
    ) -> Result<JobPost, RepositoryError> {
        let mut tables = self.lock()?;
        tables.next_job = next_id(tables.next_job, "job")?;
        let id = JobId(tables.next_job);

        let mut job = JobPost {
            id,
            profession: String::new(),
            company_id: Some(company.clone()),
            company_name: company_name.to_string(),
            description: None,
            location: String::new(),
            job_type: Vec::new(),
            salary: String::new(),
            experience: None,
            skills: None,
            contact: None,
            email: None,
            website: None,
            created_at: Utc::now(),
            deadline: None,
        };
        job.apply_draft(draft);

        tables.jobs.insert(id, job.clone());
        Ok(job)
    }

    fn fetch_job(&self, id: JobId) -> Result<Option<JobPost>, RepositoryError> {
        Ok(self.lock()?.jobs.get(&id).cloned())
    }

    fn update_job(&self, job: JobPost) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        match tables.jobs.get_mut(&job.id) {
            Some(slot) => {
                *slot = job;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete_job(&self, id: JobId) -> Result<(), RepositoryError> {
        self.lock()?
            .jobs
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn jobs_by_company(&self, company: &AccountId) -> Result<Vec<JobPost>, RepositoryError> {
        let tables = self.lock()?;
        let mut jobs: Vec<JobPost> = tables
            .jobs
            .values()
            .filter(|job| job.is_owned_by(company))
            .cloned()
            .collect();
        newest_first(&mut jobs);
        Ok(jobs)
    }

    fn recent_jobs(&self, limit: usize) -> Result<Vec<JobPost>, RepositoryError> {
        let tables = self.lock()?;
        let mut jobs: Vec<JobPost> = tables.jobs.values().cloned().collect();
        newest_first(&mut jobs);
        jobs.truncate(limit);
        Ok(jobs)
    }
}

impl ApplicationRepository for MemoryStore {
    fn insert_application(
        &self,
        job_id: JobId,
        applicant: &AccountId,
        submission: ApplicationSubmission,
    ) -> Result<Application, RepositoryError> {
        let mut tables = self.lock()?;
        tables.next_application = next_id(tables.next_application, "application")?;
        let id = ApplicationId(tables.next_application);

        let ApplicationSubmission {
            full_name,
            email,
            phone,
            resume_url,
            cover_letter_url,
        } = submission;

        let application = Application {
            id,
            job_id,
            applicant_id: applicant.clone(),
            full_name,
            email,
            phone,
            resume_url,
            cover_letter_url,
            status: ApplicationStatus::Pending,
            created_at: Utc::now(),
        };
        tables.applications.insert(id, application.clone());
        Ok(application)
    }

    fn fetch_application(
        &self,
        id: ApplicationId,
    ) -> Result<Option<Application>, RepositoryError> {
        Ok(self.lock()?.applications.get(&id).cloned())
    }

    fn applications_for_job(&self, job_id: JobId) -> Result<Vec<Application>, RepositoryError> {
        let tables = self.lock()?;
        let mut applications: Vec<Application> = tables
            .applications
            .values()
            .filter(|application| application.job_id == job_id)
            .cloned()
            .collect();
        applications.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(applications)
    }

    fn set_application_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        let application = tables
            .applications
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound)?;
        application.status = status;
        Ok(())
    }
}

impl ProfileRepository for MemoryStore {
    fn business_by_id(&self, id: &AccountId) -> Result<Option<BusinessProfile>, RepositoryError> {
        Ok(self.lock()?.businesses.get(id).cloned())
    }

    fn business_by_name(&self, name: &str) -> Result<Option<BusinessProfile>, RepositoryError> {
        Ok(self
            .lock()?
            .businesses
            .values()
            .find(|business| business.business_name == name)
            .cloned())
    }

    fn profile_by_user(
        &self,
        user_id: &AccountId,
    ) -> Result<Option<IndividualProfile>, RepositoryError> {
        Ok(self.lock()?.profiles.get(user_id).cloned())
    }

    fn upsert_business(&self, profile: BusinessProfile) -> Result<(), RepositoryError> {
        self.lock()?.businesses.insert(profile.id.clone(), profile);
        Ok(())
    }

    fn upsert_profile(&self, profile: IndividualProfile) -> Result<(), RepositoryError> {
        self.lock()?.profiles.insert(profile.user_id.clone(), profile);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SNAPSHOT: &str = r#"{
        "jobs": [
            {"id": 4, "profession": "Welder", "company_id": "biz-1", "company_name": "Forge Co",
             "location": "Pune", "salary": "30000", "created_at": "2025-09-01T08:00:00Z"},
            {"id": 9, "profession": "Fitter", "company_id": "biz-1", "company_name": "Forge Co",
             "location": "Pune", "salary": "28000", "created_at": "2025-09-03T08:00:00Z",
             "deadline": "2025-10-01"}
        ],
        "businesses": [
            {"id": "biz-1", "business_name": "Forge Co", "linkedin": "https://linkedin.com/forge"}
        ]
    }"#;

    #[test]
    fn snapshot_hydrates_tables_and_continues_sequences() {
        let store = MemoryStore::from_reader(Cursor::new(SNAPSHOT)).expect("snapshot loads");
        let owner = AccountId("biz-1".to_string());

        let jobs = store.jobs_by_company(&owner).expect("query succeeds");
        let ids: Vec<i64> = jobs.iter().map(|job| job.id.0).collect();
        assert_eq!(ids, vec![9, 4]);

        let created = store
            .insert_job(JobDraft::default(), &owner, "Forge Co")
            .expect("insert succeeds");
        assert_eq!(created.id, JobId(10));

        let business = store
            .business_by_name("Forge Co")
            .expect("query succeeds")
            .expect("business present");
        assert_eq!(
            business.social.linkedin.as_deref(),
            Some("https://linkedin.com/forge")
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let raw = r#"{"businesses": [
            {"id": "biz-1", "business_name": "A"},
            {"id": "biz-1", "business_name": "B"}
        ]}"#;
        match MemoryStore::from_reader(Cursor::new(raw)) {
            Err(SnapshotError::Duplicate { table, id }) => {
                assert_eq!(table, "business");
                assert_eq!(id, "biz-1");
            }
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn exhausted_sequence_fails_without_poisoning_the_store() {
        let raw = format!(
            r#"{{"jobs": [
                {{"id": {}, "profession": "Welder", "company_id": "biz-1",
                 "location": "Pune", "salary": "30000", "created_at": "2025-09-01T08:00:00Z"}}
            ]}}"#,
            i64::MAX
        );
        let store = MemoryStore::from_reader(Cursor::new(raw)).expect("snapshot loads");
        let owner = AccountId("biz-1".to_string());

        match store.insert_job(JobDraft::default(), &owner, "Forge Co") {
            Err(RepositoryError::Unavailable(message)) => {
                assert_eq!(message, "job id sequence exhausted")
            }
            other => panic!("expected exhausted sequence, got {other:?}"),
        }

        let jobs = store.jobs_by_company(&owner).expect("store still usable");
        assert_eq!(jobs.len(), 1);
        let application = store
            .insert_application(
                JobId(i64::MAX),
                &AccountId("user-1".to_string()),
                ApplicationSubmission::default(),
            )
            .expect("application sequence unaffected");
        assert_eq!(application.id, ApplicationId(1));
    }

    #[test]
    fn deleting_missing_job_reports_not_found() {
        let store = MemoryStore::default();
        assert!(matches!(
            store.delete_job(JobId(1)),
            Err(RepositoryError::NotFound)
        ));
    }
}
