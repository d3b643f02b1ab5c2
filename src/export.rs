use crate::board::format::format_date;
use crate::board::{AccountId, Application, JobApplicants, JobBoardService, JobId, MemoryStore};
use crate::error::AppError;
use clap::Args;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ApplicantsExportArgs {
    /// JSON snapshot of the board store
    #[arg(long)]
    pub(crate) data: PathBuf,
    /// Job post id whose applicants are exported
    #[arg(long)]
    pub(crate) job: i64,
    /// Account id of the business that owns the job post
    #[arg(long)]
    pub(crate) owner: String,
    /// Write to this file instead of stdout
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ApplicantRow<'a> {
    application_id: i64,
    job_id: i64,
    job_title: &'a str,
    full_name: &'a str,
    email: &'a str,
    phone: &'a str,
    status: &'static str,
    applied_on: String,
    resume_url: &'a str,
    cover_letter_url: &'a str,
}

impl<'a> ApplicantRow<'a> {
    fn new(job_title: &'a str, application: &'a Application) -> Self {
        Self {
            application_id: application.id.0,
            job_id: application.job_id.0,
            job_title,
            full_name: &application.full_name,
            email: &application.email,
            phone: application.phone.as_deref().unwrap_or_default(),
            status: application.status.as_str(),
            applied_on: format_date(application.created_at.date_naive()),
            resume_url: application.resume_url.as_deref().unwrap_or_default(),
            cover_letter_url: application.cover_letter_url.as_deref().unwrap_or_default(),
        }
    }
}

/// Serialize applicants oldest first, one row per application.
pub(crate) fn write_applicants_csv<W: Write>(
    writer: W,
    applicants: &JobApplicants,
) -> Result<usize, AppError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for application in &applicants.applications {
        csv_writer.serialize(ApplicantRow::new(&applicants.job.profession, application))?;
    }
    csv_writer.flush()?;
    Ok(applicants.applications.len())
}

pub(crate) fn run_applicants_export(args: ApplicantsExportArgs) -> Result<(), AppError> {
    let ApplicantsExportArgs {
        data,
        job,
        owner,
        out,
    } = args;

    let store = Arc::new(MemoryStore::from_path(&data)?);
    let service = JobBoardService::new(store);
    let applicants = service.job_applicants(&AccountId(owner), JobId(job))?;

    let written = match out {
        Some(path) => {
            let file = File::create(&path)?;
            let written = write_applicants_csv(file, &applicants)?;
            info!(path = %path.display(), rows = written, "applicants exported");
            written
        }
        None => write_applicants_csv(io::stdout().lock(), &applicants)?,
    };

    if written == 0 {
        eprintln!("No applications yet for {}.", applicants.job.profession);
    }
    Ok(())
}
