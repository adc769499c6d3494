// Command handlers
//
// Each invocation builds one store, runs one command against it and prints
// the notifications that command produced.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use dialoguer::Confirm;
use log::debug;
use thiserror::Error;

use jobtrack_server::{
    integrations::{FileHandle, LocalFiles},
    persistence::FileStorage,
    JobStore, StoreConfig,
};
use jobtrack_utils::{
    dates::{format_display_date, format_iso_date},
    validation::validate_job_form,
    Clock, JobDraft, JobFilter, JobId, JobPatch, JobRecord, JobStatus, SystemClock,
};

use crate::cli::{AddArgs, CliArgs, Command, EditArgs};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("no job with id {0}")]
    UnknownJob(JobId),

    #[error("could not determine a data directory, pass --data-file")]
    NoDataDir,
}

pub async fn run(args: CliArgs) -> Result<()> {
    let data_file = match args.data_file {
        Some(path) => path,
        None => default_data_file()?,
    };
    let export_dir = match args.export_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("could not read the current directory")?,
    };
    let mut config = StoreConfig::default();
    if let Some(ttl) = args.notification_ttl {
        config.notification_ttl = ttl;
    }

    debug!(
        "Using data file {} and export directory {}",
        data_file.display(),
        export_dir.display()
    );
    let storage = FileStorage::open(&data_file)
        .with_context(|| format!("could not open {}", data_file.display()))?;
    let clock = Arc::new(SystemClock);
    let mut store = JobStore::open(
        Box::new(storage),
        Arc::new(LocalFiles::new(export_dir)),
        clock.clone(),
        config,
    );

    let outcome = dispatch(&mut store, clock.as_ref(), args.command).await;
    for shown in store.take_notification_history() {
        println!("{}", shown.notification.render());
    }
    outcome
}

fn default_data_file() -> Result<PathBuf> {
    let dir = dirs::data_dir().ok_or(CliError::NoDataDir)?;
    Ok(dir.join("jobtrack").join("storage.json"))
}

async fn dispatch(store: &mut JobStore, clock: &dyn Clock, command: Command) -> Result<()> {
    match command {
        Command::List { status, search } => {
            let filter = JobFilter { status, search };
            let jobs = store.filtered(&filter);
            if jobs.is_empty() {
                println!("No applications found.");
            }
            for job in jobs {
                print_summary(job, clock);
            }
        },
        Command::Show { id } => {
            let job = store.get(id).ok_or(CliError::UnknownJob(id))?;
            print_details(job, clock);
        },
        Command::Add(add) => {
            let draft = draft_from(add, clock);
            validate_job_form(&draft, clock.today())?;
            let id = store.add(draft);
            println!("Added {}", id);
        },
        Command::Edit(edit) => {
            let id = edit.id;
            let current = store.get(id).ok_or(CliError::UnknownJob(id))?;
            let patch = patch_from(edit);
            validate_job_form(&merged_draft(current, &patch), clock.today())?;
            store.update(id, &patch);
        },
        Command::Delete { id, yes } => {
            let prompt = match store.get(id) {
                Some(job) => format!("Delete {} at {}?", job.title, job.company),
                None => format!("Delete job {}?", id),
            };
            if confirm(&prompt, yes)? {
                store.delete(id);
            }
        },
        Command::Clear { yes } => {
            let prompt = format!("Delete all {} applications?", store.jobs().len());
            if confirm(&prompt, yes)? {
                store.clear_all();
            }
        },
        Command::Export { ids } => {
            let handle = if ids.is_empty() {
                store.export_jobs(None).await?
            } else {
                store.export_selected(&ids).await?
            };
            println!("Wrote {}", handle);
        },
        Command::Import { file } => {
            let count = store.import_jobs(&FileHandle::new(file)).await?;
            println!("Imported {} applications", count);
        },
        Command::Stats => {
            let stats = store.stats();
            println!("Total: {}", stats.total);
            for status in JobStatus::ALL {
                println!("{}: {}", status, stats.count(status));
            }
        },
    }
    Ok(())
}

fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("confirmation needs a terminal, pass --yes")?;
    Ok(confirmed)
}

fn draft_from(add: AddArgs, clock: &dyn Clock) -> JobDraft {
    let mut draft = JobDraft::new(add.company, add.title);
    draft.status = add.status.map(|status| status.to_string());
    draft.applied_date = Some(
        add.applied_date
            .unwrap_or_else(|| format_iso_date(clock.today())),
    );
    draft.deadline = add.deadline;
    draft.priority = add.priority.map(|priority| priority.to_string());
    draft.notes = add.notes;
    draft
}

fn patch_from(edit: EditArgs) -> JobPatch {
    JobPatch {
        company: edit.company,
        title: edit.title,
        status: edit.status,
        applied_date: edit.applied_date,
        deadline: edit.deadline,
        priority: edit.priority,
        notes: edit.notes,
    }
}

/// The form as it would look with `patch` typed over `current`
fn merged_draft(current: &JobRecord, patch: &JobPatch) -> JobDraft {
    let mut draft = JobDraft::from(current);
    if let Some(company) = &patch.company {
        draft.company = Some(company.clone());
    }
    if let Some(title) = &patch.title {
        draft.title = Some(title.clone());
    }
    if let Some(applied_date) = &patch.applied_date {
        draft.applied_date = Some(applied_date.clone());
    }
    draft
}

fn deadline_label(job: &JobRecord, clock: &dyn Clock) -> String {
    let deadline = format_display_date(job.deadline.map(format_iso_date).as_deref());
    if job.is_deadline_passed(clock.now()) {
        format!("{} (passed)", deadline)
    } else {
        deadline
    }
}

fn print_summary(job: &JobRecord, clock: &dyn Clock) {
    println!(
        "{:>15}  {:<20} {:<24} {:<12} {:<10} {}",
        job.id.to_string(),
        job.company,
        job.title,
        job.status.as_str(),
        format_display_date(Some(&format_iso_date(job.applied_date))),
        deadline_label(job, clock),
    );
}

fn print_details(job: &JobRecord, clock: &dyn Clock) {
    println!("{} at {}", job.title, job.company);
    println!("  id:       {}", job.id);
    println!("  status:   {}", job.status);
    println!("  priority: {}", job.priority);
    println!(
        "  applied:  {}",
        format_display_date(Some(&format_iso_date(job.applied_date)))
    );
    println!("  deadline: {}", deadline_label(job, clock));
    if !job.notes.is_empty() {
        println!("  notes:    {}", job.notes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clap::Parser;
    use jobtrack_utils::{FakeClock, Priority};

    fn record() -> JobRecord {
        JobDraft::new("Acme", "Engineer")
            .with_applied_date("2024-01-10")
            .with_deadline("2024-02-01")
            .into_record(JobId(1), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    #[test]
    fn test_add_defaults_applied_date_to_today() {
        let clock = FakeClock::default();
        let add = AddArgs {
            company: "Acme".to_string(),
            title: "Engineer".to_string(),
            status: None,
            applied_date: None,
            deadline: None,
            priority: Some(Priority::High),
            notes: None,
        };

        let draft = draft_from(add, &clock);

        assert_eq!(draft.applied_date.as_deref(), Some("2024-03-01"));
        assert_eq!(draft.priority.as_deref(), Some("high"));
        assert!(validate_job_form(&draft, clock.today()).is_ok());
    }

    #[test]
    fn test_edit_is_validated_against_merged_form() {
        let clock = FakeClock::default();
        let patch = JobPatch {
            title: Some("  ".to_string()),
            applied_date: Some("2030-01-01".to_string()),
            ..Default::default()
        };

        let errors = validate_job_form(&merged_draft(&record(), &patch), clock.today())
            .unwrap_err();

        assert_eq!(errors.len(), 2);
    }

    fn args(dir: &std::path::Path, command: &[&str]) -> CliArgs {
        let mut argv = vec![
            "jobtrack".to_string(),
            "--data-file".to_string(),
            dir.join("storage.json").display().to_string(),
            "--export-dir".to_string(),
            dir.display().to_string(),
        ];
        argv.extend(command.iter().map(|arg| arg.to_string()));
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[tokio::test]
    async fn test_commands_share_the_data_file() {
        let dir = tempfile::tempdir().unwrap();

        run(args(dir.path(), &["add", "Acme", "Engineer", "--applied-date", "2024-01-10"]))
            .await
            .unwrap();
        run(args(dir.path(), &["export"])).await.unwrap();
        let export = dir.path().join("job-applications.json");
        assert!(std::fs::read_to_string(&export).unwrap().contains("\"Acme\""));

        run(args(dir.path(), &["clear", "--yes"])).await.unwrap();
        let stored = std::fs::read_to_string(dir.path().join("storage.json")).unwrap();
        assert!(!stored.contains("Acme"));

        let export = export.display().to_string();
        run(args(dir.path(), &["import", &export])).await.unwrap();
        let stored = std::fs::read_to_string(dir.path().join("storage.json")).unwrap();
        assert!(stored.contains("Acme"));
    }

    #[tokio::test]
    async fn test_invalid_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = run(args(dir.path(), &["show", "999"])).await.unwrap_err();
        assert_eq!(err.to_string(), "no job with id 999");

        let err = run(args(dir.path(), &["add", " ", "Engineer"]))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "company: Company name is required");
    }

    #[test]
    fn test_deadline_label_marks_passed_deadlines() {
        let clock = FakeClock::default();
        assert_eq!(deadline_label(&record(), &clock), "2/1/2024 (passed)");

        let mut open = record();
        open.deadline = None;
        assert_eq!(deadline_label(&open, &clock), "Not specified");
    }
}
