use chrono::DateTime;
use log::{info, warn};
use regex::RegexBuilder;
use serde::Serialize;
use std::path::Path;

use crate::client::{JenkinsClient, JobEntry, JobInfo};
use crate::config::Settings;
use crate::confirm::Confirmer;
use crate::error::Result;
use crate::report::ActionReport;

/// Prefix value that disables filtering altogether.
pub const WILDCARD_PREFIX: &str = "*";

const NO_LAST_BUILD: &str = "None";
const DATE_FORMAT: &str = "%d-%m-%y";

/// Bulk actions supported by the job manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobAction {
    List,
    Disable,
    Enable,
    Backup,
}

impl JobAction {
    /// Actions arrive as free-form strings so an unsupported value reaches
    /// the dispatcher instead of failing argument parsing.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "list" => Some(Self::List),
            "disable" => Some(Self::Disable),
            "enable" => Some(Self::Enable),
            "backup" => Some(Self::Backup),
            _ => None,
        }
    }
}

/// Options for one job-manager invocation.
#[derive(Debug, Clone)]
pub struct JobManagerOptions {
    pub prefix: String,
    pub action: String,
    pub include_pipelines: bool,
    pub include_disabled: bool,
    pub file_output: bool,
}

/// One classified job, resolved once from the listing entry and its live info.
///
/// A multibranch pipeline is a pipeline container whose live info carries no
/// `buildable` flag; it has no single last build and is never mutated by
/// enable/disable.
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    pub name: String,
    pub is_enabled: bool,
    pub label: Option<String>,
    pub is_pipeline: bool,
    pub is_multibranch_pipeline: bool,
    pub last_build: String,
    #[serde(skip)]
    last_build_timestamp: Option<i64>,
}

impl JobSummary {
    fn classify(entry: &JobEntry, info: &JobInfo) -> Self {
        let is_pipeline = entry.is_container();
        let is_multibranch_pipeline = is_pipeline && info.buildable.is_none();
        Self {
            name: entry.name.clone(),
            is_enabled: info.buildable.unwrap_or(true),
            label: info.label_expression.clone(),
            is_pipeline,
            is_multibranch_pipeline,
            last_build: NO_LAST_BUILD.to_string(),
            last_build_timestamp: None,
        }
    }

    fn set_last_build(&mut self, timestamp_ms: i64) {
        if let Some(date) = DateTime::from_timestamp(timestamp_ms / 1000, 0) {
            self.last_build = date.format(DATE_FORMAT).to_string();
            self.last_build_timestamp = Some(timestamp_ms);
        }
    }
}

/// Narrow the listing to the candidate set: drop pipeline containers unless
/// requested, then apply the prefix as a case-insensitive regular expression
/// anchored at the name start. `*` disables filtering.
fn filter_jobs(
    mut jobs: Vec<JobEntry>,
    prefix: &str,
    include_pipelines: bool,
) -> Result<Vec<JobEntry>> {
    if !include_pipelines {
        jobs.retain(|job| !job.is_container());
    }
    if prefix != WILDCARD_PREFIX {
        let pattern = RegexBuilder::new(prefix).case_insensitive(true).build()?;
        jobs.retain(|job| pattern.find(&job.name).is_some_and(|m| m.start() == 0));
    }
    Ok(jobs)
}

pub async fn fetch_jobs(
    client: &JenkinsClient,
    prefix: &str,
    include_pipelines: bool,
) -> Result<Vec<JobEntry>> {
    let jobs = client.list_jobs().await?;
    filter_jobs(jobs, prefix, include_pipelines)
}

/// Most recent first; jobs without a last build sort as the oldest.
fn sort_by_last_build(summaries: &mut [JobSummary]) {
    summaries.sort_by(|a, b| b.last_build_timestamp.cmp(&a.last_build_timestamp));
}

/// Classify every candidate and build the listing report.
///
/// A failed build-info lookup is logged and the job keeps the `None`
/// last-build sentinel; it never aborts the run.
pub async fn list_jobs(
    client: &JenkinsClient,
    jobs: &[JobEntry],
    include_disabled: bool,
) -> Result<ActionReport<JobSummary>> {
    let mut report = ActionReport::new(jobs.len());
    for entry in jobs {
        let info = client.job_info(&entry.name).await?;
        let mut summary = JobSummary::classify(entry, &info);
        if !summary.is_multibranch_pipeline {
            if let Some(build) = &info.last_build {
                match client.build_info(&entry.name, build.number).await {
                    Ok(build_info) => summary.set_last_build(build_info.timestamp),
                    Err(e) => warn!(
                        "Failed to get build info for job {} number {}: {}",
                        entry.name, build.number, e
                    ),
                }
            }
        }
        if !include_disabled && !summary.is_enabled {
            continue;
        }
        report.push(summary);
    }
    sort_by_last_build(&mut report.jobs);
    Ok(report)
}

/// Disable every enabled, non-multibranch candidate, after an explicit
/// operator confirmation. Returns `None` when the operator declines.
pub async fn disable_jobs(
    client: &JenkinsClient,
    jobs: &[JobEntry],
    confirmer: &dyn Confirmer,
) -> Result<Option<ActionReport<String>>> {
    let prompt = format!(
        "Are you sure you want to disable {} jobs? press y/Y: ",
        jobs.len()
    );
    if !confirmer.confirm(&prompt) {
        return Ok(None);
    }

    let mut report = ActionReport::new(jobs.len());
    for entry in jobs {
        let info = client.job_info(&entry.name).await?;
        let summary = JobSummary::classify(entry, &info);
        if summary.is_enabled && !summary.is_multibranch_pipeline {
            client.disable_job(&entry.name).await?;
            info!("Disabled job {}", entry.name);
            report.push(entry.name.clone());
        }
    }
    Ok(Some(report))
}

/// Enable every disabled, non-multibranch candidate. No confirmation.
pub async fn enable_jobs(
    client: &JenkinsClient,
    jobs: &[JobEntry],
) -> Result<ActionReport<String>> {
    let mut report = ActionReport::new(jobs.len());
    for entry in jobs {
        let info = client.job_info(&entry.name).await?;
        let summary = JobSummary::classify(entry, &info);
        if !summary.is_enabled && !summary.is_multibranch_pipeline {
            client.enable_job(&entry.name).await?;
            info!("Enabled job {}", entry.name);
            report.push(entry.name.clone());
        }
    }
    Ok(report)
}

/// Write each candidate's raw configuration document to
/// `<output_folder>/<job-name>.xml`.
pub async fn backup_jobs(
    client: &JenkinsClient,
    jobs: &[JobEntry],
    output_folder: &Path,
) -> Result<()> {
    for entry in jobs {
        let config = client.job_config(&entry.name).await?;
        let path = output_folder.join(format!("{}.xml", entry.name));
        std::fs::write(&path, config)?;
        info!("Backed up job {} to {}", entry.name, path.display());
    }
    Ok(())
}

/// Full job-manager pipeline: fetch and filter the candidate set, then
/// dispatch on the requested action. The report for a list action and for a
/// confirmed enable/disable action is always emitted, even when empty.
pub async fn manage(
    client: &JenkinsClient,
    settings: &Settings,
    options: &JobManagerOptions,
    confirmer: &dyn Confirmer,
) -> Result<()> {
    let jobs = fetch_jobs(client, &options.prefix, options.include_pipelines).await?;
    println!("Found {} jobs.", jobs.len());
    settings.ensure_output_folder()?;

    match JobAction::parse(&options.action) {
        Some(JobAction::List) => {
            let report = list_jobs(client, &jobs, options.include_disabled).await?;
            report.emit(options.file_output, &settings.output_folder)?;
        }
        Some(JobAction::Disable) => {
            if let Some(report) = disable_jobs(client, &jobs, confirmer).await? {
                report.emit(options.file_output, &settings.output_folder)?;
            }
        }
        Some(JobAction::Enable) => {
            let report = enable_jobs(client, &jobs).await?;
            report.emit(options.file_output, &settings.output_folder)?;
        }
        Some(JobAction::Backup) => {
            backup_jobs(client, &jobs, &settings.output_folder).await?;
        }
        None => println!("Unknown action {}", options.action),
    }
    Ok(())
}
