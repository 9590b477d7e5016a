//! One birthday run: load the roster, match today, send the emails
use std::fmt;
use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::error::JobError;
use crate::mailer::{MailTransport, Notifier};
use crate::models::{MatchDay, NotifyReport};
use crate::roster;
use crate::services::birthday_service::todays_birthdays;
use crate::utils::datetime::format_date_display;
use crate::utils::message_formatter::MessageTemplate;

/// Stage of a run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Loading,
    Matching,
    Notifying,
    Done,
    Failed,
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// What a completed run did
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub loaded: usize,
    pub matched: usize,
    /// `None` when nobody had a birthday and nothing was sent
    pub report: Option<NotifyReport>,
}

/// Result of a run; failed sends still count as `Completed`
#[derive(Debug)]
pub enum ExitOutcome {
    Completed(RunSummary),
    Failed(JobError),
}

impl ExitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExitOutcome::Completed(_))
    }
}

/// Runs the load, match and notify stages in order
pub struct JobRunner<'a, T: MailTransport> {
    transport: &'a T,
    template: MessageTemplate,
    state: JobState,
}

impl<'a, T: MailTransport> JobRunner<'a, T> {
    pub fn new(transport: &'a T, template: MessageTemplate) -> Self {
        Self {
            transport,
            template,
            state: JobState::Idle,
        }
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    /// Run against the roster at `path` for the local current day
    pub async fn run(&mut self, path: &Path) -> ExitOutcome {
        self.run_on(path, MatchDay::today()).await
    }

    /// Run against the roster at `path` for `today`
    pub async fn run_on(&mut self, path: &Path, today: MatchDay) -> ExitOutcome {
        match self.execute(path, today).await {
            Ok(summary) => {
                self.transition(JobState::Done);
                ExitOutcome::Completed(summary)
            }
            Err(e) => {
                error!("{}", e);
                self.transition(JobState::Failed);
                ExitOutcome::Failed(e)
            }
        }
    }

    async fn execute(&mut self, path: &Path, today: MatchDay) -> Result<RunSummary, JobError> {
        self.transition(JobState::Loading);
        info!("Reading employee data from {}...", path.display());
        let records = roster::load(path)?;

        self.transition(JobState::Matching);
        info!(
            "Checking for today's birthdays ({})...",
            format_date_display(today.month, today.day)
        );
        let matches = todays_birthdays(&records, today);

        if matches.is_empty() {
            info!("No birthdays today!");
            return Ok(RunSummary {
                loaded: records.len(),
                matched: 0,
                report: None,
            });
        }

        self.transition(JobState::Notifying);
        info!("Sending birthday emails to {} people...", matches.len());
        let report = Notifier::new(self.transport, &self.template)
            .notify(&matches)
            .await?;

        info!(
            "Birthday emails done: {} sent, {} failed",
            report.sent_count(),
            report.failed_count()
        );
        if report.failed_count() > 0 {
            let failed: Vec<String> = report
                .failures()
                .map(|d| format!("{} <{}>", d.name, d.email))
                .collect();
            warn!("Not delivered: {}", failed.join(", "));
        }

        Ok(RunSummary {
            loaded: records.len(),
            matched: matches.len(),
            report: Some(report),
        })
    }

    fn transition(&mut self, next: JobState) {
        debug!("Job state {} -> {}", self.state, next);
        self.state = next;
    }
}
