use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::client::GraphQlClient;
use crate::config::Config;
use crate::jobs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Heartbeat,
    LowStockUpdate,
    Report,
    OrderReminders,
}

impl JobKind {
    pub fn name(self) -> &'static str {
        match self {
            JobKind::Heartbeat => "heartbeat",
            JobKind::LowStockUpdate => "low_stock_update",
            JobKind::Report => "report",
            JobKind::OrderReminders => "order_reminders",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScheduledJob {
    pub kind: JobKind,
    pub every: Duration,
}

/// Runs the enabled jobs on their configured intervals, one tokio task per
/// job. Schedules are fixed at startup from the config; there is no shared
/// state between job runs.
pub struct Scheduler {
    client: Arc<GraphQlClient>,
    log_dir: PathBuf,
    lookback_days: i64,
    jobs: Vec<ScheduledJob>,
}

impl Scheduler {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Arc::new(GraphQlClient::new(
            config.api.url.clone(),
            Duration::from_secs(config.api.timeout_secs),
        )?);

        let mut jobs = Vec::new();
        if config.heartbeat.enabled {
            jobs.push(ScheduledJob {
                kind: JobKind::Heartbeat,
                every: Duration::from_secs(config.heartbeat.every_secs),
            });
        }
        if config.low_stock.enabled {
            jobs.push(ScheduledJob {
                kind: JobKind::LowStockUpdate,
                every: Duration::from_secs(config.low_stock.every_secs),
            });
        }
        if config.report.enabled {
            jobs.push(ScheduledJob {
                kind: JobKind::Report,
                every: Duration::from_secs(config.report.every_secs),
            });
        }
        if config.order_reminders.enabled {
            jobs.push(ScheduledJob {
                kind: JobKind::OrderReminders,
                every: Duration::from_secs(config.order_reminders.every_secs),
            });
        }

        Ok(Self {
            client,
            log_dir: config.logs.dir.clone(),
            lookback_days: config.order_reminders.lookback_days,
            jobs,
        })
    }

    pub fn jobs(&self) -> &[ScheduledJob] {
        &self.jobs
    }

    pub async fn run(self) -> Result<()> {
        let mut handles = Vec::new();

        for job in self.jobs {
            let client = self.client.clone();
            let log_dir = self.log_dir.clone();
            let lookback_days = self.lookback_days;

            info!(
                "Scheduling job '{}' every {}s",
                job.kind.name(),
                job.every.as_secs()
            );
            handles.push(tokio::spawn(async move {
                let mut ticker = tokio::time::interval(job.every);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    if let Err(e) =
                        run_job(job.kind, &client, &log_dir, lookback_days).await
                    {
                        // A job failure only matters for the log file it
                        // could not write; the schedule keeps going.
                        error!("Job '{}' failed: {:#}", job.kind.name(), e);
                    }
                }
            }));
        }

        for handle in handles {
            handle.await?;
        }
        Ok(())
    }
}

pub async fn run_job(
    kind: JobKind,
    client: &GraphQlClient,
    log_dir: &std::path::Path,
    lookback_days: i64,
) -> Result<()> {
    match kind {
        JobKind::Heartbeat => jobs::run_heartbeat(client, log_dir).await,
        JobKind::LowStockUpdate => jobs::run_low_stock_update(client, log_dir).await,
        JobKind::Report => jobs::run_report(client, log_dir).await,
        JobKind::OrderReminders => {
            jobs::run_order_reminders(client, log_dir, lookback_days).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_jobs_are_not_scheduled() {
        let config: Config = toml::from_str(
            r#"
            [heartbeat]
            enabled = false

            [report]
            enabled = false
            "#,
        )
        .unwrap();

        let scheduler = Scheduler::from_config(&config).unwrap();
        let kinds: Vec<JobKind> = scheduler.jobs().iter().map(|j| j.kind).collect();
        assert_eq!(kinds, vec![JobKind::LowStockUpdate, JobKind::OrderReminders]);
    }

    #[test]
    fn intervals_come_from_config() {
        let config: Config = toml::from_str(
            r#"
            [heartbeat]
            every_secs = 60
            "#,
        )
        .unwrap();

        let scheduler = Scheduler::from_config(&config).unwrap();
        let heartbeat = scheduler
            .jobs()
            .iter()
            .find(|j| j.kind == JobKind::Heartbeat)
            .unwrap();
        assert_eq!(heartbeat.every, Duration::from_secs(60));
    }
}
