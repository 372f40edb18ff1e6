//! # Run Controller Module / 运行控制器模块
//!
//! This module decides which steps run and what the run's exit status is.
//! It never touches processes or environment variables itself: the build
//! mode is a parameter, and every external effect goes through a
//! [`CheckEnvironment`].
//!
//! 此模块决定运行哪些步骤以及运行的退出状态。
//! 它本身从不接触进程或环境变量：构建模式是一个参数，
//! 所有外部影响都通过 [`CheckEnvironment`] 进行。
//!
//! Two failure policies coexist:
//! - main branch: integration tests, unit tests and coverage upload are
//!   best-effort. The first failure is remembered, the rest still run, and
//!   the report upload always runs afterwards.
//! - pull request: every step is fatal.

use anyhow::Result;
use std::future::Future;
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use crate::core::models::{BuildMode, RunReport, RunStatus, Step, StepOutcome, StepRecord};
use crate::core::targets::BuildTargets;
use crate::core::timer::RunTimer;
use crate::reporting::console;

/// The external collaborators of a run.
///
/// [`crate::infra::system::SystemEnvironment`] implements this on top of real
/// processes; tests substitute a recording fake.
///
/// 一次运行的外部协作者。
pub trait CheckEnvironment {
    /// Runs the command bound to `step` and waits for it to exit.
    ///
    /// Command failures are reported through [`StepOutcome::Failed`]. An
    /// `Err` means the environment itself is broken and ends the run.
    fn run_step(&mut self, step: Step) -> impl Future<Output = Result<StepOutcome>>;

    /// Prints a summary of what changed in this build.
    fn print_change_summary(&mut self) -> impl Future<Output = Result<()>>;

    /// Asks the build-target classifier which categories changed.
    fn build_targets(&mut self) -> impl Future<Output = Result<BuildTargets>>;

    /// Locale for messages printed by the controller.
    fn locale(&self) -> &str {
        "en"
    }

    fn timer_started(&mut self, timer: &RunTimer) {
        console::print_timer_started(timer, self.locale());
    }

    /// Called exactly once per run, on every exit path.
    fn timer_stopped(&mut self, label: &str, elapsed: Duration) {
        console::print_timer_stopped(label, elapsed, self.locale());
    }
}

/// Runs the whole job for `mode` and reports how it went.
///
/// The returned report carries the exit status; `Err` is reserved for
/// failures of the environment itself (e.g. the classifier could not run).
///
/// 按 `mode` 运行整个作业并报告结果。
pub async fn run_check<E: CheckEnvironment>(
    job_name: &str,
    mode: BuildMode,
    env: &mut E,
) -> Result<RunReport> {
    let timer = RunTimer::start(job_name);
    env.timer_started(&timer);

    let mut run = Run {
        env,
        steps: Vec::new(),
        targets: None,
    };
    let status = match mode {
        BuildMode::MainBranch => run.main_branch().await,
        BuildMode::PullRequest => run.pull_request(job_name).await,
    };

    let Run { env, steps, targets } = run;
    let elapsed = timer.stop();
    env.timer_stopped(job_name, elapsed);
    let status = status?;

    Ok(RunReport {
        job_name: job_name.to_string(),
        mode,
        targets,
        steps,
        status,
        elapsed,
    })
}

/// State of an in-flight run.
struct Run<'a, E> {
    env: &'a mut E,
    steps: Vec<StepRecord>,
    targets: Option<BuildTargets>,
}

impl<E: CheckEnvironment> Run<'_, E> {
    async fn step(&mut self, step: Step) -> Result<StepOutcome> {
        let started = Instant::now();
        let outcome = self.env.run_step(step).await?;
        self.steps.push(StepRecord {
            step,
            outcome,
            duration: started.elapsed(),
        });
        Ok(outcome)
    }

    /// Runs a step whose failure ends the run.
    async fn fatal(&mut self, step: Step) -> Result<ControlFlow<RunStatus>> {
        Ok(match self.step(step).await? {
            StepOutcome::Passed => ControlFlow::Continue(()),
            StepOutcome::Failed { code } => ControlFlow::Break(RunStatus::Aborted { step, code }),
        })
    }

    async fn main_branch(&mut self) -> Result<RunStatus> {
        for step in [Step::DownloadArtifact, Step::UpdatePackages] {
            if let ControlFlow::Break(status) = self.fatal(step).await? {
                return Ok(status);
            }
        }

        let region = self.recoverable_region().await;

        // Report upload runs on every path out of the region, errors included.
        let cleanup = self.fatal(Step::ReportUpload).await;
        let first_failure = region?;
        if let ControlFlow::Break(status) = cleanup? {
            return Ok(status);
        }

        Ok(match first_failure {
            Some((step, code)) => RunStatus::Failed { step, code },
            None => RunStatus::Passed,
        })
    }

    /// Integration tests, unit tests and coverage upload. A failure is
    /// logged and remembered; later steps still run.
    async fn recoverable_region(&mut self) -> Result<Option<(Step, i32)>> {
        let mut first_failure = None;
        for step in [Step::IntegrationReport, Step::UnitReport, Step::CoverageUpload] {
            if let StepOutcome::Failed { code } = self.step(step).await? {
                console::print_step_failure_notice(step, self.env.locale());
                if first_failure.is_none() {
                    first_failure = Some((step, code));
                }
            }
        }
        Ok(first_failure)
    }

    async fn pull_request(&mut self, job_name: &str) -> Result<RunStatus> {
        self.env.print_change_summary().await?;
        let targets = self.env.build_targets().await?;
        console::print_build_targets(job_name, &targets, self.env.locale());
        self.targets = Some(targets.clone());

        if !targets.is_relevant() {
            console::print_skip_notice(job_name, self.env.locale());
            return Ok(RunStatus::Skipped);
        }

        let plan = [
            (Step::DownloadArtifact, true),
            (Step::UpdatePackages, true),
            (Step::UnitLocalChanges, targets.wants_unit_tests()),
            (Step::IntegrationCoverage, targets.wants_integration_tests()),
            (Step::UnitCoverage, targets.wants_unit_tests()),
            (Step::CoverageUpload, targets.wants_coverage_upload()),
        ];
        for (step, wanted) in plan {
            if !wanted {
                continue;
            }
            if let ControlFlow::Break(status) = self.fatal(step).await? {
                return Ok(status);
            }
        }
        Ok(RunStatus::Passed)
    }
}
