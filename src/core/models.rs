//! # Data Models Module / 数据模型模块
//!
//! This module defines the data structures shared by the run controller,
//! the system environment and the reporters: the build mode, the fixed set
//! of steps, per-step outcomes and the final run report.
//!
//! 此模块定义了运行控制器、系统环境和报告器共享的数据结构：
//! 构建模式、固定的步骤集合、每个步骤的结果以及最终的运行报告。

use rust_i18n::t;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::core::targets::BuildTargets;

/// Exit code reported when a step command could not be spawned at all.
/// 步骤命令完全无法启动时报告的退出码。
pub const SPAWN_FAILURE_CODE: i32 = 127;

/// The kind of CI build being validated. Decided once per run.
/// 正在验证的 CI 构建类型。每次运行只确定一次。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildMode {
    /// A pull-request validation build. Steps are conditional and fail fast.
    /// 拉取请求验证构建。步骤是有条件的，并且快速失败。
    PullRequest,
    /// A post-merge build on the main branch. Test steps are best-effort.
    /// 主分支上的合并后构建。测试步骤尽力而为。
    MainBranch,
}

impl BuildMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::PullRequest => "pr",
            BuildMode::MainBranch => "main",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pr" | "pull-request" | "pull_request" => Ok(BuildMode::PullRequest),
            "main" | "main-branch" | "push" => Ok(BuildMode::MainBranch),
            other => anyhow::bail!("Unknown build mode '{other}'. Expected 'pr' or 'main'."),
        }
    }
}

/// Every external command the controller knows how to invoke.
/// 控制器能够调用的每一个外部命令。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    /// Fetch the unminified build output.
    DownloadArtifact,
    /// Install or update project packages.
    UpdatePackages,
    /// Main branch: integration tests with coverage and reporting.
    IntegrationReport,
    /// Main branch: unit tests with coverage and reporting.
    UnitReport,
    /// Upload collected coverage data.
    CoverageUpload,
    /// Main branch cleanup: upload the test reports.
    ReportUpload,
    /// Pull request: unit tests affected by local changes, no coverage.
    UnitLocalChanges,
    /// Pull request: integration tests with coverage.
    IntegrationCoverage,
    /// Pull request: full unit tests with coverage.
    UnitCoverage,
}

impl Step {
    /// Stable identifier used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Step::DownloadArtifact => "download-artifact",
            Step::UpdatePackages => "update-packages",
            Step::IntegrationReport => "integration-report",
            Step::UnitReport => "unit-report",
            Step::CoverageUpload => "coverage-upload",
            Step::ReportUpload => "report-upload",
            Step::UnitLocalChanges => "unit-local-changes",
            Step::IntegrationCoverage => "integration-coverage",
            Step::UnitCoverage => "unit-coverage",
        }
    }

    /// The message printed when this step fails inside the main-branch
    /// recoverable region.
    ///
    /// 当此步骤在主分支可恢复区域内失败时打印的消息。
    pub fn failure_message(&self, locale: &str) -> String {
        match self {
            Step::IntegrationReport => t!("step.integration_failed", locale = locale).to_string(),
            Step::UnitReport => t!("step.unit_failed", locale = locale).to_string(),
            Step::CoverageUpload => t!("step.coverage_upload_failed", locale = locale).to_string(),
            other => t!("step.generic_failed", locale = locale, name = other.name()).to_string(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The outcome of a single step, as reported by the task runner.
/// 任务运行器报告的单个步骤的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    Passed,
    /// The command exited unsuccessfully. `code` is never zero.
    /// 命令未成功退出。`code` 永远不为零。
    Failed { code: i32 },
}

impl StepOutcome {
    /// Builds a failed outcome, forcing a zero code to `1` so a failure can
    /// never be mistaken for success.
    pub fn failed(code: i32) -> Self {
        StepOutcome::Failed {
            code: if code == 0 { 1 } else { code },
        }
    }

    /// Maps a process exit status onto a step outcome.
    /// 将进程退出状态映射为步骤结果。
    pub fn from_exit_status(status: std::process::ExitStatus) -> Self {
        if status.success() {
            return StepOutcome::Passed;
        }
        if let Some(code) = status.code() {
            return StepOutcome::failed(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return StepOutcome::failed(128 + signal);
            }
        }
        StepOutcome::failed(1)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, StepOutcome::Failed { .. })
    }

    pub fn code(&self) -> i32 {
        match self {
            StepOutcome::Passed => 0,
            StepOutcome::Failed { code } => *code,
        }
    }
}

/// One executed step, with how long it took.
/// 一个已执行的步骤及其耗时。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: Step,
    pub outcome: StepOutcome,
    pub duration: Duration,
}

/// The aggregate result of a run.
/// 一次运行的汇总结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Every executed step passed.
    Passed,
    /// Pull-request build whose changes touch nothing this job tests.
    Skipped,
    /// Main-branch run that completed with at least one recoverable failure.
    /// `step` is the first one that failed.
    Failed { step: Step, code: i32 },
    /// A fatal step failed and the run stopped there.
    Aborted { step: Step, code: i32 },
}

impl RunStatus {
    /// The process exit code this status maps to.
    /// 此状态对应的进程退出码。
    pub fn exit_code(&self) -> i32 {
        match self {
            RunStatus::Passed | RunStatus::Skipped => 0,
            RunStatus::Failed { code, .. } | RunStatus::Aborted { code, .. } => *code,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code() == 0
    }

    /// Gets the localized status string for display.
    pub fn get_status_str(&self, locale: &str) -> String {
        match self {
            RunStatus::Passed => t!("status.passed", locale = locale).to_string(),
            RunStatus::Skipped => t!("status.skipped", locale = locale).to_string(),
            RunStatus::Failed { .. } => t!("status.failed", locale = locale).to_string(),
            RunStatus::Aborted { .. } => t!("status.aborted", locale = locale).to_string(),
        }
    }
}

/// Everything the reporters need to know about a finished run.
/// 报告器需要了解的关于已完成运行的所有信息。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub job_name: String,
    pub mode: BuildMode,
    /// Only queried on pull-request builds.
    pub targets: Option<BuildTargets>,
    pub steps: Vec<StepRecord>,
    pub status: RunStatus,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }

    /// The steps in the order they ran.
    pub fn executed_steps(&self) -> Vec<Step> {
        self.steps.iter().map(|r| r.step).collect()
    }
}
