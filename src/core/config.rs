//! # Configuration Module / 配置模块
//!
//! The `PrCheck.toml` configuration: output language, job name and the
//! external command bound to each step. Every field has a default, so an
//! empty file (or no file at all) yields the stock gulp-based job.
//!
//! `PrCheck.toml` 配置：输出语言、作业名称以及绑定到每个步骤的外部命令。
//! 每个字段都有默认值，因此空文件（或没有文件）会得到默认的基于 gulp 的作业。

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs;
use std::path::Path;

use crate::core::models::Step;

/// Default config file name, looked up in the project directory.
pub const DEFAULT_CONFIG_FILE: &str = "PrCheck.toml";

/// The external commands the job invokes, as shell-like command lines.
/// 作业调用的外部命令，以类 shell 命令行的形式给出。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Commands {
    /// Fetches the unminified output. When unset the download step is
    /// reported as skipped.
    /// 获取未压缩的构建产物。未设置时，下载步骤被报告为跳过。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_artifact: Option<String>,
    pub update_packages: String,
    pub integration_report: String,
    pub unit_report: String,
    pub coverage_upload: String,
    pub report_upload: String,
    pub unit_local_changes: String,
    pub integration_coverage: String,
    pub unit_coverage: String,
    /// Prints a summary of what changed on pull-request builds.
    /// Unlike the other optional commands it has a default, so turning it
    /// off is written as an empty string rather than a missing key.
    /// 在拉取请求构建中打印变更摘要。
    /// 与其他可选命令不同，它有默认值，因此关闭时写为空字符串而不是省略该键。
    #[serde(
        serialize_with = "serialize_unset_as_blank",
        deserialize_with = "deserialize_blank_as_unset"
    )]
    pub change_summary: Option<String>,
    /// The build-target classifier. Its stdout is parsed as the target set.
    /// 构建目标分类器。其 stdout 被解析为目标集合。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_targets: Option<String>,
}

impl Default for Commands {
    fn default() -> Self {
        Self {
            download_artifact: None,
            update_packages: "gulp update-packages".to_string(),
            integration_report: "gulp integration --nobuild --headless --coverage --report"
                .to_string(),
            unit_report: "gulp unit --nobuild --headless --coverage --report".to_string(),
            coverage_upload: "gulp codecov-upload".to_string(),
            report_upload: "gulp test-report-upload".to_string(),
            unit_local_changes: "gulp unit --nobuild --headless --local_changes".to_string(),
            integration_coverage: "gulp integration --nobuild --headless --coverage".to_string(),
            unit_coverage: "gulp unit --nobuild --headless --coverage".to_string(),
            change_summary: Some("git show --stat --oneline HEAD".to_string()),
            build_targets: None,
        }
    }
}

fn serialize_unset_as_blank<S: Serializer>(
    value: &Option<String>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_deref().unwrap_or(""))
}

fn deserialize_blank_as_unset<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    let value = String::deserialize(deserializer)?;
    Ok(Some(value).filter(|v| !v.trim().is_empty()))
}

impl Commands {
    /// The command line bound to `step`, or `None` if the step is not
    /// configured.
    pub fn for_step(&self, step: Step) -> Option<&str> {
        let command = match step {
            Step::DownloadArtifact => return self.download_artifact.as_deref(),
            Step::UpdatePackages => &self.update_packages,
            Step::IntegrationReport => &self.integration_report,
            Step::UnitReport => &self.unit_report,
            Step::CoverageUpload => &self.coverage_upload,
            Step::ReportUpload => &self.report_upload,
            Step::UnitLocalChanges => &self.unit_local_changes,
            Step::IntegrationCoverage => &self.integration_coverage,
            Step::UnitCoverage => &self.unit_coverage,
        };
        Some(command.as_str())
    }
}

/// The whole configuration file.
/// 整个配置文件。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CheckConfig {
    /// The language for the runner's output messages (e.g., "en", "zh-CN").
    /// 运行器输出消息的语言（例如 "en", "zh-CN"）。
    pub language: String,
    /// Label used for the run timer and as the log prefix.
    /// 用于运行计时器和日志前缀的标签。
    pub job_name: String,
    pub commands: Commands,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            job_name: "unminified-tests".to_string(),
            commands: Commands::default(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

impl CheckConfig {
    /// Reads and parses a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Resolves the config for a run.
    ///
    /// An explicit path must exist. Without one, `PrCheck.toml` in
    /// `project_dir` is used if present, and the built-in defaults otherwise.
    ///
    /// 解析一次运行的配置。显式路径必须存在。没有显式路径时，
    /// 如果 `project_dir` 中存在 `PrCheck.toml` 则使用它，否则使用内置默认值。
    pub fn resolve(explicit: Option<&Path>, project_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = project_dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
