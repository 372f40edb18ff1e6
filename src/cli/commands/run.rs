//! # Run Command Module / 运行命令模块
//!
//! Wires the CLI options to the run controller: resolves the project
//! directory, config, locale and build mode, runs the job on the real
//! system environment and reports the result.
//!
//! 将 CLI 选项连接到运行控制器：解析项目目录、配置、语言和构建模式，
//! 在真实的系统环境中运行作业并报告结果。

use anyhow::{Context, Result};
use colored::*;
use rust_i18n::t;
use std::path::PathBuf;

use crate::core::config::CheckConfig;
use crate::core::execution::run_check;
use crate::core::models::BuildMode;
use crate::core::targets::BuildTargets;
use crate::infra::{ci, fs, system::SystemEnvironment};
use crate::reporting::{generate_html_report, print_summary};

/// Options of the `run` command.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub project_dir: PathBuf,
    /// Overrides CI mode detection.
    pub mode: Option<BuildMode>,
    /// Overrides the build-target classifier.
    pub targets: Option<BuildTargets>,
    pub html: Option<PathBuf>,
    /// Language requested on the command line; wins over the config file.
    pub lang: Option<String>,
}

/// Runs the job and returns the exit code it should end with.
pub async fn execute(options: RunOptions) -> Result<i32> {
    if !fs::is_directory(&options.project_dir) {
        anyhow::bail!(
            t!("run.project_dir_not_found", path = options.project_dir.display()).to_string()
        );
    }
    let project_root = fs::absolute_path(&options.project_dir)?;

    let config = CheckConfig::resolve(options.config.as_deref(), &project_root)
        .context(t!("run.config_failed").to_string())?;

    let locale = options
        .lang
        .clone()
        .unwrap_or_else(|| crate::resolve_locale(&config.language));
    rust_i18n::set_locale(&locale);

    let mode = options.mode.unwrap_or_else(ci::detect_build_mode);
    let job_name = config.job_name.clone();
    println!(
        "{} {}",
        crate::reporting::console::prefix(&job_name),
        t!(
            "run.mode_detected",
            locale = &locale,
            mode = mode.as_str().cyan(),
            path = project_root.display()
        )
    );

    let mut env = SystemEnvironment::new(config, project_root, options.targets, locale.clone());
    let report = run_check(&job_name, mode, &mut env).await?;

    print_summary(&report, &locale);

    if let Some(report_path) = &options.html {
        println!(
            "\n{}",
            t!("run.html_report", locale = &locale, path = report_path.display())
        );
        if let Err(e) = generate_html_report(&report, report_path, &locale) {
            eprintln!(
                "{} {}",
                t!("run.html_report_failed", locale = &locale).red(),
                e
            );
        }
    }

    Ok(report.exit_code())
}
