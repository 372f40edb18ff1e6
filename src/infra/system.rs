//! # System Environment / 系统环境
//!
//! The real [`CheckEnvironment`]: steps run as child processes in the
//! project directory, using the command lines from the configuration.
//!
//! 真实的 [`CheckEnvironment`]：步骤以子进程的形式在项目目录中运行，
//! 使用配置中的命令行。

use anyhow::{Context, Result, bail};
use colored::*;
use rust_i18n::t;
use std::path::PathBuf;
use std::time::Instant;

use crate::core::config::CheckConfig;
use crate::core::execution::CheckEnvironment;
use crate::core::models::{SPAWN_FAILURE_CODE, Step, StepOutcome};
use crate::core::targets::BuildTargets;
use crate::infra::command;
use crate::reporting::console;

/// Runs steps as real processes.
pub struct SystemEnvironment {
    config: CheckConfig,
    project_root: PathBuf,
    /// Targets given on the command line; bypasses the classifier.
    targets_override: Option<BuildTargets>,
    locale: String,
}

impl SystemEnvironment {
    pub fn new(
        config: CheckConfig,
        project_root: PathBuf,
        targets_override: Option<BuildTargets>,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            config,
            project_root,
            targets_override,
            locale: locale.into(),
        }
    }

    fn job_name(&self) -> &str {
        &self.config.job_name
    }
}

/// Treats blank command strings as "not configured".
fn configured(command: Option<&str>) -> Option<&str> {
    command.map(str::trim).filter(|c| !c.is_empty())
}

impl CheckEnvironment for SystemEnvironment {
    async fn run_step(&mut self, step: Step) -> Result<StepOutcome> {
        let Some(command_line) = configured(self.config.commands.for_step(step)) else {
            console::print_step_not_configured(self.job_name(), step, &self.locale);
            return Ok(StepOutcome::Passed);
        };

        console::print_step_started(self.job_name(), step, command_line, &self.locale);
        let started = Instant::now();

        let outcome = match command::build_command(command_line, &self.project_root) {
            Ok(cmd) => match command::run_inherited(cmd).await {
                Ok(status) => StepOutcome::from_exit_status(status),
                Err(e) => {
                    console::print_spawn_failed(self.job_name(), command_line, &e, &self.locale);
                    StepOutcome::failed(SPAWN_FAILURE_CODE)
                }
            },
            Err(e) => {
                console::print_spawn_failed(self.job_name(), command_line, &e, &self.locale);
                StepOutcome::failed(SPAWN_FAILURE_CODE)
            }
        };

        console::print_step_finished(
            self.job_name(),
            step,
            command_line,
            outcome,
            started.elapsed(),
            &self.locale,
        );
        Ok(outcome)
    }

    async fn print_change_summary(&mut self) -> Result<()> {
        let Some(command_line) = configured(self.config.commands.change_summary.as_deref()) else {
            return Ok(());
        };
        println!(
            "{} {}",
            console::prefix(self.job_name()),
            t!("change_summary.header", locale = &self.locale).cyan()
        );

        // The summary is informational; a failing command only warrants a warning.
        let result = match command::build_command(command_line, &self.project_root) {
            Ok(cmd) => command::run_inherited(cmd)
                .await
                .map_err(anyhow::Error::from)
                .and_then(|status| match StepOutcome::from_exit_status(status) {
                    StepOutcome::Passed => Ok(()),
                    StepOutcome::Failed { code } => Err(anyhow::anyhow!("exit code {code}")),
                }),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            println!(
                "{} {}",
                console::prefix(self.job_name()),
                t!("change_summary.failed", locale = &self.locale, error = e).yellow()
            );
        }
        Ok(())
    }

    async fn build_targets(&mut self) -> Result<BuildTargets> {
        if let Some(targets) = &self.targets_override {
            return Ok(targets.clone());
        }
        let Some(command_line) = configured(self.config.commands.build_targets.as_deref()) else {
            bail!(t!("targets.no_source", locale = &self.locale).to_string());
        };

        let cmd = command::build_command(command_line, &self.project_root)?;
        let output = command::spawn_and_capture(cmd)
            .await
            .with_context(|| format!("Failed to run build-target classifier: {command_line}"))?;

        if !output.status.success() {
            if !output.stderr.trim().is_empty() {
                eprintln!("{}", output.stderr.trim());
            }
            bail!(
                "Build-target classifier '{}' failed with exit code {}",
                command_line,
                StepOutcome::from_exit_status(output.status).code()
            );
        }
        BuildTargets::parse(&output.stdout)
    }

    fn locale(&self) -> &str {
        &self.locale
    }
}
