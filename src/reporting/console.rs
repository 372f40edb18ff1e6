//! # Console Reporting Module / 控制台报告模块
//!
//! Every line the runner prints goes through here: timer start/stop, step
//! progress, the skip notice and the final summary. Lines are prefixed with
//! the job name so they stand out among the output of the commands
//! themselves.
//!
//! 运行器打印的每一行都经过这里：计时器开始/停止、步骤进度、跳过通知和最终摘要。
//! 每行都以作业名称为前缀，以便在命令自身的输出中突出显示。

use colored::*;
use rust_i18n::t;
use std::fmt::Display;
use std::time::Duration;

use crate::core::models::{RunReport, RunStatus, Step, StepOutcome};
use crate::core::targets::BuildTargets;
use crate::core::timer::{RunTimer, format_duration};

/// The bold yellow `job-name:` prefix.
pub fn prefix(job_name: &str) -> ColoredString {
    format!("{job_name}:").yellow().bold()
}

pub fn print_timer_started(timer: &RunTimer, locale: &str) {
    println!(
        "{} {}",
        prefix(timer.label()),
        t!(
            "timer.started",
            locale = locale,
            label = timer.label().cyan(),
            time = timer.started_at().format("%H:%M:%S")
        )
    );
}

pub fn print_timer_stopped(label: &str, elapsed: Duration, locale: &str) {
    println!(
        "{} {}",
        prefix(label),
        t!(
            "timer.stopped",
            locale = locale,
            label = label.cyan(),
            duration = format_duration(elapsed).bold()
        )
    );
}

pub fn print_step_started(job_name: &str, step: Step, command_line: &str, locale: &str) {
    println!(
        "{} {}",
        prefix(job_name),
        t!(
            "step.started",
            locale = locale,
            name = step.name(),
            command = command_line.cyan()
        )
    );
}

pub fn print_step_finished(
    job_name: &str,
    step: Step,
    command_line: &str,
    outcome: StepOutcome,
    duration: Duration,
    locale: &str,
) {
    let line = match outcome {
        StepOutcome::Passed => t!(
            "step.done",
            locale = locale,
            name = step.name(),
            command = command_line,
            duration = format_duration(duration)
        )
        .green(),
        StepOutcome::Failed { code } => t!(
            "step.failed",
            locale = locale,
            name = step.name(),
            command = command_line,
            code = code,
            duration = format_duration(duration)
        )
        .red(),
    };
    println!("{} {}", prefix(job_name), line);
}

pub fn print_step_not_configured(job_name: &str, step: Step, locale: &str) {
    println!(
        "{} {}",
        prefix(job_name),
        t!("step.not_configured", locale = locale, name = step.name()).dimmed()
    );
}

pub fn print_spawn_failed(job_name: &str, command_line: &str, error: &dyn Display, locale: &str) {
    eprintln!(
        "{} {}",
        prefix(job_name),
        t!(
            "step.spawn_failed",
            locale = locale,
            command = command_line,
            error = error
        )
        .red()
    );
}

pub fn print_build_targets(job_name: &str, targets: &BuildTargets, locale: &str) {
    println!(
        "{} {}",
        prefix(job_name),
        t!("targets.detected", locale = locale, targets = targets.to_string().cyan())
    );
}

/// Prints the red notice for a step whose failure does not end the run.
pub fn print_step_failure_notice(step: Step, locale: &str) {
    println!("{}", step.failure_message(locale).red());
}

/// Tells the user why a pull-request build ran nothing.
pub fn print_skip_notice(job_name: &str, locale: &str) {
    println!(
        "{} {}",
        prefix(job_name),
        t!("run.skip_notice", locale = locale, job = job_name.cyan())
    );
}

/// Prints a formatted summary of the executed steps and the final status.
///
/// # Output Format / 输出格式
/// ```text
/// --- Step Summary ---
///   - Passed   | update-packages           |      12.40s
///   - Failed   | integration-report        |    3m 12s  (exit 3)
///   - Passed   | report-upload             |       1.02s
/// ```
pub fn print_summary(report: &RunReport, locale: &str) {
    println!("\n{}", t!("summary.banner", locale = locale).bold());

    if report.steps.is_empty() {
        println!("  {}", t!("summary.no_steps", locale = locale).dimmed());
    }

    for record in &report.steps {
        let duration_str = format_duration(record.duration);
        let (status, code_str) = match record.outcome {
            StepOutcome::Passed => (t!("status.passed", locale = locale).green(), String::new()),
            StepOutcome::Failed { code } => (
                t!("status.failed", locale = locale).red(),
                format!(" (exit {code})"),
            ),
        };
        println!(
            "  - {:<10} | {:<24} | {:>10}{}",
            status,
            record.step.name(),
            duration_str,
            code_str
        );
    }

    let status_str = report.status.get_status_str(locale);
    let line = match report.status {
        RunStatus::Passed => t!("summary.final_passed", locale = locale, status = status_str).green(),
        RunStatus::Skipped => t!("summary.final_skipped", locale = locale, status = status_str).cyan(),
        RunStatus::Failed { step, code } | RunStatus::Aborted { step, code } => t!(
            "summary.final_failed",
            locale = locale,
            status = status_str,
            name = step.name(),
            code = code
        )
        .red(),
    };
    println!("\n{}", line.bold());
}
