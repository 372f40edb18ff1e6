//! # HTML Reporting Module / HTML 报告模块
//!
//! Renders a finished run as a single self-contained HTML page: job, mode,
//! build targets, final status and one table row per executed step.
//!
//! 将已完成的运行渲染为单个独立的 HTML 页面：作业、模式、构建目标、
//! 最终状态以及每个已执行步骤的一行表格。

use anyhow::Result;
use maud::{DOCTYPE, Markup, html};
use rust_i18n::t;
use std::path::Path;

use crate::core::models::{RunReport, RunStatus, StepOutcome};
use crate::core::timer::format_duration;
use crate::infra::fs::write_file;

const HTML_STYLE: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif; margin: 2rem; color: #24292f; }
h1 { font-size: 1.6rem; }
dl { display: grid; grid-template-columns: max-content auto; gap: 0.3rem 1.2rem; }
dt { font-weight: 600; }
table { border-collapse: collapse; width: 100%; margin-top: 1.5rem; }
th, td { border-bottom: 1px solid #d0d7de; padding: 0.5rem 0.8rem; text-align: left; }
.duration-cell { text-align: right; font-variant-numeric: tabular-nums; }
.status-Passed { color: #1a7f37; font-weight: 600; }
.status-Failed { color: #cf222e; font-weight: 600; }
.status-Skipped { color: #6e7781; font-weight: 600; }
"#;

fn status_class(status: &RunStatus) -> &'static str {
    match status {
        RunStatus::Passed => "status-Passed",
        RunStatus::Skipped => "status-Skipped",
        RunStatus::Failed { .. } | RunStatus::Aborted { .. } => "status-Failed",
    }
}

fn outcome_cell(outcome: StepOutcome, locale: &str) -> (&'static str, String) {
    match outcome {
        StepOutcome::Passed => ("status-Passed", t!("status.passed", locale = locale).to_string()),
        StepOutcome::Failed { .. } => ("status-Failed", t!("status.failed", locale = locale).to_string()),
    }
}

/// Renders the report page.
pub fn render_html_report(report: &RunReport, locale: &str) -> Markup {
    let targets = report
        .targets
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_else(|| "-".to_string());

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (t!("html_report.title", locale = locale, job = report.job_name)) }
                style { (maud::PreEscaped(HTML_STYLE)) }
            }
            body {
                h1 { (t!("html_report.title", locale = locale, job = report.job_name)) }
                dl {
                    dt { (t!("html_report.mode", locale = locale)) }
                    dd { (report.mode.as_str()) }
                    dt { (t!("html_report.targets", locale = locale)) }
                    dd { (targets) }
                    dt { (t!("html_report.status", locale = locale)) }
                    dd class=(status_class(&report.status)) { (report.status.get_status_str(locale)) }
                    dt { (t!("html_report.exit_code", locale = locale)) }
                    dd { (report.exit_code()) }
                    dt { (t!("html_report.duration", locale = locale)) }
                    dd { (format_duration(report.elapsed)) }
                }
                table {
                    thead {
                        tr {
                            th { (t!("html_report.table.step", locale = locale)) }
                            th { (t!("html_report.table.status", locale = locale)) }
                            th { (t!("html_report.table.exit_code", locale = locale)) }
                            th class="duration-cell" { (t!("html_report.table.duration", locale = locale)) }
                        }
                    }
                    tbody {
                        @for record in &report.steps {
                            tr {
                                td { (record.step.name()) }
                                @let (class, label) = outcome_cell(record.outcome, locale);
                                td class=(class) { (label) }
                                td { (record.outcome.code()) }
                                td class="duration-cell" { (format_duration(record.duration)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the report and writes it to `output_path`.
///
/// # Errors / 错误
/// Fails if the file (or its parent directory) cannot be written.
pub fn generate_html_report(report: &RunReport, output_path: &Path, locale: &str) -> Result<()> {
    let markup = render_html_report(report, locale);
    write_file(output_path, &markup.into_string())
}
