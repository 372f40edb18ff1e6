//! # Models Module Unit Tests / Models 模块单元测试

use pr_check::core::models::{BuildMode, RunStatus, Step, StepOutcome};
use pr_check::core::timer::{RunTimer, format_duration};
use std::time::Duration;

#[cfg(test)]
mod build_mode_tests {
    use super::*;

    #[test]
    fn test_parse_build_mode() {
        assert_eq!("pr".parse::<BuildMode>().unwrap(), BuildMode::PullRequest);
        assert_eq!("pull_request".parse::<BuildMode>().unwrap(), BuildMode::PullRequest);
        assert_eq!("MAIN".parse::<BuildMode>().unwrap(), BuildMode::MainBranch);
        assert_eq!("push".parse::<BuildMode>().unwrap(), BuildMode::MainBranch);
        assert!("nightly".parse::<BuildMode>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for mode in [BuildMode::PullRequest, BuildMode::MainBranch] {
            assert_eq!(mode.to_string().parse::<BuildMode>().unwrap(), mode);
        }
    }
}

#[cfg(test)]
mod outcome_tests {
    use super::*;

    #[test]
    fn test_failed_never_reports_zero() {
        assert_eq!(StepOutcome::failed(0), StepOutcome::Failed { code: 1 });
        assert_eq!(StepOutcome::failed(3).code(), 3);
        assert_eq!(StepOutcome::Passed.code(), 0);
        assert!(StepOutcome::failed(2).is_failure());
        assert!(!StepOutcome::Passed.is_failure());
    }

    #[cfg(unix)]
    #[test]
    fn test_from_exit_status() {
        let ok = std::process::Command::new("true").status().unwrap();
        assert_eq!(StepOutcome::from_exit_status(ok), StepOutcome::Passed);

        let failed = std::process::Command::new("sh")
            .args(["-c", "exit 3"])
            .status()
            .unwrap();
        assert_eq!(StepOutcome::from_exit_status(failed), StepOutcome::Failed { code: 3 });
    }

    #[cfg(unix)]
    #[test]
    fn test_from_exit_status_signal() {
        let killed = std::process::Command::new("sh")
            .args(["-c", "kill -9 $$"])
            .status()
            .unwrap();
        assert_eq!(StepOutcome::from_exit_status(killed), StepOutcome::Failed { code: 137 });
    }
}

#[cfg(test)]
mod status_tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(RunStatus::Passed.exit_code(), 0);
        assert_eq!(RunStatus::Skipped.exit_code(), 0);
        assert_eq!(
            RunStatus::Failed {
                step: Step::IntegrationReport,
                code: 3
            }
            .exit_code(),
            3
        );
        assert_eq!(
            RunStatus::Aborted {
                step: Step::UpdatePackages,
                code: 7
            }
            .exit_code(),
            7
        );
        assert!(RunStatus::Skipped.is_success());
    }

    #[test]
    fn test_step_names_are_unique() {
        let steps = [
            Step::DownloadArtifact,
            Step::UpdatePackages,
            Step::IntegrationReport,
            Step::UnitReport,
            Step::CoverageUpload,
            Step::ReportUpload,
            Step::UnitLocalChanges,
            Step::IntegrationCoverage,
            Step::UnitCoverage,
        ];
        let names: std::collections::HashSet<_> = steps.iter().map(|s| s.name()).collect();
        assert_eq!(names.len(), steps.len());
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(Step::IntegrationReport.failure_message("en"), "Integration tests failed!");
        assert_eq!(Step::UnitReport.failure_message("en"), "Unit tests failed!");
        assert_eq!(
            Step::CoverageUpload.failure_message("en"),
            "Failed to upload code coverage!"
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(4210)), "4.21s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn test_run_timer_measures_elapsed_time() {
        let timer = RunTimer::start("unminified-tests");
        assert_eq!(timer.label(), "unminified-tests");
        assert!(timer.started_at() <= chrono::Local::now());

        std::thread::sleep(Duration::from_millis(20));
        assert!(timer.stop() >= Duration::from_millis(20));
    }
}
