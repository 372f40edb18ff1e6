//! # CI Detection Unit Tests / CI 检测单元测试

use pr_check::core::models::BuildMode;
use pr_check::infra::ci::detect_build_mode_with;
use std::collections::HashMap;

fn detect(vars: &[(&str, &str)]) -> BuildMode {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    detect_build_mode_with(|key| vars.get(key).cloned())
}

#[test]
fn test_no_ci_is_main_branch() {
    assert_eq!(detect(&[]), BuildMode::MainBranch);
}

#[test]
fn test_github_actions() {
    assert_eq!(detect(&[("GITHUB_EVENT_NAME", "pull_request")]), BuildMode::PullRequest);
    assert_eq!(
        detect(&[("GITHUB_EVENT_NAME", "pull_request_target")]),
        BuildMode::PullRequest
    );
    assert_eq!(detect(&[("GITHUB_EVENT_NAME", "push")]), BuildMode::MainBranch);
}

#[test]
fn test_travis() {
    assert_eq!(detect(&[("TRAVIS_EVENT_TYPE", "pull_request")]), BuildMode::PullRequest);
    assert_eq!(detect(&[("TRAVIS_EVENT_TYPE", "push")]), BuildMode::MainBranch);
}

#[test]
fn test_circle_ci() {
    assert_eq!(
        detect(&[("CIRCLE_PULL_REQUEST", "https://github.com/org/repo/pull/1")]),
        BuildMode::PullRequest
    );
    assert_eq!(detect(&[("CIRCLE_PULL_REQUEST", "")]), BuildMode::MainBranch);
}

#[test]
fn test_gitlab_and_azure() {
    assert_eq!(detect(&[("CI_MERGE_REQUEST_IID", "42")]), BuildMode::PullRequest);
    assert_eq!(detect(&[("BUILD_REASON", "PullRequest")]), BuildMode::PullRequest);
    assert_eq!(detect(&[("BUILD_REASON", "IndividualCI")]), BuildMode::MainBranch);
}
