//! # CI Mode Detection / CI 模式检测
//!
//! Tells pull-request validation builds apart from post-merge builds by
//! looking at the variables the common CI services export.
//!
//! 通过查看常见 CI 服务导出的变量，区分拉取请求验证构建和合并后构建。

use std::env;

use crate::core::models::BuildMode;

/// Detects the build mode from the process environment.
pub fn detect_build_mode() -> BuildMode {
    detect_build_mode_with(|key| env::var(key).ok())
}

/// Detects the build mode using `lookup` to read variables.
///
/// Any service reporting a pull request wins; everything else, including
/// running outside CI, counts as a main-branch build.
///
/// 使用 `lookup` 读取变量来检测构建模式。任一服务报告为拉取请求即判定为拉取请求；
/// 其他情况（包括在 CI 之外运行）都视为主分支构建。
pub fn detect_build_mode_with<F>(lookup: F) -> BuildMode
where
    F: Fn(&str) -> Option<String>,
{
    let equals = |key: &str, expected: &[&str]| {
        lookup(key).is_some_and(|value| expected.contains(&value.trim()))
    };
    let non_empty = |key: &str| lookup(key).is_some_and(|value| !value.trim().is_empty());

    let is_pull_request = equals("GITHUB_EVENT_NAME", &["pull_request", "pull_request_target"])
        || equals("TRAVIS_EVENT_TYPE", &["pull_request"])
        || non_empty("CIRCLE_PULL_REQUEST")
        || non_empty("CI_MERGE_REQUEST_IID")
        || equals("BUILD_REASON", &["PullRequest"]);

    if is_pull_request {
        BuildMode::PullRequest
    } else {
        BuildMode::MainBranch
    }
}
