//! # pr-check Library / pr-check 库
//!
//! A CI step runner for the "unminified tests" job. It classifies the build
//! (pull request or main branch), looks at which build targets changed, and
//! runs the matching external test and coverage commands, relaying their
//! failures to its own exit code.
//!
//! 用于“未压缩测试”作业的 CI 步骤运行器。它对构建进行分类（拉取请求或主分支），
//! 查看哪些构建目标发生了变化，运行相应的外部测试和覆盖率命令，
//! 并将其失败传递到自身的退出码。
//!
//! ## Modules / 模块
//!
//! - `core` - Data models, configuration and the run controller
//! - `infra` - Process execution, CI detection and the system environment
//! - `reporting` - Console output and HTML reports
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 数据模型、配置和运行控制器
//! - `infra` - 进程执行、CI 检测和系统环境
//! - `reporting` - 控制台输出和 HTML 报告
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::config;
pub use core::execution;
pub use core::models;

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");

/// Picks the UI language from the system locale.
///
/// It attempts to match the full locale (e.g., "zh-CN"), then just the
/// language code (e.g., "en"), and finally falls back to "en".
pub fn detect_locale() -> String {
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    resolve_locale(&locale)
}

/// Maps a requested locale onto one of the bundled ones.
pub fn resolve_locale(requested: &str) -> String {
    let available_locales = rust_i18n::available_locales!();

    if available_locales.iter().any(|available| *available == requested) {
        return requested.to_string();
    }
    requested
        .split(['-', '_'])
        .next()
        .and_then(|lang_code| {
            available_locales
                .iter()
                .find(|available| available.split('-').next() == Some(lang_code))
        })
        .map(|available| available.to_string())
        .unwrap_or_else(|| "en".to_string())
}
