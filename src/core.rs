//! # Core Module / 核心模块
//!
//! This module contains the core of the runner: data models,
//! configuration, build targets, the run timer and the run controller.
//!
//! 此模块包含运行器的核心：数据模型、配置、构建目标、运行计时器和运行控制器。

pub mod config;
pub mod execution;
pub mod models;
pub mod targets;
pub mod timer;

// Re-exports
pub use config::CheckConfig;
pub use execution::{CheckEnvironment, run_check};
pub use models::{BuildMode, RunReport, RunStatus, Step, StepOutcome};
pub use targets::BuildTargets;
