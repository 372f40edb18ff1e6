//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the runner:
//! process execution, CI mode detection, file system helpers and the
//! process-backed run environment.
//!
//! 此模块为运行器提供基础设施服务：
//! 进程执行、CI 模式检测、文件系统辅助功能以及基于进程的运行环境。

pub mod ci;
pub mod command;
pub mod fs;
pub mod system;
