//! # Reporting Module / 报告模块
//!
//! This module handles console progress output and the optional HTML run
//! report.
//!
//! 此模块处理控制台进度输出和可选的 HTML 运行报告。

pub mod console;
pub mod html;

// Re-export common reporting functions
pub use console::print_summary;
pub use html::generate_html_report;
