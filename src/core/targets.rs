//! # Build Targets Module / 构建目标模块
//!
//! The set of labels the build-target classifier reports for a commit, and
//! the membership rules that decide which pull-request steps run.
//!
//! 构建目标分类器为一次提交报告的标签集合，
//! 以及决定运行哪些拉取请求步骤的成员规则。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub const RUNTIME: &str = "RUNTIME";
pub const FLAG_CONFIG: &str = "FLAG_CONFIG";
pub const UNIT_TEST: &str = "UNIT_TEST";
pub const INTEGRATION_TEST: &str = "INTEGRATION_TEST";

/// Labels that make this job worth running on a pull request.
pub const TRIGGER_LABELS: [&str; 4] = [RUNTIME, FLAG_CONFIG, UNIT_TEST, INTEGRATION_TEST];

/// A read-only set of build target labels, normalized to upper case.
/// 一个只读的构建目标标签集合，统一为大写。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildTargets(BTreeSet<String>);

impl BuildTargets {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            labels
                .into_iter()
                .map(|label| label.as_ref().trim().to_ascii_uppercase())
                .filter(|label| !label.is_empty())
                .collect(),
        )
    }

    /// Parses classifier output.
    ///
    /// A JSON array of strings is accepted when the text starts with `[`;
    /// anything else is split on commas and whitespace.
    ///
    /// 解析分类器输出。文本以 `[` 开头时按 JSON 字符串数组解析，
    /// 否则按逗号和空白分割。
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.starts_with('[') {
            let labels: Vec<String> = serde_json::from_str(trimmed)
                .with_context(|| format!("Failed to parse build targets as a JSON array: {trimmed}"))?;
            return Ok(Self::new(labels));
        }
        Ok(Self::new(
            trimmed.split(|c: char| c == ',' || c.is_whitespace()),
        ))
    }

    pub fn has(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    fn has_any(&self, labels: &[&str]) -> bool {
        labels.iter().any(|label| self.has(label))
    }

    /// Whether any of the trigger labels is present.
    pub fn is_relevant(&self) -> bool {
        self.has_any(&TRIGGER_LABELS)
    }

    /// Both the local-changes and the coverage unit test runs.
    pub fn wants_unit_tests(&self) -> bool {
        self.has_any(&[RUNTIME, UNIT_TEST])
    }

    pub fn wants_integration_tests(&self) -> bool {
        self.has_any(&[RUNTIME, FLAG_CONFIG, INTEGRATION_TEST])
    }

    pub fn wants_coverage_upload(&self) -> bool {
        self.has(RUNTIME)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for BuildTargets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(none)");
        }
        let labels: Vec<&str> = self.iter().collect();
        f.write_str(&labels.join(", "))
    }
}
