//! # Build Targets Unit Tests / 构建目标单元测试
//!
//! Parsing of classifier output and the membership rules that pick the
//! pull-request steps.
//!
//! 分类器输出的解析以及选择拉取请求步骤的成员规则。

use pr_check::core::targets::BuildTargets;

#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn test_parse_json_array() {
        let targets = BuildTargets::parse(r#"["RUNTIME", "DOCS"]"#).unwrap();
        assert!(targets.has("RUNTIME"));
        assert!(targets.has("DOCS"));
        assert!(!targets.has("UNIT_TEST"));
    }

    #[test]
    fn test_parse_comma_and_whitespace_separated() {
        let targets = BuildTargets::parse("RUNTIME, UNIT_TEST\nDOCS\tLINT").unwrap();
        let labels: Vec<&str> = targets.iter().collect();
        assert_eq!(labels, vec!["DOCS", "LINT", "RUNTIME", "UNIT_TEST"]);
    }

    #[test]
    fn test_parse_normalizes_case_and_drops_blanks() {
        let targets = BuildTargets::parse(" runtime ,, flag_config ").unwrap();
        assert!(targets.has("RUNTIME"));
        assert!(targets.has("FLAG_CONFIG"));
        assert_eq!(targets.iter().count(), 2);
    }

    #[test]
    fn test_parse_empty_output() {
        let targets = BuildTargets::parse("   \n").unwrap();
        assert!(targets.is_empty());
        assert!(!targets.is_relevant());
    }

    #[test]
    fn test_parse_invalid_json_is_an_error() {
        assert!(BuildTargets::parse(r#"["RUNTIME""#).is_err());
        assert!(BuildTargets::parse("[1, 2]").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(BuildTargets::new(["UNIT_TEST", "RUNTIME"]).to_string(), "RUNTIME, UNIT_TEST");
        assert_eq!(BuildTargets::default().to_string(), "(none)");
    }
}

#[cfg(test)]
mod membership_tests {
    use super::*;

    #[test]
    fn test_runtime_triggers_everything() {
        let targets = BuildTargets::new(["RUNTIME"]);
        assert!(targets.is_relevant());
        assert!(targets.wants_unit_tests());
        assert!(targets.wants_integration_tests());
        assert!(targets.wants_coverage_upload());
    }

    #[test]
    fn test_unit_test_only() {
        let targets = BuildTargets::new(["UNIT_TEST"]);
        assert!(targets.is_relevant());
        assert!(targets.wants_unit_tests());
        assert!(!targets.wants_integration_tests());
        assert!(!targets.wants_coverage_upload());
    }

    #[test]
    fn test_flag_config_only() {
        let targets = BuildTargets::new(["FLAG_CONFIG"]);
        assert!(targets.is_relevant());
        assert!(!targets.wants_unit_tests());
        assert!(targets.wants_integration_tests());
        assert!(!targets.wants_coverage_upload());
    }

    #[test]
    fn test_integration_test_only() {
        let targets = BuildTargets::new(["INTEGRATION_TEST"]);
        assert!(targets.is_relevant());
        assert!(!targets.wants_unit_tests());
        assert!(targets.wants_integration_tests());
    }

    #[test]
    fn test_unrelated_labels_are_not_relevant() {
        let targets = BuildTargets::new(["DOCS", "LINT", "VISUAL_DIFF"]);
        assert!(!targets.is_relevant());
        assert!(!targets.wants_unit_tests());
        assert!(!targets.wants_integration_tests());
        assert!(!targets.wants_coverage_upload());
    }
}
