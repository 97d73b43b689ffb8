//! Substitution rules and per-file outcomes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::errors::PatchError;
use crate::locate::InstalledFile;

/// Literal, case-sensitive text substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionRule {
    pub pattern: String,
    pub replacement: String,
}

impl SubstitutionRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    /// Replace every occurrence, returning the new text and the count.
    ///
    /// An empty pattern matches nothing.
    pub fn apply(&self, content: &str) -> (String, usize) {
        if self.pattern.is_empty() {
            return (content.to_string(), 0);
        }
        let count = content.matches(self.pattern.as_str()).count();
        if count == 0 {
            return (content.to_string(), 0);
        }
        (content.replace(&self.pattern, &self.replacement), count)
    }
}

/// Apply rules in order. Returns the final text and one count per rule.
pub fn apply_rules(content: &str, rules: &[SubstitutionRule]) -> (String, Vec<usize>) {
    let mut current = content.to_string();
    let mut counts = Vec::with_capacity(rules.len());
    for rule in rules {
        let (next, count) = rule.apply(&current);
        current = next;
        counts.push(count);
    }
    (current, counts)
}

/// Handling of an existing `<path>.bak`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackupPolicy {
    /// Always rewrite the backup. A second run backs up already-patched text.
    #[default]
    Overwrite,
    /// Leave an existing backup alone so it keeps the first original.
    KeepOriginal,
}

/// Result of patching one file.
#[derive(Debug)]
pub struct PatchOutcome {
    pub file: InstalledFile,
    pub backup_path: PathBuf,
    /// Substitutions performed per rule; empty on failure.
    pub replacements: Vec<usize>,
    pub error: Option<PatchError>,
}

impl PatchOutcome {
    pub fn success(&self) -> bool {
        self.error.is_none()
    }

    /// Total substitutions across all rules.
    pub fn total_replacements(&self) -> usize {
        self.replacements.iter().sum()
    }
}

/// Aggregate of a patch run.
#[derive(Debug)]
pub struct PatchSummary {
    pub outcomes: Vec<PatchOutcome>,
    pub success_count: usize,
    pub total: usize,
}

impl PatchSummary {
    pub fn from_outcomes(outcomes: Vec<PatchOutcome>) -> Self {
        let success_count = outcomes.iter().filter(|o| o.success()).count();
        let total = outcomes.len();
        Self {
            outcomes,
            success_count,
            total,
        }
    }

    pub fn failure_count(&self) -> usize {
        self.total - self.success_count
    }

    pub fn all_succeeded(&self) -> bool {
        self.success_count == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numpy_rules() -> Vec<SubstitutionRule> {
        vec![
            SubstitutionRule::new("np.bool", "bool"),
            SubstitutionRule::new("np.object", "object"),
        ]
    }

    #[test]
    fn applies_rules_in_order_with_counts() {
        let src = "x = np.bool\ny = np.object\nz = np.bool(1)\n";
        let (out, counts) = apply_rules(src, &numpy_rules());

        assert_eq!(out, "x = bool\ny = object\nz = bool(1)\n");
        assert_eq!(counts, vec![2, 1]);
    }

    #[test]
    fn absent_pattern_is_noop() {
        let src = "import numpy as np\n";
        let (out, counts) = apply_rules(src, &numpy_rules());
        assert_eq!(out, src);
        assert_eq!(counts, vec![0, 0]);
    }

    #[test]
    fn case_sensitive_and_literal() {
        let rule = SubstitutionRule::new("np.Bool", "bool");
        assert_eq!(rule.apply("np.bool").1, 0);

        let dotted = SubstitutionRule::new("a.c", "X");
        assert_eq!(dotted.apply("abc a.c").0, "abc X");
    }

    #[test]
    fn later_rules_see_earlier_output() {
        let rules = vec![
            SubstitutionRule::new("foo", "bar"),
            SubstitutionRule::new("bar", "baz"),
        ];
        assert_eq!(apply_rules("foo", &rules).0, "baz");
    }

    #[test]
    fn empty_pattern_matches_nothing() {
        let rule = SubstitutionRule::new("", "!");
        assert_eq!(rule.apply("abc"), ("abc".to_string(), 0));
    }

    #[test]
    fn deterministic_and_idempotent_content() {
        let src = "a = np.bool_\nb = np.object\n";
        let (first, _) = apply_rules(src, &numpy_rules());
        let (again, _) = apply_rules(src, &numpy_rules());
        assert_eq!(first, again);

        let (second_pass, counts) = apply_rules(&first, &numpy_rules());
        assert_eq!(second_pass, first);
        assert_eq!(counts, vec![0, 0]);
    }

    #[test]
    fn backup_policy_serializes_kebab_case() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            backup: BackupPolicy,
        }
        let text = toml::to_string(&Wrapper {
            backup: BackupPolicy::KeepOriginal,
        })
        .unwrap();
        assert_eq!(text.trim(), "backup = \"keep-original\"");
    }
}
