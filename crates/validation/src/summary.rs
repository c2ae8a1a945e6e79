use serde::{Deserialize, Serialize};

/// Errors block publishing; warnings are informational.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Appends another summary's findings after this one's.
    pub fn merge(&mut self, other: ValidationSummary) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// True when nothing blocks publishing the dashboard.
    pub fn is_publishable(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_concatenates_in_order() {
        let mut first = ValidationSummary::new();
        first.error("a");
        first.warning("w1");
        let mut second = ValidationSummary::new();
        second.error("b");
        second.warning("w2");

        first.merge(second);
        assert_eq!(first.errors, vec!["a", "b"]);
        assert_eq!(first.warnings, vec!["w1", "w2"]);
        assert!(!first.is_publishable());
    }

    #[test]
    fn warnings_alone_are_publishable() {
        let mut summary = ValidationSummary::new();
        summary.warning("stale");
        assert!(summary.is_publishable());
    }
}
