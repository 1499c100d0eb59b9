use serde::Serialize;

use crate::config::{DEFAULT_JOB_DESCRIPTION, DEFAULT_SKILLS};

/// Scoring parameters as the operator typed them. Free text, never validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationState {
    job_description: String,
    skills: String,
}

/// Read-only snapshot taken when a request is dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationConfig {
    pub job_description: String,
    pub skills: Vec<String>,
}

impl Default for ConfigurationState {
    fn default() -> Self {
        Self::new(DEFAULT_JOB_DESCRIPTION, DEFAULT_SKILLS)
    }
}

impl ConfigurationState {
    pub fn new(job_description: impl Into<String>, skills: impl Into<String>) -> Self {
        Self {
            job_description: job_description.into(),
            skills: skills.into(),
        }
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    /// The comma-separated skills string exactly as entered.
    pub fn raw_skills(&self) -> &str {
        &self.skills
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    pub fn set_skills(&mut self, text: impl Into<String>) {
        self.skills = text.into();
    }

    pub fn snapshot(&self) -> EvaluationConfig {
        EvaluationConfig {
            job_description: self.job_description.clone(),
            skills: parse_skills(&self.skills),
        }
    }
}

/// Splits on commas and trims each entry. Empty entries (e.g. from a trailing
/// comma) are kept; what they mean is up to the scoring service. A blank
/// string means no skills at all.
pub fn parse_skills(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skills_trims_entries() {
        assert_eq!(
            parse_skills("python,  machine learning , communication"),
            vec!["python", "machine learning", "communication"]
        );
    }

    #[test]
    fn test_parse_skills_keeps_empty_tokens() {
        assert_eq!(parse_skills("python, ,sql,"), vec!["python", "", "sql", ""]);
    }

    #[test]
    fn test_parse_skills_blank_is_no_skills() {
        assert!(parse_skills("").is_empty());
        assert!(parse_skills("   ").is_empty());
    }

    #[test]
    fn test_snapshot_is_detached_from_later_edits() {
        let mut state = ConfigurationState::new("Backend engineer", "rust, sql");
        let snapshot = state.snapshot();
        state.set_job_description("Frontend engineer");
        state.set_skills("react");

        assert_eq!(snapshot.job_description, "Backend engineer");
        assert_eq!(snapshot.skills, vec!["rust", "sql"]);
        assert_eq!(state.snapshot().skills, vec!["react"]);
    }

    #[test]
    fn test_default_seed_values() {
        let state = ConfigurationState::default();
        assert_eq!(state.raw_skills(), DEFAULT_SKILLS);
        assert_eq!(
            state.snapshot().skills,
            vec!["python", "machine learning", "communication"]
        );
    }

    #[test]
    fn test_empty_fields_allowed() {
        let state = ConfigurationState::new("", "");
        let snapshot = state.snapshot();
        assert_eq!(snapshot.job_description, "");
        assert!(snapshot.skills.is_empty());
    }
}
