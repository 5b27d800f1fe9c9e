//! Resume tweaks for a specific job.

use serde::Serialize;

use crate::{extract::JobRequirement, matcher::MatchResult};

/// Suggested additions, grouped by resume section.
#[derive(Serialize, Default, Clone, PartialEq, Debug)]
pub struct KeywordSuggestions {
    pub skills_section: Vec<String>,
    pub experience_bullets: Vec<String>,
    pub project_descriptions: Vec<String>,
}

impl KeywordSuggestions {
    pub fn is_empty(&self) -> bool {
        self.skills_section.is_empty()
            && self.experience_bullets.is_empty()
            && self.project_descriptions.is_empty()
    }
}

/// Suggests resume keywords for the required skills of a job.
pub fn custom_keywords(requirements: &[JobRequirement]) -> KeywordSuggestions {
    let mut suggestions = KeywordSuggestions::default();

    for req in requirements.iter().filter(|req| req.required) {
        match req.skill.to_lowercase().as_str() {
            "combine" | "async/await" | "concurrency" => {
                suggestions.experience_bullets.push(format!(
                    "Add: 'Implemented asynchronous programming using {} for optimized performance'",
                    req.skill,
                ));
            }
            "xctest" | "unit testing" => {
                suggestions.experience_bullets.push(
                    "Add: 'Developed comprehensive unit tests ensuring 90%+ code coverage'"
                        .to_string(),
                );
            }
            _ => {}
        }
    }

    suggestions
}

/// Suggests changes to existing experience bullets based on what a job found missing.
pub fn experience_modifications(result: &MatchResult) -> Vec<String> {
    let mut suggestions = Vec::new();
    let missing = &result.missing_critical_skills;

    if missing.iter().any(|skill| skill.to_lowercase().contains("test")) {
        suggestions.push(
            "Modify: 'Resolved issues in network extensions...' -> \
             'Developed and tested network extensions with comprehensive unit test coverage...'"
                .to_string(),
        );
    }
    if missing.iter().any(|skill| skill == "Combine") {
        suggestions.push(
            "Add: 'Implemented reactive programming patterns for data flow optimization'"
                .to_string(),
        );
    }
    if result.overall_score < 70.0 {
        suggestions.push(
            "Emphasize: Expand on most relevant technical achievements in current role".to_string(),
        );
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{keywords::KeywordTable, matcher::Matcher, profile::Profile};

    fn analyze(text: &str) -> MatchResult {
        let profile = Profile::builtin().unwrap();
        let table = KeywordTable::builtin().unwrap();
        Matcher::new(&profile, &table).match_job(text, "")
    }

    #[test]
    fn keywords_for_required_skills() {
        let result = analyze(
            "Combine and XCTest are required. Async/await is a plus. Swift is required.",
        );
        let suggestions = custom_keywords(&result.requirements);

        assert_eq!(
            suggestions.experience_bullets,
            [
                "Add: 'Implemented asynchronous programming using Combine for optimized performance'",
                "Add: 'Developed comprehensive unit tests ensuring 90%+ code coverage'",
            ],
        );
        assert!(suggestions.skills_section.is_empty());
        assert!(suggestions.project_descriptions.is_empty());
    }

    #[test]
    fn no_keywords_without_requirements() {
        assert!(custom_keywords(&[]).is_empty());
    }

    #[test]
    fn modifications_for_weak_match() {
        let result = analyze("XCUITest and Combine are required.");
        assert_eq!(result.missing_critical_skills, ["Combine"]);

        let mods = experience_modifications(&result);
        assert_eq!(mods.len(), 2, "{:?}", mods);
        assert!(mods[0].starts_with("Add: 'Implemented reactive programming"));
        assert!(mods[1].starts_with("Emphasize:"));
    }

    #[test]
    fn modifications_for_missing_tests() {
        let result = analyze("Snapshot testing is required.");
        assert_eq!(result.missing_critical_skills, ["Snapshot Testing"]);

        let mods = experience_modifications(&result);
        assert!(mods[0].contains("network extensions"));
        assert_eq!(mods.len(), 2);
    }

    #[test]
    fn no_modifications_for_strong_match() {
        let result = analyze("Swift and SwiftUI are required.");
        assert!(experience_modifications(&result).is_empty());
    }
}
