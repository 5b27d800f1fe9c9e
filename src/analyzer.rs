use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tiny_bail::prelude::*;

use crate::{
    error::Result,
    keywords::KeywordTable,
    matcher::{MatchResult, Matcher},
    profile::Profile,
    report,
};

/// A summary of one past analysis.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub job_title: String,
    pub match_score: f64,
    pub critical_missing: usize,
    pub recommendations: usize,
}

impl HistoryEntry {
    fn new(result: &MatchResult) -> Self {
        Self {
            timestamp: Utc::now(),
            job_title: result.job_title.clone(),
            match_score: result.overall_score,
            critical_missing: result.missing_critical_skills.len(),
            recommendations: result.recommendations.len(),
        }
    }
}

/// An analysis session: a profile, the keywords to look for, and what has been analyzed so far.
pub struct Analyzer {
    profile: Profile,
    keywords: KeywordTable,
    pub history: Vec<HistoryEntry>,
}

impl Analyzer {
    pub fn new(profile: Profile, keywords: KeywordTable) -> Self {
        Self {
            profile,
            keywords,
            history: Vec::new(),
        }
    }

    /// A session with the embedded profile and keyword table.
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(Profile::builtin()?, KeywordTable::builtin()?))
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    pub fn matcher(&self) -> Matcher<'_> {
        Matcher::new(&self.profile, &self.keywords)
    }

    /// Analyzes a job description and records it in the history.
    pub fn analyze_text(&mut self, text: &str, title: &str) -> MatchResult {
        let title = if title.trim().is_empty() {
            Matcher::DEFAULT_TITLE
        } else {
            title.trim()
        };
        let result = self.matcher().match_job(text, title);
        self.history.push(HistoryEntry::new(&result));
        log::info!("[{}] Match score: {:.1}%", result.job_title, result.overall_score);
        result
    }

    /// Analyzes the job description in a file. Returns `None` if the file can't be read.
    pub fn analyze_file(&mut self, path: impl AsRef<Path>, title: &str) -> Option<MatchResult> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                return None;
            }
        };

        let title = if title.trim().is_empty() {
            format!("Job from {}", path.display())
        } else {
            title.to_string()
        };
        Some(self.analyze_text(&text, &title))
    }

    /// Analyzes several job files, titled by file stem. Unreadable files are skipped.
    pub fn compare<P: AsRef<Path>>(
        &mut self,
        paths: impl IntoIterator<Item = P>,
    ) -> Vec<MatchResult> {
        paths
            .into_iter()
            .filter_map(|path| {
                let path = path.as_ref();
                let title = path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.analyze_file(path, &title)
            })
            .collect()
    }

    /// Exports a result as JSON. Failures are logged.
    pub fn save(&self, result: &MatchResult, path: Option<&Path>) {
        let path = r!(report::export(result, path));
        log::info!("Analysis saved to {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_analysis_is_recorded() {
        let mut analyzer = Analyzer::builtin().unwrap();
        let result = analyzer.analyze_text("Swift and Combine are required.", "iOS Engineer");

        assert_eq!(result.job_title, "iOS Engineer");
        assert_eq!(
            analyzer.history,
            [HistoryEntry {
                timestamp: analyzer.history[0].timestamp,
                job_title: "iOS Engineer".to_string(),
                match_score: 50.0,
                critical_missing: 1,
                recommendations: result.recommendations.len(),
            }],
        );
    }

    #[test]
    fn empty_text_is_recorded() {
        let mut analyzer = Analyzer::builtin().unwrap();
        let result = analyzer.analyze_text("", "");
        assert_eq!(result.job_title, Matcher::DEFAULT_TITLE);
        assert_eq!(result.overall_score, 100.0);
        assert!(result.requirements.is_empty());
        assert_eq!(analyzer.history.len(), 1);
    }

    #[test]
    fn file_analysis() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.txt");
        std::fs::write(&path, "SwiftUI and Core Data are required.").unwrap();

        let mut analyzer = Analyzer::builtin().unwrap();
        let result = analyzer.analyze_file(&path, "").unwrap();
        assert_eq!(result.job_title, format!("Job from {}", path.display()));
        assert_eq!(result.overall_score, 100.0);

        let result = analyzer.analyze_file(&path, "Mac Developer").unwrap();
        assert_eq!(result.job_title, "Mac Developer");
        assert_eq!(analyzer.history.len(), 2);
    }

    #[test]
    fn missing_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut analyzer = Analyzer::builtin().unwrap();
        assert!(analyzer.analyze_file(dir.path().join("missing.txt"), "").is_none());
        assert!(analyzer.history.is_empty());
    }

    #[test]
    fn compare_titles_jobs_by_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let ios = dir.path().join("ios_lead.txt");
        let flutter = dir.path().join("flutter.txt");
        std::fs::write(&ios, "Swift.").unwrap();
        std::fs::write(&flutter, "Flutter.").unwrap();

        let mut analyzer = Analyzer::builtin().unwrap();
        let results = analyzer.compare([&ios, &dir.path().join("missing.txt"), &flutter]);
        let titles = results
            .iter()
            .map(|result| result.job_title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(titles, ["ios_lead", "flutter"]);
        assert_eq!(results[0].overall_score, 100.0);
        assert_eq!(results[1].overall_score, 0.0);
        assert_eq!(analyzer.history.len(), 2);
    }

    #[test]
    fn save_failure_keeps_result() {
        let dir = tempfile::tempdir().unwrap();
        let mut analyzer = Analyzer::builtin().unwrap();
        let result = analyzer.analyze_text("Swift.", "");
        let before = result.clone();

        analyzer.save(&result, Some(&dir.path().join("missing").join("out.json")));
        assert_eq!(result, before);

        let path = dir.path().join("out.json");
        analyzer.save(&result, Some(&path));
        assert!(path.exists());
    }
}
