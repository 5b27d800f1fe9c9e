//! Rendering match results for the terminal and exporting them as JSON.

use std::{
    collections::BTreeMap,
    fmt::Write as _,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local, Utc};
use colored::{Color, ColoredString, Colorize as _};
use serde::{Deserialize, Serialize};

use crate::{
    analyzer::HistoryEntry,
    error::{Error, Result},
    matcher::MatchResult,
    profile::Profile,
};

/// The JSON document written for a match result.
///
/// Readers should ignore fields they don't know about.
#[derive(Serialize, Deserialize, PartialEq, Debug)]
pub struct Report {
    pub timestamp: DateTime<Utc>,
    pub job_title: String,
    pub overall_score: f64,
    /// Keyed by category key, e.g. "technical_core".
    pub category_scores: BTreeMap<String, f64>,
    pub matched_skills: Vec<MatchedSkill>,
    pub missing_critical_skills: Vec<String>,
    pub missing_nice_to_have: Vec<String>,
    pub recommendations: Vec<String>,
    pub competitive_advantages: Vec<String>,
    pub interview_focus_areas: Vec<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
pub struct MatchedSkill {
    pub name: String,
    pub proficiency: u8,
}

impl Report {
    pub fn new(result: &MatchResult) -> Self {
        Self {
            timestamp: Utc::now(),
            job_title: result.job_title.clone(),
            overall_score: result.overall_score,
            category_scores: result
                .category_scores
                .iter()
                .map(|(category, score)| (category.key().to_string(), *score))
                .collect(),
            matched_skills: result
                .matched_skills
                .iter()
                .map(|skill| MatchedSkill {
                    name: skill.name.clone(),
                    proficiency: skill.proficiency,
                })
                .collect(),
            missing_critical_skills: result.missing_critical_skills.clone(),
            missing_nice_to_have: result.missing_nice_to_have.clone(),
            recommendations: result.recommendations.clone(),
            competitive_advantages: result.competitive_advantages.clone(),
            interview_focus_areas: result.interview_focus_areas.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// The file name used when the caller doesn't pick one.
pub fn default_file_name(now: DateTime<Local>) -> String {
    now.format("job_analysis_%Y%m%d_%H%M%S.json").to_string()
}

/// Writes `result` as JSON to `path`, or to [`default_file_name`] in the working directory.
pub fn export(result: &MatchResult, path: Option<&Path>) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(default_file_name(Local::now())),
    };
    let json = Report::new(result).to_json()?;
    std::fs::write(&path, json).map_err(Error::io(&path))?;
    Ok(path)
}

pub fn verdict(score: f64) -> &'static str {
    if score >= 85.0 {
        "EXCELLENT FIT - Apply immediately!"
    } else if score >= 75.0 {
        "STRONG FIT - Apply with confidence"
    } else if score >= 65.0 {
        "GOOD FIT - Apply with targeted preparation"
    } else if score >= 50.0 {
        "MODERATE FIT - Consider learning key skills first"
    } else {
        "WEAK FIT - Focus on skill development before applying"
    }
}

fn score_color(score: f64) -> Color {
    if score >= 80.0 {
        Color::Green
    } else if score >= 60.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// A fixed-width bar like `[█████░░░░░░░░░░]`.
pub fn progress_bar(percentage: f64, width: usize) -> String {
    let filled = ((width as f64 * percentage / 100.0) as usize).min(width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

/// Five dots, one filled per two points of proficiency.
fn proficiency_meter(proficiency: u8) -> String {
    let filled = usize::from(proficiency / 2).min(5);
    format!("{}{}", "●".repeat(filled), "○".repeat(5 - filled))
}

fn heading(s: &str) -> ColoredString {
    s.bold()
}

/// Renders a match result for the terminal.
pub fn render(result: &MatchResult) -> String {
    let mut out = String::new();
    // Writing to a `String` can't fail.
    let _ = write_result(&mut out, result);
    out
}

fn write_result(out: &mut String, result: &MatchResult) -> std::fmt::Result {
    let score = result.overall_score;
    writeln!(out, "{} {}", heading("Analyzing:"), result.job_title)?;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(
        out,
        "{} {}",
        heading("OVERALL MATCH:"),
        format!("{:.1}%", score).bold().color(score_color(score)),
    )?;
    writeln!(out, "{} {}", heading("RECOMMENDATION:"), verdict(score))?;

    writeln!(out, "\n{}", heading("SKILL CATEGORY BREAKDOWN:"))?;
    for (category, category_score) in &result.category_scores {
        writeln!(
            out,
            "  {:<20} {} {:.1}%",
            category.to_string(),
            progress_bar(*category_score, 15),
            category_score,
        )?;
    }

    let mut strengths = result.matched_skills.iter().collect::<Vec<_>>();
    strengths.sort_by(|a, b| b.proficiency.cmp(&a.proficiency));
    writeln!(
        out,
        "\n{}",
        heading(&format!("YOUR STRENGTHS ({} matches):", result.matched_skills.len())),
    )?;
    for (i, skill) in strengths.iter().take(8).enumerate() {
        writeln!(
            out,
            "  {:2}. {:<20} {} ({}/10)",
            i + 1,
            skill.name,
            proficiency_meter(skill.proficiency),
            skill.proficiency,
        )?;
    }

    let missing = &result.missing_critical_skills;
    if !missing.is_empty() {
        writeln!(
            out,
            "\n{}",
            format!("CRITICAL SKILL GAPS ({}):", missing.len()).bold().red(),
        )?;
        for (i, skill) in missing.iter().take(6).enumerate() {
            writeln!(out, "  {}. {}", i + 1, skill)?;
        }
        if missing.len() > 6 {
            writeln!(out, "  ... and {} more", missing.len() - 6)?;
        }
    }

    writeln!(out, "\n{}", heading("PRIORITY ACTIONS:"))?;
    for (i, rec) in result.recommendations.iter().take(5).enumerate() {
        writeln!(out, "  {}. {}", i + 1, rec)?;
    }

    if !result.competitive_advantages.is_empty() {
        writeln!(out, "\n{}", heading("YOUR COMPETITIVE EDGE:"))?;
        for advantage in &result.competitive_advantages {
            writeln!(out, "  • {}", advantage)?;
        }
    }

    writeln!(out, "\n{}", heading("INTERVIEW PREPARATION:"))?;
    for focus in result.interview_focus_areas.iter().take(4) {
        writeln!(out, "  • {}", focus)?;
    }

    writeln!(out, "\n{}", heading("APPLICATION STRATEGY:"))?;
    for line in strategy(score) {
        writeln!(out, "  {}", line)?;
    }

    Ok(())
}

pub fn strategy(score: f64) -> [&'static str; 3] {
    if score >= 75.0 {
        [
            "Priority: HIGH - Apply within 1-2 days",
            "Cover letter: Emphasize your MDM expertise and Swift proficiency",
            "Timeline: Expect to hear back within 1-2 weeks",
        ]
    } else if score >= 60.0 {
        [
            "Priority: MEDIUM - Apply after addressing critical gaps",
            "Preparation: 1-2 weeks of targeted learning recommended",
            "Cover letter: Address missing skills with learning commitment",
        ]
    } else {
        [
            "Priority: LOW - Significant skill development needed",
            "Preparation: 1-3 months of learning recommended",
            "Focus: Build portfolio projects demonstrating missing skills",
        ]
    }
}

/// Ranks results by score, best first. Returns `None` for fewer than two results.
pub fn render_comparison(results: &[MatchResult]) -> Option<String> {
    if results.len() < 2 {
        return None;
    }

    let mut ranked = results.iter().collect::<Vec<_>>();
    ranked.sort_by(|a, b| b.overall_score.total_cmp(&a.overall_score));

    let mut out = String::new();
    let _ = write_comparison(&mut out, &ranked);
    Some(out)
}

fn write_comparison(out: &mut String, ranked: &[&MatchResult]) -> std::fmt::Result {
    writeln!(out, "{}", heading("JOB COMPARISON ANALYSIS"))?;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out, "{}", heading("RANKING BY MATCH SCORE:"))?;
    for (i, result) in ranked.iter().enumerate() {
        writeln!(
            out,
            "  {:>2}. {}: {}",
            i + 1,
            result.job_title,
            format!("{:.1}%", result.overall_score).color(score_color(result.overall_score)),
        )?;
    }

    let best = ranked[0];
    writeln!(out, "\n{} {}", heading("BEST FIT:"), best.job_title)?;
    writeln!(out, "  • Match Score: {:.1}%", best.overall_score)?;
    writeln!(
        out,
        "  • Missing Critical: {} skills",
        best.missing_critical_skills.len(),
    )?;
    writeln!(
        out,
        "  • Competitive Advantages: {}",
        best.competitive_advantages.len(),
    )
}

/// Renders the profile with its strongest skills, projects, and recent analyses.
pub fn render_profile(profile: &Profile, history: &[HistoryEntry]) -> String {
    let mut out = String::new();
    let _ = write_profile(&mut out, profile, history);
    out
}

fn write_profile(
    out: &mut String,
    profile: &Profile,
    history: &[HistoryEntry],
) -> std::fmt::Result {
    let info = &profile.info;
    writeln!(
        out,
        "{}",
        format!("{} - PROFILE SUMMARY", info.name.to_uppercase()).bold(),
    )?;
    writeln!(out, "{}", "=".repeat(50))?;
    writeln!(out, "Location: {}", info.location)?;
    writeln!(out, "Experience: {} years", info.experience_years)?;
    writeln!(out, "Specialization: {}", info.title)?;

    writeln!(out, "\n{}", heading("TOP SKILLS:"))?;
    for skill in profile.top_skills(10) {
        let marker = if skill.critical { "*".yellow() } else { "•".normal() };
        writeln!(
            out,
            "  {} {} ({}/10) - {}y exp",
            marker, skill.name, skill.proficiency, skill.years,
        )?;
    }

    writeln!(
        out,
        "\n{}",
        heading(&format!("PROJECTS ({}):", profile.projects.len())),
    )?;
    for project in &profile.projects {
        writeln!(out, "  • {}: {}", project.name, project.description)?;
    }

    writeln!(
        out,
        "\n{}",
        heading(&format!("ANALYSIS HISTORY ({} jobs analyzed):", history.len())),
    )?;
    for entry in history.iter().rev().take(5).rev() {
        writeln!(
            out,
            "  • {}: {} ({:.1}%)",
            entry.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            entry.job_title,
            entry.match_score,
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;
    use crate::{keywords::KeywordTable, matcher::Matcher};

    fn sample_result(text: &str, title: &str) -> MatchResult {
        let profile = Profile::builtin().unwrap();
        let table = KeywordTable::builtin().unwrap();
        Matcher::new(&profile, &table).match_job(text, title)
    }

    #[test]
    fn json_round_trip() {
        let result = sample_result(
            "Required: 5+ years of Swift and SwiftUI. Nice to have: ARKit. Combine is a must have.",
            "iOS Developer",
        );
        let report = Report::new(&result);
        let parsed = Report::from_json(&report.to_json().unwrap()).unwrap();
        assert_eq!(parsed, report);

        assert_eq!(parsed.job_title, result.job_title);
        assert_eq!(parsed.overall_score, result.overall_score);
        assert_eq!(parsed.missing_critical_skills, ["Combine"]);
        assert_eq!(parsed.missing_nice_to_have, ["ARKit"]);
        assert_eq!(parsed.recommendations, result.recommendations);
        assert_eq!(parsed.competitive_advantages, result.competitive_advantages);
        assert_eq!(parsed.interview_focus_areas, result.interview_focus_areas);
        assert_eq!(
            parsed.matched_skills,
            [
                MatchedSkill {
                    name: "Swift".to_string(),
                    proficiency: 8,
                },
                MatchedSkill {
                    name: "SwiftUI".to_string(),
                    proficiency: 8,
                },
            ],
        );
        for (category, score) in &result.category_scores {
            assert_eq!(parsed.category_scores[category.key()], *score);
        }
    }

    #[test]
    fn json_uses_category_keys() {
        let result = sample_result("Swift and Xcode.", "");
        let json = Report::new(&result).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["category_scores"]["technical_core"], 100.0);
        assert_eq!(value["category_scores"]["tools"], 100.0);
        assert_eq!(value["matched_skills"][0]["name"], "Swift");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let result = sample_result("Swift.", "");
        let mut value = serde_json::to_value(Report::new(&result)).unwrap();
        value["schema_version"] = serde_json::json!(2);
        let parsed: Report = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.job_title, result.job_title);
    }

    #[test]
    fn export_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.json");
        let result = sample_result("Swift and SwiftUI.", "iOS Developer");

        let written = export(&result, Some(&path)).unwrap();
        assert_eq!(written, path);
        let report = Report::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(report.job_title, "iOS Developer");
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("analysis.json");
        let result = sample_result("Swift.", "");
        assert!(matches!(export(&result, Some(&path)), Err(Error::Io { .. })));
    }

    #[test]
    fn file_name_from_timestamp() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(default_file_name(now), "job_analysis_20240309_140507.json");
    }

    #[test]
    fn verdicts() {
        for (score, prefix) in [
            (100.0, "EXCELLENT"),
            (85.0, "EXCELLENT"),
            (80.0, "STRONG"),
            (70.0, "GOOD"),
            (50.0, "MODERATE"),
            (49.9, "WEAK"),
            (0.0, "WEAK"),
        ] {
            assert!(verdict(score).starts_with(prefix), "{}", score);
        }
    }

    #[test]
    fn progress_bars() {
        assert_eq!(progress_bar(0.0, 5), "[░░░░░]");
        assert_eq!(progress_bar(60.0, 5), "[███░░]");
        assert_eq!(progress_bar(100.0, 5), "[█████]");
        assert_eq!(progress_bar(100.0, 15).chars().count(), 17);
    }

    #[test]
    fn proficiency_meters() {
        assert_eq!(proficiency_meter(10), "●●●●●");
        assert_eq!(proficiency_meter(7), "●●●○○");
        assert_eq!(proficiency_meter(1), "○○○○○");
    }

    #[test]
    fn render_lists_gaps() {
        let result = sample_result(
            "GraphQL, Flutter, Jenkins, Bitrise, Xamarin, Cordova and Redux are required.",
            "Cross-platform Engineer",
        );
        let text = render(&result);
        assert!(text.contains("Cross-platform Engineer"));
        assert!(text.contains("Bitrise"));
        assert!(text.contains("... and 1 more"));
        assert!(text.contains(verdict(0.0)));
    }

    #[test]
    fn comparison_needs_two_results() {
        let weak = sample_result("GraphQL and Flutter.", "Weak");
        let strong = sample_result("Swift and SwiftUI.", "Strong");
        assert!(render_comparison(&[]).is_none());
        assert!(render_comparison(std::slice::from_ref(&weak)).is_none());

        let text = render_comparison(&[weak, strong]).unwrap();
        let strong_at = text.find("Strong").unwrap();
        let weak_at = text.find("Weak").unwrap();
        assert!(strong_at < weak_at);
        assert!(text.contains("BEST FIT:"));
    }

    #[test]
    fn profile_summary() {
        let profile = Profile::builtin().unwrap();
        let text = render_profile(&profile, &[]);
        assert!(text.contains("SACHIN KUMAR"));
        assert!(text.contains("Bangalore, India"));
        assert!(text.contains("NotingDown"));
        assert!(text.contains("(0 jobs analyzed)"));
    }

    #[test]
    fn profile_summary_shows_last_five_analyses() {
        let mut analyzer = crate::analyzer::Analyzer::builtin().unwrap();
        for i in 1..=6 {
            analyzer.analyze_text("Swift.", &format!("Job {}", i));
        }
        let text = render_profile(analyzer.profile(), &analyzer.history);
        assert!(text.contains("(6 jobs analyzed)"));
        assert!(!text.contains("Job 1"));
        for i in 2..=6 {
            assert!(text.contains(&format!("Job {} (100.0%)", i)), "{}", i);
        }
    }
}
