use std::collections::{BTreeMap, HashMap, HashSet};

use crate::{
    extract::{Extractor, JobRequirement},
    keywords::KeywordTable,
    profile::{Profile, Skill, SkillCategory},
    rules::{self, MatchContext},
};

/// How well a profile fits one job description.
#[derive(Clone, PartialEq, Debug)]
pub struct MatchResult {
    pub job_title: String,
    /// Percentage of requirements matched by the profile, 0 to 100.
    pub overall_score: f64,
    /// Percentage of requirements matched, per category that has requirements.
    pub category_scores: BTreeMap<SkillCategory, f64>,
    /// Profile skills that matched at least one requirement, without duplicates.
    pub matched_skills: Vec<Skill>,
    pub missing_critical_skills: Vec<String>,
    pub missing_nice_to_have: Vec<String>,
    pub recommendations: Vec<String>,
    pub competitive_advantages: Vec<String>,
    pub interview_focus_areas: Vec<String>,
    pub requirements: Vec<JobRequirement>,
    /// Number of requirements that matched a profile skill.
    pub matched_requirements: usize,
}

impl MatchResult {
    /// The score of a category. Categories without requirements score 100.
    pub fn category_score(&self, category: SkillCategory) -> f64 {
        self.category_scores
            .get(&category)
            .copied()
            .unwrap_or(100.0)
    }
}

/// Matches job descriptions against a fixed profile.
#[derive(Debug)]
pub struct Matcher<'a> {
    profile: &'a Profile,
    extractor: Extractor<'a>,
    /// Lowercase skill name to skill.
    by_name: HashMap<String, &'a Skill>,
    /// Lowercase keyword to skill. Later skills win keyword collisions.
    by_keyword: HashMap<String, &'a Skill>,
}

impl<'a> Matcher<'a> {
    pub const DEFAULT_TITLE: &'static str = "iOS/macOS Developer";

    pub fn new(profile: &'a Profile, table: &'a KeywordTable) -> Self {
        let by_name = profile
            .skills
            .iter()
            .map(|skill| (skill.name.to_lowercase(), skill))
            .collect();
        let by_keyword = profile
            .skills
            .iter()
            .flat_map(|skill| {
                skill
                    .keywords
                    .iter()
                    .map(move |keyword| (keyword.to_lowercase(), skill))
            })
            .collect();

        Self {
            profile,
            extractor: Extractor::new(table),
            by_name,
            by_keyword,
        }
    }

    /// Extracts requirements from `text` and matches them against the profile.
    pub fn match_job(&self, text: &str, title: &str) -> MatchResult {
        let requirements = self.extractor.extract(text, title);
        self.match_requirements(title, requirements)
    }

    pub fn match_requirements(
        &self,
        title: &str,
        requirements: Vec<JobRequirement>,
    ) -> MatchResult {
        let mut matched = Vec::new();
        let mut missing_critical = Vec::new();
        let mut missing_nice_to_have = Vec::new();
        // Category -> (matched, total).
        let mut tallies = BTreeMap::<SkillCategory, (usize, usize)>::new();

        for req in &requirements {
            let tally = tallies.entry(req.category).or_default();
            tally.1 += 1;
            match self.resolve(req) {
                Some(skill) => {
                    tally.0 += 1;
                    matched.push(skill);
                }
                None if req.required => missing_critical.push(req.skill.clone()),
                None => missing_nice_to_have.push(req.skill.clone()),
            }
        }

        let category_scores = tallies
            .into_iter()
            .map(|(category, (hits, total))| (category, percent(hits, total)))
            .collect();
        let overall_score = percent(matched.len(), requirements.len());

        let mut seen = HashSet::new();
        let matched_skills = matched
            .iter()
            .copied()
            .filter(|skill| seen.insert(skill.name.as_str()))
            .collect::<Vec<_>>();

        let cx = MatchContext {
            profile: self.profile,
            requirements: &requirements,
            matched_skills: &matched_skills,
            missing_critical: &missing_critical,
            missing_nice_to_have: &missing_nice_to_have,
        };
        let recommendations = rules::recommendations(&cx);
        let competitive_advantages = rules::competitive_advantages(&cx);
        let interview_focus_areas = rules::interview_focus(&cx);

        log::debug!(
            "[{}] Matched {}/{} requirements ({:.1}%), {} critical missing",
            title,
            matched.len(),
            requirements.len(),
            overall_score,
            missing_critical.len(),
        );

        MatchResult {
            job_title: title.to_string(),
            overall_score,
            category_scores,
            matched_skills: matched_skills.into_iter().cloned().collect(),
            missing_critical_skills: missing_critical,
            missing_nice_to_have,
            recommendations,
            competitive_advantages,
            interview_focus_areas,
            matched_requirements: matched.len(),
            requirements,
        }
    }

    /// Finds the profile skill satisfying a requirement, by name and then by keyword.
    fn resolve(&self, req: &JobRequirement) -> Option<&'a Skill> {
        self.by_name
            .get(&req.skill.to_lowercase())
            .or_else(|| {
                req.keywords
                    .iter()
                    .find_map(|keyword| self.by_keyword.get(&keyword.to_lowercase()))
            })
            .copied()
    }
}

/// `part / whole` as a percentage, or 100 if `whole` is zero.
fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        100.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
