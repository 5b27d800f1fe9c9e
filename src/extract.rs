use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{keywords::KeywordTable, profile::SkillCategory};

/// Experience level of a requirement whose sentence names none.
pub const NOT_SPECIFIED: &str = "Not specified";

/// A skill mentioned in a job description.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct JobRequirement {
    pub skill: String,
    pub category: SkillCategory,
    /// False if the skill is only nice-to-have.
    pub required: bool,
    /// E.g. "5+ years", "3-5 years", "senior", or [`NOT_SPECIFIED`].
    pub experience_level: String,
    /// The patterns that detect this skill.
    pub keywords: Vec<String>,
    /// The sentence the skill was found in.
    pub context: String,
}

impl JobRequirement {
    /// The largest year count of the experience level, if it names one.
    ///
    /// A range like "2-5 years" asks for up to 5.
    pub fn required_years(&self) -> Option<u32> {
        re!(YEARS_RE, r"\d+");

        if !self.experience_level.contains("year") {
            return None;
        }
        YEARS_RE
            .find_iter(&self.experience_level)
            .filter_map(|m| m.as_str().parse().ok())
            .max()
    }
}

/// Finds skill requirements in free text.
#[derive(Clone, Copy, Debug)]
pub struct Extractor<'a> {
    table: &'a KeywordTable,
}

impl<'a> Extractor<'a> {
    pub fn new(table: &'a KeywordTable) -> Self {
        Self { table }
    }

    /// Extracts one requirement per mentioned skill.
    ///
    /// The first mention of a skill wins. Requirements are sorted by
    /// `(required, skill)`, so nice-to-have skills come first.
    pub fn extract(&self, text: &str, title: &str) -> Vec<JobRequirement> {
        let mut requirements = Vec::new();

        for sentence in sentences(&normalized(text), &self.table.abbreviations) {
            let lower = sentence.to_lowercase();
            let required = self.is_required(&lower);
            let experience_level = self.experience_level(&lower);

            for skill in &self.table.skills {
                let Some(pattern) = skill.patterns.iter().find(|p| lower.contains(p.as_str()))
                else {
                    continue;
                };
                log::trace!("[{}] {} ({:?}): {}", title, skill.name, pattern, sentence);

                requirements.push(JobRequirement {
                    skill: skill.name.clone(),
                    category: skill.category,
                    required,
                    experience_level: experience_level.clone(),
                    keywords: skill.patterns.clone(),
                    context: sentence.to_string(),
                });
            }
        }

        let mut seen = HashSet::new();
        requirements.retain(|req| seen.insert(req.skill.clone()));
        requirements.sort_by(|a, b| (a.required, &a.skill).cmp(&(b.required, &b.skill)));

        log::debug!(
            "[{}] Found {} requirements ({} required)",
            title,
            requirements.len(),
            requirements.iter().filter(|req| req.required).count(),
        );
        requirements
    }

    /// Nice-to-have indicators take precedence. Sentences with no indicator count as required.
    fn is_required(&self, sentence: &str) -> bool {
        let contains = |indicators: &[String]| {
            indicators
                .iter()
                .any(|indicator| sentence.contains(indicator.as_str()))
        };

        if contains(&self.table.nice_to_have_indicators) {
            return false;
        }
        if !contains(&self.table.required_indicators) {
            log::trace!("No indicator, assuming required: {}", sentence);
        }
        true
    }

    fn experience_level(&self, sentence: &str) -> String {
        self.table
            .experience_patterns
            .iter()
            .find_map(|pattern| pattern.label(sentence))
            .unwrap_or_else(|| NOT_SPECIFIED.to_string())
    }
}

/// Collapses whitespace and replaces punctuation other than `.,-+()/` with spaces.
fn normalized(text: &str) -> String {
    text.replace(
        |c: char| {
            !(c.is_alphanumeric() || c == '_' || c.is_whitespace() || ".,-+()/".contains(c))
        },
        " ",
    )
    .split_whitespace()
    .collect::<Vec<_>>()
    .join(" ")
}

/// Splits normalized text at periods followed by whitespace or the end of the text,
/// except after one of the lowercase `abbreviations`.
fn sentences<'t>(text: &'t str, abbreviations: &[String]) -> Vec<&'t str> {
    re!(SENTENCE_END_RE, r"\.(\s+|$)");

    let mut sentences = Vec::new();
    let mut start = 0;
    for end in SENTENCE_END_RE.find_iter(text) {
        let sentence = &text[start..end.start()];
        let last_word = sentence
            .rsplit(|c: char| c.is_whitespace() || c == '(')
            .next()
            .unwrap_or_default()
            .to_lowercase();
        if end.end() < text.len() && abbreviations.contains(&last_word) {
            continue;
        }
        sentences.push(sentence.trim());
        start = end.end();
    }
    sentences.push(text[start..].trim());
    sentences.retain(|s| !s.is_empty());
    sentences
}
