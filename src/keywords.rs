use std::{collections::HashSet, path::Path};

use regex::Regex;
use serde::Deserialize;

use crate::{
    error::{read_to_string, Error, Result},
    profile::SkillCategory,
};

const BUILTIN_KEYWORDS: &str = include_str!("../data/keywords.ron");

/// Everything the extractor knows about how skills show up in job descriptions.
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct KeywordTable {
    /// Skills to look for, in scan order.
    pub skills: Vec<SkillPattern>,
    /// Phrases marking a sentence as nice-to-have. Checked before `required_indicators`.
    pub nice_to_have_indicators: Vec<String>,
    /// Phrases marking a sentence as required.
    pub required_indicators: Vec<String>,
    /// Experience-level patterns. The first match wins.
    pub experience_patterns: Vec<ExperiencePattern>,
    /// Words whose trailing period doesn't end a sentence, without the final period.
    #[serde(default)]
    pub abbreviations: Vec<String>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct SkillPattern {
    pub name: String,
    /// Unlisted skills count as technical-advanced.
    #[serde(default)]
    pub category: SkillCategory,
    /// Lowercase substrings that indicate the skill, in priority order.
    pub patterns: Vec<String>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct ExperiencePattern {
    #[serde(with = "serde_regex")]
    re: Regex,
    kind: ExperienceKind,
}

#[derive(Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceKind {
    /// "N years", rendered as "N+ years".
    Years,
    /// "N-M years".
    Range,
    /// "minimum N years", rendered as "N+ years".
    Minimum,
    /// A seniority word, rendered as the given label.
    Level(String),
}

impl ExperiencePattern {
    /// Returns the experience label if this pattern matches the lowercase sentence.
    pub fn label(&self, sentence: &str) -> Option<String> {
        let captures = self.re.captures(sentence)?;
        let years = |i: usize| captures.get(i)?.as_str().parse::<u32>().ok();

        Some(match &self.kind {
            ExperienceKind::Years | ExperienceKind::Minimum => format!("{}+ years", years(1)?),
            ExperienceKind::Range => format!("{}-{} years", years(1)?, years(2)?),
            ExperienceKind::Level(label) => label.clone(),
        })
    }
}

impl KeywordTable {
    /// Loads the keyword table bundled with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_ron(BUILTIN_KEYWORDS)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_ron(&read_to_string(path.as_ref())?)
    }

    pub fn from_ron(s: &str) -> Result<Self> {
        let mut table: Self = ron::from_str(s)?;
        for skill in &mut table.skills {
            for pattern in &mut skill.patterns {
                *pattern = pattern.to_lowercase();
            }
        }
        for phrase in table
            .nice_to_have_indicators
            .iter_mut()
            .chain(&mut table.required_indicators)
            .chain(&mut table.abbreviations)
        {
            *phrase = phrase.to_lowercase();
        }
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::with_capacity(self.skills.len());
        for skill in &self.skills {
            if !names.insert(skill.name.as_str()) {
                return Err(Error::InvalidKeywords(format!(
                    "duplicate skill: {}",
                    skill.name
                )));
            }
            if skill.patterns.is_empty() {
                return Err(Error::InvalidKeywords(format!(
                    "{}: no patterns",
                    skill.name
                )));
            }
            // An empty pattern is contained in every sentence.
            if skill.patterns.iter().any(|p| p.trim().is_empty()) {
                return Err(Error::InvalidKeywords(format!(
                    "{}: blank pattern",
                    skill.name
                )));
            }
        }
        for (list, phrases) in [
            ("nice_to_have_indicators", &self.nice_to_have_indicators),
            ("required_indicators", &self.required_indicators),
            ("abbreviations", &self.abbreviations),
        ] {
            if phrases.iter().any(|phrase| phrase.trim().is_empty()) {
                return Err(Error::InvalidKeywords(format!("{}: blank entry", list)));
            }
        }

        Ok(())
    }
}
