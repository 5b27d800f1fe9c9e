use std::{collections::HashSet, fmt::Display, path::Path};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{read_to_string, Error, Result};

/// The candidate profile that ships with the crate.
const BUILTIN_PROFILE: &str = include_str!("../data/profile.ron");

/// The candidate being matched against job descriptions.
///
/// A profile is loaded once and then only ever borrowed, so any number of
/// analyses can share it.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub info: PersonalInfo,
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    /// Total years of professional experience.
    pub experience_years: f64,
    pub location: String,
    pub email: String,
    pub linkedin: String,
    pub github: String,
    pub website: Option<Url>,
}

/// A named capability with a proficiency rating.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(deny_unknown_fields)]
pub struct Skill {
    /// Unique within a profile.
    pub name: String,
    pub category: SkillCategory,
    /// Self-rated, 1 to 10.
    pub proficiency: u8,
    pub years: f64,
    /// Lowercase synonyms used to match requirements to this skill.
    pub keywords: Vec<String>,
    /// True if the skill is central to the candidate's profile.
    #[serde(default)]
    pub critical: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub duration: String,
    pub achievements: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: Option<Url>,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug,
)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    TechnicalCore,
    #[default]
    TechnicalAdvanced,
    Frameworks,
    Tools,
    SoftSkills,
    DomainKnowledge,
    Certifications,
}

impl SkillCategory {
    pub const ALL: [Self; 7] = [
        Self::TechnicalCore,
        Self::TechnicalAdvanced,
        Self::Frameworks,
        Self::Tools,
        Self::SoftSkills,
        Self::DomainKnowledge,
        Self::Certifications,
    ];

    /// The key used for this category in exported reports.
    pub fn key(self) -> &'static str {
        match self {
            Self::TechnicalCore => "technical_core",
            Self::TechnicalAdvanced => "technical_advanced",
            Self::Frameworks => "frameworks",
            Self::Tools => "tools",
            Self::SoftSkills => "soft_skills",
            Self::DomainKnowledge => "domain_knowledge",
            Self::Certifications => "certifications",
        }
    }
}

impl Display for SkillCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let words = self
            .key()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                chars
                    .next()
                    .map(|c| c.to_uppercase().chain(chars).collect::<String>())
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>();
        write!(f, "{}", words.join(" "))
    }
}

impl Display for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &self.name)
    }
}

impl Profile {
    /// Loads the profile bundled with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_ron(BUILTIN_PROFILE)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_ron(&read_to_string(path.as_ref())?)
    }

    pub fn from_ron(s: &str) -> Result<Self> {
        let mut profile: Self = ron::from_str(s)?;
        for skill in &mut profile.skills {
            for keyword in &mut skill.keywords {
                *keyword = keyword.to_lowercase();
            }
        }
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::with_capacity(self.skills.len());
        for skill in &self.skills {
            if !names.insert(skill.name.to_lowercase()) {
                return Err(Error::InvalidProfile(format!(
                    "duplicate skill: {}",
                    skill.name
                )));
            }
            if !(1..=10).contains(&skill.proficiency) {
                return Err(Error::InvalidProfile(format!(
                    "{}: proficiency must be between 1 and 10, got {}",
                    skill.name, skill.proficiency,
                )));
            }
            if !valid_years(skill.years) {
                return Err(Error::InvalidProfile(format!(
                    "{}: invalid years of experience: {}",
                    skill.name, skill.years,
                )));
            }
        }
        if !valid_years(self.info.experience_years) {
            return Err(Error::InvalidProfile(format!(
                "invalid years of experience: {}",
                self.info.experience_years,
            )));
        }

        Ok(())
    }

    /// Looks up a skill by name, ignoring case.
    pub fn skill(&self, name: &str) -> Option<&Skill> {
        self.skills
            .iter()
            .find(|skill| skill.name.eq_ignore_ascii_case(name))
    }

    pub fn experience_years(&self) -> f64 {
        self.info.experience_years
    }

    /// The `n` most proficient skills, strongest first.
    pub fn top_skills(&self, n: usize) -> Vec<&Skill> {
        let mut skills = self.skills.iter().collect::<Vec<_>>();
        skills.sort_by(|a, b| b.proficiency.cmp(&a.proficiency));
        skills.truncate(n);
        skills
    }
}

/// Finite and non-negative. Rejects NaN.
fn valid_years(years: f64) -> bool {
    years.is_finite() && years >= 0.0
}
