macro_rules! re {
    ($name:ident, $($e:expr),* $(,)?) => {
        static $name: std::sync::LazyLock<regex::Regex> = std::sync::LazyLock::new(
            || regex::Regex::new(concat!($($e),*)).unwrap(),
        );
    };
}

mod analyzer;
mod cli;
mod customize;
mod error;
mod extract;
mod keywords;
mod matcher;
mod profile;
pub mod report;
mod rules;

pub use analyzer::{Analyzer, HistoryEntry};
pub use cli::DataArgs;
pub use customize::{custom_keywords, experience_modifications, KeywordSuggestions};
pub use error::{Error, Result};
pub use extract::{Extractor, JobRequirement, NOT_SPECIFIED};
pub use keywords::{ExperienceKind, ExperiencePattern, KeywordTable, SkillPattern};
pub use matcher::{MatchResult, Matcher};
pub use profile::{Experience, PersonalInfo, Profile, Project, Skill, SkillCategory};

pub fn init_logger(default_level: log::LevelFilter) {
    pretty_env_logger::formatted_timed_builder()
        .filter_level(default_level)
        .parse_default_env()
        .init();
}
