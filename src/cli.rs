use std::path::PathBuf;

use crate::{analyzer::Analyzer, error::Result, keywords::KeywordTable, profile::Profile};

/// Data file overrides shared by every binary.
#[derive(clap::Args, Clone, Default, Debug)]
pub struct DataArgs {
    /// Profile to match against (RON). Defaults to the embedded profile.
    #[arg(long, value_name = "PATH", env = "SKILL_MATCH_PROFILE")]
    pub profile: Option<PathBuf>,
    /// Keyword table (RON). Defaults to the embedded table.
    #[arg(long, value_name = "PATH", env = "SKILL_MATCH_KEYWORDS")]
    pub keywords: Option<PathBuf>,
}

impl DataArgs {
    pub fn load_profile(&self) -> Result<Profile> {
        match &self.profile {
            Some(path) => Profile::load(path),
            None => Profile::builtin(),
        }
    }

    pub fn load_keywords(&self) -> Result<KeywordTable> {
        match &self.keywords {
            Some(path) => KeywordTable::load(path),
            None => KeywordTable::builtin(),
        }
    }

    pub fn analyzer(&self) -> Result<Analyzer> {
        Ok(Analyzer::new(self.load_profile()?, self.load_keywords()?))
    }
}
