//! User demographic profile and its on-disk store.
//!
//! The profile is a single record read by every AI-dependent query and
//! written by exactly one place (the profile editor). Edits replace the
//! whole record; readers never observe a partially-updated profile.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Age bracket, coarse enough to be useful in a prompt without being PII.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AgeBracket {
    #[default]
    Unset,
    Under18,
    Age18To29,
    Age30To44,
    Age45To64,
    Over65,
}

impl AgeBracket {
    pub fn as_str(self) -> &'static str {
        match self {
            AgeBracket::Unset => "",
            AgeBracket::Under18 => "under 18",
            AgeBracket::Age18To29 => "18-29",
            AgeBracket::Age30To44 => "30-44",
            AgeBracket::Age45To64 => "45-64",
            AgeBracket::Over65 => "65+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    #[default]
    Unset,
    Female,
    Male,
    NonBinary,
    PreferNotToSay,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Unset => "",
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::NonBinary => "non-binary",
            Gender::PreferNotToSay => "prefer not to say",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Occupation {
    #[default]
    Unset,
    OutdoorWork,
    OfficeWork,
    Healthcare,
    Education,
    Transport,
    Student,
    Retired,
    Other,
}

impl Occupation {
    pub fn as_str(self) -> &'static str {
        match self {
            Occupation::Unset => "",
            Occupation::OutdoorWork => "outdoor work",
            Occupation::OfficeWork => "office work",
            Occupation::Healthcare => "healthcare",
            Occupation::Education => "education",
            Occupation::Transport => "transport",
            Occupation::Student => "student",
            Occupation::Retired => "retired",
            Occupation::Other => "other",
        }
    }
}

/// User demographic profile.
///
/// Completeness gates every AI query: an incomplete profile means those
/// queries are never issued, rather than issued and failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Profile {
    #[serde(default)]
    pub age: AgeBracket,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub occupation: Occupation,
}

impl Profile {
    /// True iff all three fields are set.
    pub fn is_complete(&self) -> bool {
        self.age != AgeBracket::Unset
            && self.gender != Gender::Unset
            && self.occupation != Occupation::Unset
    }
}

const PROFILE_FILE: &str = "profile.json";

/// Persistent store for the profile record.
///
/// One JSON file under the config directory, read once at startup and
/// overwritten wholesale on every edit. The write goes through a temp file
/// and rename so a crash mid-write never leaves a torn record.
#[derive(Debug)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join(PROFILE_FILE),
        }
    }

    /// Load the stored profile, or the default (all fields unset) if none
    /// has been saved yet.
    pub fn load(&self) -> Result<Profile> {
        if !self.path.exists() {
            return Ok(Profile::default());
        }

        let contents = std::fs::read_to_string(&self.path)
            .context("Failed to read profile file")?;
        let profile = serde_json::from_str(&contents)
            .context("Failed to parse profile file")?;
        Ok(profile)
    }

    /// Replace the stored profile with `profile`.
    pub fn save(&self, profile: &Profile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents =
            serde_json::to_string_pretty(profile).context("Failed to serialize profile")?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents).context("Failed to write profile file")?;
        std::fs::rename(&tmp, &self.path).context("Failed to replace profile file")?;

        tracing::debug!("Profile saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn default_profile_is_incomplete() {
        assert!(!Profile::default().is_complete());
    }

    #[test]
    fn partial_profile_is_incomplete() {
        let profile = Profile {
            age: AgeBracket::Age30To44,
            gender: Gender::Female,
            occupation: Occupation::Unset,
        };
        assert!(!profile.is_complete());
    }

    #[test]
    fn full_profile_is_complete() {
        let profile = Profile {
            age: AgeBracket::Age30To44,
            gender: Gender::Female,
            occupation: Occupation::OutdoorWork,
        };
        assert!(profile.is_complete());
    }

    #[test]
    fn load_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());
        let profile = store.load().unwrap();
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());

        let profile = Profile {
            age: AgeBracket::Over65,
            gender: Gender::Male,
            occupation: Occupation::Retired,
        };
        store.save(&profile).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, profile);
    }

    #[test]
    fn save_replaces_whole_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());

        let first = Profile {
            age: AgeBracket::Age18To29,
            gender: Gender::NonBinary,
            occupation: Occupation::Student,
        };
        store.save(&first).unwrap();

        let second = Profile {
            age: AgeBracket::Age45To64,
            gender: Gender::PreferNotToSay,
            occupation: Occupation::Healthcare,
        };
        store.save(&second).unwrap();

        assert_eq!(store.load().unwrap(), second);
    }

    #[test]
    fn age_bracket_serde_uses_kebab_case() {
        let json = serde_json::to_string(&AgeBracket::Age18To29).unwrap();
        assert_eq!(json, "\"age18-to29\"");
    }
}
