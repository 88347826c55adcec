//! Fixed choices offered by the playbook form.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::errors::ChoiceParseError;

/// Target operating system. Its name becomes the suffix of the `vars` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum OsChoice {
    #[default]
    Linux,
    Windows,
    All,
}

impl OsChoice {
    /// Every choice in the order the selector presents them.
    pub const ALL: [OsChoice; 3] = [OsChoice::Linux, OsChoice::Windows, OsChoice::All];

    pub fn as_str(&self) -> &'static str {
        match self {
            OsChoice::Linux => "linux",
            OsChoice::Windows => "windows",
            OsChoice::All => "all",
        }
    }
}

impl fmt::Display for OsChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OsChoice {
    type Err = ChoiceParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "linux" => Ok(OsChoice::Linux),
            "windows" => Ok(OsChoice::Windows),
            "all" => Ok(OsChoice::All),
            other => Err(ChoiceParseError::UnknownOs(other.to_string())),
        }
    }
}

/// Inventory group the playbook runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum HostChoice {
    #[default]
    All,
    Workstations,
    Servers,
}

impl HostChoice {
    /// Every choice in the order the selector presents them.
    pub const ALL: [HostChoice; 3] = [
        HostChoice::All,
        HostChoice::Workstations,
        HostChoice::Servers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HostChoice::All => "all",
            HostChoice::Workstations => "workstations",
            HostChoice::Servers => "servers",
        }
    }
}

impl fmt::Display for HostChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HostChoice {
    type Err = ChoiceParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(HostChoice::All),
            "workstations" => Ok(HostChoice::Workstations),
            "servers" => Ok(HostChoice::Servers),
            other => Err(ChoiceParseError::UnknownHosts(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_choices_case_insensitively() {
        assert_eq!("Linux".parse::<OsChoice>(), Ok(OsChoice::Linux));
        assert_eq!(" servers ".parse::<HostChoice>(), Ok(HostChoice::Servers));
    }

    #[test]
    fn rejects_unknown_choices() {
        assert_eq!(
            "macos".parse::<OsChoice>(),
            Err(ChoiceParseError::UnknownOs("macos".into()))
        );
        assert!("laptops".parse::<HostChoice>().is_err());
    }

    #[test]
    fn display_matches_serialized_name() {
        for os in OsChoice::ALL {
            assert_eq!(os.to_string(), os.as_str());
        }
        for hosts in HostChoice::ALL {
            assert_eq!(hosts.to_string(), hosts.as_str());
        }
    }
}
