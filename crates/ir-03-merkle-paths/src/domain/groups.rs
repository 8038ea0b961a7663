//! # Group Registry
//!
//! Every group is identified by `<provider>_<name>`:
//!
//! | Provider | Names |
//! |----------|-------|
//! | `twitter`, `github`, `reddit` | `GOLD`, `SILVER`, `BRONZE`, `NOT_SUFFICIENT` |
//! | `poap` | `DEVCON_3`, `DEVCON_4`, `DEVCON_5` |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shared_types::Web2Provider;

use super::errors::PathError;

/// Reputation tier groups offered for every web2 provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReputationLevel {
    Gold,
    Silver,
    Bronze,
    NotSufficient,
}

impl ReputationLevel {
    pub const ALL: [ReputationLevel; 4] = [
        ReputationLevel::Gold,
        ReputationLevel::Silver,
        ReputationLevel::Bronze,
        ReputationLevel::NotSufficient,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReputationLevel::Gold => "GOLD",
            ReputationLevel::Silver => "SILVER",
            ReputationLevel::Bronze => "BRONZE",
            ReputationLevel::NotSufficient => "NOT_SUFFICIENT",
        }
    }
}

/// POAP event groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoapGroupName {
    #[serde(rename = "DEVCON_3")]
    Devcon3,
    #[serde(rename = "DEVCON_4")]
    Devcon4,
    #[serde(rename = "DEVCON_5")]
    Devcon5,
}

impl PoapGroupName {
    pub const ALL: [PoapGroupName; 3] = [
        PoapGroupName::Devcon3,
        PoapGroupName::Devcon4,
        PoapGroupName::Devcon5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PoapGroupName::Devcon3 => "DEVCON_3",
            PoapGroupName::Devcon4 => "DEVCON_4",
            PoapGroupName::Devcon5 => "DEVCON_5",
        }
    }
}

/// Source of group membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupProvider {
    Web2(Web2Provider),
    Poap,
}

impl GroupProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupProvider::Web2(provider) => provider.as_str(),
            GroupProvider::Poap => "poap",
        }
    }

    /// Group names this provider offers.
    pub fn group_names(&self) -> Vec<&'static str> {
        match self {
            GroupProvider::Web2(_) => ReputationLevel::ALL.iter().map(|l| l.as_str()).collect(),
            GroupProvider::Poap => PoapGroupName::ALL.iter().map(|n| n.as_str()).collect(),
        }
    }
}

impl FromStr for GroupProvider {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "poap" {
            return Ok(GroupProvider::Poap);
        }
        s.parse::<Web2Provider>()
            .map(GroupProvider::Web2)
            .map_err(|_| PathError::GroupNotFound(s.to_string()))
    }
}

/// A known group, `<provider>_<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GroupId(String);

impl GroupId {
    /// Resolve a `(provider, name)` pair against the registry.
    ///
    /// # Errors
    ///
    /// `PathError::GroupNotFound` if the provider is unknown or does not
    /// offer `name`.
    pub fn resolve(provider: &str, name: &str) -> Result<Self, PathError> {
        let id = format!("{provider}_{name}");
        let known = provider
            .parse::<GroupProvider>()
            .map(|p| p.group_names().contains(&name))
            .unwrap_or(false);

        if known {
            Ok(GroupId(id))
        } else {
            Err(PathError::GroupNotFound(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every group of the registry.
pub fn known_groups() -> Vec<GroupId> {
    Web2Provider::ALL
        .iter()
        .map(|p| GroupProvider::Web2(*p))
        .chain(std::iter::once(GroupProvider::Poap))
        .flat_map(|provider| {
            provider
                .group_names()
                .into_iter()
                .map(move |name| GroupId(format!("{}_{}", provider.as_str(), name)))
        })
        .collect()
}
