//! repo-bootstrap's config

use std::fs;
use std::path::Path;

use anyhow::anyhow;
use indexmap::IndexSet;
use serde::Deserialize;

use crate::github::{Allowances, BranchProtectionPolicy};

/// Represents the TOML config
#[derive(Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Who may dismiss reviews and bypass the protection of the default branch
    #[serde(default)]
    pub protection: Protection,
    /// Users to grant access to the new repository
    #[serde(default)]
    pub collaborators: Vec<Collaborator>,
    /// Organization teams to grant access to the new repository
    #[serde(default)]
    pub teams: Vec<Team>,
}

impl Config {
    /// Read the config at `path`
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| anyhow!("Could not read config file `{}`:\n{err}", path.display()))?;

        log::trace!("Using configuration file {path:?}");

        toml::from_str::<Self>(&raw)
            .map_err(|err| anyhow!("Could not parse config file `{}`:\n{err}", path.display()))
    }
}

/// Allow-lists of the branch protection rule
#[derive(Deserialize, Debug, Default, Eq, PartialEq, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Protection {
    #[serde(default)]
    pub dismissal_teams: IndexSet<String>,
    #[serde(default)]
    pub dismissal_users: IndexSet<String>,
    #[serde(default)]
    pub bypass_teams: IndexSet<String>,
    #[serde(default)]
    pub bypass_users: IndexSet<String>,
    #[serde(default)]
    pub restriction_teams: IndexSet<String>,
    #[serde(default)]
    pub restriction_users: IndexSet<String>,
}

impl From<Protection> for BranchProtectionPolicy {
    fn from(protection: Protection) -> Self {
        BranchProtectionPolicy {
            dismissal: Allowances {
                teams: protection.dismissal_teams,
                users: protection.dismissal_users,
            },
            bypass: Allowances {
                teams: protection.bypass_teams,
                users: protection.bypass_users,
            },
            restrictions: Allowances {
                teams: protection.restriction_teams,
                users: protection.restriction_users,
            },
        }
    }
}

/// e.g. `{ username = "octocat", permission = "admin" }`
#[derive(Deserialize, Debug, Eq, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Collaborator {
    pub username: String,
    /// Passed to GitHub as is, e.g. `pull`, `push`, `maintain` or `admin`
    pub permission: String,
}

/// e.g. `{ name = "maintainers", permission = "maintain" }`
#[derive(Deserialize, Debug, Eq, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Team {
    /// Team slug
    pub name: String,
    pub permission: String,
}
