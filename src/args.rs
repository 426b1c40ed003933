use std::path::PathBuf;

use clap::{
    Parser,
    builder::styling::{AnsiColor, Effects},
};

use crate::{DEFAULT_API_URL, DEFAULT_BRANCH};

/// Create a GitHub repository with a standard setup
#[derive(Parser, Debug)]
#[command(styles = STYLES)]
pub struct Args {
    /// Repository name, the created repository is called `repo-<NAME>`
    #[arg(short, long)]
    pub name: Option<String>,
    /// Organization which owns the repository. Without one, it is created for the
    /// authenticated user
    #[arg(short, long)]
    pub organization: Option<String>,
    /// Repository description
    #[arg(short, long, default_value = "")]
    pub description: String,
    /// Default branch
    #[arg(short = 'b', long, default_value = DEFAULT_BRANCH)]
    pub defbranch: String,
    /// TOML file with branch protection allow-lists and access grants
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Base URL of the GitHub REST API
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,
    /// Stop at the first step which fails instead of carrying on
    #[arg(long)]
    pub fail_fast: bool,
    /// Increased logging information
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Styles for the CLI
const STYLES: clap::builder::Styles = clap::builder::Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::BrightGreen.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::BrightCyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::BrightCyan.on_default())
    .error(AnsiColor::BrightRed.on_default().effects(Effects::BOLD))
    .valid(AnsiColor::BrightCyan.on_default().effects(Effects::BOLD))
    .invalid(AnsiColor::BrightYellow.on_default().effects(Effects::BOLD));

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["repo-bootstrap", "-n", "demo"]).unwrap();
        assert_eq!(args.name.as_deref(), Some("demo"), "name");
        assert_eq!(args.organization, None, "organization");
        assert_eq!(args.description, "", "description");
        assert_eq!(args.defbranch, "main", "default branch");
        assert_eq!(args.api_url, "https://api.github.com", "api url");
        assert!(!args.fail_fast, "best effort by default");
    }

    #[test]
    fn short_flags() {
        let args = Args::try_parse_from([
            "repo-bootstrap",
            "-n",
            "demo",
            "-o",
            "acme",
            "-d",
            "infra",
            "-b",
            "develop",
        ])
        .unwrap();
        assert_eq!(args.organization.as_deref(), Some("acme"), "-o");
        assert_eq!(args.description, "infra", "-d");
        assert_eq!(args.defbranch, "develop", "-b");
    }

    #[test]
    fn name_is_optional_for_the_parser() {
        let args = Args::try_parse_from(["repo-bootstrap"]).unwrap();
        assert_eq!(args.name, None, "checked later by main");
    }
}
