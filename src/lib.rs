//! Create a GitHub repository and apply a standard setup to it

pub mod args;
pub mod config;
pub mod github;
pub mod pipeline;
pub mod provisioner;
pub mod transport;
pub mod utils;

pub const APP_NAME: &str = "repo-bootstrap";
/// Environment variable holding the bearer token
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
/// Every created repository's name starts with this
pub const REPO_PREFIX: &str = "repo-";
/// Branch which `auto_init` creates on a fresh repository
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
