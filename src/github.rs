//! GitHub API
//!
//! Every endpoint this tool talks to, and the request bodies it sends

use base64::Engine as _;
use indexmap::IndexSet;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Contents of the `.gitignore` seeded into every new repository
pub const GITIGNORE: &str =
    ".terraform\n.terraform.tfstate\n*.tfstate*\n*.zip*\n.idea\n.secret.auto.tfvars";
pub const GITIGNORE_PATH: &str = ".gitignore";
pub const GITIGNORE_COMMIT_MESSAGE: &str = ".gitignore file added";
/// Homepage set on every new repository
pub const HOMEPAGE: &str = "https://github.com";

/// Endpoints of the GitHub REST API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `POST /user/repos`
    CreateUserRepo,
    /// `POST /orgs/{org}/repos`
    CreateOrgRepo { org: &'a str },
    /// `PATCH /repos/{owner}/{repo}`
    UpdateRepo { owner: &'a str, repo: &'a str },
    /// `POST /repos/{owner}/{repo}/branches/{branch}/rename`
    RenameBranch {
        owner: &'a str,
        repo: &'a str,
        branch: &'a str,
    },
    /// `PUT /repos/{owner}/{repo}/branches/{branch}/protection`
    BranchProtection {
        owner: &'a str,
        repo: &'a str,
        branch: &'a str,
    },
    /// `PUT /repos/{owner}/{repo}/collaborators/{username}`
    Collaborator {
        owner: &'a str,
        repo: &'a str,
        username: &'a str,
    },
    /// `PUT /orgs/{org}/teams/{team}/repos/{org}/{repo}`
    TeamRepo {
        org: &'a str,
        team: &'a str,
        repo: &'a str,
    },
    /// `PUT /repos/{owner}/{repo}/contents/{path}`
    Contents {
        owner: &'a str,
        repo: &'a str,
        path: &'a str,
    },
}

impl<'a> Endpoint<'a> {
    pub fn method(&self) -> Method {
        match self {
            Self::CreateUserRepo | Self::CreateOrgRepo { .. } | Self::RenameBranch { .. } => {
                Method::POST
            },
            Self::UpdateRepo { .. } => Method::PATCH,
            Self::BranchProtection { .. }
            | Self::Collaborator { .. }
            | Self::TeamRepo { .. }
            | Self::Contents { .. } => Method::PUT,
        }
    }

    /// Segments of the path, unescaped
    fn segments(&self) -> Vec<&'a str> {
        match *self {
            Self::CreateUserRepo => vec!["user", "repos"],
            Self::CreateOrgRepo { org } => vec!["orgs", org, "repos"],
            Self::UpdateRepo { owner, repo } => vec!["repos", owner, repo],
            Self::RenameBranch {
                owner,
                repo,
                branch,
            } => vec!["repos", owner, repo, "branches", branch, "rename"],
            Self::BranchProtection {
                owner,
                repo,
                branch,
            } => vec!["repos", owner, repo, "branches", branch, "protection"],
            Self::Collaborator {
                owner,
                repo,
                username,
            } => vec!["repos", owner, repo, "collaborators", username],
            Self::TeamRepo { org, team, repo } => {
                vec!["orgs", org, "teams", team, "repos", org, repo]
            },
            Self::Contents { owner, repo, path } => vec!["repos", owner, repo, "contents", path],
        }
    }

    /// Path relative to the API root, starting with `/`.
    ///
    /// Every segment is percent-encoded, so a branch like `release#2` stays
    /// a single segment. A `Contents` path is one segment too, nested files
    /// are not supported
    pub fn path(&self) -> String {
        self.segments()
            .into_iter()
            .map(|segment| format!("/{}", urlencoding::encode(segment)))
            .collect()
    }

    /// Status codes which GitHub answers with when the call went through.
    /// Anything else is a failure
    pub fn success_statuses(&self) -> &'static [u16] {
        match self {
            Self::CreateUserRepo
            | Self::CreateOrgRepo { .. }
            | Self::RenameBranch { .. }
            | Self::Contents { .. } => &[201],
            Self::UpdateRepo { .. } | Self::BranchProtection { .. } => &[200],
            Self::Collaborator { .. } => &[200, 204],
            Self::TeamRepo { .. } => &[204],
        }
    }
}

/// Body of [`Endpoint::CreateUserRepo`] and [`Endpoint::CreateOrgRepo`]
#[derive(Serialize, Debug, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "GitHub's request body is made of these flags"
)]
pub struct CreateRepoRequest<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub homepage: &'a str,
    pub private: bool,
    pub has_issues: bool,
    pub has_projects: bool,
    pub has_wiki: bool,
    pub auto_init: bool,
}

impl<'a> CreateRepoRequest<'a> {
    /// A private repository with issues, projects and wiki, initialized with a
    /// first commit
    pub fn new(name: &'a str, description: &'a str) -> Self {
        Self {
            name,
            description,
            homepage: HOMEPAGE,
            private: true,
            has_issues: true,
            has_projects: true,
            has_wiki: true,
            auto_init: true,
        }
    }
}

/// Data returned by GitHub's API when a repository is created
#[derive(Deserialize, Debug)]
pub struct CreatedRepo {
    pub html_url: String,
    pub owner: Owner,
}

#[derive(Deserialize, Debug)]
pub struct Owner {
    pub login: String,
}

/// Body of an error response
#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Serialize, Debug)]
pub struct RenameBranchRequest<'a> {
    pub new_name: &'a str,
}

#[derive(Serialize, Debug)]
pub struct UpdateRepoRequest<'a> {
    pub default_branch: &'a str,
}

/// Body of [`Endpoint::Collaborator`] and [`Endpoint::TeamRepo`]
#[derive(Serialize, Debug)]
pub struct PermissionRequest<'a> {
    pub permission: &'a str,
}

/// Body of [`Endpoint::Contents`]
#[derive(Serialize, Debug)]
pub struct ContentsRequest<'a> {
    pub message: &'a str,
    /// Base64 of the file
    pub content: String,
}

impl<'a> ContentsRequest<'a> {
    pub fn new(message: &'a str, contents: &str) -> Self {
        Self {
            message,
            content: base64::engine::general_purpose::STANDARD.encode(contents),
        }
    }
}

/// Teams and users named by slug and login
#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Allowances {
    pub teams: IndexSet<String>,
    pub users: IndexSet<String>,
}

/// Who is exempt from which part of a branch protection rule.
///
/// Every other setting of the rule is fixed, see [`ProtectionRequest`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BranchProtectionPolicy {
    /// May dismiss pull request reviews
    pub dismissal: Allowances,
    /// May merge without the required reviews
    pub bypass: Allowances,
    /// May push to the branch
    pub restrictions: Allowances,
}

/// Body of [`Endpoint::BranchProtection`]
#[derive(Serialize, Debug)]
pub struct ProtectionRequest<'a> {
    /// Always `null`, no status checks are required
    pub required_status_checks: Option<()>,
    pub enforce_admins: bool,
    pub required_pull_request_reviews: PullRequestReviews<'a>,
    pub restrictions: &'a Allowances,
    pub allow_force_pushes: bool,
    pub allow_deletions: bool,
}

#[derive(Serialize, Debug)]
pub struct PullRequestReviews<'a> {
    pub dismissal_restrictions: &'a Allowances,
    pub dismiss_stale_reviews: bool,
    pub required_approving_review_count: u8,
    pub require_last_push_approval: bool,
    pub bypass_pull_request_allowances: &'a Allowances,
}

impl<'a> From<&'a BranchProtectionPolicy> for ProtectionRequest<'a> {
    fn from(policy: &'a BranchProtectionPolicy) -> Self {
        Self {
            required_status_checks: None,
            enforce_admins: true,
            required_pull_request_reviews: PullRequestReviews {
                dismissal_restrictions: &policy.dismissal,
                dismiss_stale_reviews: true,
                required_approving_review_count: 1,
                require_last_push_approval: true,
                bypass_pull_request_allowances: &policy.bypass,
            },
            restrictions: &policy.restrictions,
            allow_force_pushes: false,
            allow_deletions: false,
        }
    }
}
