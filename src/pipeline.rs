//! The fixed order in which a new repository is set up

use core::{error, fmt};

use colored::Colorize as _;

use crate::config::Config;
use crate::github::BranchProtectionPolicy;
use crate::provisioner::{ApiError, CollaboratorOutcome, Created, RepoProvisioner};
use crate::transport::Transport;
use crate::utils::format_url;
use crate::{DEFAULT_BRANCH, fail, note, success};

/// What to do once a step fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Report the failure and carry on with the next step
    #[default]
    BestEffort,
    /// Stop at the first failure
    FailFast,
}

/// A single step of the setup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Create,
    RenameBranch,
    Collaborator(String),
    Team(String),
    ProtectBranch,
    IgnoreFile,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create repository"),
            Self::RenameBranch => write!(f, "rename default branch"),
            Self::Collaborator(username) => write!(f, "add collaborator {username}"),
            Self::Team(team) => write!(f, "add team {team}"),
            Self::ProtectBranch => write!(f, "protect default branch"),
            Self::IgnoreFile => write!(f, "add .gitignore"),
        }
    }
}

/// Stopped early under [`FailurePolicy::FailFast`]
#[derive(Debug)]
pub struct StepFailed {
    pub step: Step,
    pub error: ApiError,
}

impl fmt::Display for StepFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not {}: {}", self.step, self.error)
    }
}

impl error::Error for StepFailed {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.error)
    }
}

/// What the user asked for
#[derive(Debug)]
pub struct Plan<'a> {
    pub description: &'a str,
    /// Branch which ends up as the default, and gets protected
    pub default_branch: &'a str,
    pub config: &'a Config,
}

/// Steps which failed under [`FailurePolicy::BestEffort`]
#[derive(Debug, Default)]
pub struct Report {
    pub failed: Vec<(Step, ApiError)>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

struct Run {
    policy: FailurePolicy,
    report: Report,
}

impl Run {
    /// Keep track of a failed step, or stop if the policy says so
    ///
    /// A step that stops the run is not printed here, the caller reports the
    /// returned [`StepFailed`]
    fn record<O>(
        &mut self,
        step: Step,
        result: Result<O, ApiError>,
    ) -> Result<Option<O>, StepFailed> {
        match (result, self.policy) {
            (Ok(ok), _) => Ok(Some(ok)),
            (Err(error), FailurePolicy::FailFast) => Err(StepFailed { step, error }),
            (Err(error), FailurePolicy::BestEffort) => {
                fail!("Could not {step}: {error}");
                self.report.failed.push((step, error));
                Ok(None)
            },
        }
    }
}

/// Create the repository, then configure it
///
/// Later steps still run after the repository could not be created under
/// [`FailurePolicy::BestEffort`], they will most likely fail as well
pub fn run<T: Transport>(
    provisioner: &mut RepoProvisioner<T>,
    plan: &Plan<'_>,
    policy: FailurePolicy,
) -> Result<Report, StepFailed> {
    let mut run = Run {
        policy,
        report: Report::default(),
    };

    note!("Creating repository {}", provisioner.name().bright_blue());
    let created = provisioner.create(plan.description);
    match run.record(Step::Create, created)? {
        Some(Created::Repo(repo)) => {
            success!("Created {}", format_url(&repo.html_url, &repo.html_url).bright_blue());
        },
        Some(Created::Unreadable(reason)) => {
            log::warn!("Could not read the created repository: {reason}");
            success!("Created {}", provisioner.name().bright_blue());
        },
        None => (),
    }

    if plan.default_branch != DEFAULT_BRANCH {
        note!("Updating default branch");
        let renamed = provisioner.rename_branch(DEFAULT_BRANCH, plan.default_branch);
        if run.record(Step::RenameBranch, renamed)?.is_some() {
            success!("Default branch is now {}", plan.default_branch.bright_blue());
        }
    }

    if !plan.config.collaborators.is_empty() || !plan.config.teams.is_empty() {
        note!("Updating collaborators");
    }

    for collaborator in &plan.config.collaborators {
        let username = &collaborator.username;
        let permission = &collaborator.permission;
        let added = provisioner.add_collaborator(username, permission);
        match run.record(Step::Collaborator(username.clone()), added)? {
            Some(CollaboratorOutcome::Added) => {
                success!("{username} added to repository with permission {permission}");
            },
            Some(CollaboratorOutcome::AlreadyPresent) => {
                success!("{username} already has {permission} permission");
            },
            None => (),
        }
    }

    for team in &plan.config.teams {
        let added = provisioner.add_team(&team.name, &team.permission);
        if run.record(Step::Team(team.name.clone()), added)?.is_some() {
            success!("{} team added as {}", team.name, team.permission);
        }
    }

    note!("Updating default branch protection");
    let policy = BranchProtectionPolicy::from(plan.config.protection.clone());
    let protected = provisioner.protect_branch(plan.default_branch, &policy);
    if run.record(Step::ProtectBranch, protected)?.is_some() {
        success!("{} branch is now protected", plan.default_branch.bright_blue());
    }

    note!("Adding .gitignore");
    let added = provisioner.add_ignore_file();
    if run.record(Step::IgnoreFile, added)?.is_some() {
        success!(".gitignore file added");
    }

    Ok(run.report)
}
