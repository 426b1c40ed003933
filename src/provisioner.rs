//! Configuring a freshly created repository, one remote call per step

use core::{error, fmt};

use nutype::nutype;
use serde::Serialize;

use crate::REPO_PREFIX;
use crate::github::{
    BranchProtectionPolicy, ContentsRequest, CreateRepoRequest, CreatedRepo, Endpoint, ErrorBody,
    GITIGNORE, GITIGNORE_COMMIT_MESSAGE, GITIGNORE_PATH, PermissionRequest, ProtectionRequest,
    RenameBranchRequest, UpdateRepoRequest,
};
use crate::transport::{Request, Response, Transport};

/// Name given by the user, before the prefix is added
#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, AsRef, Display)
)]
pub struct BaseName(String);

/// Why a step did not go through
#[derive(Debug)]
pub enum ApiError {
    /// Could not get any response
    Request(anyhow::Error),
    /// GitHub answered with a status that the endpoint does not succeed with
    Remote { status: u16, message: String },
    /// No organization was given and GitHub never reported who owns the
    /// repository, so there is nobody to address it by
    UnknownOwner,
    /// Teams only exist inside organizations
    OrganizationRequired,
}

impl ApiError {
    fn remote(response: &Response) -> Self {
        let message = serde_json::from_str::<ErrorBody>(&response.body)
            .map(|body| body.message)
            .unwrap_or_else(|_| response.body.trim().to_owned());

        Self::Remote {
            status: response.status,
            message,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(err) => write!(f, "{err}"),
            Self::Remote { status, message } => write!(f, "{message} (status {status})"),
            Self::UnknownOwner => write!(
                f,
                "The owner of the repository is unknown, since GitHub did not report it"
            ),
            Self::OrganizationRequired => {
                write!(f, "Teams can only be added to a repository of an organization")
            },
        }
    }
}

impl error::Error for ApiError {}

/// Result of creating the repository
#[derive(Debug)]
pub enum Created {
    Repo(CreatedRepo),
    /// GitHub confirmed the repository with a 201, but its body could not be
    /// read. Without an organization the owner stays unknown
    Unreadable(String),
}

/// Result of granting a user access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollaboratorOutcome {
    Added,
    /// The user already had this permission, nothing changed
    AlreadyPresent,
}

/// Creates a repository and configures it
pub struct RepoProvisioner<T> {
    transport: T,
    organization: Option<String>,
    /// Organization, or once the repository exists, the user who owns it
    owner: Option<String>,
    name: String,
}

impl<T: Transport> RepoProvisioner<T> {
    /// An empty `organization` is the same as none
    pub fn new(organization: Option<String>, base_name: &BaseName, transport: T) -> Self {
        let organization = organization.filter(|org| !org.trim().is_empty());

        Self {
            transport,
            owner: organization.clone(),
            organization,
            name: format!("{REPO_PREFIX}{base_name}"),
        }
    }

    /// Name of the repository, `repo-<base name>`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    fn owner(&self) -> Result<&str, ApiError> {
        self.owner.as_deref().ok_or(ApiError::UnknownOwner)
    }

    fn call<B: Serialize>(&self, endpoint: Endpoint<'_>, body: &B) -> Result<Response, ApiError> {
        let request = Request {
            method: endpoint.method(),
            path: endpoint.path(),
            body: serde_json::to_value(body).map_err(|err| ApiError::Request(err.into()))?,
        };

        let response = self.transport.send(&request).map_err(ApiError::Request)?;

        if endpoint.success_statuses().contains(&response.status) {
            Ok(response)
        } else {
            Err(ApiError::remote(&response))
        }
    }

    /// Create the repository, inside the organization if there is one.
    ///
    /// Without an organization, whoever GitHub reports as the owner is
    /// used to address the repository from now on
    pub fn create(&mut self, description: &str) -> Result<Created, ApiError> {
        let endpoint = match self.organization.as_deref() {
            Some(org) => Endpoint::CreateOrgRepo { org },
            None => Endpoint::CreateUserRepo,
        };

        let response = self.call(endpoint, &CreateRepoRequest::new(&self.name, description))?;

        let created = match serde_json::from_str::<CreatedRepo>(&response.body) {
            Ok(created) => created,
            Err(err) => return Ok(Created::Unreadable(err.to_string())),
        };

        if self.owner.is_none() {
            log::trace!("repository is owned by {}", created.owner.login);
            self.owner = Some(created.owner.login.clone());
        }

        Ok(Created::Repo(created))
    }

    pub fn rename_branch(&self, old_name: &str, new_name: &str) -> Result<(), ApiError> {
        self.call(
            Endpoint::RenameBranch {
                owner: self.owner()?,
                repo: &self.name,
                branch: old_name,
            },
            &RenameBranchRequest { new_name },
        )
        .map(drop)
    }

    /// Point the default branch at an existing `branch`
    pub fn set_default_branch(&self, branch: &str) -> Result<(), ApiError> {
        self.call(
            Endpoint::UpdateRepo {
                owner: self.owner()?,
                repo: &self.name,
            },
            &UpdateRepoRequest {
                default_branch: branch,
            },
        )
        .map(drop)
    }

    /// Grant `username` access. `permission` is passed on unchecked, GitHub
    /// rejects unknown ones.
    ///
    /// A 200 counts as [`CollaboratorOutcome::Added`] and a 204 as
    /// [`CollaboratorOutcome::AlreadyPresent`]. When GitHub only invites the
    /// user it answers 201 instead, which is reported as a failure even
    /// though the invitation was sent
    pub fn add_collaborator(
        &self,
        username: &str,
        permission: &str,
    ) -> Result<CollaboratorOutcome, ApiError> {
        let response = self.call(
            Endpoint::Collaborator {
                owner: self.owner()?,
                repo: &self.name,
                username,
            },
            &PermissionRequest { permission },
        )?;

        Ok(if response.status == 204 {
            CollaboratorOutcome::AlreadyPresent
        } else {
            CollaboratorOutcome::Added
        })
    }

    pub fn add_team(&self, team: &str, permission: &str) -> Result<(), ApiError> {
        let org = self
            .organization
            .as_deref()
            .ok_or(ApiError::OrganizationRequired)?;

        self.call(
            Endpoint::TeamRepo {
                org,
                team,
                repo: &self.name,
            },
            &PermissionRequest { permission },
        )
        .map(drop)
    }

    /// Commit the standard `.gitignore` to the repository
    pub fn add_ignore_file(&self) -> Result<(), ApiError> {
        self.call(
            Endpoint::Contents {
                owner: self.owner()?,
                repo: &self.name,
                path: GITIGNORE_PATH,
            },
            &ContentsRequest::new(GITIGNORE_COMMIT_MESSAGE, GITIGNORE),
        )
        .map(drop)
    }

    pub fn protect_branch(
        &self,
        branch: &str,
        policy: &BranchProtectionPolicy,
    ) -> Result<(), ApiError> {
        self.call(
            Endpoint::BranchProtection {
                owner: self.owner()?,
                repo: &self.name,
                branch,
            },
            &ProtectionRequest::from(policy),
        )
        .map(drop)
    }
}
