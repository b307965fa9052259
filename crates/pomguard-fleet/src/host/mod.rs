//! Source-control host capability and its implementations.

pub mod gitlab;
pub mod memory;

use pomguard_core::errors::HostError;
use serde::{Deserialize, Serialize};

pub use gitlab::GitLabHost;
pub use memory::MemoryHost;

/// A project as listed by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub path_with_namespace: String,
    #[serde(default)]
    pub default_branch: Option<String>,
}

impl ProjectRef {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            path_with_namespace: name.clone(),
            name,
            default_branch: None,
        }
    }
}

/// A file rewrite committed to a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileUpdate {
    #[serde(skip)]
    pub path: String,
    pub branch: String,
    pub content: String,
    pub commit_message: String,
}

/// What the fleet tool needs from a source-control host.
pub trait SourceHost {
    /// All projects in scope, including nested subgroups.
    fn list_projects(&self) -> Result<Vec<ProjectRef>, HostError>;

    /// Decoded file content at `git_ref`, or `None` when the file does not exist.
    fn get_file(
        &self,
        project: &ProjectRef,
        path: &str,
        git_ref: &str,
    ) -> Result<Option<String>, HostError>;

    /// Commit new content for an existing file.
    fn update_file(&self, project: &ProjectRef, update: &FileUpdate) -> Result<(), HostError>;
}
