//! In-memory [`SourceHost`] for tests and offline runs.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use pomguard_core::errors::HostError;

use super::{FileUpdate, ProjectRef, SourceHost};

#[derive(Debug, Default)]
struct MemoryState {
    files: HashMap<(u64, String), String>,
    updates: Vec<(u64, FileUpdate)>,
}

/// Holds projects and their files in memory. Updates are applied to the
/// stored files and recorded in order.
#[derive(Debug, Default)]
pub struct MemoryHost {
    projects: Vec<ProjectRef>,
    failing: HashSet<u64>,
    fail_listing: bool,
    state: Mutex<MemoryState>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a project. Listing order follows insertion order.
    pub fn with_project(mut self, project: ProjectRef) -> Self {
        self.projects.push(project);
        self
    }

    /// Store `content` at `path` in project `project_id`.
    pub fn with_file(self, project_id: u64, path: &str, content: &str) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state
                .files
                .insert((project_id, path.to_string()), content.to_string());
        }
        self
    }

    /// Every file call against `project_id` fails with an HTTP 500.
    pub fn with_failing_project(mut self, project_id: u64) -> Self {
        self.failing.insert(project_id);
        self
    }

    /// `list_projects` fails.
    pub fn with_failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Updates committed so far, in call order.
    pub fn updates(&self) -> Vec<(u64, FileUpdate)> {
        self.state
            .lock()
            .map(|s| s.updates.clone())
            .unwrap_or_default()
    }

    /// Current content of a stored file.
    pub fn file(&self, project_id: u64, path: &str) -> Option<String> {
        self.state
            .lock()
            .ok()
            .and_then(|s| s.files.get(&(project_id, path.to_string())).cloned())
    }

    fn check(&self, project: &ProjectRef, path: &str) -> Result<(), HostError> {
        if self.failing.contains(&project.id) {
            return Err(HostError::Status {
                url: format!("memory://projects/{}/files/{path}", project.id),
                status: 500,
                body: "injected failure".to_string(),
            });
        }
        if !self.projects.iter().any(|p| p.id == project.id) {
            return Err(HostError::ProjectNotFound { project: project.id });
        }
        Ok(())
    }

    fn state(&self) -> Result<std::sync::MutexGuard<'_, MemoryState>, HostError> {
        self.state.lock().map_err(|e| HostError::Http {
            url: "memory://".to_string(),
            message: e.to_string(),
        })
    }
}

impl SourceHost for MemoryHost {
    fn list_projects(&self) -> Result<Vec<ProjectRef>, HostError> {
        if self.fail_listing {
            return Err(HostError::Status {
                url: "memory://projects".to_string(),
                status: 503,
                body: "injected failure".to_string(),
            });
        }
        Ok(self.projects.clone())
    }

    fn get_file(
        &self,
        project: &ProjectRef,
        path: &str,
        _git_ref: &str,
    ) -> Result<Option<String>, HostError> {
        self.check(project, path)?;
        Ok(self.state()?.files.get(&(project.id, path.to_string())).cloned())
    }

    fn update_file(&self, project: &ProjectRef, update: &FileUpdate) -> Result<(), HostError> {
        self.check(project, &update.path)?;
        let mut state = self.state()?;
        let key = (project.id, update.path.clone());
        if !state.files.contains_key(&key) {
            return Err(HostError::Status {
                url: format!("memory://projects/{}/files/{}", project.id, update.path),
                status: 400,
                body: "A file with this name doesn't exist".to_string(),
            });
        }
        state.files.insert(key, update.content.clone());
        state.updates.push((project.id, update.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_update() {
        let p = ProjectRef::new(1, "svc");
        let host = MemoryHost::new()
            .with_project(p.clone())
            .with_file(1, "a.yml", "x: 1\n");

        assert_eq!(host.get_file(&p, "a.yml", "main").unwrap().as_deref(), Some("x: 1\n"));
        assert_eq!(host.get_file(&p, "missing.yml", "main").unwrap(), None);

        let update = FileUpdate {
            path: "a.yml".into(),
            branch: "main".into(),
            content: "x: 2\n".into(),
            commit_message: "bump".into(),
        };
        host.update_file(&p, &update).unwrap();
        assert_eq!(host.file(1, "a.yml").as_deref(), Some("x: 2\n"));
        assert_eq!(host.updates().len(), 1);
    }

    #[test]
    fn test_update_of_missing_file_fails() {
        let p = ProjectRef::new(1, "svc");
        let host = MemoryHost::new().with_project(p.clone());
        let update = FileUpdate {
            path: "new.yml".into(),
            branch: "main".into(),
            content: String::new(),
            commit_message: "m".into(),
        };
        assert!(matches!(
            host.update_file(&p, &update),
            Err(HostError::Status { status: 400, .. })
        ));
        assert!(host.updates().is_empty());
    }

    #[test]
    fn test_injected_failures() {
        let p = ProjectRef::new(9, "broken");
        let host = MemoryHost::new().with_project(p.clone()).with_failing_project(9);
        assert!(host.get_file(&p, "pom.xml", "main").is_err());

        let unknown = ProjectRef::new(10, "ghost");
        assert!(matches!(
            host.get_file(&unknown, "pom.xml", "main"),
            Err(HostError::ProjectNotFound { project: 10 })
        ));

        assert!(MemoryHost::new().with_failing_listing().list_projects().is_err());
    }
}
