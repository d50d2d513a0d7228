use std::sync::Arc;

use crate::kernel::WorkspaceError;
use crate::models::{Project, ProjectPatch, TreeNode};

impl super::WorkspaceStore {
    pub(super) fn reduce_create_project(
        &mut self,
        project: Project,
        template: Vec<TreeNode>,
    ) -> super::DispatchResult {
        if self.state.project(&project.id).is_some() {
            // ids are the caller's responsibility; keep both records
            tracing::warn!(project_id = %project.id, "duplicate project id");
        }

        tracing::info!(
            project_id = %project.id,
            name = %project.name,
            files = template.len(),
            "create project"
        );

        let mut project_files = (*self.state.project_files).clone();
        project_files.insert(project.id.clone(), Arc::new(template));

        let mut projects = (*self.state.projects).clone();
        projects.push(project);

        self.state.projects = Arc::new(projects);
        self.state.project_files = Arc::new(project_files);
        super::DispatchResult::changed(true)
    }

    pub(super) fn reduce_update_project(
        &mut self,
        project_id: &str,
        patch: ProjectPatch,
    ) -> super::DispatchResult {
        let Some(index) = self.state.projects.iter().position(|p| p.id == project_id) else {
            return super::DispatchResult::rejected(WorkspaceError::ProjectNotFound(
                project_id.to_string(),
            ));
        };

        let mut projects = (*self.state.projects).clone();
        if !patch.apply(&mut projects[index]) {
            return super::DispatchResult::changed(false);
        }

        tracing::debug!(project_id, "project updated");
        self.state.projects = Arc::new(projects);
        super::DispatchResult::changed(true)
    }
}
