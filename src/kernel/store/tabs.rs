use std::sync::Arc;

use crate::kernel::WorkspaceError;
use crate::models::file_tree;
use crate::models::open_files;

impl super::WorkspaceStore {
    pub(super) fn reduce_open_file(&mut self, id: &str, project_id: &str) -> super::DispatchResult {
        let Some(tree) = self.state.project_tree(project_id) else {
            return super::DispatchResult::rejected(WorkspaceError::ProjectNotFound(
                project_id.to_string(),
            ));
        };
        let Some(node) = file_tree::find(tree, id) else {
            return super::DispatchResult::rejected(WorkspaceError::NodeNotFound(id.to_string()));
        };
        if node.is_dir() {
            return super::DispatchResult::rejected(WorkspaceError::NotAFile(id.to_string()));
        }

        let next = open_files::activate(&self.state.open_files, project_id, &node.id, &node.name);
        let state_changed = next != *self.state.open_files;
        self.state.open_files = Arc::new(next);
        super::DispatchResult::changed(state_changed)
    }

    pub(super) fn reduce_close_file(&mut self, id: &str) -> super::DispatchResult {
        match open_files::close(&self.state.open_files, id) {
            Some(next) => {
                self.state.open_files = Arc::new(next);
                super::DispatchResult::changed(true)
            }
            None => {
                super::DispatchResult::rejected(WorkspaceError::OpenFileNotFound(id.to_string()))
            }
        }
    }

    pub(super) fn reduce_close_all_files(&mut self) -> super::DispatchResult {
        if self.state.open_files.is_empty() {
            return super::DispatchResult::changed(false);
        }
        self.state.open_files = Arc::new(Vec::new());
        super::DispatchResult::changed(true)
    }
}
