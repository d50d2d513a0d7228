use uuid::Uuid;

use super::{Action, WorkspaceError, WorkspaceState};
use crate::models::{NodeKind, OpenFileRef, Project, ProjectPatch, TreeNode};

mod projects;
mod tabs;
mod tree;

pub struct DispatchResult {
    pub result: Result<(), WorkspaceError>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn changed(state_changed: bool) -> Self {
        Self {
            result: Ok(()),
            state_changed,
        }
    }

    fn rejected(err: WorkspaceError) -> Self {
        tracing::debug!(error = %err, "workspace action rejected");
        Self {
            result: Err(err),
            state_changed: false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&WorkspaceState)>;

/// Owns the workspace and is its only mutation path.
///
/// Listeners registered with [`WorkspaceStore::subscribe`] run after every
/// dispatch that changed state and receive the new state.
pub struct WorkspaceStore {
    state: WorkspaceState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for WorkspaceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceStore {
    pub fn new() -> Self {
        Self::with_state(WorkspaceState::new())
    }

    pub fn with_state(state: WorkspaceState) -> Self {
        Self {
            state,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &WorkspaceState {
        &self.state
    }

    /// Cheap clone that stays valid across later mutations.
    pub fn snapshot(&self) -> WorkspaceState {
        self.state.clone()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&WorkspaceState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        let result = match action {
            Action::CreateProject { project, template } => {
                self.reduce_create_project(project, template)
            }
            Action::UpdateProject { project_id, patch } => {
                self.reduce_update_project(&project_id, patch)
            }
            Action::OpenFile { id, project_id } => self.reduce_open_file(&id, &project_id),
            Action::CloseFile { id } => self.reduce_close_file(&id),
            Action::CloseAllFiles => self.reduce_close_all_files(),
            Action::RenameItem {
                id,
                name,
                project_id,
            } => self.reduce_rename_item(&id, name, &project_id),
            Action::CreateItem {
                project_id,
                id,
                parent_id,
                name,
                kind,
                content,
            } => self.reduce_create_item(&project_id, id, parent_id.as_deref(), name, kind, content),
            Action::UpdateFileContent {
                id,
                content,
                project_id,
            } => self.reduce_update_file_content(&id, content, &project_id),
        };

        if result.state_changed {
            self.notify();
        }
        result
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }

    pub fn projects(&self) -> &[Project] {
        self.state.projects()
    }

    pub fn project(&self, project_id: &str) -> Option<&Project> {
        self.state.project(project_id)
    }

    pub fn project_files(&self, project_id: &str) -> &[TreeNode] {
        self.state.project_files(project_id)
    }

    pub fn opened_files(&self) -> &[OpenFileRef] {
        self.state.open_files()
    }

    pub fn active_file(&self, project_id: &str) -> Option<&TreeNode> {
        self.state.active_file(project_id)
    }

    pub fn get_file_by_path(&self, path: &str, project_id: &str) -> Option<&TreeNode> {
        self.state.file_by_path(path, project_id)
    }

    pub fn is_file_exists(&self, name: &str, project_id: &str, parent_id: Option<&str>) -> bool {
        self.state.is_file_exists(name, project_id, parent_id)
    }

    pub fn create_new_project(
        &mut self,
        project: Project,
        template: Vec<TreeNode>,
    ) -> Result<(), WorkspaceError> {
        self.dispatch(Action::CreateProject { project, template })
            .result
    }

    pub fn update_project_by_id(
        &mut self,
        patch: ProjectPatch,
        project_id: &str,
    ) -> Result<(), WorkspaceError> {
        self.dispatch(Action::UpdateProject {
            project_id: project_id.to_string(),
            patch,
        })
        .result
    }

    pub fn open_file(&mut self, id: &str, project_id: &str) -> Result<(), WorkspaceError> {
        self.dispatch(Action::OpenFile {
            id: id.to_string(),
            project_id: project_id.to_string(),
        })
        .result
    }

    pub fn close_file(&mut self, id: &str) -> Result<(), WorkspaceError> {
        self.dispatch(Action::CloseFile { id: id.to_string() })
            .result
    }

    pub fn close_all_file(&mut self) {
        self.dispatch(Action::CloseAllFiles);
    }

    pub fn rename_item(
        &mut self,
        id: &str,
        name: &str,
        project_id: &str,
    ) -> Result<(), WorkspaceError> {
        self.dispatch(Action::RenameItem {
            id: id.to_string(),
            name: name.to_string(),
            project_id: project_id.to_string(),
        })
        .result
    }

    /// Adds a file or directory and returns its generated id.
    pub fn create_item(
        &mut self,
        project_id: &str,
        parent_id: Option<&str>,
        name: &str,
        kind: NodeKind,
        content: Option<String>,
    ) -> Result<String, WorkspaceError> {
        let id = Uuid::new_v4().to_string();
        self.dispatch(Action::CreateItem {
            project_id: project_id.to_string(),
            id: id.clone(),
            parent_id: parent_id.map(str::to_string),
            name: name.to_string(),
            kind,
            content,
        })
        .result?;
        Ok(id)
    }

    pub fn update_file_content(
        &mut self,
        id: &str,
        content: String,
        project_id: &str,
    ) -> Result<(), WorkspaceError> {
        self.dispatch(Action::UpdateFileContent {
            id: id.to_string(),
            content,
            project_id: project_id.to_string(),
        })
        .result
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
