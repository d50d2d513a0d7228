use std::collections::BTreeMap;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::models::file_tree::{self, normalize_parent, TreeNode};
use crate::models::open_files::{self, OpenFileRef};
use crate::models::Project;

pub type ProjectFiles = Arc<Vec<TreeNode>>;

/// Immutable view of the whole workspace.
///
/// Each part sits behind its own `Arc`; the store swaps in new `Arc`s on every
/// mutation, so cloning a state is cheap and a clone never changes afterwards.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceState {
    pub(crate) projects: Arc<Vec<Project>>,
    pub(crate) project_files: Arc<FxHashMap<String, ProjectFiles>>,
    pub(crate) open_files: Arc<Vec<OpenFileRef>>,
}

impl WorkspaceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == project_id)
    }

    /// Empty when the project is unknown.
    pub fn project_files(&self, project_id: &str) -> &[TreeNode] {
        self.project_files
            .get(project_id)
            .map(|files| files.as_slice())
            .unwrap_or(&[])
    }

    pub(crate) fn project_tree(&self, project_id: &str) -> Option<&ProjectFiles> {
        self.project_files.get(project_id)
    }

    pub fn open_files(&self) -> &[OpenFileRef] {
        &self.open_files
    }

    pub fn file(&self, id: &str, project_id: &str) -> Option<&TreeNode> {
        file_tree::find(self.project_files(project_id), id)
    }

    pub fn file_by_path(&self, path: &str, project_id: &str) -> Option<&TreeNode> {
        file_tree::find_by_path(self.project_files(project_id), path)
    }

    /// The active tab, resolved against `project_id`'s tree.
    pub fn active_file(&self, project_id: &str) -> Option<&TreeNode> {
        let active = open_files::active(&self.open_files)?;
        if active.project_id != project_id {
            return None;
        }
        self.file(&active.id, project_id)
    }

    /// `parent_id` of `None` or `""` means the project root.
    pub fn is_file_exists(&self, name: &str, project_id: &str, parent_id: Option<&str>) -> bool {
        let parent = normalize_parent(parent_id.unwrap_or_default());
        file_tree::name_exists(self.project_files(project_id), parent, name)
    }
}

impl Serialize for WorkspaceState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let files: BTreeMap<&str, &[TreeNode]> = self
            .project_files
            .iter()
            .map(|(id, nodes)| (id.as_str(), nodes.as_slice()))
            .collect();

        let mut s = serializer.serialize_struct("WorkspaceState", 3)?;
        s.serialize_field("projects", self.projects.as_slice())?;
        s.serialize_field("projectFiles", &files)?;
        s.serialize_field("openFiles", self.open_files.as_slice())?;
        s.end()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
