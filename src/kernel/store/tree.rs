use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::kernel::error::validate_name;
use crate::kernel::WorkspaceError;
use crate::models::file_tree::{self, child_path, normalize_parent, renamed_path, ROOT_PARENT};
use crate::models::open_files;
use crate::models::{NodeKind, TreeNode};

impl super::WorkspaceStore {
    fn commit_tree(&mut self, project_id: &str, nodes: Vec<TreeNode>) {
        let mut project_files = (*self.state.project_files).clone();
        project_files.insert(project_id.to_string(), Arc::new(nodes));
        self.state.project_files = Arc::new(project_files);
    }

    pub(super) fn reduce_rename_item(
        &mut self,
        id: &str,
        name: String,
        project_id: &str,
    ) -> super::DispatchResult {
        let Some(tree) = self.state.project_tree(project_id) else {
            return super::DispatchResult::rejected(WorkspaceError::ProjectNotFound(
                project_id.to_string(),
            ));
        };
        let Some(index) = tree.iter().position(|n| n.id == id) else {
            return super::DispatchResult::rejected(WorkspaceError::NodeNotFound(id.to_string()));
        };

        let node = &tree[index];
        if node.name == name {
            return super::DispatchResult::changed(false);
        }
        if let Err(err) = validate_name(&name) {
            return super::DispatchResult::rejected(err);
        }

        let parent = node.parent_id().to_string();
        if self.state.is_file_exists(&name, project_id, Some(&parent)) {
            return super::DispatchResult::rejected(WorkspaceError::NameCollision { name, parent });
        }

        let old_path = node.path.clone();
        let new_path = renamed_path(&old_path, &name);
        let descendants = if node.is_dir() {
            file_tree::descendant_ids(tree, id)
        } else {
            FxHashSet::default()
        };

        // copy-on-write: the live tree stays untouched until commit
        let mut next: Vec<TreeNode> = (**tree).clone();
        next[index].name = name.clone();
        next[index].path = new_path.clone();
        for node in next.iter_mut().filter(|n| descendants.contains(&n.id)) {
            let rest = node
                .path
                .strip_prefix(old_path.as_str())
                .and_then(|rest| rest.strip_prefix('/'));
            if let Some(rest) = rest {
                node.path = child_path(Some(&new_path), rest);
            }
        }

        tracing::debug!(project_id, id, old = %old_path, new = %new_path, "rename item");
        self.commit_tree(project_id, next);

        if let Some(ledger) = open_files::rename(&self.state.open_files, project_id, id, &name) {
            self.state.open_files = Arc::new(ledger);
        }
        super::DispatchResult::changed(true)
    }

    pub(super) fn reduce_create_item(
        &mut self,
        project_id: &str,
        id: String,
        parent_id: Option<&str>,
        name: String,
        kind: NodeKind,
        content: Option<String>,
    ) -> super::DispatchResult {
        let Some(tree) = self.state.project_tree(project_id) else {
            return super::DispatchResult::rejected(WorkspaceError::ProjectNotFound(
                project_id.to_string(),
            ));
        };
        if let Err(err) = validate_name(&name) {
            return super::DispatchResult::rejected(err);
        }
        if file_tree::find(tree, &id).is_some() {
            return super::DispatchResult::rejected(WorkspaceError::DuplicateId(id));
        }

        let parent = normalize_parent(parent_id.unwrap_or_default());
        let parent_node = if parent == ROOT_PARENT {
            None
        } else {
            match file_tree::find(tree, parent) {
                Some(node) if node.is_dir() => Some(node),
                Some(_) => {
                    return super::DispatchResult::rejected(WorkspaceError::InvalidParent(
                        parent.to_string(),
                    ))
                }
                None => {
                    return super::DispatchResult::rejected(WorkspaceError::NodeNotFound(
                        parent.to_string(),
                    ))
                }
            }
        };

        if file_tree::name_exists(tree, parent, &name) {
            return super::DispatchResult::rejected(WorkspaceError::NameCollision {
                name,
                parent: parent.to_string(),
            });
        }

        let node = match kind {
            NodeKind::File => {
                let node = TreeNode::new_file(id, name, parent_node);
                match content {
                    Some(content) => node.with_content(content),
                    None => node,
                }
            }
            NodeKind::Directory => TreeNode::new_dir(id, name, parent_node),
        };

        tracing::debug!(project_id, path = %node.path, "create item");
        let mut next: Vec<TreeNode> = (**tree).clone();
        next.push(node);
        self.commit_tree(project_id, next);
        super::DispatchResult::changed(true)
    }

    pub(super) fn reduce_update_file_content(
        &mut self,
        id: &str,
        content: String,
        project_id: &str,
    ) -> super::DispatchResult {
        let Some(tree) = self.state.project_tree(project_id) else {
            return super::DispatchResult::rejected(WorkspaceError::ProjectNotFound(
                project_id.to_string(),
            ));
        };
        let Some(index) = tree.iter().position(|n| n.id == id) else {
            return super::DispatchResult::rejected(WorkspaceError::NodeNotFound(id.to_string()));
        };
        if tree[index].is_dir() {
            return super::DispatchResult::rejected(WorkspaceError::NotAFile(id.to_string()));
        }
        if tree[index].content.as_deref() == Some(content.as_str()) {
            return super::DispatchResult::changed(false);
        }

        let mut next: Vec<TreeNode> = (**tree).clone();
        next[index].content = Some(content);
        self.commit_tree(project_id, next);
        super::DispatchResult::changed(true)
    }
}
