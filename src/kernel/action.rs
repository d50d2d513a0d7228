use crate::models::{NodeKind, Project, ProjectPatch, TreeNode};

#[derive(Debug, Clone)]
pub enum Action {
    CreateProject {
        project: Project,
        template: Vec<TreeNode>,
    },
    UpdateProject {
        project_id: String,
        patch: ProjectPatch,
    },
    OpenFile {
        id: String,
        project_id: String,
    },
    CloseFile {
        id: String,
    },
    CloseAllFiles,
    RenameItem {
        id: String,
        name: String,
        project_id: String,
    },
    CreateItem {
        project_id: String,
        id: String,
        parent_id: Option<String>,
        name: String,
        kind: NodeKind,
        content: Option<String>,
    },
    UpdateFileContent {
        id: String,
        content: String,
        project_id: String,
    },
}
