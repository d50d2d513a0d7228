//! 数据模型层

pub mod file_tree;
pub mod open_files;
pub mod project;

pub use file_tree::{
    default_template, should_ignore, template_from_dir, NodeKind, TreeNode, ROOT_PARENT,
};
pub use open_files::OpenFileRef;
pub use project::{
    contract_link, Abi, AbiMethod, AbiParameter, NetworkEnvironment, Project, ProjectPatch,
};
