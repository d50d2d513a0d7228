//! 项目文件树数据模型
//!
//! 节点平铺存储在 `Vec<TreeNode>` 中，通过 `parent` 记录父节点 id，
//! 根层节点的 parent 为 [`ROOT_PARENT`]。`path` 是冗余字段，由 store 在重命名时同步。

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use uuid::Uuid;

/// 根层节点的父 id
pub const ROOT_PARENT: &str = "0";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub path: String,
    #[serde(default = "root_parent")]
    pub parent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub is_open: bool,
}

fn root_parent() -> String {
    ROOT_PARENT.to_string()
}

impl TreeNode {
    fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: NodeKind,
        parent: Option<&TreeNode>,
    ) -> Self {
        let name = name.into();
        let (parent, path) = match parent {
            Some(p) => (p.id.clone(), child_path(Some(&p.path), &name)),
            None => (root_parent(), name.clone()),
        };
        Self {
            id: id.into(),
            name,
            kind,
            path,
            parent,
            content: None,
            is_open: false,
        }
    }

    pub fn new_file(
        id: impl Into<String>,
        name: impl Into<String>,
        parent: Option<&TreeNode>,
    ) -> Self {
        Self::new(id, name, NodeKind::File, parent)
    }

    pub fn new_dir(
        id: impl Into<String>,
        name: impl Into<String>,
        parent: Option<&TreeNode>,
    ) -> Self {
        Self::new(id, name, NodeKind::Directory, parent)
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// 父 id；空字符串按根层处理
    pub fn parent_id(&self) -> &str {
        normalize_parent(&self.parent)
    }
}

pub fn normalize_parent(parent: &str) -> &str {
    if parent.is_empty() {
        ROOT_PARENT
    } else {
        parent
    }
}

pub fn child_path(parent_path: Option<&str>, name: &str) -> String {
    match parent_path {
        Some(p) if !p.is_empty() => format!("{p}/{name}"),
        _ => name.to_string(),
    }
}

/// 用新名字替换旧路径的最后一段。只看旧路径本身，不沿 parent 链重新计算。
pub fn renamed_path(old_path: &str, new_name: &str) -> String {
    match old_path.rsplit_once('/') {
        Some((dir, _)) => format!("{dir}/{new_name}"),
        None => new_name.to_string(),
    }
}

pub fn find<'a>(nodes: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
    nodes.iter().find(|n| n.id == id)
}

pub fn find_by_path<'a>(nodes: &'a [TreeNode], path: &str) -> Option<&'a TreeNode> {
    nodes.iter().find(|n| n.path == path)
}

pub fn name_exists(nodes: &[TreeNode], parent: &str, name: &str) -> bool {
    let parent = normalize_parent(parent);
    nodes
        .iter()
        .any(|n| n.parent_id() == parent && n.name == name)
}

/// 所有后代节点 id（不含自身）
pub fn descendant_ids(nodes: &[TreeNode], id: &str) -> FxHashSet<String> {
    let mut children: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
    for node in nodes {
        children
            .entry(node.parent_id())
            .or_default()
            .push(node.id.as_str());
    }

    let mut result = FxHashSet::default();
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
        if let Some(kids) = children.get(current) {
            for &kid in kids {
                if result.insert(kid.to_string()) {
                    stack.push(kid);
                }
            }
        }
    }
    result
}

pub fn should_ignore(name: &str) -> bool {
    matches!(
        name,
        ".DS_Store"
            | ".Spotlight-V100"
            | ".Trashes"
            | ".fseventsd"
            | ".TemporaryItems"
            | "Thumbs.db"
            | "desktop.ini"
            | ".git"
            | "node_modules"
            | "target"
    )
}

/// 读取目录项；符号链接跟随到目标，无法访问的项和特殊文件（FIFO、设备）跳过
fn load_dir_entries(path: &Path) -> io::Result<Vec<(String, bool)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(dir = %path.display(), error = %e, "skip unreadable entry");
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().to_string();
        if should_ignore(&name) {
            continue;
        }
        let full = entry.path();
        match fs::metadata(&full) {
            Ok(meta) if meta.is_dir() => entries.push((name, true)),
            Ok(meta) if meta.is_file() => entries.push((name, false)),
            Ok(_) => tracing::warn!(path = %full.display(), "skip special file"),
            Err(e) => tracing::warn!(path = %full.display(), error = %e, "skip broken entry"),
        }
    }
    // 目录在前，同类按名字排序
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(entries)
}

/// 从磁盘目录构建项目模板，先序排列（目录节点紧跟其子节点）
///
/// 只有根目录本身不可读时返回错误，子项的问题记日志后跳过。
pub fn template_from_dir(root_path: &Path) -> io::Result<Vec<TreeNode>> {
    if !root_path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("not a directory: {}", root_path.display()),
        ));
    }

    let mut visited = FxHashSet::default();
    visited.insert(fs::canonicalize(root_path)?);
    let mut nodes = Vec::new();
    for entry in load_dir_entries(root_path)? {
        collect_entry(root_path, entry, None, &mut visited, &mut nodes);
    }
    Ok(nodes)
}

fn collect_entry(
    dir: &Path,
    (name, is_dir): (String, bool),
    parent: Option<&TreeNode>,
    visited: &mut FxHashSet<PathBuf>,
    out: &mut Vec<TreeNode>,
) {
    let full = dir.join(&name);
    let id = Uuid::new_v4().to_string();

    if !is_dir {
        match fs::read(&full) {
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes).into_owned();
                out.push(TreeNode::new_file(id, name, parent).with_content(content));
            }
            Err(e) => tracing::warn!(path = %full.display(), error = %e, "skip unreadable file"),
        }
        return;
    }

    // 链接成环时同一目录只收一次
    match fs::canonicalize(&full) {
        Ok(real) if visited.insert(real.clone()) => {}
        Ok(_) => {
            tracing::warn!(path = %full.display(), "skip directory link cycle");
            return;
        }
        Err(e) => {
            tracing::warn!(path = %full.display(), error = %e, "skip broken directory");
            return;
        }
    }

    let children = match load_dir_entries(&full) {
        Ok(children) => children,
        Err(e) => {
            tracing::warn!(path = %full.display(), error = %e, "skip unreadable directory");
            return;
        }
    };
    let node = TreeNode::new_dir(id, name, parent);
    out.push(node.clone());
    for child in children {
        collect_entry(&full, child, Some(&node), visited, out);
    }
}

const MAIN_FC: &str = r#"#include "stdlib.fc";

() recv_internal(int my_balance, int msg_value, cell in_msg_full, slice in_msg_body) impure {
    if (in_msg_body.slice_empty?()) {
        return ();
    }
}

int get_counter() method_id {
    slice ds = get_data().begin_parse();
    return ds~load_uint(64);
}
"#;

const STDLIB_FC: &str = r#";; Standard library for funC

forall X -> X null() asm "PUSHNULL";
cell get_data() asm "c4 PUSH";
() set_data(cell c) impure asm "c4 POP";
slice begin_parse(cell c) asm "CTOS";
"#;

const STATE_INIT_CELL_TS: &str = r#"import { beginCell } from "ton-core";

let cell = beginCell().storeUint(0, 64).endCell();

export default cell;
"#;

const MESSAGE_CELL_TS: &str = r#"import { beginCell } from "ton-core";

let cell = beginCell().storeUint(1, 32).storeUint(0, 64).endCell();

export default cell;
"#;

/// 新建空白 FunC 项目时使用的模板
pub fn default_template() -> Vec<TreeNode> {
    [
        ("main.fc", MAIN_FC),
        ("stdlib.fc", STDLIB_FC),
        ("stateInit.cell.ts", STATE_INIT_CELL_TS),
        ("message.cell.ts", MESSAGE_CELL_TS),
    ]
    .into_iter()
    .map(|(name, content)| {
        TreeNode::new_file(Uuid::new_v4().to_string(), name, None).with_content(content)
    })
    .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/models/file_tree.rs"]
mod tests;
