//! 已打开文件（标签页）列表
//!
//! 所有函数都返回新的列表，不修改传入的切片，方便 store 整体替换快照。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenFileRef {
    pub id: String,
    pub name: String,
    pub is_open: bool,
    /// 节点 id 只在项目内唯一，标签按 (project_id, id) 区分
    #[serde(default)]
    pub project_id: String,
}

impl OpenFileRef {
    fn is(&self, project_id: &str, id: &str) -> bool {
        self.id == id && self.project_id == project_id
    }
}

pub fn active(ledger: &[OpenFileRef]) -> Option<&OpenFileRef> {
    ledger.iter().find(|f| f.is_open)
}

pub fn contains(ledger: &[OpenFileRef], id: &str) -> bool {
    ledger.iter().any(|f| f.id == id)
}

/// 激活 `project_id` 中的 `id`：已存在则原位置置为活动，否则追加到末尾。
pub fn activate(
    ledger: &[OpenFileRef],
    project_id: &str,
    id: &str,
    name: &str,
) -> Vec<OpenFileRef> {
    let mut next: Vec<OpenFileRef> = ledger
        .iter()
        .map(|f| OpenFileRef {
            is_open: false,
            ..f.clone()
        })
        .collect();

    match next.iter_mut().find(|f| f.is(project_id, id)) {
        Some(existing) => existing.is_open = true,
        None => next.push(OpenFileRef {
            id: id.to_string(),
            name: name.to_string(),
            is_open: true,
            project_id: project_id.to_string(),
        }),
    }
    next
}

/// 关闭 `id`。剩余的最后一个标签成为活动标签（不恢复之前的活动标签）。
/// `id` 不在列表中时返回 `None`。
pub fn close(ledger: &[OpenFileRef], id: &str) -> Option<Vec<OpenFileRef>> {
    if !contains(ledger, id) {
        return None;
    }

    let mut next: Vec<OpenFileRef> = ledger
        .iter()
        .filter(|f| f.id != id)
        .map(|f| OpenFileRef {
            is_open: false,
            ..f.clone()
        })
        .collect();
    if let Some(last) = next.last_mut() {
        last.is_open = true;
    }
    Some(next)
}

/// 同步重命名后的显示名，只改属于 `project_id` 的标签；未打开时返回 `None`。
pub fn rename(
    ledger: &[OpenFileRef],
    project_id: &str,
    id: &str,
    name: &str,
) -> Option<Vec<OpenFileRef>> {
    if !ledger.iter().any(|f| f.is(project_id, id)) {
        return None;
    }

    Some(
        ledger
            .iter()
            .map(|f| {
                if f.is(project_id, id) {
                    OpenFileRef {
                        name: name.to_string(),
                        ..f.clone()
                    }
                } else {
                    f.clone()
                }
            })
            .collect(),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/models/open_files.rs"]
mod tests;
