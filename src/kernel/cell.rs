//! Cell builder inputs: picks the cell script out of a project, wraps it in
//! an entry module for the bundler and adapts the bundled output to the
//! sandboxed frame.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use super::services::adapters::bridge::{BridgeError, CompilerBridge};
use super::services::ports::bridge::{BridgeRequestKind, BridgeTransport};
use super::WorkspaceState;

pub const STATE_INIT_FILE: &str = "stateInit.cell.ts";
pub const MESSAGE_CELL_FILE: &str = "message.cell.ts";
pub const ENTRY_FILE: &str = "cell.ts";

const DEFAULT_NOT_EXPORTED: &str = "'default' is not exported by ";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellTarget {
    /// Initial contract data, used on deploy.
    StateInit,
    /// Message body sent to a deployed contract.
    Message,
}

impl CellTarget {
    pub fn file_name(self) -> &'static str {
        match self {
            CellTarget::StateInit => STATE_INIT_FILE,
            CellTarget::Message => MESSAGE_CELL_FILE,
        }
    }

    pub fn request_kind(self) -> BridgeRequestKind {
        match self {
            CellTarget::StateInit => BridgeRequestKind::StateInitData,
            CellTarget::Message => BridgeRequestKind::AbiData,
        }
    }
}

#[derive(Debug, Error)]
pub enum CellError {
    #[error("file {0} not found in project")]
    MissingFile(&'static str),

    #[error("State init data is missing in file {0}")]
    MissingStateInit(&'static str),

    #[error("Cell data is missing in file {0}")]
    MissingCellData(&'static str),

    #[error("cell variable is missing in file {0}")]
    MissingCellVariable(&'static str),

    #[error("'default' is not exported by {0}")]
    DefaultNotExported(&'static str),

    #[error("{0}")]
    Bundler(String),

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// Files handed to the bundler, entry first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellBundle {
    pub target: CellTarget,
    pub files: Vec<(String, String)>,
}

impl CellBundle {
    pub fn entry(&self) -> &str {
        ENTRY_FILE
    }
}

/// Content of the cell script for `target`, checked for the obvious mistakes
/// before anything goes to the bundler.
pub fn cell_source(
    state: &WorkspaceState,
    project_id: &str,
    target: CellTarget,
) -> Result<String, CellError> {
    let file_name = target.file_name();
    let node = state
        .file_by_path(file_name, project_id)
        .ok_or(CellError::MissingFile(file_name))?;
    let content = node.content.as_deref().unwrap_or_default();

    match target {
        CellTarget::StateInit if content.is_empty() => {
            Err(CellError::MissingStateInit(file_name))
        }
        CellTarget::Message if content.is_empty() => Err(CellError::MissingCellData(file_name)),
        CellTarget::Message if !content.contains("cell") => {
            Err(CellError::MissingCellVariable(file_name))
        }
        _ => Ok(content.to_string()),
    }
}

pub fn bundle_entry(file_name: &str) -> String {
    format!("import cell from \"./{file_name}\"; cell;")
}

pub fn prepare_bundle(
    state: &WorkspaceState,
    project_id: &str,
    target: CellTarget,
) -> Result<CellBundle, CellError> {
    let source = cell_source(state, project_id, target)?;
    let file_name = target.file_name();
    Ok(CellBundle {
        target,
        files: vec![
            (ENTRY_FILE.to_string(), bundle_entry(file_name)),
            (file_name.to_string(), source),
        ],
    })
}

fn import_head() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^import\s+\{").expect("literal pattern"))
}

fn import_tail() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\}\s+from\s.+").expect("literal pattern"))
}

/// The frame exposes `@ton/core` as `window.TonCore`, so the leading named
/// import of the bundle becomes a destructuring assignment. Only the first
/// occurrence of each half is rewritten.
pub fn rewrite_ton_core_imports(js: &str) -> String {
    let head = import_head().replace(js, "const {");
    let rewritten = import_tail().replace(&head, "} = window.TonCore;").into_owned();
    rewritten
}

pub fn map_bundler_error(target: CellTarget, message: &str) -> CellError {
    if message.contains(DEFAULT_NOT_EXPORTED) {
        CellError::DefaultNotExported(target.file_name())
    } else {
        CellError::Bundler(message.to_string())
    }
}

/// Sends bundled cell code to the frame and waits for the built cell.
pub async fn build_cell<T: BridgeTransport>(
    bridge: &CompilerBridge<T>,
    target: CellTarget,
    bundled_js: &str,
) -> Result<Value, CellError> {
    let code = rewrite_ton_core_imports(bundled_js);
    tracing::debug!(file = target.file_name(), "building cell");
    let data = bridge.request(target.request_kind(), code).await?;
    Ok(data)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/cell.rs"]
mod tests;
