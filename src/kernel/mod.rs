//! Headless workspace core (state/action/store).
//!
//! Every mutation goes through [`WorkspaceStore::dispatch`]; readers hold
//! cheap [`WorkspaceState`] snapshots that never change under them.

pub mod action;
pub mod activity_log;
pub mod cell;
pub mod error;
pub mod services;
pub mod state;
pub mod store;

pub use action::Action;
pub use activity_log::{ActivityLog, LogEntry, LogKind};
pub use cell::{CellError, CellTarget};
pub use error::WorkspaceError;
pub use state::WorkspaceState;
pub use store::{DispatchResult, SubscriptionId, WorkspaceStore};
