//! nujan - TON smart-contract IDE workspace core
//!
//! 模块结构：
//! - models: 数据模型（TreeNode, OpenFileRef, Project）
//! - kernel: 工作区状态、动作与 store，设置与编译桥

pub mod kernel;
pub mod models;
