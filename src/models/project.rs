//! 项目与构建产物

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiMethod {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<AbiParameter>,
}

/// 合约对外暴露的 getter / setter 描述
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abi {
    #[serde(default)]
    pub getters: Vec<AbiMethod>,
    #[serde(default)]
    pub setters: Vec<AbiMethod>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    #[serde(
        rename = "contractBOC",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub contract_boc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi: Option<Abi>,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            contract_address: None,
            contract_boc: None,
            abi: None,
        }
    }
}

/// 构建 / 部署完成后回写到项目上的字段，`None` 表示保持原值
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub contract_address: Option<String>,
    pub contract_boc: Option<String>,
    pub abi: Option<Abi>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.contract_address.is_none()
            && self.contract_boc.is_none()
            && self.abi.is_none()
    }

    /// 合并到 `project`，返回是否有字段实际发生变化
    pub fn apply(&self, project: &mut Project) -> bool {
        let before = project.clone();
        if let Some(name) = &self.name {
            project.name = name.clone();
        }
        if let Some(address) = &self.contract_address {
            project.contract_address = Some(address.clone());
        }
        if let Some(boc) = &self.contract_boc {
            project.contract_boc = Some(boc.clone());
        }
        if let Some(abi) = &self.abi {
            project.abi = Some(abi.clone());
        }
        *project != before
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NetworkEnvironment {
    #[default]
    Sandbox,
    Testnet,
    Mainnet,
}

impl NetworkEnvironment {
    pub fn as_str(self) -> &'static str {
        match self {
            NetworkEnvironment::Sandbox => "SANDBOX",
            NetworkEnvironment::Testnet => "TESTNET",
            NetworkEnvironment::Mainnet => "MAINNET",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "SANDBOX" => Some(NetworkEnvironment::Sandbox),
            "TESTNET" => Some(NetworkEnvironment::Testnet),
            "MAINNET" => Some(NetworkEnvironment::Mainnet),
            _ => None,
        }
    }
}

/// 区块浏览器上的合约地址链接；sandbox 链不在链上，没有链接
pub fn contract_link(address: &str, env: NetworkEnvironment) -> Option<String> {
    if address.is_empty() {
        return None;
    }
    match env {
        NetworkEnvironment::Sandbox => None,
        NetworkEnvironment::Testnet => Some(format!("https://testnet.tonscan.org/address/{address}")),
        NetworkEnvironment::Mainnet => Some(format!("https://tonscan.org/address/{address}")),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/project.rs"]
mod tests;
