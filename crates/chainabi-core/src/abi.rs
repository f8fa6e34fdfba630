//! Contract ABI: an ordered list of items loaded from Solidity JSON ABI.

use serde::{Deserialize, Serialize};

use crate::error::AbiError;
use crate::types::{AbiEvent, AbiFunction, AbiParameter, StateMutability};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiConstructor {
    #[serde(default)]
    pub inputs: Vec<AbiParameter>,
    #[serde(default)]
    pub state_mutability: StateMutability,
}

/// A custom `error` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiCustomError {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiParameter>,
}

/// Any entry of a JSON ABI, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AbiItem {
    Function(AbiFunction),
    Event(AbiEvent),
    Constructor(AbiConstructor),
    Error(AbiCustomError),
    #[serde(rename_all = "camelCase")]
    Fallback {
        #[serde(default)]
        state_mutability: StateMutability,
    },
    #[serde(rename_all = "camelCase")]
    Receive {
        #[serde(default)]
        state_mutability: StateMutability,
    },
}

impl From<AbiFunction> for AbiItem {
    fn from(f: AbiFunction) -> Self {
        AbiItem::Function(f)
    }
}

impl From<AbiEvent> for AbiItem {
    fn from(e: AbiEvent) -> Self {
        AbiItem::Event(e)
    }
}

/// A contract ABI. Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Abi {
    items: Vec<AbiItem>,
}

impl Abi {
    pub fn new(items: Vec<AbiItem>) -> Self {
        Self { items }
    }

    /// Parse a Solidity JSON ABI array.
    pub fn from_json(json: &str) -> Result<Self, AbiError> {
        serde_json::from_str(json).map_err(|e| AbiError::InvalidAbiJson {
            reason: e.to_string(),
        })
    }

    pub fn to_json(&self) -> Result<String, AbiError> {
        serde_json::to_string(self).map_err(|e| AbiError::InvalidAbiJson {
            reason: e.to_string(),
        })
    }

    pub fn items(&self) -> &[AbiItem] {
        &self.items
    }

    pub fn functions(&self) -> impl Iterator<Item = &AbiFunction> {
        self.items.iter().filter_map(|item| match item {
            AbiItem::Function(f) => Some(f),
            _ => None,
        })
    }

    pub fn events(&self) -> impl Iterator<Item = &AbiEvent> {
        self.items.iter().filter_map(|item| match item {
            AbiItem::Event(e) => Some(e),
            _ => None,
        })
    }

    /// First function with the given name (overloads are not disambiguated).
    pub fn function(&self, name: &str) -> Option<&AbiFunction> {
        self.functions().find(|f| f.name == name)
    }

    /// First event with the given name.
    pub fn event(&self, name: &str) -> Option<&AbiEvent> {
        self.events().find(|e| e.name == name)
    }
}

impl FromIterator<AbiItem> for Abi {
    fn from_iter<I: IntoIterator<Item = AbiItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<AbiEvent> for Abi {
    fn from(event: AbiEvent) -> Self {
        Self::new(vec![AbiItem::Event(event)])
    }
}
