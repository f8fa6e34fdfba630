//! The ABI type system and item descriptions.
//!
//! [`AbiType`] is a closed recursive description of every Solidity ABI type.
//! Whether a type is static or dynamic, and how many bytes it occupies in a
//! head region, is computed on demand from the immutable description.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AbiError;
use crate::parse;

/// A Solidity ABI type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbiType {
    // --- Elementary types ---
    /// Unsigned integer (uint8 .. uint256). Width in bits.
    Uint(u16),
    /// Signed integer (int8 .. int256). Width in bits.
    Int(u16),
    Bool,
    /// 20-byte account address
    Address,
    /// Fixed-size byte array (bytes1 .. bytes32). Length in bytes.
    FixedBytes(u8),

    // --- Dynamic elementary types ---
    Bytes,
    String,

    // --- Composite types ---
    /// Variable-length array `T[]`
    Array(Box<AbiType>),
    /// Fixed-length array `T[N]`
    FixedArray(Box<AbiType>, usize),
    /// Tuple / struct
    Tuple(Vec<AbiParameter>),
}

impl AbiType {
    /// Returns `true` if the encoding of this type is placed in the tail and
    /// referenced from the head by an offset.
    pub fn is_dynamic(&self) -> bool {
        match self {
            AbiType::Bytes | AbiType::String | AbiType::Array(_) => true,
            AbiType::FixedArray(inner, _) => inner.is_dynamic(),
            AbiType::Tuple(components) => components.iter().any(|p| p.ty.is_dynamic()),
            _ => false,
        }
    }

    /// Number of bytes this type occupies in a head region. Saturates at
    /// `usize::MAX` for fixed arrays too large to ever be encoded.
    pub fn head_size(&self) -> usize {
        if self.is_dynamic() {
            return 32;
        }
        match self {
            AbiType::FixedArray(inner, len) => inner.head_size().saturating_mul(*len),
            AbiType::Tuple(components) => components
                .iter()
                .fold(0usize, |acc, p| acc.saturating_add(p.ty.head_size())),
            _ => 32,
        }
    }

    /// Elementary value types fit in a single word and are stored verbatim in
    /// an indexed topic. Everything else is stored as a hash.
    pub fn is_value_type(&self) -> bool {
        matches!(
            self,
            AbiType::Uint(_)
                | AbiType::Int(_)
                | AbiType::Bool
                | AbiType::Address
                | AbiType::FixedBytes(_)
        )
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::Uint(bits) => write!(f, "uint{bits}"),
            AbiType::Int(bits) => write!(f, "int{bits}"),
            AbiType::Bool => write!(f, "bool"),
            AbiType::Address => write!(f, "address"),
            AbiType::FixedBytes(n) => write!(f, "bytes{n}"),
            AbiType::Bytes => write!(f, "bytes"),
            AbiType::String => write!(f, "string"),
            AbiType::Array(inner) => write!(f, "{inner}[]"),
            AbiType::FixedArray(inner, len) => write!(f, "{inner}[{len}]"),
            AbiType::Tuple(components) => {
                f.write_str("(")?;
                for (i, component) in components.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", component.ty)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl FromStr for AbiType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse::parse_type(s)
    }
}

/// One named (or unnamed) parameter of a function, event or tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "JsonParam", into = "JsonParam")]
pub struct AbiParameter {
    pub name: Option<String>,
    pub ty: AbiType,
    /// Only meaningful for event inputs.
    pub indexed: bool,
    /// Solidity-level type, e.g. `struct Pool.Limits`. Informational only.
    pub internal_type: Option<String>,
}

impl AbiParameter {
    pub fn new(name: impl Into<String>, ty: AbiType) -> Self {
        let name = name.into();
        Self {
            name: (!name.is_empty()).then_some(name),
            ty,
            indexed: false,
            internal_type: None,
        }
    }

    pub fn unnamed(ty: AbiType) -> Self {
        Self {
            name: None,
            ty,
            indexed: false,
            internal_type: None,
        }
    }

    /// Mark the parameter as indexed.
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    /// `true` when every parameter carries a name. Vacuously `true` for an
    /// empty list.
    pub fn all_named(params: &[AbiParameter]) -> bool {
        params.iter().all(|p| p.name.is_some())
    }
}

/// Parameter as it appears in Solidity JSON ABI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonParam {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    components: Option<Vec<JsonParam>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    indexed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    internal_type: Option<String>,
}

impl TryFrom<JsonParam> for AbiParameter {
    type Error = AbiError;

    fn try_from(json: JsonParam) -> Result<Self, Self::Error> {
        let ty = match json.ty.strip_prefix("tuple") {
            Some(suffixes) => {
                let components = json
                    .components
                    .ok_or_else(|| AbiError::invalid_type(&json.ty, "tuple without components"))?
                    .into_iter()
                    .map(AbiParameter::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                if components.is_empty() {
                    return Err(AbiError::invalid_type(&json.ty, "empty tuple"));
                }
                parse::apply_array_suffixes(AbiType::Tuple(components), suffixes, &json.ty)?
            }
            None => json.ty.parse()?,
        };
        Ok(Self {
            name: (!json.name.is_empty()).then_some(json.name),
            ty,
            indexed: json.indexed.unwrap_or(false),
            internal_type: json.internal_type,
        })
    }
}

impl From<AbiParameter> for JsonParam {
    fn from(param: AbiParameter) -> Self {
        let (ty, components) = json_type(&param.ty);
        Self {
            name: param.name.unwrap_or_default(),
            ty,
            components: components.map(|c| c.into_iter().map(JsonParam::from).collect()),
            indexed: param.indexed.then_some(true),
            internal_type: param.internal_type,
        }
    }
}

/// Split a type into its JSON `type` string (`tuple[2][]`) and components.
fn json_type(ty: &AbiType) -> (String, Option<Vec<AbiParameter>>) {
    match ty {
        AbiType::Tuple(components) => ("tuple".to_string(), Some(components.clone())),
        AbiType::Array(inner) => {
            let (base, components) = json_type(inner);
            (format!("{base}[]"), components)
        }
        AbiType::FixedArray(inner, len) => {
            let (base, components) = json_type(inner);
            (format!("{base}[{len}]"), components)
        }
        other => (other.to_string(), None),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    #[default]
    Nonpayable,
    Payable,
}

impl fmt::Display for StateMutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StateMutability::Pure => "pure",
            StateMutability::View => "view",
            StateMutability::Nonpayable => "nonpayable",
            StateMutability::Payable => "payable",
        })
    }
}

/// A contract function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiFunction {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiParameter>,
    #[serde(default)]
    pub outputs: Vec<AbiParameter>,
    #[serde(default)]
    pub state_mutability: StateMutability,
}

impl AbiFunction {
    pub fn new(
        name: impl Into<String>,
        inputs: Vec<AbiParameter>,
        outputs: Vec<AbiParameter>,
    ) -> Self {
        Self {
            name: name.into(),
            inputs,
            outputs,
            state_mutability: StateMutability::default(),
        }
    }
}

/// A contract event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbiEvent {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiParameter>,
    /// Anonymous events do not emit their signature hash as topic 0.
    #[serde(default)]
    pub anonymous: bool,
}

impl AbiEvent {
    pub fn new(name: impl Into<String>, inputs: Vec<AbiParameter>) -> Self {
        Self {
            name: name.into(),
            inputs,
            anonymous: false,
        }
    }

    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }

    pub fn indexed_inputs(&self) -> impl Iterator<Item = &AbiParameter> {
        self.inputs.iter().filter(|p| p.indexed)
    }

    pub fn data_inputs(&self) -> impl Iterator<Item = &AbiParameter> {
        self.inputs.iter().filter(|p| !p.indexed)
    }
}
