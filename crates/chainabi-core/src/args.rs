//! Decoded argument collections.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::AbiParameter;
use crate::value::AbiValue;

/// Arguments decoded against a parameter list.
///
/// The shape is decided once per decode: `Named` when every parameter has a
/// name (an empty list counts as all-named), `Ordered` otherwise. Named
/// entries keep parameter order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecodedArgs {
    Ordered(Vec<AbiValue>),
    Named(IndexMap<String, AbiValue>),
}

impl DecodedArgs {
    /// Shape `values` (one per parameter, in order) after `params`.
    pub fn from_params(params: &[AbiParameter], values: Vec<AbiValue>) -> Self {
        if !AbiParameter::all_named(params) {
            return DecodedArgs::Ordered(values);
        }
        DecodedArgs::Named(
            params
                .iter()
                .filter_map(|p| p.name.clone())
                .zip(values)
                .collect(),
        )
    }

    /// Empty collection of the shape `params` would decode to.
    pub fn empty_for(params: &[AbiParameter]) -> Self {
        if AbiParameter::all_named(params) {
            DecodedArgs::Named(IndexMap::new())
        } else {
            DecodedArgs::Ordered(Vec::new())
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, DecodedArgs::Named(_))
    }

    /// Look up a value by parameter name. Always `None` for ordered args.
    pub fn get(&self, name: &str) -> Option<&AbiValue> {
        match self {
            DecodedArgs::Named(map) => map.get(name),
            DecodedArgs::Ordered(_) => None,
        }
    }

    /// Look up a value by parameter position.
    pub fn get_index(&self, index: usize) -> Option<&AbiValue> {
        match self {
            DecodedArgs::Named(map) => map.get_index(index).map(|(_, v)| v),
            DecodedArgs::Ordered(values) => values.get(index),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DecodedArgs::Named(map) => map.len(),
            DecodedArgs::Ordered(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values in parameter order, dropping names.
    pub fn into_values(self) -> Vec<AbiValue> {
        match self {
            DecodedArgs::Named(map) => map.into_values().collect(),
            DecodedArgs::Ordered(values) => values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AbiType;

    #[test]
    fn all_named_produces_mapping_in_order() {
        let params = vec![
            AbiParameter::new("to", AbiType::Address),
            AbiParameter::new("amount", AbiType::Uint(256)),
        ];
        let args = DecodedArgs::from_params(
            &params,
            vec![AbiValue::Bool(true), AbiValue::from(7u64)],
        );
        assert!(args.is_named());
        assert_eq!(args.get("amount"), Some(&AbiValue::from(7u64)));
        assert_eq!(args.get_index(0), Some(&AbiValue::Bool(true)));
    }

    #[test]
    fn any_unnamed_produces_sequence() {
        let params = vec![
            AbiParameter::new("to", AbiType::Address),
            AbiParameter::unnamed(AbiType::Uint(256)),
        ];
        let values = vec![AbiValue::Bool(true), AbiValue::from(7u64)];
        let args = DecodedArgs::from_params(&params, values);
        assert!(!args.is_named());
        assert_eq!(args.get("to"), None);
        assert_eq!(args.get_index(1), Some(&AbiValue::from(7u64)));
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn empty_shapes() {
        assert_eq!(DecodedArgs::empty_for(&[]), DecodedArgs::Named(IndexMap::new()));
        assert_eq!(
            DecodedArgs::empty_for(&[AbiParameter::unnamed(AbiType::Bool)]),
            DecodedArgs::Ordered(vec![])
        );
        assert_eq!(
            serde_json::to_string(&DecodedArgs::empty_for(&[AbiParameter::new("a", AbiType::Bool)]))
                .unwrap(),
            "{}"
        );
        assert_eq!(
            serde_json::to_string(&DecodedArgs::empty_for(&[AbiParameter::unnamed(AbiType::Bool)]))
                .unwrap(),
            "[]"
        );
    }
}
