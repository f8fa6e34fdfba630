//! Canonical signatures and human-readable item parsing.
//!
//! The canonical signature is `name(type1,type2,...)` with tuples expanded
//! positionally and no whitespace, names, `indexed` or data locations. It
//! depends only on the item name and the ordered input types.

use chainabi_core::parse::{find_closing_paren, is_identifier, parse_params};
use chainabi_core::{AbiError, AbiEvent, AbiFunction, AbiParameter, AbiType, StateMutability};

pub fn canonical_function_signature(function: &AbiFunction) -> String {
    render(&function.name, &function.inputs)
}

pub fn canonical_event_signature(event: &AbiEvent) -> String {
    render(&event.name, &event.inputs)
}

/// Canonicalize a human-readable signature such as
/// `function transfer(address to, uint256 amount) returns (bool)`.
///
/// Anything after the closing parenthesis of the parameter list is ignored.
pub fn normalize_signature(sig: &str) -> Result<String, AbiError> {
    let parts = split_signature(sig)?;
    let inputs = parse_params(parts.params).map_err(|e| invalid(sig, e))?;
    Ok(render(parts.name, &inputs))
}

/// Build a full function description from a human-readable signature,
/// keeping parameter names, `returns (...)` outputs and mutability.
pub fn parse_function(sig: &str) -> Result<AbiFunction, AbiError> {
    let parts = split_signature(sig)?;
    if parts.keyword.is_some_and(|k| k != "function") {
        return Err(invalid(sig, "not a function signature"));
    }
    let inputs = parse_params(parts.params).map_err(|e| invalid(sig, e))?;
    let mut function = AbiFunction::new(parts.name, inputs, Vec::new());

    let mut rest = parts.trailing;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("returns") {
            let after = after.trim_start();
            if !after.starts_with('(') {
                return Err(invalid(sig, "expected `(` after `returns`"));
            }
            let close = find_closing_paren(after, 0)
                .ok_or_else(|| invalid(sig, "unbalanced parentheses in returns"))?;
            function.outputs = parse_params(&after[1..close]).map_err(|e| invalid(sig, e))?;
            rest = after[close + 1..].trim_start();
            continue;
        }

        let end = rest
            .find(|c: char| c.is_whitespace() || c == '(')
            .unwrap_or(rest.len());
        match &rest[..end] {
            "pure" => function.state_mutability = StateMutability::Pure,
            "view" => function.state_mutability = StateMutability::View,
            "payable" => function.state_mutability = StateMutability::Payable,
            "nonpayable" => function.state_mutability = StateMutability::Nonpayable,
            "external" | "public" => {}
            other => return Err(invalid(sig, format!("unexpected modifier `{other}`"))),
        }
        rest = rest[end..].trim_start();
    }
    Ok(function)
}

/// Build a full event description from a human-readable signature. A
/// trailing `anonymous` marks the event anonymous.
pub fn parse_event(sig: &str) -> Result<AbiEvent, AbiError> {
    let parts = split_signature(sig)?;
    if parts.keyword.is_some_and(|k| k != "event") {
        return Err(invalid(sig, "not an event signature"));
    }
    let inputs = parse_params(parts.params).map_err(|e| invalid(sig, e))?;
    let mut event = AbiEvent::new(parts.name, inputs);
    match parts.trailing {
        "" => {}
        "anonymous" => event.anonymous = true,
        other => return Err(invalid(sig, format!("unexpected modifier `{other}`"))),
    }
    Ok(event)
}

struct SignatureParts<'a> {
    keyword: Option<&'a str>,
    name: &'a str,
    params: &'a str,
    trailing: &'a str,
}

fn split_signature(sig: &str) -> Result<SignatureParts<'_>, AbiError> {
    let mut s = sig.trim();
    let mut keyword = None;
    for kw in ["function", "event", "error"] {
        if let Some(rest) = s.strip_prefix(kw) {
            if rest.starts_with(char::is_whitespace) {
                keyword = Some(kw);
                s = rest.trim_start();
                break;
            }
        }
    }

    let open = s
        .find('(')
        .ok_or_else(|| invalid(sig, "missing parameter list"))?;
    let name = s[..open].trim();
    if !is_identifier(name) {
        return Err(invalid(sig, format!("invalid name `{name}`")));
    }
    let close = find_closing_paren(s, open).ok_or_else(|| invalid(sig, "unbalanced parentheses"))?;

    Ok(SignatureParts {
        keyword,
        name,
        params: &s[open + 1..close],
        trailing: s[close + 1..].trim(),
    })
}

fn render(name: &str, params: &[AbiParameter]) -> String {
    let types: Vec<String> = params.iter().map(|p| p.ty.to_string()).collect();
    format!("{name}({})", types.join(","))
}

fn invalid(sig: &str, reason: impl ToString) -> AbiError {
    AbiError::InvalidSignature {
        signature: sig.to_string(),
        reason: reason.to_string(),
    }
}

/// Canonical type list of a parameter list, e.g. `(uint256,address)`.
pub fn canonical_params(params: &[AbiParameter]) -> String {
    AbiType::Tuple(params.to_vec()).to_string()
}
