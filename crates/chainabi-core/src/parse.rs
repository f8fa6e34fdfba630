//! Human-readable type and parameter-list parsing.
//!
//! Accepts canonical type strings (`uint256`, `(address,bool)[]`) as well as
//! the looser Solidity spelling found in hand-written signatures:
//! `uint`/`int` aliases, the `tuple` keyword, parameter names, `indexed`, data
//! locations and `payable`.

use crate::error::AbiError;
use crate::types::{AbiParameter, AbiType};

/// Words that may follow a parameter type without being its name.
const MODIFIERS: &[&str] = &["memory", "calldata", "storage", "payable"];

/// Parse a single type string.
pub fn parse_type(input: &str) -> Result<AbiType, AbiError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(AbiError::invalid_type(input, "empty type"));
    }

    let (base, suffixes) = if let Some(rest) = tuple_body_start(s) {
        let open = s.len() - rest.len() - 1;
        let close = find_closing_paren(s, open)
            .ok_or_else(|| AbiError::invalid_type(input, "unbalanced parentheses"))?;
        let components = parse_params(&s[open + 1..close])?;
        if components.is_empty() {
            return Err(AbiError::invalid_type(input, "empty tuple"));
        }
        (AbiType::Tuple(components), &s[close + 1..])
    } else {
        let split = s.find('[').unwrap_or(s.len());
        (parse_elementary(&s[..split], input)?, &s[split..])
    };

    apply_array_suffixes(base, suffixes, input)
}

/// Wrap `base` in one array layer per `[]` / `[N]` suffix, innermost first:
/// `uint8[2][]` is a dynamic array of `uint8[2]`.
pub fn apply_array_suffixes(
    mut base: AbiType,
    suffixes: &str,
    input: &str,
) -> Result<AbiType, AbiError> {
    let mut rest = suffixes.trim();
    while !rest.is_empty() {
        let inner = rest
            .strip_prefix('[')
            .ok_or_else(|| AbiError::invalid_type(input, "unexpected trailing characters"))?;
        let close = inner
            .find(']')
            .ok_or_else(|| AbiError::invalid_type(input, "unclosed array bracket"))?;
        let len = inner[..close].trim();
        base = if len.is_empty() {
            AbiType::Array(Box::new(base))
        } else {
            let n = parse_size(len).ok_or_else(|| {
                AbiError::invalid_type(input, format!("invalid array length `{len}`"))
            })?;
            AbiType::FixedArray(Box::new(base), n)
        };
        rest = inner[close + 1..].trim_start();
    }
    Ok(base)
}

fn parse_elementary(name: &str, input: &str) -> Result<AbiType, AbiError> {
    match name.trim() {
        "address" => return Ok(AbiType::Address),
        "bool" => return Ok(AbiType::Bool),
        "string" => return Ok(AbiType::String),
        "bytes" => return Ok(AbiType::Bytes),
        "uint" => return Ok(AbiType::Uint(256)),
        "int" => return Ok(AbiType::Int(256)),
        _ => {}
    }

    let name = name.trim();
    if let Some(bits) = name.strip_prefix("uint") {
        return Ok(AbiType::Uint(parse_bits(bits, input)?));
    }
    if let Some(bits) = name.strip_prefix("int") {
        return Ok(AbiType::Int(parse_bits(bits, input)?));
    }
    if let Some(size) = name.strip_prefix("bytes") {
        return match parse_size(size) {
            Some(n @ 1..=32) => Ok(AbiType::FixedBytes(n as u8)),
            _ => Err(AbiError::invalid_type(input, "bytesN size must be between 1 and 32")),
        };
    }
    Err(AbiError::invalid_type(input, format!("unknown type `{name}`")))
}

fn parse_bits(bits: &str, input: &str) -> Result<u16, AbiError> {
    match parse_size(bits) {
        Some(n @ 8..=256) if n % 8 == 0 => Ok(n as u16),
        _ => Err(AbiError::invalid_type(
            input,
            "integer width must be a multiple of 8 between 8 and 256",
        )),
    }
}

/// A positive decimal size: ASCII digits only, no sign, no leading zero.
fn parse_size(s: &str) -> Option<usize> {
    if s.is_empty() || s.starts_with('0') || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parse a comma-separated parameter list (without the surrounding parens).
///
/// Each entry is `type [indexed] [location] [name]`. An empty or all-blank
/// list yields no parameters.
pub fn parse_params(list: &str) -> Result<Vec<AbiParameter>, AbiError> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }
    split_top_level(list)?
        .into_iter()
        .map(parse_param)
        .collect()
}

fn parse_param(entry: &str) -> Result<AbiParameter, AbiError> {
    let entry = entry.trim();
    if entry.is_empty() {
        return Err(AbiError::invalid_type(entry, "empty parameter"));
    }

    let type_end = if let Some(rest) = tuple_body_start(entry) {
        let open = entry.len() - rest.len() - 1;
        let close = find_closing_paren(entry, open)
            .ok_or_else(|| AbiError::invalid_type(entry, "unbalanced parentheses"))?;
        close + 1 + suffix_len(&entry[close + 1..])
    } else {
        let word_end = entry.find(char::is_whitespace).unwrap_or(entry.len());
        word_end.max(entry.find('[').map_or(0, |b| b + suffix_len(&entry[b..])))
    };

    let ty = parse_type(&entry[..type_end])?;
    let mut param = AbiParameter::unnamed(ty);

    for word in entry[type_end..].split_whitespace() {
        match word {
            "indexed" => param.indexed = true,
            w if MODIFIERS.contains(&w) => {}
            w if param.name.is_none() && is_identifier(w) => param.name = Some(w.to_string()),
            w => {
                return Err(AbiError::invalid_type(
                    entry,
                    format!("unexpected token `{w}`"),
                ))
            }
        }
    }
    Ok(param)
}

/// Length of the leading run of `[..]` groups (with optional spaces between).
fn suffix_len(s: &str) -> usize {
    let mut end = 0;
    let mut rest = s;
    loop {
        let trimmed = rest.trim_start();
        let Some(inner) = trimmed.strip_prefix('[') else {
            return end;
        };
        let Some(close) = inner.find(']') else {
            return end;
        };
        let consumed = (rest.len() - trimmed.len()) + 1 + close + 1;
        end += consumed;
        rest = &rest[consumed..];
    }
}

/// If `s` opens a tuple (`(` or `tuple(`), return the text after the `(`.
fn tuple_body_start(s: &str) -> Option<&str> {
    s.strip_prefix('(')
        .or_else(|| s.strip_prefix("tuple").and_then(|r| r.trim_start().strip_prefix('(')))
}

/// Index of the `)` matching the `(` at `open`.
pub fn find_closing_paren(s: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices().skip_while(|(i, _)| *i < open) {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split on commas that are not nested inside parentheses or brackets.
fn split_top_level(list: &str) -> Result<Vec<&str>, AbiError> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in list.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => {
                depth -= 1;
                if depth < 0 {
                    return Err(AbiError::invalid_type(list, "unbalanced parentheses"));
                }
            }
            ',' if depth == 0 => {
                parts.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(AbiError::invalid_type(list, "unbalanced parentheses"));
    }
    parts.push(&list[start..]);
    Ok(parts)
}

/// Solidity identifier: `[A-Za-z_$][A-Za-z0-9_$]*`.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
