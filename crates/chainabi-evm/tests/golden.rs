//! Golden fixture integration tests.
//!
//! Each test loads a real-shaped EVM log from `fixtures/evm/`, decodes it
//! against the event signature recorded in the fixture, and asserts the
//! argument values match the expected output recorded alongside it.

use alloy_primitives::B256;
use chainabi_core::{Abi, AbiError, AbiValue, LogDecodeError};
use chainabi_evm::{
    decode_event_log, decode_function_result, decode_log_with_abi, event_topic, function_selector,
    parse_event, selector::selector_hex,
};

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Parse hex bytes from a `"0x..."` string.
fn hex_to_bytes(s: &str) -> Vec<u8> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).unwrap_or_else(|e| panic!("bad hex '{s}': {e}"))
}

fn topics_from_fixture(f: &serde_json::Value) -> Vec<B256> {
    f["topics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().parse::<B256>().unwrap())
        .collect()
}

/// The fixtures live two levels above the crate root.
fn fixture_path(rel: &str) -> std::path::PathBuf {
    let mut p = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("../../fixtures");
    p.push(rel);
    p
}

fn load_fixture(rel: &str) -> serde_json::Value {
    let json = std::fs::read_to_string(fixture_path(rel)).expect("fixture not found");
    serde_json::from_str(&json).expect("invalid fixture JSON")
}

fn load_erc20_abi() -> Abi {
    let json = std::fs::read_to_string(fixture_path("abi/erc20.json")).expect("ABI not found");
    Abi::from_json(&json).expect("invalid ERC-20 ABI")
}

/// Decode a fixture log against its own signature and compare every arg.
fn assert_golden(rel: &str) {
    let f = load_fixture(rel);
    let event = parse_event(f["event"].as_str().unwrap()).unwrap();
    let topics = topics_from_fixture(&f);
    let data = hex_to_bytes(f["data"].as_str().unwrap());

    let decoded = decode_event_log(&event, &topics, &data, true)
        .unwrap_or_else(|e| panic!("{rel}: decode failed: {e}"));

    let expected = &f["expected"];
    assert_eq!(decoded.event_name, expected["eventName"].as_str().unwrap());
    let args = expected["args"].as_object().unwrap();
    assert_eq!(decoded.args.len(), args.len(), "{rel}: arg count");
    for (name, want) in args {
        let got = decoded
            .args
            .get(name)
            .unwrap_or_else(|| panic!("{rel}: missing arg {name}"));
        assert_eq!(got.to_string(), want.as_str().unwrap(), "{rel}: arg {name}");
    }
}

// ─── Event logs ───────────────────────────────────────────────────────────────

#[test]
fn erc20_transfer_golden() {
    assert_golden("evm/erc20-transfer.json");
}

#[test]
fn uniswap_v3_swap_golden() {
    assert_golden("evm/uniswap-v3-swap.json");
}

#[test]
fn erc721_transfer_golden() {
    assert_golden("evm/erc721-transfer.json");
}

#[test]
fn uniswap_v3_swap_negative_amount_is_sign_extended() {
    let f = load_fixture("evm/uniswap-v3-swap.json");
    let event = parse_event(f["event"].as_str().unwrap()).unwrap();
    let decoded = decode_event_log(
        &event,
        &topics_from_fixture(&f),
        &hex_to_bytes(f["data"].as_str().unwrap()),
        false,
    )
    .unwrap();
    let amount0 = decoded.args.get("amount0").and_then(AbiValue::as_int).unwrap();
    assert!(amount0.is_negative());
}

// ─── ERC-20 ABI JSON ──────────────────────────────────────────────────────────

#[test]
fn erc20_abi_selectors_and_topics() {
    let abi = load_erc20_abi();
    let selector = |name: &str| selector_hex(function_selector(abi.function(name).unwrap()));
    assert_eq!(selector("transfer"), "0xa9059cbb");
    assert_eq!(selector("balanceOf"), "0x70a08231");
    assert_eq!(selector("totalSupply"), "0x18160ddd");

    let approval = event_topic(abi.event("Approval").unwrap()).unwrap();
    assert_eq!(
        hex::encode(approval),
        "8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925"
    );
}

#[test]
fn erc20_transfer_decoded_through_abi() {
    let abi = load_erc20_abi();
    let f = load_fixture("evm/erc20-transfer.json");
    let decoded = decode_log_with_abi(
        &abi,
        &topics_from_fixture(&f),
        &hex_to_bytes(f["data"].as_str().unwrap()),
        true,
    )
    .unwrap();
    assert_eq!(decoded.event_name, "Transfer");
    assert_eq!(decoded.args.get("value").unwrap().to_string(), "2500000000");
}

#[test]
fn erc20_transfer_with_truncated_data_is_a_mismatch() {
    let abi = load_erc20_abi();
    let f = load_fixture("evm/erc20-transfer.json");
    let mut data = hex_to_bytes(f["data"].as_str().unwrap());
    data.truncate(16);

    let err = decode_log_with_abi(&abi, &topics_from_fixture(&f), &data, true).unwrap_err();
    assert!(err.is_mismatch(), "{err}");
    assert!(matches!(
        err,
        LogDecodeError::DataMismatch {
            source: AbiError::DecodingDataSizeTooSmall { required: 32, available: 16 },
            ..
        }
    ));
}

#[test]
fn erc20_name_result() {
    let abi = load_erc20_abi();
    let data = hex_to_bytes(
        "0x0000000000000000000000000000000000000000000000000000000000000020\
           0000000000000000000000000000000000000000000000000000000000000008\
           55534420436f696e000000000000000000000000000000000000000000000000",
    );
    let result = decode_function_result(abi.function("name").unwrap(), &data).unwrap();
    assert_eq!(result.get_index(0), Some(&AbiValue::from("USD Coin")));
}
