//! Event log decoding.
//!
//! # Topic layout
//! - `topics[0]` is the event topic, unless the event is anonymous.
//! - The remaining topics hold the indexed inputs, one per topic, in order.
//! - **Value types** (uint, int, bool, address, bytesN) are stored verbatim,
//!   padded to 32 bytes, and are decoded back.
//! - **Reference types** (string, bytes, arrays, tuples) are stored as the
//!   keccak256 of their encoding. The original value is unrecoverable; the
//!   decoder returns [`AbiValue::Hash`].
//!
//! Non-indexed inputs are encoded together as one tuple in `data`.

use alloy_primitives::B256;
use chainabi_core::{Abi, AbiError, AbiEvent, AbiType, AbiValue, DecodedArgs, LogDecodeError};
use tracing::trace;

use crate::{decoder, encoder, selector};

/// Result of decoding one log against one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEvent {
    pub event_name: String,
    pub args: DecodedArgs,
}

/// Decode a log's topics and data against a known event.
///
/// Fails with [`LogDecodeError::TopicsMismatch`] when the number of argument
/// topics differs from the number of indexed inputs, and with
/// [`LogDecodeError::DataMismatch`] when `data` is too short for the
/// non-indexed inputs. `strict` only annotates the trace output; recovering
/// from a mismatch is up to the caller.
pub fn decode_event_log(
    event: &AbiEvent,
    topics: &[B256],
    data: &[u8],
    strict: bool,
) -> Result<DecodedEvent, LogDecodeError> {
    let indexed_count = event.indexed_inputs().count();

    let arg_topics = if event.anonymous {
        topics
    } else {
        let Some((first, rest)) = topics.split_first() else {
            return Err(LogDecodeError::TopicsMismatch {
                event: Box::new(event.clone()),
                expected: indexed_count,
                actual: 0,
            });
        };
        if let Some(expected) = selector::event_topic(event) {
            if *first != expected {
                return Err(LogDecodeError::SignatureMismatch {
                    event: event.name.clone(),
                    expected,
                    actual: *first,
                });
            }
        }
        rest
    };

    if arg_topics.len() != indexed_count {
        return Err(LogDecodeError::TopicsMismatch {
            event: Box::new(event.clone()),
            expected: indexed_count,
            actual: arg_topics.len(),
        });
    }

    let mut indexed = Vec::with_capacity(indexed_count);
    for (param, topic) in event.indexed_inputs().zip(arg_topics) {
        let value = if param.ty.is_value_type() {
            decoder::decode_word(&param.ty, topic.as_slice())?
        } else {
            AbiValue::Hash(*topic)
        };
        indexed.push(value);
    }

    let non_indexed = decoder::decode_iter(
        event.data_inputs().map(|p| &p.ty).collect::<Vec<_>>(),
        data,
    )
    .map_err(|source| {
        if source.is_size_error() {
            LogDecodeError::DataMismatch {
                event: Box::new(event.clone()),
                source,
            }
        } else {
            LogDecodeError::Abi(source)
        }
    })?;

    let mut indexed = indexed.into_iter();
    let mut non_indexed = non_indexed.into_iter();
    let mut values = Vec::with_capacity(event.inputs.len());
    for param in &event.inputs {
        let next = if param.indexed {
            indexed.next()
        } else {
            non_indexed.next()
        };
        if let Some(value) = next {
            values.push(value);
        }
    }

    trace!(
        event = %event.name,
        strict,
        topics = topics.len(),
        data_len = data.len(),
        "decoded event log"
    );

    Ok(DecodedEvent {
        event_name: event.name.clone(),
        args: DecodedArgs::from_params(&event.inputs, values),
    })
}

/// Select the event whose topic matches `topics[0]` and decode against it.
///
/// When no event carries that topic, the first anonymous event with one
/// indexed input per topic is tried.
pub fn decode_log_with_abi(
    abi: &Abi,
    topics: &[B256],
    data: &[u8],
    strict: bool,
) -> Result<DecodedEvent, LogDecodeError> {
    let event = topics
        .first()
        .and_then(|topic| {
            abi.events()
                .find(|e| selector::event_topic(e).as_ref() == Some(topic))
        })
        .or_else(|| {
            abi.events()
                .find(|e| e.anonymous && e.indexed_inputs().count() == topics.len())
        });
    match (event, topics.first()) {
        (Some(event), _) => decode_event_log(event, topics, data, strict),
        (None, Some(topic)) => Err(LogDecodeError::EventSignatureNotFound { topic: *topic }),
        (None, None) => Err(LogDecodeError::EventTopicsEmpty),
    }
}

/// Build the topic list for filtering on `event`.
///
/// `indexed_args` lines up with the event's indexed inputs; `None` (or a
/// missing trailing entry) is a wildcard. Topic 0 is the event topic unless
/// the event is anonymous.
pub fn encode_event_topics(
    event: &AbiEvent,
    indexed_args: &[Option<AbiValue>],
) -> Result<Vec<Option<B256>>, AbiError> {
    let indexed: Vec<_> = event.indexed_inputs().collect();
    if indexed_args.len() > indexed.len() {
        return Err(AbiError::EncodingLengthMismatch {
            expected: indexed.len(),
            given: indexed_args.len(),
        });
    }

    let mut topics = Vec::with_capacity(indexed_args.len() + 1);
    if let Some(topic0) = selector::event_topic(event) {
        topics.push(Some(topic0));
    }
    for (param, arg) in indexed.iter().zip(indexed_args) {
        let topic = match arg {
            None => None,
            Some(value) => Some(encode_topic(&param.ty, value)?),
        };
        topics.push(topic);
    }
    Ok(topics)
}

/// Topic word for one indexed value.
pub fn encode_topic(ty: &AbiType, value: &AbiValue) -> Result<B256, AbiError> {
    match ty {
        AbiType::String => match value {
            AbiValue::String(s) => Ok(selector::keccak256(s.as_bytes())),
            other => Err(AbiError::TypeMismatch {
                expected: ty.to_string(),
                got: other.kind().to_string(),
            }),
        },
        AbiType::Bytes => match value {
            AbiValue::Bytes(b) | AbiValue::FixedBytes(b) => Ok(selector::keccak256(b)),
            other => Err(AbiError::TypeMismatch {
                expected: ty.to_string(),
                got: other.kind().to_string(),
            }),
        },
        _ if ty.is_value_type() => Ok(B256::from_slice(&encoder::encode_value(ty, value)?)),
        _ => Ok(selector::keccak256(encoder::encode_value(ty, value)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::parse_event;
    use alloy_primitives::Address;
    use chainabi_core::AbiItem;

    fn word(hex_str: &str) -> B256 {
        let bytes = hex::decode(hex_str).unwrap();
        let mut out = [0u8; 32];
        out[32 - bytes.len()..].copy_from_slice(&bytes);
        B256::from(out)
    }

    fn transfer() -> AbiEvent {
        parse_event("event Transfer(address indexed from, address indexed to, uint256 value)")
            .unwrap()
    }

    #[test]
    fn decodes_transfer() {
        let event = transfer();
        let topics = vec![
            selector::event_topic(&event).unwrap(),
            word("a5cc3c03994db5b0d9a5eedd10cabab0813678ac"),
            word("0000000000000000000000000000000000000001"),
        ];
        let data = word("0de0b6b3a7640000").to_vec();

        let decoded = decode_event_log(&event, &topics, &data, true).unwrap();
        assert_eq!(decoded.event_name, "Transfer");
        assert!(decoded.args.is_named());
        assert_eq!(
            decoded.args.get("to"),
            Some(&AbiValue::Address(Address::with_last_byte(1)))
        );
        assert_eq!(
            decoded.args.get("value"),
            Some(&AbiValue::from(1_000_000_000_000_000_000u64))
        );
    }

    #[test]
    fn unnamed_inputs_decode_to_sequence() {
        let event =
            parse_event("event Transfer(address indexed, address indexed, uint256)").unwrap();
        let topics = vec![
            selector::event_topic(&event).unwrap(),
            word("01"),
            word("02"),
        ];
        let decoded = decode_event_log(&event, &topics, &word("05").to_vec(), false).unwrap();
        assert_eq!(decoded.args.get_index(2), Some(&AbiValue::from(5u8)));
        assert!(!decoded.args.is_named());
    }

    #[test]
    fn missing_indexed_topic_is_topics_mismatch() {
        let event = transfer();
        let topics = vec![selector::event_topic(&event).unwrap(), word("01")];
        let err = decode_event_log(&event, &topics, &word("05").to_vec(), true).unwrap_err();
        assert!(matches!(
            err,
            LogDecodeError::TopicsMismatch { expected: 2, actual: 1, .. }
        ));
    }

    #[test]
    fn short_data_is_data_mismatch() {
        let event =
            parse_event("event Swap(address indexed sender, uint256 a, uint256 b)").unwrap();
        let topics = vec![selector::event_topic(&event).unwrap(), word("01")];
        let err = decode_event_log(&event, &topics, &word("05").to_vec(), true).unwrap_err();
        assert!(err.is_mismatch());
        assert_eq!(err.event().map(|e| e.name.as_str()), Some("Swap"));

        let err = decode_event_log(&event, &topics, &[], true).unwrap_err();
        assert!(matches!(
            err,
            LogDecodeError::DataMismatch { source: AbiError::DecodingZeroData, .. }
        ));
    }

    #[test]
    fn invalid_bool_in_data_is_hard_error() {
        let event = parse_event("event Flag(bool on)").unwrap();
        let topics = vec![selector::event_topic(&event).unwrap()];
        let err = decode_event_log(&event, &topics, &word("02").to_vec(), false).unwrap_err();
        assert!(matches!(err, LogDecodeError::Abi(AbiError::InvalidBool { .. })));
        assert!(!err.is_mismatch());
    }

    #[test]
    fn wrong_topic0_is_signature_mismatch() {
        let event = transfer();
        let topics = vec![word("ff"), word("01"), word("02")];
        let err = decode_event_log(&event, &topics, &word("05").to_vec(), true).unwrap_err();
        assert!(matches!(err, LogDecodeError::SignatureMismatch { .. }));
    }

    #[test]
    fn indexed_dynamic_values_are_hashes() {
        let event = parse_event(
            "event Named(string indexed label, uint256[] indexed ids, (uint8,bool) indexed pair)",
        )
        .unwrap();
        let label = encode_topic(&event.inputs[0].ty, &AbiValue::from("vitalik")).unwrap();
        assert_eq!(label, selector::keccak256(b"vitalik"));

        let topics = vec![
            selector::event_topic(&event).unwrap(),
            label,
            word("aa"),
            word("bb"),
        ];
        let decoded = decode_event_log(&event, &topics, &[], true).unwrap();
        assert_eq!(decoded.args.get("label"), Some(&AbiValue::Hash(label)));
        assert_eq!(decoded.args.get("ids"), Some(&AbiValue::Hash(word("aa"))));
        assert_eq!(decoded.args.get("pair"), Some(&AbiValue::Hash(word("bb"))));
    }

    #[test]
    fn anonymous_event_uses_all_topics() {
        let event = parse_event("event Note(uint256 indexed id, address indexed who) anonymous")
            .unwrap();
        let topics = vec![word("07"), word("0a")];
        let decoded = decode_event_log(&event, &topics, &[], false).unwrap();
        assert_eq!(decoded.args.get("id"), Some(&AbiValue::from(7u8)));
        assert_eq!(
            decoded.args.get("who"),
            Some(&AbiValue::Address(Address::with_last_byte(0x0a)))
        );
    }

    #[test]
    fn interleaved_indexed_and_data_keep_order() {
        let event = parse_event("event Mixed(uint8 a, uint8 indexed b, string c, uint8 indexed d)")
            .unwrap();
        let data = encoder::encode(
            &event.data_inputs().cloned().collect::<Vec<_>>(),
            &[AbiValue::from(1u8), AbiValue::from("three")],
        )
        .unwrap();
        let topics = vec![selector::event_topic(&event).unwrap(), word("02"), word("04")];
        let decoded = decode_event_log(&event, &topics, &data, true).unwrap();
        let values = decoded.args.into_values();
        assert_eq!(
            values,
            vec![
                AbiValue::from(1u8),
                AbiValue::from(2u8),
                AbiValue::from("three"),
                AbiValue::from(4u8),
            ]
        );
    }

    #[test]
    fn decode_with_abi_selects_event() {
        let approval = parse_event(
            "event Approval(address indexed owner, address indexed spender, uint256 value)",
        )
        .unwrap();
        let abi = Abi::new(vec![AbiItem::Event(approval), AbiItem::Event(transfer())]);
        let topics = vec![
            selector::event_topic(&transfer()).unwrap(),
            word("01"),
            word("02"),
        ];
        let decoded = decode_log_with_abi(&abi, &topics, &word("03").to_vec(), true).unwrap();
        assert_eq!(decoded.event_name, "Transfer");

        assert_eq!(
            decode_log_with_abi(&abi, &[], &[], true).unwrap_err(),
            LogDecodeError::EventTopicsEmpty
        );
        assert!(matches!(
            decode_log_with_abi(&abi, &[word("99")], &[], true).unwrap_err(),
            LogDecodeError::EventSignatureNotFound { .. }
        ));
    }

    #[test]
    fn decode_with_abi_falls_back_to_anonymous_events() {
        let note = parse_event("event Note(uint256 indexed id, uint256 v) anonymous").unwrap();
        let abi = Abi::new(vec![AbiItem::Event(transfer()), AbiItem::Event(note)]);

        let decoded = decode_log_with_abi(&abi, &[word("07")], &word("09").to_vec(), true).unwrap();
        assert_eq!(decoded.event_name, "Note");
        assert_eq!(decoded.args.get("v"), Some(&AbiValue::from(9u8)));

        assert!(matches!(
            decode_log_with_abi(&abi, &[word("07"), word("08")], &[], true).unwrap_err(),
            LogDecodeError::EventSignatureNotFound { .. }
        ));
    }

    #[test]
    fn builds_filter_topics() {
        let event = transfer();
        let topics = encode_event_topics(
            &event,
            &[None, Some(AbiValue::Address(Address::with_last_byte(2)))],
        )
        .unwrap();
        assert_eq!(topics.len(), 3);
        assert_eq!(topics[0], selector::event_topic(&event));
        assert_eq!(topics[1], None);
        assert_eq!(topics[2], Some(word("02")));

        assert!(encode_event_topics(&event, &[None, None, None]).is_err());
    }
}
