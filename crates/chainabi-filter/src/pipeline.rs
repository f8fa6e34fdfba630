//! Per-log decode with strict / non-strict recovery.
//!
//! For every log, in order:
//! - no ABI → pass through untouched
//! - decoded → event name + args
//! - data or topics mismatch → dropped (strict) or kept with the event name
//!   and empty args (non-strict)
//! - anything else → the whole batch fails

use alloy_primitives::B256;
use chainabi_core::{Abi, AbiEvent, DecodedArgs, DecodedLog, Log, LogDecodeError};
use chainabi_evm::{decode_event_log, event_topic};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::debug;

use crate::error::FilterError;

/// Events of an ABI keyed by topic 0. The first event wins on collisions.
///
/// Anonymous events have no topic 0; a log whose first topic is unknown is
/// matched against them by indexed-input count instead.
struct EventIndex<'a> {
    by_topic: HashMap<B256, &'a AbiEvent>,
    anonymous: Vec<&'a AbiEvent>,
}

impl<'a> EventIndex<'a> {
    fn new(abi: &'a Abi) -> Self {
        let mut by_topic = HashMap::new();
        let mut anonymous = Vec::new();
        for event in abi.events() {
            match event_topic(event) {
                Some(topic) => {
                    by_topic.entry(topic).or_insert(event);
                }
                None => anonymous.push(event),
            }
        }
        Self {
            by_topic,
            anonymous,
        }
    }

    fn lookup(&self, topics: &[B256]) -> Result<&'a AbiEvent, LogDecodeError> {
        let found = topics
            .first()
            .and_then(|topic| self.by_topic.get(topic).copied())
            .or_else(|| {
                self.anonymous
                    .iter()
                    .copied()
                    .find(|event| event.indexed_inputs().count() == topics.len())
            });
        match (found, topics.first()) {
            (Some(event), _) => Ok(event),
            (None, Some(topic)) => Err(LogDecodeError::EventSignatureNotFound { topic: *topic }),
            (None, None) => Err(LogDecodeError::EventTopicsEmpty),
        }
    }
}

/// Decode a batch of logs, preserving the relative order of retained logs.
///
/// Batches of at least `parallel_threshold` logs (when non-zero) are decoded
/// on the rayon pool.
pub fn decode_logs(
    abi: Option<&Abi>,
    logs: Vec<Log>,
    strict: bool,
    parallel_threshold: usize,
) -> Result<Vec<DecodedLog>, FilterError> {
    let Some(abi) = abi else {
        return Ok(logs.into_iter().map(DecodedLog::raw).collect());
    };
    let index = EventIndex::new(abi);

    let outcomes: Vec<Result<Option<DecodedLog>, FilterError>> =
        if parallel_threshold > 0 && logs.len() >= parallel_threshold {
            logs.into_par_iter()
                .enumerate()
                .map(|(i, log)| decode_one(&index, i, log, strict))
                .collect()
        } else {
            logs.into_iter()
                .enumerate()
                .map(|(i, log)| decode_one(&index, i, log, strict))
                .collect()
        };

    outcomes.into_iter().filter_map(Result::transpose).collect()
}

fn decode_one(
    index: &EventIndex<'_>,
    position: usize,
    log: Log,
    strict: bool,
) -> Result<Option<DecodedLog>, FilterError> {
    let decoded = index
        .lookup(&log.topics)
        .and_then(|event| decode_event_log(event, &log.topics, &log.data, strict));

    match decoded {
        Ok(decoded) => Ok(Some(DecodedLog::decoded(log, decoded.event_name, decoded.args))),
        Err(err) if err.is_mismatch() => match err.event() {
            Some(_) if strict => {
                debug!(
                    index = position,
                    error = %err,
                    "dropping log that does not match its event"
                );
                Ok(None)
            }
            Some(event) => {
debug!(
                    index = position,
                    error = %err,
                    "keeping log that does not match its event"
                );
                let args = DecodedArgs::empty_for(&event.inputs);
                Ok(Some(DecodedLog::decoded(log, event.name.clone(), args)))
            }
            None => Err(FilterError::Decode {
                index: position,
                source: err,
            }),
        },
        Err(source) => Err(FilterError::Decode {
            index: position,
            source,
        }),
    }
}
