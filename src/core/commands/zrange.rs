// src/core/commands/zrange.rs

use super::helpers::{format_score, parse_i64, to_upper_str};
use crate::core::errors::ExoDbError;
use crate::core::protocol::RespValue;
use crate::core::storage::{Store, Value};
use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct ZRange {
    key: Bytes,
    start: i64,
    stop: i64,
    with_scores: bool,
}

impl ZRange {
    pub fn parse(args: &[Bytes]) -> Result<Self, ExoDbError> {
        if args.len() != 3 && args.len() != 4 {
            return Err(ExoDbError::ArgArity("ZRANGE".to_string()));
        }
        let with_scores = if args.len() == 4 {
            if to_upper_str(&args[3])? != "WITHSCORES" {
                return Err(ExoDbError::Syntax);
            }
            true
        } else {
            false
        };
        Ok(ZRange {
            key: args[0].clone(),
            start: parse_i64(&args[1])?,
            stop: parse_i64(&args[2])?,
            with_scores,
        })
    }

    pub fn execute(self, store: &mut Store) -> Result<RespValue, ExoDbError> {
        let zset = match store.get(&self.key) {
            None => return Ok(RespValue::Array(Vec::new())),
            Some(Value::BinaryString(_)) => return Err(ExoDbError::WrongType),
            Some(Value::SortedSet(z)) => z,
        };

        let size = zset.size() as i64;
        if size == 0 {
            return Ok(RespValue::Array(Vec::new()));
        }

        let start = normalize_index(self.start, size).min(size - 1);
        let stop = normalize_index(self.stop, size).min(size - 1);
        if start > stop || start >= size {
            return Ok(RespValue::Array(Vec::new()));
        }
        let start = start.max(0) as usize;
        let end = (stop + 1) as usize;

        let mut out = Vec::new();
        for (member, score) in zset.element_range(start, end) {
            out.push(RespValue::bulk(member));
            if self.with_scores {
                out.push(RespValue::bulk_string(format_score(score)));
            }
        }
        Ok(RespValue::Array(out))
    }
}

/// Negative indices count from the end; clamps the lower bound at 0.
fn normalize_index(idx: i64, size: i64) -> i64 {
    if idx < 0 {
        (size + idx).max(0)
    } else {
        idx
    }
}
