// src/core/commands/zadd.rs

use super::helpers::{format_score, parse_f64, to_upper_str};
use crate::core::errors::ExoDbError;
use crate::core::protocol::RespValue;
use crate::core::storage::{SortedSet, Store, Value};
use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct ZAdd {
    key: Bytes,
    nx: bool,
    xx: bool,
    ch: bool,
    incr: bool,
    score: f64,
    member: Bytes,
}

impl ZAdd {
    pub fn parse(args: &[Bytes]) -> Result<Self, ExoDbError> {
        if args.len() < 3 {
            return Err(ExoDbError::ArgArity("ZADD".to_string()));
        }
        let key = args[0].clone();
        let mut nx = false;
        let mut xx = false;
        let mut ch = false;
        let mut incr = false;

        let mut i = 1;
        while i < args.len() - 2 {
            match to_upper_str(&args[i])?.as_str() {
                "NX" => {
                    if xx {
                        return Err(ExoDbError::Syntax);
                    }
                    nx = true;
                }
                "XX" => {
                    if nx {
                        return Err(ExoDbError::Syntax);
                    }
                    xx = true;
                }
                "CH" => ch = true,
                "INCR" => incr = true,
                _ => return Err(ExoDbError::Syntax),
            }
            i += 1;
        }

        let score = parse_f64(&args[args.len() - 2])?;
        let member = args[args.len() - 1].clone();

        Ok(ZAdd {
            key,
            nx,
            xx,
            ch,
            incr,
            score,
            member,
        })
    }

    pub fn execute(self, store: &mut Store) -> Result<RespValue, ExoDbError> {
        if matches!(store.get(&self.key), Some(Value::BinaryString(_))) {
            return Err(ExoDbError::WrongType);
        }

        // A missing key always replies with a plain :0 under XX, even for
        // INCR: the set was never created, so there's no score to report.
        let key_exists = store.key_exists(&self.key);
        if self.xx && !key_exists {
            return Ok(RespValue::Integer(0));
        }

        let value = store.get_or_insert_with(&self.key, || Value::SortedSet(SortedSet::new()));
        let zset = value.as_sorted_set_mut()?;
        let member_exists = zset.contains(&self.member);

        if self.xx && !member_exists {
            return Ok(self.no_op_reply());
        }
        if self.nx && member_exists {
            return Ok(self.no_op_reply());
        }

        if self.incr {
            let new_score = zset.increment_score(&self.member, self.score);
            return Ok(RespValue::bulk_string(format_score(new_score)));
        }

        let (created, changed) = zset.add(self.score, self.member);
        let reported = if self.ch { changed } else { created };
        Ok(RespValue::Integer(reported as i64))
    }

    /// Reply for a member-level NX/XX guard that skipped the write.
    fn no_op_reply(&self) -> RespValue {
        if self.incr {
            RespValue::Null
        } else {
            RespValue::Integer(0)
        }
    }
}
