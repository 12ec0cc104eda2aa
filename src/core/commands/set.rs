// src/core/commands/set.rs

use super::helpers::{parse_i64, to_upper_str};
use crate::core::errors::ExoDbError;
use crate::core::protocol::RespValue;
use crate::core::storage::{BinaryString, Store, Value};
use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct Set {
    key: Bytes,
    value: Bytes,
    ttl_ms: Option<u64>,
    nx: bool,
    xx: bool,
}

impl Set {
    pub fn parse(args: &[Bytes]) -> Result<Self, ExoDbError> {
        if args.len() < 2 {
            return Err(ExoDbError::ArgArity("SET".to_string()));
        }
        let key = args[0].clone();
        let value = args[1].clone();
        let mut ttl_ms = None;
        let mut nx = false;
        let mut xx = false;

        let mut i = 2;
        while i < args.len() {
            match to_upper_str(&args[i])?.as_str() {
                "EX" => {
                    if ttl_ms.is_some() {
                        return Err(ExoDbError::Syntax);
                    }
                    i += 1;
                    let secs = parse_i64(args.get(i).ok_or(ExoDbError::Syntax)?)?;
                    if secs <= 0 {
                        return Err(ExoDbError::Syntax);
                    }
                    ttl_ms = Some(secs as u64 * 1000);
                }
                "PX" => {
                    if ttl_ms.is_some() {
                        return Err(ExoDbError::Syntax);
                    }
                    i += 1;
                    let ms = parse_i64(args.get(i).ok_or(ExoDbError::Syntax)?)?;
                    if ms <= 0 {
                        return Err(ExoDbError::Syntax);
                    }
                    ttl_ms = Some(ms as u64);
                }
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
                _ => return Err(ExoDbError::Syntax),
            }
            i += 1;
        }

        Ok(Set {
            key,
            value,
            ttl_ms,
            nx,
            xx,
        })
    }

    pub fn execute(self, store: &mut Store) -> Result<RespValue, ExoDbError> {
        let exists = store.key_exists(&self.key);
        if self.nx && exists {
            return Ok(RespValue::Null);
        }
        if self.xx && !exists {
            return Ok(RespValue::Null);
        }

        let bin = match self.ttl_ms {
            Some(ttl) => BinaryString::new_with_ttl(self.value, ttl),
            None => BinaryString::new(self.value),
        };
        store.set(self.key, Value::BinaryString(bin));
        Ok(RespValue::ok())
    }
}
