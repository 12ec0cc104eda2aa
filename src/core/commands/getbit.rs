// src/core/commands/getbit.rs

use super::helpers::{parse_i64, validate_arg_count};
use crate::core::errors::ExoDbError;
use crate::core::protocol::RespValue;
use crate::core::storage::Store;
use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct GetBit {
    key: Bytes,
    offset: i64,
}

impl GetBit {
    pub fn parse(args: &[Bytes]) -> Result<Self, ExoDbError> {
        validate_arg_count(args, 2, "GETBIT")?;
        let offset = parse_i64(&args[1])?;
        if offset < 0 {
            return Err(ExoDbError::Syntax);
        }
        Ok(GetBit {
            key: args[0].clone(),
            offset,
        })
    }

    pub fn execute(self, store: &mut Store) -> Result<RespValue, ExoDbError> {
        let bit = match store.get(&self.key) {
            None => 0,
            Some(value) => {
                let bytes = value.as_binary_string()?.bytes();
                let byte_index = (self.offset / 8) as usize;
                match bytes.get(byte_index) {
                    None => 0,
                    Some(byte) => (*byte >> (7 - (self.offset % 8) as u32)) & 1,
                }
            }
        };
        Ok(RespValue::Integer(bit as i64))
    }
}
