// src/core/commands/setbit.rs

use super::helpers::{parse_i64, validate_arg_count};
use crate::core::errors::ExoDbError;
use crate::core::protocol::RespValue;
use crate::core::storage::{BinaryString, Store, Value};
use bytes::{Bytes, BytesMut};

#[derive(Debug, Clone)]
pub struct SetBit {
    key: Bytes,
    offset: i64,
    bit: u8,
}

impl SetBit {
    pub fn parse(args: &[Bytes]) -> Result<Self, ExoDbError> {
        validate_arg_count(args, 3, "SETBIT")?;
        let offset = parse_i64(&args[1])?;
        if offset < 0 {
            return Err(ExoDbError::Syntax);
        }
        let bit = parse_i64(&args[2])?;
        if bit != 0 && bit != 1 {
            return Err(ExoDbError::Syntax);
        }
        Ok(SetBit {
            key: args[0].clone(),
            offset,
            bit: bit as u8,
        })
    }

    pub fn execute(self, store: &mut Store) -> Result<RespValue, ExoDbError> {
        if matches!(store.get(&self.key), Some(Value::SortedSet(_))) {
            return Err(ExoDbError::WrongType);
        }

        let value = store.get_or_insert_with(&self.key, || {
            Value::BinaryString(BinaryString::new(Bytes::new()))
        });
        let bin = value.as_binary_string_mut()?;

        let mut buf = BytesMut::from(bin.bytes().as_ref());
        let byte_index = (self.offset / 8) as usize;
        if byte_index >= buf.len() {
            buf.resize(byte_index + 1, 0);
        }
        let bit_index = 7 - (self.offset % 8) as u8;
        let mask = 1u8 << bit_index;
        let old_bit = (buf[byte_index] & mask != 0) as i64;

        if self.bit == 1 {
            buf[byte_index] |= mask;
        } else {
            buf[byte_index] &= !mask;
        }
        bin.set_bytes_from(buf);

        Ok(RespValue::Integer(old_bit))
    }
}
