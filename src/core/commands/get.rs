// src/core/commands/get.rs

use super::helpers::validate_arg_count;
use crate::core::errors::ExoDbError;
use crate::core::protocol::RespValue;
use crate::core::storage::Store;
use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct Get {
    key: Bytes,
}

impl Get {
    pub fn parse(args: &[Bytes]) -> Result<Self, ExoDbError> {
        validate_arg_count(args, 1, "GET")?;
        Ok(Get {
            key: args[0].clone(),
        })
    }

    pub fn execute(self, store: &mut Store) -> Result<RespValue, ExoDbError> {
        match store.get(&self.key) {
            None => Ok(RespValue::Null),
            Some(value) => Ok(RespValue::bulk(value.as_binary_string()?.bytes().clone())),
        }
    }
}
