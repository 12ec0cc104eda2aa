// src/core/commands/save.rs

use super::helpers::validate_arg_count;
use crate::core::errors::ExoDbError;
use crate::core::protocol::RespValue;
use crate::core::storage::Store;
use bytes::Bytes;

#[derive(Debug, Clone, Default)]
pub struct Save;

impl Save {
    pub fn parse(args: &[Bytes]) -> Result<Self, ExoDbError> {
        validate_arg_count(args, 0, "SAVE")?;
        Ok(Save)
    }

    pub fn execute(self, store: &mut Store) -> Result<RespValue, ExoDbError> {
        store.save()?;
        Ok(RespValue::ok())
    }
}
