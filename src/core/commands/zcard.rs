// src/core/commands/zcard.rs

use super::helpers::validate_arg_count;
use crate::core::errors::ExoDbError;
use crate::core::protocol::RespValue;
use crate::core::storage::{Store, Value};
use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct ZCard {
    key: Bytes,
}

impl ZCard {
    pub fn parse(args: &[Bytes]) -> Result<Self, ExoDbError> {
        validate_arg_count(args, 1, "ZCARD")?;
        Ok(ZCard {
            key: args[0].clone(),
        })
    }

    pub fn execute(self, store: &mut Store) -> Result<RespValue, ExoDbError> {
        match store.get(&self.key) {
            None => Ok(RespValue::Integer(0)),
            Some(Value::SortedSet(z)) => Ok(RespValue::Integer(z.size() as i64)),
            Some(Value::BinaryString(_)) => Err(ExoDbError::WrongType),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_key_is_zero() {
        let mut store = Store::new(PathBuf::from("/nonexistent"));
        let cmd = ZCard::parse(&[Bytes::from_static(b"z")]).unwrap();
        assert_eq!(cmd.execute(&mut store).unwrap(), RespValue::Integer(0));
    }

    #[test]
    fn counts_members() {
        use crate::core::storage::SortedSet;
        let mut store = Store::new(PathBuf::from("/nonexistent"));
        let mut z = SortedSet::new();
        z.add(1.0, Bytes::from_static(b"a"));
        z.add(2.0, Bytes::from_static(b"b"));
        store.set(Bytes::from_static(b"z"), Value::SortedSet(z));
        let cmd = ZCard::parse(&[Bytes::from_static(b"z")]).unwrap();
        assert_eq!(cmd.execute(&mut store).unwrap(), RespValue::Integer(2));
    }
}
