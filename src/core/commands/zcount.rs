// src/core/commands/zcount.rs

use super::helpers::{parse_f64, validate_arg_count};
use crate::core::errors::ExoDbError;
use crate::core::protocol::RespValue;
use crate::core::storage::{Store, Value};
use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct ZCount {
    key: Bytes,
    min: f64,
    max: f64,
}

impl ZCount {
    pub fn parse(args: &[Bytes]) -> Result<Self, ExoDbError> {
        validate_arg_count(args, 3, "ZCOUNT")?;
        Ok(ZCount {
            key: args[0].clone(),
            min: parse_f64(&args[1])?,
            max: parse_f64(&args[2])?,
        })
    }

    pub fn execute(self, store: &mut Store) -> Result<RespValue, ExoDbError> {
        match store.get(&self.key) {
            None => Ok(RespValue::Integer(0)),
            Some(Value::SortedSet(z)) => {
                Ok(RespValue::Integer(z.count(self.min, self.max) as i64))
            }
            Some(Value::BinaryString(_)) => Err(ExoDbError::WrongType),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::SortedSet;
    use std::path::PathBuf;

    #[test]
    fn counts_inclusive_range() {
        let mut store = Store::new(PathBuf::from("/nonexistent"));
        let mut z = SortedSet::new();
        z.add(1.0, Bytes::from_static(b"a"));
        z.add(2.0, Bytes::from_static(b"b"));
        z.add(3.0, Bytes::from_static(b"c"));
        store.set(Bytes::from_static(b"z"), Value::SortedSet(z));
        let cmd = ZCount::parse(&[
            Bytes::from_static(b"z"),
            Bytes::from_static(b"1"),
            Bytes::from_static(b"2"),
        ])
        .unwrap();
        assert_eq!(cmd.execute(&mut store).unwrap(), RespValue::Integer(2));
    }

    #[test]
    fn missing_key_is_zero() {
        let mut store = Store::new(PathBuf::from("/nonexistent"));
        let cmd = ZCount::parse(&[
            Bytes::from_static(b"z"),
            Bytes::from_static(b"0"),
            Bytes::from_static(b"10"),
        ])
        .unwrap();
        assert_eq!(cmd.execute(&mut store).unwrap(), RespValue::Integer(0));
    }
}
