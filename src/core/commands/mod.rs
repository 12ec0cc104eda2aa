// src/core/commands/mod.rs

//! Command parsing and dispatch. Each command is a small type with its own
//! `parse`/`execute` pair; `dispatch` maps a tokenized request line onto one
//! of them and turns any `ExoDbError` into the matching RESP error reply.

pub mod get;
pub mod getbit;
pub mod helpers;
pub mod save;
pub mod set;
pub mod setbit;
pub mod zadd;
pub mod zcard;
pub mod zcount;
pub mod zrange;

use crate::core::errors::ExoDbError;
use crate::core::protocol::RespValue;
use crate::core::storage::Store;
use bytes::Bytes;

/// Parses and runs one command against `store`, returning the reply to send
/// back. Parse and execute failures both become a RESP error value — this is
/// the only place command errors are turned into wire replies.
pub fn dispatch(tokens: &[Bytes], store: &mut Store) -> RespValue {
    let Some(name) = tokens.first() else {
        return RespValue::error(ExoDbError::Syntax);
    };
    let name_upper = match std::str::from_utf8(name) {
        Ok(s) => s.to_ascii_uppercase(),
        Err(_) => return RespValue::error(ExoDbError::Syntax),
    };
    let args = &tokens[1..];

    let result = match name_upper.as_str() {
        "GET" => get::Get::parse(args).and_then(|c| c.execute(store)),
        "SET" => set::Set::parse(args).and_then(|c| c.execute(store)),
        "GETBIT" => getbit::GetBit::parse(args).and_then(|c| c.execute(store)),
        "SETBIT" => setbit::SetBit::parse(args).and_then(|c| c.execute(store)),
        "ZADD" => zadd::ZAdd::parse(args).and_then(|c| c.execute(store)),
        "ZCARD" => zcard::ZCard::parse(args).and_then(|c| c.execute(store)),
        "ZCOUNT" => zcount::ZCount::parse(args).and_then(|c| c.execute(store)),
        "ZRANGE" => zrange::ZRange::parse(args).and_then(|c| c.execute(store)),
        "SAVE" => save::Save::parse(args).and_then(|c| c.execute(store)),
        other => Err(ExoDbError::UnknownCommand(other.to_string())),
    };

    match result {
        Ok(reply) => reply,
        Err(e) => RespValue::error(e),
    }
}
