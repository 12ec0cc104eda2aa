// src/core/protocol/resp.rs

//! Implements the RESP-style reply encoding used to write command results
//! back to the client. Only the reply-side types are modeled — requests are
//! plain text lines handled by the tokenizer, not a separate frame type.

use bytes::{BufMut, Bytes, BytesMut};

const CRLF: &[u8] = b"\r\n";

/// A single reply value produced by a command handler.
///
/// This is a simplified version of the full RESP type space: only the
/// variants the command surface actually produces are represented.
#[derive(Debug, Clone, PartialEq)]
pub enum RespValue {
    SimpleString(&'static str),
    BulkString(Bytes),
    Integer(i64),
    Array(Vec<RespValue>),
    Null,
    Error(String),
}

impl RespValue {
    /// Encodes this value onto the connection's write buffer.
    pub fn encode(&self, dst: &mut BytesMut) {
        match self {
            RespValue::SimpleString(s) => {
                dst.put_u8(b'+');
                dst.extend_from_slice(s.as_bytes());
                dst.extend_from_slice(CRLF);
            }
            RespValue::Error(s) => {
                dst.put_u8(b'-');
                dst.extend_from_slice(s.as_bytes());
                dst.extend_from_slice(CRLF);
            }
            RespValue::Integer(i) => {
                dst.put_u8(b':');
                dst.extend_from_slice(i.to_string().as_bytes());
                dst.extend_from_slice(CRLF);
            }
            RespValue::BulkString(b) => {
                dst.put_u8(b'$');
                dst.extend_from_slice(b.len().to_string().as_bytes());
                dst.extend_from_slice(CRLF);
                dst.extend_from_slice(b);
                dst.extend_from_slice(CRLF);
            }
            RespValue::Null => {
                dst.extend_from_slice(b"$-1\r\n");
            }
            RespValue::Array(items) => {
                dst.put_u8(b'*');
                dst.extend_from_slice(items.len().to_string().as_bytes());
                dst.extend_from_slice(CRLF);
                for item in items {
                    item.encode(dst);
                }
            }
        }
    }

    /// Builds the standard `-ERR <message>` error reply.
    pub fn error(msg: impl std::fmt::Display) -> Self {
        RespValue::Error(format!("ERR {msg}"))
    }

    pub fn bulk(bytes: Bytes) -> Self {
        RespValue::BulkString(bytes)
    }

    pub fn bulk_string(s: impl Into<String>) -> Self {
        RespValue::BulkString(Bytes::from(s.into().into_bytes()))
    }

    pub fn ok() -> Self {
        RespValue::SimpleString("OK")
    }
}
