// src/server/session.rs

//! Per-connection command loop. A session cycles between four states
//! (spec: Reading, Dispatching, Writing, Closed): read one line, tokenize
//! and dispatch it, write the reply, and read again. A tokenizing failure
//! writes a single error reply and returns to reading rather than closing
//! the connection; any I/O failure moves straight to Closed.

use crate::core::commands::dispatch;
use crate::core::protocol::tokenize;
use crate::core::storage::Store;
use bytes::BytesMut;
use std::cell::RefCell;
use std::rc::Rc;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{debug, warn};

pub async fn run(session_id: u64, stream: TcpStream, store: Rc<RefCell<Store>>) {
    let peer = stream.peer_addr().ok();
    let (read_half, mut write_half) = io::split(stream);
    let mut reader = BufReader::new(read_half);
    let mut line = Vec::new();

    loop {
        line.clear();
        let read = match reader.read_until(b'\n', &mut line).await {
            Ok(n) => n,
            Err(e) => {
                warn!(session_id, ?peer, error = %e, "session read error, closing");
                return;
            }
        };
        if read == 0 {
            debug!(session_id, ?peer, "peer closed connection");
            return;
        }
        while matches!(line.last(), Some(b'\n') | Some(b'\r')) {
            line.pop();
        }
        if line.is_empty() {
            continue;
        }

        let reply = match tokenize(&line) {
            Ok(tokens) => dispatch(&tokens, &mut store.borrow_mut()),
            Err(e) => crate::core::protocol::RespValue::error(e),
        };

        let mut out = BytesMut::new();
        reply.encode(&mut out);
        if let Err(e) = write_half.write_all(&out).await {
            warn!(session_id, ?peer, error = %e, "session write error, closing");
            return;
        }
    }
}
