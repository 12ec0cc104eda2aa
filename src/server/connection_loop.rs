// src/server/connection_loop.rs

//! Accepts connections and spawns one session task per client. Shutdown
//! follows a fixed order (spec: cancel the expiry timer, abort every
//! session, clear the registry, save a final snapshot) so the snapshot on
//! disk always reflects the keyspace as of the moment the server stopped
//! accepting traffic.

use crate::config::Config;
use crate::core::errors::ExoDbError;
use crate::core::storage::Store;
use crate::server::session;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tokio::net::TcpListener;
use tokio::task::AbortHandle;
use tokio::time;
use tracing::{debug, info, warn};

pub async fn run(config: Config, store: Rc<RefCell<Store>>) -> Result<(), ExoDbError> {
    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(port = config.port, "listening");

    let sessions: Rc<RefCell<HashMap<u64, AbortHandle>>> = Rc::new(RefCell::new(HashMap::new()));
    let mut next_session_id: u64 = 0;

    let sweep_store = store.clone();
    let sweep_task = tokio::task::spawn_local(async move {
        let mut ticker = time::interval(config.expiry_sweep_interval);
        loop {
            ticker.tick().await;
            let removed = sweep_store.borrow_mut().expire_sweep();
            if removed > 0 {
                debug!(removed, "expire sweep");
            }
        }
    });

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, addr) = match accepted {
                    Ok(pair) => pair,
                    Err(e) => {
                        warn!(error = %e, "accept failed");
                        continue;
                    }
                };
                let session_id = next_session_id;
                next_session_id += 1;
                let session_store = store.clone();
                let sessions_for_cleanup = sessions.clone();
                let handle = tokio::task::spawn_local(async move {
                    session::run(session_id, stream, session_store).await;
                    sessions_for_cleanup.borrow_mut().remove(&session_id);
                });
                sessions.borrow_mut().insert(session_id, handle.abort_handle());
                debug!(session_id, %addr, "accepted connection");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                break;
            }
        }
    }

    sweep_task.abort();
    for (_, handle) in sessions.borrow_mut().drain() {
        handle.abort();
    }
    sessions.borrow_mut().clear();

    store.borrow_mut().save()?;
    info!("shutdown complete");
    Ok(())
}
