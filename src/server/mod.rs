// src/server/mod.rs

pub mod connection_loop;
pub mod session;

use crate::config::Config;
use crate::core::errors::ExoDbError;
use crate::core::storage::Store;
use std::cell::RefCell;
use std::rc::Rc;

/// Loads the snapshot, then runs the accept loop until shutdown. Must be
/// driven from inside a `LocalSet` since sessions and the expiry timer are
/// spawned with `spawn_local`.
pub async fn run(config: Config) -> Result<(), ExoDbError> {
    let mut store = Store::new(config.snapshot_path.clone());
    store.load()?;
    let store = Rc::new(RefCell::new(store));

    connection_loop::run(config, store).await
}
