//! Per-action connection opening.
//!
//! No pool: each user interaction opens its own short-lived connection from
//! the current settings and drops it afterwards. This keeps a logout/login
//! between actions from ever reusing a stale authenticated connection.

use crate::config::{ConnectionSettings, DEFAULT_CONNECT_TIMEOUT_SECS};
use crate::error::{AdminError, AdminResult};
use sqlx::ConnectOptions;
use sqlx::mysql::MySqlConnection;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// Open a connection from the given settings, with a connect timeout.
pub async fn open(settings: &ConnectionSettings) -> AdminResult<MySqlConnection> {
    let connect_timeout = Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS);
    match timeout(connect_timeout, settings.connect_options().connect()).await {
        Ok(Ok(conn)) => {
            debug!(
                host = %settings.host,
                database = %settings.database,
                user = %settings.user,
                "Opened database connection"
            );
            Ok(conn)
        }
        Ok(Err(e)) => Err(AdminError::from(e)),
        Err(_) => Err(AdminError::timeout(
            "Verbindungsaufbau",
            DEFAULT_CONNECT_TIMEOUT_SECS,
        )),
    }
}
