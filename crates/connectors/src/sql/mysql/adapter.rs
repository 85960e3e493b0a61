use crate::{error::ConnectorError, sql::mysql::source::MySqlRowCursor};
use model::execution::connection::ConnectionConfig;
use mysql_async::{Conn, OptsBuilder, prelude::*};
use tracing::{error, info};

/// A single MySQL connection used to run the dump query.
pub struct MySqlAdapter {
    conn: Conn,
    address: String,
}

impl MySqlAdapter {
    /// Connect, declare the session character set and ping the server.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, ConnectorError> {
        let address = config.address();
        info!("Connecting to MySQL at '{}'", address);

        let opts = OptsBuilder::default()
            .ip_or_hostname(config.host.clone())
            .tcp_port(config.port)
            .user(config.user.clone())
            .pass(config.password.clone())
            .db_name(config.database.clone());

        let mut conn = Conn::new(opts).await.map_err(|e| {
            error!("MySQL connection to '{}' failed: {}", address, e);
            ConnectorError::Connect {
                address: address.clone(),
                source: e,
            }
        })?;

        // charset is validated against a fixed list before we get here
        conn.query_drop(format!("SET NAMES {}", config.charset))
            .await?;

        conn.ping().await.map_err(|e| {
            error!("MySQL ping to '{}' failed: {}", address, e);
            ConnectorError::Connect {
                address: address.clone(),
                source: e,
            }
        })?;

        info!("Connected to MySQL at '{}'", address);
        Ok(Self { conn, address })
    }

    /// Prepare and execute `sql`, returning a cursor over its rows.
    ///
    /// The cursor borrows the connection; drop it before disconnecting.
    pub async fn query<'a>(&'a mut self, sql: &'a str) -> Result<MySqlRowCursor<'a>, ConnectorError> {
        info!("Executing query on '{}'", self.address);
        let result = self.conn.exec_iter(sql, ()).await?;
        MySqlRowCursor::new(result)
    }

    pub async fn disconnect(self) -> Result<(), ConnectorError> {
        self.conn.disconnect().await?;
        info!("Disconnected from MySQL at '{}'", self.address);
        Ok(())
    }
}
