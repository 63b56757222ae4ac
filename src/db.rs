//! SQLite pool for the advocate directory.
//!
//! Every pooled connection gets the pragmas below and the `unicode_lower`
//! SQL function, which search and ordering rely on.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::expression::functions::declare_sql_function;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

#[declare_sql_function]
extern "SQL" {
    /// Lower-cases text with Rust's Unicode rules.
    ///
    /// SQLite's own `lower()` and `LIKE` only fold ASCII, so queries use this
    /// to match the in-memory store character for character.
    fn unicode_lower(text: Text) -> Text;
}

/// Registers the functions queries depend on.
pub fn register_functions(conn: &mut SqliteConnection) -> diesel::QueryResult<()> {
    unicode_lower_utils::register_impl(conn, |text: String| text.to_lowercase())
}

#[derive(Debug)]
pub struct ConnectionOptions {
    pub enable_wal: bool,
    /// How long a writer waits on a locked database, e.g. during seeding.
    pub busy_timeout: Option<Duration>,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            enable_wal: true,
            busy_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        (|| {
            if self.enable_wal {
                conn.batch_execute("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
            }
            if let Some(d) = self.busy_timeout {
                conn.batch_execute(&format!("PRAGMA busy_timeout = {};", d.as_millis()))?;
            }
            register_functions(conn)
        })()
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds the pool for `database_url`, a SQLite file path.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions::default()))
        .build(manager)
}

pub fn get_connection(pool: &DbPool) -> Result<DbConnection, PoolError> {
    pool.get().inspect_err(|e| {
        log::error!("Failed to get connection from pool: {e}");
    })
}
