pub mod db;
mod sqlite_impl;

pub use sqlite_impl::SqliteDatabase;

/// The embedded migrations for the SQLite backend. Exposed so test harnesses (including the server crate's)
/// can bring up a fresh schema.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./src/sqlite/migrations");
