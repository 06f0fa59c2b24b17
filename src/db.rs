use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

use crate::db_errors::StorageError;

/// Bundled schema script applied by [`Store::initialize`]
pub const SCHEMA: &str = include_str!("schema.sql");

/// SQLite-backed store for the invite link and the banned sticker packs.
///
/// The pool is injected once and reused; every operation runs one
/// statement group and keeps no state between calls.
#[derive(Clone, Debug)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (or create) the database at `database_url`.
    ///
    /// Accepts both `sqlite:` URLs (with query parameters) and plain file paths.
    pub async fn open(database_url: &str) -> Result<Self, StorageError> {
        info!(database_url = %database_url, "Opening SQLite store");

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(StorageError::Init)?
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(StorageError::Init)?;

        Ok(Self { pool })
    }

    /// Wrap an already configured pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the database schema
    pub async fn initialize(&self) -> Result<(), StorageError> {
        info!("Initializing database schema...");

        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Init)?;

        info!("Database schema initialized successfully");
        Ok(())
    }

    /// Replace the stored invite link with `invite`
    pub async fn set_invite_link(&self, invite: &str) -> Result<(), StorageError> {
        info!("Saving new invite link");

        let mut tx = self.pool.begin().await.map_err(StorageError::Write)?;

        sqlx::query("DELETE FROM invite_link")
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Write)?;

        sqlx::query("INSERT INTO invite_link (invite) VALUES (?1)")
            .bind(invite)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Write)?;

        tx.commit().await.map_err(StorageError::Write)?;
        Ok(())
    }

    /// Retrieve the current invite link.
    ///
    /// Fails with [`StorageError::NotFound`] when no link was ever saved.
    pub async fn get_invite_link(&self) -> Result<String, StorageError> {
        let invite: Option<String> =
            sqlx::query_scalar("SELECT invite FROM invite_link LIMIT 1")
                .fetch_optional(&self.pool)
                .await
                .map_err(StorageError::Read)?;

        invite.ok_or(StorageError::NotFound("invite link"))
    }

    /// Ban a sticker pack by its unique set name.
    ///
    /// Returns `false` when the pack was already banned.
    pub async fn add_banned_pack(&self, set_name: &str) -> Result<bool, StorageError> {
        let set_name = set_name.to_lowercase();
        info!(set_name = %set_name, "Banning sticker pack");

        let result = sqlx::query(
            "INSERT OR IGNORE INTO banned_packs (set_name) VALUES (?1)",
        )
        .bind(&set_name)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Write)?;

        Ok(result.rows_affected() > 0)
    }

    /// All banned packs, sorted ascending by name
    pub async fn get_banned_packs(&self) -> Result<Vec<String>, StorageError> {
        sqlx::query_scalar::<_, String>(
            "SELECT set_name FROM banned_packs ORDER BY set_name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Read)
    }

    /// Remove a pack from the ban list.
    ///
    /// Unknown names are not an error; the return value tells whether
    /// anything was removed.
    pub async fn unban_pack(&self, set_name: &str) -> Result<bool, StorageError> {
        let set_name = set_name.to_lowercase();
        info!(set_name = %set_name, "Unbanning sticker pack");

        let result = sqlx::query("DELETE FROM banned_packs WHERE set_name = ?1")
            .bind(&set_name)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Write)?;

        Ok(result.rows_affected() > 0)
    }

    /// Look up a single pack; the result holds zero or one name
    pub async fn check_banned_pack(
        &self,
        set_name: &str,
    ) -> Result<Vec<String>, StorageError> {
        let set_name = set_name.to_lowercase();
        debug!(set_name = %set_name, "Checking sticker pack");

        sqlx::query_scalar::<_, String>(
            "SELECT set_name FROM banned_packs WHERE set_name = ?1",
        )
        .bind(&set_name)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Read)
    }

    pub async fn is_pack_banned(&self, set_name: &str) -> Result<bool, StorageError> {
        Ok(!self.check_banned_pack(set_name).await?.is_empty())
    }
}
