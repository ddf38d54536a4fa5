use std::str::FromStr;

use cc_wallet_types::{CoinId, FreezeOptions, Txid};
use serde_json::Value;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Row, SqlitePool,
};
use tracing::debug;

use crate::{
    AddressRecord, AddressStore, ConfigStore, LockTimeStore, RawTxRecord, RawTxStore, StoreError,
    TxStatus,
};

const SCHEMA: &[&str] = &[
    "
    CREATE TABLE IF NOT EXISTS `config` (
        `key` TEXT PRIMARY KEY NOT NULL,
        `value` TEXT NOT NULL
    )
    ",
    "
    CREATE TABLE IF NOT EXISTS `addresses` (
        `address` TEXT PRIMARY KEY NOT NULL,
        `account` INTEGER NOT NULL,
        `index` INTEGER NOT NULL
    )
    ",
    "
    CREATE INDEX IF NOT EXISTS `address_account` ON `addresses` (`account`, `index`)
    ",
    "
    CREATE TABLE IF NOT EXISTS `lock_times` (
        `txid` BLOB NOT NULL,
        `oidx` INTEGER NOT NULL,
        `options` TEXT NOT NULL,
        PRIMARY KEY (`txid`, `oidx`)
    )
    ",
    "
    CREATE TABLE IF NOT EXISTS `raw_transactions` (
        `txid` BLOB PRIMARY KEY NOT NULL,
        `raw` BLOB NOT NULL,
        `status` TEXT NOT NULL,
        `height` INTEGER
    )
    ",
];

/// Settings used while connecting to a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteStoreOptions {
    /// The database URL, such as `sqlite://wallet.db` or `sqlite::memory:`.
    pub url: String,

    /// The maximum number of pooled connections.
    ///
    /// In-memory databases are private to each connection, so they need exactly one.
    pub max_connections: u32,
}

impl Default for SqliteStoreOptions {
    fn default() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// A store that uses SQLite as a backend, with one table per kind of record.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connects to the database, creating it and its tables if needed.
    pub async fn connect(options: &SqliteStoreOptions) -> Result<Self, StoreError> {
        let connect_options =
            SqliteConnectOptions::from_str(&options.url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_options)
            .await?;

        Self::from_pool(pool).await
    }

    /// Opens a fresh in-memory database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::connect(&SqliteStoreOptions::default()).await
    }

    /// Wraps an existing pool, creating the tables if needed.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await?;
        }

        debug!("sqlite store schema is ready");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn txid_from_row(row: &SqliteRow) -> Result<Txid, StoreError> {
    let bytes: Vec<u8> = row.try_get("txid")?;
    Ok(Txid::try_from(bytes.as_slice())?)
}

fn raw_tx_from_row(row: &SqliteRow) -> Result<RawTxRecord, StoreError> {
    let status: String = row.try_get("status")?;
    let height: Option<u32> = row.try_get("height")?;

    Ok(RawTxRecord {
        txid: txid_from_row(row)?,
        raw: row.try_get("raw")?,
        status: TxStatus::from_parts(&status, height)?,
    })
}

fn address_from_row(row: &SqliteRow) -> Result<AddressRecord, StoreError> {
    Ok(AddressRecord {
        address: row.try_get("address")?,
        account: row.try_get("account")?,
        index: row.try_get("index")?,
    })
}

impl ConfigStore for SqliteStore {
    async fn config(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let Some(row) = sqlx::query("SELECT `value` FROM `config` WHERE `key` = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let value: String = row.try_get("value")?;
        Ok(Some(serde_json::from_str(&value)?))
    }

    async fn set_config(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let value = serde_json::to_string(&value)?;

        sqlx::query("REPLACE INTO `config` (`key`, `value`) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn remove_config(&self, key: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM `config` WHERE `key` = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl AddressStore for SqliteStore {
    async fn add_address(&self, record: AddressRecord) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "
            INSERT OR IGNORE INTO `addresses` (`address`, `account`, `index`)
            VALUES (?, ?, ?)
            ",
        )
        .bind(record.address)
        .bind(record.account)
        .bind(record.index)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn addresses(&self, account: u32) -> Result<Vec<AddressRecord>, StoreError> {
        sqlx::query(
            "
            SELECT `address`, `account`, `index` FROM `addresses`
            WHERE `account` = ?
            ORDER BY `index` ASC
            ",
        )
        .bind(account)
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(address_from_row)
        .collect()
    }

    async fn all_addresses(&self) -> Result<Vec<AddressRecord>, StoreError> {
        sqlx::query(
            "
            SELECT `address`, `account`, `index` FROM `addresses`
            ORDER BY `rowid` ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(address_from_row)
        .collect()
    }
}

impl LockTimeStore for SqliteStore {
    async fn set_lock_time(
        &self,
        coin_id: CoinId,
        options: FreezeOptions,
    ) -> Result<(), StoreError> {
        let options = serde_json::to_string(&options)?;

        // An upsert keeps the rowid, so the original ordering is preserved.
        sqlx::query(
            "
            INSERT INTO `lock_times` (`txid`, `oidx`, `options`) VALUES (?, ?, ?)
            ON CONFLICT (`txid`, `oidx`) DO UPDATE SET `options` = excluded.`options`
            ",
        )
        .bind(coin_id.txid.as_ref())
        .bind(coin_id.oidx)
        .bind(options)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn lock_time(&self, coin_id: CoinId) -> Result<Option<FreezeOptions>, StoreError> {
        let Some(row) =
            sqlx::query("SELECT `options` FROM `lock_times` WHERE `txid` = ? AND `oidx` = ?")
                .bind(coin_id.txid.as_ref())
                .bind(coin_id.oidx)
                .fetch_optional(&self.pool)
                .await?
        else {
            return Ok(None);
        };

        let options: String = row.try_get("options")?;
        Ok(Some(serde_json::from_str(&options)?))
    }

    async fn remove_lock_time(&self, coin_id: CoinId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM `lock_times` WHERE `txid` = ? AND `oidx` = ?")
            .bind(coin_id.txid.as_ref())
            .bind(coin_id.oidx)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn lock_times(&self) -> Result<Vec<(CoinId, FreezeOptions)>, StoreError> {
        let rows = sqlx::query(
            "
            SELECT `txid`, `oidx`, `options` FROM `lock_times`
            ORDER BY `rowid` ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<(CoinId, FreezeOptions), StoreError> {
                let options: String = row.try_get("options")?;
                let coin_id = CoinId::new(txid_from_row(row)?, row.try_get("oidx")?);
                Ok((coin_id, serde_json::from_str(&options)?))
            })
            .collect()
    }
}

impl RawTxStore for SqliteStore {
    async fn add_raw_tx(&self, record: RawTxRecord) -> Result<(), StoreError> {
        sqlx::query(
            "
            INSERT INTO `raw_transactions` (`txid`, `raw`, `status`, `height`)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (`txid`) DO UPDATE SET
                `raw` = excluded.`raw`,
                `status` = excluded.`status`,
                `height` = excluded.`height`
            ",
        )
        .bind(record.txid.as_ref())
        .bind(record.raw.as_slice())
        .bind(record.status.name())
        .bind(record.status.height())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn raw_tx(&self, txid: Txid) -> Result<Option<RawTxRecord>, StoreError> {
        sqlx::query(
            "
            SELECT `txid`, `raw`, `status`, `height` FROM `raw_transactions`
            WHERE `txid` = ?
            ",
        )
        .bind(txid.as_ref())
        .fetch_optional(&self.pool)
        .await?
        .as_ref()
        .map(raw_tx_from_row)
        .transpose()
    }

    async fn set_tx_status(&self, txid: Txid, status: TxStatus) -> Result<(), StoreError> {
        let result = sqlx::query(
            "
            UPDATE `raw_transactions` SET `status` = ?, `height` = ?
            WHERE `txid` = ?
            ",
        )
        .bind(status.name())
        .bind(status.height())
        .bind(txid.as_ref())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn raw_txs(&self) -> Result<Vec<RawTxRecord>, StoreError> {
        sqlx::query(
            "
            SELECT `txid`, `raw`, `status`, `height` FROM `raw_transactions`
            ORDER BY `rowid` ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(raw_tx_from_row)
        .collect()
    }
}
