//! User and watchlist storage
//!
//! SQLite-backed store for accounts and per-account watchlists. Passwords
//! are stored as salted SHA-256 digests ("salt$hash", both hex).

use std::path::Path;

use parking_lot::Mutex;
use rand::Rng;
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Username already taken")]
    UsernameTaken,
}

/// A stored account row
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub is_premium: bool,
}

/// SQLite-backed account + watchlist store
pub struct UserStore {
    conn: Mutex<Connection>,
}

impl UserStore {
    /// Open (or create) the store at the given path
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.as_ref().parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let conn = Connection::open(db_path.as_ref())?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL,
                is_premium BOOLEAN NOT NULL DEFAULT FALSE
            );

            CREATE TABLE IF NOT EXISTS watchlist (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                ticker TEXT NOT NULL,
                added_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                UNIQUE(user_id, ticker)
            );
            "#,
        )?;

        info!("Initialized user store at: {}", db_path.as_ref().display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an account; fails with [`StoreError::UsernameTaken`] when the
    /// username exists
    pub fn create_user(&self, username: &str, password: &str) -> Result<UserRecord, StoreError> {
        let digest = hash_password(password);
        let conn = self.conn.lock();

        let inserted = conn.execute(
            "INSERT OR IGNORE INTO users (username, password) VALUES (?1, ?2)",
            params![username, digest],
        )?;
        if inserted == 0 {
            return Err(StoreError::UsernameTaken);
        }

        let id = conn.last_insert_rowid();
        Ok(UserRecord {
            id,
            username: username.to_string(),
            is_premium: false,
        })
    }

    /// Check credentials; `None` covers both unknown user and bad password
    pub fn verify_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let conn = self.conn.lock();

        let row: Option<(i64, String, bool)> = conn
            .query_row(
                "SELECT id, password, is_premium FROM users WHERE username = ?1",
                params![username],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        Ok(row.and_then(|(id, stored, is_premium)| {
            if verify_password(password, &stored) {
                Some(UserRecord {
                    id,
                    username: username.to_string(),
                    is_premium,
                })
            } else {
                None
            }
        }))
    }

    /// Flip the premium flag (mock checkout)
    pub fn set_premium(&self, user_id: i64, is_premium: bool) -> Result<(), StoreError> {
        self.conn.lock().execute(
            "UPDATE users SET is_premium = ?1 WHERE id = ?2",
            params![is_premium, user_id],
        )?;
        Ok(())
    }

    /// All watchlist tickers for an account, oldest first
    pub fn watchlist(&self, user_id: i64) -> Result<Vec<String>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt =
            conn.prepare("SELECT ticker FROM watchlist WHERE user_id = ?1 ORDER BY id")?;
        let tickers = stmt
            .query_map(params![user_id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tickers)
    }

    /// Add a ticker; returns false when it was already present
    pub fn add_ticker(&self, user_id: i64, ticker: &str) -> Result<bool, StoreError> {
        let inserted = self.conn.lock().execute(
            "INSERT OR IGNORE INTO watchlist (user_id, ticker) VALUES (?1, ?2)",
            params![user_id, ticker],
        )?;
        Ok(inserted > 0)
    }

    /// Remove a ticker; removing an absent ticker is not an error
    pub fn remove_ticker(&self, user_id: i64, ticker: &str) -> Result<(), StoreError> {
        self.conn.lock().execute(
            "DELETE FROM watchlist WHERE user_id = ?1 AND ticker = ?2",
            params![user_id, ticker],
        )?;
        Ok(())
    }
}

fn hash_password(password: &str) -> String {
    let salt: [u8; 16] = rand::rng().random();
    let salt_hex = hex::encode(salt);
    format!("{}${}", salt_hex, digest_with_salt(&salt_hex, password))
}

fn verify_password(password: &str, stored: &str) -> bool {
    match stored.split_once('$') {
        Some((salt_hex, hash)) => digest_with_salt(salt_hex, password) == hash,
        None => false,
    }
}

fn digest_with_salt(salt_hex: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, UserStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = UserStore::new(dir.path().join("users.db")).unwrap();
        (dir, store)
    }

    #[test]
    fn create_and_verify_user() {
        let (_dir, store) = temp_store();
        let user = store.create_user("kees", "letmein12").unwrap();
        assert!(!user.is_premium);

        let verified = store.verify_login("kees", "letmein12").unwrap().unwrap();
        assert_eq!(verified.id, user.id);

        assert!(store.verify_login("kees", "wrong").unwrap().is_none());
        assert!(store.verify_login("nobody", "letmein12").unwrap().is_none());
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let (_dir, store) = temp_store();
        store.create_user("kees", "letmein12").unwrap();
        assert!(matches!(
            store.create_user("kees", "other-pass"),
            Err(StoreError::UsernameTaken)
        ));
    }

    #[test]
    fn password_digests_are_salted() {
        let (_dir, store) = temp_store();
        store.create_user("a", "same-password").unwrap();
        store.create_user("b", "same-password").unwrap();

        let conn = store.conn.lock();
        let mut stmt = conn.prepare("SELECT password FROM users ORDER BY id").unwrap();
        let digests: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_ne!(digests[0], digests[1]);
    }

    #[test]
    fn watchlist_crud_deduplicates() {
        let (_dir, store) = temp_store();
        let user = store.create_user("kees", "letmein12").unwrap();

        assert!(store.add_ticker(user.id, "ASML").unwrap());
        assert!(store.add_ticker(user.id, "TSLA").unwrap());
        assert!(!store.add_ticker(user.id, "ASML").unwrap());

        assert_eq!(store.watchlist(user.id).unwrap(), vec!["ASML", "TSLA"]);

        store.remove_ticker(user.id, "ASML").unwrap();
        assert_eq!(store.watchlist(user.id).unwrap(), vec!["TSLA"]);
    }

    #[test]
    fn premium_flag_round_trips() {
        let (_dir, store) = temp_store();
        let user = store.create_user("kees", "letmein12").unwrap();
        store.set_premium(user.id, true).unwrap();

        let verified = store.verify_login("kees", "letmein12").unwrap().unwrap();
        assert!(verified.is_premium);
    }
}
