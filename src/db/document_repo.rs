use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};

use super::store::{Collection, DocumentStore};

/// SQLite-baserat dokumentlager
pub struct DocumentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DocumentRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("Databaslåset är förgiftat"))
    }

    /// Räkna dokument i en samling
    pub fn count(&self, collection: Collection) -> Result<i64> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?",
            [collection.as_str()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn parse_body(collection: Collection, id: &str, body: &str) -> Result<Value> {
        serde_json::from_str(body)
            .with_context(|| format!("Ogiltigt dokument {}/{}", collection, id))
    }
}

impl DocumentStore for DocumentRepository {
    fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>> {
        let conn = self.lock()?;
        let body: Option<String> = conn
            .query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection.as_str(), id],
                |row| row.get(0),
            )
            .optional()?;

        body.map(|b| Self::parse_body(collection, id, &b)).transpose()
    }

    fn get_all(&self, collection: Collection) -> Result<Vec<(String, Value)>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, body FROM documents WHERE collection = ? ORDER BY id",
        )?;

        let rows = stmt
            .query_map([collection.as_str()], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(id, body)| {
                let value = Self::parse_body(collection, &id, &body)?;
                Ok((id, value))
            })
            .collect()
    }

    fn put(&self, collection: Collection, id: &str, document: &Value) -> Result<()> {
        let body = serde_json::to_string(document)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)
             ON CONFLICT (collection, id) DO UPDATE SET body = excluded.body, updated_at = datetime('now')",
            params![collection.as_str(), id, body],
        )?;
        Ok(())
    }

    fn put_batch(&self, collection: Collection, documents: &[(String, Value)]) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)
                 ON CONFLICT (collection, id) DO UPDATE SET body = excluded.body, updated_at = datetime('now')",
            )?;
            for (id, document) in documents {
                let body = serde_json::to_string(document)?;
                stmt.execute(params![collection.as_str(), id, body])?;
            }
        }
        tx.commit().context("Kunde inte spara batch")?;
        Ok(())
    }

    fn delete(&self, collection: Collection, id: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection.as_str(), id],
        )?;
        Ok(())
    }
}
