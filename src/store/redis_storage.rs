//! Redis storage backend.
//!
//! Maps the [`DocumentStore`] operations onto Redis commands: `HSET` /
//! `JSON.SET` inside a single pipeline for batched writes, and the
//! RediSearch module commands (`FT.CREATE`, `FT.INFO`, `FT.DROPINDEX`) for
//! the index lifecycle. Module commands are issued through `redis::cmd`
//! since the client has no typed API for them.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;

use crate::document::{Encoding, FieldValue, Record, storage_key};
use crate::error::{Result, SearchBenchError};
use crate::schema::IndexDefinition;
use crate::store::{DocumentStore, IndexStatus, StoreFactory};

/// A store handle backed by one multiplexed Redis connection.
pub struct RedisStore {
    conn: MultiplexedConnection,
}

impl RedisStore {
    /// Connect to a Redis URL (e.g. `redis://localhost:6379`) and verify the
    /// server responds before handing the connection out.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let mut conn = client.get_multiplexed_async_connection().await?;

        // Ping to verify connection
        redis::cmd("PING").query_async::<String>(&mut conn).await?;

        Ok(RedisStore { conn })
    }
}

#[async_trait]
impl DocumentStore for RedisStore {
    async fn clear_all(&mut self) -> Result<()> {
        redis::cmd("FLUSHDB")
            .query_async::<()>(&mut self.conn)
            .await?;
        Ok(())
    }

    async fn write_batch(&mut self, encoding: Encoding, records: &[Record]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut pipe = redis::pipe();
        for record in records {
            match encoding {
                Encoding::Hash => {
                    let cmd = pipe.cmd("HSET").arg(record.storage_key());
                    for (name, value) in record.fields() {
                        match value {
                            FieldValue::Text(s) => cmd.arg(name).arg(s),
                            FieldValue::Integer(i) => cmd.arg(name).arg(*i),
                        };
                    }
                    cmd.ignore();
                }
                Encoding::Json => {
                    pipe.cmd("JSON.SET")
                        .arg(record.storage_key())
                        .arg("$")
                        .arg(serde_json::to_string(&record.to_json())?)
                        .ignore();
                }
            }
        }

        pipe.query_async::<()>(&mut self.conn).await?;
        Ok(())
    }

    async fn create_index(&mut self, name: &str, definition: &IndexDefinition) -> Result<()> {
        let mut cmd = redis::cmd("FT.CREATE");
        cmd.arg(name)
            .arg("ON")
            .arg(match definition.encoding {
                Encoding::Hash => "HASH",
                Encoding::Json => "JSON",
            })
            .arg("PREFIX")
            .arg(1)
            .arg(&definition.prefix)
            .arg("SCHEMA");

        for field in &definition.fields {
            cmd.arg(&field.path)
                .arg("AS")
                .arg(&field.alias)
                .arg(field.kind.type_name());
            if field.sortable {
                cmd.arg("SORTABLE");
            }
        }

        cmd.query_async::<()>(&mut self.conn).await?;
        Ok(())
    }

    async fn index_status(&mut self, name: &str) -> Result<IndexStatus> {
        let reply: redis::Value = redis::cmd("FT.INFO")
            .arg(name)
            .query_async(&mut self.conn)
            .await?;
        status_from_info(reply)
    }

    async fn drop_index(&mut self, name: &str) -> Result<()> {
        redis::cmd("FT.DROPINDEX")
            .arg(name)
            .query_async::<()>(&mut self.conn)
            .await?;
        Ok(())
    }

    async fn memory_usage(&mut self, key: u64) -> Result<Option<u64>> {
        let bytes: Option<u64> = redis::cmd("MEMORY")
            .arg("USAGE")
            .arg(storage_key(key))
            .query_async(&mut self.conn)
            .await?;
        Ok(bytes)
    }
}

/// Opens one [`RedisStore`] per call from a connection URL.
#[derive(Debug, Clone)]
pub struct RedisFactory {
    url: String,
}

impl RedisFactory {
    pub fn new<S: Into<String>>(url: S) -> Self {
        RedisFactory { url: url.into() }
    }
}

#[async_trait]
impl StoreFactory for RedisFactory {
    async fn open(&self) -> Result<Box<dyn DocumentStore>> {
        Ok(Box::new(RedisStore::connect(&self.url).await?))
    }
}

/// Decode an `FT.INFO` reply into an [`IndexStatus`].
///
/// The reply shape differs between protocol versions: RESP2 returns a flat
/// array of alternating names and values, RESP3 a map. Numeric values may
/// arrive as integers, doubles, or strings. Size components absent from the
/// reply default to zero; a missing `percent_indexed` is a store error.
fn status_from_info(reply: redis::Value) -> Result<IndexStatus> {
    let fields = numeric_info_fields(reply)?;

    let percent_indexed = fields
        .get("percent_indexed")
        .copied()
        .ok_or_else(|| SearchBenchError::store("index info reply missing percent_indexed"))?;

    let size = |name: &str| fields.get(name).copied().unwrap_or(0.0);

    Ok(IndexStatus {
        percent_indexed,
        inverted_sz_mb: size("inverted_sz_mb"),
        vector_index_sz_mb: size("vector_index_sz_mb"),
        offset_vectors_sz_mb: size("offset_vectors_sz_mb"),
        doc_table_size_mb: size("doc_table_size_mb"),
        sortable_values_size_mb: size("sortable_values_size_mb"),
        key_table_size_mb: size("key_table_size_mb"),
    })
}

fn numeric_info_fields(reply: redis::Value) -> Result<HashMap<String, f64>> {
    let mut fields = HashMap::new();

    match reply {
        redis::Value::Map(entries) => {
            for (name, value) in &entries {
                if let (Some(name), Some(value)) = (scalar_string(name), scalar_f64(value)) {
                    fields.insert(name, value);
                }
            }
        }
        redis::Value::Array(items) => {
            for pair in items.chunks(2) {
                if let [name, value] = pair
                    && let (Some(name), Some(value)) = (scalar_string(name), scalar_f64(value))
                {
                    fields.insert(name, value);
                }
            }
        }
        other => {
            return Err(SearchBenchError::store(format!(
                "unexpected index info reply: {other:?}"
            )));
        }
    }

    Ok(fields)
}

fn scalar_string(value: &redis::Value) -> Option<String> {
    match value {
        redis::Value::BulkString(bytes) => String::from_utf8(bytes.clone()).ok(),
        redis::Value::SimpleString(s) => Some(s.clone()),
        _ => None,
    }
}

fn scalar_f64(value: &redis::Value) -> Option<f64> {
    match value {
        redis::Value::Int(i) => Some(*i as f64),
        redis::Value::Double(d) => Some(*d),
        redis::Value::BulkString(bytes) => std::str::from_utf8(bytes).ok()?.parse().ok(),
        redis::Value::SimpleString(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulk(s: &str) -> redis::Value {
        redis::Value::BulkString(s.as_bytes().to_vec())
    }

    #[test]
    fn test_status_from_array_reply() {
        let reply = redis::Value::Array(vec![
            bulk("index_name"),
            bulk("idx"),
            bulk("percent_indexed"),
            bulk("0.5"),
            bulk("inverted_sz_mb"),
            bulk("1.5"),
            bulk("doc_table_size_mb"),
            redis::Value::Double(0.25),
            bulk("key_table_size_mb"),
            redis::Value::Int(2),
        ]);

        let status = status_from_info(reply).unwrap();
        assert_eq!(status.percent_indexed, 0.5);
        assert_eq!(status.inverted_sz_mb, 1.5);
        assert_eq!(status.doc_table_size_mb, 0.25);
        assert_eq!(status.key_table_size_mb, 2.0);
        // Components not present in the reply default to zero.
        assert_eq!(status.vector_index_sz_mb, 0.0);
        assert!(!status.is_complete());
    }

    #[test]
    fn test_status_from_map_reply() {
        let reply = redis::Value::Map(vec![
            (bulk("percent_indexed"), redis::Value::Double(1.0)),
            (bulk("inverted_sz_mb"), bulk("0.02")),
        ]);

        let status = status_from_info(reply).unwrap();
        assert!(status.is_complete());
        assert_eq!(status.inverted_sz_mb, 0.02);
    }

    #[test]
    fn test_status_requires_percent_indexed() {
        let reply = redis::Value::Array(vec![bulk("inverted_sz_mb"), bulk("1.0")]);
        assert!(status_from_info(reply).is_err());
    }

    #[test]
    fn test_status_rejects_non_aggregate_reply() {
        assert!(status_from_info(redis::Value::Int(1)).is_err());
    }
}
