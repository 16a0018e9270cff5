//! Project queries — Redis implementation.

use crate::client::{RedisPool, StoreError, StoreResult};
use crate::keys::KeySpace;
use crate::queries::parse_rows;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// KEYS: client, project, projects zset, client's project index, seq.
/// ARGV: id, document, status, client id.
/// Returns -1 when the client is missing and 0 when the id is taken.
static CREATE_PROJECT: LazyLock<redis::Script> = LazyLock::new(|| {
    redis::Script::new(
        r"
if redis.call('EXISTS', KEYS[1]) == 0 then
  return -1
end
if redis.call('EXISTS', KEYS[2]) == 1 then
  return 0
end
local seq = redis.call('INCR', KEYS[5])
redis.call('HSET', KEYS[2], 'data', ARGV[2], 'status', ARGV[3], 'client_id', ARGV[4])
redis.call('ZADD', KEYS[3], seq, ARGV[1])
redis.call('ZADD', KEYS[4], seq, ARGV[1])
return 1
",
    )
});

/// KEYS: project. ARGV: patch document, update time.
/// Merges the patch into the stored document; nil when the project is gone.
static PATCH_PROJECT: LazyLock<redis::Script> = LazyLock::new(|| {
    redis::Script::new(
        r"
local data = redis.call('HGET', KEYS[1], 'data')
if not data then
  return false
end
local doc = cjson.decode(data)
for field, value in pairs(cjson.decode(ARGV[1])) do
  doc[field] = value
end
doc['updated_at'] = ARGV[2]
local out = cjson.encode(doc)
redis.call('HSET', KEYS[1], 'data', out, 'status', doc['status'])
return out
",
    )
});

/// KEYS: project, projects zset, owning client's project index. ARGV: id.
static DELETE_PROJECT: LazyLock<redis::Script> = LazyLock::new(|| {
    redis::Script::new(
        r"
local data = redis.call('HGET', KEYS[1], 'data')
if not data then
  return false
end
redis.call('DEL', KEYS[1])
redis.call('ZREM', KEYS[2], ARGV[1])
redis.call('ZREM', KEYS[3], ARGV[1])
return data
",
    )
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRow {
    pub id: String,
    pub client_id: String,
    pub name: String,
    pub description: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl ProjectRow {
    /// Build a new row stamped with the current time.
    pub fn new(
        id: &str,
        client_id: &str,
        name: &str,
        description: &str,
        status: &str,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: id.to_string(),
            client_id: client_id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            status: status.to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Fields to change on a stored project. `None` leaves a field as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.status.is_none()
    }

    /// Apply to a row in place, stamping `updated_at`.
    pub fn apply(&self, row: &mut ProjectRow, updated_at: &str) {
        if let Some(name) = &self.name {
            row.name = name.clone();
        }
        if let Some(description) = &self.description {
            row.description = description.clone();
        }
        if let Some(status) = &self.status {
            row.status = status.clone();
        }
        row.updated_at = updated_at.to_string();
    }
}

pub async fn create_project(
    pool: &RedisPool,
    keys: &KeySpace,
    row: &ProjectRow,
) -> StoreResult<()> {
    let mut conn = pool.clone();
    let json = serde_json::to_string(row)?;
    let created: i64 = CREATE_PROJECT
        .key(keys.client(&row.client_id))
        .key(keys.project(&row.id))
        .key(keys.projects())
        .key(keys.client_projects(&row.client_id))
        .key(keys.seq())
        .arg(&row.id)
        .arg(json)
        .arg(&row.status)
        .arg(&row.client_id)
        .invoke_async(&mut conn)
        .await?;
    match created {
        -1 => Err(StoreError::MissingReference(format!(
            "Client does not exist: {}",
            row.client_id
        ))),
        0 => Err(StoreError::OperationFailed(format!(
            "Duplicate project id: {}",
            row.id
        ))),
        _ => Ok(()),
    }
}

pub async fn get_project(
    pool: &RedisPool,
    keys: &KeySpace,
    id: &str,
) -> StoreResult<Option<ProjectRow>> {
    let mut conn = pool.clone();
    let json: Option<String> = conn.hget(keys.project(id), "data").await?;
    match json {
        Some(j) => Ok(Some(serde_json::from_str(&j)?)),
        None => Ok(None),
    }
}

async fn get_projects(
    pool: &RedisPool,
    keys: &KeySpace,
    ids: &[String],
) -> StoreResult<Vec<ProjectRow>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut conn = pool.clone();
    let mut pipe = redis::pipe();
    for id in ids {
        pipe.hget(keys.project(id), "data");
    }
    let values: Vec<Option<String>> = pipe.query_async(&mut conn).await?;
    Ok(parse_rows(values))
}

pub async fn list_projects(pool: &RedisPool, keys: &KeySpace) -> StoreResult<Vec<ProjectRow>> {
    let mut conn = pool.clone();
    let ids: Vec<String> = conn.zrange(keys.projects(), 0, -1).await?;
    get_projects(pool, keys, &ids).await
}

pub async fn list_projects_by_client(
    pool: &RedisPool,
    keys: &KeySpace,
    client_id: &str,
) -> StoreResult<Vec<ProjectRow>> {
    let mut conn = pool.clone();
    let ids: Vec<String> = conn.zrange(keys.client_projects(client_id), 0, -1).await?;
    get_projects(pool, keys, &ids).await
}

/// Merge `patch` into the stored project inside Redis.
///
/// # Errors
///
/// `StoreError::NotFound` if the project does not exist.
pub async fn update_project(
    pool: &RedisPool,
    keys: &KeySpace,
    id: &str,
    patch: &ProjectPatch,
) -> StoreResult<ProjectRow> {
    let mut conn = pool.clone();
    let json: Option<String> = PATCH_PROJECT
        .key(keys.project(id))
        .arg(serde_json::to_string(patch)?)
        .arg(chrono::Utc::now().to_rfc3339())
        .invoke_async(&mut conn)
        .await?;
    match json {
        Some(j) => Ok(serde_json::from_str(&j)?),
        None => Err(StoreError::NotFound(format!("Project not found: {}", id))),
    }
}

pub async fn delete_project(
    pool: &RedisPool,
    keys: &KeySpace,
    id: &str,
) -> StoreResult<Option<ProjectRow>> {
    let mut conn = pool.clone();
    // The owner never changes, so reading it ahead of the script is safe.
    let client_id: Option<String> = conn.hget(keys.project(id), "client_id").await?;
    let Some(client_id) = client_id else {
        return Ok(None);
    };

    let json: Option<String> = DELETE_PROJECT
        .key(keys.project(id))
        .key(keys.projects())
        .key(keys.client_projects(&client_id))
        .arg(id)
        .invoke_async(&mut conn)
        .await?;
    match json {
        Some(j) => Ok(Some(serde_json::from_str(&j)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_serializes_supplied_fields_only() {
        let patch = ProjectPatch {
            status: Some("completed".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"status":"completed"}"#);
        assert!(!patch.is_empty());
        assert!(ProjectPatch::default().is_empty());
    }

    #[test]
    fn test_patch_apply_keeps_other_fields() {
        let mut row = ProjectRow::new("p1", "c1", "Engine", "Analytical", "archived");
        let patch = ProjectPatch {
            name: Some("Difference Engine".to_string()),
            ..Default::default()
        };
        patch.apply(&mut row, "2030-01-01T00:00:00+00:00");
        assert_eq!(row.name, "Difference Engine");
        assert_eq!(row.description, "Analytical");
        assert_eq!(row.status, "archived");
        assert_eq!(row.updated_at, "2030-01-01T00:00:00+00:00");
    }
}
