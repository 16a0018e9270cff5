//! Client queries — Redis implementation.

use crate::client::{RedisPool, StoreError, StoreResult};
use crate::keys::KeySpace;
use crate::queries::{parse_rows, projects::ProjectRow};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Cascade attempts before giving up on a client whose projects keep changing.
const CASCADE_ATTEMPTS: usize = 8;

/// KEYS: client, clients zset, seq. ARGV: id, document, name.
/// Returns 0 when the id is taken.
static CREATE_CLIENT: LazyLock<redis::Script> = LazyLock::new(|| {
    redis::Script::new(
        r"
if redis.call('EXISTS', KEYS[1]) == 1 then
  return 0
end
local seq = redis.call('INCR', KEYS[3])
redis.call('HSET', KEYS[1], 'data', ARGV[2], 'name', ARGV[3])
redis.call('ZADD', KEYS[2], seq, ARGV[1])
return 1
",
    )
});

/// Removes a client and every project in its index in one atomic step.
///
/// KEYS: client, client's project index, clients zset, projects zset, then
/// one key per owned project. ARGV: client id, then the owned project ids.
///
/// Reply is nil when the index no longer matches the ids passed in, empty
/// when the client does not exist, otherwise the client document followed
/// by the documents of the removed projects.
static DELETE_CLIENT_CASCADE: LazyLock<redis::Script> = LazyLock::new(|| {
    redis::Script::new(
        r"
local data = redis.call('HGET', KEYS[1], 'data')
if not data then
  return {}
end
if redis.call('ZCARD', KEYS[2]) ~= #ARGV - 1 then
  return false
end
for i = 2, #ARGV do
  if not redis.call('ZSCORE', KEYS[2], ARGV[i]) then
    return false
  end
end
local out = { data }
for i = 2, #ARGV do
  local pkey = KEYS[i + 3]
  local pdata = redis.call('HGET', pkey, 'data')
  if pdata then
    table.insert(out, pdata)
  end
  redis.call('DEL', pkey)
  redis.call('ZREM', KEYS[4], ARGV[i])
end
redis.call('DEL', KEYS[2], KEYS[1])
redis.call('ZREM', KEYS[3], ARGV[1])
return out
",
    )
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: String,
}

impl ClientRow {
    /// Build a new row stamped with the current time.
    pub fn new(id: &str, name: &str, email: &str, phone: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// A client removed together with the projects it owned.
#[derive(Debug, Clone)]
pub struct DeletedClient {
    pub client: ClientRow,
    pub projects: Vec<ProjectRow>,
}

pub async fn create_client(
    pool: &RedisPool,
    keys: &KeySpace,
    row: &ClientRow,
) -> StoreResult<()> {
    let mut conn = pool.clone();
    let json = serde_json::to_string(row)?;
    let created: i64 = CREATE_CLIENT
        .key(keys.client(&row.id))
        .key(keys.clients())
        .key(keys.seq())
        .arg(&row.id)
        .arg(json)
        .arg(&row.name)
        .invoke_async(&mut conn)
        .await?;
    if created == 0 {
        return Err(StoreError::OperationFailed(format!(
            "Duplicate client id: {}",
            row.id
        )));
    }
    Ok(())
}

pub async fn get_client(
    pool: &RedisPool,
    keys: &KeySpace,
    id: &str,
) -> StoreResult<Option<ClientRow>> {
    let mut conn = pool.clone();
    let json: Option<String> = conn.hget(keys.client(id), "data").await?;
    match json {
        Some(j) => Ok(Some(serde_json::from_str(&j)?)),
        None => Ok(None),
    }
}

/// Fetch several clients in one round trip. Missing ids are skipped.
pub async fn get_clients(
    pool: &RedisPool,
    keys: &KeySpace,
    ids: &[String],
) -> StoreResult<Vec<ClientRow>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut conn = pool.clone();
    let mut pipe = redis::pipe();
    for id in ids {
        pipe.hget(keys.client(id), "data");
    }
    let values: Vec<Option<String>> = pipe.query_async(&mut conn).await?;
    Ok(parse_rows(values))
}

pub async fn list_clients(pool: &RedisPool, keys: &KeySpace) -> StoreResult<Vec<ClientRow>> {
    let mut conn = pool.clone();
    let ids: Vec<String> = conn.zrange(keys.clients(), 0, -1).await?;
    get_clients(pool, keys, &ids).await
}

/// Delete a client and its projects.
///
/// The owned project ids are read first so the script can declare every key
/// it touches. The script refuses to run if the index changed in between,
/// and the read is retried.
pub async fn delete_client_cascade(
    pool: &RedisPool,
    keys: &KeySpace,
    id: &str,
) -> StoreResult<Option<DeletedClient>> {
    let mut conn = pool.clone();
    for attempt in 1..=CASCADE_ATTEMPTS {
        let owned: Vec<String> = conn.zrange(keys.client_projects(id), 0, -1).await?;

        let mut invocation = DELETE_CLIENT_CASCADE.prepare_invoke();
        invocation
            .key(keys.client(id))
            .key(keys.client_projects(id))
            .key(keys.clients())
            .key(keys.projects())
            .arg(id);
        for pid in &owned {
            invocation.key(keys.project(pid)).arg(pid);
        }

        let reply: Option<Vec<String>> = invocation.invoke_async(&mut conn).await?;
        let Some(reply) = reply else {
            tracing::debug!(client_id = %id, attempt, "Project index changed, retrying cascade");
            continue;
        };

        let mut docs = reply.into_iter();
        let Some(client_json) = docs.next() else {
            return Ok(None);
        };
        let client: ClientRow = serde_json::from_str(&client_json)?;
        let projects = parse_rows(docs.map(Some).collect());
        return Ok(Some(DeletedClient { client, projects }));
    }

    Err(StoreError::OperationFailed(format!(
        "Projects of client {} kept changing during delete",
        id
    )))
}
