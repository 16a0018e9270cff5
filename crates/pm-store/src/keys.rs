//! Redis key layout.
//!
//! ```text
//! {ns}:seq                      string  creation counter shared by both listings
//! {ns}:client:{id}              hash    data, name
//! {ns}:clients                  zset    client ids scored by creation sequence
//! {ns}:client:{id}:projects     zset    ids of projects owned by the client
//! {ns}:project:{id}             hash    data, status, client_id
//! {ns}:projects                 zset    project ids scored by creation sequence
//! ```
//!
//! The namespace is wrapped in braces as a hash tag, so every key of one
//! namespace maps to the same cluster slot and the scripts may touch them
//! together.

/// Default namespace for all keys.
pub const DEFAULT_NAMESPACE: &str = "pm";

/// Builds keys under a namespace.
#[derive(Debug, Clone)]
pub struct KeySpace {
    ns: String,
}

impl Default for KeySpace {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl KeySpace {
    pub fn new(ns: impl Into<String>) -> Self {
        Self { ns: ns.into() }
    }

    pub fn namespace(&self) -> &str {
        &self.ns
    }

    pub fn seq(&self) -> String {
        format!("{{{}}}:seq", self.ns)
    }

    pub fn client(&self, id: &str) -> String {
        format!("{{{}}}:client:{}", self.ns, id)
    }

    pub fn clients(&self) -> String {
        format!("{{{}}}:clients", self.ns)
    }

    pub fn client_projects(&self, client_id: &str) -> String {
        format!("{{{}}}:client:{}:projects", self.ns, client_id)
    }

    pub fn project(&self, id: &str) -> String {
        format!("{{{}}}:project:{}", self.ns, id)
    }

    pub fn projects(&self) -> String {
        format!("{{{}}}:projects", self.ns)
    }
}
