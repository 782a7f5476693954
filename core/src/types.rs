//! Payload types for the user API.
//!
//! # Design
//! Responses are handed back as an untyped [`Envelope`]: the client relays
//! whatever the server sends and never checks field semantics. The update
//! body is the one place where a typed shape helps callers, so it gets an
//! explicit struct with one optional field per documented key plus an open
//! `extra` map for anything the server adds later.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A decoded JSON response object: `status` plus operation-specific fields.
pub type Envelope = Map<String, Value>;

/// One entry of a user's ordered permission list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: u64,
    pub permission: String,
}

impl Permission {
    pub fn new(id: u64, permission: impl Into<String>) -> Self {
        Self {
            id,
            permission: permission.into(),
        }
    }
}

/// Fields to change with `update_user`. Unset fields are left out of the
/// request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<Permission>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(mut self, active: impl Into<String>) -> Self {
        self.extra.remove("active");
        self.active = Some(active.into());
        self
    }

    pub fn blocked(mut self, blocked: bool) -> Self {
        self.extra.remove("blocked");
        self.blocked = Some(blocked);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.extra.remove("name");
        self.name = Some(name.into());
        self
    }

    pub fn permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.extra.remove("permissions");
        self.permissions = Some(permissions);
        self
    }

    /// Set a field by name. A documented key replaces its typed value, so
    /// each key appears once in the body.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        match key.as_str() {
            "active" => self.active = None,
            "blocked" => self.blocked = None,
            "name" => self.name = None,
            "permissions" => self.permissions = None,
            _ => {}
        }
        self.extra.insert(key, value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_none()
            && self.blocked.is_none()
            && self.name.is_none()
            && self.permissions.is_none()
            && self.extra.is_empty()
    }
}
