//! Sample flow against the user API: log in, read a user, update that user.
//!
//! The token from the first call feeds the other two and the id from the
//! second call feeds the third. Any step whose envelope is not `"OK"` stops
//! the flow with an error naming that step.

use std::fmt;

use serde_json::Value;
use thiserror::Error;
use user_api_core::{
    is_status_ok, ApiClient, ApiError, Envelope, Permission, Transport, UserUpdate, DEFAULT_HOST,
    DEFAULT_PORT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Authentication,
    UserRetrieval,
    UserUpdate,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Authentication => "authentication",
            Step::UserRetrieval => "user retrieval",
            Step::UserUpdate => "user update",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The request went through but the envelope's status was not `"OK"`.
    #[error("{0} failed: server reported status {1}")]
    Rejected(Step, String),

    #[error("{0} failed: {1}")]
    Request(Step, #[source] ApiError),

    #[error("{0} failed: response has no usable `{1}` field")]
    MissingField(Step, &'static str),
}

impl ScenarioError {
    pub fn step(&self) -> Step {
        match self {
            ScenarioError::Rejected(step, _)
            | ScenarioError::Request(step, _)
            | ScenarioError::MissingField(step, _) => *step,
        }
    }
}

/// Inputs of the flow. `Default` is the documented example: `test`/`12345`
/// logs in, `ivanov` is read and renamed to "Petr Petrovich".
#[derive(Debug, Clone)]
pub struct Scenario {
    pub login: String,
    pub password: String,
    pub username: String,
    pub update: UserUpdate,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            login: "test".to_string(),
            password: "12345".to_string(),
            username: "ivanov".to_string(),
            update: UserUpdate::new()
                .active("1")
                .blocked(true)
                .name("Petr Petrovich")
                .permissions(vec![Permission::new(1, "comment")]),
        }
    }
}

/// What each step handed to the next.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub token: String,
    pub user_id: String,
    pub update: Envelope,
}

pub async fn run_scenario<T: Transport>(
    client: &ApiClient<T>,
    scenario: &Scenario,
) -> Result<ScenarioReport, ScenarioError> {
    let response = client
        .authenticate(&scenario.login, &scenario.password)
        .await
        .map_err(|e| ScenarioError::Request(Step::Authentication, e))?;
    ensure_ok(Step::Authentication, &response)?;
    let token = response
        .get("token")
        .and_then(Value::as_str)
        .ok_or(ScenarioError::MissingField(Step::Authentication, "token"))?
        .to_string();
    tracing::info!(login = %scenario.login, "authenticated");

    let response = client
        .get_user(&scenario.username, &token)
        .await
        .map_err(|e| ScenarioError::Request(Step::UserRetrieval, e))?;
    ensure_ok(Step::UserRetrieval, &response)?;
    let user_id = response
        .get("id")
        .and_then(path_segment)
        .ok_or(ScenarioError::MissingField(Step::UserRetrieval, "id"))?;
    tracing::info!(username = %scenario.username, %user_id, "fetched user");

    let update = client
        .update_user(&user_id, &token, &scenario.update)
        .await
        .map_err(|e| ScenarioError::Request(Step::UserUpdate, e))?;
    ensure_ok(Step::UserUpdate, &update)?;
    tracing::info!(%user_id, "updated user");

    Ok(ScenarioReport {
        token,
        user_id,
        update,
    })
}

fn ensure_ok(step: Step, response: &Envelope) -> Result<(), ScenarioError> {
    if is_status_ok(response) {
        return Ok(());
    }
    let status = match response.get("status") {
        Some(Value::String(status)) => status.clone(),
        Some(other) => other.to_string(),
        None => "<missing>".to_string(),
    };
    Err(ScenarioError::Rejected(step, status))
}

/// Ids arrive as JSON numbers; strings are accepted too.
fn path_segment(id: &Value) -> Option<String> {
    match id {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Where the demo binary sends its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: String,
}

impl Config {
    /// Read `API_HOST` and `API_PORT`, falling back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: lookup("API_PORT").unwrap_or_else(|| DEFAULT_PORT.to_string()),
        }
    }
}
