use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: u64,
    pub permission: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub active: String,
    pub blocked: bool,
    pub name: String,
    pub created_at: i64,
    pub permissions: Vec<Permission>,
}

#[derive(Deserialize)]
pub struct AuthQuery {
    pub login: String,
    pub pass: String,
}

#[derive(Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub active: Option<String>,
    pub blocked: Option<bool>,
    pub name: Option<String>,
    pub permissions: Option<Vec<Permission>>,
}

/// Credentials, issued tokens and users keyed by username.
#[derive(Debug, Default)]
pub struct Store {
    pub credentials: HashMap<String, String>,
    pub tokens: HashSet<String>,
    pub users: HashMap<String, User>,
}

impl Store {
    /// The fixture the demo scenario runs against: `test`/`12345` and `ivanov`.
    pub fn seeded() -> Self {
        let mut store = Self::default();
        store
            .credentials
            .insert("test".to_string(), "12345".to_string());
        store.users.insert(
            "ivanov".to_string(),
            User {
                id: 23,
                active: "1".to_string(),
                blocked: false,
                name: "Ivanov Ivan".to_string(),
                created_at: 1587457590,
                permissions: vec![
                    Permission {
                        id: 1,
                        permission: "comment".to_string(),
                    },
                    Permission {
                        id: 2,
                        permission: "upload photo".to_string(),
                    },
                    Permission {
                        id: 3,
                        permission: "add event".to_string(),
                    },
                ],
            },
        );
        store
    }

    /// Pre-issue a token so tests can skip `/auth`.
    pub fn with_token(mut self, token: &str) -> Self {
        self.tokens.insert(token.to_string());
        self
    }

    fn authorize(&self, query: &TokenQuery) -> Result<(), StatusCode> {
        match &query.token {
            Some(token) if self.tokens.contains(token) => Ok(()),
            _ => Err(StatusCode::UNAUTHORIZED),
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    router(Arc::new(RwLock::new(Store::seeded())))
}

pub fn router(db: Db) -> Router {
    Router::new()
        .route("/auth", get(auth))
        .route("/get-user/{username}", get(get_user))
        .route("/user/{user_id}/update", post(update_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, router(db)).await
}

async fn auth(State(db): State<Db>, Query(query): Query<AuthQuery>) -> Json<Value> {
    let mut store = db.write().await;
    if store.credentials.get(&query.login) != Some(&query.pass) {
        tracing::info!(login = %query.login, "rejected credentials");
        return Json(json!({ "status": "FAIL" }));
    }
    let token = Uuid::new_v4().simple().to_string();
    store.tokens.insert(token.clone());
    tracing::info!(login = %query.login, "issued token");
    Json(json!({ "status": "OK", "token": token }))
}

async fn get_user(
    State(db): State<Db>,
    Path(username): Path<String>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<Value>, StatusCode> {
    let store = db.read().await;
    store.authorize(&query)?;
    let user = store.users.get(&username).ok_or(StatusCode::NOT_FOUND)?;
    let mut body = serde_json::to_value(user).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    body["status"] = json!("OK");
    Ok(Json(body))
}

async fn update_user(
    State(db): State<Db>,
    Path(user_id): Path<u64>,
    Query(query): Query<TokenQuery>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<Value>, StatusCode> {
    let mut store = db.write().await;
    store.authorize(&query)?;
    let user = store
        .users
        .values_mut()
        .find(|user| user.id == user_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Some(active) = input.active {
        user.active = active;
    }
    if let Some(blocked) = input.blocked {
        user.blocked = blocked;
    }
    if let Some(name) = input.name {
        user.name = name;
    }
    if let Some(permissions) = input.permissions {
        user.permissions = permissions;
    }
    tracing::info!(user_id, "updated user");
    Ok(Json(json!({ "status": "OK" })))
}
