use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: u64,
    pub name: String,
    pub age: u32,
    pub breed: String,
    pub status: String,
}

#[derive(Deserialize)]
pub struct CreatePlayer {
    pub name: String,
    pub age: Option<i64>,
    pub breed: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Rosters keyed by cohort; ids are unique across cohorts.
#[derive(Default)]
pub struct Store {
    next_id: u64,
    rosters: HashMap<String, BTreeMap<u64, Player>>,
}

pub type Db = Arc<RwLock<Store>>;

type Reply = (StatusCode, Json<Value>);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/{cohort}/players", get(list_players).post(create_player))
        .route(
            "/api/{cohort}/players/{id}",
            get(get_player).delete(delete_player),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn success(status: StatusCode, data: Value) -> Reply {
    (
        status,
        Json(json!({ "success": true, "error": null, "data": data })),
    )
}

fn failure(status: StatusCode, name: &str, message: String) -> Reply {
    (
        status,
        Json(json!({
            "success": false,
            "error": { "name": name, "message": message },
            "data": null,
        })),
    )
}

fn not_found(id: u64) -> Reply {
    failure(
        StatusCode::NOT_FOUND,
        "NotFoundError",
        format!("player #{id} not found"),
    )
}

async fn list_players(State(db): State<Db>, Path(cohort): Path<String>) -> Reply {
    let store = db.read().await;
    let players: Vec<Player> = store
        .rosters
        .get(&cohort)
        .map(|roster| roster.values().cloned().collect())
        .unwrap_or_default();
    success(StatusCode::OK, json!({ "players": players }))
}

async fn create_player(
    State(db): State<Db>,
    Path(cohort): Path<String>,
    Json(input): Json<CreatePlayer>,
) -> Reply {
    let age = match input.age.map(u32::try_from) {
        Some(Ok(age)) => age,
        _ => {
            return failure(
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "age must be a non-negative integer".to_string(),
            )
        }
    };

    let mut store = db.write().await;
    store.next_id += 1;
    let player = Player {
        id: store.next_id,
        name: input.name,
        age,
        breed: input.breed,
        status: input.status.unwrap_or_else(|| "bench".to_string()),
    };
    log::info!("cohort {cohort}: added player #{} ({})", player.id, player.name);
    store
        .rosters
        .entry(cohort)
        .or_default()
        .insert(player.id, player.clone());
    success(StatusCode::CREATED, json!({ "newPlayer": player }))
}

async fn get_player(State(db): State<Db>, Path((cohort, id)): Path<(String, u64)>) -> Reply {
    let store = db.read().await;
    match store.rosters.get(&cohort).and_then(|roster| roster.get(&id)) {
        Some(player) => success(StatusCode::OK, json!({ "player": player })),
        None => not_found(id),
    }
}

async fn delete_player(State(db): State<Db>, Path((cohort, id)): Path<(String, u64)>) -> Reply {
    let mut store = db.write().await;
    let removed = store
        .rosters
        .get_mut(&cohort)
        .and_then(|roster| roster.remove(&id));
    match removed {
        Some(player) => {
            log::info!("cohort {cohort}: removed player #{} ({})", player.id, player.name);
            success(StatusCode::OK, Value::Null)
        }
        None => not_found(id),
    }
}
