use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

/// Timeout in seconds assigned to triggers created without one.
pub const DEFAULT_TIMEOUT: i64 = 30;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    #[serde(default)]
    pub uuid: String,
    pub name: String,
    pub state: String,
    pub dyno: String,
    pub frequency_type: String,
    pub schedule: String,
    pub timezone: String,
    pub value: String,
    #[serde(default)]
    pub timeout: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TriggerEnvelope {
    pub message: String,
    pub code: u16,
    pub trigger: Trigger,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
    pub code: u16,
}

pub type Db = Arc<RwLock<HashMap<String, Trigger>>>;

type ApiError = (StatusCode, &'static str);

const NOT_FOUND: ApiError = (StatusCode::NOT_FOUND, "not found");
const UNAUTHORIZED: ApiError = (StatusCode::UNAUTHORIZED, "unauthorized");

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/triggers", get(list_triggers).post(create_trigger))
        .route(
            "/triggers/{uuid}",
            get(get_trigger).put(update_trigger).delete(delete_trigger),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Any non-empty `Authorization` value is accepted.
fn authorize(headers: &HeaderMap) -> Result<(), ApiError> {
    match headers.get(AUTHORIZATION) {
        Some(value) if !value.is_empty() => Ok(()),
        _ => Err(UNAUTHORIZED),
    }
}

fn envelope(message: &str, trigger: Trigger) -> Json<TriggerEnvelope> {
    Json(TriggerEnvelope {
        message: message.to_string(),
        code: StatusCode::OK.as_u16(),
        trigger,
    })
}

async fn list_triggers(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<HashMap<String, Trigger>>, ApiError> {
    authorize(&headers)?;
    Ok(Json(db.read().await.clone()))
}

async fn create_trigger(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(mut trigger): Json<Trigger>,
) -> Result<Json<TriggerEnvelope>, ApiError> {
    authorize(&headers)?;
    trigger.uuid = Uuid::new_v4().to_string();
    if trigger.timeout == 0 {
        trigger.timeout = DEFAULT_TIMEOUT;
    }
    db.write().await.insert(trigger.uuid.clone(), trigger.clone());
    info!(uuid = %trigger.uuid, name = %trigger.name, "trigger created");
    Ok(envelope("trigger created", trigger))
}

async fn get_trigger(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(uuid): Path<String>,
) -> Result<Json<TriggerEnvelope>, ApiError> {
    authorize(&headers)?;
    let triggers = db.read().await;
    let trigger = triggers.get(&uuid).cloned().ok_or(NOT_FOUND)?;
    Ok(envelope("trigger found", trigger))
}

async fn update_trigger(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(uuid): Path<String>,
    Json(mut input): Json<Trigger>,
) -> Result<Json<TriggerEnvelope>, ApiError> {
    authorize(&headers)?;
    let mut triggers = db.write().await;
    let stored = triggers.get_mut(&uuid).ok_or(NOT_FOUND)?;
    input.uuid = uuid;
    if input.timeout == 0 {
        input.timeout = stored.timeout;
    }
    *stored = input.clone();
    info!(uuid = %input.uuid, "trigger updated");
    Ok(envelope("trigger updated", input))
}

async fn delete_trigger(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(uuid): Path<String>,
) -> Result<Json<StatusMessage>, ApiError> {
    authorize(&headers)?;
    db.write().await.remove(&uuid).ok_or(NOT_FOUND)?;
    info!(%uuid, "trigger deleted");
    Ok(Json(StatusMessage {
        message: "trigger deleted".to_string(),
        code: StatusCode::OK.as_u16(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_serializes_camel_case() {
        let trigger = Trigger {
            uuid: "abc".to_string(),
            name: "Test".to_string(),
            state: "enabled".to_string(),
            dyno: "web".to_string(),
            frequency_type: "cron".to_string(),
            schedule: "* * * * *".to_string(),
            timezone: "UTC".to_string(),
            value: String::new(),
            timeout: 30,
        };
        let json = serde_json::to_value(&trigger).unwrap();
        assert_eq!(json["frequencyType"], "cron");
        assert_eq!(json["timeout"], 30);
        assert!(json.get("frequency_type").is_none());
    }

    #[test]
    fn trigger_accepts_missing_uuid_and_timeout() {
        let trigger: Trigger = serde_json::from_str(
            r#"{"name":"n","state":"s","dyno":"d","frequencyType":"f",
                "schedule":"","timezone":"UTC","value":""}"#,
        )
        .unwrap();
        assert!(trigger.uuid.is_empty());
        assert_eq!(trigger.timeout, 0);
    }

    #[test]
    fn trigger_rejects_missing_name() {
        let result: Result<Trigger, _> = serde_json::from_str(
            r#"{"state":"s","dyno":"d","frequencyType":"f","schedule":"","timezone":"UTC","value":""}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn authorize_requires_non_empty_header() {
        let mut headers = HeaderMap::new();
        assert!(authorize(&headers).is_err());
        headers.insert(AUTHORIZATION, "".parse().unwrap());
        assert!(authorize(&headers).is_err());
        headers.insert(AUTHORIZATION, "token".parse().unwrap());
        assert!(authorize(&headers).is_ok());
    }
}
