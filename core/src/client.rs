//! Stateless HTTP request builder and response parser for the Puppy Bowl API.
//!
//! # Design
//! `PlayerClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Executing the round-trip is the job of a [`Transport`](crate::api::Transport).

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    CreatedData, Envelope, Player, PlayerData, PlayerDraft, PlayerId, RosterData, RosterPayload,
};

/// Bytes escaped in a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Synchronous, stateless client for one cohort's roster.
#[derive(Debug, Clone)]
pub struct PlayerClient {
    base_url: String,
}

impl PlayerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn player_url(&self, id: &PlayerId) -> String {
        let key = id.key();
        format!(
            "{}/players/{}",
            self.base_url,
            utf8_percent_encode(&key, PATH_SEGMENT)
        )
    }

    pub fn build_list_players(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/players", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_player(&self, id: &PlayerId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.player_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_player(&self, draft: &PlayerDraft) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(draft).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/players", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_player(&self, id: &PlayerId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.player_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Returns `data.players` unvalidated; the roster renderer decides
    /// whether it is a usable list.
    pub fn parse_list_players(&self, response: HttpResponse) -> Result<RosterPayload, ApiError> {
        let data: RosterData = decode_envelope(&response)?;
        Ok(RosterPayload(data.players))
    }

    pub fn parse_get_player(&self, response: HttpResponse) -> Result<Player, ApiError> {
        let data: PlayerData = decode_envelope(&response)?;
        Ok(data.player)
    }

    pub fn parse_create_player(&self, response: HttpResponse) -> Result<Player, ApiError> {
        let data: CreatedData = decode_envelope(&response)?;
        Ok(data.new_player)
    }

    /// An empty body counts as acknowledgment; otherwise the envelope's
    /// `success` flag is honoured.
    pub fn parse_delete_player(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(());
        }
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))?;
        if !envelope.success {
            return Err(ApiError::Rejected(envelope.error_message()));
        }
        Ok(())
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Fetch {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode_envelope<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    check_status(response)?;
    let envelope: Envelope<T> =
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if !envelope.success {
        return Err(ApiError::Rejected(envelope.error_message()));
    }
    envelope
        .data
        .ok_or_else(|| ApiError::Decode("response envelope carries no data".to_string()))
}
