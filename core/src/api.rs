//! The transport seam and the four roster operations over it.
//!
//! # Design
//! `PlayerClient` stays pure; `PlayerApi` runs its requests through a
//! host-provided [`Transport`] and logs every failure with a message naming
//! the operation. Failures are still returned as `Err` so callers can tell
//! "nothing came back" apart from "something went wrong".

use log::{debug, error};

use crate::client::PlayerClient;
use crate::error::{ApiError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Player, PlayerDraft, PlayerId, RosterPayload};

/// Executes one HTTP round-trip on behalf of the client.
///
/// Implementations report a response for every status code, including 4xx
/// and 5xx; only a failed round-trip is a `TransportError`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Which API call failed, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListPlayers,
    GetPlayer(PlayerId),
    CreatePlayer,
    DeletePlayer(PlayerId),
}

impl Operation {
    pub fn failure_message(&self) -> String {
        match self {
            Operation::ListPlayers => "trouble fetching players".to_string(),
            Operation::GetPlayer(id) => format!("trouble fetching player #{id}"),
            Operation::CreatePlayer => "something went wrong adding that player".to_string(),
            Operation::DeletePlayer(id) => {
                format!("trouble removing player #{id} from the roster")
            }
        }
    }
}

/// Roster operations bound to a transport.
#[derive(Debug, Clone)]
pub struct PlayerApi<T> {
    client: PlayerClient,
    transport: T,
}

impl<T: Transport> PlayerApi<T> {
    pub fn new(client: PlayerClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &PlayerClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn list_players(&self) -> Result<RosterPayload, ApiError> {
        let request = self.client.build_list_players();
        let result = self
            .round_trip(request)
            .await
            .and_then(|response| self.client.parse_list_players(response));
        report(Operation::ListPlayers, result)
    }

    pub async fn get_player(&self, id: &PlayerId) -> Result<Player, ApiError> {
        let request = self.client.build_get_player(id);
        let result = self
            .round_trip(request)
            .await
            .and_then(|response| self.client.parse_get_player(response));
        report(Operation::GetPlayer(id.clone()), result)
    }

    pub async fn create_player(&self, draft: &PlayerDraft) -> Result<Player, ApiError> {
        let result = match self.client.build_create_player(draft) {
            Ok(request) => self
                .round_trip(request)
                .await
                .and_then(|response| self.client.parse_create_player(response)),
            Err(e) => Err(e),
        };
        report(Operation::CreatePlayer, result)
    }

    pub async fn delete_player(&self, id: &PlayerId) -> Result<(), ApiError> {
        let request = self.client.build_delete_player(id);
        let result = self
            .round_trip(request)
            .await
            .and_then(|response| self.client.parse_delete_player(response));
        report(Operation::DeletePlayer(id.clone()), result)
    }

    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!("{} {}", request.method.as_str(), request.url);
        let response = self.transport.execute(request).await?;
        debug!("-> {}", response.status);
        Ok(response)
    }
}

fn report<V>(operation: Operation, result: Result<V, ApiError>) -> Result<V, ApiError> {
    if let Err(e) = &result {
        error!("{}: {e}", operation.failure_message());
    }
    result
}
