//! HTTP implementation of the scoring authority.
//!
//! A thin blocking client over the backend's JSON API. Every failure mode
//! (connect/timeout, non-2xx status, undecodable body) maps to
//! [`GameError::CollaboratorUnavailable`]; the machine decides what to do
//! with that, this layer never retries.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::{GameMode, GameResult, GameState};
use crate::error::GameError;

use super::authority::{RemoteRoll, RemoteSession, ScoreAuthority};
use super::wire::{
    DiceRollResponse, GameResultResponse, GameStateResponse, PlayerStats, RollDiceRequest,
    StartGameRequest,
};

/// Default request timeout. A slow backend is an unavailable backend.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Blocking HTTP client for the remote scoring backend.
pub struct HttpAuthority {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpAuthority {
    /// Create a client for the backend at `base_url`
    /// (e.g. `http://localhost:8080`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, GameError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| GameError::unavailable(format!("failed to build client: {err}")))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client with a preconfigured `reqwest` client.
    pub fn with_client(client: reqwest::blocking::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    /// The backend base URL (without trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn decode<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T, GameError> {
        let status = response.status();
        if !status.is_success() {
            return Err(GameError::unavailable(format!(
                "backend returned {status}"
            )));
        }
        response
            .json::<T>()
            .map_err(|err| GameError::unavailable(format!("undecodable response body: {err}")))
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, GameError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .map_err(|err| GameError::unavailable(err.to_string()))?;
        Self::decode(response)
    }

    fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, GameError> {
        let mut request = self.client.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .map_err(|err| GameError::unavailable(err.to_string()))?;
        Self::decode(response)
    }
}

impl ScoreAuthority for HttpAuthority {
    fn start_game(&mut self, mode: GameMode, rounds: u32) -> Result<RemoteSession, GameError> {
        let request = StartGameRequest { mode, rounds };
        let response: GameStateResponse = self.post("/game/start", Some(&request))?;
        response.into_session()
    }

    fn roll_dice(&mut self, game_id: &str, player_name: &str) -> Result<RemoteRoll, GameError> {
        let request = RollDiceRequest {
            player_name: player_name.to_string(),
        };
        let response: DiceRollResponse =
            self.post(&format!("/game/{game_id}/roll"), Some(&request))?;
        response.into_remote_roll()
    }

    fn next_round(&mut self, game_id: &str) -> Result<GameState, GameError> {
        let response: GameStateResponse =
            self.post::<(), _>(&format!("/game/{game_id}/next-round"), None)?;
        response.into_game_state()
    }

    fn game_state(&mut self, game_id: &str) -> Result<GameState, GameError> {
        let response: GameStateResponse = self.get(&format!("/game/{game_id}/state"))?;
        response.into_game_state()
    }

    fn end_game(&mut self, game_id: &str) -> Result<GameResult, GameError> {
        let response: GameResultResponse =
            self.post::<(), _>(&format!("/game/{game_id}/end"), None)?;
        response.into_game_result()
    }

    fn leaderboard(&mut self) -> Result<Vec<PlayerStats>, GameError> {
        self.get("/game/leaderboard")
    }

    fn delete_game(&mut self, game_id: &str) -> Result<(), GameError> {
        let response = self
            .client
            .delete(self.url(&format!("/game/{game_id}")))
            .send()
            .map_err(|err| GameError::unavailable(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(GameError::unavailable(format!(
                "backend returned {status}"
            )))
        }
    }
}
