//! Typed client for the REST API, used by the front-end views.
//!
//! Wraps `reqwest` and unpacks the `{ success, data | error }` envelope into
//! plain results. Image URLs handed to views are absolute and cache-busted so a
//! replaced photo shows up without a hard reload.

pub mod forms;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::models::{
    Admin, CreatedPlayer, CreatedTeam, Credentials, Player, PlayerWithTeam, SignupResponse, Team,
    TextBlock, TokenResponse,
};
use forms::{AdminForm, FormError, PlayerForm, TeamForm};

/// Append a stamp to an image URL so caches treat it as a new resource.
pub fn cache_bust(url: &str, stamp: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, separator, stamp)
}

/// Errors surfaced to the views.
#[derive(Debug)]
pub enum ClientError {
    /// The request never produced a response.
    Http(reqwest::Error),
    /// The server answered with an error envelope.
    Api {
        status: u16,
        code: String,
        message: String,
    },
    /// The response body did not have the expected shape.
    Decode(String),
    /// The form was rejected before sending.
    Form(FormError),
}

impl ClientError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Http(e) => write!(f, "Request failed: {}", e),
            ClientError::Api {
                status,
                code,
                message,
            } => write!(f, "{} ({}): {}", code, status, message),
            ClientError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
            ClientError::Form(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Http(err)
    }
}

impl From<FormError> for ClientError {
    fn from(err: FormError) -> Self {
        ClientError::Form(err)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

fn take_field(body: &mut Value, key: &str) -> Value {
    body.get_mut(key).map(Value::take).unwrap_or(Value::Null)
}

/// A team page: the team and its players, as the members view shows them.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    pub team: Team,
    pub players: Vec<Player>,
}

impl Roster {
    /// Drop a player locally. Returns the removed player, if present.
    pub fn remove(&mut self, id: &str) -> Option<Player> {
        let index = self.players.iter().position(|p| p.profile.id == id)?;
        Some(self.players.remove(index))
    }

    /// Swap in an edited player. A player moved to another team leaves the roster.
    pub fn replace(&mut self, player: Player) {
        if player.team_id != self.team.id {
            self.remove(&player.profile.id);
            return;
        }
        match self
            .players
            .iter_mut()
            .find(|p| p.profile.id == player.profile.id)
        {
            Some(slot) => *slot = player,
            None => self.players.push(player),
        }
    }
}

/// HTTP client for the backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Token from the last successful login.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn image_url(&self, path: &str, stamp: i64) -> String {
        cache_bust(&self.url(path), stamp)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let mut body: Value = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        if body.get("success") != Some(&Value::Bool(true)) {
            let error: ErrorBody = serde_json::from_value(take_field(&mut body, "error"))
                .map_err(|e| ClientError::Decode(e.to_string()))?;
            tracing::debug!("API error {} {}: {}", status, error.code, error.message);
            return Err(ClientError::Api {
                status,
                code: error.code,
                message: error.message,
            });
        }

        serde_json::from_value(take_field(&mut body, "data"))
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    // ==================== TEAMS ====================

    pub async fn list_teams(&self) -> Result<Vec<Team>, ClientError> {
        self.send(self.http.get(self.url("/times"))).await
    }

    pub async fn get_team(&self, id: i64) -> Result<Team, ClientError> {
        self.send(self.http.get(self.url(&format!("/times/{}", id))))
            .await
    }

    /// Load a team and its players, with fresh photo URLs.
    pub async fn team_roster(&self, team_id: i64) -> Result<Roster, ClientError> {
        let team = self.get_team(team_id).await?;
        let mut players: Vec<Player> = self
            .send(
                self.http
                    .get(self.url(&format!("/times/{}/jogadores", team_id))),
            )
            .await?;

        let stamp = chrono::Utc::now().timestamp_millis();
        for player in &mut players {
            player.profile.foto_url = self.image_url(&player.profile.foto_url, stamp);
        }

        Ok(Roster { team, players })
    }

    pub async fn create_team(&self, form: TeamForm) -> Result<CreatedTeam, ClientError> {
        form.validate()?;
        let body = form.into_multipart()?;
        self.send(self.http.post(self.url("/times")).multipart(body))
            .await
    }

    pub async fn delete_team(&self, id: i64) -> Result<(), ClientError> {
        self.send(self.http.delete(self.url(&format!("/times/{}", id))))
            .await
    }

    // ==================== PLAYERS ====================

    pub async fn list_players(&self) -> Result<Vec<PlayerWithTeam>, ClientError> {
        self.send(self.http.get(self.url("/jogadores"))).await
    }

    /// Create a player; returns the new id.
    pub async fn create_player(&self, form: PlayerForm) -> Result<String, ClientError> {
        form.validate_new()?;
        let body = form.into_multipart()?;
        let created: CreatedPlayer = self
            .send(self.http.post(self.url("/jogadores")).multipart(body))
            .await?;
        Ok(created.id)
    }

    pub async fn update_player(&self, id: &str, form: PlayerForm) -> Result<Player, ClientError> {
        form.validate()?;
        let body = form.into_multipart()?;
        let mut player: Player = self
            .send(
                self.http
                    .put(self.url(&format!("/jogadores/{}", id)))
                    .multipart(body),
            )
            .await?;

        let stamp = chrono::Utc::now().timestamp_millis();
        player.profile.foto_url = self.image_url(&player.profile.foto_url, stamp);
        Ok(player)
    }

    pub async fn delete_player(&self, id: &str) -> Result<(), ClientError> {
        self.send(self.http.delete(self.url(&format!("/jogadores/{}", id))))
            .await
    }

    /// Delete a player and drop it from the roster without reloading.
    pub async fn delete_roster_player(
        &self,
        roster: &mut Roster,
        id: &str,
    ) -> Result<(), ClientError> {
        self.delete_player(id).await?;
        roster.remove(id);
        Ok(())
    }

    /// Update a player and swap the result into the roster without reloading.
    pub async fn update_roster_player(
        &self,
        roster: &mut Roster,
        id: &str,
        form: PlayerForm,
    ) -> Result<(), ClientError> {
        let player = self.update_player(id, form).await?;
        roster.replace(player);
        Ok(())
    }

    // ==================== ADMINS ====================

    pub async fn list_admins(&self) -> Result<Vec<Admin>, ClientError> {
        let mut admins: Vec<Admin> = self.send(self.http.get(self.url("/admins"))).await?;

        let stamp = chrono::Utc::now().timestamp_millis();
        for admin in &mut admins {
            admin.foto_url = admin
                .foto_url
                .as_deref()
                .map(|path| self.image_url(path, stamp));
        }
        Ok(admins)
    }

    pub async fn create_admin(&self, form: AdminForm) -> Result<Admin, ClientError> {
        form.validate()?;
        let body = form.into_multipart()?;
        self.send(self.http.post(self.url("/admins")).multipart(body))
            .await
    }

    pub async fn update_admin(&self, id: &str, form: AdminForm) -> Result<Admin, ClientError> {
        form.validate()?;
        let body = form.into_multipart()?;
        self.send(
            self.http
                .put(self.url(&format!("/admins/{}", id)))
                .multipart(body),
        )
        .await
    }

    pub async fn delete_admin(&self, id: &str) -> Result<(), ClientError> {
        self.send(self.http.delete(self.url(&format!("/admins/{}", id))))
            .await
    }

    // ==================== ACCOUNTS ====================

    pub async fn signup(&self, login: &str, password: &str) -> Result<SignupResponse, ClientError> {
        let credentials = Credentials {
            login: login.to_string(),
            password: password.to_string(),
        };
        self.send(self.http.post(self.url("/signup")).json(&credentials))
            .await
    }

    /// Log in and keep the token for later requests.
    pub async fn login(&mut self, login: &str, password: &str) -> Result<String, ClientError> {
        let credentials = Credentials {
            login: login.to_string(),
            password: password.to_string(),
        };
        let response: TokenResponse = self
            .send(self.http.post(self.url("/login")).json(&credentials))
            .await?;

        self.token = Some(response.token.clone());
        Ok(response.token)
    }

    // ==================== CONTENT ====================

    pub async fn list_texts(&self) -> Result<Vec<TextBlock>, ClientError> {
        self.send(self.http.get(self.url("/textos-puxar"))).await
    }
}
