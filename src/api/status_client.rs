use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::config::settings::StatusSettings;
use crate::http::RateLimitedClient;

/// Wire shape of the public status service. Everything beyond `online` is
/// optional; offline servers omit most of it.
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub players: Option<PlayersOnline>,
    #[serde(default)]
    pub motd: Option<Motd>,
    #[serde(default)]
    pub hostname: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlayersOnline {
    #[serde(default)]
    pub online: i64,
    #[serde(default)]
    pub max: i64,
}

#[derive(Debug, Deserialize)]
pub struct Motd {
    #[serde(default)]
    pub clean: Vec<String>,
    #[serde(default)]
    pub raw: Vec<String>,
}

/// What the widget renders. Always well-formed: a failed or unreadable
/// fetch degrades to the offline shape, never to an error.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub host: String,
    pub online: bool,
    pub players_online: i64,
    pub players_max: i64,
    pub motd: Vec<String>,
    pub checked_at: DateTime<Utc>,
}

impl StatusReport {
    pub fn offline(host: &str) -> Self {
        Self {
            host: host.to_string(),
            online: false,
            players_online: 0,
            players_max: 0,
            motd: Vec::new(),
            checked_at: Utc::now(),
        }
    }

    fn from_response(host: &str, response: StatusResponse) -> Self {
        let (players_online, players_max) = response
            .players
            .map(|p| (p.online, p.max))
            .unwrap_or((0, 0));
        Self {
            host: response.hostname.unwrap_or_else(|| host.to_string()),
            online: response.online,
            players_online,
            players_max,
            motd: response.motd.map(|m| m.clean).unwrap_or_default(),
            checked_at: Utc::now(),
        }
    }
}

/// Client for the third-party server-status API
pub struct StatusClient {
    client: RateLimitedClient,
    base_url: String,
}

impl StatusClient {
    pub fn new(settings: &StatusSettings) -> anyhow::Result<Self> {
        let client = RateLimitedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
        )?;
        Ok(Self {
            client,
            base_url: settings.api_base_url.to_string(),
        })
    }

    /// One status poll. Transport errors, bad statuses, and undecodable
    /// bodies all collapse into the offline report.
    pub async fn fetch(&mut self, host: &str) -> StatusReport {
        match self.try_fetch(host).await {
            Ok(response) => StatusReport::from_response(host, response),
            Err(e) => {
                log::warn!("Status fetch for {host} failed, rendering offline: {e:?}");
                StatusReport::offline(host)
            }
        }
    }

    async fn try_fetch(&mut self, host: &str) -> anyhow::Result<StatusResponse> {
        let url = format!("{}/{}", self.base_url, host);
        let response = self.client.get(&url).await?;

        if !response.status().is_success() {
            anyhow::bail!("status API returned {}", response.status());
        }

        response
            .json::<StatusResponse>()
            .await
            .map_err(anyhow::Error::from)
    }
}
