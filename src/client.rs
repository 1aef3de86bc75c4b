use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::{
    config::ClientConfig,
    console::ConsoleList,
    error::RetroError,
    game::{GameInfo, GameInfoExtended, GameList},
    params::QueryParams,
    top_ten::TopTen,
    transport::{HttpTransport, Transport},
    user::UserRank,
};

pub const DEFAULT_RESULTS: u32 = 10;
pub const DEFAULT_RANGE_DAYS: i64 = 14;

/// Client for the RetroAchievements JSON API.
///
/// Every call is one GET with `mode=json`, `key` and `user` appended to the query.
/// Nothing is cached or retried.
#[derive(Debug, Clone)]
pub struct RetroClient<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
    strict_status: bool,
}

impl RetroClient {
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::from_config(ClientConfig::new(username, api_key))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_transport(config, HttpTransport::default())
    }

    /// Builds a client from `RA_USERNAME`, `RA_API_KEY` and `RA_BASE_URL`.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::from_config(ClientConfig::from_env()?))
    }
}

impl<T: Transport> RetroClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            strict_status: false,
        }
    }

    /// By default the body is parsed whatever the HTTP status, since the API
    /// reports most failures inside a JSON body. With `strict` set, non-2xx
    /// responses fail with [`RetroError::Status`] instead.
    pub fn strict_status(mut self, strict: bool) -> Self {
        self.strict_status = strict;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn username(&self) -> &str {
        self.config.username()
    }

    /// Resolves `resource` against the base URL and attaches `extra` plus the
    /// standard parameters. The standard ones are written last and always win.
    pub fn url(&self, resource: &str, extra: &QueryParams) -> Result<Url, RetroError> {
        let mut url = self.config.base_url().join(resource)?;

        let mut params = extra.clone();
        params
            .set("mode", "json")
            .set("key", self.config.api_key())
            .set("user", self.config.username());

        url.query_pairs_mut().clear().extend_pairs(params.iter());
        Ok(url)
    }

    /// Sends a GET for `resource` and parses the body as `R`.
    ///
    /// Use `R = serde_json::Value` to get the document untouched.
    pub async fn request<R: DeserializeOwned>(
        &self,
        resource: &str,
        extra: QueryParams,
    ) -> anyhow::Result<R> {
        let url = self.url(resource, &extra)?;
        tracing::debug!(resource, url = %redact_key(&url), "Sending request");

        let response = self.transport.get(url).await?;
        tracing::debug!(resource, status = response.status, "Received response");

        if self.strict_status && !response.is_success() {
            return Err(RetroError::Status {
                status: response.status,
                body: response.body,
            }
            .into());
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    /// The current top ten users by score.
    pub async fn top_ten(&self) -> anyhow::Result<TopTen> {
        self.request("top_ten.php", QueryParams::new()).await
    }

    /// Supported consoles and their ids.
    pub async fn consoles(&self) -> anyhow::Result<ConsoleList> {
        self.request("console_id.php", QueryParams::new()).await
    }

    /// Games and their ids for one console.
    pub async fn games(&self, console_id: u32) -> anyhow::Result<GameList> {
        self.request("game_list.php", QueryParams::new().with("console", console_id))
            .await
    }

    pub async fn game(&self, game_id: u32) -> anyhow::Result<GameInfo> {
        self.request("game_info.php", QueryParams::new().with("game", game_id))
            .await
    }

    /// Game metadata plus player counts and the achievement set.
    pub async fn game_extended(&self, game_id: u32) -> anyhow::Result<GameInfoExtended> {
        self.request(
            "game_info_extended.php",
            QueryParams::new().with("game", game_id),
        )
        .await
    }

    /// Game metadata with the configured user's achievement progress.
    pub async fn game_progress(&self, game_id: u32) -> anyhow::Result<Value> {
        self.request("game_progress.php", QueryParams::new().with("game", game_id))
            .await
    }

    /// Rank and score of `username` (or the configured user) for a game.
    pub async fn user_rank(
        &self,
        game_id: u32,
        username: Option<&str>,
    ) -> anyhow::Result<UserRank> {
        let params = QueryParams::new()
            .with("member", self.member(username))
            .with("game", game_id);
        self.request("", params).await
    }

    /// Recently played games. `results` defaults to 10.
    pub async fn user_recent(
        &self,
        username: Option<&str>,
        results: Option<u32>,
    ) -> anyhow::Result<Value> {
        let params = QueryParams::new()
            .with("member", self.member(username))
            .with("results", results.unwrap_or(DEFAULT_RESULTS));
        self.request("user_recent.php", params).await
    }

    pub async fn user_progress(
        &self,
        game_id: u32,
        username: Option<&str>,
    ) -> anyhow::Result<Value> {
        let params = QueryParams::new()
            .with("member", self.member(username))
            .with("game", game_id);
        self.request("user_progress.php", params).await
    }

    /// Summary of recent results. `results` defaults to 10.
    pub async fn user_summary(
        &self,
        username: Option<&str>,
        results: Option<u32>,
    ) -> anyhow::Result<Value> {
        let params = QueryParams::new()
            .with("member", self.member(username))
            .with("results", results.unwrap_or(DEFAULT_RESULTS));
        self.request("user_summary.php", params).await
    }

    /// Games the member has mastered or attempted.
    pub async fn user_completions(&self, username: Option<&str>) -> anyhow::Result<Value> {
        let params = QueryParams::new().with("member", self.member(username));
        self.request("user_by_date.php", params).await
    }

    /// Achievements earned on one day. `date` defaults to now.
    pub async fn user_achievements_by_date(
        &self,
        username: Option<&str>,
        date: Option<DateTime<Utc>>,
    ) -> anyhow::Result<Value> {
        let date = date.unwrap_or_else(Utc::now);
        let params = QueryParams::new()
            .with("member", self.member(username))
            .with("date", date.timestamp());
        self.request("user_by_date.php", params).await
    }

    /// Achievements earned between two dates. Defaults to the last two weeks.
    pub async fn user_achievements_by_date_range(
        &self,
        username: Option<&str>,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> anyhow::Result<Value> {
        let end = end.unwrap_or_else(Utc::now);
        let start = start.unwrap_or_else(|| end - Duration::days(DEFAULT_RANGE_DAYS));
        let params = QueryParams::new()
            .with("member", self.member(username))
            .with("startdate", start.timestamp())
            .with("enddate", end.timestamp());
        self.request("user_by_date.php", params).await
    }

    fn member<'a>(&'a self, username: Option<&'a str>) -> &'a str {
        match username {
            Some(name) => name,
            None => self.config.username(),
        }
    }
}

/// Copy of `url` with the `key` parameter's value masked, for logging.
fn redact_key(url: &Url) -> Url {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "***".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}
