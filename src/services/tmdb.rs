//! TMDB API client.

use crate::models::episode::{EpisodeRecord, EpisodeTable};
use crate::Result;
use serde::Deserialize;

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB client configuration.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// API key or Bearer token (JWT)
    pub api_key: String,
    pub language: String,
    /// Whether to use Bearer token authentication (API v4 style)
    pub use_bearer: bool,
}

impl TmdbConfig {
    /// Create config from an API key.
    /// Supports both API key (v3) and Bearer token (v4) formats.
    pub fn new(api_key: String, language: String) -> Self {
        // Bearer tokens start with "eyJ" (base64 encoded JWT header)
        let use_bearer = api_key.starts_with("eyJ");
        Self {
            api_key,
            language,
            use_bearer,
        }
    }

    /// Create config from the user config file, falling back to the
    /// `TMDB_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let config = crate::models::config::load_config();
        let api_key = config.tmdb.api_key.ok_or(crate::Error::TmdbApiKeyMissing)?;
        Ok(Self::new(api_key, config.tmdb.language))
    }
}

/// TMDB API client.
pub struct TmdbClient {
    config: TmdbConfig,
    client: reqwest::Client,
}

/// TV show details.
#[derive(Debug, Deserialize)]
pub struct TvDetails {
    pub id: u64,
    pub name: String,
    pub first_air_date: Option<String>,
    pub number_of_seasons: u16,
}

/// Season details.
#[derive(Debug, Deserialize)]
pub struct SeasonDetails {
    pub season_number: u16,
    pub air_date: Option<String>,
    pub episodes: Vec<EpisodeInfo>,
}

/// Episode info within a season.
#[derive(Debug, Deserialize)]
pub struct EpisodeInfo {
    pub name: String,
    pub overview: Option<String>,
    pub episode_number: u16,
    pub season_number: u16,
    pub air_date: Option<String>,
}

impl From<EpisodeInfo> for EpisodeRecord {
    fn from(ep: EpisodeInfo) -> Self {
        EpisodeRecord {
            season: ep.season_number,
            episode_number: ep.episode_number,
            title: ep.name,
            air_date: ep.air_date.filter(|d| !d.is_empty()),
            description: ep.overview.filter(|o| !o.is_empty()),
        }
    }
}

/// Result of looking up an external id.
#[derive(Debug, Deserialize)]
pub struct FindResult {
    pub tv_results: Vec<FindTvItem>,
}

/// TV show found by external id.
#[derive(Debug, Deserialize)]
pub struct FindTvItem {
    pub id: u64,
    pub name: String,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// Create a new TMDB client from environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(TmdbConfig::from_env()?))
    }

    /// Build a request with proper authentication.
    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        if self.config.use_bearer {
            request.header("Authorization", format!("Bearer {}", self.config.api_key))
        } else {
            request
        }
    }

    /// Build URL with optional api_key parameter (only for v3 style).
    fn build_url(&self, path: &str, extra_params: &str) -> String {
        let language = urlencoding::encode(&self.config.language);
        if self.config.use_bearer {
            format!(
                "{}/{}?language={}{}",
                TMDB_BASE_URL, path, language, extra_params
            )
        } else {
            format!(
                "{}/{}?api_key={}&language={}{}",
                TMDB_BASE_URL, path, self.config.api_key, language, extra_params
            )
        }
    }

    /// Send a GET request and decode the JSON body, failing on HTTP errors.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self.build_request(url).send().await?.error_for_status()?;
        Ok(resp.json().await?)
    }

    /// Verify API key is valid.
    ///
    /// Network failures are errors, a rejected key is `Ok(false)`.
    pub async fn verify_api_key(&self) -> Result<bool> {
        let url = if self.config.use_bearer {
            format!("{}/authentication", TMDB_BASE_URL)
        } else {
            format!(
                "{}/authentication?api_key={}",
                TMDB_BASE_URL, self.config.api_key
            )
        };

        let resp = self.build_request(&url).send().await?;
        Ok(resp.status().is_success())
    }

    /// Resolve an IMDB id (e.g. `tt1439629`) to a TMDB TV show id.
    pub async fn find_tv_by_imdb_id(&self, imdb_id: &str) -> Result<FindTvItem> {
        let url = self.build_url(
            &format!("find/{}", urlencoding::encode(imdb_id)),
            "&external_source=imdb_id",
        );
        let resp: FindResult = self.get_json(&url).await?;
        resp.tv_results
            .into_iter()
            .next()
            .ok_or_else(|| crate::Error::ShowNotFound(imdb_id.to_string()))
    }

    /// Get TV show details.
    pub async fn get_tv_details(&self, tv_id: u64) -> Result<TvDetails> {
        let url = self.build_url(&format!("tv/{}", tv_id), "");
        self.get_json(&url).await
    }

    /// Get season details.
    pub async fn get_season_details(&self, tv_id: u64, season_number: u16) -> Result<SeasonDetails> {
        let url = self.build_url(&format!("tv/{}/season/{}", tv_id, season_number), "");
        self.get_json(&url).await
    }

    /// Fetch the episode table for a range of seasons.
    ///
    /// Seasons are requested one at a time. `end` defaults to the show's
    /// last season. An empty season range is an error.
    pub async fn fetch_episodes(&self, tv_id: u64, start: u16, end: Option<u16>) -> Result<EpisodeTable> {
        let end = match end {
            Some(end) => end,
            None => self.get_tv_details(tv_id).await?.number_of_seasons,
        };

        if start > end {
            return Err(crate::Error::other(format!(
                "Start season {} is after end season {}",
                start, end
            )));
        }

        let mut records = Vec::new();
        for season in start..=end {
            let details = self.get_season_details(tv_id, season).await?;
            tracing::info!(
                "Fetched season {}: {} episodes",
                details.season_number,
                details.episodes.len()
            );
            records.extend(details.episodes.into_iter().map(EpisodeRecord::from));
        }

        Ok(EpisodeTable::new(records))
    }
}
