//! Openverse music adapter
//!
//! Audio search over the Openverse catalog (jamendo source, commercial
//! licenses only) plus OAuth2 client-credentials handling. The token is
//! held by an injected credential provider with an explicit expiry and a
//! 60s early-refresh margin; no process-global state.

use crate::adapters::download::BROWSER_UA;
use crate::error::{ShortForgeError, ShortForgeResult};
use crate::ports::{MusicCandidate, MusicPort};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const TOKEN_URL: &str = "https://api.openverse.org/v1/auth_tokens/token/";
const AUDIO_URL: &str = "https://api.openverse.org/v1/audio/";

/// Margin subtracted from the reported token lifetime
const EXPIRY_MARGIN_SECS: i64 = 60;

/// OAuth2 client-credentials provider with cached token and expiry
pub struct OpenverseAuth {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    cached: Mutex<Option<CachedToken>>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: i64,
}

impl OpenverseAuth {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id,
            client_secret,
            cached: Mutex::new(None),
        }
    }

    /// Build from environment credentials, failing when either half is
    /// missing.
    pub fn from_secrets(
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> ShortForgeResult<Self> {
        match (client_id, client_secret) {
            (Some(id), Some(secret)) => Ok(Self::new(id, secret)),
            _ => Err(ShortForgeError::MissingCredentials {
                provider: "Openverse".to_string(),
                env_var: "OPENVERSE_CLIENT_ID / OPENVERSE_CLIENT_SECRET".to_string(),
            }),
        }
    }

    /// Return a valid access token, refreshing when expired.
    pub async fn token(&self) -> ShortForgeResult<String> {
        let mut cached = self.cached.lock().await;
        if let Some(tok) = cached.as_ref() {
            if Utc::now() < tok.expires_at {
                return Ok(tok.access_token.clone());
            }
        }
        let fresh = self.request_token().await?;
        let token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(token)
    }

    /// Drop the cached token and fetch a new one. Used when the API
    /// rejects a token before its reported expiry.
    pub async fn refresh(&self) -> ShortForgeResult<String> {
        let fresh = self.request_token().await?;
        let token = fresh.access_token.clone();
        *self.cached.lock().await = Some(fresh);
        Ok(token)
    }

    async fn request_token(&self) -> ShortForgeResult<CachedToken> {
        debug!("requesting openverse access token");
        let response = self
            .client
            .post(TOKEN_URL)
            .header(USER_AGENT, BROWSER_UA)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let parsed: TokenResponse = response.json().await?;
        Ok(CachedToken {
            access_token: parsed.access_token,
            expires_at: Utc::now() + Duration::seconds(parsed.expires_in - EXPIRY_MARGIN_SECS),
        })
    }
}

/// Openverse audio search client
pub struct OpenverseClient {
    client: reqwest::Client,
    auth: OpenverseAuth,
    min_track_secs: f64,
    max_track_secs: f64,
}

#[derive(Debug, Deserialize)]
struct AudioSearchResponse {
    #[serde(default)]
    results: Vec<AudioResult>,
}

#[derive(Debug, Clone, Deserialize)]
struct AudioResult {
    title: Option<String>,
    creator: Option<String>,
    license: Option<String>,
    foreign_landing_url: Option<String>,
    duration: Option<f64>,
    #[serde(default)]
    files: Vec<AudioFile>,
}

#[derive(Debug, Clone, Deserialize)]
struct AudioFile {
    url: Option<String>,
    filetype: Option<String>,
    bitrate: Option<u64>,
}

/// Attribution metadata written next to a downloaded track
#[derive(Debug, Serialize)]
struct TrackAttribution<'a> {
    title: Option<&'a str>,
    creator: Option<&'a str>,
    license: Option<&'a str>,
    landing: Option<&'a str>,
    source_url: &'a str,
    duration: f64,
}

impl OpenverseClient {
    pub fn new(auth: OpenverseAuth, min_track_secs: f64, max_track_secs: f64) -> Self {
        Self {
            client: reqwest::Client::new(),
            auth,
            min_track_secs,
            max_track_secs,
        }
    }

    async fn search_raw(&self, query: &str) -> ShortForgeResult<Vec<AudioResult>> {
        let params = [
            ("q", query),
            ("license_type", "commercial"),
            ("source", "jamendo"),
            ("page_size", "30"),
            (
                "fields",
                "title,creator,license,files,duration,foreign_landing_url",
            ),
        ];

        let mut token = self.auth.token().await?;
        for _ in 0..2 {
            debug!(query, "openverse audio search");
            let response = self
                .client
                .get(AUDIO_URL)
                .bearer_auth(&token)
                .header(USER_AGENT, BROWSER_UA)
                .query(&params)
                .send()
                .await?;

            // Tokens occasionally die before their reported expiry
            if response.status() == StatusCode::UNAUTHORIZED {
                warn!("openverse token rejected, forcing refresh");
                token = self.auth.refresh().await?;
                continue;
            }

            let parsed: AudioSearchResponse = response.error_for_status()?.json().await?;
            return Ok(parsed.results);
        }
        Err(ShortForgeError::ProviderExhausted {
            provider: "Openverse".to_string(),
        })
    }

    /// Pick a random track across shuffled queries and download it to
    /// `dest`, writing attribution JSON alongside.
    pub async fn pick_and_download(
        &self,
        queries: &[String],
        dest: &Path,
    ) -> ShortForgeResult<MusicCandidate> {
        let mut shuffled: Vec<&String> = queries.iter().collect();
        shuffled.shuffle(&mut rand::thread_rng());

        for query in shuffled {
            let candidates = match self.search(query).await {
                Ok(c) => c,
                Err(e) => {
                    warn!(query, "openverse search failed: {}", e);
                    continue;
                }
            };
            let Some(choice) = candidates.choose(&mut rand::thread_rng()).cloned() else {
                continue;
            };
            info!(
                title = choice.title.as_deref().unwrap_or("?"),
                creator = choice.creator.as_deref().unwrap_or("?"),
                "selected music track"
            );

            if let Err(e) = self.download_track(&choice, dest).await {
                warn!(url = choice.url, "music download failed: {}", e);
                continue;
            }
            return Ok(choice);
        }
        Err(ShortForgeError::ProviderExhausted {
            provider: "Openverse".to_string(),
        })
    }

    async fn download_track(&self, track: &MusicCandidate, dest: &Path) -> ShortForgeResult<()> {
        let response = self
            .client
            .get(&track.url)
            .header(USER_AGENT, BROWSER_UA)
            .send()
            .await?
            .error_for_status()?;
        let bytes = response.bytes().await?;
        tokio::fs::write(dest, &bytes).await?;

        let attribution = TrackAttribution {
            title: track.title.as_deref(),
            creator: track.creator.as_deref(),
            license: track.license.as_deref(),
            landing: track.landing_url.as_deref(),
            source_url: &track.url,
            duration: track.duration_secs,
        };
        let sidecar = dest.with_extension("json");
        tokio::fs::write(&sidecar, serde_json::to_string_pretty(&attribution)?).await?;
        Ok(())
    }
}

#[async_trait]
impl MusicPort for OpenverseClient {
    async fn search(&self, query: &str) -> ShortForgeResult<Vec<MusicCandidate>> {
        let results = self.search_raw(query).await?;
        let candidates = select_candidates(results, self.min_track_secs, self.max_track_secs);
        debug!(playable = candidates.len(), "openverse candidates");
        Ok(candidates)
    }
}

/// Keep tracks within the duration window that carry an mp3 file,
/// taking the highest-bitrate rendition of each.
fn select_candidates(results: Vec<AudioResult>, min_secs: f64, max_secs: f64) -> Vec<MusicCandidate> {
    let mut out = Vec::new();
    for result in results {
        let duration = result.duration.unwrap_or(0.0);
        if duration < min_secs || duration > max_secs {
            continue;
        }
        let mut mp3s: Vec<&AudioFile> = result
            .files
            .iter()
            .filter(|f| {
                f.url.is_some()
                    && f.filetype
                        .as_deref()
                        .is_some_and(|t| t.to_lowercase().contains("mp3"))
            })
            .collect();
        mp3s.sort_by(|a, b| b.bitrate.unwrap_or(0).cmp(&a.bitrate.unwrap_or(0)));

        if let Some(best) = mp3s.first() {
            if let Some(url) = &best.url {
                out.push(MusicCandidate {
                    title: result.title.clone(),
                    creator: result.creator.clone(),
                    license: result.license.clone(),
                    landing_url: result.foreign_landing_url.clone(),
                    duration_secs: duration,
                    url: url.clone(),
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(duration: f64, files: Vec<AudioFile>) -> AudioResult {
        AudioResult {
            title: Some("track".into()),
            creator: Some("artist".into()),
            license: Some("by".into()),
            foreign_landing_url: None,
            duration: Some(duration),
            files,
        }
    }

    fn mp3(url: &str, bitrate: u64) -> AudioFile {
        AudioFile {
            url: Some(url.to_string()),
            filetype: Some("mp3".to_string()),
            bitrate: Some(bitrate),
        }
    }

    #[test]
    fn test_select_candidates_filters_duration_window() {
        let results = vec![
            result(10.0, vec![mp3("short", 128)]),
            result(45.0, vec![mp3("good", 128)]),
            result(120.0, vec![mp3("long", 128)]),
        ];
        let candidates = select_candidates(results, 20.0, 90.0);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "good");
    }

    #[test]
    fn test_select_candidates_prefers_highest_bitrate() {
        let results = vec![result(30.0, vec![mp3("low", 96), mp3("high", 320)])];
        let candidates = select_candidates(results, 20.0, 90.0);
        assert_eq!(candidates[0].url, "high");
    }

    #[test]
    fn test_select_candidates_requires_mp3() {
        let results = vec![result(
            30.0,
            vec![AudioFile {
                url: Some("x.ogg".into()),
                filetype: Some("ogg".into()),
                bitrate: Some(128),
            }],
        )];
        assert!(select_candidates(results, 20.0, 90.0).is_empty());
    }
}
