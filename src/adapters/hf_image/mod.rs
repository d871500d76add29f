//! Hugging Face inference image generation adapter
//!
//! Generates a neutral illustration for a narration sentence, walking an
//! ordered model fallback list. Cold models answer 503 with an estimated
//! warm-up time, which is honored within bounds.

use crate::error::{ShortForgeError, ShortForgeResult};
use crate::ports::ImageGenPort;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

const DEFAULT_MODELS: &[&str] = &[
    "stabilityai/stable-diffusion-xl-base-1.0",
    "stabilityai/stable-diffusion-2-1",
    "stabilityai/sd-turbo",
];

const MAX_PROMPT_CHARS: usize = 600;

/// Hugging Face image generation client
pub struct HuggingFaceImageGen {
    client: reqwest::Client,
    token: String,
    models: Vec<String>,
    retries_per_model: usize,
    default_wait: Duration,
}

impl HuggingFaceImageGen {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            retries_per_model: 2,
            default_wait: Duration::from_secs(6),
        }
    }

    pub fn from_secrets(token: Option<String>) -> ShortForgeResult<Self> {
        token
            .map(Self::new)
            .ok_or_else(|| ShortForgeError::MissingCredentials {
                provider: "Hugging Face".to_string(),
                env_var: "HF_TOKEN".to_string(),
            })
    }
}

/// Build a theme-agnostic illustration prompt pair (positive, negative)
/// from a narration sentence. The sentence is embedded verbatim; the
/// style framing avoids photographic realism and any rendered text.
pub fn build_image_prompt(sentence: &str) -> (String, String) {
    let cleaned: String = sentence
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .filter(|c| !matches!(c, '¿' | '?' | '¡' | '!'))
        .collect();

    let base_style = "clean conceptual illustration, minimal infographic, isometric elements, \
                      soft studio lighting, neutral background, high detail, 9:16 aspect ratio, \
                      no caption text, no watermark";
    let mut prompt = format!(
        "{}. Depict the concept described here (do not write any words): \"{}\"",
        base_style, cleaned
    );
    if prompt.chars().count() > MAX_PROMPT_CHARS {
        prompt = prompt.chars().take(MAX_PROMPT_CHARS).collect();
    }

    let negative = "blood, gore, violence, injury, surgery, organs, realistic human flesh, \
                    nsfw, nudity, offensive, disturbing, scary, horror, \
                    photographic realism, photo, render artifacts, watermark, logo, signature, \
                    text, captions, subtitles, lowres, blurry, deformed, distorted, extra limbs"
        .to_string();

    (prompt, negative)
}

#[async_trait]
impl ImageGenPort for HuggingFaceImageGen {
    async fn generate(&self, sentence: &str, dest: &Path) -> ShortForgeResult<PathBuf> {
        let (prompt, negative) = build_image_prompt(sentence);
        let payload = json!({
            "inputs": prompt,
            "parameters": {
                "negative_prompt": negative,
                "num_inference_steps": 28,
                "guidance_scale": 7.0,
            },
        });

        for model in &self.models {
            let url = format!("https://api-inference.huggingface.co/models/{}", model);
            debug!(model, "trying image model");

            for attempt in 1..=self.retries_per_model {
                let response = match self
                    .client
                    .post(&url)
                    .bearer_auth(&self.token)
                    .json(&payload)
                    .send()
                    .await
                {
                    Ok(r) => r,
                    Err(e) => {
                        warn!(model, attempt, "image request failed: {}", e);
                        tokio::time::sleep(self.default_wait).await;
                        continue;
                    }
                };

                match response.status() {
                    StatusCode::SERVICE_UNAVAILABLE => {
                        let wait = warmup_wait(response.json().await.ok(), self.default_wait);
                        debug!(model, wait_secs = wait.as_secs(), "model warming up");
                        tokio::time::sleep(wait).await;
                    }
                    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                        warn!(model, status = %response.status(), "model unavailable, skipping");
                        break;
                    }
                    status if status.is_success() => {
                        let bytes = response.bytes().await?;
                        if let Some(parent) = dest.parent() {
                            tokio::fs::create_dir_all(parent).await?;
                        }
                        tokio::fs::write(dest, &bytes).await?;
                        info!(model, dest = %dest.display(), "image generated");
                        return Ok(dest.to_path_buf());
                    }
                    status => {
                        warn!(model, attempt, %status, "image request rejected");
                        tokio::time::sleep(self.default_wait).await;
                    }
                }
            }
        }
        Err(ShortForgeError::ProviderExhausted {
            provider: "Hugging Face image generation".to_string(),
        })
    }
}

/// Warm-up wait derived from the reported `estimated_time`, clamped to
/// a 3..=20 second window.
fn warmup_wait(body: Option<serde_json::Value>, default_wait: Duration) -> Duration {
    let estimated = body
        .as_ref()
        .and_then(|v| v.get("estimated_time"))
        .and_then(|v| v.as_f64())
        .unwrap_or(default_wait.as_secs_f64());
    Duration::from_secs((estimated as u64).clamp(3, 20))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_strips_question_marks_and_caps_length() {
        let (prompt, negative) = build_image_prompt("¿Qué   es   la glucosa?");
        assert!(prompt.contains("\"Qué es la glucosa\""));
        assert!(!prompt.contains('¿'));
        assert!(negative.contains("watermark"));

        let long_sentence = "palabra ".repeat(200);
        let (prompt, _) = build_image_prompt(&long_sentence);
        assert!(prompt.chars().count() <= MAX_PROMPT_CHARS);
    }

    #[test]
    fn test_warmup_wait_clamps() {
        let wait = warmup_wait(Some(json!({"estimated_time": 120.0})), Duration::from_secs(6));
        assert_eq!(wait, Duration::from_secs(20));
        let wait = warmup_wait(Some(json!({"estimated_time": 1.0})), Duration::from_secs(6));
        assert_eq!(wait, Duration::from_secs(3));
        let wait = warmup_wait(None, Duration::from_secs(6));
        assert_eq!(wait, Duration::from_secs(6));
    }
}
