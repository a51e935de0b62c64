use std::time::Duration;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use url::Url;

use crate::app_config::SpeechConfig;
use crate::errors::SpeechError;
use crate::language_utils;
use crate::speech::{AudioClip, SpeechBackend, SLOW_RATE_THRESHOLD};

// @module: Google Translate TTS fallback backend

// @const: Public translate_tts endpoint
const TRANSLATE_TTS_ENDPOINT: &str = "https://translate.google.com/translate_tts";

// @const: ttsspeed value used for slow playback
const SLOW_TTS_SPEED: &str = "0.3";

/// HTTP fallback backend (MP3, British English by default)
#[derive(Debug)]
pub struct GttsBackend {
    /// HTTP client for TTS requests
    client: Client,

    /// Speech locale sent as the `tl` parameter
    locale: String,
}

impl GttsBackend {
    /// Create the backend from speech settings
    pub fn new(config: &SpeechConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            locale: language_utils::to_speech_locale(&config.locale),
        }
    }

    // @builds: Request URL with the query the endpoint expects
    fn request_url(&self, text: &str, rate: f32) -> Result<Url, SpeechError> {
        let mut params = vec![
            ("ie", "UTF-8"),
            ("client", "tw-ob"),
            ("tl", self.locale.as_str()),
            ("q", text),
        ];
        if rate < SLOW_RATE_THRESHOLD {
            params.push(("ttsspeed", SLOW_TTS_SPEED));
        }

        Url::parse_with_params(TRANSLATE_TTS_ENDPOINT, &params)
            .map_err(|e| SpeechError::SynthesisFailed(format!("Bad TTS URL: {}", e)))
    }
}

#[async_trait]
impl SpeechBackend for GttsBackend {
    fn name(&self) -> &'static str {
        "gtts"
    }

    /// Fetch MP3 audio for the text.
    async fn synthesize(&self, text: &str, rate: f32) -> Result<AudioClip, SpeechError> {
        let url = self.request_url(text, rate)?;

        let response = self.client
            .get(url)
            .send()
            .await
            .map_err(|e| SpeechError::SynthesisFailed(format!("TTS request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpeechError::SynthesisFailed(format!(
                "TTS endpoint answered {}",
                status
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SpeechError::SynthesisFailed(format!("TTS body read failed: {}", e)))?;
        if audio.is_empty() {
            return Err(SpeechError::SynthesisFailed("TTS endpoint returned no audio".to_string()));
        }

        debug!("Fallback TTS rendered {} bytes of MP3", audio.len());
        Ok(AudioClip {
            bytes: audio,
            mime: "audio/mp3",
        })
    }
}
