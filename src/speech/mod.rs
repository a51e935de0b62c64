/*!
 * Speech synthesis with a fallback chain.
 *
 * Two substitutable backends render study text to audio: a local Piper
 * voice (British English male, WAV) when a voice model can be found, and
 * the Google Translate TTS endpoint (MP3) otherwise. Piper is only used
 * for playback rates close to 1.0, since it has no rate control; any
 * Piper failure falls through to the HTTP fallback.
 */

use async_trait::async_trait;
use bytes::Bytes;
use log::{debug, warn};
use std::fmt::Debug;

use crate::app_config::SpeechConfig;
use crate::errors::SpeechError;

pub mod piper;
pub mod gtts;

use piper::PiperBackend;
use gtts::GttsBackend;

// @const: Rate window inside which Piper output sounds natural
pub const PIPER_MIN_RATE: f32 = 0.85;
pub const PIPER_MAX_RATE: f32 = 1.15;

// @const: Below this rate the fallback synthesizer switches to slow mode
pub const SLOW_RATE_THRESHOLD: f32 = 0.8;

/// Rendered audio and its MIME type
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// Encoded audio bytes
    pub bytes: Bytes,

    /// MIME type of the encoding
    pub mime: &'static str,
}

impl AudioClip {
    /// Size of the encoded audio in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when no audio was produced
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A single speech synthesis backend
#[async_trait]
pub trait SpeechBackend: Send + Sync + Debug {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// Render text to audio at the given playback rate
    async fn synthesize(&self, text: &str, rate: f32) -> Result<AudioClip, SpeechError>;
}

/// Speech service implementing the Piper-then-fallback chain
#[derive(Debug)]
pub struct SpeechService {
    /// Local Piper backend, present when a voice model was discovered
    piper: Option<PiperBackend>,

    /// HTTP fallback backend
    fallback: GttsBackend,
}

impl SpeechService {
    /// Build the service, discovering a Piper voice if one is installed
    pub fn new(config: &SpeechConfig) -> Self {
        let piper = PiperBackend::discover(config);
        match &piper {
            Some(backend) => debug!("Piper voice available: {}", backend.voice_name()),
            None => debug!("No Piper voice found, using HTTP fallback only"),
        }

        Self {
            piper,
            fallback: GttsBackend::new(config),
        }
    }

    /// True when the local high-quality backend is usable
    pub fn has_local_voice(&self) -> bool {
        self.piper.is_some()
    }

    /// Render text to audio.
    ///
    /// Empty text is rejected before any backend runs. Piper handles the
    /// request when a voice is installed and the rate sits inside its
    /// natural window; everything else, including a Piper failure, goes to
    /// the fallback. The caller only sees an error when no backend could
    /// produce audio.
    pub async fn synthesize(&self, text: &str, rate: f32) -> Result<AudioClip, SpeechError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SpeechError::EmptyText);
        }

        if let Some(piper) = &self.piper {
            if (PIPER_MIN_RATE..=PIPER_MAX_RATE).contains(&rate) {
                match piper.synthesize(text, rate).await {
                    Ok(clip) => return Ok(clip),
                    Err(e) => warn!("Piper synthesis failed, falling back: {}", e),
                }
            }
        }

        self.fallback
            .synthesize(text, rate)
            .await
            .map_err(|e| SpeechError::AllBackendsFailed(e.to_string()))
    }
}
