use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use async_trait::async_trait;
use log::debug;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::app_config::SpeechConfig;
use crate::errors::SpeechError;
use crate::file_utils::FileManager;
use crate::speech::{AudioClip, SpeechBackend};

// @module: Local Piper TTS backend

// @const: en_GB male voice names probed inside the voices directory
const VOICE_CANDIDATES: [&str; 3] = ["northern_english_male", "alan", "aru"];

// @const: Environment override for the voice model path
const VOICE_PATH_ENV: &str = "PIPER_VOICE_PATH";

/// Piper backend shelling out to the `piper` binary
#[derive(Debug)]
pub struct PiperBackend {
    /// Voice model (.onnx)
    voice_model: PathBuf,

    /// Sidecar voice config (.onnx.json)
    voice_config: PathBuf,

    /// Synthesis timeout
    timeout: Duration,
}

impl PiperBackend {
    /// Discover an installed voice model, if any.
    ///
    /// Resolution order: PIPER_VOICE_PATH, the configured voice path, then
    /// a scan of the voices directory (and the per-user data directory)
    /// for the known en_GB male voices. A model only counts when its
    /// sidecar .onnx.json config sits next to it.
    pub fn discover(config: &SpeechConfig) -> Option<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);

        if let Ok(env_path) = std::env::var(VOICE_PATH_ENV) {
            let env_path = env_path.trim();
            if !env_path.is_empty() {
                if let Some(backend) = Self::from_model_path(Path::new(env_path), timeout) {
                    return Some(backend);
                }
            }
        }

        if let Some(voice_path) = &config.voice_path {
            if let Some(backend) = Self::from_model_path(Path::new(voice_path), timeout) {
                return Some(backend);
            }
        }

        let mut search_dirs = vec![PathBuf::from(&config.voices_dir)];
        if let Some(data_dir) = dirs::data_dir() {
            search_dirs.push(data_dir.join("lexishadow").join("voices"));
        }

        for dir in search_dirs {
            if !FileManager::dir_exists(&dir) {
                continue;
            }
            let models = FileManager::find_files(&dir, "onnx").unwrap_or_default();
            for name in VOICE_CANDIDATES {
                for model in &models {
                    let stem = model.file_name().map(|n| n.to_string_lossy().to_string());
                    if stem.map(|s| s.contains(name)).unwrap_or(false) {
                        if let Some(backend) = Self::from_model_path(model, timeout) {
                            return Some(backend);
                        }
                    }
                }
            }
        }

        None
    }

    // @creates: Backend from a model path when the sidecar config exists
    fn from_model_path(path: &Path, timeout: Duration) -> Option<Self> {
        let model = if path.extension().map(|e| e == "onnx").unwrap_or(false) {
            path.to_path_buf()
        } else {
            path.with_extension("onnx")
        };

        if !FileManager::file_exists(&model) {
            return None;
        }

        // Sidecar config is the model path with .json appended (x.onnx.json).
        let mut config_name = model.as_os_str().to_os_string();
        config_name.push(".json");
        let config = PathBuf::from(config_name);
        if !FileManager::file_exists(&config) {
            return None;
        }

        Some(Self {
            voice_model: model,
            voice_config: config,
            timeout,
        })
    }

    /// Short name of the discovered voice, for logging
    pub fn voice_name(&self) -> String {
        self.voice_model
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.voice_model.display().to_string())
    }
}

#[async_trait]
impl SpeechBackend for PiperBackend {
    fn name(&self) -> &'static str {
        "piper"
    }

    /// Render text to WAV through the piper binary.
    ///
    /// Piper has no usable rate parameter, so `rate` is ignored here; the
    /// service only routes requests near rate 1.0 to this backend.
    async fn synthesize(&self, text: &str, _rate: f32) -> Result<AudioClip, SpeechError> {
        let scratch = tempfile::tempdir()
            .map_err(|e| SpeechError::SynthesisFailed(format!("Scratch dir failed: {}", e)))?;
        let wav_path = scratch.path().join("speech.wav");

        let mut child = Command::new("piper")
            .arg("--model")
            .arg(&self.voice_model)
            .arg("--config")
            .arg(&self.voice_config)
            .arg("--output_file")
            .arg(&wav_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SpeechError::SynthesisFailed(format!("Failed to run piper: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| SpeechError::SynthesisFailed(format!("Failed to feed piper: {}", e)))?;
            drop(stdin);
        }

        // Timeout guards against piper hanging on pathological input.
        let output = tokio::select! {
            result = child.wait_with_output() => {
                result.map_err(|e| SpeechError::SynthesisFailed(format!("piper did not finish: {}", e)))?
            },
            _ = tokio::time::sleep(self.timeout) => {
                return Err(SpeechError::SynthesisFailed(
                    format!("piper timed out after {} seconds", self.timeout.as_secs())
                ));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let first_line = stderr.lines().next().unwrap_or("unknown error");
            return Err(SpeechError::SynthesisFailed(format!("piper failed: {}", first_line)));
        }

        let wav_bytes = std::fs::read(&wav_path)
            .map_err(|e| SpeechError::SynthesisFailed(format!("No piper output: {}", e)))?;
        if wav_bytes.is_empty() {
            return Err(SpeechError::SynthesisFailed("Piper produced no audio".to_string()));
        }

        debug!("Piper rendered {} bytes of WAV", wav_bytes.len());
        Ok(AudioClip {
            bytes: wav_bytes.into(),
            mime: "audio/wav",
        })
    }
}
