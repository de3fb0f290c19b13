use crate::labels::{AudioMap, LabelSet};
use chrono::Offset;
use std::time::Duration;

const BUCKET_URL: &str = "https://storage.googleapis.com/model-art";

#[derive(Debug, Clone, PartialEq)]
pub struct WebcamConfig {
    pub width: u32,
    pub height: u32,
    pub flip: bool,
}

impl Default for WebcamConfig {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
            flip: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(not(feature = "backend-tract"), allow(dead_code))]
pub struct ModelConfig {
    pub model_path: String,
    pub metadata_path: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: "./model/model.onnx".to_string(),
            metadata_path: "./model/metadata.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AudioPlayerConfig {
    Fake,
    /// External player; the media URI is appended as the last argument.
    Command { program: String, args: Vec<String> },
}

impl Default for AudioPlayerConfig {
    fn default() -> Self {
        AudioPlayerConfig::Command {
            program: "ffplay".to_string(),
            args: vec![
                "-nodisp".to_string(),
                "-autoexit".to_string(),
                "-loglevel".to_string(),
                "quiet".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub labels: Vec<String>,
    pub audio_files: Vec<(String, String)>,
    pub confidence_threshold: f32,
    pub frame_interval: Duration,
    pub webcam: WebcamConfig,
    #[cfg_attr(not(feature = "backend-tract"), allow(dead_code))]
    pub model: ModelConfig,
    pub audio_player: AudioPlayerConfig,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            labels: vec![
                "Autoretrato".to_string(),
                "La Calle de".to_string(),
                "Minas sobre".to_string(),
                "Popocatepetl".to_string(),
            ],
            audio_files: vec![
                ("Autoretrato".to_string(), audio_url("4.wav")),
                ("La Calle de".to_string(), audio_url("1.wav")),
                ("Minas sobre".to_string(), audio_url("8.wav")),
                ("Popocatepetl".to_string(), audio_url("2.wav")),
            ],
            confidence_threshold: 0.7,
            frame_interval: Duration::from_millis(16),
            webcam: WebcamConfig::default(),
            model: ModelConfig::default(),
            audio_player: AudioPlayerConfig::default(),
            logger_timezone: mexico_city_time(),
        }
    }
}

impl Config {
    pub fn label_set(&self) -> LabelSet {
        LabelSet::new(self.labels.clone())
    }

    pub fn audio_map(&self) -> AudioMap {
        self.audio_files.iter().cloned().collect()
    }
}

fn audio_url(file_name: &str) -> String {
    format!("{}/Audios/{}", BUCKET_URL, file_name)
}

fn mexico_city_time() -> chrono::FixedOffset {
    chrono::FixedOffset::west_opt(6 * 3600).unwrap_or_else(|| chrono::Utc.fix())
}
