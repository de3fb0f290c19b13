use crate::library::logger::interface::Logger;
use crate::playback::interface::AudioBackend;
use std::sync::Arc;
use std::thread::JoinHandle;

/// Starts playback on a detached thread. Outcomes only reach the log.
#[derive(Clone)]
pub struct PlaybackTrigger {
    audio_backend: Arc<dyn AudioBackend + Send + Sync>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl PlaybackTrigger {
    pub fn new(
        audio_backend: Arc<dyn AudioBackend + Send + Sync>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            audio_backend,
            logger: logger.with_namespace("playback"),
        }
    }

    /// Every call opens a fresh handle, even while an earlier one is still playing.
    pub fn trigger(&self, uri: &str) -> JoinHandle<()> {
        let audio_backend = Arc::clone(&self.audio_backend);
        let logger = Arc::clone(&self.logger);
        let uri = uri.to_string();

        std::thread::spawn(move || {
            let result = audio_backend
                .open(&uri)
                .and_then(|handle| handle.play());

            let _ = match result {
                Ok(()) => logger.info(&format!("Playing: {}", uri)),
                Err(e) => logger.error(&format!("Error playing audio: {}", e)),
            };
        })
    }
}
