use crate::error::AppError;
use crate::library::logger::interface::Logger;
use crate::playback::interface::{AudioBackend, AudioHandle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
pub struct AudioBackendFake {
    opened: Arc<AtomicUsize>,
    played: Arc<Mutex<Vec<String>>>,
    start_delay: Duration,
    fail: bool,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl AudioBackendFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            opened: Arc::new(AtomicUsize::new(0)),
            played: Arc::new(Mutex::new(Vec::new())),
            start_delay: Duration::ZERO,
            fail: false,
            logger: logger.with_namespace("audio").with_namespace("fake"),
        }
    }

    #[cfg(test)]
    pub fn failing(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            fail: true,
            ..Self::new(logger)
        }
    }

    #[cfg(test)]
    pub fn with_start_delay(self, start_delay: Duration) -> Self {
        Self {
            start_delay,
            ..self
        }
    }

    #[cfg(test)]
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    pub fn played(&self) -> Vec<String> {
        self.played.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl AudioBackend for AudioBackendFake {
    fn open(
        &self,
        uri: &str,
    ) -> Result<Box<dyn AudioHandle>, Box<dyn std::error::Error + Send + Sync>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(AudioHandleFake {
            uri: uri.to_string(),
            played: Arc::clone(&self.played),
            start_delay: self.start_delay,
            fail: self.fail,
            logger: Arc::clone(&self.logger),
        }))
    }
}

struct AudioHandleFake {
    uri: String,
    played: Arc<Mutex<Vec<String>>>,
    start_delay: Duration,
    fail: bool,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl AudioHandle for AudioHandleFake {
    fn play(self: Box<Self>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let AudioHandleFake {
            uri,
            played,
            start_delay,
            fail,
            logger,
        } = *self;

        std::thread::sleep(start_delay);

        if fail {
            return Err(Box::new(AppError::Playback {
                uri,
                reason: "playback was not allowed".to_string(),
            }));
        }

        logger.info(&format!("Pretending to play {}", uri))?;
        played.lock().map_err(|e| e.to_string())?.push(uri);
        Ok(())
    }
}
