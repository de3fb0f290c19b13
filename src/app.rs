use crate::config::Config;
use crate::error::AppError;
use crate::image_classifier::adapter::ClassifierAdapter;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use crate::playback::interface::AudioBackend;
use crate::playback::trigger::PlaybackTrigger;
use crate::scheduler::main::Scheduler;
use crate::webcam::interface::Webcam;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Everything the loop needs, set up once at startup and read-only afterwards.
pub struct App {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    webcam: Arc<dyn Webcam + Send + Sync>,
    image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    audio_backend: Arc<dyn AudioBackend + Send + Sync>,
}

impl App {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        webcam: Arc<dyn Webcam + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        audio_backend: Arc<dyn AudioBackend + Send + Sync>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("app"),
            webcam,
            image_classifier,
            audio_backend,
        }
    }

    /// Validates the model against the labels and brings up the webcam.
    /// Any error here is fatal: no tick runs.
    pub fn setup(&self) -> Result<Scheduler, Box<dyn std::error::Error + Send + Sync>> {
        let labels = Arc::new(self.config.label_set());
        let audio_map = Arc::new(self.config.audio_map());

        if labels.is_empty() {
            self.logger.warn("No labels configured, nothing will ever play")?;
        }

        for label in audio_map.unknown_labels(&labels) {
            self.logger.warn(&format!(
                "Audio configured for unknown label \"{}\", it will never play",
                label
            ))?;
        }

        let classifier = ClassifierAdapter::new(Arc::clone(&self.image_classifier), labels)?;
        self.logger.info(&format!(
            "Model ready with {} classes",
            self.image_classifier.total_classes()
        ))?;

        self.webcam.setup()?;
        self.webcam.play()?;
        if !self.webcam.is_ready() {
            return Err(Box::new(AppError::CaptureNotReady));
        }
        self.logger.info("Webcam ready")?;

        Ok(Scheduler::new(
            self.config.frame_interval,
            self.config.confidence_threshold,
            Arc::clone(&self.webcam),
            classifier,
            audio_map,
            PlaybackTrigger::new(Arc::clone(&self.audio_backend), Arc::clone(&self.logger)),
            Arc::clone(&self.logger),
        ))
    }

    pub fn start(
        &self,
        running: &AtomicBool,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let scheduler = self.setup()?;

        self.logger.info("Starting capture loop...")?;
        scheduler.run(running);

        Ok(())
    }
}
