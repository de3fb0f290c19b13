use crate::decision::core::{decide, select_best_match, Decision};
use crate::image_classifier::adapter::ClassifierAdapter;
use crate::labels::AudioMap;
use crate::library::logger::interface::Logger;
use crate::playback::trigger::PlaybackTrigger;
use crate::webcam::interface::Webcam;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

pub struct Tick {
    pub decision: Decision,
    /// Detached playback thread, if this tick started one.
    pub playback: Option<JoinHandle<()>>,
}

pub struct Scheduler {
    frame_interval: Duration,
    confidence_threshold: f32,
    webcam: Arc<dyn Webcam + Send + Sync>,
    classifier: ClassifierAdapter,
    audio_map: Arc<AudioMap>,
    playback: PlaybackTrigger,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl Scheduler {
    pub fn new(
        frame_interval: Duration,
        confidence_threshold: f32,
        webcam: Arc<dyn Webcam + Send + Sync>,
        classifier: ClassifierAdapter,
        audio_map: Arc<AudioMap>,
        playback: PlaybackTrigger,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            frame_interval,
            confidence_threshold,
            webcam,
            classifier,
            audio_map,
            playback,
            logger: logger.with_namespace("scheduler"),
        }
    }

    /// Refresh, classify, decide and maybe trigger playback, once.
    pub fn tick(&self) -> Result<Tick, Box<dyn std::error::Error + Send + Sync>> {
        self.webcam.update()?;
        let frame = self.webcam.canvas()?;

        let predictions = self.classifier.predict(&frame)?;
        let decision = decide(
            select_best_match(&predictions),
            &self.audio_map,
            self.confidence_threshold,
        );

        match &decision {
            Decision::Play {
                label,
                probability,
                uri,
            } => self.logger.info(&format!(
                "Prediction: {} with probability {:.4}, playing {}",
                label, probability, uri
            ))?,
            Decision::BelowThreshold { label, probability } => self.logger.info(&format!(
                "Prediction: {} with probability {:.4}",
                label, probability
            ))?,
            Decision::Unmapped { label, probability } => self.logger.info(&format!(
                "Prediction: {} with probability {:.4}, no audio configured",
                label, probability
            ))?,
            Decision::NoMatch => self.logger.info("Prediction: none")?,
        }

        let playback = match &decision {
            Decision::Play { uri, .. } => Some(self.playback.trigger(uri)),
            _ => None,
        };

        Ok(Tick { decision, playback })
    }

    /// Runs ticks back to back, one per frame interval, until `running` is cleared.
    /// A failed tick is logged and skipped. Returns the number of ticks run.
    pub fn run(&self, running: &AtomicBool) -> u64 {
        let mut ticks = 0;
        let mut playbacks = 0;

        while running.load(Ordering::SeqCst) {
            let started = Instant::now();

            match self.tick() {
                Ok(tick) => {
                    if matches!(tick.decision, Decision::Play { .. }) {
                        playbacks += 1;
                    }
                }
                Err(e) => {
                    let _ = self.logger.error(&format!("Tick failed: {}", e));
                }
            }
            ticks += 1;

            if let Some(remaining) = self.frame_interval.checked_sub(started.elapsed()) {
                std::thread::sleep(remaining);
            }
        }

        let _ = self.logger.info(&format!(
            "Stopped after {} ticks, {} playbacks started",
            ticks, playbacks
        ));

        ticks
    }
}
