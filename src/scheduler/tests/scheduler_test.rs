use super::fixture::Fixture;
use crate::config::Config;
use crate::decision::core::Decision;
use crate::error::AppError;
use crate::playback::impl_fake::AudioBackendFake;
use crate::webcam::frame::Frame;
use crate::webcam::impl_fake::WebcamFake;
use crate::webcam::interface::Webcam;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn scripted(probabilities: &[&[f32]]) -> Vec<Result<Vec<f32>, String>> {
    probabilities.iter().map(|p| Ok(p.to_vec())).collect()
}

#[test]
fn test_tick_plays_first_label_at_max() {
    let f = Fixture::new(scripted(&[&[0.2, 0.85, 0.85]]));
    let scheduler = f.app().setup().unwrap();

    let tick = scheduler.tick().unwrap();

    assert_eq!(
        tick.decision,
        Decision::Play {
            label: "B".to_string(),
            probability: 0.85,
            uri: "url1".to_string()
        }
    );
    tick.playback.unwrap().join().unwrap();
    assert_eq!(f.audio_backend.played(), vec!["url1".to_string()]);
    assert!(f.logger.contains("Prediction: B with probability 0.8500"));
}

#[test]
fn test_tick_all_zero_plays_nothing() {
    let f = Fixture::new(scripted(&[&[0.0, 0.0, 0.0]]));
    let scheduler = f.app().setup().unwrap();

    let tick = scheduler.tick().unwrap();

    assert_eq!(tick.decision, Decision::NoMatch);
    assert!(tick.playback.is_none());
    assert_eq!(f.audio_backend.opened(), 0);
}

#[test]
fn test_tick_confident_without_audio_plays_nothing() {
    let config = Config {
        audio_files: vec![],
        ..Fixture::config()
    };
    let f = Fixture::with_config(config, scripted(&[&[0.9, 0.05, 0.05]]));
    let scheduler = f.app().setup().unwrap();

    let tick = scheduler.tick().unwrap();

    assert!(matches!(tick.decision, Decision::Unmapped { .. }));
    assert!(tick.playback.is_none());
}

#[test]
fn test_tick_at_threshold_plays_nothing() {
    let f = Fixture::new(scripted(&[&[0.0, 0.7, 0.3]]));
    let scheduler = f.app().setup().unwrap();

    let tick = scheduler.tick().unwrap();

    assert!(matches!(tick.decision, Decision::BelowThreshold { .. }));
    assert!(tick.playback.is_none());
}

#[test]
fn test_consecutive_confident_ticks_each_play() {
    let f = Fixture::new(scripted(&[&[0.0, 0.0, 0.9], &[0.0, 0.0, 0.9]]));
    let scheduler = f.app().setup().unwrap();

    let first = scheduler.tick().unwrap();
    let second = scheduler.tick().unwrap();
    first.playback.unwrap().join().unwrap();
    second.playback.unwrap().join().unwrap();

    assert_eq!(f.audio_backend.opened(), 2);
    assert_eq!(
        f.audio_backend.played(),
        vec!["url2".to_string(), "url2".to_string()]
    );
}

#[test]
fn test_tick_redraws_webcam_before_classifying() {
    let f = Fixture::new(scripted(&[&[0.1, 0.1, 0.1]]));
    let scheduler = f.app().setup().unwrap();

    assert!(f.webcam.canvas().is_err());

    scheduler.tick().unwrap();

    assert!(f.webcam.canvas().is_ok());
    assert_eq!(f.image_classifier.calls(), 1);
}

#[test]
fn test_tick_propagates_classifier_error() {
    let f = Fixture::new(vec![Err("classifier offline".to_string())]);
    let scheduler = f.app().setup().unwrap();

    let error = scheduler.tick().err().unwrap();

    assert_eq!(error.to_string(), "classifier offline");
    assert_eq!(f.audio_backend.opened(), 0);
}

#[test]
fn test_run_skips_failed_ticks_and_continues() {
    let f = Fixture::new(vec![
        Err("classifier offline".to_string()),
        Ok(vec![0.9]),
        Ok(vec![0.05, 0.9, 0.05]),
    ]);
    let scheduler = f.app().setup().unwrap();

    let ticks = scheduler.run(&f.running);

    assert_eq!(ticks, 3);
    assert_eq!(f.image_classifier.calls(), 3);
    assert!(f.logger.contains("ERROR app:scheduler: Tick failed: classifier offline"));
    assert!(f.logger.contains("classifier returned 1 probabilities, expected 3"));
    assert!(f.wait_until(|f| f.audio_backend.played() == vec!["url1".to_string()]));
}

#[test]
fn test_run_never_overlaps_classification() {
    let script = (0..20).map(|_| Ok(vec![0.0, 0.0, 0.95])).collect();
    let f = Fixture::new(script);
    let scheduler = f.app().setup().unwrap();

    let ticks = scheduler.run(&f.running);

    assert_eq!(ticks, 20);
    assert!(!f.image_classifier.overlapped());
    assert!(f.wait_until(|f| f.audio_backend.played().len() == 20));
}

#[test]
fn test_run_stops_when_running_is_cleared() {
    let f = Fixture::new(scripted(&[&[0.1, 0.1, 0.1]]));
    let scheduler = f.app().setup().unwrap();
    f.running.store(false, Ordering::SeqCst);

    let ticks = scheduler.run(&f.running);

    assert_eq!(ticks, 0);
    assert_eq!(f.image_classifier.calls(), 0);
}

#[test]
fn test_playback_failure_does_not_affect_later_ticks() {
    let mut f = Fixture::new(scripted(&[&[0.0, 0.9, 0.1], &[0.0, 0.1, 0.9]]));
    f.audio_backend = AudioBackendFake::failing(Arc::new(f.logger.clone()));
    let scheduler = f.app().setup().unwrap();

    let ticks = scheduler.run(&f.running);

    assert_eq!(ticks, 2);
    assert!(f.wait_until(|f| {
        f.logger
            .lines()
            .iter()
            .filter(|line| line.contains("ERROR app:playback: Error playing audio"))
            .count()
            == 2
    }));
    assert_eq!(f.audio_backend.opened(), 2);
}

#[test]
fn test_setup_rejects_class_count_mismatch() {
    let config = Config {
        labels: vec!["A".to_string(), "B".to_string()],
        ..Fixture::config()
    };
    let mut f = Fixture::with_config(config, scripted(&[&[0.9, 0.1]]));
    f.image_classifier = Arc::new(super::fixture::ImageClassifierScripted::new(
        3,
        vec![],
        Arc::clone(&f.running),
    ));

    let error = f.app().start(&f.running).err().unwrap();

    assert!(matches!(
        error.downcast_ref::<AppError>(),
        Some(AppError::ClassCountMismatch {
            expected: 2,
            actual: 3
        })
    ));
    assert_eq!(f.image_classifier.calls(), 0);
    assert!(!f.webcam.is_ready());
}

struct WebcamUnavailable;

impl Webcam for WebcamUnavailable {
    fn setup(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }

    fn play(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }

    fn update(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(AppError::CaptureNotReady))
    }

    fn is_ready(&self) -> bool {
        false
    }

    fn canvas(&self) -> Result<Frame, Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(AppError::CanvasEmpty))
    }
}

#[test]
fn test_setup_rejects_webcam_that_is_not_ready() {
    let f = Fixture::new(scripted(&[&[0.9, 0.0, 0.0]]));
    let app = crate::app::App::new(
        f.config.clone(),
        Arc::new(f.logger.clone()),
        Arc::new(WebcamUnavailable),
        f.image_classifier.clone(),
        Arc::new(f.audio_backend.clone()),
    );

    let error = app.start(&f.running).err().unwrap();

    assert!(matches!(
        error.downcast_ref::<AppError>(),
        Some(AppError::CaptureNotReady)
    ));
    assert_eq!(f.image_classifier.calls(), 0);
}

#[test]
fn test_setup_warns_about_audio_for_unknown_labels() {
    let config = Config {
        audio_files: vec![("Z".to_string(), "z.wav".to_string())],
        ..Fixture::config()
    };
    let f = Fixture::with_config(config, vec![]);

    f.app().setup().unwrap();

    assert!(f
        .logger
        .contains("WARN app: Audio configured for unknown label \"Z\", it will never play"));
}

#[test]
fn test_tick_returns_before_playback_starts() {
    let mut f = Fixture::new(scripted(&[&[0.1, 0.8, 0.1]]));
    f.audio_backend = AudioBackendFake::new(Arc::new(f.logger.clone()))
        .with_start_delay(Duration::from_millis(300));
    let scheduler = f.app().setup().unwrap();

    let started = Instant::now();
    let tick = scheduler.tick().unwrap();

    assert!(started.elapsed() < Duration::from_millis(200));
    assert!(f.audio_backend.played().is_empty());

    tick.playback.unwrap().join().unwrap();
    assert_eq!(f.audio_backend.played(), vec!["url1".to_string()]);
}

/// Fails `update` on the listed calls, draws normally otherwise.
struct WebcamFlaky {
    webcam: WebcamFake,
    failing_updates: Vec<usize>,
    updates: AtomicUsize,
}

impl Webcam for WebcamFlaky {
    fn setup(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.webcam.setup()
    }

    fn play(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.webcam.play()
    }

    fn update(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let update = self.updates.fetch_add(1, Ordering::SeqCst);
        if self.failing_updates.contains(&update) {
            return Err("camera frame dropped".into());
        }
        self.webcam.update()
    }

    fn is_ready(&self) -> bool {
        self.webcam.is_ready()
    }

    fn canvas(&self) -> Result<Frame, Box<dyn std::error::Error + Send + Sync>> {
        self.webcam.canvas()
    }
}

#[test]
fn test_run_skips_failed_refresh_and_continues() {
    let f = Fixture::new(scripted(&[&[0.1, 0.1, 0.1], &[0.05, 0.9, 0.05]]));
    let webcam = WebcamFlaky {
        webcam: WebcamFake::new(f.config.webcam.clone(), Arc::new(f.logger.clone())),
        failing_updates: vec![0],
        updates: AtomicUsize::new(0),
    };
    let app = crate::app::App::new(
        f.config.clone(),
        Arc::new(f.logger.clone()),
        Arc::new(webcam),
        f.image_classifier.clone(),
        Arc::new(f.audio_backend.clone()),
    );
    let scheduler = app.setup().unwrap();

    let ticks = scheduler.run(&f.running);

    assert_eq!(ticks, 3);
    assert_eq!(f.image_classifier.calls(), 2);
    assert!(f.logger.contains("ERROR app:scheduler: Tick failed: camera frame dropped"));
    assert!(f.wait_until(|f| f.audio_backend.played() == vec!["url1".to_string()]));
    assert!(f.logger.contains("Stopped after 3 ticks, 1 playbacks started"));
}
