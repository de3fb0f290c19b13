use app::App;
use config::{AudioPlayerConfig, Config};
use image_classifier::interface::ImageClassifier;
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use playback::impl_command::AudioBackendCommand;
use playback::impl_fake::AudioBackendFake;
use playback::interface::AudioBackend;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use webcam::impl_fake::WebcamFake;

mod app;
mod config;
mod decision;
mod error;
mod image_classifier;
mod labels;
mod library;
mod playback;
mod scheduler;
mod webcam;

#[cfg(feature = "backend-tract")]
fn load_image_classifier(
    config: &Config,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Box<dyn std::error::Error + Send + Sync>> {
    use image_classifier::impl_tract::ImageClassifierTract;

    Ok(Arc::new(ImageClassifierTract::load(&config.model, logger)?))
}

#[cfg(not(feature = "backend-tract"))]
fn load_image_classifier(
    config: &Config,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Box<dyn std::error::Error + Send + Sync>> {
    use image_classifier::impl_fake::ImageClassifierFake;

    Ok(Arc::new(ImageClassifierFake::new(config.labels.clone(), logger)))
}

fn audio_backend(
    config: &Config,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Arc<dyn AudioBackend + Send + Sync> {
    match &config.audio_player {
        AudioPlayerConfig::Fake => Arc::new(AudioBackendFake::new(logger)),
        AudioPlayerConfig::Command { program, args } => {
            Arc::new(AudioBackendCommand::new(program.clone(), args.clone()))
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::default();

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    logger.info("Loading model...")?;

    let image_classifier = match load_image_classifier(&config, logger.clone()) {
        Ok(image_classifier) => image_classifier,
        Err(e) => {
            logger.error(&format!("Failed to load model: {}", e))?;
            return Err(e);
        }
    };

    let webcam = Arc::new(WebcamFake::new(config.webcam.clone(), logger.clone()));

    let audio_backend = audio_backend(&config, logger.clone());

    let running = Arc::new(AtomicBool::new(true));
    let running_handler = Arc::clone(&running);
    ctrlc::set_handler(move || running_handler.store(false, Ordering::SeqCst))?;

    let app = App::new(config, logger.clone(), webcam, image_classifier, audio_backend);

    if let Err(e) = app.start(&running) {
        logger.error(&format!("Startup failed: {}", e))?;
        return Err(e);
    }

    Ok(())
}
