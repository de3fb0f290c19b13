use crate::config::WebcamConfig;
use crate::error::AppError;
use crate::library::logger::interface::Logger;
use crate::webcam::frame::Frame;
use crate::webcam::interface::Webcam;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct State {
    is_setup: bool,
    is_playing: bool,
    frame_count: u64,
    canvas: Option<Frame>,
}

/// Produces a moving gradient instead of camera images.
pub struct WebcamFake {
    config: WebcamConfig,
    state: Mutex<State>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl WebcamFake {
    pub fn new(config: WebcamConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            config,
            state: Mutex::new(State::default()),
            logger: logger.with_namespace("webcam").with_namespace("fake"),
        }
    }

    fn state(&self) -> Result<MutexGuard<'_, State>, Box<dyn std::error::Error + Send + Sync>> {
        self.state.lock().map_err(|e| e.to_string().into())
    }

    fn draw(&self, frame_count: u64) -> Frame {
        let shift = (frame_count % 256) as u32;
        let frame = Frame::from_fn(self.config.width, self.config.height, |x, y| {
            [
                ((x + shift) % 256) as u8,
                (y % 256) as u8,
                ((x + y) % 256) as u8,
            ]
        });
        if self.config.flip {
            frame.mirrored()
        } else {
            frame
        }
    }
}

impl Webcam for WebcamFake {
    fn setup(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!(
            "Setting up {}x{} webcam (flip: {})",
            self.config.width, self.config.height, self.config.flip
        ))?;
        self.state()?.is_setup = true;
        Ok(())
    }

    fn play(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut state = self.state()?;
        if !state.is_setup {
            return Err(Box::new(AppError::CaptureNotReady));
        }
        state.is_playing = true;
        drop(state);
        self.logger.info("Webcam playing")?;
        Ok(())
    }

    fn update(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let frame_count = {
            let state = self.state()?;
            if !state.is_playing {
                return Err(Box::new(AppError::CaptureNotReady));
            }
            state.frame_count
        };
        let frame = self.draw(frame_count);
        let mut state = self.state()?;
        state.frame_count += 1;
        state.canvas = Some(frame);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.state
            .lock()
            .map(|state| state.is_setup && state.is_playing)
            .unwrap_or(false)
    }

    fn canvas(&self) -> Result<Frame, Box<dyn std::error::Error + Send + Sync>> {
        match &self.state()?.canvas {
            Some(frame) => Ok(frame.clone()),
            None => Err(Box::new(AppError::CanvasEmpty)),
        }
    }
}
