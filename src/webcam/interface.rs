use crate::webcam::frame::Frame;

pub trait Webcam: Send + Sync {
    fn setup(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn play(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    /// Draws the latest camera image onto the canvas.
    fn update(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn is_ready(&self) -> bool;
    fn canvas(&self) -> Result<Frame, Box<dyn std::error::Error + Send + Sync>>;
}
