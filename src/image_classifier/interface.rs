use crate::webcam::frame::Frame;

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub class_name: String,
    pub probability: f32,
}

pub trait ImageClassifier: Send + Sync {
    fn total_classes(&self) -> usize;
    /// One entry per class, in the model's class order.
    fn predict(
        &self,
        frame: &Frame,
    ) -> Result<Vec<Prediction>, Box<dyn std::error::Error + Send + Sync>>;
}
