use crate::image_classifier::interface::{ImageClassifier, Prediction};
use crate::library::logger::interface::Logger;
use crate::webcam::frame::Frame;
use rand::distr::{Distribution, Uniform};
use std::sync::Arc;

/// Returns a random distribution over its classes on every frame.
pub struct ImageClassifierFake {
    class_names: Vec<String>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierFake {
    pub fn new(class_names: Vec<String>, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            class_names,
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
        }
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn total_classes(&self) -> usize {
        self.class_names.len()
    }

    fn predict(
        &self,
        frame: &Frame,
    ) -> Result<Vec<Prediction>, Box<dyn std::error::Error + Send + Sync>> {
        let mut rng = rand::rng();

        let weight_dist = Uniform::new(0.0f32, 1.0)?;

        // cubing skews the mass toward one class, so some frames clear the threshold
        let weights: Vec<f32> = self
            .class_names
            .iter()
            .map(|_| weight_dist.sample(&mut rng).powi(3))
            .collect();
        let total: f32 = weights.iter().sum();

        let predictions = self
            .class_names
            .iter()
            .zip(weights)
            .map(|(class_name, weight)| Prediction {
                class_name: class_name.clone(),
                probability: if total > 0.0 { weight / total } else { 0.0 },
            })
            .collect();

        self.logger.info(&format!(
            "Classified {}x{} frame",
            frame.width(),
            frame.height()
        ))?;

        Ok(predictions)
    }
}
