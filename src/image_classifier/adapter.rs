use crate::error::AppError;
use crate::image_classifier::interface::{ImageClassifier, Prediction};
use crate::labels::LabelSet;
use crate::webcam::frame::Frame;
use std::sync::Arc;

/// Puts the configured label names on the classifier's raw output.
pub struct ClassifierAdapter {
    image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    labels: Arc<LabelSet>,
}

impl ClassifierAdapter {
    pub fn new(
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        labels: Arc<LabelSet>,
    ) -> Result<Self, AppError> {
        let actual = image_classifier.total_classes();
        if actual != labels.len() {
            return Err(AppError::ClassCountMismatch {
                expected: labels.len(),
                actual,
            });
        }
        Ok(Self {
            image_classifier,
            labels,
        })
    }

    /// Index `i` of the result is `labels[i]`.
    pub fn predict(
        &self,
        frame: &Frame,
    ) -> Result<Vec<Prediction>, Box<dyn std::error::Error + Send + Sync>> {
        let raw = self.image_classifier.predict(frame)?;

        if raw.len() != self.labels.len() {
            return Err(Box::new(AppError::PredictionLength {
                expected: self.labels.len(),
                actual: raw.len(),
            }));
        }

        Ok(self
            .labels
            .iter()
            .zip(raw)
            .map(|(label, prediction)| Prediction {
                class_name: label.to_string(),
                probability: prediction.probability,
            })
            .collect())
    }
}
