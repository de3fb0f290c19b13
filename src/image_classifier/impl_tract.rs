use crate::config::ModelConfig;
use crate::image_classifier::interface::{ImageClassifier, Prediction};
use crate::image_classifier::metadata::ModelMetadata;
use crate::image_classifier::tract::image::frame_to_tensor;
use crate::library::logger::interface::Logger;
use crate::webcam::frame::Frame;
use std::sync::Arc;
use tract_onnx::prelude::*;

/// Image model exported to ONNX, labelled by its `metadata.json`.
pub struct ImageClassifierTract {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    metadata: ModelMetadata,
}

impl ImageClassifierTract {
    pub fn load(
        config: &ModelConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let logger = logger.with_namespace("image_classifier").with_namespace("tract");

        logger.info(&format!("Loading model from {}...", config.model_path))?;

        let metadata = ModelMetadata::from_path(&config.metadata_path)?;
        let size = metadata.image_size as usize;

        let model = tract_onnx::onnx()
            .model_for_path(&config.model_path)?
            .with_input_fact(0, f32::fact([1, size, size, 3]).into())?
            .into_optimized()?
            .into_runnable()?;

        logger.info(&format!(
            "Model {} loaded with {} classes (tm {})",
            metadata.model_name.as_deref().unwrap_or("unnamed"),
            metadata.labels.len(),
            metadata.tm_version.as_deref().unwrap_or("unknown"),
        ))?;

        Ok(Self { model, metadata })
    }
}

impl ImageClassifier for ImageClassifierTract {
    fn total_classes(&self) -> usize {
        self.metadata.labels.len()
    }

    fn predict(
        &self,
        frame: &Frame,
    ) -> Result<Vec<Prediction>, Box<dyn std::error::Error + Send + Sync>> {
        let input = frame_to_tensor(frame, self.metadata.image_size)?;

        let outputs = self.model.run(tvec!(input.into_tvalue()))?;
        let output = outputs
            .first()
            .ok_or("model produced no output")?
            .to_array_view::<f32>()?;

        Ok(self
            .metadata
            .labels
            .iter()
            .zip(output.iter())
            .map(|(class_name, probability)| Prediction {
                class_name: class_name.clone(),
                probability: *probability,
            })
            .collect())
    }
}
