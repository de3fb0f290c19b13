use crate::image_classifier::interface::Prediction;
use crate::labels::AudioMap;

#[derive(Debug, Clone, PartialEq)]
pub struct BestMatch {
    pub label: String,
    pub probability: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Play {
        label: String,
        probability: f32,
        uri: String,
    },
    NoMatch,
    Unmapped {
        label: String,
        probability: f32,
    },
    BelowThreshold {
        label: String,
        probability: f32,
    },
}

/// Highest probability wins; on ties the earliest label is kept.
/// Returns `None` when nothing is above zero.
pub fn select_best_match(predictions: &[Prediction]) -> Option<BestMatch> {
    let mut max_probability = 0.0f32;
    let mut best_match: Option<&Prediction> = None;

    for prediction in predictions {
        if prediction.probability > max_probability {
            max_probability = prediction.probability;
            best_match = Some(prediction);
        }
    }

    best_match.map(|prediction| BestMatch {
        label: prediction.class_name.clone(),
        probability: prediction.probability,
    })
}

pub fn decide(best_match: Option<BestMatch>, audio_map: &AudioMap, threshold: f32) -> Decision {
    let BestMatch { label, probability } = match best_match {
        Some(best_match) if !best_match.label.is_empty() => best_match,
        _ => return Decision::NoMatch,
    };

    let uri = match audio_map.get(&label) {
        Some(uri) => uri.to_string(),
        None => return Decision::Unmapped { label, probability },
    };

    if probability > threshold {
        Decision::Play {
            label,
            probability,
            uri,
        }
    } else {
        Decision::BelowThreshold { label, probability }
    }
}
