use std::collections::HashMap;

/// Ordered class names. Index `i` lines up with index `i` of every prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

/// Label to media URI. Labels without an entry never trigger playback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioMap {
    files: HashMap<String, String>,
}

impl AudioMap {
    pub fn get(&self, label: &str) -> Option<&str> {
        self.files.get(label).map(String::as_str)
    }

    /// Entries keyed by a label the classifier can never output.
    pub fn unknown_labels<'a>(&'a self, labels: &LabelSet) -> Vec<&'a str> {
        let mut unknown: Vec<&str> = self
            .files
            .keys()
            .map(String::as_str)
            .filter(|label| !labels.contains(label))
            .collect();
        unknown.sort_unstable();
        unknown
    }
}

impl FromIterator<(String, String)> for AudioMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}
