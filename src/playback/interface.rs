/// A single playback attempt. Consumed by `play`.
pub trait AudioHandle: Send {
    fn play(self: Box<Self>) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

pub trait AudioBackend: Send + Sync {
    fn open(
        &self,
        uri: &str,
    ) -> Result<Box<dyn AudioHandle>, Box<dyn std::error::Error + Send + Sync>>;
}
