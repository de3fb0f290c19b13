use crate::error::AppError;
use crate::playback::interface::{AudioBackend, AudioHandle};
use std::process::{Command, Stdio};

/// Plays each clip with an external player process, e.g. `ffplay -nodisp -autoexit`.
pub struct AudioBackendCommand {
    program: String,
    args: Vec<String>,
}

impl AudioBackendCommand {
    pub fn new(program: String, args: Vec<String>) -> Self {
        Self { program, args }
    }
}

impl AudioBackend for AudioBackendCommand {
    fn open(
        &self,
        uri: &str,
    ) -> Result<Box<dyn AudioHandle>, Box<dyn std::error::Error + Send + Sync>> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(uri)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        Ok(Box::new(AudioHandleCommand {
            uri: uri.to_string(),
            command,
        }))
    }
}

struct AudioHandleCommand {
    uri: String,
    command: Command,
}

impl AudioHandle for AudioHandleCommand {
    /// Resolves once the player process has started.
    fn play(mut self: Box<Self>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut child = self.command.spawn().map_err(|e| AppError::Playback {
            uri: self.uri.clone(),
            reason: e.to_string(),
        })?;

        // reap the player when it exits
        std::thread::spawn(move || {
            let _ = child.wait();
        });

        Ok(())
    }
}
