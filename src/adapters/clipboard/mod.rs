use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{
    app_error::{AppError, AppResult},
    application::ports::clipboard::Clipboard,
};

/// Server-side no-op. The client copies the key it gets back from a use.
pub struct NoopClipboard;

#[async_trait]
impl Clipboard for NoopClipboard {
    async fn copy(&self, _text: &str) -> AppResult<()> {
        Ok(())
    }
}

/// Sets the clipboard of the terminal attached to `out` via OSC 52.
pub struct Osc52Clipboard {
    out: Mutex<Box<dyn Write + Send>>,
}

impl Osc52Clipboard {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }
}

fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

#[async_trait]
impl Clipboard for Osc52Clipboard {
    async fn copy(&self, text: &str) -> AppResult<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| AppError::Internal("clipboard writer poisoned".into()))?;
        out.write_all(osc52_sequence(text).as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| AppError::Internal(format!("clipboard write failed: {e}")))
    }
}
