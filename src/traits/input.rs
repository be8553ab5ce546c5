use anyhow::{Context, Result};
use std::io::Read;
use std::sync::Mutex;

/// Trait for reading the address list given on standard input
pub trait InputSource: Send + Sync {
    /// Read everything available
    fn read_all(&self) -> Result<String>;
}

/// Real implementation reading the process standard input
pub struct StdinInput;

impl InputSource for StdinInput {
    fn read_all(&self) -> Result<String> {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read standard input")?;
        Ok(buffer)
    }
}

/// Mock input returning pre-configured text (for testing)
#[allow(dead_code)]
pub struct MockInput {
    text: Mutex<Option<String>>,
}

#[allow(dead_code)]
impl MockInput {
    /// Create a mock with no input; reading it fails
    pub fn new() -> Self {
        Self {
            text: Mutex::new(None),
        }
    }

    /// Create a mock returning the given text once
    pub fn with_text(text: &str) -> Self {
        Self {
            text: Mutex::new(Some(text.to_string())),
        }
    }

    /// Whether the input has been consumed
    pub fn was_read(&self) -> bool {
        self.text.lock().unwrap().is_none()
    }
}

impl Default for MockInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for MockInput {
    fn read_all(&self) -> Result<String> {
        self.text
            .lock()
            .unwrap()
            .take()
            .context("No mock input available")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_input_reads_once() {
        let input = MockInput::with_text("aws_instance.web");
        assert!(!input.was_read());
        assert_eq!(input.read_all().unwrap(), "aws_instance.web");
        assert!(input.was_read());
        assert!(input.read_all().is_err());
    }
}
