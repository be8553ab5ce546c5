use crate::executor::{DefaultExecutorRegistry, ExecutorRegistry};
use crate::traits::{
    CommandExecutor, FileSystem, InputSource, Output, QuietOutput, RealCommandExecutor,
    RealFileSystem, StdinInput, TerminalOutput,
};
#[cfg(test)]
use crate::traits::{MockCommandExecutor, MockFileSystem, MockInput, MockOutput};
use std::sync::Arc;

/// Application context that holds all dependencies for dependency injection
pub struct Context {
    pub fs: Arc<dyn FileSystem>,
    pub input: Arc<dyn InputSource>,
    pub output: Arc<dyn Output>,
    pub executor_registry: Arc<dyn ExecutorRegistry>,
}

impl Context {
    /// Create a new context with real implementations (for production use)
    pub fn new() -> Self {
        let command: Arc<dyn CommandExecutor> = Arc::new(RealCommandExecutor::new());
        Self {
            fs: Arc::new(RealFileSystem),
            input: Arc::new(StdinInput),
            output: Arc::new(TerminalOutput),
            executor_registry: Arc::new(DefaultExecutorRegistry::with_defaults(command)),
        }
    }

    /// Real context whose diagnostics are limited to errors
    pub fn quiet() -> Self {
        Self {
            output: Arc::new(QuietOutput),
            ..Self::new()
        }
    }

    /// Create a new context with mock implementations (for testing)
    #[cfg(test)]
    #[allow(dead_code)]
    pub fn test() -> Self {
        Self {
            fs: Arc::new(MockFileSystem::new()),
            input: Arc::new(MockInput::new()),
            output: Arc::new(MockOutput::new()),
            executor_registry: Arc::new(DefaultExecutorRegistry::with_defaults(Arc::new(
                MockCommandExecutor::new(),
            ))),
        }
    }

    /// Create a test context with specific mock implementations
    #[cfg(test)]
    pub fn test_with(
        fs: Arc<dyn FileSystem>,
        input: Arc<dyn InputSource>,
        output: Arc<dyn Output>,
        command: Arc<dyn CommandExecutor>,
    ) -> Self {
        Self {
            fs,
            input,
            output,
            executor_registry: Arc::new(DefaultExecutorRegistry::with_defaults(command)),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Context {
    fn clone(&self) -> Self {
        Self {
            fs: Arc::clone(&self.fs),
            input: Arc::clone(&self.input),
            output: Arc::clone(&self.output),
            executor_registry: Arc::clone(&self.executor_registry),
        }
    }
}
