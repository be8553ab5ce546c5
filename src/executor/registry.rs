use super::{CliExecutor, Executor};
use crate::traits::CommandExecutor;
use anyhow::Result;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Trait for executor registry that manages available executors
pub trait ExecutorRegistry: Send + Sync {
    /// Register an executor with the given name
    #[allow(dead_code)]
    fn register(&mut self, name: String, executor: Box<dyn Executor>);

    /// Get an executor by name
    fn get(&self, name: &str) -> Result<Arc<dyn Executor>>;

    /// Check if an executor is registered
    #[allow(dead_code)]
    fn has(&self, name: &str) -> bool;

    /// List all registered executor names
    fn list(&self) -> Vec<String>;
}

/// Default implementation of executor registry
pub struct DefaultExecutorRegistry {
    executors: BTreeMap<String, Arc<dyn Executor>>,
}

impl DefaultExecutorRegistry {
    /// Create a new empty registry
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self {
            executors: BTreeMap::new(),
        }
    }

    /// Create a new registry with the default executors (Terraform, OpenTofu)
    pub fn with_defaults(command: Arc<dyn CommandExecutor>) -> Self {
        let mut executors: BTreeMap<String, Arc<dyn Executor>> = BTreeMap::new();
        executors.insert(
            "terraform".to_string(),
            Arc::new(CliExecutor::terraform(command.clone())),
        );
        executors.insert(
            "opentofu".to_string(),
            Arc::new(CliExecutor::opentofu(command)),
        );
        Self { executors }
    }
}

impl ExecutorRegistry for DefaultExecutorRegistry {
    fn register(&mut self, name: String, executor: Box<dyn Executor>) {
        self.executors.insert(name, Arc::from(executor));
    }

    fn get(&self, name: &str) -> Result<Arc<dyn Executor>> {
        self.executors.get(name).cloned().ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown executor: {} (available: {})",
                name,
                self.list().join(", ")
            )
        })
    }

    fn has(&self, name: &str) -> bool {
        self.executors.contains_key(name)
    }

    fn list(&self) -> Vec<String> {
        self.executors.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::ExecutorConfig;
    use crate::traits::MockCommandExecutor;
    use std::path::Path;

    // Mock executor for testing
    struct MockExecutor {
        name: String,
    }

    impl MockExecutor {
        fn new(name: impl Into<String>) -> Self {
            Self { name: name.into() }
        }
    }

    impl Executor for MockExecutor {
        fn check_installed(&self, _working_dir: &Path) -> Result<bool> {
            Ok(true)
        }

        fn show_state(&self, _config: &ExecutorConfig, _working_dir: &Path) -> Result<String> {
            Ok("{}".to_string())
        }

        fn providers_schema(&self, _config: &ExecutorConfig, _working_dir: &Path) -> Result<String> {
            Ok("{}".to_string())
        }

        fn get_name(&self) -> &str {
            &self.name
        }

        fn default_show_command(&self) -> &str {
            "mock show"
        }

        fn default_schema_command(&self) -> &str {
            "mock schema"
        }
    }

    #[test]
    fn test_register_and_get_executor() {
        let mut registry = DefaultExecutorRegistry::new();
        registry.register("test".to_string(), Box::new(MockExecutor::new("test")));

        let executor = registry.get("test").unwrap();
        assert_eq!(executor.get_name(), "test");
    }

    #[test]
    fn test_get_unknown_executor() {
        let registry = DefaultExecutorRegistry::with_defaults(Arc::new(MockCommandExecutor::new()));
        let err = registry.get("pulumi").err().unwrap();
        assert_eq!(
            err.to_string(),
            "Unknown executor: pulumi (available: opentofu, terraform)"
        );
    }

    #[test]
    fn test_has_executor() {
        let mut registry = DefaultExecutorRegistry::new();
        assert!(!registry.has("test"));

        registry.register("test".to_string(), Box::new(MockExecutor::new("test")));
        assert!(registry.has("test"));
    }

    #[test]
    fn test_with_defaults_includes_terraform_and_opentofu() {
        let registry = DefaultExecutorRegistry::with_defaults(Arc::new(MockCommandExecutor::new()));
        assert_eq!(registry.list(), vec!["opentofu", "terraform"]);
        assert_eq!(registry.get("opentofu").unwrap().default_show_command(), "tofu show -json");
    }
}
