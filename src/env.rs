//! BuildEnv trait for testable I/O.
//!
//! This module provides the `BuildEnv` trait that abstracts file system and
//! environment variable access, enabling dependency injection for testing.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Environment trait for the I/O the validator performs.
///
/// This trait abstracts file system and environment variable access,
/// enabling dependency injection for testing.
///
/// # Example
///
/// ```ignore
/// // Production
/// let validated = ValidateEnv::with_options(options)
///     .run(&BuildContext::new(".", "development"))?;  // Uses RealEnv
///
/// // Testing
/// let env = MockEnv::new()
///     .with_file(".env.development", "APP_PORT=8080");
/// let validated = ValidateEnv::with_options(options)
///     .run_with_env(&BuildContext::new(".", "development"), &env)?;
/// ```
pub trait BuildEnv: Send + Sync {
    /// Read a file's contents as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if:
    /// - File does not exist (`ErrorKind::NotFound`)
    /// - File is not valid UTF-8
    /// - Permission denied
    /// - Other I/O errors
    fn read_file(&self, path: &Path) -> io::Result<String>;

    /// Check if a file exists.
    fn file_exists(&self, path: &Path) -> bool;

    /// Get an environment variable by name.
    ///
    /// Returns `None` if the variable is not set.
    fn get_env(&self, name: &str) -> Option<String>;

    /// Get all environment variables.
    fn all_env_vars(&self) -> Vec<(String, String)>;
}

/// Production environment using standard library I/O.
///
/// This is a zero-cost abstraction - all methods are simple wrappers
/// around std functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealEnv;

impl RealEnv {
    /// Create a new real environment.
    pub fn new() -> Self {
        Self
    }
}

impl BuildEnv for RealEnv {
    fn read_file(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn get_env(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn all_env_vars(&self) -> Vec<(String, String)> {
        std::env::vars().collect()
    }
}

/// Mock file state for testing.
#[derive(Debug, Clone)]
enum MockFile {
    Content(String),
    NotFound,
    PermissionDenied,
}

/// Mock environment for testing validation runs.
///
/// # Example
///
/// ```
/// use preflight::env::MockEnv;
///
/// let env = MockEnv::new()
///     .with_file(".env.development", "APP_PORT=8080\nAPP_HOST=localhost")
///     .with_env("APP_DEBUG", "true");
/// ```
#[derive(Debug, Default)]
pub struct MockEnv {
    files: RwLock<HashMap<PathBuf, MockFile>>,
    env_vars: RwLock<HashMap<String, String>>,
}

impl MockEnv {
    /// Create a new empty mock environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with content.
    ///
    /// The path can be relative or absolute.
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), MockFile::Content(content.into()));
        self
    }

    /// Add a file that will return "not found" error.
    ///
    /// Useful for testing optional file handling.
    pub fn with_missing_file(self, path: impl Into<PathBuf>) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), MockFile::NotFound);
        self
    }

    /// Add a file that will return "permission denied" error.
    pub fn with_unreadable_file(self, path: impl Into<PathBuf>) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), MockFile::PermissionDenied);
        self
    }

    /// Set an environment variable.
    pub fn with_env(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars
            .write()
            .unwrap()
            .insert(name.into(), value.into());
        self
    }

    /// Set multiple environment variables from an iterator.
    pub fn with_envs<I, K, V>(self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut env_vars = self.env_vars.write().unwrap();
        for (k, v) in vars {
            env_vars.insert(k.into(), v.into());
        }
        drop(env_vars);
        self
    }

    /// Mutate the mock environment after creation.
    ///
    /// Useful for tests that modify files during execution.
    pub fn set_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), MockFile::Content(content.into()));
    }

    /// Remove a file from the mock environment.
    pub fn remove_file(&self, path: impl AsRef<Path>) {
        self.files.write().unwrap().remove(path.as_ref());
    }

    /// Update an environment variable.
    pub fn set_env(&self, name: impl Into<String>, value: impl Into<String>) {
        self.env_vars
            .write()
            .unwrap()
            .insert(name.into(), value.into());
    }

    /// Remove an environment variable.
    pub fn remove_env(&self, name: &str) {
        self.env_vars.write().unwrap().remove(name);
    }
}

impl BuildEnv for MockEnv {
    fn read_file(&self, path: &Path) -> io::Result<String> {
        let files = self.files.read().unwrap();

        match files.get(path) {
            Some(MockFile::Content(content)) => Ok(content.clone()),
            Some(MockFile::NotFound) | None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("mock file not found: {}", path.display()),
            )),
            Some(MockFile::PermissionDenied) => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("mock permission denied: {}", path.display()),
            )),
        }
    }

    fn file_exists(&self, path: &Path) -> bool {
        let files = self.files.read().unwrap();
        matches!(files.get(path), Some(MockFile::Content(_)))
    }

    fn get_env(&self, name: &str) -> Option<String> {
        self.env_vars.read().unwrap().get(name).cloned()
    }

    fn all_env_vars(&self) -> Vec<(String, String)> {
        self.env_vars
            .read()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
