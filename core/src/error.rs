use std::io;

use thiserror::Error;

/// Raised while constructing a plugin, before it can register anything.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PluginError {
  #[error("Aliases cannot be empty. Please provide at least one alias.")]
  InvalidConfiguration,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HookError {
  #[error("[{plugin}] {message}")]
  Tap { plugin: String, message: String },
  #[error("[{plugin}] completion callback was dropped without being called")]
  CallbackDropped { plugin: String },
}

impl HookError {
  pub fn tap(plugin: impl Into<String>, message: impl Into<String>) -> Self {
    Self::Tap {
      plugin: plugin.into(),
      message: message.into(),
    }
  }
}

/// Recoverable failures collected into [crate::Stats] while a build runs.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error("Module not found: Can't resolve '{request}' in '{issuer}'")]
  ModuleNotFound { request: String, issuer: String },
  #[error("Read file failed: {id} {source}")]
  ReadFailed {
    id: String,
    #[source]
    source: io::Error,
  },
  #[error("{0}")]
  Hook(#[from] HookError),
}

#[derive(Debug, Error)]
pub enum CompileError {
  #[error("Build doesn't have any entry")]
  NoEntry,
}
