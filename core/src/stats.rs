use std::fmt::{self, Display};

use crate::{
  error::BuildError,
  types::{DependencyType, ResolvedId},
  utils::path::relative_id,
};

#[derive(Debug, Clone)]
pub struct Dependency {
  /// The specifier as written in the importing module.
  pub request: String,
  /// The specifier after `before_resolve` ran.
  pub resolved_request: String,
  pub dependency_type: DependencyType,
  /// `None` when a tap asked the host to ignore this dependency.
  pub resolved: Option<ResolvedId>,
}

#[derive(Debug, Clone)]
pub struct ModuleInfo {
  pub id: String,
  pub source: String,
  pub dependencies: Vec<Dependency>,
}

impl ModuleInfo {
  pub fn dependency(&self, request: &str) -> Option<&Dependency> {
    self.dependencies.iter().find(|dep| dep.request == request)
  }
}

/// Result of one [crate::Compiler::run].
#[derive(Debug, Default)]
pub struct Stats {
  pub(crate) entries: Vec<String>,
  pub(crate) modules: Vec<ModuleInfo>,
  pub(crate) errors: Vec<BuildError>,
}

impl Stats {
  pub fn entries(&self) -> &[String] {
    &self.entries
  }

  /// Modules sorted by id.
  pub fn modules(&self) -> &[ModuleInfo] {
    &self.modules
  }

  pub fn module(&self, id: &str) -> Option<&ModuleInfo> {
    self.modules.iter().find(|m| m.id == id)
  }

  pub fn errors(&self) -> &[BuildError] {
    &self.errors
  }

  #[inline]
  pub fn has_errors(&self) -> bool {
    !self.errors.is_empty()
  }
}

impl Display for Stats {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for module in &self.modules {
      writeln!(f, "{}", relative_id(module.id.clone()))?;
      for dep in &module.dependencies {
        let target = match &dep.resolved {
          Some(ResolvedId { id, external: true }) => format!("external {}", id),
          Some(ResolvedId { id, .. }) => relative_id(id.to_string()),
          None => "ignored".to_owned(),
        };
        writeln!(f, "  {:?} -> {}", dep.request, target)?;
      }
    }
    for err in &self.errors {
      writeln!(f, "error: {}", err)?;
    }
    Ok(())
  }
}
