use std::collections::HashMap;

use ahash::RandomState;
use smol_str::SmolStr;

mod normalized_input_options;
pub use normalized_input_options::*;

/// `request -> replacement`, keys compared by exact string equality.
pub type AliasMap = HashMap<String, String, RandomState>;

#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub struct ResolvedId {
  pub id: SmolStr,
  pub external: bool,
}

impl ResolvedId {
  pub fn new(id: impl Into<SmolStr>, external: bool) -> Self {
    Self {
      id: id.into(),
      external,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyType {
  Import,
  ReExport,
  DynamicImport,
}

/// One import as the resolver sees it.
///
/// Owned by the host. Taps receive it as `&mut` for the duration of a single call and
/// may only rewrite `request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveData {
  /// The specifier exactly as written in the importing module.
  pub request: String,
  /// Directory the request is resolved against.
  pub context: String,
  /// Id of the importing module, `None` for entries.
  pub issuer: Option<String>,
  pub dependency_type: DependencyType,
}

impl ResolveData {
  pub fn new(request: impl Into<String>, issuer: Option<&str>) -> Self {
    let context = issuer
      .map(|issuer| nodejs_path::dirname(issuer))
      .unwrap_or_else(|| nodejs_path::resolve!("."));
    Self {
      request: request.into(),
      context,
      issuer: issuer.map(ToOwned::to_owned),
      dependency_type: DependencyType::Import,
    }
  }

  pub fn with_dependency_type(mut self, dependency_type: DependencyType) -> Self {
    self.dependency_type = dependency_type;
    self
  }
}
