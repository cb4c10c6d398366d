use std::sync::Arc;

use serde::Deserialize;

use crate::{
  compiler::Compiler,
  error::PluginError,
  hook_driver::Done,
  normal_module_factory::NormalModuleFactory,
  plugin_driver::{Plugin, PluginName},
  types::{AliasMap, ResolveData},
};

const PLUGIN_NAME: &str = "ImportMapPlugin";

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportMapPluginOptions {
  #[serde(default)]
  pub aliases: Option<AliasMap>,
}

impl ImportMapPluginOptions {
  pub fn new(aliases: AliasMap) -> Self {
    Self {
      aliases: Some(aliases),
    }
  }
}

/// Non-empty, read-only alias table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable(AliasMap);

impl AliasTable {
  pub fn new(aliases: Option<AliasMap>) -> Result<Self, PluginError> {
    match aliases {
      Some(aliases) if !aliases.is_empty() => Ok(Self(aliases)),
      _ => Err(PluginError::InvalidConfiguration),
    }
  }

  #[inline]
  pub fn get(&self, request: &str) -> Option<&str> {
    self.0.get(request).map(String::as_str)
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  // Never true for a constructed table.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

/// Single-pass lookup. A replacement is not looked up again, so `a -> b, b -> c`
/// turns `a` into `b`, not `c`.
#[inline]
pub fn rewrite<'a>(aliases: &'a AliasTable, request: &'a str) -> &'a str {
  aliases.get(request).unwrap_or(request)
}

/// `beforeResolve` tap body. Always signals `done` exactly once and never with an error.
pub fn before_resolve(aliases: &AliasTable, data: Option<&mut ResolveData>, done: Done) {
  if let Some(data) = data {
    let rewritten = rewrite(aliases, &data.request);
    if rewritten != data.request {
      data.request = rewritten.to_owned();
    }
  }
  done.ok()
}

/// Rewrites import requests found in a static alias table before the host resolves them.
///
/// ```no_run
/// use import_map_plugin::{Compiler, ImportMapPlugin, ImportMapPluginOptions, types::{AliasMap, NormalizedInputOptions}};
///
/// let mut aliases = AliasMap::default();
/// aliases.insert("react".to_owned(), "/vendor/preact.js".to_owned());
/// let plugin = ImportMapPlugin::new(ImportMapPluginOptions::new(aliases)).unwrap();
/// let mut compiler = Compiler::new(NormalizedInputOptions::default());
/// compiler.apply(&plugin);
/// ```
#[derive(Debug, Clone)]
pub struct ImportMapPlugin {
  aliases: Arc<AliasTable>,
}

impl ImportMapPlugin {
  pub fn new(options: ImportMapPluginOptions) -> Result<Self, PluginError> {
    let aliases = AliasTable::new(options.aliases)?;
    Ok(Self {
      aliases: Arc::new(aliases),
    })
  }

  pub fn aliases(&self) -> &AliasTable {
    &self.aliases
  }
}

impl Plugin for ImportMapPlugin {
  fn name(&self) -> PluginName {
    PluginName::Borrowed(PLUGIN_NAME)
  }

  fn apply(&self, compiler: &mut Compiler) {
    log::debug!("{} registered with {} aliases", PLUGIN_NAME, self.aliases.len());
    let aliases = self.aliases.clone();
    compiler
      .hooks
      .normal_module_factory
      .tap(PLUGIN_NAME, move |factory: &mut NormalModuleFactory| {
        let aliases = aliases.clone();
        factory
          .hooks
          .before_resolve
          .tap_async(PLUGIN_NAME, move |data, done| {
            before_resolve(&aliases, data, done)
          });
      });
  }
}
