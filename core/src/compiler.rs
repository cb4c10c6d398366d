use crate::{
  error::CompileError,
  hook_driver::SyncHook,
  module_loader::ModuleLoader,
  normal_module_factory::NormalModuleFactory,
  plugin_driver::{Plugin, PluginDriver},
  stats::Stats,
  types::NormalizedInputOptions,
};

#[derive(Default)]
pub struct CompilerHooks {
  /// Fired once per run, right after the factory is created.
  pub normal_module_factory: SyncHook<NormalModuleFactory>,
}

pub struct Compiler {
  pub options: NormalizedInputOptions,
  pub hooks: CompilerHooks,
}

impl Compiler {
  pub fn new(options: NormalizedInputOptions) -> Self {
    Self {
      options,
      hooks: Default::default(),
    }
  }

  pub fn with_plugins(options: NormalizedInputOptions, plugin_driver: &PluginDriver) -> Self {
    let mut compiler = Self::new(options);
    plugin_driver.apply_all(&mut compiler);
    compiler
  }

  pub fn apply(&mut self, plugin: &dyn Plugin) {
    plugin.apply(self)
  }

  pub fn create_normal_module_factory(&self) -> NormalModuleFactory {
    let mut factory = NormalModuleFactory::new();
    self.hooks.normal_module_factory.call(&mut factory);
    factory
  }

  /// Builds the module graph reachable from `options.input`.
  ///
  /// Per-module failures don't abort the run, they end up in [Stats::errors].
  pub fn run(&self) -> Result<Stats, CompileError> {
    if self.options.input.is_empty() {
      return Err(CompileError::NoEntry);
    }
    log::debug!("start build for entries {:?}", self.options.input);

    let factory = self.create_normal_module_factory();
    let output = ModuleLoader::new(&factory).fetch_all(&self.options.input);

    log::debug!(
      "build finished with {} modules and {} errors",
      output.modules.len(),
      output.errors.len()
    );
    Ok(Stats {
      entries: output.entries,
      modules: output.modules,
      errors: output.errors,
    })
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  };

  use super::*;

  #[test]
  fn empty_input_is_rejected() {
    let compiler = Compiler::new(NormalizedInputOptions::default());
    assert!(matches!(compiler.run(), Err(CompileError::NoEntry)));
  }

  #[test]
  fn factory_hook_fires_once_per_factory() {
    let fired = Arc::new(AtomicUsize::new(0));
    let mut compiler = Compiler::new(NormalizedInputOptions::default());
    let counter = fired.clone();
    compiler.hooks.normal_module_factory.tap("count", move |_| {
      counter.fetch_add(1, Ordering::SeqCst);
    });
    compiler.create_normal_module_factory();
    assert_eq!(fired.load(Ordering::SeqCst), 1);
  }
}
