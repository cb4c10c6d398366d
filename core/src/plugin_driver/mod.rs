use std::borrow::Cow;

use crate::compiler::Compiler;

pub type PluginName = Cow<'static, str>;

// Align to webpack's `apply(compiler)` plugin shape.
pub trait Plugin: Send + Sync {
  fn name(&self) -> PluginName;

  /// Called once per compiler. Implementations subscribe to hooks here and must not
  /// fail for an already validated plugin.
  fn apply(&self, compiler: &mut Compiler);
}

pub struct PluginDriver {
  pub plugins: Vec<Box<dyn Plugin>>,
}

impl PluginDriver {
  pub fn new() -> Self {
    Self { plugins: vec![] }
  }

  pub fn push(&mut self, plugin: impl Plugin + 'static) {
    self.plugins.push(Box::new(plugin));
  }

  pub fn apply_all(&self, compiler: &mut Compiler) {
    self.plugins.iter().for_each(|plugin| {
      log::debug!("apply plugin {}", plugin.name());
      plugin.apply(compiler)
    })
  }
}

impl Default for PluginDriver {
  fn default() -> Self {
    Self::new()
  }
}
