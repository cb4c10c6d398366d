use crate::{
  error::HookError,
  hook_driver::AsyncSeriesBailHook,
  types::ResolveData,
};

#[derive(Default)]
pub struct NormalModuleFactoryHooks {
  /// Fired before every resolution attempt with the request still unresolved.
  pub before_resolve: AsyncSeriesBailHook<ResolveData>,
}

/// Turns import requests into module ids. One factory is created per build.
#[derive(Default)]
pub struct NormalModuleFactory {
  pub hooks: NormalModuleFactoryHooks,
}

/// Outcome of the `before_resolve` stage for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeforeResolve {
  Continue,
  Ignore,
}

impl NormalModuleFactory {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn before_resolve(&self, data: &mut ResolveData) -> Result<BeforeResolve, HookError> {
    let original = data.request.clone();
    let result = self.hooks.before_resolve.call(Some(data))?;
    if original != data.request {
      log::trace!("request {:?} rewritten to {:?}", original, data.request);
    }
    Ok(match result {
      Some(false) => BeforeResolve::Ignore,
      _ => BeforeResolve::Continue,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn no_taps_means_continue() {
    let factory = NormalModuleFactory::new();
    let mut data = ResolveData::new("./a", Some("/src/index.js"));
    assert_eq!(factory.before_resolve(&mut data), Ok(BeforeResolve::Continue));
    assert_eq!(data.request, "./a");
  }

  #[test]
  fn false_result_ignores_the_dependency() {
    let mut factory = NormalModuleFactory::new();
    factory
      .hooks
      .before_resolve
      .tap_async("ignore", |_, done| done.call(Ok(Some(false))));
    let mut data = ResolveData::new("./a", Some("/src/index.js"));
    assert_eq!(factory.before_resolve(&mut data), Ok(BeforeResolve::Ignore));
  }
}
