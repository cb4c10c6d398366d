use dashmap::DashSet;
use log::debug;
use rayon::prelude::*;

use crate::{
  error::BuildError,
  normal_module_factory::{BeforeResolve, NormalModuleFactory},
  stats::{Dependency, ModuleInfo},
  types::{DependencyType, ResolveData, ResolvedId},
  utils::{resolve_id::resolve_id, scan_imports},
};

pub(crate) struct ModuleLoader<'a> {
  factory: &'a NormalModuleFactory,
  processed_ids: DashSet<String>,
}

#[derive(Default)]
pub(crate) struct LoadOutput {
  pub entries: Vec<String>,
  pub modules: Vec<ModuleInfo>,
  pub errors: Vec<BuildError>,
}

impl<'a> ModuleLoader<'a> {
  pub fn new(factory: &'a NormalModuleFactory) -> Self {
    Self {
      factory,
      processed_ids: DashSet::default(),
    }
  }

  pub fn fetch_all(&self, input: &[String]) -> LoadOutput {
    let mut output = LoadOutput::default();

    let mut queue = input
      .iter()
      .filter_map(|entry| match self.resolve_entry(entry) {
        Ok(id) => id,
        Err(err) => {
          output.errors.push(err);
          None
        }
      })
      .collect::<Vec<_>>();
    output.entries = queue.clone();

    // Every wave is fetched in parallel, so `before_resolve` taps run concurrently.
    while !queue.is_empty() {
      let fetched = queue
        .par_iter()
        .filter(|id| self.processed_ids.insert(id.to_string()))
        .map(|id| self.fetch_module(id))
        .collect::<Vec<_>>();

      queue = vec![];
      for result in fetched {
        match result {
          Ok((module, errors)) => {
            queue.extend(
              module
                .dependencies
                .iter()
                .filter_map(|dep| match &dep.resolved {
                  Some(ResolvedId {
                    id,
                    external: false,
                  }) if !self.processed_ids.contains(id.as_str()) => Some(id.to_string()),
                  _ => None,
                }),
            );
            output.errors.extend(errors);
            output.modules.push(module);
          }
          Err(err) => output.errors.push(err),
        }
      }
    }

    output.modules.sort_by(|a, b| a.id.cmp(&b.id));
    output
  }

  /// `Ok(None)` when a tap ignored the entry.
  fn resolve_entry(&self, entry: &str) -> Result<Option<String>, BuildError> {
    let mut data = ResolveData::new(entry, None);
    if let BeforeResolve::Ignore = self.factory.before_resolve(&mut data)? {
      debug!("entry {} ignored", entry);
      return Ok(None);
    }
    resolve_id(&data.request, None)
      .map(|resolved| Some(resolved.id.to_string()))
      .ok_or_else(|| BuildError::ModuleNotFound {
        request: data.request.clone(),
        issuer: data.context.clone(),
      })
  }

  fn fetch_module(&self, id: &str) -> Result<(ModuleInfo, Vec<BuildError>), BuildError> {
    debug!("fetch module {}", id);
    let source = std::fs::read_to_string(id).map_err(|source| BuildError::ReadFailed {
      id: id.to_owned(),
      source,
    })?;

    let (dependencies, errors): (Vec<_>, Vec<_>) = scan_imports(&source)
      .into_par_iter()
      .map(|(request, dependency_type)| self.resolve_dependency(id, request, dependency_type))
      .partition(Result::is_ok);

    let module = ModuleInfo {
      id: id.to_owned(),
      source,
      dependencies: dependencies.into_iter().filter_map(Result::ok).collect(),
    };
    Ok((module, errors.into_iter().filter_map(Result::err).collect()))
  }

  fn resolve_dependency(
    &self,
    issuer: &str,
    request: String,
    dependency_type: DependencyType,
  ) -> Result<Dependency, BuildError> {
    let mut data =
      ResolveData::new(request.clone(), Some(issuer)).with_dependency_type(dependency_type);
    let resolved = match self.factory.before_resolve(&mut data)? {
      BeforeResolve::Ignore => None,
      BeforeResolve::Continue => Some(resolve_id(&data.request, Some(issuer)).ok_or_else(|| {
        BuildError::ModuleNotFound {
          request: data.request.clone(),
          issuer: issuer.to_owned(),
        }
      })?),
    };
    Ok(Dependency {
      request,
      resolved_request: data.request,
      dependency_type,
      resolved,
    })
  }
}
