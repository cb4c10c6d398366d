use std::path::Path;

use crate::{types::ResolvedId, utils::is_external_module};

/// Resolves a request that already went through `before_resolve`.
///
/// Bare specifiers are external. `None` means the request points at a file that
/// doesn't exist.
pub fn resolve_id(source: &str, importer: Option<&str>) -> Option<ResolvedId> {
  if importer.is_some() && is_external_module(source) {
    return Some(ResolvedId::new(source, true));
  }
  let id = default_resolve_id(source, importer);
  find_file(&id)
    .or_else(|| {
      if nodejs_path::extname(&id) == ".js" {
        None
      } else {
        find_file(&format!("{}.js", id))
      }
    })
    .map(|id| ResolvedId::new(id, false))
}

fn default_resolve_id(source: &str, importer: Option<&str>) -> String {
  if nodejs_path::is_absolute(source) {
    source.to_owned()
  } else if let Some(importer) = importer {
    let importer_dir = nodejs_path::dirname(importer);
    nodejs_path::join!(&importer_dir, &source)
  } else {
    nodejs_path::resolve!(source)
  }
}

#[inline]
fn find_file(file: &str) -> Option<String> {
  Path::new(file).is_file().then(|| file.to_owned())
}
