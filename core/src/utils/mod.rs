use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::DependencyType;

pub mod resolve_id;

pub mod path {
  pub fn relative_id(id: String) -> String {
    if nodejs_path::is_absolute(&id) {
      nodejs_path::relative(&nodejs_path::resolve!("."), &id)
    } else {
      id
    }
  }
}

pub fn is_external_module(source: &str) -> bool {
  !nodejs_path::is_absolute(source) && !source.starts_with('.')
}

static STATIC_IMPORT: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r#"(?m)^\s*import\s+(?:[\w$*{}\s,]+?\s+from\s+)?["']([^"'\n]+)["']"#)
    .expect("static import pattern")
});

static RE_EXPORT: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r#"(?m)^\s*export\s+(?:\*(?:\s+as\s+[\w$]+)?|\{[^}]*\})\s*from\s*["']([^"'\n]+)["']"#,
  )
  .expect("re-export pattern")
});

static DYNAMIC_IMPORT: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r#"\bimport\s*\(\s*["']([^"'\n]+)["']\s*\)"#).expect("dynamic import pattern")
});

/// Import specifiers of a module in source order, first occurrence wins.
///
/// This is a lexical scan, not a parse: specifiers inside comments or strings are
/// picked up too.
pub fn scan_imports(source: &str) -> Vec<(String, DependencyType)> {
  let mut found = [
    (&*STATIC_IMPORT, DependencyType::Import),
    (&*RE_EXPORT, DependencyType::ReExport),
    (&*DYNAMIC_IMPORT, DependencyType::DynamicImport),
  ]
  .iter()
  .flat_map(|(pattern, dependency_type)| {
    pattern.captures_iter(source).filter_map(move |caps| {
      caps
        .get(1)
        .map(|m| (m.start(), m.as_str().to_owned(), *dependency_type))
    })
  })
  .collect::<Vec<_>>();
  found.sort_by_key(|(start, ..)| *start);

  let mut seen = HashSet::new();
  found
    .into_iter()
    .filter(|(_, specifier, _)| seen.insert(specifier.clone()))
    .map(|(_, specifier, dependency_type)| (specifier, dependency_type))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn scans_all_import_forms_in_order() {
    let source = r#"
import value from "@alias/test";
import { a,
  b } from './ab.js';
import './side-effect';
export * from "./all";
export { c as d } from './cd';
const lazy = () => import('./lazy.js');
import value2 from "@alias/test";
"#;
    assert_eq!(
      scan_imports(source),
      vec![
        ("@alias/test".to_owned(), DependencyType::Import),
        ("./ab.js".to_owned(), DependencyType::Import),
        ("./side-effect".to_owned(), DependencyType::Import),
        ("./all".to_owned(), DependencyType::ReExport),
        ("./cd".to_owned(), DependencyType::ReExport),
        ("./lazy.js".to_owned(), DependencyType::DynamicImport),
      ]
    );
  }

  #[test]
  fn local_exports_are_not_dependencies() {
    assert!(scan_imports("export default 'resolved test module';\nexport const x = 1;").is_empty());
  }

  #[test]
  fn external_detection() {
    assert!(is_external_module("@alias/test"));
    assert!(is_external_module("react"));
    assert!(!is_external_module("./a"));
    assert!(!is_external_module("../a"));
    assert!(!is_external_module("/abs/a.js"));
  }
}
