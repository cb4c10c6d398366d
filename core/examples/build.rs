use std::env;

use anyhow::{bail, Context};
use import_map_plugin::{
  types::{AliasMap, NormalizedInputOptions},
  Compiler, ImportMapPlugin, ImportMapPluginOptions,
};

// cargo run --example build -- ./tests/fixtures/alias/entry.js @alias/test=$PWD/tests/fixtures/alias/test-module.js
fn main() -> anyhow::Result<()> {
  env_logger::init();
  let mut args = env::args().skip(1);
  let entry = args.next().context("missing entry")?;

  let mut aliases = AliasMap::default();
  for pair in args {
    let (request, replacement) = pair
      .split_once('=')
      .with_context(|| format!("expected `request=replacement`, got {:?}", pair))?;
    aliases.insert(request.to_owned(), replacement.to_owned());
  }

  let plugin = ImportMapPlugin::new(ImportMapPluginOptions::new(aliases))?;
  let mut compiler = Compiler::new(NormalizedInputOptions { input: vec![entry] });
  compiler.apply(&plugin);

  let stats = compiler.run()?;
  print!("{}", stats);
  if stats.has_errors() {
    bail!("build failed with {} errors", stats.errors().len());
  }
  Ok(())
}
