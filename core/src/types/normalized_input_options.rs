#[derive(Debug, Default, Clone)]
pub struct NormalizedInputOptions {
  // --- Options that Rollup has but this host doesn't need
  // cache, treeshake, external, preserveSymlinks, onwarn
  pub input: Vec<String>,
}
