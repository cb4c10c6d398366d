#![deny(clippy::all)]

pub mod compiler;
pub mod error;
pub mod hook_driver;
mod module_loader;
pub mod normal_module_factory;
pub mod plugin;
pub mod plugin_driver;
pub mod stats;
pub mod types;
pub mod utils;

pub use compiler::*;
pub use error::*;
pub use normal_module_factory::*;
pub use plugin::*;
pub use plugin_driver::*;
pub use stats::*;
