// Resolver module - locates the command for a dependency-provided CLI
// Lookup order: local node_modules/.bin, PATH, global install root

pub mod cascade;
pub mod config;
pub mod manifest;
pub mod probe;
pub mod types;

pub use cascade::Resolver;
pub use config::ResolverConfig;
pub use probe::{Probe, SystemProbe};
pub use types::ResolvedCommand;
