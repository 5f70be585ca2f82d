//! Resolve and run CLIs provided by installed node packages.
//!
//! A [`resolver::Resolver`] looks a CLI name up in `<root>/node_modules/.bin`,
//! then on `PATH`, then under a global install root. An
//! [`executor::Executor`] resolves the first word of a command line that way
//! and hands the rebuilt line to a [`executor::Shell`].

pub mod config;
pub mod executor;
pub mod resolver;
