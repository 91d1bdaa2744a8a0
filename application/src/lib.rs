//! `proptech` CLI driving the [`Service`] of the real estate platform.

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod args;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod prompt;
pub mod session;

// Used in binary.
use tokio as _;
use tracing_subscriber as _;

pub use self::{
    args::Args,
    config::Config,
    context::Context,
    error::{AsError, Error},
    prompt::{Ask, Prompt, Terminal},
};

/// [`Backend`] the [`Service`] talks to.
///
/// [`Backend`]: service::infra::Backend
#[cfg(not(test))]
pub type Backend = service::infra::Rest;

/// [`Backend`] the [`Service`] talks to.
///
/// [`Backend`]: service::infra::Backend
#[cfg(test)]
pub type Backend = service::infra::Mock;

/// [`Service`] with filled infrastructure dependencies.
///
/// [`Service`]: service::Service
pub type Service = service::Service<Backend>;
