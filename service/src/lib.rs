//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
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

pub mod booking;
pub mod collection;
pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;

#[cfg(test)]
use axum as _;
use smart_default::SmartDefault;

#[cfg(doc)]
use infra::Backend;

pub use self::{command::Command, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Number of items per page of paginated collections.
    #[default(10)]
    pub page_size: usize,

    /// Indicator whether queries of agents, properties and available slots
    /// should fall back to built-in sample data when the [`Backend`] fails.
    pub demo_fallback: bool,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Bk> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Backend`] of this [`Service`].
    backend: Bk,
}

impl<Bk> Service<Bk> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, backend: Bk) -> Self {
        Self { config, backend }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Backend`] of this [`Service`].
    #[must_use]
    pub fn backend(&self) -> &Bk {
        &self.backend
    }

    /// Returns a new [`Service`] sharing the [`Config`] of this one, but
    /// using the provided [`Backend`].
    #[must_use]
    pub fn with_backend<B>(&self, backend: B) -> Service<B> {
        Service {
            config: self.config,
            backend,
        }
    }
}
