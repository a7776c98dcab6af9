//! corp-check crate
//!
//! This crate is an implementation detail of the `corp-check` tool. This crate's API is fluid and may change without warning
//! and in a semver-incompatible way.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

#[doc(hidden)]
pub mod commands;

#[doc(hidden)]
pub mod config;

#[doc(hidden)]
pub mod misc;

#[doc(hidden)]
pub mod model;

#[doc(hidden)]
pub mod reports;

#[doc(hidden)]
pub mod service;

#[doc(hidden)]
pub mod summary;

#[doc(hidden)]
pub mod tree;

pub use commands::{Host, run};
