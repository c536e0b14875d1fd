//! gh-activity crate
//!
//! This crate is an implementation detail of the `gh-activity` tool. This crate's API is fluid and may change without warning
//! and in a semver-incompatible way.

#[doc(hidden)]
pub mod activity;

#[doc(hidden)]
pub mod remote;

#[doc(hidden)]
pub mod retry;

#[doc(hidden)]
pub mod stats;
