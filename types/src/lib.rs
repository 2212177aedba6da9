//! Shared type definitions for quill
//!
//! This crate provides the [`Dialect`] enum used by the query renderer and by
//! callers that pick an output convention from configuration.
//!
//! # Features
//!
//! - `std` - Standard library support (enabled by default)
//! - `serde` - Enable serde serialization/deserialization of [`Dialect`]

#![cfg_attr(not(feature = "std"), no_std)]

pub mod dialect;

pub use dialect::{Dialect, DialectParseError};
