//! An abstraction layer for remote text-generation services.
//!
//! This crate establishes the contract between the site's prompt
//! service and whatever backend actually completes a prompt, so that
//! the rest of the workspace can switch backends (or use a scripted
//! fake in tests) without modifying the core codebase.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod provider;

pub use error::*;
pub use provider::*;
