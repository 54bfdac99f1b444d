//! An out-of-the-box assembly of the portfolio site's AI conveniences.
//!
//! The crate includes a CLI rendition for trying everything in the
//! terminal. And you can also use it as a library to embed the wired-up
//! controllers into your own host app.

#![deny(missing_docs)]

pub mod content;
mod site;

pub use site::{Site, SiteBuilder};

/// Re-exports of [`folio_core`] crate.
pub mod core {
    pub use folio_core::*;
}
