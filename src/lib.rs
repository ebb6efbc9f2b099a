// SPDX-License-Identifier: MPL-2.0
//! `lens_lightbox` is a headless image viewer overlay.
//!
//! It opens a modal over one image of a collection and layers zoom, pan,
//! swipe, keyboard navigation, fullscreen and captions on top of it, while
//! keeping focus trapped inside and restoring page scroll and focus on close.
//!
//! The viewer never touches a platform directly: everything it needs from the
//! page goes through the [`host::Host`] port, and the platform reports back
//! by feeding [`viewer::Event`]s into [`viewer::Viewer::handle`].

#![doc(html_root_url = "https://docs.rs/lens_lightbox/0.1.0")]

pub mod config;
pub mod domain;
pub mod error;
pub mod host;
pub mod i18n;
pub mod page;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_utils;

pub use host::{HeadlessHost, Host};
pub use viewer::{Event, OpenOutcome, Response, Viewer};
