// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core viewer types with ZERO external dependencies.
//!
//! This module contains pure value objects and rules. It depends only on
//! `std` and the crate's default constants.
//!
//! # Modules
//!
//! - [`geometry`]: Plane types ([`Point`](geometry::Point), [`Vector`](geometry::Vector),
//!   [`Size`](geometry::Size))
//! - [`image`]: Image types ([`ImageRef`](image::ImageRef), [`RichCaption`](image::RichCaption),
//!   [`CaptionHtml`](image::CaptionHtml), [`Collection`](image::Collection))
//! - [`newtypes`]: Tunables ([`ZoomStep`](newtypes::ZoomStep),
//!   [`ZoomCeiling`](newtypes::ZoomCeiling), [`FallbackDelay`](newtypes::FallbackDelay),
//!   [`SwipeThresholds`](newtypes::SwipeThresholds))

pub mod geometry;
pub mod image;
pub mod newtypes;

pub use geometry::{Point, Size, Vector};
pub use image::{escape_html, CaptionHtml, Collection, ImageRef, RichCaption};
pub use newtypes::{FallbackDelay, SwipeThresholds, ZoomCeiling, ZoomStep};
