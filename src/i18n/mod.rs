// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the viewer.
//!
//! This module provides localization capabilities using the Fluent localization system.
//! It handles language detection, translation file loading, and string formatting.
//!
//! # Features
//!
//! - Automatic locale detection from an explicit override, config, or system settings
//! - Embedded `.ftl` translation files
//! - Runtime language switching
//! - Fallback to the default locale when translations are missing

pub mod fluent;

pub use fluent::{I18n, DEFAULT_LOCALE};
