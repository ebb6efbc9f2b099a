// SPDX-License-Identifier: MPL-2.0
//! Keeps Tab focus cycling inside the overlay.

use crate::host::Control;

/// Where Tab must move focus to stay inside the overlay.
///
/// Only the two ends wrap: Shift+Tab on the first control goes to the last,
/// Tab on the last goes to the first. Anywhere else the platform's own
/// tabbing applies and `None` is returned.
#[must_use]
pub fn next_focus(order: &[Control], current: Option<Control>, shift: bool) -> Option<Control> {
    let (first, last) = (*order.first()?, *order.last()?);
    let current = current?;
    if shift && current == first {
        Some(last)
    } else if !shift && current == last {
        Some(first)
    } else {
        None
    }
}
