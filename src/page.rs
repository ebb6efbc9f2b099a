// SPDX-License-Identifier: MPL-2.0
//! Page snapshot and collection discovery.
//!
//! The host describes the images of the page as a flat [`PageSnapshot`] in
//! document order. Each image records the content region it belongs to, so
//! the viewer can decide whether a click qualifies and which images form the
//! collection around it.

use crate::domain::{Collection, ImageRef, RichCaption};

/// An image element on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// A content region (the nearest content ancestor of an image).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct PageImage {
    pub node: NodeId,
    pub src: String,
    pub alt: String,
    pub region: Option<RegionId>,
    /// Inside an extra-text block.
    pub in_extra_text: bool,
    /// Marked as an attachment.
    pub attachment: bool,
    /// Markup of the enclosing figure's caption, already sanitized.
    pub figure_caption: Option<String>,
}

impl PageImage {
    #[must_use]
    pub fn new(node: NodeId, src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            node,
            src: src.into(),
            alt: alt.into(),
            region: None,
            in_extra_text: false,
            attachment: false,
            figure_caption: None,
        }
    }

    #[must_use]
    pub fn in_region(mut self, region: RegionId) -> Self {
        self.region = Some(region);
        self
    }

    #[must_use]
    pub fn in_extra_text(mut self) -> Self {
        self.in_extra_text = true;
        self
    }

    #[must_use]
    pub fn as_attachment(mut self) -> Self {
        self.attachment = true;
        self
    }

    #[must_use]
    pub fn with_figure_caption(mut self, markup: impl Into<String>) -> Self {
        self.figure_caption = Some(markup.into());
        self
    }

    #[must_use]
    pub fn to_image_ref(&self) -> ImageRef {
        let image = ImageRef::new(self.src.clone(), self.alt.clone());
        match &self.figure_caption {
            Some(markup) => image.with_caption(RichCaption::from_markup(markup.clone())),
            None => image,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSnapshot {
    images: Vec<PageImage>,
}

impl PageSnapshot {
    /// `images` must be in document order.
    #[must_use]
    pub fn new(images: Vec<PageImage>) -> Self {
        Self { images }
    }

    #[must_use]
    pub fn image(&self, node: NodeId) -> Option<&PageImage> {
        self.images.iter().find(|image| image.node == node)
    }

    /// An image qualifies when it lives in `boundary` and is either inside
    /// an extra-text block or an attachment.
    #[must_use]
    pub fn is_viewer_image(&self, node: NodeId, boundary: Option<RegionId>) -> bool {
        self.image(node)
            .is_some_and(|image| qualifies(image, boundary))
    }

    /// Collects the qualifying images sharing the region of `node`, and the
    /// position of `node` among them.
    ///
    /// An image outside any region opens on its own. Returns `None` when
    /// `node` is unknown or does not qualify within its own region.
    #[must_use]
    pub fn find_collection(&self, node: NodeId) -> Option<(Collection, usize)> {
        let clicked = self.image(node)?;
        let Some(region) = clicked.region else {
            return Some((Collection::single(clicked.to_image_ref()), 0));
        };
        let members: Vec<&PageImage> = self
            .images
            .iter()
            .filter(|image| qualifies(image, Some(region)))
            .collect();
        let index = members.iter().position(|image| image.node == node)?;
        let collection = Collection::new(members.iter().map(|image| image.to_image_ref()).collect())?;
        Some((collection, index))
    }
}

fn qualifies(image: &PageImage, boundary: Option<RegionId>) -> bool {
    image.region.is_some() && image.region == boundary && (image.in_extra_text || image.attachment)
}
