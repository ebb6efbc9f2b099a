// SPDX-License-Identifier: MPL-2.0
//! Viewable images, their captions and the collection they are browsed in.

use std::fmt;

/// One viewable image as handed over by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
    pub caption: Option<RichCaption>,
}

impl ImageRef {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            caption: None,
        }
    }

    #[must_use]
    pub fn with_caption(mut self, caption: RichCaption) -> Self {
        self.caption = Some(caption);
        self
    }

    /// Resolves what the caption region shows for this image.
    ///
    /// A structured caption wins when it has visible text, then the alt text
    /// (escaped), then nothing.
    #[must_use]
    pub fn display_caption(&self) -> Option<CaptionHtml> {
        if let Some(caption) = &self.caption {
            if !caption.is_blank() {
                return Some(CaptionHtml(caption.markup().trim().to_string()));
            }
        }
        let alt = self.alt.trim();
        if alt.is_empty() {
            None
        } else {
            Some(CaptionHtml(escape_html(alt)))
        }
    }
}

/// Caption markup that was sanitized upstream and is inserted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichCaption {
    markup: String,
}

impl RichCaption {
    pub fn from_markup(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Text content with tags removed.
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = String::with_capacity(self.markup.len());
        let mut in_tag = false;
        for ch in self.markup.chars() {
            match ch {
                '<' => in_tag = true,
                '>' if in_tag => in_tag = false,
                _ if !in_tag => text.push(ch),
                _ => {}
            }
        }
        text
    }

    /// A caption whose text content is only whitespace does not count.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text().trim().is_empty()
    }
}

/// Display-ready caption HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionHtml(String);

impl CaptionHtml {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaptionHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escapes text for insertion as HTML element content.
///
/// Matches what a text node serializes to: `&`, `<`, `>` and no-break
/// spaces become entities, quotes are left alone.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Ordered, non-empty set of images browsed in one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    images: Vec<ImageRef>,
}

impl Collection {
    /// Returns `None` for an empty list.
    #[must_use]
    pub fn new(images: Vec<ImageRef>) -> Option<Self> {
        if images.is_empty() {
            None
        } else {
            Some(Self { images })
        }
    }

    #[must_use]
    pub fn single(image: ImageRef) -> Self {
        Self {
            images: vec![image],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ImageRef> {
        self.images.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageRef> {
        self.images.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rich_caption_wins_over_alt() {
        let image = ImageRef::new("a.png", "alt text")
            .with_caption(RichCaption::from_markup("  <em>Sunset</em> over the bay \n"));
        assert_eq!(
            image.display_caption().unwrap().as_str(),
            "<em>Sunset</em> over the bay"
        );
    }

    #[test]
    fn blank_rich_caption_falls_back_to_escaped_alt() {
        let image = ImageRef::new("a.png", " Fish & <chips> ")
            .with_caption(RichCaption::from_markup("<span> </span>"));
        assert_eq!(
            image.display_caption().unwrap().as_str(),
            "Fish &amp; &lt;chips&gt;"
        );
    }

    #[test]
    fn no_caption_and_blank_alt_yields_none() {
        assert!(ImageRef::new("a.png", "   ").display_caption().is_none());
    }

    #[test]
    fn escape_html_leaves_quotes() {
        assert_eq!(escape_html("\"it's\"\u{a0}ok"), "\"it's\"&nbsp;ok");
    }

    #[test]
    fn rich_caption_text_strips_tags() {
        let caption = RichCaption::from_markup("<p>Photo by <a href=\"#\">Ana</a></p>");
        assert_eq!(caption.text(), "Photo by Ana");
    }

    #[test]
    fn empty_collection_is_rejected() {
        assert!(Collection::new(Vec::new()).is_none());
        let collection = Collection::new(vec![ImageRef::new("a", ""), ImageRef::new("b", "")])
            .expect("non-empty");
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get(1).map(|image| image.src.as_str()), Some("b"));
        assert!(collection.get(2).is_none());
    }
}
