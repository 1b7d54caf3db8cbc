use crate::colour::Colour;
use crate::content::render_spans;
use crate::font::Font;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::PDFError;
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf};

/// Margins are guidelines for layout: nothing stops text from being painted
/// outside them. They also determine each page's `ArtBox` in the generated PDF.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Specify each margin, clockwise from the top (the same order as CSS)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins::trbl(value, value, value, value)
    }

    pub fn symmetric<D: Into<Pt>>(vertical: D, horizontal: D) -> Margins {
        let vertical: Pt = vertical.into();
        let horizontal: Pt = horizontal.into();
        Margins::trbl(vertical, horizontal, vertical, horizontal)
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A run of text positioned in PDF page space (origin at the bottom left)
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content should live, i.e. within the margins
    pub content_box: Rect,
    /// Text painted on the page, in painting order
    pub spans: Vec<SpanLayout>,
}

impl Page {
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let margins = margins.unwrap_or_default();
        let (width, height) = size;
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: width - margins.right,
                y2: height - margins.top,
            },
            spans: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    /// Distance from the top of the page to the top of the content box
    pub fn top_margin(&self) -> Pt {
        self.media_box.y2 - self.content_box.y2
    }

    /// Convert a top-down y coordinate into PDF page space
    pub fn flip_y(&self, y: Pt) -> Pt {
        self.media_box.y2 - y
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.spans.push(span);
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs
            .get(RefType::Page(page_index))
            .ok_or(PDFError::PageMissing)?;
        let page_tree = refs
            .get(RefType::PageTree)
            .ok_or(PDFError::PageMissing)?;
        let content_id = refs.allocate(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(page_tree);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(font_id.index())) {
                resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_spans(&self.spans, fonts)?;
        writer.stream(content_id, rendered.as_slice());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize::A4;

    #[test]
    fn content_box_sits_inside_the_margins() {
        let page = Page::new((Pt(600.0), Pt(800.0)), Some(Margins::trbl(Pt(10.0), Pt(20.0), Pt(30.0), Pt(40.0))));
        assert_eq!(
            page.content_box,
            Rect {
                x1: Pt(40.0),
                y1: Pt(30.0),
                x2: Pt(580.0),
                y2: Pt(790.0),
            }
        );
        assert_eq!(page.top_margin(), Pt(10.0));
    }

    #[test]
    fn flipping_measures_from_the_top() {
        let page = Page::new(A4, None);
        assert_eq!(page.flip_y(Pt(0.0)), page.height());
        assert_eq!(page.flip_y(page.height()), Pt(0.0));
    }
}
