use crate::{
    canvas::Canvas,
    colour::{colours, Colour},
    config::OutputConfig,
    document::Document,
    font::Font,
    info::Info,
    layout::TextMeasurer,
    page::{Margins, Page, SpanFont, SpanLayout},
    pagesize::PageSize,
    FontSource, PDFError, Pt,
};
use id_arena::Id;
use std::path::PathBuf;

/// A [Canvas] that paints onto the pages of a PDF [Document].
///
/// Coordinates handed to [Canvas::paint] are top-down (measured from the top left of
/// the page) and are flipped into PDF page space when recorded. Text is painted onto
/// the most recently added page; a page is added on first paint if there is none.
pub struct PdfCanvas {
    document: Document,
    page_size: PageSize,
    margins: Option<Margins>,
    current: Option<Id<Page>>,
    colour: Colour,
}

impl PdfCanvas {
    /// A canvas whose pages all share a size and margins
    pub fn new(page_size: PageSize, margins: Option<Margins>) -> PdfCanvas {
        PdfCanvas {
            document: Document::default(),
            page_size,
            margins,
            current: None,
            colour: colours::BLACK,
        }
    }

    pub fn set_info(&mut self, info: Info) {
        self.document.set_info(info);
    }

    /// Register a font for painting and measuring. See
    /// [`FontRegistry::register`](crate::FontRegistry::register)
    pub fn register_font<S, I>(&mut self, name: S, sources: I) -> Result<Id<Font>, PDFError>
    where
        S: ToString,
        I: IntoIterator,
        I::Item: Into<FontSource>,
    {
        self.document.register_font(name, sources)
    }

    /// The usual fallback chain for a font name: a local `fonts/` directory, then the
    /// system font directories, then any extra sources the caller provides
    pub fn system_font_sources(name: &str) -> Vec<FontSource> {
        let file = format!("{name}.ttf");
        let mut sources: Vec<FontSource> = vec![FontSource::Path(PathBuf::from("fonts").join(&file))];
        for dir in [
            "/usr/share/fonts/truetype",
            "/usr/share/fonts/TTF",
            "/Library/Fonts",
            "/System/Library/Fonts",
            "C:/Windows/Fonts",
        ] {
            sources.push(FontSource::Path(PathBuf::from(dir).join(&file)));
        }
        sources
    }

    /// Start a new page; subsequent painting goes onto it
    pub fn add_page(&mut self) -> Id<Page> {
        let page = Page::new(self.page_size, self.margins.clone());
        let id = self.document.add_page(page);
        self.current = Some(id);
        id
    }

    /// The page currently being painted on, if any
    pub fn page(&self) -> Option<&Page> {
        self.current.and_then(|id| self.document.pages.get(id))
    }

    pub fn page_count(&self) -> usize {
        self.document.page_order.len()
    }

    /// Colour for text painted from now on
    pub fn set_colour(&mut self, colour: Colour) {
        self.colour = colour;
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Write the document to `file_name` in the configured output location
    pub fn save(self, output: &OutputConfig, file_name: &str) -> Result<PathBuf, PDFError> {
        let path = output.path_for(file_name);
        let file = output.create(file_name)?;
        self.document.write(std::io::BufWriter::new(file))?;
        tracing::info!(path = %path.display(), "saved document");
        Ok(path)
    }
}

impl TextMeasurer for PdfCanvas {
    fn measure(&self, text: &str, font: &str, size: Pt) -> Result<Pt, PDFError> {
        self.document.measure(text, font, size)
    }
}

impl Canvas for PdfCanvas {
    fn paint(&mut self, font: &str, size: Pt, text: &str, x: Pt, y: Pt) -> Result<(), PDFError> {
        let font_id = self.document.fonts.id(font)?;
        let page_id = match self.current {
            Some(id) => id,
            None => self.add_page(),
        };
        let colour = self.colour;
        let page = self
            .document
            .pages
            .get_mut(page_id)
            .ok_or(PDFError::PageMissing)?;

        let coords = (x, page.flip_y(y));
        page.add_span(SpanLayout {
            text: text.to_string(),
            font: SpanFont { id: font_id, size },
            colour,
            coords,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{flow_text, LayoutRequest};
    use crate::pagesize::A4;

    #[test]
    fn painting_with_an_unregistered_font_fails_without_adding_pages() {
        let mut canvas = PdfCanvas::new(A4, Some(Margins::all(Pt(50.0))));
        let result = canvas.paint("arial", Pt(12.0), "Hello", Pt(50.0), Pt(100.0));

        assert!(matches!(result, Err(PDFError::UnknownFont(_))));
        assert_eq!(canvas.page_count(), 0);
    }

    #[test]
    fn flowing_with_an_unregistered_font_paints_nothing() {
        let mut canvas = PdfCanvas::new(A4, None);
        canvas.add_page();
        let request = LayoutRequest::new("some text", "arial", Pt(12.0), Pt(200.0), Pt(15.0));

        assert!(flow_text(&request, &mut canvas).is_err());
        assert!(canvas.page().map(|p| p.spans.is_empty()).unwrap_or(false));
    }

    #[test]
    fn fallback_chain_starts_locally() {
        let sources = PdfCanvas::system_font_sources("arial");
        match &sources[0] {
            FontSource::Path(path) => assert_eq!(path, &PathBuf::from("fonts/arial.ttf")),
            other => panic!("unexpected first source {other:?}"),
        }
        assert!(sources.len() > 1);
    }

    #[test]
    fn pages_are_added_in_order() {
        let mut canvas = PdfCanvas::new(A4, None);
        let first = canvas.add_page();
        let second = canvas.add_page();
        assert_ne!(first, second);
        assert_eq!(canvas.page_count(), 2);
        assert_eq!(canvas.document().page_order, vec![first, second]);
    }
}
