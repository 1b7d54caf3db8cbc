use crate::{
    font::Font,
    info::Info,
    layout::TextMeasurer,
    page::Page,
    refs::{ObjectReferences, RefType},
    FontRegistry, FontSource, PDFError, Pt,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::io::Write;

#[derive(Default)]
/// A document stores pages and fonts, then renders them all out with a call to
/// [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: FontRegistry,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its id
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Register a font under `name`, trying `sources` in order.
    /// See [FontRegistry::register]
    pub fn register_font<S, I>(&mut self, name: S, sources: I) -> Result<Id<Font>, PDFError>
    where
        S: ToString,
        I: IntoIterator,
        I::Item: Into<FontSource>,
    {
        self.fonts.register(name, sources)
    }

    /// Write the entire document to the writer. The whole document is rendered in
    /// memory first, then written out in one go.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), PDFError> {
        let Document {
            info,
            pages,
            page_order,
            fonts,
        } = self;

        let mut refs = ObjectReferences::new();
        let catalog_id = refs.allocate(RefType::Catalog);
        let page_tree_id = refs.allocate(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..page_order.len())
            .map(|i| refs.allocate(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.fonts().iter() {
            font.write(&mut refs, id, &mut writer);
        }

        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages.get(*id).ok_or(PDFError::PageMissing)?;
            page.write(&mut refs, page_index, fonts.fonts(), &mut writer)?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        let bytes = writer.finish();
        tracing::debug!(pages = page_order.len(), bytes = bytes.len(), "wrote document");
        w.write_all(bytes.as_slice())?;
        Ok(())
    }
}

impl TextMeasurer for Document {
    fn measure(&self, text: &str, font: &str, size: Pt) -> Result<Pt, PDFError> {
        self.fonts.measure(text, font, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::testing::notdef_only;
    use crate::pagesize::A4;

    #[test]
    fn writes_an_empty_page() {
        let mut doc = Document::default();
        doc.set_info(Info::new().title("Blank"));
        doc.add_page(Page::new(A4, None));

        let mut out: Vec<u8> = Vec::new();
        doc.write(&mut out).unwrap();

        assert!(out.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("/Type /Page"));
        assert!(text.contains("(Blank)"));
    }

    #[test]
    fn re_registered_fonts_are_embedded_once() {
        let write = |registrations: usize| {
            let mut doc = Document::default();
            for _ in 0..registrations {
                doc.register_font("body", [notdef_only(600)]).unwrap();
            }
            doc.add_page(Page::new(A4, None));
            let mut out: Vec<u8> = Vec::new();
            doc.write(&mut out).unwrap();
            String::from_utf8_lossy(&out).matches("/FontFile2").count()
        };

        assert_eq!(write(1), 1);
        assert_eq!(write(2), 1);
    }

    #[test]
    fn unknown_fonts_cannot_be_measured() {
        let doc = Document::default();
        assert!(matches!(
            doc.measure("x", "courier", Pt(12.0)),
            Err(PDFError::UnknownFont(_))
        ));
    }
}
