use crate::font::Font;
use crate::layout::TextMeasurer;
use crate::{PDFError, Pt};
use id_arena::{Arena, Id};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Somewhere a font can be loaded from
#[derive(Clone)]
pub enum FontSource {
    /// Raw TTF / OTF data
    Bytes(Vec<u8>),
    /// A font file on disk
    Path(PathBuf),
}

impl FontSource {
    fn load(&self) -> Result<Font, PDFError> {
        match self {
            FontSource::Bytes(bytes) => Font::load(bytes.clone()),
            FontSource::Path(path) => Font::load(std::fs::read(path)?),
        }
    }
}

impl fmt::Debug for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
            FontSource::Path(path) => write!(f, "Path({})", path.display()),
        }
    }
}

impl From<PathBuf> for FontSource {
    fn from(path: PathBuf) -> Self {
        FontSource::Path(path)
    }
}

impl From<&str> for FontSource {
    fn from(path: &str) -> Self {
        FontSource::Path(PathBuf::from(path))
    }
}

impl From<Vec<u8>> for FontSource {
    fn from(bytes: Vec<u8>) -> Self {
        FontSource::Bytes(bytes)
    }
}

/// The fonts of a document, each registered under a name that text is laid out and
/// painted with.
///
/// Fonts are stored in registration order; that order is also the order in which they
/// are embedded in the PDF.
#[derive(Default)]
pub struct FontRegistry {
    fonts: Arena<Font>,
    names: HashMap<String, Id<Font>>,
}

impl FontRegistry {
    /// Register a font under `name`, trying each source in order and keeping the first
    /// one that loads. Registering a name again replaces what it refers to.
    ///
    /// Fails with [PDFError::FontLoad] if no source could be loaded.
    pub fn register<S, I>(&mut self, name: S, sources: I) -> Result<Id<Font>, PDFError>
    where
        S: ToString,
        I: IntoIterator,
        I::Item: Into<FontSource>,
    {
        let name = name.to_string();
        let mut attempts = 0usize;
        for source in sources.into_iter().map(Into::into) {
            attempts += 1;
            match source.load() {
                Ok(font) => {
                    tracing::info!(font = %name, ?source, "registered font");
                    return Ok(self.insert(name, font));
                }
                Err(e) => {
                    tracing::warn!(font = %name, ?source, error = %e, "font source failed to load");
                }
            }
        }

        Err(PDFError::FontLoad {
            font: name,
            attempts,
        })
    }

    /// Register an already loaded font under `name`. A name that is already registered
    /// keeps its id and the old face is dropped, so only live fonts are embedded.
    pub fn insert<S: ToString>(&mut self, name: S, font: Font) -> Id<Font> {
        let name = name.to_string();
        if let Some(&id) = self.names.get(&name) {
            self.fonts[id] = font;
            return id;
        }
        let id = self.fonts.alloc(font);
        self.names.insert(name, id);
        id
    }

    /// Number of distinct font faces that will be embedded
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn id(&self, name: &str) -> Result<Id<Font>, PDFError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| PDFError::UnknownFont(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Result<&Font, PDFError> {
        let id = self.id(name)?;
        self.fonts
            .get(id)
            .ok_or_else(|| PDFError::UnknownFont(name.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub(crate) fn fonts(&self) -> &Arena<Font> {
        &self.fonts
    }
}

impl TextMeasurer for FontRegistry {
    fn measure(&self, text: &str, font: &str, size: Pt) -> Result<Pt, PDFError> {
        Ok(self.get(font)?.width_of(text, size))
    }
}
