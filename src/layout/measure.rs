use crate::error::Result;
use crate::units::Pt;
use std::collections::HashMap;

/// Anything that can report the rendered width of a string in a given font and size.
///
/// Implementations must be deterministic: measuring the same text with the same font
/// and size must always return the same width. Referencing a font that was never
/// registered fails with [`PDFError::UnknownFont`](crate::PDFError::UnknownFont).
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &str, size: Pt) -> Result<Pt>;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn measure(&self, text: &str, font: &str, size: Pt) -> Result<Pt> {
        (**self).measure(text, font, size)
    }
}

/// A measurer where every character has the same advance, expressed as a fraction of
/// the font size. Accepts any font identifier.
///
/// Useful for dry runs and for reasoning about layouts without loading a face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Monospace {
    pub advance: f32,
}

impl Monospace {
    pub fn new(advance: f32) -> Monospace {
        Monospace { advance }
    }
}

impl TextMeasurer for Monospace {
    fn measure(&self, text: &str, _font: &str, size: Pt) -> Result<Pt> {
        Ok(size * (self.advance * text.chars().count() as f32))
    }
}

/// Memoizes measurements for a single font and size.
///
/// Owned by one layout call and dropped with it. The line breaker re-measures growing
/// prefixes of a paragraph and justification re-measures each word, so the same
/// strings come up repeatedly. Errors are never cached.
pub struct MeasureCache<'m, M: TextMeasurer + ?Sized> {
    measurer: &'m M,
    font: &'m str,
    size: Pt,
    widths: HashMap<String, Pt>,
    misses: usize,
}

impl<'m, M: TextMeasurer + ?Sized> MeasureCache<'m, M> {
    pub fn new(measurer: &'m M, font: &'m str, size: Pt) -> Self {
        MeasureCache {
            measurer,
            font,
            size,
            widths: HashMap::new(),
            misses: 0,
        }
    }

    pub fn measure(&mut self, text: &str) -> Result<Pt> {
        if let Some(width) = self.widths.get(text) {
            return Ok(*width);
        }

        let width = self.measurer.measure(text, self.font, self.size)?;
        self.misses += 1;
        self.widths.insert(text.to_string(), width);
        Ok(width)
    }

    /// How many times the underlying measurer has actually been called
    pub fn misses(&self) -> usize {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PDFError;
    use std::cell::Cell;

    struct Counting {
        calls: Cell<usize>,
    }

    impl TextMeasurer for Counting {
        fn measure(&self, text: &str, font: &str, size: Pt) -> Result<Pt> {
            self.calls.set(self.calls.get() + 1);
            if font != "mono" {
                return Err(PDFError::UnknownFont(font.to_string()));
            }
            Ok(size * text.len() as f32)
        }
    }

    #[test]
    fn monospace_scales_with_size() {
        let m = Monospace::new(0.5);
        assert_eq!(m.measure("abcd", "any", Pt(10.0)).unwrap(), Pt(20.0));
        assert_eq!(m.measure("", "any", Pt(10.0)).unwrap(), Pt(0.0));
    }

    #[test]
    fn cache_calls_measurer_once_per_string() {
        let counting = Counting {
            calls: Cell::new(0),
        };
        let mut cache = MeasureCache::new(&counting, "mono", Pt(1.0));

        assert_eq!(cache.measure("hello").unwrap(), Pt(5.0));
        assert_eq!(cache.measure("hello").unwrap(), Pt(5.0));
        assert_eq!(cache.measure("hi").unwrap(), Pt(2.0));

        assert_eq!(counting.calls.get(), 2);
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn cache_does_not_remember_errors() {
        let counting = Counting {
            calls: Cell::new(0),
        };
        let mut cache = MeasureCache::new(&counting, "missing", Pt(1.0));

        assert!(matches!(
            cache.measure("x"),
            Err(PDFError::UnknownFont(f)) if f == "missing"
        ));
        assert!(cache.measure("x").is_err());
        assert_eq!(counting.calls.get(), 2);
    }
}
