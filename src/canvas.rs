use crate::error::Result;
use crate::layout::TextMeasurer;
use crate::units::Pt;

/// Something text can be painted on. The layout engine only ever asks a canvas to
/// measure strings and to paint them at top-down coordinates; it knows nothing about
/// how the canvas stores or renders them.
pub trait Canvas: TextMeasurer {
    /// Paint `text` with its baseline origin at `(x, y)`
    fn paint(&mut self, font: &str, size: Pt, text: &str, x: Pt, y: Pt) -> Result<()>;
}

/// One call to [Canvas::paint]
#[derive(Debug, Clone, PartialEq)]
pub struct PaintedText {
    pub font: String,
    pub size: Pt,
    pub text: String,
    pub x: Pt,
    pub y: Pt,
}

/// A canvas that paints nothing and instead remembers every call, measuring with
/// the wrapped measurer. Useful for dry runs and for checking what a layout would
/// paint without producing a document.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas<M> {
    measurer: M,
    pub painted: Vec<PaintedText>,
}

impl<M: TextMeasurer> RecordingCanvas<M> {
    pub fn new(measurer: M) -> RecordingCanvas<M> {
        RecordingCanvas {
            measurer,
            painted: Vec::new(),
        }
    }
}

impl<M: TextMeasurer> TextMeasurer for RecordingCanvas<M> {
    fn measure(&self, text: &str, font: &str, size: Pt) -> Result<Pt> {
        self.measurer.measure(text, font, size)
    }
}

impl<M: TextMeasurer> Canvas for RecordingCanvas<M> {
    fn paint(&mut self, font: &str, size: Pt, text: &str, x: Pt, y: Pt) -> Result<()> {
        // same contract as a real canvas: unknown fonts can't be painted
        self.measurer.measure(text, font, size)?;
        self.painted.push(PaintedText {
            font: font.to_string(),
            size,
            text: text.to_string(),
            x,
            y,
        });
        Ok(())
    }
}
