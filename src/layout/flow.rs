use super::breaker::{break_lines_with, tokenize};
use super::measure::{MeasureCache, TextMeasurer};
use super::placer::{place_lines_with, Align, LayoutResult};
use crate::canvas::Canvas;
use crate::error::{ensure_positive, Result};
use crate::units::Pt;

/// Horizontal offset of some lines of a paragraph from the left of its box. The
/// offset narrows those lines: they are broken and aligned within what remains.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub enum Indent {
    #[default]
    None,
    /// Only the first line is offset
    FirstLine(Pt),
    /// Every line but the first is offset
    Hanging(Pt),
}

impl Indent {
    /// Offset of the line at `index` within its paragraph
    pub fn for_line(&self, index: usize) -> Pt {
        match *self {
            Indent::FirstLine(indent) if index == 0 => indent,
            Indent::Hanging(indent) if index > 0 => indent,
            _ => Pt(0.0),
        }
    }

    fn amount(&self) -> Pt {
        match *self {
            Indent::None => Pt(0.0),
            Indent::FirstLine(indent) | Indent::Hanging(indent) => indent,
        }
    }
}

/// Everything needed to flow a block of text into lines.
///
/// ```
/// use pdf_flow::layout::{layout_text, Align, LayoutRequest, Monospace};
/// use pdf_flow::Pt;
///
/// let request = LayoutRequest::new("This is a long text", "mono", Pt(10.0), Pt(50.0), Pt(15.0))
///     .at(Pt(50.0), Pt(100.0))
///     .align(Align::Left);
/// let result = layout_text(&request, &Monospace::new(0.5)).expect("valid request");
///
/// assert_eq!(result.len(), 2);
/// assert_eq!(result.cursor_y, Pt(130.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutRequest {
    pub text: String,
    pub font: String,
    pub size: Pt,
    /// Lines are broken so that they are at most this wide
    pub max_width: Pt,
    /// Vertical distance between consecutive baselines
    pub line_height: Pt,
    /// Top-left origin of the first line
    pub start: (Pt, Pt),
    pub align: Align,
    /// Width of the box lines are aligned in. Defaults to `max_width`
    pub box_width: Option<Pt>,
    /// Alignment of the final line, if it should differ from `align`
    pub last_line: Option<Align>,
    pub indent: Indent,
}

impl LayoutRequest {
    /// A left-aligned request starting at (0, 0)
    pub fn new<T: ToString, F: ToString>(
        text: T,
        font: F,
        size: Pt,
        max_width: Pt,
        line_height: Pt,
    ) -> LayoutRequest {
        LayoutRequest {
            text: text.to_string(),
            font: font.to_string(),
            size,
            max_width,
            line_height,
            start: (Pt(0.0), Pt(0.0)),
            align: Align::Left,
            box_width: None,
            last_line: None,
            indent: Indent::None,
        }
    }

    pub fn at(mut self, x: Pt, y: Pt) -> Self {
        self.start = (x, y);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn box_width(mut self, box_width: Pt) -> Self {
        self.box_width = Some(box_width);
        self
    }

    /// Place the final line with its own alignment, e.g. [Align::Left] at the end of
    /// a justified paragraph. Without this, the last line is treated like every other.
    pub fn last_line(mut self, align: Align) -> Self {
        self.last_line = Some(align);
        self
    }

    /// Indent the first line, or every line after it, of each paragraph
    pub fn indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn effective_box_width(&self) -> Pt {
        self.box_width.unwrap_or(self.max_width)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("max_width", self.max_width)?;
        ensure_positive("line_height", self.line_height)?;
        ensure_positive("box_width", self.effective_box_width())?;
        if self.indent != Indent::None {
            ensure_positive("indented_max_width", self.max_width - self.indent.amount())?;
            ensure_positive(
                "indented_box_width",
                self.effective_box_width() - self.indent.amount(),
            )?;
        }
        Ok(())
    }
}

/// Break and place the request's text, measuring with `measurer`.
///
/// All widths and heights are validated before anything is measured. Measurements
/// are memoized for the duration of this call only.
pub fn layout_text<M: TextMeasurer + ?Sized>(
    request: &LayoutRequest,
    measurer: &M,
) -> Result<LayoutResult> {
    request.validate()?;

    let mut cache = MeasureCache::new(measurer, &request.font, request.size);
    let tokens = tokenize(&request.text);
    let indent = request.indent;
    let lines = break_lines_with(
        &tokens,
        |li| request.max_width - indent.for_line(li),
        |s| cache.measure(s),
    )?;

    let last = lines.len().saturating_sub(1);
    let result = place_lines_with(
        &lines,
        request.start,
        request.line_height,
        request.effective_box_width(),
        |s| cache.measure(s),
        |li| {
            let align = match request.last_line {
                Some(align) if li == last => align,
                _ => request.align,
            };
            (align, indent.for_line(li))
        },
    )?;

    tracing::debug!(
        font = %request.font,
        tokens = tokens.len(),
        lines = result.len(),
        measured = cache.misses(),
        cursor_y = %result.cursor_y,
        "laid out text"
    );

    Ok(result)
}

/// Lay out the request and paint it on the canvas in one go.
///
/// Nothing is painted unless the whole layout succeeds.
pub fn flow_text<C: Canvas + ?Sized>(request: &LayoutRequest, canvas: &mut C) -> Result<LayoutResult> {
    let result = layout_text(request, &*canvas)?;
    result.paint(canvas, &request.font, request.size)?;
    Ok(result)
}

/// Split text into paragraphs at blank lines. Paragraphs that contain nothing but
/// whitespace are dropped.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs
}

/// Lay out each paragraph of the request's text in turn, leaving `paragraph_spacing`
/// between the end of one paragraph and the start of the next.
///
/// Each paragraph is laid out exactly as [layout_text] would on its own; the last
/// line alignment and the indent apply to every paragraph.
pub fn layout_paragraphs<M: TextMeasurer + ?Sized>(
    request: &LayoutRequest,
    paragraph_spacing: Pt,
    measurer: &M,
) -> Result<Vec<LayoutResult>> {
    request.validate()?;

    let (x, mut y) = request.start;
    let mut results: Vec<LayoutResult> = Vec::new();
    for (pi, paragraph) in split_paragraphs(&request.text).into_iter().enumerate() {
        if pi > 0 {
            y += paragraph_spacing;
        }
        let mut sub = request.clone().at(x, y);
        sub.text = paragraph;

        let result = layout_text(&sub, measurer)?;
        y = result.cursor_y;
        results.push(result);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;
    use crate::layout::testing::Widths;
    use crate::layout::Monospace;
    use crate::PDFError;

    fn request(text: &str) -> LayoutRequest {
        LayoutRequest::new(text, "mono", Pt(10.0), Pt(100.0), Pt(15.0)).at(Pt(50.0), Pt(80.0))
    }

    #[test]
    fn empty_text_lays_out_nothing() {
        let result = layout_text(&request(""), &Widths::default()).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.cursor_y, Pt(80.0));

        let result = layout_text(&request(" \n\t "), &Widths::default()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn cursor_ends_one_line_below_the_last_line() {
        let result = layout_text(
            &request("This is the first paragraph with no indentation at all"),
            &Widths::default(),
        )
        .unwrap();

        let texts: Vec<&str> = result.lines.iter().map(|l| l.line.text()).collect();
        assert_eq!(
            texts,
            vec!["This is", "the first", "paragraph", "with no", "indentation", "at all"]
        );
        assert_eq!(result.cursor_y, Pt(80.0 + 15.0 * 6.0));
    }

    #[test]
    fn invalid_requests_fail_before_measuring() {
        struct Exploding;
        impl TextMeasurer for Exploding {
            fn measure(&self, _: &str, _: &str, _: Pt) -> Result<Pt> {
                panic!("should not measure an invalid request");
            }
        }

        let no_width = LayoutRequest::new("text", "f", Pt(10.0), Pt(0.0), Pt(12.0));
        assert!(matches!(
            layout_text(&no_width, &Exploding),
            Err(PDFError::InvalidLayoutConfig {
                parameter: "max_width",
                ..
            })
        ));

        let no_height = LayoutRequest::new("text", "f", Pt(10.0), Pt(10.0), Pt(-1.0));
        assert!(layout_text(&no_height, &Exploding).is_err());

        let no_box = LayoutRequest::new("text", "f", Pt(10.0), Pt(10.0), Pt(12.0)).box_width(Pt(0.0));
        assert!(matches!(
            layout_text(&no_box, &Exploding),
            Err(PDFError::InvalidLayoutConfig {
                parameter: "box_width",
                ..
            })
        ));
    }

    #[test]
    fn last_line_can_be_marked_explicitly() {
        let request = request("aaaa bbbb cccc dddd eeee")
            .align(Align::Justify)
            .last_line(Align::Left);
        let result = layout_text(&request, &Widths::default()).unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result.lines[0].align, Align::Justify);
        assert_eq!(result.lines[1].align, Align::Justify);
        assert_eq!(result.lines[2].align, Align::Left);
        assert_eq!(result.lines[2].runs.len(), 1);
    }

    #[test]
    fn box_width_can_differ_from_wrap_width() {
        let request = request("abc").align(Align::Right).box_width(Pt(200.0));
        let result = layout_text(&request, &Widths::default()).unwrap();
        assert_eq!(result.lines[0].x, Pt(50.0 + 200.0 - 30.0));
    }

    #[test]
    fn flow_paints_every_run_once_layout_succeeds() {
        let mut canvas = RecordingCanvas::new(Monospace::new(1.0));
        let request = LayoutRequest::new("one two three", "mono", Pt(10.0), Pt(70.0), Pt(12.0))
            .at(Pt(10.0), Pt(20.0))
            .align(Align::Justify);

        let result = flow_text(&request, &mut canvas).unwrap();

        let runs: usize = result.lines.iter().map(|l| l.runs.len()).sum();
        assert_eq!(canvas.painted.len(), runs);
        assert_eq!(canvas.painted[0].text, "one");
        assert_eq!(canvas.painted[0].font, "mono");
        assert_eq!((canvas.painted[0].x, canvas.painted[0].y), (Pt(10.0), Pt(20.0)));
    }

    #[test]
    fn nothing_is_painted_when_layout_fails() {
        let mut canvas = RecordingCanvas::new(Monospace::new(1.0));
        let request = LayoutRequest::new("one two", "mono", Pt(10.0), Pt(-1.0), Pt(12.0));
        assert!(flow_text(&request, &mut canvas).is_err());
        assert!(canvas.painted.is_empty());
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let text = "First paragraph\nstill first.\n\n  \nSecond one.\r\n\r\nThird";
        assert_eq!(
            split_paragraphs(text),
            vec!["First paragraph\nstill first.", "Second one.", "Third"]
        );
        assert!(split_paragraphs("\n\n   \n").is_empty());
    }

    #[test]
    fn paragraphs_chain_the_cursor_with_spacing() {
        let request = request("aaa bbb\n\nddd");
        let results = layout_paragraphs(&request, Pt(20.0), &Widths::default()).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].lines[0].y, Pt(80.0));
        assert_eq!(results[0].cursor_y, Pt(95.0));
        assert_eq!(results[1].lines[0].y, Pt(115.0));
        assert_eq!(results[1].cursor_y, Pt(130.0));
    }

    fn indented(text: &str, indent: Indent) -> LayoutRequest {
        LayoutRequest::new(text, "mono", Pt(10.0), Pt(80.0), Pt(15.0))
            .at(Pt(50.0), Pt(80.0))
            .indent(indent)
    }

    fn texts_and_xs(result: &LayoutResult) -> Vec<(&str, Pt)> {
        result.lines.iter().map(|l| (l.line.text(), l.x)).collect()
    }

    #[test]
    fn first_line_indent_narrows_only_the_first_line() {
        let result = layout_text(
            &indented("aaa bbb ccc ddd", Indent::FirstLine(Pt(20.0))),
            &Widths::default(),
        )
        .unwrap();

        assert_eq!(
            texts_and_xs(&result),
            vec![("aaa", Pt(70.0)), ("bbb ccc", Pt(50.0)), ("ddd", Pt(50.0))]
        );
    }

    #[test]
    fn hanging_indent_narrows_every_line_but_the_first() {
        let result = layout_text(
            &indented("aaa bbb ccc ddd", Indent::Hanging(Pt(20.0))),
            &Widths::default(),
        )
        .unwrap();

        assert_eq!(
            texts_and_xs(&result),
            vec![("aaa bbb", Pt(50.0)), ("ccc", Pt(70.0)), ("ddd", Pt(70.0))]
        );
    }

    #[test]
    fn justified_indented_lines_still_end_at_the_box_edge() {
        let request = indented("aa bb cc dd", Indent::FirstLine(Pt(20.0))).align(Align::Justify);
        let result = layout_text(&request, &Widths::default()).unwrap();

        let first = &result.lines[0];
        assert_eq!(first.line.text(), "aa bb");
        assert_eq!(first.word_spacing, Some(Pt(20.0)));
        let xs: Vec<Pt> = first.runs.iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![Pt(70.0), Pt(110.0)]);

        // words 40 wide, box 80 wide
        assert_eq!(result.lines[1].word_spacing, Some(Pt(40.0)));
    }

    #[test]
    fn indents_apply_to_every_paragraph() {
        let request = indented("aaa bbb\n\nccc ddd", Indent::FirstLine(Pt(20.0)));
        let results = layout_paragraphs(&request, Pt(0.0), &Widths::default()).unwrap();

        assert_eq!(results.len(), 2);
        for result in results.iter() {
            assert_eq!(result.lines[0].x, Pt(70.0));
        }
    }

    #[test]
    fn indents_as_wide_as_the_box_are_rejected() {
        let result = layout_text(
            &indented("aaa", Indent::FirstLine(Pt(80.0))),
            &Widths::default(),
        );
        assert!(matches!(
            result,
            Err(PDFError::InvalidLayoutConfig {
                parameter: "indented_max_width",
                ..
            })
        ));
    }
}
