use super::breaker::Line;
use crate::canvas::Canvas;
use crate::error::{ensure_positive, Result};
use crate::units::Pt;

/// How lines are positioned horizontally within their box
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
    /// Stretch the space between words so the line spans the whole box. Lines of a
    /// single word can't be stretched and are placed as [Align::Left]
    Justify,
}

/// A piece of text painted at a single x coordinate. A placed line paints one run for
/// the whole line, or one run per word when it has been justified.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub x: Pt,
}

/// A line with its position on the page
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub line: Line,
    /// Origin of the line, i.e. the x of its first word
    pub x: Pt,
    pub y: Pt,
    /// The alignment this line was actually placed with
    pub align: Align,
    /// The gap between words of a stretched justified line. Negative when the words
    /// don't fit the box, in which case they overlap
    pub word_spacing: Option<Pt>,
    pub runs: Vec<Run>,
}

/// The output of a layout: every placed line in order, plus where the cursor ended
/// up so that further content can continue below it.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub lines: Vec<PlacedLine>,
    pub cursor_y: Pt,
}

impl LayoutResult {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Hand every run to the canvas in the order it was laid out
    pub fn paint<C: Canvas + ?Sized>(&self, canvas: &mut C, font: &str, size: Pt) -> Result<()> {
        for placed in self.lines.iter() {
            for run in placed.runs.iter() {
                canvas.paint(font, size, &run.text, run.x, placed.y)?;
            }
        }
        Ok(())
    }
}

/// Where a line of the given width starts within a box at `x0`. Shared with the
/// single-line alignment helpers so both agree to the last bit.
pub(crate) fn origin_x(align: Align, x0: Pt, box_width: Pt, width: Pt) -> Pt {
    match align {
        Align::Left | Align::Justify => x0,
        Align::Right => x0 + box_width - width,
        Align::Center => x0 + (box_width - width) / 2.0,
    }
}

/// Position lines top to bottom starting at `start`, one `line_height` apart.
///
/// Fails with [`PDFError::InvalidLayoutConfig`](crate::PDFError::InvalidLayoutConfig)
/// if `line_height` or `box_width` isn't positive. Overflow is never an error: lines
/// wider than the box and justified lines with negative spacing are returned as
/// computed.
///
/// Every line of a justified paragraph is stretched, the last one included. See
/// [`LayoutRequest::last_line`](crate::layout::LayoutRequest::last_line) to place the
/// final line differently.
pub fn place_lines<F>(
    lines: &[Line],
    start: (Pt, Pt),
    line_height: Pt,
    align: Align,
    box_width: Pt,
    measure: F,
) -> Result<LayoutResult>
where
    F: FnMut(&str) -> Result<Pt>,
{
    place_lines_with(lines, start, line_height, box_width, measure, |_| (align, Pt(0.0)))
}

pub(crate) fn place_lines_with<F, A>(
    lines: &[Line],
    start: (Pt, Pt),
    line_height: Pt,
    box_width: Pt,
    mut measure: F,
    shape_for: A,
) -> Result<LayoutResult>
where
    F: FnMut(&str) -> Result<Pt>,
    A: Fn(usize) -> (Align, Pt),
{
    ensure_positive("line_height", line_height)?;
    ensure_positive("box_width", box_width)?;

    let (x0, mut y) = start;
    let mut placed: Vec<PlacedLine> = Vec::with_capacity(lines.len());

    for (li, line) in lines.iter().enumerate() {
        // an indented line is placed in a box narrowed from the left
        let (align, indent) = shape_for(li);
        let (x, box_width) = (x0 + indent, box_width - indent);
        let placement = match align {
            Align::Justify if line.word_count() >= 2 => {
                justify(line, x, y, box_width, &mut measure)?
            }
            Align::Left | Align::Justify => single_run(line, x, y, Align::Left),
            Align::Right | Align::Center => {
                let width = line.width(&mut measure)?;
                single_run(line, origin_x(align, x, box_width, width), y, align)
            }
        };
        placed.push(placement);
        y += line_height;
    }

    Ok(LayoutResult {
        lines: placed,
        cursor_y: y,
    })
}

fn single_run(line: &Line, x: Pt, y: Pt, align: Align) -> PlacedLine {
    PlacedLine {
        line: line.clone(),
        x,
        y,
        align,
        word_spacing: None,
        runs: vec![Run {
            text: line.text().to_string(),
            x,
        }],
    }
}

fn justify<F>(line: &Line, x0: Pt, y: Pt, box_width: Pt, measure: &mut F) -> Result<PlacedLine>
where
    F: FnMut(&str) -> Result<Pt>,
{
    let widths = line
        .tokens()
        .iter()
        .map(|token| measure(token.as_str()))
        .collect::<Result<Vec<Pt>>>()?;
    let words_width: Pt = widths.iter().copied().sum();
    let spacing = (box_width - words_width) / ((line.word_count() - 1) as f32);

    let mut x = x0;
    let mut runs: Vec<Run> = Vec::with_capacity(widths.len());
    for (token, width) in line.tokens().iter().zip(widths) {
        runs.push(Run {
            text: token.to_string(),
            x,
        });
        x += width + spacing;
    }

    Ok(PlacedLine {
        line: line.clone(),
        x: x0,
        y,
        align: Align::Justify,
        word_spacing: Some(spacing),
        runs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::breaker::{break_lines, tokenize};
    use crate::layout::testing::Widths;
    use crate::PDFError;

    fn lines_of(text: &str, widths: &Widths, max: Pt) -> Vec<Line> {
        break_lines(&tokenize(text), max, |s| Ok(widths.width(s))).unwrap()
    }

    #[test]
    fn left_lines_share_x_and_step_down() {
        let widths = Widths::default();
        let lines = lines_of("one two three four five", &widths, Pt(100.0));
        let texts: Vec<&str> = lines.iter().map(|l| l.text()).collect();
        assert_eq!(texts, vec!["one two", "three four", "five"]);

        let result = place_lines(
            &lines,
            (Pt(50.0), Pt(100.0)),
            Pt(15.0),
            Align::Left,
            Pt(100.0),
            |s| Ok(widths.width(s)),
        )
        .unwrap();

        let coords: Vec<(Pt, Pt)> = result.lines.iter().map(|l| (l.x, l.y)).collect();
        assert_eq!(
            coords,
            vec![
                (Pt(50.0), Pt(100.0)),
                (Pt(50.0), Pt(115.0)),
                (Pt(50.0), Pt(130.0)),
            ]
        );
        assert_eq!(result.cursor_y, Pt(145.0));
    }

    #[test]
    fn right_and_center_use_line_width() {
        let widths = Widths::default();
        let lines = lines_of("abc", &widths, Pt(100.0));

        let right = place_lines(&lines, (Pt(10.0), Pt(0.0)), Pt(12.0), Align::Right, Pt(100.0), |s| {
            Ok(widths.width(s))
        })
        .unwrap();
        assert_eq!(right.lines[0].x, Pt(80.0));

        let center = place_lines(&lines, (Pt(10.0), Pt(0.0)), Pt(12.0), Align::Center, Pt(100.0), |s| {
            Ok(widths.width(s))
        })
        .unwrap();
        assert_eq!(center.lines[0].x, Pt(45.0));
    }

    #[test]
    fn justify_spreads_the_leftover_space() {
        let widths = Widths::default()
            .with("This", 30.0)
            .with("text", 30.0)
            .with("is", 20.0)
            .with("justified", 50.0);
        let lines = lines_of("This text is justified", &widths, Pt(1000.0));
        assert_eq!(lines.len(), 1);

        let result = place_lines(&lines, (Pt(50.0), Pt(0.0)), Pt(12.0), Align::Justify, Pt(160.0), |s| {
            Ok(widths.width(s))
        })
        .unwrap();

        let line = &result.lines[0];
        assert_eq!(line.word_spacing, Some(Pt(10.0)));
        let xs: Vec<Pt> = line.runs.iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![Pt(50.0), Pt(90.0), Pt(130.0), Pt(160.0)]);
        let words: Vec<&str> = line.runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(words, vec!["This", "text", "is", "justified"]);
    }

    #[test]
    fn justify_reports_negative_spacing_instead_of_failing() {
        let widths = Widths::default();
        let lines = lines_of("aaaa bbbb", &widths, Pt(1000.0));

        let result = place_lines(&lines, (Pt(0.0), Pt(0.0)), Pt(12.0), Align::Justify, Pt(60.0), |s| {
            Ok(widths.width(s))
        })
        .unwrap();

        assert_eq!(result.lines[0].word_spacing, Some(Pt(-20.0)));
        assert_eq!(result.lines[0].runs[1].x, Pt(20.0));
    }

    #[test]
    fn single_word_justify_matches_left() {
        let widths = Widths::default();
        let lines = lines_of("lonely", &widths, Pt(100.0));
        let place = |align| {
            place_lines(&lines, (Pt(7.0), Pt(3.0)), Pt(12.0), align, Pt(100.0), |s| {
                Ok(widths.width(s))
            })
            .unwrap()
        };

        let justified = place(Align::Justify);
        let left = place(Align::Left);
        assert_eq!(justified.lines[0].x, left.lines[0].x);
        assert_eq!(justified.lines[0].runs, left.lines[0].runs);
        assert_eq!(justified.lines[0].align, Align::Left);
        assert_eq!(justified.lines[0].word_spacing, None);
    }

    #[test]
    fn justify_stretches_the_last_line_too() {
        let widths = Widths::default();
        let lines = lines_of("aa bb cc dd", &widths, Pt(50.0));
        assert_eq!(lines.len(), 2);

        let result = place_lines(&lines, (Pt(0.0), Pt(0.0)), Pt(12.0), Align::Justify, Pt(50.0), |s| {
            Ok(widths.width(s))
        })
        .unwrap();

        assert!(result.lines.iter().all(|l| l.align == Align::Justify));
        assert_eq!(result.lines[1].word_spacing, Some(Pt(10.0)));
    }

    #[test]
    fn empty_lines_leave_cursor_alone() {
        let result = place_lines(&[], (Pt(5.0), Pt(42.0)), Pt(12.0), Align::Center, Pt(10.0), |_| {
            Ok(Pt(0.0))
        })
        .unwrap();
        assert!(result.is_empty());
        assert_eq!(result.cursor_y, Pt(42.0));
    }

    #[test]
    fn non_positive_line_height_or_box_is_rejected() {
        let bad_height = place_lines(&[], (Pt(0.0), Pt(0.0)), Pt(0.0), Align::Left, Pt(10.0), |_| {
            Ok(Pt(0.0))
        });
        assert!(matches!(
            bad_height,
            Err(PDFError::InvalidLayoutConfig {
                parameter: "line_height",
                ..
            })
        ));

        let bad_box = place_lines(&[], (Pt(0.0), Pt(0.0)), Pt(12.0), Align::Left, Pt(-1.0), |_| {
            Ok(Pt(0.0))
        });
        assert!(matches!(
            bad_box,
            Err(PDFError::InvalidLayoutConfig {
                parameter: "box_width",
                ..
            })
        ));
    }
}
