//! Single-line placement helpers. These are the one-line cases of [place_lines]:
//! centering or right-aligning a string on a page gives exactly the x that
//! [place_lines] would for a one-line paragraph in the matching box.
//!
//! [place_lines]: crate::layout::place_lines

use super::placer::{origin_x, Align};
use crate::canvas::Canvas;
use crate::error::Result;
use crate::units::Pt;

/// A single string positioned on the page
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub text: String,
    pub x: Pt,
    pub y: Pt,
}

impl Placement {
    pub fn paint<C: Canvas + ?Sized>(&self, canvas: &mut C, font: &str, size: Pt) -> Result<()> {
        canvas.paint(font, size, &self.text, self.x, self.y)
    }
}

/// Place text exactly at `(x, y)`
pub fn align_left(text: &str, x: Pt, y: Pt) -> Placement {
    Placement {
        text: text.to_string(),
        x,
        y,
    }
}

/// Center text horizontally on a page `page_width` wide
pub fn align_center<F>(text: &str, page_width: Pt, y: Pt, mut measure: F) -> Result<Placement>
where
    F: FnMut(&str) -> Result<Pt>,
{
    let width = measure(text)?;
    Ok(Placement {
        text: text.to_string(),
        x: origin_x(Align::Center, Pt(0.0), page_width, width),
        y,
    })
}

/// Place text so that it ends `right_margin` before the right edge of the page.
///
/// Computed as `(page_width - right_margin) - width`, the same rounding as a one-line
/// [`place_lines`](crate::layout::place_lines) with [Align::Right] in a box
/// `page_width - right_margin` wide, so the two give bit-identical x.
pub fn align_right<F>(
    text: &str,
    page_width: Pt,
    right_margin: Pt,
    y: Pt,
    mut measure: F,
) -> Result<Placement>
where
    F: FnMut(&str) -> Result<Pt>,
{
    let width = measure(text)?;
    Ok(Placement {
        text: text.to_string(),
        x: origin_x(Align::Right, Pt(0.0), page_width - right_margin, width),
        y,
    })
}
