use crate::font::Font;
use crate::page::Page;
use crate::units::Pt;

/// Calculates the coordinates of where the first baseline of text can start on a page
/// so that the text sits just within the top left margin, taking into account the
/// ascending height of the font at the given size.
///
/// The returned coordinates are top-down, ready to be used as a
/// [`LayoutRequest`](crate::layout::LayoutRequest) start.
pub fn baseline_start(page: &Page, font: &Font, size: Pt) -> (Pt, Pt) {
    let x = page.content_box.x1;
    let y = page.top_margin() + font.ascent(size);
    (x, y)
}

/// The line height a face suggests for a size, scaled by `spacing`
/// (1.0 for single spacing, 1.5 for one-and-a-half, ...)
pub fn line_height(font: &Font, size: Pt, spacing: f32) -> Pt {
    font.line_height(size) * spacing
}
