//! Page content stream rendering

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{SpanFont, SpanLayout};
use id_arena::Arena;
use std::io::Write;

/// Render text spans into PDF content stream operators. Font and colour operators
/// are only emitted when they change from one span to the next.
pub(crate) fn render_spans(
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();
    let Some(first) = spans.first() else {
        return Ok(content);
    };

    writeln!(content, "q")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;
    writeln!(
        content,
        "/F{} {} Tf",
        current_font.id.index(),
        current_font.size
    )?;
    current_colour.write_fill(&mut content)?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            writeln!(
                content,
                "/F{} {} Tf",
                current_font.id.index(),
                current_font.size
            )?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            current_colour.write_fill(&mut content)?;
        }

        // Identity-H encoding: the string is a sequence of 2-byte glyph ids
        writeln!(content, "BT")?;
        writeln!(content, "{} {} Td", span.coords.0, span.coords.1)?;
        write!(content, "<")?;
        if let Some(font) = fonts.get(span.font.id) {
            for ch in span.text.chars() {
                write!(content, "{:04x}", font.glyph_for(ch))?;
            }
        }
        writeln!(content, "> Tj")?;
        writeln!(content, "ET")?;
    }

    writeln!(content, "Q")?;
    Ok(content)
}
