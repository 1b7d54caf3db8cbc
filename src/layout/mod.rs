//! The text flow engine: breaking text into lines and positioning those lines.
//!
//! Layout is pure. [break_lines] and [place_lines] (or [layout_text], which runs both
//! behind a [LayoutRequest]) only compute positions from width measurements; painting
//! is a separate step, [LayoutResult::paint], that hands the runs to a
//! [`Canvas`](crate::Canvas).
//!
//! Coordinates are top-down: `y` is the distance of a baseline from the top of the
//! page and grows as lines are added.
//!
//! # Alignment
//!
//! - [Align::Left] - every line starts at the box's left edge
//! - [Align::Right] - every line ends at the box's right edge
//! - [Align::Center] - lines are centered in the box
//! - [Align::Justify] - the space between words is stretched so lines fill the box
//!
//! # Example
//!
//! ```
//! use pdf_flow::layout::{Align, LayoutRequest, Monospace, layout_text};
//! use pdf_flow::{Pt, RecordingCanvas};
//!
//! let request = LayoutRequest::new(lipsum::lipsum(40), "mono", Pt(11.0), Pt(300.0), Pt(15.0))
//!     .at(Pt(50.0), Pt(80.0))
//!     .align(Align::Justify)
//!     .last_line(Align::Left);
//!
//! let mut canvas = RecordingCanvas::new(Monospace::new(0.6));
//! let result = layout_text(&request, &canvas).expect("can lay out text");
//! result.paint(&mut canvas, &request.font, request.size).expect("can paint");
//! assert!(!canvas.painted.is_empty());
//! ```

mod align;
mod baseline;
mod breaker;
mod flow;
mod measure;
mod placer;

pub use align::*;
pub use baseline::*;
pub use breaker::*;
pub use flow::*;
pub use measure::*;
pub use placer::*;
