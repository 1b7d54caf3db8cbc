//! Flow text onto PDF pages: greedy word wrapping into a box, then left, right,
//! centred, or justified placement of each line.
//!
//! The engine in [layout] only talks to a [Canvas], so it can be driven against
//! a [RecordingCanvas] in tests or a [PdfCanvas] to produce a document.

mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod config;
pub use config::*;

pub(crate) mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

pub mod layout;

mod page;
pub use page::*;

pub mod pagesize;

mod pdf_canvas;
pub use pdf_canvas::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod registry;
pub use registry::*;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
