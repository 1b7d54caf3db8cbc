use std::io::Write;

/// The colour text is filled with
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create an RGB colour from 0-255 components
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// Emit the fill colour operator for this colour
    pub(crate) fn write_fill(&self, content: &mut Vec<u8>) -> std::io::Result<()> {
        match *self {
            Colour::RGB { r, g, b } => writeln!(content, "{r} {g} {b} rg"),
            Colour::Grey { g } => writeln!(content, "{g} g"),
        }
    }
}

impl Default for Colour {
    fn default() -> Self {
        colours::BLACK
    }
}

/// A few pre-defined colours
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const GREY: Colour = Colour::Grey { g: 0.5 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    pub const RED: Colour = Colour::RGB {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
    pub const BLUE: Colour = Colour::RGB {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };
}
