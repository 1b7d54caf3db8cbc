use crate::{
    refs::{ObjectReferences, RefType},
    PDFError, Pt,
};
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;

/// A parsed TrueType or OpenType font. The whole face is embedded in the generated PDF,
/// so large fonts make for large documents.
///
/// Fonts are registered under a name in a [`FontRegistry`](crate::FontRegistry) and
/// referred to by that name when laying out and painting text.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, returning an error if the font could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face().units_per_em() as f32
    }

    fn find_name(&self, name_id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The full name of the font, if the face has one
    pub fn name(&self) -> Option<String> {
        self.find_name(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// The family name of the font, if the face has one
    pub fn family(&self) -> Option<String> {
        self.find_name(owned_ttf_parser::name_id::FAMILY)
    }

    /// Distance from the baseline to the top of the font at the given size
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().ascender() as f32
    }

    /// Distance from the baseline to the bottom of the font at the given size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().descender() as f32
    }

    /// Extra space the face asks for between lines at the given size
    pub fn leading(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().line_gap() as f32
    }

    /// How far apart two consecutive baselines should be at the given size
    pub fn line_height(&self, size: Pt) -> Pt {
        self.leading(size) + self.ascent(size) - self.descent(size)
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    /// The glyph actually drawn for a character: the character's own glyph, or the
    /// replacement character, or '?', or the `.notdef` glyph as a last resort
    pub fn glyph_for(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Width of a string of text at the given size, measured glyph by glyph with the
    /// same glyph substitution used when the text is painted
    pub fn width_of(&self, text: &str, size: Pt) -> Pt {
        let scaling = self.scaling(size);
        text.chars()
            .map(|ch| {
                let advance = self
                    .face()
                    .glyph_hor_advance(GlyphId(self.glyph_for(ch)))
                    .unwrap_or_default();
                scaling * advance as f32
            })
            .sum()
    }

    /// Every glyph reachable from a unicode codepoint, with the first character that maps
    /// to it and its advance in font units, ordered by glyph id
    fn mapped_glyphs(&self) -> BTreeMap<u16, (char, u16)> {
        let mut glyphs: BTreeMap<u16, (char, u16)> = BTreeMap::new();
        let Some(cmap) = self.face().tables().cmap else {
            return glyphs;
        };

        for subtable in cmap.subtables.into_iter().filter(|t| t.is_unicode()) {
            subtable.codepoints(|codepoint| {
                let Ok(ch) = char::try_from(codepoint) else {
                    return;
                };
                let Some(gid) = subtable.glyph_index(codepoint).filter(|g| g.0 > 0) else {
                    return;
                };
                let advance = self.face().glyph_hor_advance(gid).unwrap_or_default();
                glyphs.entry(gid.0).or_insert((ch, advance));
            });
        }

        glyphs
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let index = id.index();
        let glyphs = self.mapped_glyphs();

        let font_ref = refs.allocate(RefType::Font(index));
        let cid_ref = self.write_cid_font(refs, index, &glyphs, writer);
        let to_unicode_ref = write_to_unicode(refs, index, &glyphs, writer);

        let mut font = writer.type0_font(font_ref);
        font.base_font(Name(format!("F{index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_ref);
        font.to_unicode(to_unicode_ref);
    }

    fn write_cid_font(
        &self,
        refs: &mut ObjectReferences,
        index: usize,
        glyphs: &BTreeMap<u16, (char, u16)>,
        writer: &mut Pdf,
    ) -> Ref {
        let descriptor_ref = self.write_descriptor(refs, index, glyphs, writer);
        let id = refs.allocate(RefType::CidFont(index));
        let to_pdf_units = 1000.0 / self.face().units_per_em() as f32;

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_ref);
        // glyphs outside the widths array are only ever the `.notdef` fallback
        let notdef = self.face().glyph_hor_advance(GlyphId(0)).unwrap_or_default();
        cid_font.default_width(notdef as f32 * to_pdf_units);

        // one `consecutive` entry per unbroken run of glyph ids
        let mut widths = cid_font.widths();
        let mut run_start: Option<u16> = None;
        let mut run: Vec<f32> = Vec::new();
        let mut previous: u16 = 0;
        for (&gid, &(_, advance)) in glyphs.iter() {
            if let Some(start) = run_start {
                if gid != previous + 1 {
                    widths.consecutive(start, run.drain(..));
                    run_start = Some(gid);
                }
            } else {
                run_start = Some(gid);
            }
            run.push(advance as f32 * to_pdf_units);
            previous = gid;
        }
        if let Some(start) = run_start {
            widths.consecutive(start, run.drain(..));
        }
        widths.finish();

        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        index: usize,
        glyphs: &BTreeMap<u16, (char, u16)>,
        writer: &mut Pdf,
    ) -> Ref {
        let data_ref = refs.allocate(RefType::FontData(index));
        let compressed = compress(self.face.as_slice());
        writer
            .stream(data_ref, compressed.as_slice())
            .filter(Filter::FlateDecode)
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let face = self.face();
        let to_pdf_units = 1000.0 / face.units_per_em() as f32;
        let advances = glyphs.values().map(|&(_, advance)| advance as f32);
        let max_width = advances.clone().fold(0.0f32, f32::max);
        let avg_width = if glyphs.is_empty() {
            0.0
        } else {
            advances.sum::<f32>() / glyphs.len() as f32
        };

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags |= FontFlags::FIXED_PITCH;
        }
        if face.is_italic() {
            flags |= FontFlags::ITALIC;
        }

        let bbox = face.global_bounding_box();
        let cap_height = face.capital_height().unwrap_or(face.ascender());

        let id = refs.allocate(RefType::FontDescriptor(index));
        let postscript_name = self.name().unwrap_or_else(|| format!("F{index}"));
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(postscript_name.replace(' ', "").as_bytes()));
        if let Some(family) = self.family() {
            descriptor.family(Str(family.as_bytes()));
        }
        descriptor.weight(face.weight().to_number());
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * to_pdf_units,
            y1: bbox.y_min as f32 * to_pdf_units,
            x2: bbox.x_max as f32 * to_pdf_units,
            y2: bbox.y_max as f32 * to_pdf_units,
        });
        descriptor.italic_angle(if face.is_italic() { -12.0 } else { 0.0 });
        descriptor.ascent(face.ascender() as f32 * to_pdf_units);
        descriptor.descent(face.descender() as f32 * to_pdf_units);
        descriptor.leading(face.line_gap() as f32 * to_pdf_units);
        descriptor.cap_height(cap_height as f32 * to_pdf_units);
        descriptor.x_height(face.x_height().unwrap_or(cap_height) as f32 * to_pdf_units);
        // no reliable way to read stem widths out of the face
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * to_pdf_units);
        descriptor.max_width(max_width * to_pdf_units);
        descriptor.font_file2(data_ref);

        id
    }
}

fn compress(data: &[u8]) -> Vec<u8> {
    miniz_oxide::deflate::compress_to_vec_zlib(
        data,
        miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
    )
}

/// Maps glyph ids back to unicode so text in the PDF can be searched and copied
fn write_to_unicode(
    refs: &mut ObjectReferences,
    index: usize,
    glyphs: &BTreeMap<u16, (char, u16)>,
    writer: &mut Pdf,
) -> Ref {
    let id = refs.allocate(RefType::ToUnicode(index));

    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    // bfchar blocks are limited to 100 entries
    let entries: Vec<(u16, char)> = glyphs.iter().map(|(&gid, &(ch, _))| (gid, ch)).collect();
    for block in entries.chunks(100) {
        cmap.push_str(&format!("{} beginbfchar\n", block.len()));
        for &(gid, ch) in block {
            let mut utf16 = [0u16; 2];
            let code: String = ch
                .encode_utf16(&mut utf16)
                .iter()
                .map(|unit| format!("{unit:04x}"))
                .collect();
            cmap.push_str(&format!("<{gid:04x}> <{code}>\n"));
        }
        cmap.push_str("endbfchar\n");
    }
    cmap.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

    let compressed = compress(cmap.as_bytes());
    writer
        .stream(id, compressed.as_slice())
        .filter(Filter::FlateDecode);

    id
}
