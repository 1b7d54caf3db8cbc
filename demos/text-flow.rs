use pdf_flow::layout::{
    align_center, align_left, align_right, baseline_start, flow_text, layout_paragraphs,
    line_height, Align, Indent, LayoutRequest, TextMeasurer,
};
use pdf_flow::pagesize;
use pdf_flow::{colours, Info, Margins, OutputConfig, PDFError, PdfCanvas, Pt};
use tracing_subscriber::EnvFilter;

const FONT: &str = "body";
const HEADING: Pt = Pt(18.0);
const BODY: Pt = Pt(11.0);

fn main() -> Result<(), PDFError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // usage: text-flow [font.ttf]
    let mut sources = PdfCanvas::system_font_sources("arial");
    if let Some(path) = std::env::args().nth(1) {
        sources.insert(0, path.as_str().into());
    }
    sources.push("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf".into());

    let mut canvas = PdfCanvas::new(pagesize::A4, Some(Margins::all(Pt(50.0))));
    canvas.set_info(
        Info::new()
            .title("Text Flow")
            .subject("Wrapping, alignment, and justification"),
    );
    canvas.register_font(FONT, sources)?;
    canvas.add_page();

    let (page_width, x0, mut y, content_width, lh) = {
        let page = canvas.page().ok_or(PDFError::PageMissing)?;
        let font = canvas.document().fonts.get(FONT)?;
        let (x, y) = baseline_start(page, font, HEADING);
        (
            page.width(),
            x,
            y,
            page.content_box.width(),
            line_height(font, BODY, 1.2),
        )
    };

    // single lines
    let title = align_center("Text Handling", page_width, y, |s| {
        canvas.measure(s, FONT, HEADING)
    })?;
    title.paint(&mut canvas, FONT, HEADING)?;
    y += HEADING * 2.0;

    align_left("Left aligned", x0, y).paint(&mut canvas, FONT, BODY)?;
    let right = align_right("Right aligned", page_width, Pt(50.0), y, |s| {
        canvas.measure(s, FONT, BODY)
    })?;
    right.paint(&mut canvas, FONT, BODY)?;
    y += lh * 2.0;

    // the same paragraph in each alignment
    let text = lipsum::lipsum(45);
    for align in [Align::Left, Align::Right, Align::Center, Align::Justify] {
        canvas.set_colour(colours::GREY);
        let label = format!("{align:?}");
        align_left(&label, x0, y).paint(&mut canvas, FONT, BODY)?;
        y += lh;

        canvas.set_colour(colours::BLACK);
        let request = LayoutRequest::new(&text, FONT, BODY, content_width, lh)
            .at(x0, y)
            .align(align)
            .last_line(match align {
                Align::Justify => Align::Left,
                other => other,
            });
        y = flow_text(&request, &mut canvas)?.cursor_y + lh;
    }

    // paragraphs, continuing on a second page
    canvas.add_page();
    let paragraphs = format!(
        "{}\n\n{}\n\n{}",
        lipsum::lipsum(30),
        lipsum::lipsum(20),
        lipsum::lipsum(25)
    );
    let half = (content_width - Pt(20.0)) / 2.0;
    let request = LayoutRequest::new(paragraphs, FONT, BODY, half, lh)
        .at(x0, Pt(50.0) + lh)
        .align(Align::Justify)
        .last_line(Align::Left)
        .indent(Indent::FirstLine(Pt(18.0)));
    for result in layout_paragraphs(&request, lh / 2.0, &canvas)? {
        result.paint(&mut canvas, FONT, BODY)?;
    }

    let narrow = request.clone().at(x0 + half + Pt(20.0), Pt(50.0) + lh).align(Align::Left)
        .indent(Indent::Hanging(Pt(18.0)));
    flow_text(&narrow, &mut canvas)?;

    let output = OutputConfig::default().in_folder("text-flow");
    let path = canvas.save(&output, "text-flow.pdf")?;
    println!("wrote {}", path.display());
    Ok(())
}
