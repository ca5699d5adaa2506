//! PDF report renderer.

use std::fs;

use printpdf::{BuiltinFont, Color, Greyscale, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};
use tracing::{debug, warn};

use super::layout::{PageLayout, Shade, layout_document};
use super::metrics::FontMetrics;
use super::{RenderWarning, RenderedArtifact};
use crate::config::DocumentConfig;
use crate::error::{KakaopackError, Result};
use crate::format::OutputFormat;
use crate::message::{Message, Transcript};

const LAYER_NAME: &str = "Layer 1";
const GRAY_LEVEL: f32 = 0.5;

/// Substitute for characters the built-in font cannot draw.
const REPLACEMENT: char = '?';

fn mm(points: f32) -> Mm {
    Mm(points * 25.4 / 72.0)
}

/// Renders the transcript as a paginated PDF report.
///
/// The first page carries the centered title. Each message is drawn as a
/// gray timestamp line followed by `sender: body`, wrapped to the content
/// width. An empty transcript yields a single page with a placeholder line.
///
/// If the configured font cannot be loaded, the report is still produced
/// with a built-in Latin font and a
/// [`RenderWarning::MissingFontResource`] is attached.
///
/// # Errors
///
/// Returns [`KakaopackError::Render`] if the PDF cannot be assembled.
pub fn render_document(transcript: &Transcript, config: &DocumentConfig) -> Result<RenderedArtifact> {
    let font_path = config.resolved_font_path();
    let (doc, first_page, first_layer) = PdfDocument::new(
        config.title.as_str(),
        mm(config.page_width),
        mm(config.page_height),
        LAYER_NAME,
    );

    let mut warnings = Vec::new();
    let font_data = fs::read(&font_path).map_err(|e| e.to_string());
    let loaded = font_data
        .as_deref()
        .map_err(String::clone)
        .and_then(|data| load_font(&doc, data));

    let (font, pages) = match loaded {
        Ok((font, metrics)) => (font, layout_document(transcript, config, &metrics)),
        Err(reason) => {
            warn!(path = %font_path.display(), %reason, "Hangul font unavailable, falling back to built-in font");
            warnings.push(RenderWarning::MissingFontResource {
                path: font_path.clone(),
                reason,
            });
            let font = doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(KakaopackError::pdf)?;
            let pages = layout_document(&latin_only(transcript), &latin_config(config), &FontMetrics::Helvetica);
            (font, pages)
        }
    };
    debug!(pages = pages.len(), messages = transcript.len(), "Laid out PDF report");

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                doc.add_page(mm(config.page_width), mm(config.page_height), LAYER_NAME);
            doc.get_page(page_index).get_layer(layer_index)
        };
        draw_page(&layer, page, &font);
    }

    let bytes = doc.save_to_bytes().map_err(KakaopackError::pdf)?;

    Ok(warnings
        .into_iter()
        .fold(RenderedArtifact::new(OutputFormat::Pdf, bytes), RenderedArtifact::with_warning))
}

/// Embeds the font and reads its glyph metrics. Both must succeed for the
/// font to be used.
fn load_font<'a>(
    doc: &PdfDocumentReference,
    data: &'a [u8],
) -> std::result::Result<(IndirectFontRef, FontMetrics<'a>), String> {
    let metrics = FontMetrics::from_font_data(data)?;
    let font = doc.add_external_font(data).map_err(|e| e.to_string())?;
    Ok((font, metrics))
}

fn draw_page(layer: &printpdf::PdfLayerReference, page: &PageLayout, font: &IndirectFontRef) {
    let mut current = None;
    for line in &page.lines {
        if current != Some(line.shade) {
            let level = match line.shade {
                Shade::Black => 0.0,
                Shade::Gray => GRAY_LEVEL,
            };
            layer.set_fill_color(Color::Greyscale(Greyscale::new(level, None)));
            current = Some(line.shade);
        }
        layer.use_text(line.text.as_str(), line.size, mm(line.x), mm(line.y), font);
    }
}

fn to_latin(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() { c } else { REPLACEMENT })
        .collect()
}

fn latin_only(transcript: &Transcript) -> Transcript {
    let messages = transcript
        .iter()
        .map(|m| Message::new(m.timestamp, to_latin(&m.sender), to_latin(&m.body)))
        .collect();
    Transcript::new(messages, transcript.encoding())
}

fn latin_config(config: &DocumentConfig) -> DocumentConfig {
    let mut config = config.clone();
    config.title = to_latin(&config.title);
    config.empty_placeholder = to_latin(&config.empty_placeholder);
    config.unknown_sender = to_latin(&config.unknown_sender);
    config.empty_body = to_latin(&config.empty_body);
    config
}
