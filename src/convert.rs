//! The end-to-end conversion pipeline.
//!
//! [`convert`] takes the raw bytes of a KakaoTalk export and produces the PDF
//! report and the XLSX table in one call. Decoding, classification and
//! assembly run sequentially; the two renderers then run on separate scoped
//! threads over the same read-only [`Transcript`].

use std::any::Any;
use std::thread;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::ConvertConfig;
use crate::core::output::{RenderedArtifact, render_document, render_table};
use crate::error::{KakaopackError, Result};
use crate::format::OutputFormat;
use crate::message::Transcript;
use crate::parsers::KakaoTalkParser;

/// The outcome of a successful conversion.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    /// The assembled transcript both artifacts were rendered from
    pub transcript: Transcript,
    /// The PDF report
    #[serde(skip)]
    pub document: RenderedArtifact,
    /// The XLSX table
    #[serde(skip)]
    pub table: RenderedArtifact,
}

impl Conversion {
    /// Returns both artifacts, document first.
    pub fn artifacts(&self) -> [&RenderedArtifact; 2] {
        [&self.document, &self.table]
    }

    /// Returns the artifact of the given format.
    pub fn artifact(&self, format: OutputFormat) -> &RenderedArtifact {
        match format {
            OutputFormat::Pdf => &self.document,
            OutputFormat::Xlsx => &self.table,
        }
    }
}

/// Converts a KakaoTalk export with the default configuration.
///
/// `display_name` is the original file name; only its stem is used, to name
/// the artifacts.
///
/// # Example
///
/// ```rust
/// let export = "--------------- 2024년 1월 15일 월요일 ---------------\n\
///               [홍길동] [오후 9:05] 안녕하세요";
///
/// let conversion = kakaopack::convert(export.as_bytes(), "chat.txt")?;
/// assert_eq!(conversion.transcript.len(), 1);
/// assert_eq!(conversion.document.file_name, "chat.pdf");
/// assert_eq!(conversion.table.file_name, "chat.xlsx");
/// # Ok::<(), kakaopack::KakaopackError>(())
/// ```
///
/// # Errors
///
/// - [`KakaopackError::NoMessagesParsed`] if the input has content but no
///   recognizable message
/// - [`KakaopackError::Render`] if either renderer fails
pub fn convert(bytes: &[u8], display_name: &str) -> Result<Conversion> {
    convert_with_config(bytes, display_name, &ConvertConfig::default())
}

/// Converts a KakaoTalk export with a custom configuration.
///
/// # Errors
///
/// See [`convert`].
pub fn convert_with_config(bytes: &[u8], display_name: &str, config: &ConvertConfig) -> Result<Conversion> {
    let started = Instant::now();
    let transcript = KakaoTalkParser::with_config(config.parser.clone()).parse_bytes(bytes)?;

    let (document, table) = thread::scope(|s| {
        let document = s.spawn(|| render_document(&transcript, &config.document));
        let table = s.spawn(|| render_table(&transcript, &config.table));
        (
            joined(document.join(), OutputFormat::Pdf),
            joined(table.join(), OutputFormat::Xlsx),
        )
    });
    let document = document?.with_file_name_for(display_name);
    let table = table?.with_file_name_for(display_name);

    info!(
        input = display_name,
        messages = transcript.len(),
        encoding = %transcript.encoding(),
        pdf_bytes = document.len(),
        xlsx_bytes = table.len(),
        elapsed_ms = started.elapsed().as_millis(),
        "Converted KakaoTalk export"
    );

    Ok(Conversion {
        transcript,
        document,
        table,
    })
}

fn joined(
    outcome: thread::Result<Result<RenderedArtifact>>,
    format: OutputFormat,
) -> Result<RenderedArtifact> {
    outcome.unwrap_or_else(|payload| {
        let message = panic_message(payload.as_ref());
        debug!(%format, %message, "Renderer thread panicked");
        Err(KakaopackError::render_panicked(format, message))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "renderer panicked".to_string()
    }
}
