//! Text extraction for PDF and DOCX source documents.
//!
//! Extraction is path-level: the caller supplies a file path, this module
//! validates existence and extension, reads the file once, and returns the
//! full textual content as one UTF-8 string (paragraphs for DOCX, pages for
//! PDF, newline-joined). There is no partial success: a complete string or
//! an error. Image-only pages contribute no text.

use std::io::Read;
use std::path::Path;

/// Maximum decompressed bytes to read from a single ZIP entry (zip-bomb protection).
const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;

/// Closed extraction error taxonomy. The pipeline maps these onto exit
/// codes and user-facing messages; nothing here panics.
#[derive(Debug)]
pub enum ExtractError {
    /// Input file does not exist (or is not a regular file).
    NotFound(String),
    /// Wrong extension for the requested parser, regardless of content.
    InvalidExtension { path: String, expected: &'static str },
    /// Unreadable container: bad PDF structure, bad ZIP, missing document part.
    Corrupt(String),
    /// Any other library-level fault, wrapped.
    Other(String),
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::NotFound(path) => write!(f, "file not found: {}", path),
            ExtractError::InvalidExtension { path, expected } => {
                write!(f, "not a {} file: {}", expected, path)
            }
            ExtractError::Corrupt(detail) => write!(f, "corrupted or invalid document: {}", detail),
            ExtractError::Other(detail) => write!(f, "extraction failed: {}", detail),
        }
    }
}

impl std::error::Error for ExtractError {}

/// Extracts plain text from a PDF or DOCX file, dispatching on extension.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    match extension_of(path).as_deref() {
        Some("pdf") => extract_pdf_text(path),
        Some("docx") => extract_docx_text(path),
        _ => Err(ExtractError::InvalidExtension {
            path: path.display().to_string(),
            expected: ".pdf or .docx",
        }),
    }
}

/// Extracts the newline-joined page text of a PDF file.
pub fn extract_pdf_text(path: &Path) -> Result<String, ExtractError> {
    check_input(path, "pdf", ".pdf")?;
    let bytes = read_bytes(path)?;
    pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractError::Corrupt(e.to_string()))
}

/// Extracts the newline-joined paragraph text of a DOCX file.
pub fn extract_docx_text(path: &Path) -> Result<String, ExtractError> {
    check_input(path, "docx", ".docx")?;
    let bytes = read_bytes(path)?;

    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes.as_slice()))
        .map_err(|e| ExtractError::Corrupt(e.to_string()))?;

    let doc_xml = {
        let entry = archive
            .by_name("word/document.xml")
            .map_err(|e| ExtractError::Corrupt(format!("word/document.xml: {}", e)))?;
        let mut out = Vec::new();
        entry
            .take(MAX_XML_ENTRY_BYTES)
            .read_to_end(&mut out)
            .map_err(|e| ExtractError::Corrupt(e.to_string()))?;
        if out.len() as u64 >= MAX_XML_ENTRY_BYTES {
            return Err(ExtractError::Corrupt(
                "word/document.xml exceeds size limit".to_string(),
            ));
        }
        out
    };

    extract_paragraphs(&doc_xml)
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}

fn check_input(path: &Path, ext: &str, expected: &'static str) -> Result<(), ExtractError> {
    if !path.is_file() {
        return Err(ExtractError::NotFound(path.display().to_string()));
    }
    if extension_of(path).as_deref() != Some(ext) {
        return Err(ExtractError::InvalidExtension {
            path: path.display().to_string(),
            expected,
        });
    }
    Ok(())
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, ExtractError> {
    std::fs::read(path).map_err(|e| ExtractError::Other(e.to_string()))
}

/// Streams `<w:t>` runs out of document.xml, joining paragraphs with `\n`.
fn extract_paragraphs(xml: &[u8]) -> Result<String, ExtractError> {
    let mut out = String::new();
    let mut reader = quick_xml::Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    if let Ok(quick_xml::events::Event::Text(te)) = reader.read_event_into(&mut buf)
                    {
                        out.push_str(te.unescape().unwrap_or_default().as_ref());
                    }
                }
            }
            Ok(quick_xml::events::Event::End(e)) => {
                if e.local_name().as_ref() == b"p" {
                    out.push('\n');
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(ExtractError::Corrupt(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
    while out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}
