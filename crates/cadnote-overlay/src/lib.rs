#![warn(missing_docs)]

//! SVG safety-warning overlay compositing.
//!
//! Rewrites an exported SVG view in place: the original document is
//! nested as a layer inside a fresh root of identical pixel
//! dimensions, a bold warning text is anchored near the top-left
//! corner, and an optional safety icon is scaled down and pinned to
//! the corner itself. The file on disk is the only persisted state and
//! it is replaced with no backup, matching the established workflow of
//! annotating freshly exported views.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

/// Fixed anchor of the warning text, in pixels.
const TEXT_ANCHOR: (u32, u32) = (45, 35);

/// Fixed anchor of the safety icon, in pixels.
const ICON_ANCHOR: (u32, u32) = (5, 5);

/// Scale applied to the safety icon.
const ICON_SCALE: f64 = 0.4;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// The stock safety icon shipped with the crate.
const STOCK_ICON: &str = include_str!("../assets/safety_warning.svg");

/// Errors from overlay compositing.
#[derive(Error, Debug)]
pub enum OverlayError {
    /// The source SVG or a custom icon could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The SVG could not be parsed or re-serialized.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document is XML but not a usable SVG.
    #[error("malformed SVG: {0}")]
    MalformedSvg(String),
}

/// Result type for overlay operations.
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Options for [`add_safety_warning`].
#[derive(Debug, Clone)]
pub struct WarningOptions {
    /// Whether to place the safety icon next to the text.
    pub use_icon: bool,
    /// Font size of the warning text, in pixels.
    pub font_size: f64,
    /// Substitute icon file; `None` uses the stock icon.
    pub icon_path: Option<PathBuf>,
}

impl Default for WarningOptions {
    fn default() -> Self {
        Self {
            use_icon: true,
            font_size: 24.0,
            icon_path: None,
        }
    }
}

/// Add a safety warning to an SVG file, rewriting it in place.
///
/// The output keeps the source document's pixel dimensions (fractional
/// sizes like `800.0px` are truncated to whole pixels), nests the
/// original content as a layer, and appends the bold warning `text`
/// plus, per [`WarningOptions`], the safety icon at 40% scale.
pub fn add_safety_warning(
    path: impl AsRef<Path>,
    text: &str,
    options: &WarningOptions,
) -> Result<()> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)?;
    let (width, height) = svg_pixel_size(&source)?;

    let icon = if options.use_icon {
        Some(match &options.icon_path {
            Some(custom) => fs::read_to_string(custom)?,
            None => STOCK_ICON.to_string(),
        })
    } else {
        None
    };

    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut root = BytesStart::new("svg");
    root.push_attribute(("xmlns", SVG_NS));
    root.push_attribute(("xmlns:xlink", XLINK_NS));
    root.push_attribute(("width", format!("{width}px").as_str()));
    root.push_attribute(("height", format!("{height}px").as_str()));
    writer.write_event(Event::Start(root))?;

    // The original view becomes a nested layer.
    append_document(&mut writer, &source)?;

    let mut label = BytesStart::new("text");
    label.push_attribute(("x", TEXT_ANCHOR.0.to_string().as_str()));
    label.push_attribute(("y", TEXT_ANCHOR.1.to_string().as_str()));
    label.push_attribute(("font-size", format!("{}", options.font_size).as_str()));
    label.push_attribute(("font-weight", "bold"));
    writer.write_event(Event::Start(label))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new("text")))?;

    if let Some(icon_doc) = icon {
        let mut group = BytesStart::new("g");
        group.push_attribute((
            "transform",
            format!(
                "translate({}, {}) scale({})",
                ICON_ANCHOR.0, ICON_ANCHOR.1, ICON_SCALE
            )
            .as_str(),
        ));
        writer.write_event(Event::Start(group))?;
        append_document(&mut writer, &icon_doc)?;
        writer.write_event(Event::End(BytesEnd::new("g")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("svg")))?;

    fs::write(path, writer.into_inner().into_inner())?;
    log::info!(
        "overlaid safety warning on {} ({width}x{height}px, icon: {})",
        path.display(),
        options.use_icon
    );
    Ok(())
}

/// Stream a whole SVG document into the writer as a nested layer,
/// dropping prolog events that may not appear mid-document.
fn append_document(writer: &mut Writer<Cursor<Vec<u8>>>, source: &str) -> Result<()> {
    let mut reader = Reader::from_str(source);
    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Decl(_) | Event::DocType(_) | Event::PI(_) => continue,
            event => writer.write_event(event)?,
        }
    }
    Ok(())
}

/// Pixel dimensions from the root `<svg>` element's width/height.
fn svg_pixel_size(source: &str) -> Result<(u64, u64)> {
    let mut reader = Reader::from_str(source);
    loop {
        match reader.read_event()? {
            Event::Start(start) | Event::Empty(start)
                if start.name().as_ref() == b"svg" =>
            {
                let mut width = None;
                let mut height = None;
                for attr in start.attributes() {
                    let attr = attr.map_err(|err| {
                        OverlayError::MalformedSvg(format!("bad attribute: {err}"))
                    })?;
                    match attr.key.as_ref() {
                        b"width" => width = Some(parse_px(&attr.unescape_value()?)?),
                        b"height" => height = Some(parse_px(&attr.unescape_value()?)?),
                        _ => {}
                    }
                }
                return match (width, height) {
                    (Some(width), Some(height)) => Ok((width, height)),
                    _ => Err(OverlayError::MalformedSvg(
                        "root <svg> is missing width or height".to_string(),
                    )),
                };
            }
            Event::Eof => {
                return Err(OverlayError::MalformedSvg(
                    "no root <svg> element".to_string(),
                ))
            }
            _ => {}
        }
    }
}

/// Whole pixels from a dimension value such as `800`, `800.0`, or
/// `800.0px`. Fractional pixels are truncated.
fn parse_px(value: &str) -> Result<u64> {
    let trimmed = value.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(trimmed.len());
    trimmed[..end]
        .parse::<f64>()
        .map(|px| px.trunc() as u64)
        .map_err(|_| OverlayError::MalformedSvg(format!("unparseable dimension {value:?}")))
}
