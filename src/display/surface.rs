//! Display surfaces that receive rendered countdown frames

use std::{
    io::{IsTerminal, Write},
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::formatter::{EMPHASIS_CLOSE, EMPHASIS_OPEN};
use crate::config::{CountdownConfig, OutputFormat};

/// Fixed identifier of the countdown display element
pub const SURFACE_ID: &str = "cntdwn";

/// Inline colors applied to the display element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurfaceStyle {
    pub background: String,
    pub foreground: String,
}

impl SurfaceStyle {
    pub fn from_config(config: &CountdownConfig) -> Self {
        Self {
            background: config.back_color.clone(),
            foreground: config.fore_color.clone(),
        }
    }
}

/// One rendered countdown value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub id: &'static str,
    pub remaining_seconds: i64,
    pub content: String,
    pub rendered_at: DateTime<Utc>,
}

impl Frame {
    pub fn new(remaining_seconds: i64, content: String) -> Self {
        Self {
            id: SURFACE_ID,
            remaining_seconds,
            content,
            rendered_at: Utc::now(),
        }
    }
}

/// Something a countdown can render into
pub trait DisplaySurface: Send {
    /// Replace the displayed content with `frame`
    fn render(&mut self, frame: &Frame) -> Result<(), String>;

    /// Called once when no more frames will follow
    fn finish(&mut self) -> Result<(), String> {
        Ok(())
    }
}

impl DisplaySurface for Box<dyn DisplaySurface> {
    fn render(&mut self, frame: &Frame) -> Result<(), String> {
        (**self).render(frame)
    }

    fn finish(&mut self) -> Result<(), String> {
        (**self).finish()
    }
}

/// Writes the `cntdwn` span markup, one element per frame
pub struct HtmlSurface<W> {
    writer: W,
    style: SurfaceStyle,
}

impl<W: Write + Send> HtmlSurface<W> {
    pub fn new(writer: W, style: SurfaceStyle) -> Self {
        Self { writer, style }
    }

    /// Markup for a single frame
    pub fn markup(&self, frame: &Frame) -> String {
        format!(
            "<span id='{}' align='center' style='background-color:{}; color:{}'>{}</span>",
            frame.id, self.style.background, self.style.foreground, frame.content
        )
    }
}

impl<W: Write + Send> DisplaySurface for HtmlSurface<W> {
    fn render(&mut self, frame: &Frame) -> Result<(), String> {
        let markup = self.markup(frame);
        writeln!(self.writer, "{}", markup)
            .and_then(|_| self.writer.flush())
            .map_err(|e| format!("Failed to write html frame: {}", e))
    }
}

/// Writes each frame as a JSON record on its own line
pub struct JsonSurface<W> {
    writer: W,
    style: SurfaceStyle,
}

#[derive(Serialize)]
struct JsonFrame<'a> {
    #[serde(flatten)]
    frame: &'a Frame,
    style: &'a SurfaceStyle,
}

impl<W: Write + Send> JsonSurface<W> {
    pub fn new(writer: W, style: SurfaceStyle) -> Self {
        Self { writer, style }
    }
}

impl<W: Write + Send> DisplaySurface for JsonSurface<W> {
    fn render(&mut self, frame: &Frame) -> Result<(), String> {
        let record = JsonFrame { frame, style: &self.style };
        serde_json::to_writer(&mut self.writer, &record)
            .map_err(|e| format!("Failed to serialize frame: {}", e))?;
        writeln!(self.writer)
            .and_then(|_| self.writer.flush())
            .map_err(|e| format!("Failed to write json frame: {}", e))
    }
}

/// Terminal output. With ANSI enabled the line is redrawn in place and the
/// emphasis markers become bold text; otherwise markers are stripped.
pub struct TextSurface<W> {
    writer: W,
    style: SurfaceStyle,
    ansi: bool,
}

impl<W: Write + Send> TextSurface<W> {
    pub fn new(writer: W, style: SurfaceStyle, ansi: bool) -> Self {
        Self { writer, style, ansi }
    }

    /// Terminal rendering of the frame content
    pub fn line(&self, frame: &Frame) -> String {
        if !self.ansi {
            return frame
                .content
                .replace(EMPHASIS_OPEN, "")
                .replace(EMPHASIS_CLOSE, "");
        }

        let body = frame
            .content
            .replace(EMPHASIS_OPEN, "\x1b[1m")
            .replace(EMPHASIS_CLOSE, "\x1b[22m");
        let mut codes = Vec::new();
        if let Some(bg) = ansi_color(&self.style.background) {
            codes.push((bg + 10).to_string());
        }
        if let Some(fg) = ansi_color(&self.style.foreground) {
            codes.push(fg.to_string());
        }
        if codes.is_empty() {
            body
        } else {
            format!("\x1b[{}m{}\x1b[0m", codes.join(";"), body)
        }
    }
}

impl<W: Write + Send> DisplaySurface for TextSurface<W> {
    fn render(&mut self, frame: &Frame) -> Result<(), String> {
        let line = self.line(frame);
        let result = if self.ansi {
            write!(self.writer, "\r\x1b[2K{}", line)
        } else {
            writeln!(self.writer, "{}", line)
        };
        result
            .and_then(|_| self.writer.flush())
            .map_err(|e| format!("Failed to write text frame: {}", e))
    }

    fn finish(&mut self) -> Result<(), String> {
        // the redrawn line has no newline of its own
        if !self.ansi {
            return Ok(());
        }
        writeln!(self.writer)
            .and_then(|_| self.writer.flush())
            .map_err(|e| format!("Failed to finish text line: {}", e))
    }
}

/// Surface writing to stdout in the requested format
pub fn stdout_surface(format: OutputFormat, style: SurfaceStyle) -> Box<dyn DisplaySurface> {
    let stdout = std::io::stdout();
    match format {
        OutputFormat::Text => {
            let ansi = stdout.is_terminal();
            Box::new(TextSurface::new(stdout, style, ansi))
        }
        OutputFormat::Html => Box::new(HtmlSurface::new(stdout, style)),
        OutputFormat::Json => Box::new(JsonSurface::new(stdout, style)),
    }
}

/// Foreground SGR code for a basic color name
fn ansi_color(name: &str) -> Option<u8> {
    match name.trim().to_ascii_lowercase().as_str() {
        "black" => Some(30),
        "red" => Some(31),
        "green" => Some(32),
        "yellow" => Some(33),
        "blue" | "navy" => Some(34),
        "magenta" => Some(35),
        "cyan" => Some(36),
        "white" => Some(37),
        _ => None,
    }
}

/// Keeps every rendered frame in memory; clones share the same record
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All frames rendered so far
    pub fn frames(&self) -> Result<Vec<Frame>, String> {
        self.frames
            .lock()
            .map(|frames| frames.clone())
            .map_err(|e| format!("Failed to lock frame record: {}", e))
    }

    /// The currently displayed content, if anything was rendered
    pub fn current(&self) -> Option<String> {
        self.frames
            .lock()
            .ok()
            .and_then(|frames| frames.last().map(|f| f.content.clone()))
    }
}

impl DisplaySurface for MemorySurface {
    fn render(&mut self, frame: &Frame) -> Result<(), String> {
        let mut frames = self.frames
            .lock()
            .map_err(|e| format!("Failed to lock frame record: {}", e))?;
        frames.push(frame.clone());
        Ok(())
    }
}
