//! PDF export rendering.
//!
//! Produces Letter-sized pages with 50pt margins using the standard
//! Helvetica family, so no font data is embedded. Text is laid out with a
//! simple cursor that wraps on word boundaries and starts a new page when
//! the bottom margin is reached.

use chrono::{DateTime, Local, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

use noteflow_core::error::AppError;
use noteflow_entity::note::Note;

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 50.0;
const LINE_SPACING: f32 = 1.2;
const GRAY: f32 = 0.5;

/// Average glyph advance as a fraction of the font size. Helvetica's real
/// metrics vary per glyph; this errs wide so lines never overrun.
const AVG_ADVANCE_REGULAR: f32 = 0.52;
const AVG_ADVANCE_BOLD: f32 = 0.58;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
    Oblique,
}

impl Font {
    fn resource_name(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
            Self::Oblique => "F3",
        }
    }

    fn advance(self) -> f32 {
        match self {
            Self::Bold => AVG_ADVANCE_BOLD,
            Self::Regular | Self::Oblique => AVG_ADVANCE_REGULAR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy)]
struct Style {
    font: Font,
    size: f32,
    align: Align,
    gray: bool,
    underline: bool,
}

impl Style {
    fn new(font: Font, size: f32) -> Self {
        Self {
            font,
            size,
            align: Align::Left,
            gray: false,
            underline: false,
        }
    }

    fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    fn gray(mut self) -> Self {
        self.gray = true;
        self
    }

    fn underlined(mut self) -> Self {
        self.underline = true;
        self
    }

    fn line_height(&self) -> f32 {
        self.size * LINE_SPACING
    }

    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.size * self.font.advance()
    }
}

/// Accumulates content operations page by page.
struct Layout {
    pages: Vec<Vec<Operation>>,
    /// Baseline of the next line, measured from the page bottom.
    cursor: f32,
    last_size: f32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            cursor: PAGE_HEIGHT - MARGIN,
            last_size: 12.0,
        }
    }

    fn content_width() -> f32 {
        PAGE_WIDTH - 2.0 * MARGIN
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor = PAGE_HEIGHT - MARGIN;
    }

    /// Advances the cursor by `lines` blank lines at the last used size.
    fn move_down(&mut self, lines: f32) {
        self.cursor -= lines * self.last_size * LINE_SPACING;
    }

    /// Writes `text` as one or more wrapped lines. Embedded newlines start
    /// new lines; blank lines are kept.
    fn text(&mut self, text: &str, style: Style) {
        self.last_size = style.size;
        for paragraph in text.split('\n') {
            let lines = wrap(paragraph.trim_end_matches('\r'), &style);
            if lines.is_empty() {
                self.line("", &style);
            }
            for line in lines {
                self.line(&line, &style);
            }
        }
    }

    fn line(&mut self, text: &str, style: &Style) {
        if self.cursor - style.line_height() < MARGIN {
            self.new_page();
        }
        self.cursor -= style.size;
        let baseline = self.cursor;
        self.cursor -= style.line_height() - style.size;

        if text.is_empty() {
            return;
        }

        let width = style.text_width(text);
        let x = match style.align {
            Align::Left => MARGIN,
            Align::Center => MARGIN + ((Self::content_width() - width) / 2.0).max(0.0),
        };
        let shade = if style.gray { GRAY } else { 0.0 };

        let Some(page) = self.pages.last_mut() else {
            return;
        };
        page.push(Operation::new("rg", vec![shade.into(), shade.into(), shade.into()]));
        page.push(Operation::new("BT", vec![]));
        page.push(Operation::new(
            "Tf",
            vec![style.font.resource_name().into(), style.size.into()],
        ));
        page.push(Operation::new("Td", vec![x.into(), baseline.into()]));
        page.push(Operation::new("Tj", vec![Object::string_literal(encode_latin1(text))]));
        page.push(Operation::new("ET", vec![]));
        if style.underline {
            let y = baseline - style.size * 0.15;
            page.push(Operation::new("RG", vec![shade.into(), shade.into(), shade.into()]));
            page.push(Operation::new("w", vec![(style.size / 18.0).into()]));
            page.push(Operation::new("m", vec![x.into(), y.into()]));
            page.push(Operation::new("l", vec![(x + width).into(), y.into()]));
            page.push(Operation::new("S", vec![]));
        }
    }

    fn into_pages(self) -> Vec<Vec<Operation>> {
        self.pages
    }
}

/// Greedy word wrap to the content width. Words longer than a line are
/// split at character boundaries.
fn wrap(text: &str, style: &Style) -> Vec<String> {
    let max_chars =
        ((Layout::content_width() / (style.size * style.font.advance())).floor() as usize).max(1);

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > max_chars && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Maps text to the single-byte encoding used by the standard fonts.
/// Characters outside Latin-1 become `?`.
fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            cp @ 0x20..=0x7e | cp @ 0xa0..=0xff => cp as u8,
            _ => b'?',
        })
        .collect()
}

fn format_timestamp(value: DateTime<Utc>) -> String {
    value
        .with_timezone(&Local)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

fn format_optional(value: Option<DateTime<Utc>>) -> String {
    value
        .map(format_timestamp)
        .unwrap_or_else(|| "Unknown".to_string())
}

fn lay_out(notes: &[Note]) -> Layout {
    let mut layout = Layout::new();

    layout.text("NoteFlow Export", Style::new(Font::Bold, 20.0).centered());
    layout.move_down(1.0);
    layout.text(
        &format!("Exported on: {}", format_timestamp(Utc::now())),
        Style::new(Font::Regular, 12.0).centered(),
    );
    layout.text(
        &format!("Total Notes: {}", notes.len()),
        Style::new(Font::Regular, 10.0).centered(),
    );
    layout.move_down(2.0);

    if notes.is_empty() {
        layout.text(
            "No notes to export.",
            Style::new(Font::Regular, 14.0).centered(),
        );
        return layout;
    }

    for (index, note) in notes.iter().enumerate() {
        if index > 0 {
            layout.new_page();
        }

        let title = if note.title.is_empty() {
            "Untitled Note"
        } else {
            note.title.as_str()
        };
        layout.text(title, Style::new(Font::Bold, 16.0).underlined());
        layout.move_down(0.5);

        let body = if note.body.is_empty() {
            "(No content)"
        } else {
            note.body.as_str()
        };
        layout.text(body, Style::new(Font::Regular, 12.0));
        layout.move_down(1.0);

        if !note.tags.is_empty() {
            layout.text(
                &format!("Tags: {}", note.tags.join(", ")),
                Style::new(Font::Oblique, 10.0).gray(),
            );
            layout.move_down(1.0);
        }

        let meta = Style::new(Font::Regular, 10.0).gray();
        layout.text(&format!("Created: {}", format_optional(note.created)), meta);
        layout.text(
            &format!("Modified: {}", format_optional(note.last_modified)),
            meta,
        );
    }

    layout
}

/// Builds the export document for `notes`.
pub fn render(notes: &[Note]) -> Result<Document, AppError> {
    let pages = lay_out(notes).into_pages();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font = |doc: &mut Document, base: &str| -> ObjectId {
        doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => base,
            "Encoding" => "WinAnsiEncoding",
        })
    };
    let regular = font(&mut doc, "Helvetica");
    let bold = font(&mut doc, "Helvetica-Bold");
    let oblique = font(&mut doc, "Helvetica-Oblique");

    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Regular.resource_name() => regular,
            Font::Bold.resource_name() => bold,
            Font::Oblique.resource_name() => oblique,
        },
    });

    let mut kids = Vec::with_capacity(pages.len());
    for operations in pages {
        let encoded = Content { operations }
            .encode()
            .map_err(|e| AppError::internal(format!("Failed to encode PDF page: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::from(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}
