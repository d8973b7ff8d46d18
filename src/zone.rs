use std::collections::VecDeque;

use crate::{
    error::{LayoutError, Result},
    geometry::Rect,
    metrics::FontMetrics,
};

/// One block of text bound to a rectangle on the canvas.
///
/// The zone's width limits how many columns fit on a row; its height grows
/// while wrapping so every row has room. Rows are only available after
/// [`TextZone::wrap`] has run.
#[derive(Clone, Debug, PartialEq)]
pub struct TextZone {
    text: String,
    rect: Rect,
    /// Extra padding added below the last row.
    text_space: i32,
    rows: Vec<String>,
}

impl TextZone {
    pub fn new(text: impl Into<String>, rect: Rect, text_space: i32) -> Self {
        Self {
            text: text.into(),
            rect,
            text_space,
            rows: Vec::new(),
        }
    }

    /// Creates a zone from raw bytes, which must be valid UTF-8.
    pub fn from_utf8(bytes: &[u8], rect: Rect, text_space: i32) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|source| LayoutError::EncodingError {
            input: bytes.to_vec(),
            source,
        })?;
        Ok(Self::new(text, rect, text_space))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn text_space(&self) -> i32 {
        self.text_space
    }

    /// Wrapped rows, in reading order. Empty until the zone is wrapped.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Drops the wrapped rows so the zone can be wrapped again.
    pub fn clear_rows(&mut self) {
        self.rows.clear();
    }

    /// Moves the top-left corner to `(x, y)`.
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.rect.x = x;
        self.rect.y = y;
    }

    pub fn shift(&mut self, dx: i32, dy: i32) {
        self.rect.x += dx;
        self.rect.y += dy;
    }

    /// Multiplies position and size by `factor`, truncating toward zero.
    pub fn scale(&mut self, factor: f64) {
        let scaled = |v: i32| (v as f64 * factor) as i32;
        self.rect = Rect::new(
            scaled(self.rect.x),
            scaled(self.rect.y),
            scaled(self.rect.width),
            scaled(self.rect.height),
        );
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.rect.width = width;
        self.rect.height = height;
    }

    /// Splits the text into rows that fit the zone width.
    ///
    /// Words are placed greedily; a word longer than a whole row is cut at the
    /// row boundary character by character. The zone height grows as rows are
    /// added and, when `fit_height` is set, ends up exactly as tall as the rows
    /// need. The text space is added below the rows in every case.
    ///
    /// The zone must not hold rows yet, see [`TextZone::clear_rows`].
    pub fn wrap(&mut self, metrics: &FontMetrics, fit_height: bool) -> Result<()> {
        if !self.rows.is_empty() {
            return Err(LayoutError::AlreadyWrapped {
                rows: self.rows.len(),
            });
        }

        let max_symbols = self.max_symbols_per_row(metrics)?;
        let symbol_height = metrics.symbol_height;

        let mut words = split_words(&self.text);
        let mut rows = vec![String::new()];
        let mut row_len = 0usize;
        self.grow_height_for_rows(symbol_height, rows.len());

        while let Some(mut word) = words.pop_front() {
            let word_len = word.chars().count();
            if row_len + word_len <= max_symbols {
                push_to_last(&mut rows, &word);
                row_len += word_len;
                continue;
            }

            // row separators are not carried to the start of a row
            if word.starts_with(' ') {
                word.remove(0);
            }

            if row_len == 0 {
                let stripped_len = word.chars().count();
                if stripped_len <= max_symbols {
                    push_to_last(&mut rows, &word);
                    row_len = stripped_len;
                    continue;
                }

                // the word alone overflows the row: hard split
                let split_at = word
                    .char_indices()
                    .nth(max_symbols)
                    .map_or(word.len(), |(idx, _)| idx);
                let remainder = word.split_off(split_at);
                push_to_last(&mut rows, &word);
                if !remainder.is_empty() {
                    words.push_front(remainder);
                }
            } else {
                words.push_front(word);
            }

            rows.push(String::new());
            row_len = 0;
            self.grow_height_for_rows(symbol_height, rows.len());
        }

        let needed_height = symbol_height * rows.len() as i32;
        if self.rect.height < needed_height || fit_height {
            self.resize(self.rect.width, needed_height);
        }
        self.resize(self.rect.width, self.rect.height + self.text_space);

        log::trace!(
            "wrapped {} chars into {} rows of at most {} symbols, zone {:?}",
            self.text.chars().count(),
            rows.len(),
            max_symbols,
            self.rect
        );

        self.rows = rows;
        Ok(())
    }

    fn max_symbols_per_row(&self, metrics: &FontMetrics) -> Result<usize> {
        if metrics.symbol_width <= 0 || metrics.symbol_height <= 0 {
            return Err(LayoutError::geometry(format!(
                "reference glyph measures {}x{} at font size {}",
                metrics.symbol_width, metrics.symbol_height, metrics.font_size
            )));
        }
        if self.rect.height < 0 {
            return Err(LayoutError::geometry(format!(
                "negative zone height in {:?}",
                self.rect
            )));
        }

        let max_symbols = self.rect.width / metrics.symbol_width;
        if max_symbols <= 0 {
            return Err(LayoutError::geometry(format!(
                "zone {:?} is narrower than one {}px column",
                self.rect, metrics.symbol_width
            )));
        }
        Ok(max_symbols as usize)
    }

    fn grow_height_for_rows(&mut self, symbol_height: i32, row_count: usize) {
        let needed = symbol_height * row_count as i32;
        if self.rect.height < needed {
            self.resize(self.rect.width, needed);
        }
    }
}

/// Splits on single spaces. Every word but the first keeps its separating
/// space in front, so concatenating the words gives back the text.
fn split_words(text: &str) -> VecDeque<String> {
    text.split(' ')
        .enumerate()
        .map(|(i, word)| {
            if i == 0 {
                word.to_string()
            } else {
                format!(" {word}")
            }
        })
        .collect()
}

fn push_to_last(rows: &mut [String], word: &str) {
    if let Some(row) = rows.last_mut() {
        row.push_str(word);
    }
}
