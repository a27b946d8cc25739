//! Indented HTML fragment assembly and escaping.
//!
//! Every line of rendered markup goes through [`FragmentWriter`] so the
//! emitted fragment nests visually the way the HTML block structure does.
//! The writer is a line-accumulation protocol, not a templating engine:
//! `open` emits then indents, `close` dedents then emits, `line` emits at
//! the current depth.

const INDENT: &str = "    ";

/// Accumulates HTML lines with depth-tracked indentation.
#[derive(Debug, Default)]
pub struct FragmentWriter {
    buf: String,
    depth: usize,
}

impl FragmentWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a line at the current depth.
    pub fn line(&mut self, code: &str) {
        self.push(code);
    }

    /// Emit an opening-tag line, then increase the depth.
    pub fn open(&mut self, code: &str) {
        self.push(code);
        self.depth += 1;
    }

    /// Decrease the depth, then emit a closing-tag line.
    pub fn close(&mut self, code: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.push(code);
    }

    /// Consume the writer and return the accumulated fragment.
    #[must_use]
    pub fn finish(self) -> String {
        self.buf
    }

    fn push(&mut self, code: &str) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
        self.buf.push_str(code);
        self.buf.push('\n');
    }
}

/// Escape text for HTML element content.
///
/// Escapes `&`, `<`, `>` and `"` but leaves apostrophes alone, matching the
/// markup the live storefront emits for the same fields.
#[must_use]
pub fn esc_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape text for a double-quoted HTML attribute value.
#[must_use]
pub fn esc_attr(value: &str) -> String {
    esc_html(value)
}
