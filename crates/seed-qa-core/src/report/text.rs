//! Text measurement and wrapping for the standard Helvetica face.

/// Millimetres per typographic point.
pub const PT_TO_MM: f32 = 25.4 / 72.0;

/// Average Helvetica glyph advance as a fraction of the font size.
const AVERAGE_ADVANCE_EM: f32 = 0.5;

/// Estimated width in millimetres of `text` set at `size_pt`.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn text_width(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * PT_TO_MM * AVERAGE_ADVANCE_EM
}

/// Maximum number of characters that fit into `width_mm` at `size_pt`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn capacity(width_mm: f32, size_pt: f32) -> usize {
    let per_char = size_pt * PT_TO_MM * AVERAGE_ADVANCE_EM;
    ((width_mm / per_char).floor() as usize).max(1)
}

/// Greedy word wrap. Words longer than a line are split. Always returns at
/// least one line.
#[must_use]
pub fn wrap(text: &str, width_mm: f32, size_pt: f32) -> Vec<String> {
    let capacity = capacity(width_mm, size_pt);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > capacity {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(capacity);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current.is_empty() {
            word.len()
        } else {
            current.chars().count() + 1 + word.len()
        };
        if needed > capacity && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
