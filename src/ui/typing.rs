/// Reveals a prompt one character at a time from accumulated frame time.
#[derive(Clone, Debug)]
pub struct TypingReveal {
    text: String,
    interval_secs: f64,
    elapsed: f64,
    /// End byte offset of each character.
    ends: Vec<usize>,
}

impl TypingReveal {
    pub fn new(text: impl Into<String>, interval_secs: f64) -> Self {
        let text = text.into();
        let ends = text
            .char_indices()
            .map(|(i, c)| i + c.len_utf8())
            .collect();
        Self {
            text,
            interval_secs: if interval_secs.is_finite() && interval_secs > 0.0 {
                interval_secs
            } else {
                0.0
            },
            elapsed: 0.0,
            ends,
        }
    }

    /// Start over with new text, as when the wizard changes step.
    pub fn restart(&mut self, text: impl Into<String>) {
        *self = Self::new(text, self.interval_secs);
    }

    pub fn advance(&mut self, dt_secs: f64) {
        if dt_secs.is_finite() && dt_secs > 0.0 {
            self.elapsed += dt_secs;
        }
    }

    /// Number of characters currently shown.
    pub fn revealed(&self) -> usize {
        let total = self.ends.len();
        if self.interval_secs == 0.0 {
            return total;
        }
        let n = (self.elapsed / self.interval_secs).floor();
        if n >= total as f64 { total } else { n as usize }
    }

    pub fn displayed(&self) -> &str {
        match self.revealed() {
            0 => "",
            n => &self.text[..self.ends[n - 1]],
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_typing(&self) -> bool {
        self.revealed() < self.ends.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ui/typing.rs"]
mod tests;
