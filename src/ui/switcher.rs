use crate::foundation::error::{ScrublineError, ScrublineResult};

/// Which way a switch moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Switch {
    Next,
    Prev,
    Select,
}

/// A selection change: `from -> to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Switched {
    pub from: usize,
    pub to: usize,
    pub how: Switch,
}

/// Wrapping selection over a fixed, non-empty list (testimonials, carousels).
#[derive(Clone, Debug)]
pub struct Switcher<T> {
    items: Vec<T>,
    current: usize,
}

impl<T> Switcher<T> {
    pub fn new(items: Vec<T>) -> ScrublineResult<Self> {
        if items.is_empty() {
            return Err(ScrublineError::validation("switcher needs at least one item"));
        }
        Ok(Self { items, current: 0 })
    }

    /// Like [`Switcher::new`], starting at `index` (clamped to the last item).
    pub fn starting_at(items: Vec<T>, index: usize) -> ScrublineResult<Self> {
        let mut s = Self::new(items)?;
        s.current = index.min(s.items.len() - 1);
        Ok(s)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &T {
        &self.items[self.current]
    }

    /// Advance with wrap-around. A single item never switches.
    pub fn next(&mut self) -> Option<Switched> {
        let to = (self.current + 1) % self.items.len();
        self.go(to, Switch::Next)
    }

    pub fn prev(&mut self) -> Option<Switched> {
        let n = self.items.len();
        let to = (self.current + n - 1) % n;
        self.go(to, Switch::Prev)
    }

    /// Jump to `index`. Out-of-range and current indices are ignored.
    pub fn select(&mut self, index: usize) -> Option<Switched> {
        if index >= self.items.len() {
            return None;
        }
        self.go(index, Switch::Select)
    }

    fn go(&mut self, to: usize, how: Switch) -> Option<Switched> {
        if to == self.current {
            return None;
        }
        let from = std::mem::replace(&mut self.current, to);
        Some(Switched { from, to, how })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ui/switcher.rs"]
mod tests;
