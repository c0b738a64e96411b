//! Growable code-point buffer used for OSC/DCS/APC/PM/SOS string bodies.
//!
//! Capacity starts small and doubles on demand up to `MAX_CAPACITY`,
//! matching the reference parser's denial-of-service mitigation: an
//! unbounded OSC/DCS payload is truncated rather than allowed to grow
//! forever.

const INITIAL_CAPACITY: usize = 128;
const MAX_CAPACITY: usize = 4096;

#[derive(Debug, Clone, Default)]
pub struct SequenceString {
    data: Vec<char>,
    truncated: bool,
}

impl SequenceString {
    pub fn clear(&mut self) {
        self.data.clear();
        self.truncated = false;
    }

    pub fn push(&mut self, c: char) {
        if self.data.len() >= MAX_CAPACITY {
            self.truncated = true;
            return;
        }
        if self.data.capacity() == self.data.len() && self.data.capacity() < MAX_CAPACITY {
            let new_cap = (self.data.capacity().max(INITIAL_CAPACITY / 2) * 2).min(MAX_CAPACITY);
            self.data.reserve(new_cap - self.data.len());
        }
        self.data.push(c);
    }

    pub fn as_str_lossy(&self) -> String {
        self.data.iter().collect()
    }

    pub fn chars(&self) -> &[char] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the body hit `MAX_CAPACITY` and further input was dropped.
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn grows_and_collects() {
        let mut s = SequenceString::default();
        for c in "hello".chars() {
            s.push(c);
        }
        assert_eq!(s.as_str_lossy(), "hello");
        assert!(!s.was_truncated());
    }

    #[test]
    fn truncates_past_cap() {
        let mut s = SequenceString::default();
        for _ in 0..(MAX_CAPACITY + 10) {
            s.push('x');
        }
        assert_eq!(s.len(), MAX_CAPACITY);
        assert!(s.was_truncated());
    }
}
