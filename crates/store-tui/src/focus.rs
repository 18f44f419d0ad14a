//! FocusRing — keyboard focus cycling between the controls of a view.

pub struct FocusRing<T: Copy + PartialEq> {
    items: Vec<T>,
    current: usize,
}

impl<T: Copy + PartialEq> FocusRing<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items, current: 0 }
    }

    pub fn current(&self) -> Option<T> {
        self.items.get(self.current).copied()
    }

    pub fn next(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.items.len();
        self.current()
    }

    pub fn prev(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        self.current = if self.current == 0 {
            self.items.len() - 1
        } else {
            self.current - 1
        };
        self.current()
    }

    pub fn set(&mut self, id: T) {
        if let Some(pos) = self.items.iter().position(|&x| x == id) {
            self.current = pos;
        }
    }

    pub fn is_focused(&self, id: T) -> bool {
        self.current().map_or(false, |c| c == id)
    }
}

impl<T: Copy + PartialEq> Default for FocusRing<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_both_ways() {
        let mut ring = FocusRing::new(vec!['a', 'b', 'c']);
        assert_eq!(ring.current(), Some('a'));
        assert_eq!(ring.next(), Some('b'));
        assert_eq!(ring.next(), Some('c'));
        assert_eq!(ring.next(), Some('a'));
        assert_eq!(ring.prev(), Some('c'));
    }

    #[test]
    fn test_set_ignores_unknown() {
        let mut ring = FocusRing::new(vec![1, 2]);
        ring.set(2);
        assert!(ring.is_focused(2));
        ring.set(7);
        assert!(ring.is_focused(2));
    }

    #[test]
    fn test_empty_ring() {
        let mut ring: FocusRing<u8> = FocusRing::default();
        assert_eq!(ring.next(), None);
        assert_eq!(ring.prev(), None);
        assert!(!ring.is_focused(0));
    }
}
