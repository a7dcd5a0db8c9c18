//! Keyboard selection state: active category and highlighted index.

use crate::item::Category;

/// Selection over the aggregator's current results. Owns nothing but the
/// active category and index; the caller supplies the flat list length.
#[derive(Clone, Copy, Debug)]
pub struct Selection {
    active: Category,
    index: usize,
}

impl Selection {
    pub fn new() -> Self {
        Self {
            active: Category::All,
            index: 0,
        }
    }

    pub fn active(&self) -> Category {
        self.active
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Back to the default view: aggregate category, first row.
    pub fn reset(&mut self) {
        self.active = Category::All;
        self.index = 0;
    }

    /// A changed query invalidates the highlighted row.
    pub fn reset_index(&mut self) {
        self.index = 0;
    }

    /// Switch to a category. Any category change resets the index so it can
    /// never point past the end of the new list.
    pub fn set_active(&mut self, category: Category) {
        if category != self.active {
            self.active = category;
            self.index = 0;
        }
    }

    /// Move the highlight down, wrapping. Empty lists pin the index at 0.
    pub fn move_next(&mut self, count: usize) {
        if count == 0 {
            self.index = 0;
        } else {
            self.index = (self.index.min(count - 1) + 1) % count;
        }
    }

    /// Move the highlight up, wrapping.
    pub fn move_prev(&mut self, count: usize) {
        if count == 0 {
            self.index = 0;
        } else {
            self.index = (self.index.min(count - 1) + count - 1) % count;
        }
    }

    /// Cycle through the category tabs; `shift` cycles backwards.
    pub fn next_category(&mut self, shift: bool) {
        let cycle = &Category::CYCLE;
        let pos = cycle.iter().position(|&c| c == self.active).unwrap_or(0);
        let next = if shift {
            (pos + cycle.len() - 1) % cycle.len()
        } else {
            (pos + 1) % cycle.len()
        };
        self.active = cycle[next];
        self.index = 0;
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_wrap_circularly() {
        let mut sel = Selection::new();
        sel.move_next(3);
        sel.move_next(3);
        assert_eq!(sel.index(), 2);
        sel.move_next(3);
        assert_eq!(sel.index(), 0);
        sel.move_prev(3);
        assert_eq!(sel.index(), 2);
    }

    #[test]
    fn empty_list_pins_index_at_zero() {
        let mut sel = Selection::new();
        sel.move_next(0);
        assert_eq!(sel.index(), 0);
        sel.move_prev(0);
        assert_eq!(sel.index(), 0);
    }

    #[test]
    fn shrunken_list_clamps_before_moving() {
        let mut sel = Selection::new();
        sel.move_next(5);
        sel.move_next(5);
        sel.move_next(5);
        assert_eq!(sel.index(), 3);
        // List shrank to 2 entries since the last move
        sel.move_next(2);
        assert_eq!(sel.index(), 0);
    }

    #[test]
    fn category_cycle_wraps_both_ways() {
        let mut sel = Selection::new();
        assert_eq!(sel.active(), Category::All);
        sel.next_category(false);
        assert_eq!(sel.active(), Category::Account);
        sel.next_category(true);
        sel.next_category(true);
        assert_eq!(sel.active(), Category::Action);
    }

    #[test]
    fn category_change_resets_index() {
        let mut sel = Selection::new();
        sel.move_next(4);
        sel.move_next(4);
        assert_eq!(sel.index(), 2);
        sel.next_category(false);
        assert_eq!(sel.index(), 0);

        sel.move_next(4);
        sel.set_active(Category::Company);
        assert_eq!(sel.index(), 0);

        // Re-setting the same category is not a change
        sel.move_next(4);
        sel.set_active(Category::Company);
        assert_eq!(sel.index(), 1);
    }
}
