//! Selection and scroll tracking for list panes.

/// Selected row and first visible row of a scrolling list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListCursor {
    pub selected: usize,
    pub scroll: usize,
}

impl ListCursor {
    pub fn down(&mut self, count: usize, height: usize) {
        if count == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(count - 1);
        self.follow(height);
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        }
    }

    pub fn top(&mut self) {
        *self = ListCursor::default();
    }

    pub fn bottom(&mut self, count: usize, height: usize) {
        if count > 0 {
            self.selected = count - 1;
            self.follow(height);
        }
    }

    /// Half a page down.
    pub fn page_down(&mut self, count: usize, height: usize) {
        if count == 0 {
            return;
        }
        self.selected = (self.selected + (height / 2).max(1)).min(count - 1);
        self.follow(height);
    }

    /// Half a page up.
    pub fn page_up(&mut self, height: usize) {
        self.selected = self.selected.saturating_sub((height / 2).max(1));
        if self.selected < self.scroll {
            self.scroll = self.selected;
        }
    }

    /// Pull the cursor back inside a list that shrank to `count` rows.
    pub fn clamp(&mut self, count: usize, height: usize) {
        if count == 0 {
            self.top();
            return;
        }
        self.selected = self.selected.min(count - 1);
        if self.scroll > self.selected {
            self.scroll = self.selected;
        }
        self.follow(height);
    }

    fn follow(&mut self, height: usize) {
        let height = height.max(1);
        if self.selected >= self.scroll + height {
            self.scroll = self.selected + 1 - height;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        }
    }
}
