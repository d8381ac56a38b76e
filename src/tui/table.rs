/// Row highlight within the current page
#[derive(Default)]
pub struct TableState {
    pub selected: Option<usize>,
}

impl TableState {
    pub fn select_next(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let i = match self.selected {
            Some(i) => (i + 1).min(total - 1),
            None => 0,
        };
        self.selected = Some(i);
    }

    pub fn select_prev(&mut self) {
        let i = match self.selected {
            Some(0) | None => 0,
            Some(i) => i - 1,
        };
        self.selected = Some(i);
    }

    pub fn select_first(&mut self, total: usize) {
        self.selected = if total == 0 { None } else { Some(0) };
    }

    pub fn select_last(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        self.selected = Some(total - 1);
    }

    /// Re-anchor after the page contents changed
    pub fn clamp(&mut self, total: usize) {
        self.selected = match self.selected {
            _ if total == 0 => None,
            Some(i) => Some(i.min(total - 1)),
            None => None,
        };
    }
}
