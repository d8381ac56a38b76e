//! Query/Pagination Engine
//!
//! Holds the raw input, the committed term and the page number. The filtered
//! set and the page window are never stored; they are derived on demand by
//! [`filter_records`] and [`PageWindow::new`].

use crate::record::Record;
use serde::{Deserialize, Serialize};

/// Fixed number of rows per page
pub const PAGE_SIZE: usize = 10;

/// Record fields the search term is tested against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Name,
    Username,
    Email,
    Phone,
    Company,
}

impl MatchField {
    pub const ALL: [MatchField; 5] = [
        MatchField::Name,
        MatchField::Username,
        MatchField::Email,
        MatchField::Phone,
        MatchField::Company,
    ];

    pub fn default_set() -> Vec<MatchField> {
        vec![MatchField::Name, MatchField::Email, MatchField::Username]
    }

    pub fn value<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            MatchField::Name => &record.display_name,
            MatchField::Username => &record.handle,
            MatchField::Email => &record.email,
            MatchField::Phone => &record.phone,
            MatchField::Company => record.organization_name(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchField::Name => "name",
            MatchField::Username => "username",
            MatchField::Email => "email",
            MatchField::Phone => "phone",
            MatchField::Company => "company",
        }
    }

    /// Parse a comma-separated list such as `name,email`
    pub fn parse_list(list: &str) -> Result<Vec<MatchField>, String> {
        let mut fields = Vec::new();
        for part in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let field = MatchField::ALL
                .iter()
                .copied()
                .find(|f| f.label().eq_ignore_ascii_case(part))
                .ok_or_else(|| format!("unknown search field '{}'", part))?;
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        if fields.is_empty() {
            return Err("at least one search field is required".to_string());
        }
        Ok(fields)
    }
}

/// Case-insensitive substring test over `fields`. An empty term matches all.
pub fn matches_record(record: &Record, term: &str, fields: &[MatchField]) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| field.value(record).to_lowercase().contains(&needle))
}

/// Derive the filtered set, preserving collection order
pub fn filter_records<'a>(
    records: &'a [Record],
    term: &str,
    fields: &[MatchField],
) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|record| matches_record(record, term, fields))
        .collect()
}

/// Page window over a filtered set of `total` items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based, clamped into `[1, total_pages]`
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
    /// 1-based index of the first row shown, 0 when empty
    pub range_start: usize,
    /// 1-based index of the last row shown, 0 when empty
    pub range_end: usize,
    pub can_go_prev: bool,
    pub can_go_next: bool,
}

impl PageWindow {
    pub fn new(total: usize, page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total.div_ceil(page_size).max(1);
        let page = page.clamp(1, total_pages);

        let (range_start, range_end) = if total == 0 {
            (0, 0)
        } else {
            let start = (page - 1) * page_size;
            (start + 1, (start + page_size).min(total))
        };

        Self {
            page,
            total_pages,
            total,
            range_start,
            range_end,
            can_go_prev: page > 1,
            can_go_next: page < total_pages,
        }
    }

    /// Index range into the filtered set
    pub fn slice_range(&self) -> std::ops::Range<usize> {
        if self.total == 0 {
            0..0
        } else {
            (self.range_start - 1)..self.range_end
        }
    }
}

/// Input and paging state, independent of the collection
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    raw_input: String,
    committed: String,
    page: usize,
    validation_error: bool,
}

impl QueryEngine {
    pub fn new() -> Self {
        Self {
            raw_input: String::new(),
            committed: String::new(),
            page: 1,
            validation_error: false,
        }
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn committed_term(&self) -> &str {
        &self.committed
    }

    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    pub fn validation_error(&self) -> bool {
        self.validation_error
    }

    /// Keystroke-level update. An emptied field drops the filter at once.
    pub fn edit(&mut self, text: &str) {
        self.raw_input.clear();
        self.raw_input.push_str(text);
        self.validation_error = false;

        if self.raw_input.is_empty() && !self.committed.is_empty() {
            self.committed.clear();
            self.page = 1;
        }
    }

    /// Commit the trimmed input. Returns `false` and raises the validation
    /// flag when there is nothing to commit.
    pub fn submit(&mut self) -> bool {
        let trimmed = self.raw_input.trim();
        if trimmed.is_empty() {
            self.validation_error = true;
            return false;
        }
        self.committed = trimmed.to_string();
        self.page = 1;
        self.validation_error = false;
        true
    }

    pub fn clear(&mut self) {
        self.raw_input.clear();
        self.committed.clear();
        self.page = 1;
        self.validation_error = false;
    }

    /// Move to `target` if it exists within `total_pages`; otherwise no-op
    pub fn go_to_page(&mut self, target: usize, total_pages: usize) -> bool {
        let current = self.page().min(total_pages.max(1));
        if target == 0 || target > total_pages.max(1) || target == current {
            return false;
        }
        self.page = target;
        true
    }

    pub fn next_page(&mut self, total_pages: usize) -> bool {
        let current = self.page().min(total_pages.max(1));
        self.go_to_page(current + 1, total_pages)
    }

    pub fn prev_page(&mut self, total_pages: usize) -> bool {
        let current = self.page().min(total_pages.max(1));
        if current <= 1 {
            return false;
        }
        self.go_to_page(current - 1, total_pages)
    }
}
