//! Listing sort and filter.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, FromRepr, IntoEnumIterator};

use crate::entry::DirectoryEntry;

/// Column a listing can be sorted by.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Display,
    EnumIter,
    EnumString,
    FromRepr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    #[default]
    Name,
    Size,
    Type,
    Modified,
}

impl SortColumn {
    /// Cycle to the next column.
    pub fn next(self) -> Self {
        let next = (self as usize + 1) % Self::iter().count();
        Self::from_repr(next).unwrap_or_default()
    }

    /// Column header text.
    pub fn header(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Size => "Size",
            Self::Type => "Type",
            Self::Modified => "Date Modified",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// The opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn arrow(&self) -> &'static str {
        match self {
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }
}

/// Current sort column and direction of a listing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub column: SortColumn,
    pub order: SortOrder,
}

impl SortState {
    pub fn new(column: SortColumn, order: SortOrder) -> Self {
        Self { column, order }
    }

    /// Select a column. Selecting the active column flips the direction;
    /// a new column starts ascending.
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == column {
            self.order = self.order.reverse();
        } else {
            self.column = column;
            self.order = SortOrder::Ascending;
        }
    }

    /// Sort entries in place. Folders always precede files; the direction
    /// applies within each group. Missing sizes count as zero and missing
    /// dates as the oldest possible.
    pub fn apply(&self, entries: &mut [DirectoryEntry]) {
        entries.sort_by(|a, b| {
            let group = b.is_folder().cmp(&a.is_folder());
            if group != Ordering::Equal {
                return group;
            }
            let ord = self.compare(a, b);
            match self.order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
    }

    fn compare(&self, a: &DirectoryEntry, b: &DirectoryEntry) -> Ordering {
        let by_name = || a.name.to_lowercase().cmp(&b.name.to_lowercase());
        match self.column {
            SortColumn::Name => by_name(),
            SortColumn::Size => a
                .size
                .unwrap_or(0)
                .cmp(&b.size.unwrap_or(0))
                .then_with(by_name),
            SortColumn::Type => a
                .type_label()
                .to_lowercase()
                .cmp(&b.type_label().to_lowercase())
                .then_with(by_name),
            SortColumn::Modified => a.modified.cmp(&b.modified).then_with(by_name),
        }
    }

    /// Header text for a column, with an arrow on the active one.
    pub fn header(&self, column: SortColumn) -> String {
        if column == self.column {
            format!("{} {}", column.header(), self.order.arrow())
        } else {
            column.header().to_string()
        }
    }

    /// Short status bar label, e.g. `size↓`.
    pub fn label(&self) -> String {
        format!("{}{}", self.column, self.order.arrow())
    }
}

/// Entries whose name or type label contains `term`, case-insensitively.
/// An empty term keeps everything.
pub fn filter_entries<'a>(entries: &'a [DirectoryEntry], term: &str) -> Vec<&'a DirectoryEntry> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return entries.iter().collect();
    }
    entries
        .iter()
        .filter(|e| {
            e.name.to_lowercase().contains(&term) || e.type_label().to_lowercase().contains(&term)
        })
        .collect()
}
