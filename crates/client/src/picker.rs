//! Single-choice selection

use common::Result;

/// One selectable entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickItem {
    /// Main line
    pub label: String,
    /// Secondary text shown next to the label
    pub description: String,
    /// Extra lines shown for the highlighted item
    pub details: Vec<String>,
}

impl PickItem {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            details: Vec::new(),
        }
    }

    pub fn with_detail(mut self, line: impl Into<String>) -> Self {
        self.details.push(line.into());
        self
    }

    /// Case-insensitive substring match over label and description
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.label.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Lets the user choose one of `items`
///
/// Returns the index into `items`, or `None` when the user cancelled.
pub trait Picker {
    fn pick(&mut self, title: &str, items: &[PickItem]) -> Result<Option<usize>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches() {
        let item = PickItem::new("SanDisk Corp. Cruzer Blade", "1-2 @ lab-pi");
        assert!(item.matches(""));
        assert!(item.matches("cruzer"));
        assert!(item.matches("lab-pi"));
        assert!(!item.matches("logitech"));
    }
}
