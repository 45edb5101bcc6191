use chrono::Local;

/// Newest entries kept when the activity feed fills up.
const MAX_ENTRIES: usize = 200;

/// Activity feed shown beside the conversation: submissions, responses,
/// failures, exports. Purely informational, never sent anywhere.
#[derive(Debug, Default)]
pub struct LogView {
    pub entries: Vec<String>,
}

impl LogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: impl Into<String>) {
        let stamped = format!("{} {}", Local::now().format("%H:%M:%S"), entry.into());
        self.entries.push(stamped);
        if self.entries.len() > MAX_ENTRIES {
            self.entries.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_newest_entries() {
        let mut view = LogView::new();
        for i in 0..(MAX_ENTRIES + 25) {
            view.add(format!("entry {}", i));
        }

        assert_eq!(view.entries.len(), MAX_ENTRIES);
        let last = view.entries.last().unwrap();
        assert!(last.ends_with(&format!("entry {}", MAX_ENTRIES + 24)));
    }
}
