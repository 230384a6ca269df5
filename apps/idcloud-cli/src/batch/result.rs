//! Bulk operation result types
//!
//! Tracks per-item outcomes so a bulk run can continue past failures and
//! report totals at the end.

/// Status of a single item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchItemStatus {
    /// Operation completed successfully
    Success,
    /// Operation failed (API error)
    Failed,
    /// Item skipped (validation error)
    Skipped,
}

/// Result for a single item in a bulk operation
#[derive(Debug, Clone)]
pub struct BatchItemResult {
    /// Item name, e.g. an entity ID or file name
    pub name: String,
    pub status: BatchItemStatus,
    /// Error message if failed or skipped
    pub error: Option<String>,
}

/// Summary of a completed bulk operation
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub success_count: usize,
    pub failure_count: usize,
    /// Items skipped before any remote call, e.g. files failing validation
    pub skipped_count: usize,
    pub items: Vec<BatchItemResult>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a successful item
    pub fn add_success(&mut self, name: impl Into<String>) {
        self.success_count += 1;
        self.items.push(BatchItemResult {
            name: name.into(),
            status: BatchItemStatus::Success,
            error: None,
        });
    }

    /// Add a failed item
    pub fn add_failure(&mut self, name: impl Into<String>, error: impl Into<String>) {
        self.failure_count += 1;
        self.items.push(BatchItemResult {
            name: name.into(),
            status: BatchItemStatus::Failed,
            error: Some(error.into()),
        });
    }

    /// Add a skipped item
    pub fn add_skipped(&mut self, name: impl Into<String>, reason: impl Into<String>) {
        self.skipped_count += 1;
        self.items.push(BatchItemResult {
            name: name.into(),
            status: BatchItemStatus::Skipped,
            error: Some(reason.into()),
        });
    }

    /// Fold another result into this one
    pub fn merge(&mut self, other: BatchResult) {
        self.success_count += other.success_count;
        self.failure_count += other.failure_count;
        self.skipped_count += other.skipped_count;
        self.items.extend(other.items);
    }

    /// Items attempted (successes plus failures)
    pub fn attempted(&self) -> usize {
        self.success_count + self.failure_count
    }

    /// Check if all items succeeded
    pub fn all_succeeded(&self) -> bool {
        self.failure_count == 0 && self.skipped_count == 0
    }

    /// Check if any items failed
    pub fn has_failures(&self) -> bool {
        self.failure_count > 0
    }

    /// Get only the failed items
    pub fn failed_items(&self) -> impl Iterator<Item = &BatchItemResult> {
        self.items
            .iter()
            .filter(|i| i.status == BatchItemStatus::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut result = BatchResult::new();
        result.add_success("a");
        result.add_failure("b", "409 conflict");
        result.add_success("c");

        assert_eq!(result.success_count, 2);
        assert_eq!(result.failure_count, 1);
        assert_eq!(result.attempted(), 3);
        assert!(result.has_failures());
        assert!(!result.all_succeeded());
        assert_eq!(result.failed_items().next().unwrap().name, "b");
    }

    #[test]
    fn test_merge() {
        let mut total = BatchResult::new();
        let mut file = BatchResult::new();
        file.add_success("a");
        file.add_skipped("bad.saml.json", "no meta");
        total.merge(file);

        assert_eq!(total.success_count, 1);
        assert_eq!(total.skipped_count, 1);
        assert_eq!(total.attempted(), 1);
        assert_eq!(total.items.len(), 2);
    }

    #[test]
    fn test_empty_all_succeeded() {
        assert!(BatchResult::new().all_succeeded());
    }
}
