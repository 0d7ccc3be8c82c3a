//! Result of a download run.

use serde::Serialize;

/// What happened to one feed item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadOutcome {
    /// File name the episode was (or would have been) saved under.
    pub file: String,
    pub downloaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DownloadOutcome {
    pub fn success(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            downloaded: true,
            error: None,
        }
    }

    pub fn failure(file: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            downloaded: false,
            error: Some(error.into()),
        }
    }
}

/// Aggregate report, one outcome per attempted item in feed order.
///
/// `total_downloaded + total_errors == total_items == outcomes.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub total_items: usize,
    pub total_downloaded: usize,
    pub total_errors: usize,
    pub outcomes: Vec<DownloadOutcome>,
    /// True when the run was stopped between items; the counts then cover
    /// only the items attempted before the stop.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cancelled: bool,
}

impl BatchReport {
    pub(crate) fn with_capacity(items: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(items),
            ..Self::default()
        }
    }

    pub(crate) fn record(&mut self, outcome: DownloadOutcome) {
        if outcome.downloaded {
            self.total_downloaded += 1;
        } else {
            self.total_errors += 1;
        }
        self.total_items += 1;
        self.outcomes.push(outcome);
    }

    /// Outcomes that failed.
    pub fn failures(&self) -> impl Iterator<Item = &DownloadOutcome> {
        self.outcomes.iter().filter(|o| !o.downloaded)
    }

    pub fn is_complete_success(&self) -> bool {
        !self.cancelled && self.total_errors == 0
    }
}
