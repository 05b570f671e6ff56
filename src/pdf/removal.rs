//! Page removal pipeline: load, validate, order, delete, persist.

use crate::error::{Error, Result};
use crate::pdf::PdfDocument;
use clap::ValueEnum;
use std::collections::HashSet;
use std::path::PathBuf;

/// The mutation surface the removal pipeline needs from a document
pub trait PageStore {
    fn page_count(&self) -> u32;

    /// Remove the page at a zero-based index
    fn delete_page(&mut self, index: u32) -> Result<()>;
}

/// How repeated page numbers in one request are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DuplicatePolicy {
    /// Each distinct page is removed once
    #[default]
    Collapse,
    /// Every occurrence triggers a deletion at that index, whatever page
    /// occupies it by then
    Repeat,
}

#[derive(Debug, Clone)]
pub struct RemovalRequest {
    pub pdf_path: PathBuf,
    /// 1-based, unordered, may repeat
    pub page_numbers: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid { invalid: Vec<i64>, page_count: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalOutcome {
    pub pages_removed: u32,
    pub page_count_before: u32,
    pub page_count_after: u32,
}

impl RemovalOutcome {
    pub fn message(&self) -> String {
        format!(
            "Successfully removed {} pages from the PDF.",
            self.pages_removed
        )
    }
}

/// Check every page number against `1..=page_count`.
///
/// Each offending number is listed once, in the order it first appears.
pub fn validate(page_numbers: &[i64], page_count: u32) -> ValidationResult {
    let mut seen = HashSet::new();
    let invalid: Vec<i64> = page_numbers
        .iter()
        .copied()
        .filter(|&n| n < 1 || n > i64::from(page_count))
        .filter(|&n| seen.insert(n))
        .collect();

    if invalid.is_empty() {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid {
            invalid,
            page_count,
        }
    }
}

/// Turn validated page numbers into the zero-based indices to delete, highest
/// first. Deleting a page shifts every later page down by one, so going from
/// the back keeps each remaining target at its original index.
pub fn plan_deletions(
    page_numbers: &[i64],
    page_count: u32,
    policy: DuplicatePolicy,
) -> Result<Vec<u32>> {
    if let ValidationResult::Invalid {
        invalid,
        page_count,
    } = validate(page_numbers, page_count)
    {
        return Err(Error::InvalidPages {
            invalid,
            page_count,
        });
    }

    // In range after validation, so the narrowing is lossless
    let mut indices: Vec<u32> = page_numbers.iter().map(|&n| (n - 1) as u32).collect();
    indices.sort_unstable_by(|a, b| b.cmp(a));
    if policy == DuplicatePolicy::Collapse {
        indices.dedup();
    }
    Ok(indices)
}

/// Validate, order and apply deletions to an already loaded document.
///
/// Returns the number of deletions performed. Nothing is deleted when
/// validation fails.
pub fn apply_removal<S: PageStore>(
    store: &mut S,
    page_numbers: &[i64],
    policy: DuplicatePolicy,
) -> Result<u32> {
    let plan = plan_deletions(page_numbers, store.page_count(), policy)?;
    for &index in &plan {
        store.delete_page(index)?;
    }
    Ok(plan.len() as u32)
}

/// Remove pages from the PDF at `request.pdf_path` and write it back in place
pub fn remove_pages(request: &RemovalRequest, policy: DuplicatePolicy) -> Result<RemovalOutcome> {
    let mut doc = PdfDocument::open(&request.pdf_path)?;
    remove_from_document(&mut doc, &request.page_numbers, policy)
}

/// Same as [`remove_pages`] for a document the caller already loaded.
///
/// The document is saved back to its own path only if a page was deleted.
pub fn remove_from_document(
    doc: &mut PdfDocument,
    page_numbers: &[i64],
    policy: DuplicatePolicy,
) -> Result<RemovalOutcome> {
    let page_count_before = doc.page_count();

    let pages_removed = apply_removal(doc, page_numbers, policy)?;

    if pages_removed > 0 {
        doc.save()?;
    }

    let page_count_after = doc.page_count();
    tracing::debug!(
        path = %doc.path.display(),
        page_count_before,
        page_count_after,
        "removed pages"
    );

    Ok(RemovalOutcome {
        pages_removed,
        page_count_before,
        page_count_after,
    })
}
