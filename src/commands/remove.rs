use crate::page_range::expand_page_ranges;
use crate::pdf::removal::{remove_from_document, DuplicatePolicy};
use crate::pdf::PdfDocument;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P, pages: &str, policy: DuplicatePolicy) -> Result<()> {
    let path = path.as_ref();

    // "end" needs the page count, so the ranges are expanded against the
    // document that is then edited
    let mut doc = PdfDocument::open(path)?;
    let page_numbers = expand_page_ranges(pages, doc.page_count())?;

    let outcome = remove_from_document(&mut doc, &page_numbers, policy)?;
    println!("{}", outcome.message());
    println!(
        "{}: {} -> {} pages",
        path.display(),
        outcome.page_count_before,
        outcome.page_count_after
    );

    Ok(())
}
