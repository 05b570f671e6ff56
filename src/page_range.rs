use anyhow::{anyhow, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    pub start: PageRef,
    pub end: Option<PageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRef {
    Number(i64),
    End,
}

impl PageRange {
    /// Parse a page range specification like "3", "1-5", "9-6" or "4-end"
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow!("Empty page range"));
        }

        if let Some(dash_pos) = s.find('-') {
            // "-5" is not a range and negative pages are not accepted here
            if dash_pos == 0 {
                return Err(anyhow!("Invalid page range: {}", s));
            }

            let start = parse_page_ref(&s[..dash_pos])?;
            let end = parse_page_ref(&s[dash_pos + 1..])?;

            Ok(PageRange {
                start,
                end: Some(end),
            })
        } else {
            Ok(PageRange {
                start: parse_page_ref(s)?,
                end: None,
            })
        }
    }

    /// Expand into 1-based page numbers, resolving "end" to `total_pages`.
    ///
    /// Only pages inside the document are enumerated. An endpoint outside it
    /// is kept as a single entry so the removal step can report it.
    pub fn expand(&self, total_pages: u32) -> Vec<i64> {
        let total = i64::from(total_pages);
        let resolve = |r: &PageRef| match r {
            PageRef::Number(n) => *n,
            PageRef::End => total,
        };

        let start = resolve(&self.start);
        let end = self.end.as_ref().map(resolve).unwrap_or(start);
        let (lo, hi) = (start.min(end), start.max(end));

        let mut pages = Vec::new();
        if lo < 1 || lo > total {
            pages.push(lo);
        }
        pages.extend(lo.max(1)..=hi.min(total));
        if hi != lo && hi > total {
            pages.push(hi);
        }

        if start > end {
            pages.reverse();
        }
        pages
    }
}

fn parse_page_ref(s: &str) -> Result<PageRef> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("end") {
        Ok(PageRef::End)
    } else {
        s.parse::<u32>()
            .map(|n| PageRef::Number(i64::from(n)))
            .map_err(|_| anyhow!("Invalid page number: {}", s))
    }
}

/// Parse a comma-separated list of page ranges like "1-5,10,15-end"
pub fn parse_page_ranges(s: &str) -> Result<Vec<PageRange>> {
    s.split(',')
        .map(|part| PageRange::parse(part.trim()))
        .collect()
}

/// Expand a page range string into a list of 1-based page numbers
pub fn expand_page_ranges(s: &str, total_pages: u32) -> Result<Vec<i64>> {
    let ranges = parse_page_ranges(s)?;
    Ok(ranges
        .iter()
        .flat_map(|range| range.expand(total_pages))
        .collect())
}
