use std::collections::BTreeSet;
use std::num::IntErrorKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageRangeError {
    #[error("Invalid range '{token}'. Must be like '5-7'.")]
    InvalidRangeFormat { token: String },

    #[error("Invalid page number '{token}'. Must be an integer.")]
    InvalidNumberFormat { token: String },

    /// Also covers reversed ranges such as "7-5".
    #[error("{} is out of range (1-{bound}).", describe(.token))]
    OutOfBounds { token: String, bound: u32 },
}

fn describe(token: &str) -> String {
    if token.contains('-') {
        format!("Page range '{}'", token)
    } else {
        format!("Page number {}", token)
    }
}

/// Ascending, duplicate-free, zero-based page indices for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSelection {
    indices: Vec<u32>,
}

impl PageSelection {
    /// Every page of a document with `bound` pages.
    pub fn all(bound: u32) -> Self {
        PageSelection {
            indices: (0..bound).collect(),
        }
    }

    #[cfg(test)]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.indices.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Page numbers as the user counts them
    pub fn one_based(&self) -> Vec<u32> {
        self.indices.iter().map(|i| i + 1).collect()
    }
}

impl FromIterator<u32> for PageSelection {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let unique: BTreeSet<u32> = iter.into_iter().collect();
        PageSelection {
            indices: unique.into_iter().collect(),
        }
    }
}

/// Parse an expression like "1,3,5-7" against a document of `bound` pages.
///
/// Page numbers in the expression are 1-based; the returned selection is
/// 0-based, sorted and deduplicated. Nothing is returned unless every token
/// is valid. An expression without any tokens yields an empty selection.
pub fn parse_page_selection(expression: &str, bound: u32) -> Result<PageSelection, PageRangeError> {
    let mut pages = BTreeSet::new();

    for token in expression.split(',').map(str::trim) {
        if token.is_empty() {
            continue;
        }

        if token.contains('-') {
            let (start, end) = parse_range(token, bound)?;
            pages.extend(start - 1..end);
        } else {
            let page = parse_page(token, bound)?;
            pages.insert(page - 1);
        }
    }

    Ok(pages.into_iter().collect())
}

fn parse_range(token: &str, bound: u32) -> Result<(u32, u32), PageRangeError> {
    let invalid = || PageRangeError::InvalidRangeFormat {
        token: token.to_string(),
    };
    let out_of_bounds = || PageRangeError::OutOfBounds {
        token: token.to_string(),
        bound,
    };

    let mut sides = token.split('-');
    let (Some(start), Some(end), None) = (sides.next(), sides.next(), sides.next()) else {
        return Err(invalid());
    };

    let start = parse_number(start).ok_or_else(invalid)?.ok_or_else(out_of_bounds)?;
    let end = parse_number(end).ok_or_else(invalid)?.ok_or_else(out_of_bounds)?;

    if start < 1 || end > bound || start > end {
        return Err(out_of_bounds());
    }

    Ok((start, end))
}

fn parse_page(token: &str, bound: u32) -> Result<u32, PageRangeError> {
    let page = parse_number(token)
        .ok_or_else(|| PageRangeError::InvalidNumberFormat {
            token: token.to_string(),
        })?
        .filter(|p| (1..=bound).contains(p));

    page.ok_or_else(|| PageRangeError::OutOfBounds {
        token: token.to_string(),
        bound,
    })
}

/// `None` when `s` is not an integer at all, `Some(None)` when it is one but
/// can never be a page number (negative or too large for `u32`).
fn parse_number(s: &str) -> Option<Option<u32>> {
    match s.trim().parse::<u32>() {
        Ok(n) => Some(Some(n)),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Some(None),
            _ => None,
        },
    }
}
