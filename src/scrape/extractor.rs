//! Per-kind field extraction via CSS selectors
//!
//! Each page kind maps a fixed set of structural selectors to record
//! fields. The first matching node's trimmed text fills the field;
//! a missing node or empty text yields the [`SENTINEL`] instead, so
//! extraction never fails merely because a field is absent. It fails
//! only when the body is no document at all.

use crate::records::{CompanyRecord, PageKind, ProfileRecord, Record, SENTINEL};
use scraper::{Html, Selector};
use thiserror::Error;

/// Errors from the extraction boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The body was empty or whitespace-only
    ///
    /// The HTML5 parser recovers from any non-empty input, so an empty
    /// body is the one malformed-input signal available.
    #[error("empty document")]
    EmptyDocument,
}

/// Extracts a typed record from a page body
///
/// Pure function of its input: no network, no I/O. Dispatch on `kind`
/// is exhaustive.
///
/// # Arguments
///
/// * `kind` - The page schema to apply
/// * `body` - The raw HTML body
///
/// # Returns
///
/// * `Ok(Record)` - A record with every field populated (text or sentinel)
/// * `Err(ExtractError)` - The body could not be parsed as a document
pub fn extract(kind: PageKind, body: &str) -> Result<Record, ExtractError> {
    if body.trim().is_empty() {
        return Err(ExtractError::EmptyDocument);
    }

    let document = Html::parse_document(body);

    let record = match kind {
        PageKind::Profile => Record::Profile(ProfileRecord {
            name: first_text(&document, "h1.text-heading-xlarge"),
            job_title: first_text(&document, "div.text-body-medium"),
            location: first_text(&document, "span.text-body-small"),
            summary: first_text(&document, "#about"),
        }),
        PageKind::Company => Record::Company(CompanyRecord {
            company_name: first_text(&document, "h1.org-top-card-summary__title"),
            industry: first_text(&document, "div.org-top-card-summary__industry"),
            headquarters: first_text(&document, "div.org-top-card-summary__headquarter"),
            about: first_text(&document, "section.org-about-us-organization-description"),
        }),
    };

    Ok(record)
}

/// Returns the first matching node's trimmed text, or the sentinel
///
/// The selector strings are fixed literals; a selector that fails to
/// parse behaves like a selector that matches nothing.
fn first_text(document: &Html, css: &str) -> String {
    Selector::parse(css)
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .map(|element| element.text().collect::<String>().trim().to_string())
        })
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| SENTINEL.to_string())
}
