//! Record types for extracted page data
//!
//! A [`WorkItem`] pairs a URL with the page schema expected at that URL.
//! Extraction produces a [`Record`] whose fields are always populated:
//! any field the page did not provide carries the [`SENTINEL`] value.

use serde::Deserialize;
use std::fmt;
use url::Url;

/// Placeholder substituted for any field extraction could not find
pub const SENTINEL: &str = "N/A";

/// The schema a page is expected to follow
///
/// Dispatch on the kind is exhaustive: adding a new kind is a
/// compile-time-checked extension point, not a new string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    /// A personal profile page
    Profile,

    /// A company/organization page
    Company,
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageKind::Profile => write!(f, "profile"),
            PageKind::Company => write!(f, "company"),
        }
    }
}

/// One unit of scrape work: a URL plus its expected page schema
///
/// Work items are immutable and supplied upfront as an ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub url: Url,
    pub kind: PageKind,
}

impl WorkItem {
    pub fn new(url: Url, kind: PageKind) -> Self {
        Self { url, kind }
    }
}

/// Fields extracted from a profile page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub name: String,
    pub job_title: String,
    pub location: String,
    pub summary: String,
}

/// Fields extracted from a company page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRecord {
    pub company_name: String,
    pub industry: String,
    pub headquarters: String,
    pub about: String,
}

/// An extracted record, tagged by the page kind it came from
///
/// Field order is fixed per kind and shared between [`Record::field_names`]
/// (the CSV header) and [`Record::field_values`] (one CSV row).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Profile(ProfileRecord),
    Company(CompanyRecord),
}

impl Record {
    /// Returns the page kind this record was extracted from
    pub fn kind(&self) -> PageKind {
        match self {
            Record::Profile(_) => PageKind::Profile,
            Record::Company(_) => PageKind::Company,
        }
    }

    /// Returns the declared field names for this record's schema
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            Record::Profile(_) => &["Name", "JobTitle", "Location", "Summary"],
            Record::Company(_) => &["CompanyName", "Industry", "Headquarters", "About"],
        }
    }

    /// Returns this record's field values, in `field_names` order
    pub fn field_values(&self) -> Vec<&str> {
        match self {
            Record::Profile(r) => vec![&r.name, &r.job_title, &r.location, &r.summary],
            Record::Company(r) => vec![&r.company_name, &r.industry, &r.headquarters, &r.about],
        }
    }

    /// Returns true if every field holds the sentinel value
    ///
    /// A fully-sentinel record usually means the page structure no longer
    /// matches the selectors; the pipeline logs it as a hint but still
    /// counts the item as completed.
    pub fn is_all_sentinel(&self) -> bool {
        self.field_values().iter().all(|v| *v == SENTINEL)
    }
}
