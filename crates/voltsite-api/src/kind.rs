//! Resource kinds exposed by the backend.

use std::fmt;

/// A backend content collection or singleton.
///
/// Every read and write names one of these; the kind determines the URL
/// path segment and how detail lookups are keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    /// Power-generation projects.
    Project,
    /// Board of directors.
    Director,
    /// News articles and press releases.
    News,
    /// Open job positions.
    Career,
    /// Procurement tenders.
    Tender,
    /// CSR initiatives.
    Csr,
    /// Public notices.
    Notice,
    /// Media gallery images.
    Gallery,
    /// Company profile (singleton).
    Company,
    /// Site-wide settings (singleton).
    Settings,
}

impl ResourceKind {
    /// URL path segment for this kind, without leading or trailing slash.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Project => "projects",
            Self::Director => "directors",
            Self::News => "news",
            Self::Career => "careers",
            Self::Tender => "tenders",
            Self::Csr => "csr",
            Self::Notice => "notices",
            Self::Gallery => "gallery",
            Self::Company => "company",
            Self::Settings => "settings",
        }
    }

    /// Whether this kind is a singleton endpoint (bare object, no list).
    #[must_use]
    pub const fn is_singleton(self) -> bool {
        matches!(self, Self::Company | Self::Settings)
    }

    /// Whether this kind exposes a `featured/` sub-collection.
    #[must_use]
    pub const fn has_featured(self) -> bool {
        matches!(self, Self::News | Self::Notice)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Key for a detail lookup.
///
/// Most kinds use a human-readable slug; careers are addressed by numeric
/// id only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lookup {
    /// Lookup by unique slug.
    Slug(String),
    /// Lookup by numeric id.
    Id(u64),
}

impl Lookup {
    /// Lookup by slug.
    #[must_use]
    pub fn slug(slug: impl Into<String>) -> Self {
        Self::Slug(slug.into())
    }

    /// Lookup by id.
    #[must_use]
    pub const fn id(id: u64) -> Self {
        Self::Id(id)
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slug(slug) => f.write_str(slug),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}
