//! Typed models for every backend resource.
//!
//! Field sets mirror the backend serializers; optional fields are absent
//! rather than null in most responses, so everything optional defaults.

use serde::{Deserialize, Serialize};
use voltsite_api::ResourceKind;

use super::Content;

/// Company profile (singleton).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    /// Unique identifier.
    pub id: u64,
    /// Company name.
    pub name: String,
    /// Marketing tagline.
    pub tagline: String,
    /// Long-form description.
    pub description: String,
    /// Total installed capacity in megawatts.
    pub total_capacity_mw: u32,
    /// Generation technology headline.
    pub technology: String,
    /// Joint-venture partnership ratio, e.g. `50:50`.
    pub partnership_ratio: String,
}

impl Content for CompanyInfo {
    const KIND: ResourceKind = ResourceKind::Company;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Lifecycle status of a power project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Generating power.
    Operational,
    /// Under construction.
    Construction,
    /// Planned, not yet started.
    Planning,
}

/// A power-generation project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier.
    pub id: u64,
    /// Project name.
    pub name: String,
    /// Unique slug used for detail lookups.
    pub slug: String,
    /// Site location.
    pub location: String,
    /// Installed capacity in megawatts.
    pub capacity_mw: f64,
    /// Generation technology.
    pub technology: String,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Long-form description.
    pub description: String,
    /// Hero image path (resolve with the client's media URL helper).
    #[serde(default)]
    pub hero_image: String,
    /// Site latitude, when mapped.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Site longitude, when mapped.
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Plant efficiency percentage, when published.
    #[serde(default)]
    pub efficiency_percent: Option<f64>,
}

impl Content for Project {
    const KIND: ResourceKind = ResourceKind::Project;

    fn id(&self) -> u64 {
        self.id
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

/// A member of the board of directors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Director {
    /// Unique identifier.
    pub id: u64,
    /// Full name.
    pub name: String,
    /// Board title.
    pub title: String,
    /// Nominating organization.
    pub organization: String,
    /// Photo path.
    #[serde(default)]
    pub photo: String,
    /// Biography.
    pub bio: String,
    /// Whether this director chairs the board.
    #[serde(default)]
    pub is_chairman: bool,
    /// Display ordering.
    #[serde(default)]
    pub order: i32,
}

impl Content for Director {
    const KIND: ResourceKind = ResourceKind::Director;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Editorial category of a news article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsCategory {
    /// Press release.
    Press,
    /// Company event.
    Event,
    /// External coverage.
    InTheNews,
    /// Operational update.
    Update,
}

/// A news article or press release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    /// Unique identifier.
    pub id: u64,
    /// Headline.
    pub title: String,
    /// Unique slug used for detail lookups.
    pub slug: String,
    /// Editorial category.
    pub category: NewsCategory,
    /// Short summary for listings.
    pub excerpt: String,
    /// Full article body.
    pub content: String,
    /// Article image path.
    #[serde(default)]
    pub image: String,
    /// Publication date (ISO 8601).
    pub published_date: String,
    /// Whether the article is surfaced on the home page.
    #[serde(default)]
    pub is_featured: bool,
}

impl Content for NewsArticle {
    const KIND: ResourceKind = ResourceKind::News;

    fn id(&self) -> u64 {
        self.id
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

/// Employment type for an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    /// Permanent full-time role.
    FullTime,
    /// Fixed-term contract.
    Contract,
}

/// An open job position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Career {
    /// Unique identifier (careers are addressed by id, not slug).
    pub id: u64,
    /// Position title.
    pub title: String,
    /// Hiring department.
    pub department: String,
    /// Work location.
    pub location: String,
    /// Employment type.
    pub employment_type: EmploymentType,
    /// Role description.
    pub description: String,
    /// Candidate requirements.
    pub requirements: String,
    /// Salary range, when published.
    #[serde(default)]
    pub salary_range: String,
    /// Application deadline (ISO 8601 date).
    pub deadline: String,
    /// Whether applications are currently accepted.
    #[serde(default)]
    pub is_active: bool,
}

impl Content for Career {
    const KIND: ResourceKind = ResourceKind::Career;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Procurement category of a tender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenderCategory {
    /// Mechanical works.
    Mechanical,
    /// Electrical works.
    Electrical,
    /// Civil works.
    Civil,
    /// IT procurement.
    It,
}

/// Lifecycle status of a tender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenderStatus {
    /// Accepting bids.
    Open,
    /// Bids under evaluation.
    Evaluation,
    /// Contract awarded.
    Awarded,
    /// Closed without award.
    Closed,
}

/// A procurement tender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tender {
    /// Unique identifier.
    pub id: u64,
    /// Public tender reference, e.g. `BIF-2026-014`.
    pub tender_id: String,
    /// Tender title.
    pub title: String,
    /// Procurement category.
    pub category: TenderCategory,
    /// Scope description.
    pub description: String,
    /// Lifecycle status.
    pub status: TenderStatus,
    /// Publication date (ISO 8601).
    pub publication_date: String,
    /// Bid deadline (ISO 8601).
    pub deadline: String,
    /// Estimated value range, when published.
    #[serde(default)]
    pub value_range: String,
    /// Tender document path.
    #[serde(default)]
    pub document: String,
}

impl Content for Tender {
    const KIND: ResourceKind = ResourceKind::Tender;

    fn id(&self) -> u64 {
        self.id
    }
}

/// A corporate social responsibility initiative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrInitiative {
    /// Unique identifier.
    pub id: u64,
    /// Initiative title.
    pub title: String,
    /// Initiative category, free-form.
    pub category: String,
    /// Description of the initiative.
    pub description: String,
    /// Headline impact metric, e.g. `1,200 households electrified`.
    #[serde(default)]
    pub impact_metric: String,
    /// Illustration image path.
    #[serde(default)]
    pub image: String,
}

impl Content for CsrInitiative {
    const KIND: ResourceKind = ResourceKind::Csr;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Category of a public notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeCategory {
    /// General announcement.
    General,
    /// Urgent announcement.
    Urgent,
    /// Tender-related notice.
    Tender,
    /// Recruitment notice.
    Recruitment,
}

/// A public notice on the notice board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    /// Unique identifier.
    pub id: u64,
    /// Notice title.
    pub title: String,
    /// Unique slug used for detail lookups.
    pub slug: String,
    /// Notice category.
    pub category: NoticeCategory,
    /// Human-readable category label from the backend.
    #[serde(default)]
    pub category_display: String,
    /// Short summary for listings.
    pub excerpt: String,
    /// Full notice body.
    pub content: String,
    /// Publication date (ISO 8601).
    pub published_date: String,
    /// Attached document path, if any.
    #[serde(default)]
    pub document: Option<String>,
    /// Display name of the attachment, if any.
    #[serde(default)]
    pub attachment_name: Option<String>,
    /// External link, if any.
    #[serde(default)]
    pub link: Option<String>,
    /// Whether the notice is surfaced on the home page.
    #[serde(default)]
    pub is_featured: bool,
    /// Creation timestamp, when exposed.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last-update timestamp, when exposed.
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Content for Notice {
    const KIND: ResourceKind = ResourceKind::Notice;

    fn id(&self) -> u64 {
        self.id
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

/// A media gallery image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Unique identifier.
    pub id: u64,
    /// Image caption.
    pub title: String,
    /// Image path.
    pub image: String,
    /// Gallery section, free-form.
    #[serde(default)]
    pub category: String,
    /// Display ordering.
    #[serde(default)]
    pub order: i32,
}

impl Content for GalleryImage {
    const KIND: ResourceKind = ResourceKind::Gallery;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Site-wide settings (singleton).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    /// Unique identifier.
    pub id: u64,
    /// Site display name.
    pub site_name: String,
    /// Public contact email.
    #[serde(default)]
    pub contact_email: String,
    /// Public contact phone.
    #[serde(default)]
    pub contact_phone: String,
    /// Registered office address.
    #[serde(default)]
    pub address: String,
    /// Whether the public site shows a maintenance banner.
    #[serde(default)]
    pub maintenance_mode: bool,
}

impl Content for SiteSettings {
    const KIND: ResourceKind = ResourceKind::Settings;

    fn id(&self) -> u64 {
        self.id
    }
}
