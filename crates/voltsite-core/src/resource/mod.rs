//! Content resources exposed by the backend.

mod model;

use serde::Serialize;
use serde::de::DeserializeOwned;
use voltsite_api::ResourceKind;

pub use model::{
    Career, CompanyInfo, CsrInitiative, Director, EmploymentType, GalleryImage, NewsArticle,
    NewsCategory, Notice, NoticeCategory, Project, ProjectStatus, SiteSettings, Tender,
    TenderCategory, TenderStatus,
};

/// A typed content resource bound to its backend collection.
///
/// Detail and list representations of the same resource agree on the
/// identifying fields exposed here.
pub trait Content: DeserializeOwned + Serialize + Send + Sync + 'static {
    /// The backend collection this type lives in.
    const KIND: ResourceKind;

    /// Unique numeric identifier.
    fn id(&self) -> u64;

    /// Unique human-readable slug, for kinds addressed by slug.
    fn slug(&self) -> Option<&str> {
        None
    }
}
