//! Typed per-operation option records.
//!
//! The remote protocol treats options as an open bag; here every recognized
//! option is a named, typed field, so an unrecognized option simply cannot
//! be expressed. All records default to "nothing requested" and omit every
//! unset field from the outbound parameter set.

use crate::enums::{Adult, FileType, ImageFilter, NewsCategory, SortOrder, SourceType, VideoFilter};

/// Options shared by every operation.
///
/// ```
/// use lookout_search::options::CommonOptions;
/// use lookout_search::enums::Adult;
///
/// let opts = CommonOptions {
///     limit: Some(10),
///     adult: Some(Adult::Strict),
///     ..Default::default()
/// };
/// assert!(opts.offset.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommonOptions {
    /// Maximum number of results (`$top`).
    pub limit: Option<u32>,
    /// Zero-based result offset (`$skip`, shifted by the service quirk).
    pub offset: Option<u32>,
    /// Adult-content filtering level.
    pub adult: Option<Adult>,
    /// Market, e.g. "en-US".
    pub market: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// `Some(false)` sends the `DisableLocationDetection` flag.
    pub location_detection: Option<bool>,
    /// `Some(true)` sends the `EnableHighlighting` flag.
    pub highlighting: Option<bool>,
}

/// Web-vertical restrictions, shared by the Web and Composite operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebFilters {
    pub file_type: Option<FileType>,
    /// `Some(false)` sends `DisableHostCollapsing`; defaults to on remotely.
    pub host_collapsing: Option<bool>,
    /// `Some(false)` sends `DisableQueryAlterations`; defaults to on remotely.
    pub query_alterations: Option<bool>,
}

/// Image-vertical restrictions, shared by the Image and Composite operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageConstraints {
    pub filters: Vec<ImageFilter>,
    /// Synthesized into a `Size:Width:<n>` filter token.
    pub min_width: Option<u32>,
    /// Synthesized into a `Size:Height:<n>` filter token.
    pub min_height: Option<u32>,
}

/// Video-vertical restrictions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoConstraints {
    pub filters: Vec<VideoFilter>,
    pub sort: Option<SortOrder>,
}

/// News-vertical restrictions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsConstraints {
    pub category: Option<NewsCategory>,
    pub sort: Option<SortOrder>,
    /// Free-form location override passed through verbatim.
    pub location_override: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebOptions {
    pub common: CommonOptions,
    pub web: WebFilters,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageOptions {
    pub common: CommonOptions,
    pub image: ImageConstraints,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoOptions {
    pub common: CommonOptions,
    pub video: VideoConstraints,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsOptions {
    pub common: CommonOptions,
    pub news: NewsConstraints,
}

/// One request spanning several result sources, returned as one aggregate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositeOptions {
    pub common: CommonOptions,
    /// Which sources to span; empty means the service default.
    pub sources: Vec<SourceType>,
    pub web: WebFilters,
    pub image: ImageConstraints,
    pub video: VideoConstraints,
    pub news: NewsConstraints,
}
