//! Typed result models.
//!
//! Each model mirrors one remote result variant. Fields are `Option` because
//! the service omits or blanks attributes freely; the decoder fully
//! populates a model before handing it to the caller, and models are plain
//! data from then on.

use chrono::NaiveDateTime;

/// One organic web result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebResult {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub display_url: Option<String>,
    pub url: Option<String>,
}

/// One image result, with an optional embedded thumbnail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageResult {
    pub id: Option<String>,
    pub title: Option<String>,
    pub media_url: Option<String>,
    pub source_url: Option<String>,
    pub display_url: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub file_size: Option<i64>,
    pub content_type: Option<String>,
    pub thumbnail: Option<Thumbnail>,
}

/// One video result. `run_time` is in milliseconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoResult {
    pub id: Option<String>,
    pub title: Option<String>,
    pub media_url: Option<String>,
    pub display_url: Option<String>,
    pub run_time: Option<i64>,
    pub thumbnail: Option<Thumbnail>,
}

/// One news article.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsResult {
    pub id: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub source: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDateTime>,
}

/// A query the service considers related to the submitted one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelatedSearchResult {
    pub id: Option<String>,
    pub title: Option<String>,
    pub bing_url: Option<String>,
}

/// A spelling correction for the submitted query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpellingSuggestionsResult {
    pub id: Option<String>,
    pub value: Option<String>,
}

/// Embedded thumbnail image. Remote tag `Bing.Thumbnail`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Thumbnail {
    pub media_url: Option<String>,
    pub content_type: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub file_size: Option<i64>,
}

/// Aggregate returned by the Composite operation. Remote tag
/// `ExpandableSearchResult`. One ordered sequence per sub-source plus
/// index/count and query-alteration metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositeSearchResult {
    pub id: Option<String>,

    pub web_total: Option<i64>,
    pub web_offset: Option<i64>,
    pub image_total: Option<i64>,
    pub image_offset: Option<i64>,
    pub video_total: Option<i64>,
    pub video_offset: Option<i64>,
    pub news_total: Option<i64>,
    pub news_offset: Option<i64>,
    pub spelling_suggestions_total: Option<i64>,

    pub altered_query: Option<String>,
    pub alteration_override_query: Option<String>,

    pub web: Vec<WebResult>,
    pub image: Vec<ImageResult>,
    pub video: Vec<VideoResult>,
    pub news: Vec<NewsResult>,
    pub related_search: Vec<RelatedSearchResult>,
    pub spelling_suggestions: Vec<SpellingSuggestionsResult>,
}
