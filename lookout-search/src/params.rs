//! Outbound parameter assembly.
//!
//! A [`ParameterSet`] maps remote parameter names (case-sensitive, e.g.
//! `$top`, `WebFileType`) to formatted values. Formatting rules follow the
//! remote convention: scalar values are single-quoted, multi-valued options
//! are `+`-joined and quoted as one token, and bare literals (coordinates)
//! pass through raw. Unset options and empty lists never appear at all.

use std::collections::BTreeMap;

use crate::enums::EnumDomain;
use crate::options::{
    CommonOptions, CompositeOptions, ImageConstraints, ImageOptions, NewsConstraints, NewsOptions,
    VideoConstraints, VideoOptions, WebFilters, WebOptions,
};

/// One formatted outbound value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Single-quoted scalar: `'Strict'`.
    Quoted(String),
    /// `+`-joined list quoted as one token: `'Size:Small+Aspect:Wide'`.
    List(Vec<String>),
    /// Raw literal, emitted as-is: `47.6`.
    Raw(String),
}

impl ParamValue {
    pub fn render(&self) -> String {
        match self {
            Self::Quoted(s) => format!("'{s}'"),
            Self::List(items) => format!("'{}'", items.join("+")),
            Self::Raw(s) => s.clone(),
        }
    }
}

/// Ordered mapping from remote parameter name to formatted value.
/// Duplicate keys are impossible by construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    inner: BTreeMap<&'static str, ParamValue>,
}

impl ParameterSet {
    pub fn insert_quoted(&mut self, name: &'static str, value: impl Into<String>) {
        self.inner.insert(name, ParamValue::Quoted(value.into()));
    }

    /// Lists only appear when non-empty.
    pub fn insert_list(&mut self, name: &'static str, values: Vec<String>) {
        if !values.is_empty() {
            self.inner.insert(name, ParamValue::List(values));
        }
    }

    pub fn insert_raw(&mut self, name: &'static str, value: impl Into<String>) {
        self.inner.insert(name, ParamValue::Raw(value.into()));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.inner.get(name)
    }

    /// Rendered value for one parameter, mainly for assertions and logs.
    pub fn rendered(&self, name: &str) -> Option<String> {
        self.inner.get(name).map(ParamValue::render)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Final name/value pairs ready for URL encoding.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        self.inner
            .iter()
            .map(|(name, value)| (*name, value.render()))
            .collect()
    }
}

/// Generic parameters shared by every operation.
fn base_params(query: &str, common: &CommonOptions) -> ParameterSet {
    let mut set = ParameterSet::default();
    set.insert_quoted("Query", query);
    // The service defaults to Atom; we always want JSON back.
    set.insert_quoted("$format", "JSON");

    if let Some(limit) = common.limit {
        set.insert_quoted("$top", limit.to_string());
    }
    if let Some(offset) = common.offset {
        // Service quirk: $skip=0 and $skip=1 return the same page, so the
        // caller's zero-based offset shifts up by one on the wire. Widened
        // so the shift cannot overflow at the type's upper edge. Revisit
        // only if the remote behavior ever changes.
        set.insert_quoted("$skip", (u64::from(offset) + 1).to_string());
    }
    if let Some(adult) = common.adult {
        set.insert_quoted("Adult", adult.token());
    }
    if let Some(market) = &common.market {
        set.insert_quoted("Market", market.clone());
    }
    if let Some(lat) = common.latitude {
        set.insert_raw("Latitude", lat.to_string());
    }
    if let Some(long) = common.longitude {
        set.insert_raw("Longitude", long.to_string());
    }

    let mut flags = Vec::new();
    if common.location_detection == Some(false) {
        flags.push("DisableLocationDetection".to_string());
    }
    if common.highlighting == Some(true) {
        flags.push("EnableHighlighting".to_string());
    }
    set.insert_list("Options", flags);

    set
}

fn apply_web_filters(set: &mut ParameterSet, web: &WebFilters) {
    if let Some(file_type) = web.file_type {
        set.insert_quoted("WebFileType", file_type.token());
    }

    // Both behaviors default to enabled remotely; only an explicit `false`
    // emits the disabling flag.
    let mut flags = Vec::new();
    if web.host_collapsing == Some(false) {
        flags.push("DisableHostCollapsing".to_string());
    }
    if web.query_alterations == Some(false) {
        flags.push("DisableQueryAlterations".to_string());
    }
    set.insert_list("WebSearchOptions", flags);
}

fn apply_image_constraints(set: &mut ParameterSet, image: &ImageConstraints) {
    let mut tokens: Vec<String> = image.filters.iter().map(|f| f.token().to_string()).collect();
    if let Some(width) = image.min_width {
        tokens.push(format!("Size:Width:{width}"));
    }
    if let Some(height) = image.min_height {
        tokens.push(format!("Size:Height:{height}"));
    }
    set.insert_list("ImageFilters", tokens);
}

fn apply_video_constraints(set: &mut ParameterSet, video: &VideoConstraints) {
    let tokens: Vec<String> = video.filters.iter().map(|f| f.token().to_string()).collect();
    set.insert_list("VideoFilters", tokens);
    if let Some(sort) = video.sort {
        set.insert_quoted("VideoSortBy", sort.token());
    }
}

fn apply_news_constraints(set: &mut ParameterSet, news: &NewsConstraints) {
    if let Some(category) = news.category {
        set.insert_quoted("NewsCategory", category.token());
    }
    if let Some(sort) = news.sort {
        set.insert_quoted("NewsSortBy", sort.token());
    }
    if let Some(location) = &news.location_override {
        set.insert_quoted("NewsLocationOverride", location.clone());
    }
}

pub fn web_params(query: &str, options: &WebOptions) -> ParameterSet {
    let mut set = base_params(query, &options.common);
    apply_web_filters(&mut set, &options.web);
    set
}

pub fn image_params(query: &str, options: &ImageOptions) -> ParameterSet {
    let mut set = base_params(query, &options.common);
    apply_image_constraints(&mut set, &options.image);
    set
}

pub fn video_params(query: &str, options: &VideoOptions) -> ParameterSet {
    let mut set = base_params(query, &options.common);
    apply_video_constraints(&mut set, &options.video);
    set
}

pub fn news_params(query: &str, options: &NewsOptions) -> ParameterSet {
    let mut set = base_params(query, &options.common);
    apply_news_constraints(&mut set, &options.news);
    set
}

/// RelatedSearch and SpellingSuggestions take only the generic options.
pub fn common_params(query: &str, common: &CommonOptions) -> ParameterSet {
    base_params(query, common)
}

pub fn composite_params(query: &str, options: &CompositeOptions) -> ParameterSet {
    let mut set = base_params(query, &options.common);
    set.insert_list(
        "Sources",
        options.sources.iter().map(|s| s.token().to_string()).collect(),
    );
    apply_web_filters(&mut set, &options.web);
    apply_image_constraints(&mut set, &options.image);
    apply_video_constraints(&mut set, &options.video);
    apply_news_constraints(&mut set, &options.news);
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{Adult, FileType, ImageFilter, NewsCategory, SortOrder, SourceType, VideoFilter};

    #[test]
    fn scenario_web_search_with_limit_offset_adult() {
        let options = WebOptions {
            common: CommonOptions {
                limit: Some(10),
                offset: Some(10),
                adult: Some(Adult::Strict),
                ..Default::default()
            },
            ..Default::default()
        };
        let set = web_params("berlin", &options);
        assert_eq!(set.rendered("$top").as_deref(), Some("'10'"));
        assert_eq!(set.rendered("$skip").as_deref(), Some("'11'"));
        assert_eq!(set.rendered("Adult").as_deref(), Some("'Strict'"));
        assert_eq!(set.rendered("Query").as_deref(), Some("'berlin'"));
    }

    #[test]
    fn offset_shift_applies_to_zero_and_one() {
        for (offset, skip) in [(0, "'1'"), (1, "'2'")] {
            let options = WebOptions {
                common: CommonOptions {
                    offset: Some(offset),
                    ..Default::default()
                },
                ..Default::default()
            };
            let set = web_params("q", &options);
            assert_eq!(set.rendered("$skip").as_deref(), Some(skip));
        }
    }

    #[test]
    fn offset_shift_survives_the_maximum_offset() {
        let options = WebOptions {
            common: CommonOptions {
                offset: Some(u32::MAX),
                ..Default::default()
            },
            ..Default::default()
        };
        let set = web_params("q", &options);
        assert_eq!(set.rendered("$skip").as_deref(), Some("'4294967296'"));
    }

    #[test]
    fn absent_offset_is_omitted_entirely() {
        let set = web_params("q", &WebOptions::default());
        assert!(!set.contains("$skip"));
        assert!(!set.contains("$top"));
    }

    #[test]
    fn value_formatting_rules() {
        assert_eq!(ParamValue::Quoted("abc".into()).render(), "'abc'");
        assert_eq!(
            ParamValue::List(vec!["A:B".into(), "C:D".into()]).render(),
            "'A:B+C:D'"
        );
        assert_eq!(ParamValue::Raw("47.6".into()).render(), "47.6");
    }

    #[test]
    fn empty_list_is_dropped() {
        let mut set = ParameterSet::default();
        set.insert_list("Options", Vec::new());
        assert!(set.is_empty());
    }

    #[test]
    fn behavior_flags_only_appear_when_explicit() {
        let mut common = CommonOptions::default();
        let set = common_params("q", &common);
        assert!(!set.contains("Options"));

        common.location_detection = Some(false);
        common.highlighting = Some(true);
        let set = common_params("q", &common);
        assert_eq!(
            set.rendered("Options").as_deref(),
            Some("'DisableLocationDetection+EnableHighlighting'")
        );

        // Explicit true / default means no flag at all.
        common.location_detection = Some(true);
        common.highlighting = None;
        let set = common_params("q", &common);
        assert!(!set.contains("Options"));
    }

    #[test]
    fn web_search_options_emit_disable_flags() {
        let options = WebOptions {
            web: WebFilters {
                file_type: Some(FileType::Pdf),
                host_collapsing: Some(false),
                query_alterations: Some(false),
            },
            ..Default::default()
        };
        let set = web_params("q", &options);
        assert_eq!(set.rendered("WebFileType").as_deref(), Some("'PDF'"));
        assert_eq!(
            set.rendered("WebSearchOptions").as_deref(),
            Some("'DisableHostCollapsing+DisableQueryAlterations'")
        );
    }

    #[test]
    fn image_filters_merge_tokens_and_dimension_synthesis() {
        let options = ImageOptions {
            image: ImageConstraints {
                filters: vec![ImageFilter::SizeSmall, ImageFilter::AspectWide],
                min_width: Some(200),
                min_height: Some(100),
            },
            ..Default::default()
        };
        let set = image_params("q", &options);
        assert_eq!(
            set.rendered("ImageFilters").as_deref(),
            Some("'Size:Small+Aspect:Wide+Size:Width:200+Size:Height:100'")
        );
    }

    #[test]
    fn video_and_news_params() {
        let video = VideoOptions {
            video: VideoConstraints {
                filters: vec![VideoFilter::DurationShort, VideoFilter::ResolutionHigh],
                sort: Some(SortOrder::Date),
            },
            ..Default::default()
        };
        let set = video_params("q", &video);
        assert_eq!(
            set.rendered("VideoFilters").as_deref(),
            Some("'Duration:Short+Resolution:High'")
        );
        assert_eq!(set.rendered("VideoSortBy").as_deref(), Some("'Date'"));

        let news = NewsOptions {
            news: NewsConstraints {
                category: Some(NewsCategory::ScienceAndTechnology),
                sort: Some(SortOrder::Relevance),
                location_override: Some("US.WA".into()),
            },
            ..Default::default()
        };
        let set = news_params("q", &news);
        assert_eq!(
            set.rendered("NewsCategory").as_deref(),
            Some("'rt_ScienceAndTechnology'")
        );
        assert_eq!(set.rendered("NewsSortBy").as_deref(), Some("'Relevance'"));
        assert_eq!(set.rendered("NewsLocationOverride").as_deref(), Some("'US.WA'"));
    }

    #[test]
    fn composite_merges_all_source_constraints() {
        let options = CompositeOptions {
            sources: vec![SourceType::Web, SourceType::Image, SourceType::SpellingSuggestions],
            web: WebFilters {
                file_type: Some(FileType::Pdf),
                ..Default::default()
            },
            image: ImageConstraints {
                filters: vec![ImageFilter::StylePhoto],
                ..Default::default()
            },
            ..Default::default()
        };
        let set = composite_params("q", &options);
        assert_eq!(set.rendered("Sources").as_deref(), Some("'web+image+spell'"));
        assert_eq!(set.rendered("WebFileType").as_deref(), Some("'PDF'"));
        assert_eq!(set.rendered("ImageFilters").as_deref(), Some("'Style:Photo'"));
    }

    #[test]
    fn coordinates_pass_through_raw() {
        let common = CommonOptions {
            latitude: Some(47.603),
            longitude: Some(-122.329),
            market: Some("en-US".into()),
            ..Default::default()
        };
        let set = common_params("q", &common);
        assert_eq!(set.rendered("Latitude").as_deref(), Some("47.603"));
        assert_eq!(set.rendered("Longitude").as_deref(), Some("-122.329"));
        assert_eq!(set.rendered("Market").as_deref(), Some("'en-US'"));
    }
}
