//! Enumeration domains exposed to callers, and symbolic resolution.
//!
//! Every domain knows two spellings per variant: the constant `name()` that
//! symbolic resolution matches against, and the `token()` the remote API
//! expects on the wire. For most domains the two coincide; news categories
//! carry an `rt_` wire prefix the constant names drop.
//!
//! [`EnumDomain::resolve`] accepts the natural lower-underscored form of a
//! symbol ("size_small") or its fully upper-cased form ("PDF"); anything
//! else is an [`SearchError::InvalidEnumValue`] naming the domain.

use crate::error::{Result, SearchError};
use crate::naming::camel_case;

pub trait EnumDomain: Sized + Copy + 'static {
    /// Human-readable domain name used in error messages.
    const DOMAIN: &'static str;
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    /// Constant name matched during symbolic resolution.
    fn name(&self) -> &'static str;

    /// Literal the remote API expects.
    fn token(&self) -> &'static str {
        self.name()
    }

    /// Resolve a symbolic value: camel-cased form first, then upper-cased.
    ///
    /// ```
    /// use lookout_search::enums::{Adult, EnumDomain, FileType};
    ///
    /// assert_eq!(Adult::resolve("strict").unwrap(), Adult::Strict);
    /// assert_eq!(FileType::resolve("pdf").unwrap(), FileType::Pdf);
    /// assert!(Adult::resolve("blocked").is_err());
    /// ```
    fn resolve(symbol: &str) -> Result<Self> {
        let camel = camel_case(symbol);
        let upper = symbol.to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.name() == camel)
            .or_else(|| Self::ALL.iter().copied().find(|v| v.name() == upper))
            .ok_or_else(|| SearchError::InvalidEnumValue {
                domain: Self::DOMAIN,
                symbol: symbol.to_string(),
            })
    }

    /// Resolve a list element-wise, order preserved. The first bad symbol
    /// aborts the whole list.
    fn resolve_list<'a, I>(symbols: I) -> Result<Vec<Self>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        symbols.into_iter().map(Self::resolve).collect()
    }
}

/// Adult-content filtering level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adult {
    Off,
    Moderate,
    Strict,
}

impl EnumDomain for Adult {
    const DOMAIN: &'static str = "adult";
    const ALL: &'static [Self] = &[Self::Off, Self::Moderate, Self::Strict];

    fn name(&self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Moderate => "Moderate",
            Self::Strict => "Strict",
        }
    }
}

/// Document file types accepted by the web `WebFileType` restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Doc,
    Docx,
    Dwf,
    Feed,
    Htm,
    Html,
    Pdf,
    Ppt,
    Rtf,
    Text,
    Txt,
}

impl EnumDomain for FileType {
    const DOMAIN: &'static str = "file type";
    const ALL: &'static [Self] = &[
        Self::Doc,
        Self::Docx,
        Self::Dwf,
        Self::Feed,
        Self::Htm,
        Self::Html,
        Self::Pdf,
        Self::Ppt,
        Self::Rtf,
        Self::Text,
        Self::Txt,
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::Doc => "DOC",
            Self::Docx => "DOCX",
            Self::Dwf => "DWF",
            Self::Feed => "FEED",
            Self::Htm => "HTM",
            Self::Html => "HTML",
            Self::Pdf => "PDF",
            Self::Ppt => "PPT",
            Self::Rtf => "RTF",
            Self::Text => "TEXT",
            Self::Txt => "TXT",
        }
    }
}

/// Composable image filter tokens (`ImageFilters`). Minimum width/height
/// constraints are synthesized separately by the parameter builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFilter {
    SizeSmall,
    SizeMedium,
    SizeLarge,
    AspectSquare,
    AspectWide,
    AspectTall,
    ColorColor,
    ColorMonochrome,
    StylePhoto,
    StyleGraphics,
    FaceFace,
    FacePortrait,
    FaceOther,
}

impl EnumDomain for ImageFilter {
    const DOMAIN: &'static str = "image filter";
    const ALL: &'static [Self] = &[
        Self::SizeSmall,
        Self::SizeMedium,
        Self::SizeLarge,
        Self::AspectSquare,
        Self::AspectWide,
        Self::AspectTall,
        Self::ColorColor,
        Self::ColorMonochrome,
        Self::StylePhoto,
        Self::StyleGraphics,
        Self::FaceFace,
        Self::FacePortrait,
        Self::FaceOther,
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::SizeSmall => "SizeSmall",
            Self::SizeMedium => "SizeMedium",
            Self::SizeLarge => "SizeLarge",
            Self::AspectSquare => "AspectSquare",
            Self::AspectWide => "AspectWide",
            Self::AspectTall => "AspectTall",
            Self::ColorColor => "ColorColor",
            Self::ColorMonochrome => "ColorMonochrome",
            Self::StylePhoto => "StylePhoto",
            Self::StyleGraphics => "StyleGraphics",
            Self::FaceFace => "FaceFace",
            Self::FacePortrait => "FacePortrait",
            Self::FaceOther => "FaceOther",
        }
    }

    fn token(&self) -> &'static str {
        match self {
            Self::SizeSmall => "Size:Small",
            Self::SizeMedium => "Size:Medium",
            Self::SizeLarge => "Size:Large",
            Self::AspectSquare => "Aspect:Square",
            Self::AspectWide => "Aspect:Wide",
            Self::AspectTall => "Aspect:Tall",
            Self::ColorColor => "Color:Color",
            Self::ColorMonochrome => "Color:Monochrome",
            Self::StylePhoto => "Style:Photo",
            Self::StyleGraphics => "Style:Graphics",
            Self::FaceFace => "Face:Face",
            Self::FacePortrait => "Face:Portrait",
            Self::FaceOther => "Face:Other",
        }
    }
}

/// Composable video filter tokens (`VideoFilters`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoFilter {
    DurationShort,
    DurationMedium,
    DurationLong,
    AspectStandard,
    AspectWidescreen,
    ResolutionLow,
    ResolutionMedium,
    ResolutionHigh,
}

impl EnumDomain for VideoFilter {
    const DOMAIN: &'static str = "video filter";
    const ALL: &'static [Self] = &[
        Self::DurationShort,
        Self::DurationMedium,
        Self::DurationLong,
        Self::AspectStandard,
        Self::AspectWidescreen,
        Self::ResolutionLow,
        Self::ResolutionMedium,
        Self::ResolutionHigh,
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::DurationShort => "DurationShort",
            Self::DurationMedium => "DurationMedium",
            Self::DurationLong => "DurationLong",
            Self::AspectStandard => "AspectStandard",
            Self::AspectWidescreen => "AspectWidescreen",
            Self::ResolutionLow => "ResolutionLow",
            Self::ResolutionMedium => "ResolutionMedium",
            Self::ResolutionHigh => "ResolutionHigh",
        }
    }

    fn token(&self) -> &'static str {
        match self {
            Self::DurationShort => "Duration:Short",
            Self::DurationMedium => "Duration:Medium",
            Self::DurationLong => "Duration:Long",
            Self::AspectStandard => "Aspect:Standard",
            Self::AspectWidescreen => "Aspect:Widescreen",
            Self::ResolutionLow => "Resolution:Low",
            Self::ResolutionMedium => "Resolution:Medium",
            Self::ResolutionHigh => "Resolution:High",
        }
    }
}

/// Sort key shared by the video and news operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Date,
    Relevance,
}

impl EnumDomain for SortOrder {
    const DOMAIN: &'static str = "sort order";
    const ALL: &'static [Self] = &[Self::Date, Self::Relevance];

    fn name(&self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Relevance => "Relevance",
        }
    }
}

/// News vertical categories. Wire tokens carry the service's `rt_` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsCategory {
    Business,
    Entertainment,
    Health,
    Politics,
    ScienceAndTechnology,
    Sports,
    Us,
    World,
}

impl EnumDomain for NewsCategory {
    const DOMAIN: &'static str = "news category";
    const ALL: &'static [Self] = &[
        Self::Business,
        Self::Entertainment,
        Self::Health,
        Self::Politics,
        Self::ScienceAndTechnology,
        Self::Sports,
        Self::Us,
        Self::World,
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::Business => "Business",
            Self::Entertainment => "Entertainment",
            Self::Health => "Health",
            Self::Politics => "Politics",
            Self::ScienceAndTechnology => "ScienceAndTechnology",
            Self::Sports => "Sports",
            // Only reachable through the upper-cased fallback ("us" camel-cases to "Us").
            Self::Us => "US",
            Self::World => "World",
        }
    }

    fn token(&self) -> &'static str {
        match self {
            Self::Business => "rt_Business",
            Self::Entertainment => "rt_Entertainment",
            Self::Health => "rt_Health",
            Self::Politics => "rt_Politics",
            Self::ScienceAndTechnology => "rt_ScienceAndTechnology",
            Self::Sports => "rt_Sports",
            Self::Us => "rt_US",
            Self::World => "rt_World",
        }
    }
}

/// Result-source selection for composite queries (`Sources`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    Web,
    Image,
    Video,
    News,
    SpellingSuggestions,
    RelatedSearch,
}

impl EnumDomain for SourceType {
    const DOMAIN: &'static str = "source type";
    const ALL: &'static [Self] = &[
        Self::Web,
        Self::Image,
        Self::Video,
        Self::News,
        Self::SpellingSuggestions,
        Self::RelatedSearch,
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::Web => "Web",
            Self::Image => "Image",
            Self::Video => "Video",
            Self::News => "News",
            Self::SpellingSuggestions => "SpellingSuggestions",
            Self::RelatedSearch => "RelatedSearch",
        }
    }

    fn token(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Image => "image",
            Self::Video => "video",
            Self::News => "news",
            Self::SpellingSuggestions => "spell",
            Self::RelatedSearch => "relatedsearch",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_symbolic_forms_resolve_to_the_same_literal() {
        for domain_pairs in [
            ("strict", "STRICT"),
            ("moderate", "MODERATE"),
            ("off", "OFF"),
        ] {
            let natural = Adult::resolve(domain_pairs.0).unwrap();
            let upper = Adult::resolve(domain_pairs.1).unwrap();
            assert_eq!(natural.token(), upper.token());
        }
        assert_eq!(
            ImageFilter::resolve("size_small").unwrap().token(),
            ImageFilter::resolve("SIZE_SMALL").unwrap().token(),
        );
    }

    #[test]
    fn file_types_resolve_through_the_uppercase_fallback() {
        // "pdf" camel-cases to "Pdf", which is not a constant name; the
        // upper-cased fallback has to find it.
        assert_eq!(FileType::resolve("pdf").unwrap().token(), "PDF");
        assert_eq!(FileType::ALL.len(), 11);
    }

    #[test]
    fn news_categories_map_to_prefixed_tokens() {
        assert_eq!(NewsCategory::resolve("business").unwrap().token(), "rt_Business");
        assert_eq!(
            NewsCategory::resolve("science_and_technology").unwrap().token(),
            "rt_ScienceAndTechnology"
        );
        assert_eq!(NewsCategory::resolve("us").unwrap().token(), "rt_US");
    }

    #[test]
    fn unknown_symbol_names_domain_and_symbol() {
        let err = VideoFilter::resolve("duration_eternal").unwrap_err();
        match err {
            SearchError::InvalidEnumValue { domain, symbol } => {
                assert_eq!(domain, "video filter");
                assert_eq!(symbol, "duration_eternal");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn list_resolution_preserves_order_and_aborts_on_first_bad_symbol() {
        let ok = ImageFilter::resolve_list(["size_small", "aspect_wide"]).unwrap();
        assert_eq!(ok, vec![ImageFilter::SizeSmall, ImageFilter::AspectWide]);

        assert!(ImageFilter::resolve_list(["size_small", "bogus"]).is_err());
    }

    #[test]
    fn composite_sources_use_lowercase_tokens() {
        assert_eq!(SourceType::resolve("spelling_suggestions").unwrap().token(), "spell");
        assert_eq!(SourceType::resolve("related_search").unwrap().token(), "relatedsearch");
    }
}
