//! Response decoding: envelope unwrapping, tag-driven model dispatch, and
//! field coercion.
//!
//! Every JSON result object carries a `__metadata.type` tag naming its
//! variant. The registry in [`decode_model`] is the complete set of tags we
//! understand; a tag outside it, or a field a variant does not declare, is
//! protocol drift and fails loudly instead of being dropped.
//!
//! The service serialises everything as strings, so each variant declares
//! which of its attributes coerce to integers or datetimes; an empty string
//! coerces to `None` for both kinds.

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

use crate::error::{Result, SearchError};
use crate::models::{
    CompositeSearchResult, ImageResult, NewsResult, RelatedSearchResult, SpellingSuggestionsResult,
    Thumbnail, VideoResult, WebResult,
};
use crate::naming::snake_case;

/// Key of the metadata tag embedded in each result object.
pub const METADATA_KEY: &str = "__metadata";

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// A decoded result object of any known variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Model {
    Web(WebResult),
    Image(ImageResult),
    Video(VideoResult),
    News(NewsResult),
    RelatedSearch(RelatedSearchResult),
    SpellingSuggestions(SpellingSuggestionsResult),
    Composite(Box<CompositeSearchResult>),
    Thumbnail(Thumbnail),
}

impl Model {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Web(_) => "WebResult",
            Self::Image(_) => "ImageResult",
            Self::Video(_) => "VideoResult",
            Self::News(_) => "NewsResult",
            Self::RelatedSearch(_) => "RelatedSearchResult",
            Self::SpellingSuggestions(_) => "SpellingSuggestionsResult",
            Self::Composite(_) => "CompositeSearchResult",
            Self::Thumbnail(_) => "Thumbnail",
        }
    }
}

/// Parse a response body and unwrap the `d.results` envelope.
pub fn envelope_results(body: &[u8]) -> Result<Value> {
    let parsed: Value = serde_json::from_slice(body)
        .map_err(|e| SearchError::MalformedResponse(format!("body is not JSON: {e}")))?;
    parsed
        .get("d")
        .and_then(|d| d.get("results"))
        .cloned()
        .ok_or_else(|| SearchError::MalformedResponse("missing d.results envelope".into()))
}

/// Decode one tagged result object through the model registry.
pub fn decode_model(value: &Value) -> Result<Model> {
    let obj = value
        .as_object()
        .ok_or_else(|| SearchError::MalformedResponse("expected a result object".into()))?;
    let tag = model_tag(obj)
        .ok_or_else(|| SearchError::MalformedResponse("result object has no type tag".into()))?;
    match tag {
        "WebResult" => Ok(Model::Web(decode_web(obj)?)),
        "ImageResult" => Ok(Model::Image(decode_image(obj)?)),
        "VideoResult" => Ok(Model::Video(decode_video(obj)?)),
        "NewsResult" => Ok(Model::News(decode_news(obj)?)),
        "RelatedSearchResult" => Ok(Model::RelatedSearch(decode_related_search(obj)?)),
        "SpellingSuggestionsResult" => {
            Ok(Model::SpellingSuggestions(decode_spelling_suggestions(obj)?))
        }
        // These two deserialize to local names that differ from their tag.
        "ExpandableSearchResult" => Ok(Model::Composite(Box::new(decode_composite(obj)?))),
        "Bing.Thumbnail" => Ok(Model::Thumbnail(decode_thumbnail(obj)?)),
        other => Err(SearchError::UnknownModelType(other.to_string())),
    }
}

/// Decode a `d.results` payload that must be an array, element-wise.
pub fn decode_results<T>(payload: &Value, decode_one: impl Fn(&Value) -> Result<T>) -> Result<Vec<T>> {
    match payload {
        Value::Array(items) => items.iter().map(&decode_one).collect(),
        other => Err(SearchError::MalformedResponse(format!(
            "expected an array of results, got {}",
            json_kind(other)
        ))),
    }
}

pub fn expect_web(value: &Value) -> Result<WebResult> {
    match decode_model(value)? {
        Model::Web(m) => Ok(m),
        other => Err(unexpected("WebResult", &other)),
    }
}

pub fn expect_image(value: &Value) -> Result<ImageResult> {
    match decode_model(value)? {
        Model::Image(m) => Ok(m),
        other => Err(unexpected("ImageResult", &other)),
    }
}

pub fn expect_video(value: &Value) -> Result<VideoResult> {
    match decode_model(value)? {
        Model::Video(m) => Ok(m),
        other => Err(unexpected("VideoResult", &other)),
    }
}

pub fn expect_news(value: &Value) -> Result<NewsResult> {
    match decode_model(value)? {
        Model::News(m) => Ok(m),
        other => Err(unexpected("NewsResult", &other)),
    }
}

pub fn expect_related_search(value: &Value) -> Result<RelatedSearchResult> {
    match decode_model(value)? {
        Model::RelatedSearch(m) => Ok(m),
        other => Err(unexpected("RelatedSearchResult", &other)),
    }
}

pub fn expect_spelling_suggestions(value: &Value) -> Result<SpellingSuggestionsResult> {
    match decode_model(value)? {
        Model::SpellingSuggestions(m) => Ok(m),
        other => Err(unexpected("SpellingSuggestionsResult", &other)),
    }
}

fn unexpected(wanted: &str, found: &Model) -> SearchError {
    SearchError::MalformedResponse(format!("expected {wanted}, found {}", found.kind()))
}

fn model_tag(obj: &Map<String, Value>) -> Option<&str> {
    obj.get(METADATA_KEY)?.as_object()?.get("type")?.as_str()
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ==============================
// Field coercions
// ==============================

/// Passthrough text. Scalars other than strings stringify; structured
/// values here mean the field table is out of date.
fn text(v: &Value) -> Result<Option<String>> {
    match v {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(SearchError::MalformedResponse(format!(
            "expected text, got {}",
            json_kind(other)
        ))),
    }
}

fn integer(v: &Value) -> Result<Option<i64>> {
    match v {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => s.parse::<i64>().map(Some).map_err(|_| {
            SearchError::MalformedResponse(format!("expected integer, got {s:?}"))
        }),
        Value::Number(n) => n.as_i64().map(Some).ok_or_else(|| {
            SearchError::MalformedResponse(format!("expected integer, got {n}"))
        }),
        other => Err(SearchError::MalformedResponse(format!(
            "expected integer, got {}",
            json_kind(other)
        ))),
    }
}

fn datetime(v: &Value) -> Result<Option<NaiveDateTime>> {
    match v {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(Some)
            .ok_or_else(|| {
                SearchError::MalformedResponse(format!("expected datetime, got {s:?}"))
            }),
        other => Err(SearchError::MalformedResponse(format!(
            "expected datetime, got {}",
            json_kind(other)
        ))),
    }
}

fn thumbnail(v: &Value) -> Result<Option<Thumbnail>> {
    if v.is_null() {
        return Ok(None);
    }
    match decode_model(v)? {
        Model::Thumbnail(t) => Ok(Some(t)),
        other => Err(unexpected("Bing.Thumbnail", &other)),
    }
}

/// Composite sub-collections arrive as plain arrays; the OData verbose
/// `{"results": [...]}` wrapper is also accepted.
fn collection<T>(v: &Value, decode_one: impl Fn(&Value) -> Result<T>) -> Result<Vec<T>> {
    let items = match v {
        Value::Array(items) => items,
        Value::Object(obj) => match obj.get("results") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(SearchError::MalformedResponse(
                    "expected a result collection".into(),
                ));
            }
        },
        other => {
            return Err(SearchError::MalformedResponse(format!(
                "expected a result collection, got {}",
                json_kind(other)
            )));
        }
    };
    items.iter().map(&decode_one).collect()
}

// ==============================
// Per-variant field tables
// ==============================

fn decode_web(obj: &Map<String, Value>) -> Result<WebResult> {
    let mut out = WebResult::default();
    for (key, value) in obj {
        if key == METADATA_KEY {
            continue;
        }
        let attr = snake_case(key);
        match attr.as_str() {
            "id" => out.id = text(value)?,
            "title" => out.title = text(value)?,
            "description" => out.description = text(value)?,
            "display_url" => out.display_url = text(value)?,
            "url" => out.url = text(value)?,
            _ => return Err(unknown_attribute("WebResult", attr)),
        }
    }
    Ok(out)
}

fn decode_image(obj: &Map<String, Value>) -> Result<ImageResult> {
    let mut out = ImageResult::default();
    for (key, value) in obj {
        if key == METADATA_KEY {
            continue;
        }
        let attr = snake_case(key);
        match attr.as_str() {
            "id" => out.id = text(value)?,
            "title" => out.title = text(value)?,
            "media_url" => out.media_url = text(value)?,
            "source_url" => out.source_url = text(value)?,
            "display_url" => out.display_url = text(value)?,
            "width" => out.width = integer(value)?,
            "height" => out.height = integer(value)?,
            "file_size" => out.file_size = integer(value)?,
            "content_type" => out.content_type = text(value)?,
            "thumbnail" => out.thumbnail = thumbnail(value)?,
            _ => return Err(unknown_attribute("ImageResult", attr)),
        }
    }
    Ok(out)
}

fn decode_video(obj: &Map<String, Value>) -> Result<VideoResult> {
    let mut out = VideoResult::default();
    for (key, value) in obj {
        if key == METADATA_KEY {
            continue;
        }
        let attr = snake_case(key);
        match attr.as_str() {
            "id" => out.id = text(value)?,
            "title" => out.title = text(value)?,
            "media_url" => out.media_url = text(value)?,
            "display_url" => out.display_url = text(value)?,
            "run_time" => out.run_time = integer(value)?,
            "thumbnail" => out.thumbnail = thumbnail(value)?,
            _ => return Err(unknown_attribute("VideoResult", attr)),
        }
    }
    Ok(out)
}

fn decode_news(obj: &Map<String, Value>) -> Result<NewsResult> {
    let mut out = NewsResult::default();
    for (key, value) in obj {
        if key == METADATA_KEY {
            continue;
        }
        let attr = snake_case(key);
        match attr.as_str() {
            "id" => out.id = text(value)?,
            "title" => out.title = text(value)?,
            "url" => out.url = text(value)?,
            "source" => out.source = text(value)?,
            "description" => out.description = text(value)?,
            "date" => out.date = datetime(value)?,
            _ => return Err(unknown_attribute("NewsResult", attr)),
        }
    }
    Ok(out)
}

fn decode_related_search(obj: &Map<String, Value>) -> Result<RelatedSearchResult> {
    let mut out = RelatedSearchResult::default();
    for (key, value) in obj {
        if key == METADATA_KEY {
            continue;
        }
        let attr = snake_case(key);
        match attr.as_str() {
            "id" => out.id = text(value)?,
            "title" => out.title = text(value)?,
            "bing_url" => out.bing_url = text(value)?,
            _ => return Err(unknown_attribute("RelatedSearchResult", attr)),
        }
    }
    Ok(out)
}

fn decode_spelling_suggestions(obj: &Map<String, Value>) -> Result<SpellingSuggestionsResult> {
    let mut out = SpellingSuggestionsResult::default();
    for (key, value) in obj {
        if key == METADATA_KEY {
            continue;
        }
        let attr = snake_case(key);
        match attr.as_str() {
            "id" => out.id = text(value)?,
            "value" => out.value = text(value)?,
            _ => return Err(unknown_attribute("SpellingSuggestionsResult", attr)),
        }
    }
    Ok(out)
}

fn decode_thumbnail(obj: &Map<String, Value>) -> Result<Thumbnail> {
    let mut out = Thumbnail::default();
    for (key, value) in obj {
        if key == METADATA_KEY {
            continue;
        }
        let attr = snake_case(key);
        match attr.as_str() {
            "media_url" => out.media_url = text(value)?,
            "content_type" => out.content_type = text(value)?,
            "width" => out.width = integer(value)?,
            "height" => out.height = integer(value)?,
            "file_size" => out.file_size = integer(value)?,
            _ => return Err(unknown_attribute("Thumbnail", attr)),
        }
    }
    Ok(out)
}

fn decode_composite(obj: &Map<String, Value>) -> Result<CompositeSearchResult> {
    let mut out = CompositeSearchResult::default();
    for (key, value) in obj {
        if key == METADATA_KEY {
            continue;
        }
        let attr = snake_case(key);
        match attr.as_str() {
            "id" => out.id = text(value)?,
            "web_total" => out.web_total = integer(value)?,
            "web_offset" => out.web_offset = integer(value)?,
            "image_total" => out.image_total = integer(value)?,
            "image_offset" => out.image_offset = integer(value)?,
            "video_total" => out.video_total = integer(value)?,
            "video_offset" => out.video_offset = integer(value)?,
            "news_total" => out.news_total = integer(value)?,
            "news_offset" => out.news_offset = integer(value)?,
            "spelling_suggestions_total" => {
                out.spelling_suggestions_total = integer(value)?;
            }
            "altered_query" => out.altered_query = text(value)?,
            "alteration_override_query" => out.alteration_override_query = text(value)?,
            "web" => out.web = collection(value, expect_web)?,
            "image" => out.image = collection(value, expect_image)?,
            "video" => out.video = collection(value, expect_video)?,
            "news" => out.news = collection(value, expect_news)?,
            "related_search" => out.related_search = collection(value, expect_related_search)?,
            "spelling_suggestions" => {
                out.spelling_suggestions = collection(value, expect_spelling_suggestions)?;
            }
            _ => return Err(unknown_attribute("CompositeSearchResult", attr)),
        }
    }
    Ok(out)
}

fn unknown_attribute(model: &'static str, attribute: String) -> SearchError {
    SearchError::UnknownAttribute { model, attribute }
}
