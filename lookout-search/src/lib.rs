//! Typed client for the Bing Search API (Azure Marketplace OData endpoint).
//!
//! The crate is a pure translation layer: it turns typed option records into
//! the service's idiosyncratically named query parameters, performs the
//! authenticated GET through [`lookout_http`], and decodes the
//! metadata-tagged JSON payload into strongly distinguished result models.
//!
//! ```no_run
//! # async fn demo() -> lookout_search::Result<()> {
//! use lookout_search::enums::Adult;
//! use lookout_search::options::{CommonOptions, WebOptions};
//! use lookout_search::SearchClient;
//!
//! let client = SearchClient::new("account-key")?;
//! let results = client
//!     .web(
//!         "rust borrow checker",
//!         &WebOptions {
//!             common: CommonOptions {
//!                 limit: Some(10),
//!                 adult: Some(Adult::Moderate),
//!                 ..Default::default()
//!             },
//!             ..Default::default()
//!         },
//!     )
//!     .await?;
//! for hit in results {
//!     println!("{:?} {:?}", hit.title, hit.url);
//! }
//! # Ok(()) }
//! ```

use std::borrow::Cow;

pub mod client;
pub mod decode;
pub mod enums;
pub mod error;
pub mod models;
mod naming;
pub mod options;
pub mod params;

pub use client::{API_ROOT, SearchClient};
pub use error::{Result, SearchError};

/// Reserved delimiter the service wraps around matched query terms in
/// description-bearing fields when highlighting is requested. The decoder
/// passes it through untouched.
pub const HIGHLIGHT_DELIMITER: char = '\u{E000}';

/// Drop highlight delimiters for display surfaces that do not render them.
///
/// ```
/// use lookout_search::{HIGHLIGHT_DELIMITER, strip_highlighting};
///
/// let marked = format!("a {HIGHLIGHT_DELIMITER}term{HIGHLIGHT_DELIMITER} here");
/// assert_eq!(strip_highlighting(&marked), "a term here");
/// assert_eq!(strip_highlighting("plain"), "plain");
/// ```
pub fn strip_highlighting(text: &str) -> Cow<'_, str> {
    if text.contains(HIGHLIGHT_DELIMITER) {
        Cow::Owned(text.chars().filter(|c| *c != HIGHLIGHT_DELIMITER).collect())
    } else {
        Cow::Borrowed(text)
    }
}
