//! # cssprobe
#![allow(clippy::uninlined_format_args)]
//!
//! Synthesizes CSS selectors that uniquely address elements of a web page.
//!
//! A selector is `#id` when the element has a non-empty id that is unique in the
//! document. Otherwise it is a path of `tag[:nth-child(n)]` segments joined with
//! `" > "`, walking up from the element until an ancestor with a unique id (or
//! the document root) is reached.
//!
//! ## CLI Usage
//!
//! ```bash
//! # Selector for the first element matching a locator in a local file
//! cssprobe synthesize page.html ".product-card"
//!
//! # Selectors for every match, checked against the page
//! cssprobe synthesize page.html "ul.results > li" --all --verify
//!
//! # Render a live page in Chrome through WebDriver
//! cssprobe synthesize "https://example.com" "a" --all --browser chrome
//!
//! # Raw HTML over HTTP, no browser involved
//! cssprobe synthesize "https://example.com" "h1" --no-browser
//!
//! # Markup on stdin, plain output
//! curl -s https://example.com | cssprobe synthesize - "p" --all -f simple
//!
//! # Check that selectors still resolve to exactly one element
//! cssprobe verify page.html "#main > li:nth-child(3)" "html > body > p" --strict
//! ```
//!
//! ### JSON Output and Processing with jq
//!
//! ```bash
//! cssprobe synthesize page.html "nav a" --all | jq -r '.selectors[].selector'
//! ```
//!
//! ## Library Usage
//!
//! ```
//! use cssprobe::{HtmlPage, SelectorSynthesizer};
//!
//! # fn example() -> anyhow::Result<()> {
//! let page = HtmlPage::parse(r#"<ul id="list"><li>a</li><li>b</li></ul>"#);
//! let items = page.find_all("li")?;
//!
//! let synthesizer = SelectorSynthesizer::new(&page, &page);
//! let selectors = synthesizer.synthesize_all(&items)?;
//! assert_eq!(selectors, vec!["#list > li:nth-child(1)", "#list > li:nth-child(2)"]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

/// DOM abstraction and in-memory trees
pub mod dom;

/// Exit-code aware error type for the CLI
pub mod errors;

/// CSS identifier escaping
pub mod escape;

/// Parsed HTML documents
pub mod page;

/// Loading pages from files, stdin, HTTP or a browser
pub mod source;

/// Selector synthesis
pub mod synthesizer;

/// Report and CLI types
pub mod types;

/// WebDriver browser control
pub mod webdriver;

pub use dom::{
    ArenaId, DomArena, DomTree, ElementView, NodeRef, SelectorCounter, SelectorResolver,
};
pub use errors::CssprobeError;
pub use escape::{escape_identifier, escape_tag_name};
pub use page::HtmlPage;
pub use source::{FetchMode, load_page};
pub use synthesizer::{SelectorError, SelectorOutput, SelectorSynthesizer, Targets};
pub use types::{MatchReport, OutputFormat, PageSource, SelectorEntry, SelectorReport};
pub use webdriver::{Browser, BrowserType};
