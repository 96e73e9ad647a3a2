use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::commands::utils;
use cssprobe::page::HtmlPage;
use cssprobe::source::load_page;
use cssprobe::synthesizer::SelectorSynthesizer;
use cssprobe::types::{OutputFormat, PageSource, SelectorEntry, SelectorReport, TargetSelection};

/// Build selectors for the elements `locator` matches in `page`
pub fn build_report(
    page: &HtmlPage,
    source: &str,
    locator: &str,
    selection: TargetSelection,
    verify: bool,
) -> Result<SelectorReport> {
    let matches = page.find_all(locator)?;
    let targets = utils::select_targets(&matches, locator, selection)?;

    let synthesizer = SelectorSynthesizer::new(page, page);
    let handles: Vec<_> = targets.iter().map(|&(_, handle)| handle).collect();
    let selectors = synthesizer.synthesize_all(&handles)?;

    let entries = targets
        .iter()
        .zip(selectors)
        .map(|(&(index, handle), selector)| SelectorEntry {
            index,
            tag: page.tag_name(handle).unwrap_or_default().to_lowercase(),
            verified: verify.then(|| synthesizer.verify(&selector, handle)),
            text_content: page.text_content(handle),
            selector,
        })
        .collect::<Vec<_>>();

    let warning = (matches.len() > 1 && selection == TargetSelection::First).then(|| {
        format!(
            "{} elements match '{}'. Showing first. Use --all to see all.",
            matches.len(),
            locator
        )
    });

    Ok(SelectorReport {
        source: source.to_string(),
        locator: locator.to_string(),
        generated_at: Utc::now(),
        total_matches: matches.len(),
        selectors: entries,
        warning,
    })
}

#[allow(clippy::too_many_arguments)]
pub async fn handle_synthesize(
    source: String,
    locator: String,
    all: bool,
    index: Option<usize>,
    expect_one: bool,
    verify: bool,
    browser: String,
    webdriver_url: Option<String>,
    no_headless: bool,
    no_browser: bool,
    format: OutputFormat,
) -> Result<()> {
    info!("Synthesizing selectors for {} on {}", locator, source);

    let selection = TargetSelection::from_flags(all, index, expect_one)?;
    let page_source = PageSource::parse(&source)?;
    let mode = utils::fetch_mode(&browser, webdriver_url, no_headless, no_browser)?;

    let page = load_page(&page_source, &mode).await?;
    let report = build_report(&page, &page_source.to_string(), &locator, selection, verify)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Simple => {
            for entry in &report.selectors {
                match entry.verified {
                    Some(false) => println!("{}  (does not resolve uniquely)", entry.selector),
                    _ => println!("{}", entry.selector),
                }
            }
            if let Some(warning) = &report.warning {
                eprintln!("{}", warning);
            }
        }
    }

    info!("Built {} selector(s)", report.selectors.len());
    Ok(())
}
