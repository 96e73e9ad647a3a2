use anyhow::Result;
use tracing::{info, warn};

use crate::commands::utils;
use cssprobe::errors::CssprobeError;
use cssprobe::page::HtmlPage;
use cssprobe::source::load_page;
use cssprobe::types::{MatchReport, OutputFormat, PageSource};

/// Resolve each selector against the page
pub fn check_selectors(page: &HtmlPage, selectors: &[String]) -> Vec<MatchReport> {
    selectors
        .iter()
        .map(|selector| match page.find_all(selector) {
            Ok(matches) => MatchReport {
                selector: selector.clone(),
                matches: matches.len(),
                unique: matches.len() == 1,
                error: None,
            },
            Err(e) => MatchReport {
                selector: selector.clone(),
                matches: 0,
                unique: false,
                error: Some(e.to_string()),
            },
        })
        .collect()
}

/// In strict mode the first selector that does not match exactly one element fails the run
pub fn enforce_unique(reports: &[MatchReport]) -> Result<()> {
    for report in reports {
        if let Some(error) = &report.error {
            return Err(CssprobeError::InvalidSelector(error.clone()).into());
        }
        match report.matches {
            0 => return Err(CssprobeError::ElementNotFound(report.selector.clone()).into()),
            1 => {}
            count => {
                return Err(CssprobeError::MultipleElements {
                    selector: report.selector.clone(),
                    count,
                }
                .into());
            }
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn handle_verify(
    source: String,
    selectors: Vec<String>,
    strict: bool,
    browser: String,
    webdriver_url: Option<String>,
    no_headless: bool,
    no_browser: bool,
    format: OutputFormat,
) -> Result<()> {
    info!("Verifying {} selector(s) on {}", selectors.len(), source);

    let page_source = PageSource::parse(&source)?;
    let mode = utils::fetch_mode(&browser, webdriver_url, no_headless, no_browser)?;
    let page = load_page(&page_source, &mode).await?;

    let reports = check_selectors(&page, &selectors);

    let ambiguous = reports.iter().filter(|r| !r.unique).count();
    if ambiguous > 0 {
        warn!("{} of {} selector(s) do not resolve uniquely", ambiguous, reports.len());
    }

    let outcome = if strict {
        enforce_unique(&reports)
    } else {
        Ok(())
    };

    match format {
        // A strict failure leaves stdout to the single error object
        OutputFormat::Json if outcome.is_err() => {}
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Simple => {
            for report in &reports {
                let status = match (&report.error, report.matches) {
                    (Some(_), _) => "invalid",
                    (None, 1) => "unique",
                    (None, 0) => "no match",
                    (None, _) => "ambiguous",
                };
                println!("{}: {} ({} matches)", report.selector, status, report.matches);
            }
        }
    }

    outcome
}
