use anyhow::Result;
use tracing::info;

use cssprobe::errors::CssprobeError;
use cssprobe::source::FetchMode;
use cssprobe::types::TargetSelection;
use cssprobe::webdriver::BrowserType;

/// Pick the elements to work on from the locator's matches
pub fn select_targets<H: Copy>(
    matches: &[H],
    locator: &str,
    selection: TargetSelection,
) -> Result<Vec<(usize, H)>> {
    if matches.is_empty() {
        return Err(CssprobeError::ElementNotFound(locator.to_string()).into());
    }

    let total = matches.len();
    match selection {
        TargetSelection::First => {
            if total > 1 {
                info!(
                    "Warning: {} elements match '{}'. Using first. Use --all to see all.",
                    total, locator
                );
            }
            Ok(vec![(0, matches[0])])
        }
        TargetSelection::Index(idx) => {
            let Some(&target) = matches.get(idx) else {
                return Err(CssprobeError::InvalidArgument(format!(
                    "Index {} out of bounds. Found {} elements matching '{}'",
                    idx, total, locator
                ))
                .into());
            };
            Ok(vec![(idx, target)])
        }
        TargetSelection::All => Ok(matches.iter().copied().enumerate().collect()),
        TargetSelection::ExpectOne if total > 1 => Err(CssprobeError::MultipleElements {
            selector: locator.to_string(),
            count: total,
        }
        .into()),
        TargetSelection::ExpectOne => Ok(vec![(0, matches[0])]),
    }
}

/// Build the fetch mode from the shared CLI flags
pub fn fetch_mode(
    browser: &str,
    webdriver_url: Option<String>,
    no_headless: bool,
    no_browser: bool,
) -> Result<FetchMode> {
    if no_browser {
        return Ok(FetchMode::Http);
    }

    let browser_type: BrowserType = browser.parse()?;
    Ok(FetchMode::Browser {
        browser_type,
        webdriver_url,
        headless: !no_headless,
    })
}
