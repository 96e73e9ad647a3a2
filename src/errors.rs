use std::fmt;

/// Custom error type that includes exit codes
#[derive(Debug)]
pub enum CssprobeError {
    /// Locator matched nothing (exit code 2)
    ElementNotFound(String),
    /// Multiple elements when expecting one (exit code 3)
    MultipleElements { selector: String, count: usize },
    /// WebDriver connection failed (exit code 4)
    WebDriverFailed(String),
    /// Operation timeout (exit code 5)
    Timeout(String),
    /// Page could not be read or fetched (exit code 6)
    PageLoadFailed(String),
    /// Locator or selector that does not parse (exit code 1)
    InvalidSelector(String),
    /// Bad command line input (exit code 1)
    InvalidArgument(String),
    /// Generic error (exit code 1)
    Other(anyhow::Error),
}

impl CssprobeError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CssprobeError::ElementNotFound(_) => 2,
            CssprobeError::MultipleElements { .. } => 3,
            CssprobeError::WebDriverFailed(_) => 4,
            CssprobeError::Timeout(_) => 5,
            CssprobeError::PageLoadFailed(_) => 6,
            CssprobeError::InvalidSelector(_)
            | CssprobeError::InvalidArgument(_)
            | CssprobeError::Other(_) => 1,
        }
    }
}

impl fmt::Display for CssprobeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssprobeError::ElementNotFound(selector) => {
                write!(f, "No elements found matching selector: {}", selector)
            }
            CssprobeError::MultipleElements { selector, count } => {
                write!(
                    f,
                    "Expected exactly one element matching '{}', but found {}",
                    selector, count
                )
            }
            CssprobeError::WebDriverFailed(msg) => {
                write!(f, "WebDriver connection failed: {}", msg)
            }
            CssprobeError::Timeout(msg) => {
                write!(f, "Operation timed out: {}", msg)
            }
            CssprobeError::PageLoadFailed(msg) => {
                write!(f, "Failed to load page: {}", msg)
            }
            CssprobeError::InvalidSelector(msg) | CssprobeError::InvalidArgument(msg) => {
                write!(f, "{}", msg)
            }
            CssprobeError::Other(err) => write!(f, "{:#}", err),
        }
    }
}

impl std::error::Error for CssprobeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CssprobeError::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for CssprobeError {
    fn from(err: anyhow::Error) -> Self {
        // Typed errors raised by the commands keep their kind
        if let Some(typed) = err
            .downcast_ref::<CssprobeError>()
            .and_then(CssprobeError::try_clone)
        {
            return typed;
        }

        // Otherwise try to detect the error type from the message chain
        let msg = format!("{:#}", err);

        if msg.contains("Failed to connect to WebDriver")
            || msg.contains("WebDriver")
            || msg.contains("geckodriver")
            || msg.contains("chromedriver")
        {
            CssprobeError::WebDriverFailed(msg)
        } else if msg.contains("timeout") || msg.contains("timed out") {
            CssprobeError::Timeout(msg)
        } else {
            CssprobeError::Other(err)
        }
    }
}

impl CssprobeError {
    fn try_clone(&self) -> Option<Self> {
        Some(match self {
            CssprobeError::ElementNotFound(s) => CssprobeError::ElementNotFound(s.clone()),
            CssprobeError::MultipleElements { selector, count } => {
                CssprobeError::MultipleElements {
                    selector: selector.clone(),
                    count: *count,
                }
            }
            CssprobeError::WebDriverFailed(s) => CssprobeError::WebDriverFailed(s.clone()),
            CssprobeError::Timeout(s) => CssprobeError::Timeout(s.clone()),
            CssprobeError::PageLoadFailed(s) => CssprobeError::PageLoadFailed(s.clone()),
            CssprobeError::InvalidSelector(s) => CssprobeError::InvalidSelector(s.clone()),
            CssprobeError::InvalidArgument(s) => CssprobeError::InvalidArgument(s.clone()),
            CssprobeError::Other(_) => return None,
        })
    }
}

#[cfg(test)]
#[path = "errors_test.rs"]
mod errors_test;
