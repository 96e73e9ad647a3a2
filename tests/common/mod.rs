// Common test utilities and fixtures

use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Mock HTML pages for testing
pub mod fixtures {
    pub const CATALOG: &str = r#"
    <!DOCTYPE html>
    <html>
    <head><title>Catalog</title></head>
    <body>
        <header id="site-header"><h1>Catalog</h1></header>
        <ul class="items">
            <li>One</li>
            <li>Two</li>
            <li>Three</li>
            <li>Four</li>
            <li>Five</li>
        </ul>
        <div id="panel"><button>Save</button><button>Cancel</button></div>
        <p id="dup">first</p>
        <p id="dup">second</p>
    </body>
    </html>
    "#;
}

/// Write fixture HTML to a temporary file
pub fn create_test_html(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("test.html");
    std::fs::write(&file_path, content).expect("Failed to write test HTML");
    (temp_dir, file_path)
}

/// Run the cssprobe binary
pub fn run_cssprobe(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cssprobe"))
        .args(args)
        .output()
        .expect("Failed to execute cssprobe command")
}

/// Run the cssprobe binary with `input` on stdin
pub fn run_cssprobe_with_stdin(args: &[&str], input: &str) -> Output {
    use std::io::Write;

    let mut child = Command::new(env!("CARGO_BIN_EXE_cssprobe"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn cssprobe");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait for cssprobe")
}

/// Parse stdout as JSON
pub fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({}): {}",
            e,
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

/// Browser for WebDriver tests, chosen with TEST_BROWSER
pub fn get_test_browser() -> &'static str {
    match std::env::var("TEST_BROWSER") {
        Ok(browser) if browser == "firefox" => "firefox",
        _ => "chrome",
    }
}
