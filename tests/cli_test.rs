// CLI tests against local fixture files (no browser needed)

mod common;
use common::{create_test_html, fixtures, run_cssprobe, run_cssprobe_with_stdin, stdout_json};
use pretty_assertions::assert_eq;

#[test]
fn test_synthesize_unique_id() {
    let (_dir, path) = create_test_html(fixtures::CATALOG);
    let output = run_cssprobe(&["synthesize", path.to_str().unwrap(), "header"]);

    assert!(output.status.success());
    let report = stdout_json(&output);
    assert_eq!(report["total_matches"], 1);
    assert_eq!(report["selectors"][0]["selector"], "#site-header");
    assert_eq!(report["selectors"][0]["tag"], "header");
    assert!(report["generated_at"].is_string());
}

#[test]
fn test_synthesize_all_with_verify() {
    let (_dir, path) = create_test_html(fixtures::CATALOG);
    let output = run_cssprobe(&[
        "synthesize",
        path.to_str().unwrap(),
        "li",
        "--all",
        "--verify",
    ]);

    assert!(output.status.success());
    let report = stdout_json(&output);
    let selectors: Vec<&str> = report["selectors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["selector"].as_str().unwrap())
        .collect();
    assert_eq!(selectors.len(), 5);
    assert_eq!(selectors[2], "html > body > ul > li:nth-child(3)");
    assert!(
        report["selectors"]
            .as_array()
            .unwrap()
            .iter()
            .all(|e| e["verified"] == true)
    );
}

#[test]
fn test_synthesize_stops_at_id_ancestor() {
    let (_dir, path) = create_test_html(fixtures::CATALOG);
    let output = run_cssprobe(&[
        "synthesize",
        path.to_str().unwrap(),
        "button",
        "--index",
        "1",
        "-f",
        "simple",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "#panel > button:nth-child(2)");
}

#[test]
fn test_duplicate_ids_fall_back_to_positions() {
    let (_dir, path) = create_test_html(fixtures::CATALOG);
    let output = run_cssprobe(&[
        "synthesize",
        path.to_str().unwrap(),
        "p",
        "--all",
        "-f",
        "simple",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec!["html > body > p:nth-child(4)", "html > body > p:nth-child(5)"]
    );
}

#[test]
fn test_synthesize_from_stdin() {
    let output = run_cssprobe_with_stdin(
        &["synthesize", "-", "span", "-f", "simple"],
        "<div id=\"box\"><b>x</b><span>y</span></div>",
    );

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "#box > span");
}

#[test]
fn test_element_not_found_exit_code() {
    let (_dir, path) = create_test_html(fixtures::CATALOG);
    let output = run_cssprobe(&["synthesize", path.to_str().unwrap(), "table"]);

    assert_eq!(output.status.code(), Some(2));
    let error = stdout_json(&output);
    assert_eq!(error["error"], true);
    assert_eq!(error["exit_code"], 2);
}

#[test]
fn test_expect_one_exit_code() {
    let (_dir, path) = create_test_html(fixtures::CATALOG);
    let output = run_cssprobe(&["synthesize", path.to_str().unwrap(), "li", "--expect-one"]);

    assert_eq!(output.status.code(), Some(3));
    let error = stdout_json(&output);
    assert_eq!(
        error["message"],
        "Expected exactly one element matching 'li', but found 5"
    );
}

#[test]
fn test_missing_file_exit_code() {
    let output = run_cssprobe(&["synthesize", "/no/such/page.html", "p"]);
    assert_eq!(output.status.code(), Some(6));
}

#[test]
fn test_conflicting_selection_flags() {
    let (_dir, path) = create_test_html(fixtures::CATALOG);
    let output = run_cssprobe(&[
        "synthesize",
        path.to_str().unwrap(),
        "li",
        "--all",
        "--expect-one",
    ]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_verify_reports_matches() {
    let (_dir, path) = create_test_html(fixtures::CATALOG);
    let output = run_cssprobe(&[
        "verify",
        path.to_str().unwrap(),
        "#panel",
        "li",
        "#dup",
    ]);

    assert!(output.status.success());
    let reports = stdout_json(&output);
    assert_eq!(reports[0]["matches"], 1);
    assert_eq!(reports[0]["unique"], true);
    assert_eq!(reports[1]["matches"], 5);
    assert_eq!(reports[2]["matches"], 2);
    assert_eq!(reports[2]["unique"], false);
}

#[test]
fn test_verify_strict_fails_on_ambiguous_selector() {
    let (_dir, path) = create_test_html(fixtures::CATALOG);
    let output = run_cssprobe(&["verify", path.to_str().unwrap(), "#panel", "li", "--strict"]);

    assert_eq!(output.status.code(), Some(3));
    // stdout carries exactly one JSON document: the error
    let error = stdout_json(&output);
    assert_eq!(error["error"], true);
    assert_eq!(error["exit_code"], 3);
}

#[test]
fn test_invalid_locator_exit_code_ignores_its_text() {
    let (_dir, path) = create_test_html(fixtures::CATALOG);

    for locator in [".timeout[", "WebDriver(("] {
        let output = run_cssprobe(&["synthesize", path.to_str().unwrap(), locator]);

        assert_eq!(output.status.code(), Some(1), "locator {}", locator);
        let error = stdout_json(&output);
        assert!(
            error["message"]
                .as_str()
                .unwrap()
                .starts_with("Invalid CSS selector")
        );
    }
}

#[test]
fn test_verify_strict_invalid_selector_exit_code() {
    let (_dir, path) = create_test_html(fixtures::CATALOG);
    let output = run_cssprobe(&["verify", path.to_str().unwrap(), "div.timeout[", "--strict"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_json(&output)["exit_code"], 1);
}

#[test]
fn test_latin1_file_is_loaded() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("latin1.html");
    std::fs::write(&path, b"<div id=\"menu\"><p>caf\xe9</p></div>").unwrap();

    let output = run_cssprobe(&["synthesize", path.to_str().unwrap(), "p", "-f", "simple"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "#menu > p");
}

#[test]
fn test_synthesized_selectors_pass_strict_verify() {
    let (_dir, path) = create_test_html(fixtures::CATALOG);
    let page = path.to_str().unwrap();

    let output = run_cssprobe(&["synthesize", page, "body *", "--all", "-f", "simple"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let selectors: Vec<&str> = stdout.lines().collect();
    assert!(selectors.len() > 10);

    let mut args = vec!["verify", page, "--strict"];
    args.extend(selectors.iter().copied());
    let output = run_cssprobe(&args);
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stdout)
    );
}

#[test]
fn test_version_json() {
    let output = run_cssprobe(&["version"]);

    assert!(output.status.success());
    let info = stdout_json(&output);
    assert_eq!(info["name"], "cssprobe");
    assert_eq!(info["requires_unique_id"], true);
}
