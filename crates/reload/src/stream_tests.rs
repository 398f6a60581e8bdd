// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn round_trips_a_single_record() {
    let mut record = Record::new();
    record.push("id", "nginx.service");
    record.push("load-state", "loaded");

    let text = write_records(&[record]);
    assert_eq!(text, "id=nginx.service\nload-state=loaded\n\n");

    let parsed = read_records(&text);
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].get("id"), Some("nginx.service"));
    assert_eq!(parsed[0].get("load-state"), Some("loaded"));
}

#[test]
fn blank_line_separates_records() {
    let mut a = Record::new();
    a.push("id", "a.service");
    let mut b = Record::new();
    b.push("id", "b.service");

    let text = write_records(&[a, b]);
    let parsed = read_records(&text);
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].get("id"), Some("a.service"));
    assert_eq!(parsed[1].get("id"), Some("b.service"));
}

#[test]
fn escapes_embedded_newlines_and_backslashes() {
    let mut record = Record::new();
    record.push("description", "line one\nline two \\ backslash");

    let text = write_records(&[record]);
    assert!(!text.trim_end_matches('\n').contains('\n') || text.matches('\n').count() == 2);

    let parsed = read_records(&text);
    assert_eq!(parsed[0].get("description"), Some("line one\nline two \\ backslash"));
}

#[test]
fn unknown_keys_are_preserved_for_the_caller_to_skip() {
    let text = "id=a.service\nfrom-the-future=42\n\n";
    let parsed = read_records(text);
    assert_eq!(parsed[0].get("id"), Some("a.service"));
    assert_eq!(parsed[0].get("from-the-future"), Some("42"));
}

#[test]
fn malformed_lines_without_equals_are_skipped_not_rejected() {
    let text = "id=a.service\nnot-a-kv-line\nload-state=loaded\n\n";
    let parsed = read_records(text);
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].get("id"), Some("a.service"));
    assert_eq!(parsed[0].get("load-state"), Some("loaded"));
}

#[test]
fn get_all_returns_every_value_for_a_repeated_key() {
    let mut record = Record::new();
    record.push("documentation", "man:nginx(8)");
    record.push("documentation", "https://nginx.org/docs");

    let text = write_records(&[record]);
    let parsed = read_records(&text);
    let docs: Vec<&str> = parsed[0].get_all("documentation").collect();
    assert_eq!(docs, vec!["man:nginx(8)", "https://nginx.org/docs"]);
}

#[test]
fn empty_input_yields_no_records() {
    assert!(read_records("").is_empty());
    assert!(read_records("\n\n\n").is_empty());
}
