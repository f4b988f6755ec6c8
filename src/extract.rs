//! Reference extraction: scans helpdesk ticket text for issue-tracker keys.

use helpdesk_api::HelpdeskTicket;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Project-key-style identifier: uppercase letters, hyphen, digits,
/// word-bounded.
static ISSUE_KEY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z]+-\d+\b").expect("invalid issue key regex"));

/// Collects candidate issue-tracker keys from a ticket's subject,
/// description and text-typed custom fields, in that order. Duplicates are
/// dropped while first-seen order is preserved; the result is empty when
/// nothing matches. Total over any ticket shape, never fails.
pub fn extract_references(ticket: &HelpdeskTicket) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();

    scan_text(&ticket.subject, &mut seen, &mut keys);
    if let Some(description) = &ticket.description_text {
        scan_text(description, &mut seen, &mut keys);
    }
    for value in ticket.custom_fields.values() {
        if let Some(text) = value.as_text() {
            scan_text(text, &mut seen, &mut keys);
        }
    }

    keys
}

fn scan_text(text: &str, seen: &mut HashSet<String>, keys: &mut Vec<String>) {
    for found in ISSUE_KEY_REGEX.find_iter(text) {
        let key = found.as_str();
        if seen.insert(key.to_string()) {
            keys.push(key.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::extract_references;
    use chrono::{TimeZone, Utc};
    use helpdesk_api::{HelpdeskTicket, ScalarValue};
    use std::collections::HashMap;

    fn ticket(subject: &str, description: Option<&str>) -> HelpdeskTicket {
        HelpdeskTicket {
            id: 1,
            subject: subject.to_string(),
            description_text: description.map(str::to_string),
            status: 2,
            priority: 1,
            custom_fields: HashMap::new(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            requester_name: None,
            company_name: None,
        }
    }

    #[test]
    fn no_key_pattern_yields_empty_set() {
        let ticket = ticket("printer jammed again", Some("no codes here, just abc-12"));
        assert!(extract_references(&ticket).is_empty());
    }

    #[test]
    fn subject_key_is_extracted_exactly() {
        let ticket = ticket("Fix ABC-123 now", None);
        assert_eq!(extract_references(&ticket), vec!["ABC-123".to_string()]);
    }

    #[test]
    fn duplicates_collapse_and_first_seen_order_wins() {
        let ticket = ticket("See XYZ-9 and XYZ-9 again, also ABC-1", None);
        let references = extract_references(&ticket);
        assert_eq!(references, vec!["XYZ-9".to_string(), "ABC-1".to_string()]);
        assert_eq!(references.first().map(String::as_str), Some("XYZ-9"));
    }

    #[test]
    fn description_and_text_custom_fields_are_scanned() {
        let mut ticket = ticket("no keys in subject", Some("escalated as DEF-44"));
        ticket.custom_fields.insert(
            "cf_linked".to_string(),
            ScalarValue::Text("tracked under GHI-7".to_string()),
        );
        ticket
            .custom_fields
            .insert("cf_count".to_string(), ScalarValue::Number(7.0));

        let references = extract_references(&ticket);
        assert_eq!(references.len(), 2);
        assert_eq!(references[0], "DEF-44");
        assert!(references.contains(&"GHI-7".to_string()));
    }

    #[test]
    fn word_boundary_rejects_embedded_matches() {
        let ticket = ticket("code XABC-123X should not count, ABC-12a neither", None);
        assert!(extract_references(&ticket).is_empty());
    }
}
