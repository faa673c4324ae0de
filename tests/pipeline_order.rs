use qrfield::{Actor, Snapshot, snapshot_entries};

fn snapshot() -> Snapshot {
    serde_json::from_str(include_str!("data/snapshot_multi.json")).unwrap()
}

#[test]
fn entries_follow_source_then_fan_out_order() {
    let entries = snapshot_entries(&snapshot()).unwrap();
    let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(
        labels,
        [
            "URL",
            "URL (French)",
            "Admin URL",
            "Greeting",
            "Greeting (French)",
            "Downloads: menu.pdf",
        ]
    );
}

#[test]
fn edit_url_payload_has_language_query_stripped() {
    let entries = snapshot_entries(&snapshot()).unwrap();
    let admin = entries.iter().find(|e| e.label == "Admin URL").unwrap();
    assert_eq!(admin.text, "https://example.com/admin/?id=7");
}

#[test]
fn language_payloads_use_language_urls() {
    let entries = snapshot_entries(&snapshot()).unwrap();
    assert_eq!(entries[0].text, "https://example.com/about/");
    assert_eq!(entries[1].text, "https://example.com/fr/about/");
    let greeting_fr = entries
        .iter()
        .find(|e| e.label == "Greeting (French)")
        .unwrap();
    assert_eq!(greeting_fr.text, "Bonjour");
}

#[test]
fn guest_actor_restricts_fan_out_to_own_language() {
    let mut snapshot = snapshot();
    snapshot.actor = Some(Actor {
        guest: true,
        language: Some("fr".to_string()),
    });
    let entries = snapshot_entries(&snapshot).unwrap();
    let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(
        labels,
        [
            "URL (French)",
            "Admin URL",
            "Greeting (French)",
            "Downloads: menu.pdf",
        ]
    );
}

#[test]
fn language_without_distinct_routing_is_dropped() {
    let mut snapshot = snapshot();
    // Collapse the root's French URL onto the default root URL: French has
    // no routing of its own anymore.
    let root = snapshot.root.as_mut().unwrap();
    root.language_urls
        .insert("fr".to_string(), root.http_url.clone());
    let entries = snapshot_entries(&snapshot).unwrap();
    assert!(entries.iter().all(|e| e.label != "URL (French)"));
    // Multi-language field values are unaffected by the routing heuristic.
    assert!(entries.iter().any(|e| e.label == "Greeting (French)"));
}

#[test]
fn empty_source_list_defaults_to_canonical_url() {
    let mut snapshot = snapshot();
    snapshot.field.source = String::new();
    snapshot.languages = None;
    let entries = snapshot_entries(&snapshot).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].label, "URL");
}

#[test]
fn duplicate_sources_resolve_once() {
    let mut snapshot = snapshot();
    snapshot.field.source = "url, httpUrl, editUrl".to_string();
    snapshot.languages = None;
    let entries = snapshot_entries(&snapshot).unwrap();
    let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["URL", "Admin URL"]);
}
