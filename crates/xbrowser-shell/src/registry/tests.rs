use std::collections::HashSet;

use proptest::prelude::*;

use super::*;
use crate::test_utils::{HostCall, MockSurfaceHost};

fn registry() -> TabRegistry {
    TabRegistry::new(&ShellConfig::default())
}

fn created(reg: &mut TabRegistry, host: &mut MockSurfaceHost, raw: &str) -> SurfaceId {
    let id = reg.create_tab(raw, host).unwrap();
    reg.handle_surface_event(&SurfaceEvent::Created { id: id.clone() }, host);
    id
}

/// Active tab, when set, must name a live tab.
fn assert_active_is_live(reg: &TabRegistry) {
    if let Some(id) = reg.active_tab_id() {
        assert!(reg.contains(id), "active tab {id} is not in the registry");
    }
}

// -- create --------------------------------------------------------------

#[test]
fn create_resolves_and_activates() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let id = reg.create_tab("github.com", &mut host).unwrap();

    let tab = reg.get(&id).unwrap();
    assert_eq!(tab.url(), "https://github.com");
    assert_eq!(tab.title(), "https://github.com");
    assert_eq!(tab.phase(), TabPhase::Creating);
    assert_eq!(reg.active_tab_id(), Some(&id));
    assert_eq!(
        host.calls,
        vec![HostCall::Create {
            label: format!("webview_{id}"),
            url: "https://github.com".into()
        }]
    );
    assert_eq!(reg.status(), "Tab opened: https://github.com");
}

#[test]
fn id_has_timestamp_and_sequence() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let id = reg.create_tab("https://a.com", &mut host).unwrap();
    let created_at = reg.get(&id).unwrap().created_at();
    assert_eq!(id.as_str(), format!("tab_{created_at}_0"));
}

#[test]
fn created_event_marks_loaded() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let id = created(&mut reg, &mut host, "github.com");
    assert_eq!(reg.get(&id).unwrap().phase(), TabPhase::Loaded);
    assert_eq!(reg.status(), "Tab created successfully: https://github.com");
}

#[test]
fn rejected_url_leaves_registry_unchanged() {
    let mut reg = registry();
    let mut host = MockSurfaceHost {
        reject_urls: true,
        ..Default::default()
    };
    let err = reg.create_tab("github.com", &mut host).unwrap_err();
    assert!(matches!(err, ShellError::InvalidUrl(_)));
    assert!(reg.is_empty());
    assert!(host.calls.is_empty());
}

#[test]
fn validator_failure_is_invalid_url() {
    let mut reg = registry();
    let mut host = MockSurfaceHost {
        fail_validation: true,
        ..Default::default()
    };
    let err = reg.create_tab("github.com", &mut host).unwrap_err();
    assert!(matches!(err, ShellError::InvalidUrl(_)));
    assert!(reg.is_empty());
}

#[test]
fn creation_failure_is_atomic() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let first = created(&mut reg, &mut host, "https://a.com");

    host.fail_create = true;
    let err = reg.create_tab("https://b.com", &mut host).unwrap_err();
    assert!(matches!(err, ShellError::SurfaceCreation(_)));
    assert_eq!(reg.len(), 1);
    assert_eq!(reg.active_tab_id(), Some(&first));
}

#[test]
fn empty_input_creates_nothing() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let err = reg.create_tab("   ", &mut host).unwrap_err();
    assert!(matches!(err, ShellError::EmptyInput));
    assert!(reg.is_empty());
    assert_eq!(reg.status(), "Ready");
}

#[test]
fn search_terms_open_search_tab() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let id = reg.create_tab("rust borrow checker", &mut host).unwrap();
    assert_eq!(
        reg.get(&id).unwrap().url(),
        "https://www.google.com/search?q=rust%20borrow%20checker"
    );
}

#[test]
fn tabs_keep_insertion_order() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let a = created(&mut reg, &mut host, "https://a.com");
    let b = created(&mut reg, &mut host, "https://b.com");
    let c = created(&mut reg, &mut host, "https://c.com");
    let order: Vec<_> = reg.tabs().iter().map(|t| t.id().clone()).collect();
    assert_eq!(order, vec![a, b, c.clone()]);
    assert_eq!(reg.active_tab().unwrap().id(), &c);
}

// -- close ---------------------------------------------------------------

#[test]
fn close_active_reassigns_to_last_remaining() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let a = created(&mut reg, &mut host, "https://a.com");
    let b = created(&mut reg, &mut host, "https://b.com");
    let c = created(&mut reg, &mut host, "https://c.com");

    assert!(reg.close_tab(&c, &mut host));
    assert_eq!(reg.active_tab_id(), Some(&b));
    assert_active_is_live(&reg);

    reg.focus_tab(&a, &mut host).unwrap();
    assert!(reg.close_tab(&a, &mut host));
    assert_eq!(reg.active_tab_id(), Some(&b));
}

#[test]
fn close_inactive_keeps_active() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let a = created(&mut reg, &mut host, "https://a.com");
    let b = created(&mut reg, &mut host, "https://b.com");
    reg.close_tab(&a, &mut host);
    assert_eq!(reg.active_tab_id(), Some(&b));
}

#[test]
fn close_last_tab_clears_active() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let a = created(&mut reg, &mut host, "https://a.com");
    reg.close_tab(&a, &mut host);
    assert!(reg.is_empty());
    assert_eq!(reg.active_tab_id(), None);
    assert!(host.open.is_empty());
}

#[test]
fn close_unknown_is_noop() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    created(&mut reg, &mut host, "https://a.com");
    let calls = host.calls.len();
    assert!(!reg.close_tab(&SurfaceId::new("tab_0_99"), &mut host));
    assert_eq!(reg.len(), 1);
    assert_eq!(host.calls.len(), calls);
}

#[test]
fn close_failure_still_removes() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let a = created(&mut reg, &mut host, "https://a.com");
    host.fail_close = true;
    assert!(reg.close_tab(&a, &mut host));
    assert!(reg.is_empty());
    assert!(reg.status().contains("window close failed"));
}

#[test]
fn close_all_continues_past_failures() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    for url in ["https://a.com", "https://b.com", "https://c.com"] {
        created(&mut reg, &mut host, url);
    }
    host.fail_close = true;

    let summary = reg.close_all_tabs(&mut host);
    assert_eq!(summary.closed, 3);
    assert_eq!(summary.failures.len(), 3);
    assert_eq!(host.close_count(), 3);
    assert!(reg.is_empty());
    assert_eq!(reg.active_tab_id(), None);
    assert_eq!(reg.status(), "All tabs closed (3 windows failed to close)");
}

#[test]
fn close_all_on_empty_registry() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let summary = reg.close_all_tabs(&mut host);
    assert_eq!(summary.closed, 0);
    assert!(summary.failures.is_empty());
    assert_eq!(reg.status(), "All tabs closed");
}

// -- focus ---------------------------------------------------------------

#[test]
fn focus_sets_active() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let a = created(&mut reg, &mut host, "https://a.com");
    created(&mut reg, &mut host, "https://b.com");

    assert!(reg.focus_tab(&a, &mut host).unwrap());
    assert_eq!(reg.active_tab_id(), Some(&a));
    assert_eq!(reg.status(), "Focused on tab: https://a.com");
}

#[test]
fn focus_unknown_returns_false() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    assert!(!reg.focus_tab(&SurfaceId::new("nope"), &mut host).unwrap());
    assert!(host.calls.is_empty());
}

#[test]
fn focus_vanished_surface_removes_tab() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let a = created(&mut reg, &mut host, "https://a.com");
    let b = created(&mut reg, &mut host, "https://b.com");
    host.vanish(reg.get(&a).unwrap().surface());

    assert!(!reg.focus_tab(&a, &mut host).unwrap());
    assert!(!reg.contains(&a));
    assert_eq!(reg.active_tab_id(), Some(&b));
}

#[test]
fn focus_error_keeps_tab() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let a = created(&mut reg, &mut host, "https://a.com");
    let b = created(&mut reg, &mut host, "https://b.com");
    host.fail_focus = true;

    let err = reg.focus_tab(&a, &mut host).unwrap_err();
    assert!(matches!(err, ShellError::SurfaceOperation(_)));
    assert!(reg.contains(&a));
    assert_eq!(reg.active_tab_id(), Some(&b));
}

#[test]
fn focus_while_creating_skips_host() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let a = reg.create_tab("https://a.com", &mut host).unwrap();
    created(&mut reg, &mut host, "https://b.com");
    let calls = host.calls.len();

    assert!(reg.focus_tab(&a, &mut host).unwrap());
    assert_eq!(reg.active_tab_id(), Some(&a));
    assert_eq!(host.calls.len(), calls);
}

// -- surface events ------------------------------------------------------

#[test]
fn loaded_event_updates_title_and_history() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let id = created(&mut reg, &mut host, "github.com");

    reg.handle_surface_event(
        &SurfaceEvent::Loaded {
            id: id.clone(),
            url: Some("https://github.com/".into()),
            title: Some("GitHub".into()),
        },
        &mut host,
    );
    let tab = reg.get(&id).unwrap();
    assert_eq!(tab.title(), "GitHub");
    assert_eq!(tab.url(), "https://github.com/");
    assert_eq!(tab.phase(), TabPhase::Loaded);
    assert_eq!(tab.history().len(), 1);
}

#[test]
fn redirected_load_keeps_requested_entry() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let id = created(&mut reg, &mut host, "https://start.com");
    reg.navigate_tab(&id, "http://a.com", &mut host).unwrap();

    reg.handle_surface_event(
        &SurfaceEvent::Loaded {
            id: id.clone(),
            url: Some("https://www.a.com/".into()),
            title: None,
        },
        &mut host,
    );
    let tab = reg.get(&id).unwrap();
    assert_eq!(tab.url(), "https://www.a.com/");
    assert_eq!(tab.history().entries(), &["https://start.com", "http://a.com"]);

    // The redirect target then confirmed by a url change is not a new entry.
    reg.handle_surface_event(
        &SurfaceEvent::UrlChanged {
            id: id.clone(),
            url: "https://www.a.com/".into(),
        },
        &mut host,
    );
    assert_eq!(reg.get(&id).unwrap().history().len(), 2);

    assert_eq!(
        reg.tab_go_back(&id, &mut host).unwrap().as_deref(),
        Some("https://start.com")
    );
    assert_eq!(reg.get(&id).unwrap().url(), "https://start.com");
}

#[test]
fn title_and_url_change_events() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let id = created(&mut reg, &mut host, "https://a.com");

    reg.handle_surface_event(
        &SurfaceEvent::TitleChanged {
            id: id.clone(),
            title: "A".into(),
        },
        &mut host,
    );
    reg.handle_surface_event(
        &SurfaceEvent::UrlChanged {
            id: id.clone(),
            url: "https://a.com/about".into(),
        },
        &mut host,
    );
    let tab = reg.get(&id).unwrap();
    assert_eq!(tab.title(), "A");
    assert_eq!(tab.url(), "https://a.com/about");
    assert!(tab.history().can_go_back());
}

#[test]
fn close_requested_removes_tab() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let a = created(&mut reg, &mut host, "https://a.com");
    let b = created(&mut reg, &mut host, "https://b.com");

    assert!(reg.handle_surface_event(&SurfaceEvent::CloseRequested { id: b.clone() }, &mut host));
    assert!(!reg.contains(&b));
    assert_eq!(reg.active_tab_id(), Some(&a));
    assert_eq!(host.calls.last(), Some(&HostCall::Close(format!("webview_{b}"))));
}

#[test]
fn close_requested_for_unknown_is_ignored() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    created(&mut reg, &mut host, "https://a.com");
    let calls = host.calls.len();
    let applied = reg.handle_surface_event(
        &SurfaceEvent::CloseRequested {
            id: SurfaceId::new("tab_0_42"),
        },
        &mut host,
    );
    assert!(!applied);
    assert_eq!(reg.len(), 1);
    assert_eq!(host.calls.len(), calls);
}

#[test]
fn closed_event_removes_tab() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let a = created(&mut reg, &mut host, "https://a.com");
    host.vanish(reg.get(&a).unwrap().surface());
    reg.handle_surface_event(&SurfaceEvent::Closed { id: a.clone() }, &mut host);
    assert!(reg.is_empty());
    assert_eq!(reg.pending_teardown(), 0);
}

#[test]
fn creation_failed_event_removes_tab() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let a = created(&mut reg, &mut host, "https://a.com");
    let b = reg.create_tab("https://b.com", &mut host).unwrap();
    host.vanish(reg.get(&b).unwrap().surface());

    reg.handle_surface_event(
        &SurfaceEvent::CreationFailed {
            id: b.clone(),
            reason: "webview crashed".into(),
        },
        &mut host,
    );
    assert!(!reg.contains(&b));
    assert_eq!(reg.active_tab_id(), Some(&a));
    assert_eq!(reg.pending_teardown(), 0);
    assert_eq!(reg.status(), "Failed to create tab: webview crashed");
}

#[test]
fn late_created_event_closes_orphaned_surface() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let id = reg.create_tab("https://a.com", &mut host).unwrap();
    let handle = reg.get(&id).unwrap().surface().clone();

    // The host has not materialised the window yet.
    host.vanish(&handle);
    assert!(reg.close_tab(&id, &mut host));
    assert!(reg.is_empty());
    assert_eq!(reg.pending_teardown(), 1);

    // The window shows up after all.
    host.open.insert(handle.label().to_string());
    assert!(reg.handle_surface_event(&SurfaceEvent::Created { id: id.clone() }, &mut host));
    assert_eq!(reg.pending_teardown(), 0);
    assert!(host.open.is_empty());
    assert!(reg.is_empty());
}

#[test]
fn orphan_forgotten_on_creation_failure() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let id = reg.create_tab("https://a.com", &mut host).unwrap();
    host.vanish(reg.get(&id).unwrap().surface());
    reg.close_tab(&id, &mut host);
    let closes = host.close_count();

    reg.handle_surface_event(
        &SurfaceEvent::CreationFailed {
            id: id.clone(),
            reason: "gone".into(),
        },
        &mut host,
    );
    assert_eq!(reg.pending_teardown(), 0);
    assert_eq!(host.close_count(), closes);
}

#[test]
fn events_for_closed_tab_are_ignored() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let a = created(&mut reg, &mut host, "https://a.com");
    reg.close_tab(&a, &mut host);
    let applied = reg.handle_surface_event(
        &SurfaceEvent::TitleChanged {
            id: a.clone(),
            title: "late".into(),
        },
        &mut host,
    );
    assert!(!applied);
}

// -- requests issued before creation completes --------------------------

#[test]
fn navigate_before_created_keeps_loading() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let id = reg.create_tab("https://a.com", &mut host).unwrap();
    reg.navigate_tab(&id, "https://b.com", &mut host).unwrap();

    assert!(reg.handle_surface_event(&SurfaceEvent::Created { id: id.clone() }, &mut host));
    let tab = reg.get(&id).unwrap();
    assert!(tab.surface_ready());
    assert_eq!(tab.phase(), TabPhase::Loading);
}

#[test]
fn navigate_before_created_then_close_orphans_surface() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let id = reg.create_tab("https://a.com", &mut host).unwrap();
    let handle = reg.get(&id).unwrap().surface().clone();
    reg.navigate_tab(&id, "https://b.com", &mut host).unwrap();

    host.vanish(&handle);
    assert!(reg.close_tab(&id, &mut host));
    assert_eq!(reg.pending_teardown(), 1);

    host.open.insert(handle.label().to_string());
    assert!(reg.handle_surface_event(&SurfaceEvent::Created { id: id.clone() }, &mut host));
    assert_eq!(reg.pending_teardown(), 0);
    assert!(host.open.is_empty());
}

#[test]
fn reload_before_created_then_close_orphans_surface() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let id = reg.create_tab("https://a.com", &mut host).unwrap();
    reg.reload_tab(&id, &mut host).unwrap();

    host.vanish(reg.get(&id).unwrap().surface());
    reg.close_tab(&id, &mut host);
    assert_eq!(reg.pending_teardown(), 1);
}

#[test]
fn focus_before_created_then_close_orphans_surface() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let id = reg.create_tab("https://a.com", &mut host).unwrap();
    created(&mut reg, &mut host, "https://b.com");
    assert!(reg.focus_tab(&id, &mut host).unwrap());

    host.vanish(reg.get(&id).unwrap().surface());
    reg.close_tab(&id, &mut host);
    assert_eq!(reg.pending_teardown(), 1);
}

#[test]
fn close_all_before_created_orphans_surface() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let id = reg.create_tab("https://a.com", &mut host).unwrap();
    reg.navigate_tab(&id, "https://b.com", &mut host).unwrap();

    host.vanish(reg.get(&id).unwrap().surface());
    reg.close_all_tabs(&mut host);
    assert_eq!(reg.pending_teardown(), 1);
}

#[test]
fn loaded_before_created_marks_ready() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let id = reg.create_tab("https://a.com", &mut host).unwrap();

    reg.handle_surface_event(
        &SurfaceEvent::Loaded {
            id: id.clone(),
            url: None,
            title: Some("A".into()),
        },
        &mut host,
    );
    let tab = reg.get(&id).unwrap();
    assert!(tab.surface_ready());
    assert_eq!(tab.phase(), TabPhase::Loaded);

    reg.navigate_tab(&id, "https://b.com", &mut host).unwrap();
    assert!(!reg.handle_surface_event(&SurfaceEvent::Created { id: id.clone() }, &mut host));
    assert_eq!(reg.get(&id).unwrap().phase(), TabPhase::Loading);

    // A ready surface is closed outright.
    reg.close_tab(&id, &mut host);
    assert_eq!(reg.pending_teardown(), 0);
}

#[test]
fn close_all_retries_orphaned_surfaces() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let id = reg.create_tab("https://a.com", &mut host).unwrap();
    let handle = reg.get(&id).unwrap().surface().clone();
    host.vanish(&handle);
    reg.close_tab(&id, &mut host);
    assert_eq!(reg.pending_teardown(), 1);

    // The window appears but its creation event never arrives.
    host.open.insert(handle.label().to_string());
    created(&mut reg, &mut host, "https://b.com");
    reg.close_all_tabs(&mut host);
    assert_eq!(reg.pending_teardown(), 0);
    assert!(host.open.is_empty());
}

#[test]
fn close_all_keeps_orphans_the_host_cannot_close() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let id = reg.create_tab("https://a.com", &mut host).unwrap();
    host.vanish(reg.get(&id).unwrap().surface());
    reg.close_tab(&id, &mut host);

    reg.close_all_tabs(&mut host);
    assert_eq!(reg.pending_teardown(), 1);

    reg.handle_surface_event(
        &SurfaceEvent::CreationFailed {
            id: id.clone(),
            reason: "gone".into(),
        },
        &mut host,
    );
    assert_eq!(reg.pending_teardown(), 0);
}

// -- per-tab navigation --------------------------------------------------

#[test]
fn navigate_tab_pushes_history() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let id = created(&mut reg, &mut host, "https://a.com");

    let url = reg.navigate_tab(&id, "b.com", &mut host).unwrap();
    assert_eq!(url.as_deref(), Some("https://b.com"));
    let tab = reg.get(&id).unwrap();
    assert_eq!(tab.url(), "https://b.com");
    assert_eq!(tab.phase(), TabPhase::Loading);
    assert_eq!(tab.history().entries(), &["https://a.com", "https://b.com"]);
    assert_eq!(host.last_loaded(), Some("https://b.com"));
}

#[test]
fn navigate_unknown_tab_is_none() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let out = reg
        .navigate_tab(&SurfaceId::new("ghost"), "https://a.com", &mut host)
        .unwrap();
    assert_eq!(out, None);
    assert!(host.calls.is_empty());
}

#[test]
fn failed_tab_load_keeps_history() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let id = created(&mut reg, &mut host, "https://a.com");
    host.fail_load = true;

    let err = reg.navigate_tab(&id, "https://b.com", &mut host).unwrap_err();
    assert!(matches!(err, ShellError::SurfaceOperation(_)));
    let tab = reg.get(&id).unwrap();
    assert_eq!(tab.url(), "https://a.com");
    assert_eq!(tab.history().len(), 1);
    assert_eq!(tab.phase(), TabPhase::Loaded);
}

#[test]
fn tab_back_and_forward() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let id = created(&mut reg, &mut host, "https://a.com");
    reg.navigate_tab(&id, "https://b.com", &mut host).unwrap();

    assert_eq!(
        reg.tab_go_back(&id, &mut host).unwrap().as_deref(),
        Some("https://a.com")
    );
    assert_eq!(reg.get(&id).unwrap().url(), "https://a.com");
    assert_eq!(reg.tab_go_back(&id, &mut host).unwrap(), None);

    assert_eq!(
        reg.tab_go_forward(&id, &mut host).unwrap().as_deref(),
        Some("https://b.com")
    );
    assert_eq!(reg.get(&id).unwrap().url(), "https://b.com");
    assert_eq!(reg.tab_go_forward(&id, &mut host).unwrap(), None);
}

#[test]
fn reload_tab_reloads_current() {
    let mut reg = registry();
    let mut host = MockSurfaceHost::new();
    let id = created(&mut reg, &mut host, "https://a.com");
    assert!(reg.reload_tab(&id, &mut host).unwrap());
    assert_eq!(host.last_loaded(), Some("https://a.com"));
    assert_eq!(reg.get(&id).unwrap().phase(), TabPhase::Loading);
    assert_eq!(reg.get(&id).unwrap().history().len(), 1);
}

// -- properties ----------------------------------------------------------

proptest! {
    #[test]
    fn ids_are_distinct(n in 1usize..40) {
        let mut reg = registry();
        let mut host = MockSurfaceHost::new();
        let ids: Vec<_> = (0..n)
            .map(|i| reg.create_tab(&format!("https://site{i}.com"), &mut host).unwrap())
            .collect();
        let distinct: HashSet<_> = ids.iter().collect();
        prop_assert_eq!(distinct.len(), n);
        prop_assert_eq!(reg.len(), n);
        prop_assert_eq!(reg.active_tab_id(), ids.last());
    }

    #[test]
    fn active_always_live(ops in prop::collection::vec((0u8..3, 0usize..8), 1..60)) {
        let mut reg = registry();
        let mut host = MockSurfaceHost::new();
        for (op, pick) in ops {
            let target = reg
                .tabs()
                .get(pick % reg.len().max(1))
                .map(|t| t.id().clone());
            match (op, target) {
                (0, _) => {
                    reg.create_tab(&format!("https://s{pick}.com"), &mut host).unwrap();
                },
                (1, Some(id)) => {
                    reg.close_tab(&id, &mut host);
                },
                (2, Some(id)) => {
                    reg.focus_tab(&id, &mut host).unwrap();
                },
                _ => {},
            }
            assert_active_is_live(&reg);
            prop_assert_eq!(reg.active_tab_id().is_none(), reg.is_empty());
        }
    }
}
