//! Comprehensive tests for hostdom-dom
//!
//! Document-level behaviour: factory, id cache, selectors, events and
//! drawing contexts working together.

use std::cell::RefCell;
use std::rc::Rc;

use hostdom_canvas::TextMetrics;
use hostdom_dom::{Document, DomError, DomEvent, ElementKind, EventListener, NodeId};

fn with_id(doc: &mut Document, tag: &str, id: &str) -> NodeId {
    let el = doc.create_element(tag).unwrap();
    doc.set_attribute(el, "id", id).unwrap();
    el
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_canvas_img_scenario() {
    let mut doc = Document::new();
    let body = doc.body();
    let canvas = doc.create_element("canvas").unwrap();
    let img = doc.create_element("img").unwrap();

    doc.append_child(body, canvas).unwrap();
    doc.append_child(canvas, img).unwrap();

    assert_eq!(doc.query_selector("img"), Some(img));
    assert_eq!(doc.parent_node(img), Some(canvas));
    assert!(matches!(doc.node(img).unwrap().kind(), ElementKind::Image(_)));
}

#[test]
fn test_stale_cache_after_removal_without_unregister() {
    let mut doc = Document::new();
    let body = doc.body();
    let el = doc.create_element("div").unwrap();
    doc.node_mut(el).unwrap().attributes.insert("id".into(), "x".into());
    doc.append_child(body, el).unwrap();
    doc.register_element_by_id("x", el);

    doc.remove_child(body, el);

    // The cache still answers with the detached element
    assert_eq!(doc.parent_node(el), None);
    assert_eq!(doc.get_element_by_id("x"), Some(el));
    assert_eq!(doc.query_selector("#x"), Some(el));
}

#[test]
fn test_unregister_then_lookup_repopulates() {
    let mut doc = Document::new();
    let body = doc.body();
    let el = with_id(&mut doc, "section", "main");
    doc.append_child(body, el).unwrap();

    assert_eq!(doc.get_element_by_id("main"), Some(el));
    let searches = doc.id_search_count();

    doc.unregister_element_by_id("main");
    assert_eq!(doc.get_element_by_id("main"), Some(el));
    assert_eq!(doc.id_search_count(), searches + 1);

    // Cached again
    assert_eq!(doc.get_element_by_id("main"), Some(el));
    assert_eq!(doc.id_search_count(), searches + 1);
}

#[test]
fn test_unregister_after_removal_misses() {
    let mut doc = Document::new();
    let body = doc.body();
    let el = with_id(&mut doc, "div", "gone");
    doc.append_child(body, el).unwrap();
    assert_eq!(doc.get_element_by_id("gone"), Some(el));

    doc.remove_child(body, el);
    doc.unregister_element_by_id("gone");
    assert_eq!(doc.get_element_by_id("gone"), None);
}

#[test]
fn test_repeated_lookup_does_not_retraverse() {
    let mut doc = Document::new();
    let body = doc.body();
    let el = with_id(&mut doc, "canvas", "gl");
    doc.append_child(body, el).unwrap();

    for _ in 0..10 {
        assert_eq!(doc.get_element_by_id("gl"), Some(el));
    }
    assert_eq!(doc.id_search_count(), 1);
}

#[test]
fn test_missing_id_selectors() {
    let mut doc = Document::new();
    assert_eq!(doc.query_selector("#missing"), None);
    assert!(doc.query_selector_all("#missing").is_empty());
}

#[test]
fn test_query_selector_all_canvas_preorder() {
    let mut doc = Document::new();
    let body = doc.body();
    let c1 = doc.create_element("canvas").unwrap();
    let wrapper = doc.create_element("div").unwrap();
    let c2 = doc.create_element("CANVAS").unwrap();
    let c3 = doc.create_element_ns(None, "canvas").unwrap();
    let nested = doc.create_element("canvas").unwrap();
    let detached = doc.create_element("canvas").unwrap();

    doc.append_child(body, c1).unwrap();
    doc.append_child(c1, nested).unwrap();
    doc.append_child(body, wrapper).unwrap();
    doc.append_child(wrapper, c2).unwrap();
    doc.append_child(body, c3).unwrap();

    let found = doc.query_selector_all("canvas");
    assert_eq!(found, vec![c1, nested, c2, c3]);
    assert!(!found.contains(&detached));
}

#[test]
fn test_query_selector_all_id_form() {
    let mut doc = Document::new();
    let body = doc.body();
    let el = with_id(&mut doc, "video", "v");
    doc.append_child(body, el).unwrap();

    assert_eq!(doc.query_selector_all("#v"), vec![el]);
}

#[test]
fn test_insert_before_order_is_visible_to_selectors() {
    let mut doc = Document::new();
    let body = doc.body();
    let second = doc.create_element("p").unwrap();
    let first = doc.create_element("p").unwrap();
    doc.append_child(body, second).unwrap();
    doc.insert_before(body, first, Some(second)).unwrap();

    assert_eq!(doc.query_selector("p"), Some(first));
    assert_eq!(doc.query_selector_all("p"), vec![first, second]);
}

// ============================================================================
// EVENTS
// ============================================================================

#[test]
fn test_listener_lifecycle_on_element() {
    let mut doc = Document::new();
    let canvas = doc.create_element("canvas").unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let listener = {
        let seen = Rc::clone(&seen);
        EventListener::new(move |e| seen.borrow_mut().push(e.target))
    };

    doc.add_event_listener(canvas, "touchstart", listener.clone()).unwrap();
    doc.dispatch_event(canvas, &DomEvent::new("touchstart", canvas)).unwrap();
    assert_eq!(doc.remove_event_listener(canvas, "touchstart", &listener), Ok(true));
    doc.dispatch_event(canvas, &DomEvent::new("touchstart", canvas)).unwrap();

    assert_eq!(*seen.borrow(), vec![canvas]);
}

#[test]
fn test_events_independent_of_tree_position() {
    let mut doc = Document::new();
    let body = doc.body();
    let div = doc.create_element("div").unwrap();
    let hits = Rc::new(RefCell::new(0));
    {
        let hits = Rc::clone(&hits);
        doc.add_event_listener(div, "ping", EventListener::new(move |_| *hits.borrow_mut() += 1))
            .unwrap();
    }

    doc.dispatch_event(div, &DomEvent::new("ping", div)).unwrap();
    doc.append_child(body, div).unwrap();
    doc.dispatch_event(div, &DomEvent::new("ping", div)).unwrap();
    doc.remove_child(body, div);
    doc.dispatch_event(div, &DomEvent::new("ping", div)).unwrap();

    assert_eq!(*hits.borrow(), 3);
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_absent_node_arguments() {
    let mut doc = Document::new();
    let body = doc.body();

    assert!(matches!(doc.append_child(body, NodeId::NONE), Err(DomError::InvalidArgument(_))));
    assert!(matches!(
        doc.insert_before(body, NodeId::NONE, None),
        Err(DomError::InvalidArgument(_))
    ));
    assert!(doc.child_nodes(body).is_empty());
}

#[test]
fn test_error_messages() {
    assert_eq!(DomError::NotFound(NodeId::NONE).to_string(), "Node not found: #none");
    assert_eq!(
        DomError::InvalidArgument("node to insert is absent").to_string(),
        "Invalid argument: node to insert is absent"
    );
}

// ============================================================================
// DRAWING CONTEXT
// ============================================================================

#[test]
fn test_stub_context_contract() {
    let mut doc = Document::new();
    let canvas = doc.create_element("canvas").unwrap();
    let mut ctx = doc.get_context(canvas, "2d", None, None).unwrap();

    let surface = ctx.as_2d_mut().unwrap();
    surface.fill_text("hello", 0.0, 10.0, None);
    surface.fill_rect(0.0, 0.0, 4.0, 4.0);
    assert_eq!(surface.measure_text("abc"), TextMetrics { width: 18.0, height: 24.0 });
    assert!(surface.get_context_attributes().stencil);
}
