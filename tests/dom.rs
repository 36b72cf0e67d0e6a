// Browser-side tests for card construction and the board's page contract.
// Run with `wasm-pack test --headless --chrome` (or --firefox).
#![cfg(target_arch = "wasm32")]

use std::rc::Rc;

use activity_board::board::{ActivityBoard, Notice, SIGNUP_NOTICE_MS};
use activity_board::dom::build_activity_card;
use activity_board::model::Activity;
use activity_board::api::signup_url;
use gloo_timers::future::TimeoutFuture;
use serde_json::{json, Value};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use web_sys::{Document, Element};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn reset_body(html: &str) {
    document().body().unwrap().set_inner_html(html);
}

fn chess_club(participants: Value) -> Activity {
    Activity::from_value(&json!({
        "description": "Learn strategies and play tournaments",
        "schedule": "Fridays, 3:30 PM",
        "max_participants": 12,
        "participants": participants,
    }))
}

fn card_for(activity: &Activity) -> Element {
    build_activity_card(&document(), "Chess Club", activity, |_, _, _| {})
}

fn emails(n: usize) -> Value {
    Value::Array((0..n).map(|i| json!(format!("s{i}@mergington.edu"))).collect())
}

#[wasm_bindgen_test]
fn card_shows_title_schedule_and_spots_left() {
    let activity = chess_club(emails(2));
    let card = card_for(&activity);

    let title = card.query_selector("h4").unwrap().unwrap();
    assert_eq!(title.text_content().unwrap(), "Chess Club");

    let text = card.text_content().unwrap();
    assert!(text.contains("Learn strategies and play tournaments"));
    assert!(text.contains("Fridays, 3:30 PM"));
    assert!(text.contains("10 spots left"));
}

#[wasm_bindgen_test]
fn empty_participant_list_renders_placeholder() {
    let card = card_for(&chess_club(json!([])));
    let rows = card.query_selector_all("ul.participants-list li").unwrap();
    assert_eq!(rows.length(), 1);

    let placeholder = card.query_selector("li.muted").unwrap().unwrap();
    assert_eq!(placeholder.text_content().unwrap(), "No participants yet");
    assert!(placeholder.query_selector("button").unwrap().is_none());
}

#[wasm_bindgen_test]
fn ten_participants_all_get_removal_buttons_and_no_summary() {
    let card = card_for(&chess_club(emails(10)));

    let rows = card.query_selector_all("ul.participants-list li").unwrap();
    assert_eq!(rows.length(), 10);
    let buttons = card.query_selector_all("button.delete-participant").unwrap();
    assert_eq!(buttons.length(), 10);
    assert!(card.query_selector("li.more").unwrap().is_none());
}

#[wasm_bindgen_test]
fn thirteen_participants_collapse_into_more_row() {
    let card = card_for(&chess_club(emails(13)));

    let rows = card.query_selector_all("ul.participants-list li").unwrap();
    assert_eq!(rows.length(), 11);
    let buttons = card.query_selector_all("button.delete-participant").unwrap();
    assert_eq!(buttons.length(), 10);

    let more = card.query_selector("li.more").unwrap().unwrap();
    assert_eq!(more.text_content().unwrap(), "+3 more");
    assert!(more.query_selector("button").unwrap().is_none());
}

#[wasm_bindgen_test]
fn negative_spots_left_rendered_as_is() {
    let activity = Activity::from_value(&json!({
        "max_participants": 1,
        "participants": ["a", "b", "c"],
    }));
    let card = build_activity_card(&document(), "Overbooked", &activity, |_, _, _| {});
    assert!(card.text_content().unwrap().contains("-2 spots left"));
}

#[wasm_bindgen_test]
fn wire_delete_sees_every_visible_participant() {
    let mut seen = Vec::new();
    build_activity_card(&document(), "Chess Club", &chess_club(emails(13)), |button, row, p| {
        assert_eq!(button.tag_name(), "BUTTON");
        assert_eq!(row.tag_name(), "LI");
        seen.push(p.delete_identifier());
    });
    assert_eq!(seen.len(), 10);
    assert_eq!(seen[0], "s0@mergington.edu");
}

#[wasm_bindgen_test]
fn signup_url_escapes_activity_and_email() {
    let url = signup_url("Chess Club", "a+b@x.com");
    assert_eq!(url, "/activities/Chess%20Club/signup?email=a%2Bb%40x.com");
}

#[wasm_bindgen_test]
fn bind_requires_the_activities_list() {
    reset_body(r#"<div id="activity"></div><div id="message"></div>"#);
    assert!(ActivityBoard::bind(&document()).is_none());
}

#[wasm_bindgen_test]
fn bind_tolerates_a_missing_form_and_banner() {
    reset_body(r#"<div id="activities-list"></div>"#);
    let board = ActivityBoard::bind(&document()).unwrap();
    // No banner bound: notices are dropped without panicking.
    board.show_notice("hello", Notice::Success, SIGNUP_NOTICE_MS);
}

#[wasm_bindgen_test]
fn notice_banner_sets_class_and_unhides() {
    reset_body(
        r#"<div id="activities-list"></div><div id="message" class="hidden"></div>"#,
    );
    let board = ActivityBoard::bind(&document()).unwrap();
    board.show_notice("Signed up!", Notice::Success, SIGNUP_NOTICE_MS);

    let banner = document().get_element_by_id("message").unwrap();
    assert_eq!(banner.text_content().unwrap(), "Signed up!");
    assert_eq!(banner.class_name(), "success");
    assert!(!banner.class_list().contains("hidden"));
}

#[wasm_bindgen_test]
fn newer_notice_overwrites_text_and_class_immediately() {
    reset_body(
        r#"<div id="activities-list"></div><div id="message" class="hidden"></div>"#,
    );
    let board = ActivityBoard::bind(&document()).unwrap();
    board.show_notice("Signed up!", Notice::Success, SIGNUP_NOTICE_MS);
    board.show_notice("Already signed up", Notice::Error, SIGNUP_NOTICE_MS);

    let banner = document().get_element_by_id("message").unwrap();
    assert_eq!(banner.text_content().unwrap(), "Already signed up");
    assert_eq!(banner.class_name(), "error");
    assert!(!banner.class_list().contains("hidden"));
}

#[wasm_bindgen_test]
async fn notice_banner_hides_after_its_timeout() {
    reset_body(
        r#"<div id="activities-list"></div><div id="message" class="hidden"></div>"#,
    );
    let board = ActivityBoard::bind(&document()).unwrap();
    board.show_notice("Signed up!", Notice::Success, 10);

    let banner = document().get_element_by_id("message").unwrap();
    assert!(!banner.class_list().contains("hidden"));

    TimeoutFuture::new(50).await;
    assert!(banner.class_list().contains("hidden"));
    // Hiding is class-only; the text is left in place for the next notice
    // to overwrite.
    assert_eq!(banner.text_content().unwrap(), "Signed up!");
}

#[wasm_bindgen_test]
async fn expired_timer_only_hides_and_never_revives_older_text() {
    reset_body(
        r#"<div id="activities-list"></div><div id="message" class="hidden"></div>"#,
    );
    let board = ActivityBoard::bind(&document()).unwrap();
    // The first notice's short timer fires while the second, longer-lived
    // notice is up: the banner goes hidden but keeps the newest text/class.
    board.show_notice("first", Notice::Success, 10);
    board.show_notice("second", Notice::Error, SIGNUP_NOTICE_MS);

    TimeoutFuture::new(50).await;
    let banner = document().get_element_by_id("message").unwrap();
    assert!(banner.class_list().contains("hidden"));
    assert!(banner.class_list().contains("error"));
    assert_eq!(banner.text_content().unwrap(), "second");
}

#[wasm_bindgen_test]
async fn failed_fetch_renders_the_literal_failure_paragraph() {
    reset_body(r#"<div id="activities-list"><p>Loading activities...</p></div>"#);

    // Make window.fetch reject so the request never leaves the page.
    let window = web_sys::window().unwrap();
    let original_fetch =
        js_sys::Reflect::get(&window, &JsValue::from_str("fetch")).unwrap();
    let rejecting =
        js_sys::Function::new_no_args("return Promise.reject(new TypeError('unreachable'));");
    js_sys::Reflect::set(&window, &JsValue::from_str("fetch"), &rejecting).unwrap();

    let board = Rc::new(ActivityBoard::bind(&document()).unwrap());
    board.render_activities().await;

    js_sys::Reflect::set(&window, &JsValue::from_str("fetch"), &original_fetch).unwrap();

    let list = document().get_element_by_id("activities-list").unwrap();
    assert_eq!(
        list.inner_html(),
        "<p>Failed to load activities. Please try again later.</p>"
    );
}
