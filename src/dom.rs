use web_sys::{Document, Element};

use crate::model::{visible_split, Activity, Participant};

/// Shown in place of the card list when the fetch fails outright.
pub const LOAD_FAILURE_HTML: &str = "<p>Failed to load activities. Please try again later.</p>";

pub fn make(doc: &Document, tag: &str) -> Element {
    doc.create_element(tag).expect("create_element")
}

pub fn append(parent: &Element, child: &Element) {
    parent.append_child(child).expect("append_child");
}

fn text_el(doc: &Document, tag: &str, text: &str) -> Element {
    let el = make(doc, tag);
    el.set_text_content(Some(text));
    el
}

// "<strong>Schedule:</strong> <span>…</span>" — the label is static markup,
// the value goes in as a text node so server strings can't inject HTML.
fn labelled_line(doc: &Document, label: &str, value: &str) -> Element {
    let line = make(doc, "p");
    line.set_inner_html(&format!("<strong>{label}:</strong> "));
    append(&line, &text_el(doc, "span", value));
    line
}

/// Builds one activity card. `wire_delete` gets each participant's removal
/// button together with its list row, so the caller decides what a click does
/// (the board attaches the unregister handler, tests pass a no-op).
pub fn build_activity_card<F>(
    doc: &Document,
    name: &str,
    activity: &Activity,
    mut wire_delete: F,
) -> Element
where
    F: FnMut(&Element, &Element, &Participant),
{
    let card = make(doc, "div");
    card.set_class_name("activity-card");

    append(&card, &text_el(doc, "h4", name));
    append(&card, &text_el(doc, "p", &activity.description));
    append(&card, &labelled_line(doc, "Schedule", &activity.schedule));
    append(
        &card,
        &labelled_line(
            doc,
            "Availability",
            &format!("{} spots left", activity.spots_left()),
        ),
    );

    let section = make(doc, "div");
    section.set_class_name("participants");
    append(&section, &text_el(doc, "strong", "Participants:"));

    let list = make(doc, "ul");
    list.set_class_name("participants-list");

    if activity.participants.is_empty() {
        let empty = text_el(doc, "li", "No participants yet");
        empty.set_class_name("muted");
        append(&list, &empty);
    } else {
        let (shown, extra) = visible_split(&activity.participants);
        for participant in shown {
            let row = make(doc, "li");
            append(&row, &text_el(doc, "span", &participant.label()));

            let button = text_el(doc, "button", "✕");
            button.set_class_name("delete-participant");
            let _ = button.set_attribute("type", "button");
            let _ = button.set_attribute(
                "aria-label",
                &format!("Unregister {}", participant.label()),
            );
            append(&row, &button);
            wire_delete(&button, &row, participant);

            append(&list, &row);
        }
        if extra > 0 {
            // Summary row only, no removal control.
            let more = text_el(doc, "li", &format!("+{extra} more"));
            more.set_class_name("more");
            append(&list, &more);
        }
    }

    append(&section, &list);
    append(&card, &section);
    card
}
