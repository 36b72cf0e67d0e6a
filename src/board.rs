use std::cell::RefCell;
use std::rc::Rc;

use gloo_console::{debug, error, warn};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement};

use crate::api::{self, ApiError};
use crate::dom;

/// How long a signup (and any error) notice stays visible.
pub const SIGNUP_NOTICE_MS: u32 = 5000;
/// How long an unregister success notice stays visible. Shorter than signup's
/// on purpose; the backend UI has always behaved this way.
pub const UNREGISTER_NOTICE_MS: u32 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Success,
    Error,
}

impl Notice {
    fn class(self) -> &'static str {
        match self {
            Notice::Success => "success",
            Notice::Error => "error",
        }
    }
}

/// The one component on the page: holds the elements it bound at startup and
/// rebuilds the card list from the server after every mutation. No globals;
/// event handlers keep it alive through an `Rc`.
pub struct ActivityBoard {
    document: Document,
    activities_list: Element,
    activity_select: Option<HtmlSelectElement>,
    signup_form: Option<HtmlFormElement>,
    message: Option<HtmlElement>,
    // Listeners for the current render pass; dropped (and thus detached from
    // the leaked-closure path) when the next pass rebuilds the list.
    delete_handlers: RefCell<Vec<Closure<dyn FnMut(Event)>>>,
}

impl ActivityBoard {
    /// Looks up the page contract once. `#activities-list` is the only
    /// required element; everything else degrades gracefully.
    pub fn bind(doc: &Document) -> Option<Self> {
        let activities_list = doc.get_element_by_id("activities-list")?;

        let activity_select = doc
            .get_element_by_id("activity")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok());
        let signup_form = doc
            .get_element_by_id("signup-form")
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok());
        if signup_form.is_none() {
            warn!("No signup form found (#signup-form). Signup disabled but activities will still render.");
        }
        let message = doc
            .get_element_by_id("message")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        Some(Self {
            document: doc.clone(),
            activities_list,
            activity_select,
            signup_form,
            message,
            delete_handlers: RefCell::new(Vec::new()),
        })
    }

    /// Wires the signup form. Lives for the page lifetime, so the listener
    /// closure is forgotten rather than tracked.
    pub fn install(self: Rc<Self>) {
        let Some(form) = self.signup_form.clone() else {
            return;
        };
        let board = self;
        let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            let activity = board
                .activity_select
                .as_ref()
                .map(|select| select.value())
                .unwrap_or_default();
            let email = board.email_value();
            let board = Rc::clone(&board);
            spawn_local(async move {
                board.register(activity, email).await;
            });
        });
        form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
            .expect("submit listener");
        on_submit.forget();
    }

    // The email field is read at submit time, not bound at startup, so a form
    // rebuilt by other page code still works.
    fn email_value(&self) -> String {
        self.document
            .get_element_by_id("email")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    }

    /// Re-fetches the collection and rebuilds the card list wholesale.
    pub async fn render_activities(self: Rc<Self>) {
        match api::fetch_activities().await {
            Ok(activities) => {
                debug!(format!("Fetched {} activities", activities.len()));
                self.delete_handlers.borrow_mut().clear();
                self.activities_list.set_inner_html("");

                for (name, activity) in &activities {
                    let card =
                        dom::build_activity_card(&self.document, name, activity, |button, row, participant| {
                            let board = Rc::clone(&self);
                            let activity_name = name.clone();
                            let identifier = participant.delete_identifier();
                            let row = row.clone();
                            let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                                // Must not reach any handler on the card itself.
                                event.stop_propagation();
                                let board = Rc::clone(&board);
                                let activity_name = activity_name.clone();
                                let identifier = identifier.clone();
                                let row = row.clone();
                                spawn_local(async move {
                                    board.unregister(activity_name, identifier, row).await;
                                });
                            });
                            button
                                .add_event_listener_with_callback(
                                    "click",
                                    on_click.as_ref().unchecked_ref(),
                                )
                                .expect("click listener");
                            self.delete_handlers.borrow_mut().push(on_click);
                        });
                    dom::append(&self.activities_list, &card);

                    if let Some(select) = &self.activity_select {
                        let option = dom::make(&self.document, "option");
                        let _ = option.set_attribute("value", name);
                        option.set_text_content(Some(name));
                        dom::append(select, &option);
                    }
                }
            }
            Err(err) => {
                self.activities_list.set_inner_html(dom::LOAD_FAILURE_HTML);
                error!(format!("Error fetching activities: {err}"));
            }
        }
    }

    async fn register(self: Rc<Self>, activity: String, email: String) {
        match api::signup(&activity, &email).await {
            Ok(message) => {
                self.show_notice(&message, Notice::Success, SIGNUP_NOTICE_MS);
                if let Some(form) = &self.signup_form {
                    form.reset();
                }
                self.render_activities().await;
            }
            Err(ApiError::Rejected(detail)) => {
                self.show_notice(&detail, Notice::Error, SIGNUP_NOTICE_MS);
            }
            Err(err @ ApiError::Network(_)) => {
                self.show_notice(
                    "Failed to sign up. Please try again.",
                    Notice::Error,
                    SIGNUP_NOTICE_MS,
                );
                error!(format!("Error signing up: {err}"));
            }
        }
    }

    async fn unregister(self: Rc<Self>, activity: String, identifier: String, row: Element) {
        match api::unregister(&activity, &identifier).await {
            Ok(message) => {
                // Drop the row right away; the authoritative re-render follows.
                row.remove();
                self.show_notice(&message, Notice::Success, UNREGISTER_NOTICE_MS);
                self.render_activities().await;
            }
            Err(ApiError::Rejected(detail)) => {
                self.show_notice(&detail, Notice::Error, SIGNUP_NOTICE_MS);
            }
            Err(err @ ApiError::Network(_)) => {
                self.show_notice(
                    "Failed to remove participant. Please try again.",
                    Notice::Error,
                    SIGNUP_NOTICE_MS,
                );
                error!(format!("Error removing participant: {err}"));
            }
        }
    }

    /// Shows the shared banner and schedules its hide. Timers are never
    /// cancelled: a newer notice overwrites text and class immediately, and
    /// whichever timeout fires next only toggles visibility.
    pub fn show_notice(&self, text: &str, kind: Notice, hide_after_ms: u32) {
        let Some(banner) = &self.message else {
            return;
        };
        banner.set_text_content(Some(text));
        banner.set_class_name(kind.class());
        let _ = banner.class_list().remove_1("hidden");

        let banner = banner.clone();
        Timeout::new(hide_after_ms, move || {
            let _ = banner.class_list().add_1("hidden");
        })
        .forget();
    }
}
