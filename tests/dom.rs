//! Browser tests for the behavior units. Run with
//! `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use iksh_frontend::behaviors::contact_form::{ContactForm, SubmitStatus, SENDING_LABEL, SUCCESS_TEXT};
use iksh_frontend::behaviors::contact_popup::ContactPopup;
use iksh_frontend::behaviors::cursor_popup::{click_destination, CursorPopup};
use iksh_frontend::behaviors::date_display::{fill_date_slots, DateStamp};
use iksh_frontend::behaviors::magnifier::{clone_offset, Magnifier};
use iksh_frontend::behaviors::navigation::Navigation;
use iksh_frontend::behaviors::page_lifecycle::when_dom_ready;
use iksh_frontend::behaviors::pointer_effect::PointerEffect;
use iksh_frontend::behaviors::reveal::{reveal, stage_hero, VISIBLE_CLASS};
use iksh_frontend::behaviors::service_selector::{activate, ServiceSelector, ACTIVE_CLASS};
use iksh_frontend::error::SubmitError;
use iksh_frontend::page::PageIdentity;
use iksh_frontend::utils::debounce::debounce;
use iksh_frontend::utils::dom::{client_point, closest_matching, px, query_all};
use iksh_frontend::utils::fade::Fader;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{
    Document, Element, Event, EventInit, HtmlElement, HtmlInputElement, MouseEvent, MouseEventInit, Window,
};

wasm_bindgen_test_configure!(run_in_browser);

fn window() -> Window {
    web_sys::window().expect("window")
}

fn document() -> Document {
    window().document().expect("document")
}

/// Mounts `markup` into a fresh container that is removed on drop.
struct Fixture(Element);

impl Fixture {
    fn new(markup: &str) -> Self {
        let doc = document();
        let root = doc.create_element("div").unwrap();
        root.set_inner_html(markup);
        doc.body().unwrap().append_child(&root).unwrap();
        Fixture(root)
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        self.0.remove();
    }
}

fn by_id(id: &str) -> HtmlElement {
    document().get_element_by_id(id).unwrap().dyn_into().unwrap()
}

fn has(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

const NAV_MARKUP: &str = r##"
    <nav id="navbar" class="navbar">
        <button id="mobile-toggle">menu</button>
        <ul id="nav-links"><li><a id="services-link" href="#services">Services</a></li></ul>
    </nav>
    <p id="outside">elsewhere</p>
    <section id="services" style="margin-top: 3000px">services</section>
"##;

fn menu_flags() -> (bool, bool, bool) {
    (
        has(&by_id("nav-links"), "active"),
        has(&by_id("mobile-toggle"), "active"),
        has(&by_id("navbar"), "menu-open"),
    )
}

#[wasm_bindgen_test]
fn menu_toggle_parity() {
    let _fixture = Fixture::new(NAV_MARKUP);
    let nav = Navigation::attach(&window(), &document()).unwrap();
    let toggle = by_id("mobile-toggle");

    toggle.click();
    assert_eq!(menu_flags(), (true, true, true));
    assert!(nav.is_menu_open());

    toggle.click();
    assert_eq!(menu_flags(), (false, false, false));

    toggle.click();
    toggle.click();
    toggle.click();
    assert_eq!(menu_flags(), (true, true, true));
}

#[wasm_bindgen_test]
fn outside_click_closes_open_menu() {
    let _fixture = Fixture::new(NAV_MARKUP);
    let nav = Navigation::attach(&window(), &document()).unwrap();

    by_id("mobile-toggle").click();
    assert!(nav.is_menu_open());

    by_id("outside").click();
    assert_eq!(menu_flags(), (false, false, false));

    // Already closed: nothing changes.
    by_id("outside").click();
    assert_eq!(menu_flags(), (false, false, false));
}

#[wasm_bindgen_test]
fn click_inside_navbar_keeps_menu_open() {
    let _fixture = Fixture::new(NAV_MARKUP);
    let nav = Navigation::attach(&window(), &document()).unwrap();

    by_id("mobile-toggle").click();
    by_id("navbar").click();
    assert!(nav.is_menu_open());
}

#[wasm_bindgen_test]
fn anchor_click_cancels_navigation_and_closes_menu() {
    let _fixture = Fixture::new(NAV_MARKUP);
    let nav = Navigation::attach(&window(), &document()).unwrap();
    by_id("mobile-toggle").click();

    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let click = MouseEvent::new_with_mouse_event_init_dict("click", &init).unwrap();
    let not_cancelled = by_id("services-link").dispatch_event(&click).unwrap();

    assert!(!not_cancelled);
    assert!(click.default_prevented());
    assert!(!nav.is_menu_open());
    assert_eq!(menu_flags(), (false, false, false));
}

#[wasm_bindgen_test]
fn navigation_needs_navbar() {
    let _fixture = Fixture::new("<div id=\"nav-links\"></div>");
    assert!(Navigation::attach(&window(), &document()).is_none());
}

#[wasm_bindgen_test]
async fn scrolled_flag_follows_settled_offset() {
    let _fixture = Fixture::new(&format!("{}<div style=\"height: 5000px\"></div>", NAV_MARKUP));
    let win = window();
    let nav = Navigation::attach(&win, &document()).unwrap();

    win.scroll_to_with_x_and_y(0.0, 400.0);
    TimeoutFuture::new(100).await;
    assert!(has(&by_id("navbar"), "scrolled"));
    assert_eq!(nav.last_scroll_top(), 400.0);

    win.scroll_to_with_x_and_y(0.0, 0.0);
    TimeoutFuture::new(100).await;
    assert!(!has(&by_id("navbar"), "scrolled"));
}

#[wasm_bindgen_test]
fn reveal_is_one_way() {
    let _fixture = Fixture::new(r#"<div id="card" class="animate-in"></div>"#);
    let card = by_id("card");
    reveal(&card);
    reveal(&card);
    assert!(has(&card, VISIBLE_CLASS));
    assert_eq!(card.class_name(), "animate-in visible");
}

#[wasm_bindgen_test]
async fn hero_elements_reveal_in_order() {
    let _fixture = Fixture::new(
        r#"<section class="hero">
            <h1 id="h0" class="animate-in"></h1>
            <p id="h1" class="animate-in"></p>
            <a id="h2" class="animate-in"></a>
        </section>"#,
    );
    stage_hero(&document());

    TimeoutFuture::new(50).await;
    assert!(has(&by_id("h0"), VISIBLE_CLASS));
    assert!(!has(&by_id("h2"), VISIBLE_CLASS));

    TimeoutFuture::new(250).await;
    for id in ["h0", "h1", "h2"] {
        assert!(has(&by_id(id), VISIBLE_CLASS), "{id} not revealed");
    }
}

#[wasm_bindgen_test]
fn service_activation_is_exclusive() {
    let _fixture = Fixture::new(
        r#"<div class="service-scroll-container">
            <div class="service-item active"></div>
            <div class="service-item"></div>
            <div class="service-item"></div>
        </div>"#,
    );
    let items = query_all(&document(), ".service-item");

    activate(&items, &items[1]);
    activate(&items, &items[2]);

    let active: Vec<bool> = items.iter().map(|i| has(i, ACTIVE_CLASS)).collect();
    assert_eq!(active, vec![false, false, true]);
}

#[wasm_bindgen_test]
fn date_fills_present_slots_only() {
    let _fixture = Fixture::new(r#"<span id="heroDate"></span><span id="navbarYear"></span>"#);
    let stamp = DateStamp { day: "07".into(), year: "24".into() };

    assert_eq!(fill_date_slots(&document(), &stamp), 2);
    assert_eq!(by_id("heroDate").text_content().unwrap(), "07");
    assert_eq!(by_id("navbarYear").text_content().unwrap(), "24");
}

#[wasm_bindgen_test]
fn contact_popup_opens_and_closes() {
    let _fixture = Fixture::new(
        r#"<button class="about-message-button" id="msg">Message us</button>
        <a id="navContactLink" href="contact.html">Contact</a>
        <div id="contactOverlay" class="hidden"></div>
        <div id="contactCard" class="hidden"><button id="closeContact">x</button></div>"#,
    );
    let popup = ContactPopup::attach(&document()).unwrap();

    by_id("msg").click();
    assert!(popup.is_open());
    assert!(!has(&by_id("contactOverlay"), "hidden"));

    by_id("contactOverlay").click();
    assert!(!popup.is_open());
    assert!(has(&by_id("contactOverlay"), "hidden"));

    by_id("navContactLink").click();
    assert!(popup.is_open());
    by_id("closeContact").click();
    assert!(!popup.is_open());
}

#[wasm_bindgen_test]
fn contact_popup_requires_card_and_close() {
    let _fixture = Fixture::new(r#"<div id="contactCard"></div>"#);
    assert!(ContactPopup::attach(&document()).is_none());
}

const FORM_MARKUP: &str = r#"
    <form id="contactForm">
        <input id="name" name="name" value="Ada">
        <button type="submit" class="btn-submit">Send Message</button>
    </form>
    <div id="formMessage" style="display: none"></div>
"#;

#[wasm_bindgen_test]
fn successful_submission_clears_form() {
    let _fixture = Fixture::new(FORM_MARKUP);
    let form = ContactForm::attach(&document()).unwrap();
    assert_eq!(form.status(), SubmitStatus::Idle);

    let input: HtmlInputElement = by_id("name").dyn_into().unwrap();
    input.set_value("Grace");
    form.complete(Ok(()));

    let message = by_id("formMessage");
    assert_eq!(form.status(), SubmitStatus::Success);
    assert_eq!(message.text_content().unwrap(), SUCCESS_TEXT);
    assert!(has(&message, "success"));
    assert_eq!(message.style().get_property_value("display").unwrap(), "block");
    assert_eq!(input.value(), "Ada");
}

#[wasm_bindgen_test]
fn rejected_submission_reenables_immediately() {
    let _fixture = Fixture::new(FORM_MARKUP);
    let form = ContactForm::attach(&document()).unwrap();
    let button = document().query_selector(".btn-submit").unwrap().unwrap();
    button.set_attribute("disabled", "").unwrap();

    form.complete(Err(SubmitError::Rejected { message: Some("X".into()) }));

    let message = by_id("formMessage");
    assert_eq!(form.status(), SubmitStatus::Error);
    assert!(has(&message, "error"));
    assert!(message.text_content().unwrap().contains("Iksh.AI.Tech@gmail.com"));
    assert!(!button.has_attribute("disabled"));
    assert_eq!(button.text_content().unwrap(), "Send Message");
}

#[wasm_bindgen_test]
fn transport_failure_shows_same_error() {
    let _fixture = Fixture::new(FORM_MARKUP);
    let form = ContactForm::attach(&document()).unwrap();

    form.complete(Err(SubmitError::Transport("offline".into())));

    let message = by_id("formMessage");
    assert!(has(&message, "error"));
    assert!(message.text_content().unwrap().contains("Iksh.AI.Tech@gmail.com"));
}

#[wasm_bindgen_test]
fn magnifier_centres_hovered_point() {
    let _fixture = Fixture::new(
        r#"<section class="about-hero" style="position: absolute; left: 100px; top: 100px;">
            <p id="story" style="margin: 0; width: 300px;">We build <em id="word">useful</em> AI.</p>
        </section>"#,
    );
    let magnifier = Magnifier::attach(&window(), &document(), PageIdentity::About).unwrap();
    assert!(magnifier.lens_element().is_none());

    let rect = by_id("story").get_bounding_client_rect();
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_client_x(rect.left() as i32 + 10);
    init.set_client_y(rect.top() as i32 + 5);
    let event = MouseEvent::new_with_mouse_event_init_dict("mousemove", &init).unwrap();
    by_id("word").dispatch_event(&event).unwrap();

    let lens = magnifier.lens_element().unwrap();
    let clone: HtmlElement = lens.first_element_child().unwrap().dyn_into().unwrap();
    let (left, top) = clone_offset(
        (rect.left() as i32 + 10) as f64 - rect.left(),
        (rect.top() as i32 + 5) as f64 - rect.top(),
    );
    assert_eq!(clone.id(), "story");
    assert_eq!(clone.style().get_property_value("left").unwrap(), px(left));
    assert_eq!(clone.style().get_property_value("top").unwrap(), px(top));
    assert_eq!(clone.style().get_property_value("transform").unwrap(), "scale(2)");
    lens.remove();
}

#[wasm_bindgen_test]
fn magnifier_off_other_pages() {
    let _fixture = Fixture::new(r#"<section class="about-hero"><p>text</p></section>"#);
    assert!(Magnifier::attach(&window(), &document(), PageIdentity::Home).is_none());
}

#[wasm_bindgen_test]
fn closest_stops_at_boundary() {
    let _fixture = Fixture::new(
        r#"<div id="outer" class="card"><div id="boundary"><span id="leaf"></span></div></div>"#,
    );
    let leaf: Element = by_id("leaf").into();
    let boundary: Element = by_id("boundary").into();

    assert_eq!(closest_matching(&leaf, ".card", None).unwrap().id(), "outer");
    assert!(closest_matching(&leaf, ".card", Some(&boundary)).is_none());
    assert!(closest_matching(&leaf, "[[bad", None).is_none());
}

#[wasm_bindgen_test]
async fn debounce_keeps_last_call() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let debounced = debounce(move |n: u32| sink.borrow_mut().push(n), 20);

    debounced(1);
    debounced(2);
    debounced(3);
    assert!(seen.borrow().is_empty());

    TimeoutFuture::new(60).await;
    assert_eq!(*seen.borrow(), vec![3]);
}

fn display_of(element: &HtmlElement) -> String {
    element.style().get_property_value("display").unwrap()
}

fn pointer_move(target: &HtmlElement, x: i32, y: i32) {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_client_x(x);
    init.set_client_y(y);
    let event = MouseEvent::new_with_mouse_event_init_dict("mousemove", &init).unwrap();
    target.dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
fn dom_ready_callback_runs_on_parsed_document() {
    let ran = Rc::new(RefCell::new(false));
    let flag = ran.clone();
    when_dom_ready(&document(), move || *flag.borrow_mut() = true);
    assert!(*ran.borrow());
}

#[wasm_bindgen_test]
async fn fade_out_hides_after_delay() {
    let _fixture = Fixture::new(r#"<div id="lens"></div>"#);
    let fader = Fader::new(by_id("lens"));
    fader.show("block");
    fader.fade_out();
    assert_eq!(by_id("lens").style().get_property_value("opacity").unwrap(), "0");

    TimeoutFuture::new(250).await;
    assert_eq!(display_of(&by_id("lens")), "none");
}

#[wasm_bindgen_test]
async fn show_after_fade_out_keeps_element_visible() {
    let _fixture = Fixture::new(r#"<div id="lens"></div>"#);
    let fader = Fader::new(by_id("lens"));
    fader.fade_out();
    fader.show("block");

    TimeoutFuture::new(250).await;
    assert_eq!(display_of(&by_id("lens")), "block");
}

#[wasm_bindgen_test]
async fn unconditional_fade_lands_despite_reshow() {
    let _fixture = Fixture::new(r#"<div id="badge"></div>"#);
    let fader = Fader::new(by_id("badge"));
    fader.fade_out_unconditionally();
    fader.show("flex");

    TimeoutFuture::new(250).await;
    assert_eq!(display_of(&by_id("badge")), "none");
}

#[wasm_bindgen_test]
async fn cursor_popup_follows_and_ducks_under_buttons() {
    let _fixture = Fixture::new(
        r#"<p id="blurb">Plain copy</p>
        <div id="cta" role="button"><span id="cta-label">Know more</span></div>"#,
    );
    let popup = CursorPopup::attach(&window(), &document(), PageIdentity::Home).unwrap();

    // Nothing is created until the pointer moves over plain content.
    assert!(popup.popup_element().is_none());
    pointer_move(&by_id("cta-label"), 5, 5);
    assert!(popup.popup_element().is_none());

    pointer_move(&by_id("blurb"), 100, 50);
    let badge = popup.popup_element().unwrap();
    assert!(has(&badge, "connect-popup"));
    assert_eq!(display_of(&badge), "flex");
    assert_eq!(badge.style().get_property_value("left").unwrap(), "130px");
    assert_eq!(badge.style().get_property_value("top").unwrap(), "80px");
    assert_eq!(badge.style().get_property_value("transform").unwrap(), "scale(1)");

    pointer_move(&by_id("cta-label"), 120, 60);
    assert_eq!(badge.style().get_property_value("opacity").unwrap(), "0");
    assert_eq!(badge.style().get_property_value("transform").unwrap(), "scale(0.8)");
    TimeoutFuture::new(250).await;
    assert_eq!(display_of(&badge), "none");

    // Same element on the next move, shown again.
    pointer_move(&by_id("blurb"), 10, 10);
    assert!(popup.popup_element().unwrap().is_same_node(Some(badge.as_ref())));
    assert_eq!(display_of(&badge), "flex");
    badge.remove();
}

#[wasm_bindgen_test]
fn cursor_popup_only_on_home() {
    assert!(CursorPopup::attach(&window(), &document(), PageIdentity::About).is_none());
}

#[wasm_bindgen_test]
fn background_clicks_navigate_but_controls_do_not() {
    let _fixture = Fixture::new(
        r#"<a id="link" href="contact.html"><b id="link-text">Contact</b></a>
        <button id="btn">Go</button>
        <span class="btn" id="fake-btn">Styled</span>
        <div role="button" id="role-btn">Role</div>
        <p id="copy">Copy</p>"#,
    );
    let body: Element = document().body().unwrap().into();
    for id in ["link", "link-text", "btn", "fake-btn", "role-btn"] {
        let target: Element = by_id(id).into();
        assert_eq!(click_destination(Some(&target), Some(&body)), None, "{id}");
    }
    let copy: Element = by_id("copy").into();
    assert_eq!(click_destination(Some(&copy), Some(&body)), Some("about.html"));
    assert_eq!(click_destination(None, Some(&body)), Some("about.html"));
}

const SERVICE_MARKUP: &str = r#"
    <div class="service-scroll-container"
         style="display: flex; width: 300px; overflow-x: auto; white-space: nowrap;">
        <div class="service-item" style="flex: 0 0 240px; height: 40px;">one</div>
        <div class="service-item" style="flex: 0 0 240px; height: 40px;">two</div>
        <div class="service-item" style="flex: 0 0 240px; height: 40px;">three</div>
    </div>
"#;

#[wasm_bindgen_test]
async fn observer_marks_centred_item() {
    let _fixture = Fixture::new(SERVICE_MARKUP);
    let selector = ServiceSelector::attach(&document(), PageIdentity::Other).unwrap();

    TimeoutFuture::new(300).await;
    let items = query_all(&document(), ".service-item");
    let active = selector.active_items();
    assert_eq!(active.len(), 1);
    assert!(active[0].is_same_node(Some(items[0].as_ref())));
}

#[wasm_bindgen_test]
async fn services_page_starts_on_second_item() {
    let _fixture = Fixture::new(SERVICE_MARKUP);
    let selector = ServiceSelector::attach(&document(), PageIdentity::Services).unwrap();

    TimeoutFuture::new(1500).await;
    let items = query_all(&document(), ".service-item");
    let active = selector.active_items();
    assert_eq!(active.len(), 1);
    assert!(active[0].is_same_node(Some(items[1].as_ref())));
}

#[wasm_bindgen_test]
fn service_selector_needs_container() {
    let _fixture = Fixture::new(r#"<div class="service-item"></div>"#);
    assert!(ServiceSelector::attach(&document(), PageIdentity::Services).is_none());
}

#[wasm_bindgen_test]
async fn submit_locks_control_until_relay_answers() {
    let _fixture = Fixture::new(FORM_MARKUP);
    let form = ContactForm::attach_with_endpoint(&document(), "/no-such-relay").unwrap();
    let message = by_id("formMessage");
    message.set_class_name("error");
    message.style().set_property("display", "block").unwrap();

    let init = EventInit::new();
    init.set_cancelable(true);
    let submit = Event::new_with_event_init_dict("submit", &init).unwrap();
    document().get_element_by_id("contactForm").unwrap().dispatch_event(&submit).unwrap();

    let button = document().query_selector(".btn-submit").unwrap().unwrap();
    assert!(submit.default_prevented());
    assert_eq!(form.status(), SubmitStatus::Sending);
    assert_eq!(button.text_content().unwrap(), SENDING_LABEL);
    assert!(button.has_attribute("disabled"));
    assert!(!has(&message, "error"));
    assert_eq!(display_of(&message), "none");

    // The test server has no relay, so the reply cannot be decoded.
    for _ in 0..40 {
        if form.status() != SubmitStatus::Sending {
            break;
        }
        TimeoutFuture::new(50).await;
    }
    assert_eq!(form.status(), SubmitStatus::Error);
    assert!(!button.has_attribute("disabled"));
    assert_eq!(button.text_content().unwrap(), "Send Message");
    assert!(has(&message, "error"));
}

#[wasm_bindgen_test]
fn stopped_pointer_effect_ignores_visibility_changes() {
    let _fixture = Fixture::new(r#"<div class="blob"></div>"#);
    let effect = PointerEffect::attach(&window(), &document()).unwrap();
    assert!(effect.is_running());

    effect.stop();
    document().dispatch_event(&Event::new("visibilitychange").unwrap()).unwrap();
    assert!(!effect.is_running());

    effect.start();
    assert!(effect.is_running());
}

#[wasm_bindgen_test]
fn client_point_keeps_fractional_coordinates() {
    let init = MouseEventInit::new();
    init.set_client_x(12);
    init.set_client_y(34);
    let event = MouseEvent::new_with_mouse_event_init_dict("mousemove", &init).unwrap();
    assert_eq!(client_point(&event), (12.0, 34.0));

    let descriptor = js_sys::Object::new();
    js_sys::Reflect::set(&descriptor, &"value".into(), &JsValue::from_f64(12.75)).unwrap();
    js_sys::Object::define_property(&event, &"clientX".into(), &descriptor);
    assert_eq!(client_point(&event), (12.75, 34.0));
}
