//! A small fixture page with one of everything the subsystem handles.
//! Used by the `refscope` binary and the integration tests.

use page_model::{Document, Element};
use refscope_core_types::{Rect, Viewport};

/// The demo document plus direct handles on the controls the exercise
/// path mutates.
pub struct DemoPage {
    pub document: Document,
    pub search_input: Element,
    pub color_select: Element,
    pub subscribe_checkbox: Element,
    pub volume_range: Element,
    pub comment_area: Element,
    pub offscreen_link: Element,
}

pub fn build_demo_page() -> DemoPage {
    let document = Document::new(Viewport::new(1280.0, 720.0));
    let body = document.body();

    let header = Element::new("header").with_layout(Rect::new(0.0, 0.0, 1280.0, 60.0));
    let nav = Element::new("nav").with_layout(Rect::new(0.0, 0.0, 600.0, 60.0));
    nav.append_child(
        &Element::new("a")
            .with_attribute("href", "/")
            .with_text("Home")
            .with_layout(Rect::new(10.0, 15.0, 80.0, 30.0)),
    );
    nav.append_child(
        &Element::new("a")
            .with_attribute("href", "/docs")
            .with_text("Documentation")
            .with_layout(Rect::new(100.0, 15.0, 140.0, 30.0)),
    );
    header.append_child(&nav);
    body.append_child(&header);

    let heading = Element::new("h1")
        .with_text("Settings")
        .with_layout(Rect::new(20.0, 80.0, 400.0, 40.0));
    body.append_child(&heading);

    let form = Element::new("form")
        .with_attribute("id", "settings-form")
        .with_layout(Rect::new(20.0, 140.0, 600.0, 400.0));

    let search_input = Element::new("input")
        .with_attribute("id", "site-search")
        .with_attribute("type", "text")
        .with_attribute("placeholder", "Search settings")
        .with_layout(Rect::new(30.0, 150.0, 300.0, 32.0));
    form.append_child(&search_input);

    form.append_child(
        &Element::new("label")
            .with_attribute("for", "color")
            .with_text("Favorite color")
            .with_layout(Rect::new(30.0, 200.0, 120.0, 24.0)),
    );
    let color_select = Element::new("select")
        .with_attribute("id", "color")
        .with_child(Element::new("option").with_attribute("value", "r").with_text("Red"))
        .with_child(Element::new("option").with_attribute("value", "g").with_text("Green"))
        .with_child(Element::new("option").with_attribute("value", "b").with_text("Blue"))
        .with_layout(Rect::new(160.0, 200.0, 160.0, 28.0));
    form.append_child(&color_select);

    form.append_child(
        &Element::new("label")
            .with_attribute("for", "subscribe")
            .with_text("Subscribe to updates")
            .with_layout(Rect::new(30.0, 250.0, 180.0, 24.0)),
    );
    let subscribe_checkbox = Element::new("input")
        .with_attribute("id", "subscribe")
        .with_attribute("type", "checkbox")
        .with_layout(Rect::new(220.0, 250.0, 20.0, 20.0));
    form.append_child(&subscribe_checkbox);

    let volume_range = Element::new("input")
        .with_attribute("id", "volume")
        .with_attribute("type", "range")
        .with_attribute("aria-label", "Volume")
        .with_value("5")
        .with_layout(Rect::new(30.0, 300.0, 200.0, 20.0));
    form.append_child(&volume_range);

    let comment_area = Element::new("textarea")
        .with_attribute("id", "comments")
        .with_attribute("placeholder", "Leave a comment")
        .with_layout(Rect::new(30.0, 350.0, 400.0, 120.0));
    form.append_child(&comment_area);

    form.append_child(
        &Element::new("button")
            .with_attribute("type", "submit")
            .with_text("Save changes")
            .with_layout(Rect::new(30.0, 500.0, 140.0, 36.0)),
    );
    body.append_child(&form);

    // Far below the fold; only the "all" filter surfaces it.
    let offscreen_link = Element::new("a")
        .with_attribute("href", "/archive")
        .with_text("Archive")
        .with_layout(Rect::new(20.0, 4000.0, 120.0, 30.0));
    body.append_child(&offscreen_link);

    let footer = Element::new("footer")
        .with_text("refscope demo")
        .with_layout(Rect::new(0.0, 660.0, 1280.0, 60.0));
    body.append_child(&footer);

    DemoPage {
        document,
        search_input,
        color_select,
        subscribe_checkbox,
        volume_range,
        comment_area,
        offscreen_link,
    }
}
