use std::cell::{Cell, RefCell};

use refscope_core_types::{Point, Rect, Viewport};
use tracing::debug;

use crate::errors::PageError;
use crate::events::Event;
use crate::node::Element;
use crate::style::ComputedStyle;

/// How a scroll-into-view is animated. The locator uses `Instant`
/// because it measures geometry immediately afterwards; the value
/// setter uses `Smooth` because nothing reads layout right after.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// The visible document: one root element plus the page-level state the
/// subsystem reads (viewport, scroll offset, focus, layout flushes).
pub struct Document {
    root: Element,
    body: Element,
    viewport: Cell<Viewport>,
    scroll: Cell<Point>,
    focused: RefCell<Option<Element>>,
    layout_generation: Cell<u64>,
}

impl Document {
    pub fn new(viewport: Viewport) -> Self {
        let root = Element::new("html");
        let body = Element::new("body").with_layout(Rect::new(
            0.0,
            0.0,
            viewport.width,
            viewport.height,
        ));
        root.set_layout(Rect::new(0.0, 0.0, viewport.width, viewport.height));
        root.append_child(&body);
        Self {
            root,
            body,
            viewport: Cell::new(viewport),
            scroll: Cell::new(Point::default()),
            focused: RefCell::new(None),
            layout_generation: Cell::new(0),
        }
    }

    pub fn root(&self) -> Element {
        self.root.clone()
    }

    pub fn body(&self) -> Element {
        self.body.clone()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.viewport.set(viewport);
    }

    pub fn scroll_offset(&self) -> Point {
        self.scroll.get()
    }

    pub fn set_scroll(&self, x: f64, y: f64) {
        self.scroll.set(Point {
            x: x.max(0.0),
            y: y.max(0.0),
        });
    }

    /// Currently visible rectangle, in document coordinates.
    pub fn viewport_rect(&self) -> Rect {
        let scroll = self.scroll.get();
        let viewport = self.viewport.get();
        Rect::new(scroll.x, scroll.y, viewport.width, viewport.height)
    }

    /// True when walking parents from `element` reaches this document's
    /// root. This is the liveness check the registry layers on top of
    /// its weak handles.
    pub fn is_attached(&self, element: &Element) -> bool {
        let mut current = element.clone();
        loop {
            match current.parent() {
                Some(parent) => current = parent,
                None => return current.ptr_eq(&self.root),
            }
        }
    }

    /// Computed style read at the page boundary. Fails for nodes the
    /// host has removed, which the snapshot engine surfaces as a
    /// traversal fault.
    pub fn computed_style(&self, element: &Element) -> Result<ComputedStyle, PageError> {
        if !self.is_attached(element) {
            return Err(PageError::NodeGone { tag: element.tag() });
        }
        Ok(element.style())
    }

    /// Layout box relative to the viewport origin.
    pub fn bounding_client_rect(&self, element: &Element) -> Rect {
        let scroll = self.scroll.get();
        element.layout().translate(-scroll.x, -scroll.y)
    }

    /// Synchronous layout flush. The model has no async layout, but the
    /// generation counter lets callers assert the flush happened before
    /// geometry was read.
    pub fn flush_layout(&self) {
        self.layout_generation.set(self.layout_generation.get() + 1);
    }

    pub fn layout_generation(&self) -> u64 {
        self.layout_generation.get()
    }

    /// Scrolls so the element's center lands on the viewport center on
    /// both axes, clamped at the document origin.
    pub fn scroll_element_into_view(&self, element: &Element, behavior: ScrollBehavior) {
        let center = element.layout().center();
        let viewport = self.viewport.get();
        self.set_scroll(
            center.x - viewport.width / 2.0,
            center.y - viewport.height / 2.0,
        );
        debug!(tag = %element.tag(), ?behavior, "scrolled element into view");
    }

    pub fn set_focus(&self, element: &Element) {
        *self.focused.borrow_mut() = Some(element.clone());
    }

    pub fn focused(&self) -> Option<Element> {
        self.focused.borrow().clone()
    }

    pub fn blur(&self) {
        *self.focused.borrow_mut() = None;
    }

    /// Dispatches a bubbling event from `target` to the root.
    ///
    /// The propagation chain and every listener are collected before
    /// the first invocation, so a listener that mutates the tree (or
    /// re-enters the document) cannot observe a half-built chain.
    /// Returns the number of listeners invoked.
    pub fn dispatch_bubbling(&self, target: &Element, event_type: &str) -> usize {
        let mut chain = vec![target.clone()];
        let mut current = target.clone();
        while let Some(parent) = current.parent() {
            chain.push(parent.clone());
            current = parent;
        }

        let event = Event::bubbling(event_type);
        let listeners: Vec<_> = chain
            .iter()
            .flat_map(|el| el.listeners_for(event_type))
            .collect();
        for listener in &listeners {
            listener(&event);
        }
        debug!(event = event_type, invoked = listeners.len(), "dispatched bubbling event");
        listeners.len()
    }

    /// Checks a radio input, unchecking every other radio that shares
    /// its `name` anywhere in the document.
    pub fn check_radio(&self, radio: &Element) {
        if let Some(name) = radio.attribute("name") {
            for el in self.root.descendants() {
                if el.ptr_eq(radio) {
                    continue;
                }
                if el.tag() == "input"
                    && el.attribute("type").as_deref() == Some("radio")
                    && el.attribute("name").as_deref() == Some(name.as_str())
                {
                    el.set_checked(false);
                }
            }
        }
        radio.set_checked(true);
    }

    /// First `<label for="...">` matching the given id, if any.
    pub fn label_for(&self, id: &str) -> Option<Element> {
        self.root
            .descendants()
            .into_iter()
            .find(|el| el.tag() == "label" && el.attribute("for").as_deref() == Some(id))
    }
}
