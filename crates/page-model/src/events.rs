use std::rc::Rc;

/// A synthetic DOM event as seen by page listeners.
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: String,
    pub bubbles: bool,
}

impl Event {
    pub fn bubbling(event_type: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            bubbles: true,
        }
    }
}

/// Page-owned event listener. Listeners run synchronously and may
/// re-enter the document, so dispatch must never hold a node borrow
/// while invoking one.
pub type Listener = Rc<dyn Fn(&Event)>;
