use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::{Rc, Weak};

use refscope_core_types::Rect;

use crate::events::Listener;
use crate::style::ComputedStyle;

/// One child slot of an element: either a nested element or a raw text
/// node. Text nodes are kept distinct so accessible-name derivation can
/// read *direct* text children without double counting descendants.
#[derive(Clone)]
pub enum NodeChild {
    Element(Element),
    Text(String),
}

struct ElementData {
    tag: String,
    attributes: BTreeMap<String, String>,
    children: Vec<NodeChild>,
    parent: Weak<RefCell<ElementData>>,
    value: String,
    checked: bool,
    selected_index: Option<usize>,
    caret: usize,
    style: ComputedStyle,
    layout: Rect,
    listeners: HashMap<String, Vec<Listener>>,
}

/// Cheap clonable handle on a live, externally owned DOM element.
///
/// The subsystem never owns these nodes; the registry keeps only
/// [`WeakElement`] handles and every other layer borrows through this
/// handle for the duration of a single call.
#[derive(Clone)]
pub struct Element {
    inner: Rc<RefCell<ElementData>>,
}

/// Non-owning handle used by the reference registry.
#[derive(Clone)]
pub struct WeakElement {
    inner: Weak<RefCell<ElementData>>,
}

impl WeakElement {
    pub fn upgrade(&self) -> Option<Element> {
        self.inner.upgrade().map(|inner| Element { inner })
    }
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ElementData {
                tag: tag.to_ascii_lowercase(),
                attributes: BTreeMap::new(),
                children: Vec::new(),
                parent: Weak::new(),
                value: String::new(),
                checked: false,
                selected_index: None,
                caret: 0,
                style: ComputedStyle::default(),
                layout: Rect::default(),
                listeners: HashMap::new(),
            })),
        }
    }

    pub fn downgrade(&self) -> WeakElement {
        WeakElement {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Handle identity: true when both handles point at the same node.
    pub fn ptr_eq(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn tag(&self) -> String {
        self.inner.borrow().tag.clone()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.inner.borrow().attributes.get(name).cloned()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.inner.borrow().attributes.contains_key(name)
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.inner
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_attribute(&self, name: &str) {
        self.inner.borrow_mut().attributes.remove(name);
    }

    pub fn id(&self) -> Option<String> {
        self.attribute("id").filter(|id| !id.is_empty())
    }

    pub fn classes(&self) -> Vec<String> {
        self.attribute("class")
            .map(|raw| raw.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    // Builder-style constructors for tests and demo pages.

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_child(self, child: Element) -> Self {
        self.append_child(&child);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.append_text(text);
        self
    }

    pub fn with_layout(self, layout: Rect) -> Self {
        self.set_layout(layout);
        self
    }

    pub fn with_value(self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn append_child(&self, child: &Element) {
        child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        self.inner
            .borrow_mut()
            .children
            .push(NodeChild::Element(child.clone()));
    }

    pub fn append_text(&self, text: &str) {
        self.inner
            .borrow_mut()
            .children
            .push(NodeChild::Text(text.to_string()));
    }

    /// Removes `child` from this element. Returns false when `child`
    /// was not a direct child.
    pub fn remove_child(&self, child: &Element) -> bool {
        let mut data = self.inner.borrow_mut();
        let before = data.children.len();
        data.children.retain(|node| match node {
            NodeChild::Element(el) => !el.ptr_eq(child),
            NodeChild::Text(_) => true,
        });
        let removed = data.children.len() < before;
        drop(data);
        if removed {
            child.inner.borrow_mut().parent = Weak::new();
        }
        removed
    }

    /// Detaches this element from its parent, making every reference to
    /// it stale once the host drops its own handles.
    pub fn detach(&self) {
        if let Some(parent) = self.parent() {
            parent.remove_child(self);
        }
    }

    pub fn parent(&self) -> Option<Element> {
        self.inner
            .borrow()
            .parent
            .upgrade()
            .map(|inner| Element { inner })
    }

    /// Direct element children, in document order.
    pub fn children(&self) -> Vec<Element> {
        self.inner
            .borrow()
            .children
            .iter()
            .filter_map(|node| match node {
                NodeChild::Element(el) => Some(el.clone()),
                NodeChild::Text(_) => None,
            })
            .collect()
    }

    pub fn child_nodes(&self) -> Vec<NodeChild> {
        self.inner.borrow().children.clone()
    }

    /// Concatenated *direct* text-node children only.
    pub fn direct_text(&self) -> String {
        self.inner
            .borrow()
            .children
            .iter()
            .filter_map(|node| match node {
                NodeChild::Text(text) => Some(text.as_str()),
                NodeChild::Element(_) => None,
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Full descendant text content, in document order.
    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text(&self, parts: &mut Vec<String>) {
        for node in self.child_nodes() {
            match node {
                NodeChild::Text(text) => {
                    if !text.trim().is_empty() {
                        parts.push(text.trim().to_string());
                    }
                }
                NodeChild::Element(el) => el.collect_text(parts),
            }
        }
    }

    /// Preorder walk over this element and all element descendants.
    pub fn descendants(&self) -> Vec<Element> {
        let mut out = Vec::new();
        let mut stack = vec![self.clone()];
        while let Some(el) = stack.pop() {
            out.push(el.clone());
            let mut children = el.children();
            children.reverse();
            stack.extend(children);
        }
        out
    }

    // Form-control state.

    pub fn value(&self) -> String {
        self.inner.borrow().value.clone()
    }

    pub fn set_value(&self, value: &str) {
        self.inner.borrow_mut().value = value.to_string();
    }

    pub fn checked(&self) -> bool {
        self.inner.borrow().checked
    }

    pub fn set_checked(&self, checked: bool) {
        self.inner.borrow_mut().checked = checked;
    }

    pub fn caret(&self) -> usize {
        self.inner.borrow().caret
    }

    pub fn set_caret(&self, caret: usize) {
        self.inner.borrow_mut().caret = caret;
    }

    /// Option elements of a select control, in document order.
    pub fn options(&self) -> Vec<Element> {
        self.descendants()
            .into_iter()
            .filter(|el| el.tag() == "option" && !el.ptr_eq(self))
            .collect()
    }

    /// Selected option index. A select with options and no explicit
    /// selection reports its first option, as the host DOM does.
    pub fn selected_index(&self) -> Option<usize> {
        let explicit = self.inner.borrow().selected_index;
        match explicit {
            Some(index) => Some(index),
            None if !self.options().is_empty() => Some(0),
            None => None,
        }
    }

    pub fn set_selected_index(&self, index: Option<usize>) {
        self.inner.borrow_mut().selected_index = index;
    }

    pub fn selected_option(&self) -> Option<Element> {
        let options = self.options();
        options.get(self.selected_index()?).cloned()
    }

    // Rendering state.

    pub fn style(&self) -> ComputedStyle {
        self.inner.borrow().style
    }

    pub fn set_style(&self, style: ComputedStyle) {
        self.inner.borrow_mut().style = style;
    }

    pub fn with_style(self, style: ComputedStyle) -> Self {
        self.set_style(style);
        self
    }

    /// Layout box in document coordinates, as most recently laid out by
    /// the host.
    pub fn layout(&self) -> Rect {
        self.inner.borrow().layout
    }

    pub fn set_layout(&self, layout: Rect) {
        self.inner.borrow_mut().layout = layout;
    }

    // Listeners.

    pub fn add_event_listener(&self, event_type: &str, listener: Listener) {
        self.inner
            .borrow_mut()
            .listeners
            .entry(event_type.to_string())
            .or_default()
            .push(listener);
    }

    pub fn has_listener(&self, event_type: &str) -> bool {
        self.inner
            .borrow()
            .listeners
            .get(event_type)
            .is_some_and(|ls| !ls.is_empty())
    }

    pub(crate) fn listeners_for(&self, event_type: &str) -> Vec<Listener> {
        self.inner
            .borrow()
            .listeners
            .get(event_type)
            .cloned()
            .unwrap_or_default()
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.inner.borrow();
        f.debug_struct("Element")
            .field("tag", &data.tag)
            .field("id", &data.attributes.get("id"))
            .field("children", &data.children.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_text_skips_descendant_elements() {
        let button = Element::new("button")
            .with_text("Save")
            .with_child(Element::new("span").with_text("now"));
        assert_eq!(button.direct_text(), "Save");
        assert_eq!(button.text_content(), "Save now");
    }

    #[test]
    fn detach_clears_parent() {
        let parent = Element::new("div");
        let child = Element::new("span");
        parent.append_child(&child);
        assert!(child.parent().is_some());
        child.detach();
        assert!(child.parent().is_none());
        assert!(parent.children().is_empty());
    }

    #[test]
    fn weak_handle_dies_with_element() {
        let weak = {
            let el = Element::new("div");
            let weak = el.downgrade();
            assert!(weak.upgrade().is_some());
            weak
        };
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn select_defaults_to_first_option() {
        let select = Element::new("select")
            .with_child(Element::new("option").with_attribute("value", "a").with_text("Apple"))
            .with_child(Element::new("option").with_attribute("value", "b").with_text("Blue"));
        let selected = select.selected_option().unwrap();
        assert_eq!(selected.attribute("value").as_deref(), Some("a"));
        select.set_selected_index(Some(1));
        assert_eq!(select.selected_option().unwrap().text_content(), "Blue");
    }

    #[test]
    fn descendants_are_preorder() {
        let root = Element::new("div")
            .with_child(Element::new("a").with_child(Element::new("b")))
            .with_child(Element::new("c"));
        let tags: Vec<String> = root.descendants().iter().map(Element::tag).collect();
        assert_eq!(tags, vec!["div", "a", "b", "c"]);
    }
}
