//! Virtual document the renderers write into.
//!
//! # Design
//! A small element tree stands in for the page so rendering stays
//! deterministic and testable off the browser. The host mirrors each
//! [`Mount`] into a real container by serializing it with
//! [`Mount::inner_html`] whenever its revision changes.
//!
//! Text and attribute values are escaped on serialization; player names are
//! never interpreted as markup.

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`Element::set_attribute`].
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Boolean attribute such as `required`.
    pub fn flag(self, name: &str) -> Self {
        self.attr(name, "")
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    /// First match in depth-first order, starting with `self`.
    pub fn find(&self, pred: impl Fn(&Element) -> bool) -> Option<&Element> {
        self.find_by(&pred)
    }

    fn find_by(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.child_elements().find_map(|e| e.find_by(pred))
    }

    fn find_mut_by(&mut self, pred: &dyn Fn(&Element) -> bool) -> Option<&mut Element> {
        if pred(self) {
            return Some(self);
        }
        for node in self.children.iter_mut() {
            if let Node::Element(e) = node {
                if let Some(found) = e.find_mut_by(pred) {
                    return Some(found);
                }
            }
        }
        None
    }

    fn collect_by<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if pred(self) {
            out.push(self);
        }
        for e in self.child_elements() {
            e.collect_by(pred, out);
        }
    }

    /// Removes every descendant matching `pred`, returning how many were
    /// detached. `self` is never removed.
    fn remove_by(&mut self, pred: &dyn Fn(&Element) -> bool) -> usize {
        let before = self.children.len();
        self.children
            .retain(|node| !matches!(node, Node::Element(e) if pred(e)));
        let mut removed = before - self.children.len();
        for node in self.children.iter_mut() {
            if let Node::Element(e) = node {
                removed += e.remove_by(pred);
            }
        }
        removed
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            if !value.is_empty() {
                out.push_str("=\"");
                out.push_str(&escape(value, true));
                out.push('"');
            }
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(&escape(t, false)),
                Node::Element(e) => e.write_html(out),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn escape(raw: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

/// A container supplied by the hosting page.
///
/// Every mutation bumps `revision`, which is how the host knows which
/// containers need to be written back to the real page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    id: String,
    children: Vec<Element>,
    revision: u64,
}

impl Mount {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            children: Vec::new(),
            revision: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Discards the current content in one step.
    pub fn replace_children(&mut self, children: Vec<Element>) {
        self.children = children;
        self.revision += 1;
    }

    pub fn find(&self, pred: impl Fn(&Element) -> bool) -> Option<&Element> {
        self.children.iter().find_map(|e| e.find_by(&pred))
    }

    pub fn find_all(&self, pred: impl Fn(&Element) -> bool) -> Vec<&Element> {
        let mut out = Vec::new();
        for e in &self.children {
            e.collect_by(&pred, &mut out);
        }
        out
    }

    /// Detaches every element matching `pred`, at any depth.
    pub fn remove_where(&mut self, pred: impl Fn(&Element) -> bool) -> usize {
        let before = self.children.len();
        self.children.retain(|e| !pred(e));
        let mut removed = before - self.children.len();
        for e in self.children.iter_mut() {
            removed += e.remove_by(&pred);
        }
        if removed > 0 {
            self.revision += 1;
        }
        removed
    }

    /// Sets the `value` of the `<input>` with the given id. Returns `false`
    /// when no such input is mounted.
    pub fn set_input_value(&mut self, input_id: &str, value: &str) -> bool {
        let pred = |e: &Element| e.tag() == "input" && e.attribute("id") == Some(input_id);
        let found = self.children.iter_mut().find_map(|e| e.find_mut_by(&pred));
        match found {
            Some(input) => {
                input.set_attribute("value", value);
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    pub fn input_value(&self, input_id: &str) -> Option<&str> {
        self.find(|e| e.tag() == "input" && e.attribute("id") == Some(input_id))
            .map(|input| input.attribute("value").unwrap_or(""))
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Element::text_content).collect()
    }

    pub fn inner_html(&self) -> String {
        self.children.iter().map(Element::to_html).collect()
    }
}

/// The two mount points the client renders into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub roster: Mount,
    pub form: Mount,
}

impl Page {
    pub const ROSTER_ID: &'static str = "all-players-container";
    pub const FORM_ID: &'static str = "new-player-form";

    pub fn new(roster_id: &str, form_id: &str) -> Self {
        Self {
            roster: Mount::new(roster_id),
            form: Mount::new(form_id),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Self::ROSTER_ID, Self::FORM_ID)
    }
}
