use crate::handlers::Action;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Header,
    Subtitle,
    Card,
    GroupHeader,
    Item,
    Button,
    Text,
    Media,
    Row,
    EmptyState,
    ErrorPanel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: Kind,
    pub text: String,
    pub key: Option<String>,
    pub classes: Vec<String>,
    pub on_click: Option<Action>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(kind: Kind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            key: None,
            classes: Vec::new(),
            on_click: None,
            children: Vec::new(),
        }
    }

    pub fn header(text: impl Into<String>) -> Self {
        Self::new(Kind::Header, text)
    }

    pub fn subtitle(text: impl Into<String>) -> Self {
        Self::new(Kind::Subtitle, text)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Kind::Text, text)
    }

    pub fn card() -> Self {
        Self::new(Kind::Card, "")
    }

    pub fn row() -> Self {
        Self::new(Kind::Row, "")
    }

    pub fn button(text: impl Into<String>, action: Action) -> Self {
        Self::new(Kind::Button, text).on_click(action)
    }

    pub fn empty_state(emoji: &str, text: impl Into<String>) -> Self {
        Self::new(Kind::EmptyState, format!("{emoji} {}", text.into()))
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn on_click(mut self, action: Action) -> Self {
        self.on_click = Some(action);
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }
}

/// A reference to a bound handler, valid only within the mount that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    epoch: u64,
    slot: usize,
}

impl Handle {
    pub fn slot(&self) -> usize {
        self.slot
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.slot)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: Kind,
    pub text: String,
    pub key: Option<String>,
    pub classes: Vec<String>,
    pub handle: Option<Handle>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        collect_text(self, &mut parts);
        parts.join(" ")
    }
}

fn collect_text<'a>(node: &'a Node, parts: &mut Vec<&'a str>) {
    if !node.text.is_empty() {
        parts.push(&node.text);
    }
    for child in &node.children {
        collect_text(child, parts);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BindingState {
    Active,
    Disabled,
    Detached,
}

#[derive(Debug)]
struct Binding {
    action: Action,
    state: BindingState,
}

#[derive(Debug, Default)]
pub struct Container {
    epoch: u64,
    nodes: Vec<Node>,
    bindings: Vec<Binding>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.epoch += 1;
        self.nodes.clear();
        self.bindings.clear();
    }

    pub fn mount(&mut self, view: Vec<Element>) {
        self.clear();
        let epoch = self.epoch;
        let bindings = &mut self.bindings;
        self.nodes = view
            .into_iter()
            .map(|element| attach(element, epoch, bindings))
            .collect();
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn handler_count(&self) -> usize {
        self.bindings
            .iter()
            .filter(|binding| binding.state != BindingState::Detached)
            .count()
    }

    pub fn handle(&self, slot: usize) -> Option<Handle> {
        let binding = self.bindings.get(slot)?;
        (binding.state != BindingState::Detached).then_some(Handle {
            epoch: self.epoch,
            slot,
        })
    }

    pub fn action(&self, handle: Handle) -> Option<&Action> {
        self.binding(handle)
            .filter(|binding| binding.state == BindingState::Active)
            .map(|binding| &binding.action)
    }

    pub fn is_enabled(&self, handle: Handle) -> bool {
        self.action(handle).is_some()
    }

    pub fn disable(&mut self, handle: Handle) -> bool {
        match self.binding_mut(handle) {
            Some(binding) if binding.state == BindingState::Active => {
                binding.state = BindingState::Disabled;
                true
            }
            _ => false,
        }
    }

    pub fn disable_where(&mut self, predicate: impl Fn(&Action) -> bool) -> Vec<Handle> {
        let epoch = self.epoch;
        self.bindings
            .iter_mut()
            .enumerate()
            .filter(|(_, binding)| binding.state == BindingState::Active && predicate(&binding.action))
            .map(|(slot, binding)| {
                binding.state = BindingState::Disabled;
                Handle { epoch, slot }
            })
            .collect()
    }

    pub fn enable(&mut self, handle: Handle) {
        if let Some(binding) = self.binding_mut(handle) {
            if binding.state == BindingState::Disabled {
                binding.state = BindingState::Active;
            }
        }
    }

    pub fn find(&self, key: &str) -> Option<&Node> {
        find_node(&self.nodes, key)
    }

    pub fn add_class(&mut self, key: &str, class: &str) -> bool {
        match find_node_mut(&mut self.nodes, key) {
            Some(node) => {
                if !node.has_class(class) {
                    node.classes.push(class.to_string());
                }
                true
            }
            None => false,
        }
    }

    /// Swaps the children of the node keyed `key` in place. Handlers of the
    /// removed children are detached.
    pub fn replace_children(&mut self, key: &str, children: Vec<Element>) -> bool {
        let epoch = self.epoch;
        let Some(node) = find_node_mut(&mut self.nodes, key) else {
            return false;
        };
        let bindings = &mut self.bindings;
        for old in node.children.drain(..) {
            detach(&old, bindings);
        }
        node.children = children
            .into_iter()
            .map(|element| attach(element, epoch, bindings))
            .collect();
        true
    }

    pub fn count(&self, predicate: impl Fn(&Node) -> bool) -> usize {
        fn walk(nodes: &[Node], predicate: &dyn Fn(&Node) -> bool) -> usize {
            nodes
                .iter()
                .map(|node| usize::from(predicate(node)) + walk(&node.children, predicate))
                .sum()
        }
        walk(&self.nodes, &predicate)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            self.write_node(node, 0, &mut out);
        }
        out
    }

    fn write_node(&self, node: &Node, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        let handle = self.handle_prefix(node);

        match node.kind {
            Kind::Row => {
                let cells: Vec<String> = node
                    .children
                    .iter()
                    .map(|cell| format!("{}{}", self.handle_prefix(cell), cell.text_content()))
                    .collect();
                out.push_str(&format!("{indent}{handle}{}\n", cells.join(" | ")));
                return;
            }
            Kind::Header => out.push_str(&format!("{indent}== {} ==\n", node.text)),
            Kind::GroupHeader => out.push_str(&format!("{indent}-- {} --\n", node.text)),
            Kind::ErrorPanel => out.push_str(&format!("{indent}!! {}\n", node.text)),
            Kind::Card if node.text.is_empty() => {}
            _ if node.text.is_empty() && handle.is_empty() => {}
            _ => out.push_str(&format!("{indent}{handle}{}\n", node.text)),
        }

        let child_depth = if node.kind == Kind::Card { depth + 1 } else { depth };
        for child in &node.children {
            self.write_node(child, child_depth, out);
        }
    }

    fn handle_prefix(&self, node: &Node) -> String {
        node.handle
            .filter(|handle| self.is_enabled(*handle))
            .map(|handle| format!("[{handle}] "))
            .unwrap_or_default()
    }

    fn binding(&self, handle: Handle) -> Option<&Binding> {
        if handle.epoch != self.epoch {
            return None;
        }
        self.bindings.get(handle.slot)
    }

    fn binding_mut(&mut self, handle: Handle) -> Option<&mut Binding> {
        if handle.epoch != self.epoch {
            return None;
        }
        self.bindings.get_mut(handle.slot)
    }
}

fn attach(element: Element, epoch: u64, bindings: &mut Vec<Binding>) -> Node {
    let handle = element.on_click.map(|action| {
        bindings.push(Binding {
            action,
            state: BindingState::Active,
        });
        Handle {
            epoch,
            slot: bindings.len() - 1,
        }
    });

    Node {
        kind: element.kind,
        text: element.text,
        key: element.key,
        classes: element.classes,
        handle,
        children: element
            .children
            .into_iter()
            .map(|child| attach(child, epoch, bindings))
            .collect(),
    }
}

fn detach(node: &Node, bindings: &mut [Binding]) {
    if let Some(binding) = node.handle.and_then(|handle| bindings.get_mut(handle.slot)) {
        binding.state = BindingState::Detached;
    }
    for child in &node.children {
        detach(child, bindings);
    }
}

fn find_node<'a>(nodes: &'a [Node], key: &str) -> Option<&'a Node> {
    nodes.iter().find_map(|node| {
        if node.key.as_deref() == Some(key) {
            Some(node)
        } else {
            find_node(&node.children, key)
        }
    })
}

fn find_node_mut<'a>(nodes: &'a mut [Node], key: &str) -> Option<&'a mut Node> {
    for node in nodes.iter_mut() {
        if node.key.as_deref() == Some(key) {
            return Some(node);
        }
        if let Some(found) = find_node_mut(&mut node.children, key) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::{ItemRef, Status};

    fn item(key: &str, status: Status) -> Element {
        Element::new(Kind::Item, key).key(key).on_click(Action::Item {
            item: ItemRef::task(key),
            label: key.to_string(),
            status,
        })
    }

    fn view() -> Vec<Element> {
        vec![
            Element::header("Checklist"),
            Element::card().children([item("bed", Status::Done), item("teeth", Status::Todo)]),
        ]
    }

    #[test]
    fn mounting_twice_keeps_one_handler_per_item() {
        let mut container = Container::new();
        container.mount(view());
        container.mount(view());
        assert_eq!(container.handler_count(), 2);
        assert_eq!(container.count(|node| node.handle.is_some()), 2);
    }

    #[test]
    fn handles_from_previous_mount_are_stale() {
        let mut container = Container::new();
        container.mount(view());
        let old = container.handle(0).unwrap();
        assert!(container.action(old).is_some());

        container.mount(view());
        assert!(container.action(old).is_none());
        assert!(!container.disable(old));
        assert!(container.action(container.handle(0).unwrap()).is_some());
    }

    #[test]
    fn disabled_control_rejects_second_dispatch() {
        let mut container = Container::new();
        container.mount(view());
        let handle = container.handle(1).unwrap();
        assert!(container.disable(handle));
        assert!(!container.disable(handle));
        assert!(container.action(handle).is_none());

        container.enable(handle);
        assert!(container.is_enabled(handle));
    }

    #[test]
    fn disable_where_takes_every_matching_control() {
        let mut container = Container::new();
        container.mount(view());
        let done = container.disable_where(|action| {
            matches!(action, Action::Item { status: Status::Done, .. })
        });
        assert_eq!(done, vec![container.handle(0).unwrap()]);
        assert!(!container.is_enabled(done[0]));
        assert!(container.is_enabled(container.handle(1).unwrap()));
        assert_eq!(container.disable_where(|_| true).len(), 1);
    }

    #[test]
    fn replacing_children_detaches_their_handlers() {
        let mut container = Container::new();
        container.mount(vec![Element::card().key("card").children([
            Element::text("Alan"),
            Element::row().key("actions").children([item("a", Status::Todo), item("b", Status::Todo)]),
        ])]);
        let first = container.handle(0).unwrap();

        assert!(container.replace_children("actions", vec![Element::text("Approved")]));
        assert!(container.add_class("card", "processed"));
        assert_eq!(container.handler_count(), 0);
        assert!(container.handle(0).is_none());
        assert!(container.action(first).is_none());
        assert!(container.find("card").unwrap().has_class("processed"));
        assert_eq!(container.find("card").unwrap().text_content(), "Alan Approved");
    }

    #[test]
    fn clear_empties_tree() {
        let mut container = Container::new();
        container.mount(view());
        let epoch = container.epoch();
        container.clear();
        assert!(container.is_empty());
        assert_eq!(container.handler_count(), 0);
        assert_eq!(container.epoch(), epoch + 1);
    }

    #[test]
    fn text_rendering_numbers_live_handlers() {
        let mut container = Container::new();
        container.mount(view());
        let handle = container.handle(0).unwrap();
        container.disable(handle);
        let text = container.to_text();
        assert!(text.contains("== Checklist =="));
        assert!(text.contains("  bed\n"));
        assert!(text.contains("[#1] teeth"));
    }
}
