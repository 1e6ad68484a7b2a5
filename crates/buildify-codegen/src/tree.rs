//! Component forest with deterministic names.

use crate::fragment::hosts_children;
use buildify_core::{Component, ComponentId};
use kurbo::Point;
use std::collections::{HashMap, HashSet};

/// A component placed in the output tree.
#[derive(Debug)]
pub(crate) struct TreeNode<'a> {
    pub component: &'a Component,
    /// CSS class, e.g. `button-1`.
    pub class_name: String,
    /// Script identifier, e.g. `Button1`.
    pub ident: String,
    /// Position of the enclosing element; `left`/`top` are relative to it.
    pub origin: Point,
    pub children: Vec<TreeNode<'a>>,
}

impl TreeNode<'_> {
    /// Identifier with a lowercase first letter, for object keys.
    pub fn key(&self) -> String {
        let mut chars = self.ident.chars();
        match chars.next() {
            Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }
}

/// Top-level nodes in input order, each owning its subtree.
#[derive(Debug, Default)]
pub(crate) struct Forest<'a> {
    pub roots: Vec<TreeNode<'a>>,
}

impl<'a> Forest<'a> {
    /// Arrange components by their parent links.
    ///
    /// Components whose parent is absent from the input become roots. Each
    /// component appears once, so broken or cyclic links cannot recurse.
    pub fn build(components: &[&'a Component]) -> Self {
        Self::with_reserved(components, &[])
    }

    /// [`Forest::build`], never handing out any of the `reserved` names.
    pub fn with_reserved(components: &[&'a Component], reserved: &[&str]) -> Self {
        let mut by_id: HashMap<&ComponentId, &'a Component> = HashMap::new();
        for &component in components {
            by_id.entry(component.id()).or_insert(component);
        }

        let mut builder = Builder {
            by_id: &by_id,
            visited: HashSet::new(),
            counters: HashMap::new(),
            taken: reserved.iter().map(|name| name.to_string()).collect(),
        };
        let mut roots = Vec::new();

        for &component in components {
            let is_root = component
                .parent()
                .is_none_or(|parent| !by_id.contains_key(parent));
            if !is_root {
                continue;
            }
            if let Some(node) = builder.visit(component, Point::ZERO) {
                roots.push(node);
            }
        }
        // Whatever is left sits on a cycle or under an inconsistent parent.
        for &component in components {
            if let Some(node) = builder.visit(component, Point::ZERO) {
                log::debug!("Emitting unreachable component {} at top level", component.id());
                roots.push(node);
            }
        }

        Forest { roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// All nodes in pre-order.
    pub fn walk(&self) -> Vec<&TreeNode<'a>> {
        fn collect<'n, 'a>(nodes: &'n [TreeNode<'a>], out: &mut Vec<&'n TreeNode<'a>>) {
            for node in nodes {
                out.push(node);
                collect(&node.children, out);
            }
        }
        let mut out = Vec::new();
        collect(&self.roots, &mut out);
        out
    }
}

struct Builder<'m, 'a> {
    by_id: &'m HashMap<&'a ComponentId, &'a Component>,
    visited: HashSet<&'a ComponentId>,
    counters: HashMap<String, usize>,
    /// Class names and identifiers already in use.
    taken: HashSet<String>,
}

impl<'a> Builder<'_, 'a> {
    fn visit(&mut self, component: &'a Component, origin: Point) -> Option<TreeNode<'a>> {
        if !self.visited.insert(component.id()) {
            return None;
        }

        let (class_name, ident) = self.next_names(&slug(component.kind.as_str()));
        let mut node = TreeNode {
            component,
            class_name,
            ident,
            origin,
            children: Vec::new(),
        };

        // Children of non-hosting elements are emitted next to them, in the same frame.
        let child_origin = if hosts_children(&component.kind) {
            component.style.position
        } else {
            origin
        };
        for child_id in component.children() {
            let Some(child) = self.by_id.get(child_id).copied() else {
                continue;
            };
            if let Some(child) = self.visit(child, child_origin) {
                node.children.push(child);
            }
        }
        Some(node)
    }

    /// Next free `(class name, identifier)` pair for `slug`.
    ///
    /// Distinct kinds can spell the same name (`button-1` and `button1` both
    /// yield `Button1_1`), so taken indexes are skipped.
    fn next_names(&mut self, slug: &str) -> (String, String) {
        let counter = self.counters.entry(slug.to_string()).or_insert(0);
        loop {
            *counter += 1;
            let class_name = format!("{slug}-{counter}");
            let name = ident(slug, *counter);
            if !self.taken.contains(&class_name) && !self.taken.contains(&name) {
                self.taken.insert(class_name.clone());
                self.taken.insert(name.clone());
                return (class_name, name);
            }
        }
    }
}

/// Kind name reduced to `[a-z0-9-]`, never empty and never starting with a digit.
fn slug(kind: &str) -> String {
    let mut slug = String::with_capacity(kind.len());
    for c in kind.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    match slug.chars().next() {
        None => "component".to_string(),
        Some(first) if first.is_ascii_digit() => format!("c-{slug}"),
        Some(_) => slug.to_string(),
    }
}

/// `rating-stars`, 2 → `RatingStars2`.
fn ident(slug: &str, index: usize) -> String {
    let mut ident: String = slug
        .split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();
    if ident.ends_with(|c: char| c.is_ascii_digit()) {
        ident.push('_');
    }
    ident.push_str(&index.to_string());
    ident
}
