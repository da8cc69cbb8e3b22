//! Scope filter: decides whether a matched callback may run for an event target
//!
//! A callback only runs when the event target lies inside the engine's root and
//! the originating element is not a form field or content-editable region.

/// Handle to a node in an [`ElementTree`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Read-only view of the host's element hierarchy
pub trait ElementTree {
    /// Parent of `node`; for a shadow root this is its host element
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Whether `node` is the document node (top of the hierarchy)
    fn is_document(&self, node: NodeId) -> bool;

    /// Upper- or lowercase tag name, `None` for non-element nodes
    fn tag_name(&self, node: NodeId) -> Option<&str>;

    /// Whether `node` is editable through the content-editable attribute
    fn is_content_editable(&self, node: NodeId) -> bool;

    /// Root used when the engine has none configured (the document body)
    fn default_root(&self) -> Option<NodeId>;
}

/// Whether `element` is `ancestor` or one of its descendants
///
/// Walks parent links iteratively and stops at the document node.
pub fn belongs_to(tree: &impl ElementTree, element: NodeId, ancestor: NodeId) -> bool {
    let mut current = Some(element);
    while let Some(node) = current {
        if node == ancestor {
            return true;
        }
        if tree.is_document(node) {
            return false;
        }
        current = tree.parent(node);
    }
    false
}

/// Whether key events on `node` are text entry the engine must stay out of
pub fn is_editable(tree: &impl ElementTree, node: NodeId) -> bool {
    let form_field = tree.tag_name(node).is_some_and(|tag| {
        tag.eq_ignore_ascii_case("input")
            || tag.eq_ignore_ascii_case("select")
            || tag.eq_ignore_ascii_case("textarea")
    });
    form_field || tree.is_content_editable(node)
}

/// Whether a callback may run for an event dispatched on `target`
///
/// `origin` is the first node of the event's composed path; when it differs from
/// `target` the event was re-targeted out of an open shadow tree and the
/// editable check applies to the real origin. A missing target is treated as
/// the root itself.
pub fn allows_callback(
    tree: &impl ElementTree,
    root: Option<NodeId>,
    target: Option<NodeId>,
    origin: Option<NodeId>,
) -> bool {
    let Some(root) = root.or_else(|| tree.default_root()) else {
        return false;
    };
    let target = target.unwrap_or(root);

    if !belongs_to(tree, target, root) {
        return false;
    }

    let element = match origin {
        Some(origin) if origin != target => origin,
        _ => target,
    };
    !is_editable(tree, element)
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum NodeKind {
    Document,
    Element {
        tag: String,
        content_editable: Option<bool>,
    },
    ShadowRoot,
}

#[derive(Clone, Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
}

/// Minimal arena-backed element tree: a document, a body, and whatever is added
///
/// Hosts that already have a DOM implement [`ElementTree`] directly; this type
/// serves headless hosts and tests.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
    body: NodeId,
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
            }],
            body: NodeId(0),
        };
        doc.body = doc.create_element(doc.document(), "body");
        doc
    }

    pub fn document(&self) -> NodeId {
        NodeId(0)
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Append a new element under `parent`
    pub fn create_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.push(
            NodeKind::Element {
                tag: tag.to_string(),
                content_editable: None,
            },
            parent,
        )
    }

    /// Attach a shadow root to `host`
    pub fn attach_shadow(&mut self, host: NodeId) -> NodeId {
        self.push(NodeKind::ShadowRoot, host)
    }

    /// Set or clear the content-editable attribute of an element
    pub fn set_content_editable(&mut self, node: NodeId, editable: Option<bool>) {
        if let Some(Node {
            kind: NodeKind::Element {
                content_editable, ..
            },
            ..
        }) = self.nodes.get_mut(node.0)
        {
            *content_editable = editable;
        }
    }

    fn push(&mut self, kind: NodeKind, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
        });
        id
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree for Document {
    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    fn is_document(&self, node: NodeId) -> bool {
        matches!(
            self.nodes.get(node.0),
            Some(Node {
                kind: NodeKind::Document,
                ..
            })
        )
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Element { tag, .. } => Some(tag.as_str()),
            _ => None,
        }
    }

    /// Nearest explicit attribute wins; inheritance stops at shadow roots
    fn is_content_editable(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(n) = self.nodes.get(id.0) else {
                return false;
            };
            match &n.kind {
                NodeKind::Element {
                    content_editable: Some(editable),
                    ..
                } => return *editable,
                NodeKind::Element { .. } => current = n.parent,
                NodeKind::Document | NodeKind::ShadowRoot => return false,
            }
        }
        false
    }

    fn default_root(&self) -> Option<NodeId> {
        Some(self.body)
    }
}
