//! Arena-backed namespace tree.
//!
//! Nodes live in a `Vec` indexed by [`NodeId`]. Parents and children refer to
//! each other by id only. Removed nodes leave an empty slot behind and slots
//! are never reused, so a stale id resolves to `None` instead of to an
//! unrelated node.

use aclfs_acl::{Acl, AclEntry, AclTree, Permissions};
use aclfs_core::path::{self, PathLimits};
use aclfs_core::{Error, NodeId, Result};

/// A named entry in the namespace.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Access control list, in insertion order
    pub acl: Acl,
}

impl Node {
    /// The node name; `/` for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child ids in creation order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns `true` if the node has at least one child.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// The namespace tree.
#[derive(Debug, Clone)]
pub struct Namespace {
    nodes: Vec<Option<Node>>,
    limits: PathLimits,
}

impl Namespace {
    /// Creates a namespace holding only the root, with an empty ACL.
    pub fn new(limits: PathLimits) -> Self {
        let root = Node {
            name: "/".to_string(),
            parent: None,
            children: Vec::new(),
            acl: Acl::new(),
        };
        Self {
            nodes: vec![Some(root)],
            limits,
        }
    }

    /// The limits paths are validated against.
    pub fn limits(&self) -> &PathLimits {
        &self.limits
    }

    /// The root node id.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Gets a live node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    /// Gets a live node mutably.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Always `false`: the root cannot be removed.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Finds a direct child of `parent` by exact name.
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.node(parent)?
            .children
            .iter()
            .copied()
            .find(|&c| self.node(c).is_some_and(|n| n.name == name))
    }

    /// Resolves a path to a node.
    ///
    /// Fails with `InvalidPath` when the path is malformed; returns `Ok(None)`
    /// when some component does not exist.
    pub fn resolve(&self, path: &str) -> Result<Option<NodeId>> {
        let parts = path::components(path, &self.limits)?;
        let mut current = self.root();
        for part in parts {
            match self.find_child(current, part) {
                Some(child) => current = child,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Creates a node at `path`, creating missing intermediate directories.
    ///
    /// Intermediates get a `*.* r` ACL; the final node starts with an empty
    /// ACL for the caller to fill. Fails with `AlreadyExists` if the full
    /// path is already present.
    pub fn create_path(&mut self, path: &str) -> Result<NodeId> {
        let parts = path::components(path, &self.limits)?;
        let Some((last, intermediates)) = parts.split_last() else {
            return Err(Error::already_exists(path));
        };

        let mut current = self.root();
        for part in intermediates {
            current = match self.find_child(current, part) {
                Some(child) => child,
                None => {
                    let child = self.create_child(current, part)?;
                    if let Some(node) = self.node_mut(child) {
                        node.acl.add_entry(AclEntry::everyone(Permissions::READ));
                    }
                    tracing::debug!(path = %self.path_of(child), "Created intermediate directory");
                    child
                }
            };
        }

        if self.find_child(current, last).is_some() {
            return Err(Error::already_exists(path));
        }
        self.create_child(current, last)
    }

    /// Appends a new child named `name` under `parent`.
    ///
    /// Fails with `DuplicateName` if a sibling already uses the name, which
    /// callers are expected to have ruled out.
    pub fn create_child(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        path::validate_component(name, &self.limits)?;
        if self.node(parent).is_none() {
            return Err(Error::not_found(parent.to_string()));
        }
        if self.find_child(parent, name).is_some() {
            let parent_path = self.path_of(parent);
            tracing::warn!(name, parent = %parent_path, "Sibling name collision");
            return Err(Error::DuplicateName {
                name: name.to_string(),
                parent: parent_path,
            });
        }

        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Some(Node {
            name: name.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            acl: Acl::new(),
        }));
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        Ok(id)
    }

    /// Unlinks the child named `name` from `parent` and frees its slot.
    ///
    /// The child's ACL is cleared with it. Returns the removed id, or `None`
    /// if no such child exists. Callers must ensure the child has no
    /// children of its own.
    pub fn remove_child(&mut self, parent: NodeId, name: &str) -> Option<NodeId> {
        let child = self.find_child(parent, name)?;
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|&c| c != child);
        }
        if let Some(mut node) = self.nodes.get_mut(child.index()).and_then(Option::take) {
            node.acl.clear();
        }
        Some(child)
    }

    /// Absolute path of a live node.
    pub fn path_of(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current.and_then(|c| self.node(c)) {
            if node.parent.is_some() {
                names.push(node.name.as_str());
            }
            current = node.parent;
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    /// Depth-first walk from the root, children in creation order.
    pub fn walk(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.node(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new(PathLimits::default())
    }
}

impl AclTree for Namespace {
    fn acl(&self, node: NodeId) -> Option<&Acl> {
        self.node(node).map(|n| &n.acl)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(Node::parent)
    }

    fn path_of(&self, node: NodeId) -> String {
        Namespace::path_of(self, node)
    }
}
