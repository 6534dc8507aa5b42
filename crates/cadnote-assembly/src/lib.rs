#![warn(missing_docs)]

//! Arena-backed assembly tree for the cadnote annotation passes.
//!
//! An [`Assembly`] owns its nodes in a slotmap arena and exposes them
//! through [`NodeId`] keys; nodes reference each other by id rather
//! than by mutual parent/child pointers. Each node carries a rigid
//! [`Pose`] composed multiplicatively with its parent's, an optional
//! [`Part`] payload, and strongly-typed [`NodeMetadata`]. Explode
//! offsets are an enumerated field, not an open string map, so a typo
//! in a metadata key is a compile error instead of a silently ignored
//! annotation.
//!
//! Invariants:
//! - node names are unique among siblings, so name lookups resolve
//!   unambiguously;
//! - nodes are never removed. Passes add markers and adjust poses, and
//!   every id handed out stays valid for the assembly's lifetime.

pub mod explode;

pub use explode::{explode, explode_to_depth, DEFAULT_EXPLODE_DEPTH};

use std::ops::{Index, IndexMut};

use cadnote_kernel::Solid;
use cadnote_math::Pose;
use slotmap::SlotMap;
use thiserror::Error;

slotmap::new_key_type! {
    /// Arena key identifying a node within its [`Assembly`].
    pub struct NodeId;
}

/// Errors from assembly tree manipulation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    /// A sibling with the same name already exists under the parent.
    #[error("node {parent:?} already has a child named {name:?}")]
    DuplicateName {
        /// Name of the parent node.
        parent: String,
        /// The clashing child name.
        name: String,
    },

    /// The node id does not belong to this assembly.
    #[error("node not found in assembly")]
    NodeNotFound,

    /// The node has no part payload where one was required.
    #[error("node {name:?} holds no part")]
    NotAPart {
        /// Name of the offending node.
        name: String,
    },

    /// The root node cannot be wrapped or re-parented.
    #[error("the root node cannot be wrapped")]
    CannotWrapRoot,
}

/// Result type for assembly operations.
pub type Result<T> = std::result::Result<T, AssemblyError>;

/// An RGBA display color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel, 0..=1.
    pub r: f64,
    /// Green channel, 0..=1.
    pub g: f64,
    /// Blue channel, 0..=1.
    pub b: f64,
    /// Alpha channel, 0..=1.
    pub a: f64,
}

impl Color {
    /// Opaque black, the conventional marker color.
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Create a color from RGBA channels.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    /// Neutral part gray.
    fn default() -> Self {
        Self::new(0.62, 0.62, 0.62, 1.0)
    }
}

/// A part: an opaque solid handle plus its display color.
///
/// Tags live on the solid and are queried through the collaborator
/// traits; the assembly itself never inspects geometry.
#[derive(Debug, Clone)]
pub struct Part {
    /// The collaborator-owned solid.
    pub solid: Box<dyn Solid>,
    /// Display color.
    pub color: Color,
}

impl Part {
    /// Part with the default display color.
    pub fn new(solid: Box<dyn Solid>) -> Self {
        Self {
            solid,
            color: Color::default(),
        }
    }

    /// Set the display color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Which historical metadata spelling declared an explode offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetKey {
    /// The original `explode_loc` spelling.
    Legacy,
    /// The `explode_translation` spelling.
    Current,
}

impl OffsetKey {
    /// The metadata key string this spelling corresponds to.
    pub fn metadata_key(&self) -> &'static str {
        match self {
            OffsetKey::Legacy => "explode_loc",
            OffsetKey::Current => "explode_translation",
        }
    }

    /// Parse a metadata key string into its spelling, if recognized.
    pub fn from_metadata_key(key: &str) -> Option<Self> {
        match key {
            "explode_loc" => Some(OffsetKey::Legacy),
            "explode_translation" => Some(OffsetKey::Current),
            _ => None,
        }
    }
}

/// An exploded-view offset: a pose composed into the node's own pose
/// exactly once per explode pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplodeOffset {
    /// The offset pose, applied in the node's local frame.
    pub pose: Pose,
    /// Which spelling declared the offset.
    pub key: OffsetKey,
}

impl ExplodeOffset {
    /// Offset declared under the current key.
    pub fn new(pose: Pose) -> Self {
        Self {
            pose,
            key: OffsetKey::Current,
        }
    }

    /// Offset declared under the legacy key.
    pub fn legacy(pose: Pose) -> Self {
        Self {
            pose,
            key: OffsetKey::Legacy,
        }
    }

    /// Offset from a raw metadata key string; `None` if the key is not
    /// one of the recognized spellings.
    pub fn from_key(key: &str, pose: Pose) -> Option<Self> {
        OffsetKey::from_metadata_key(key).map(|key| Self { pose, key })
    }
}

/// Strongly-typed node metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeMetadata {
    /// Exploded-view offset, if the node participates in explosion.
    pub explode: Option<ExplodeOffset>,
}

impl NodeMetadata {
    /// Metadata carrying only an explode offset.
    pub fn with_explode(offset: ExplodeOffset) -> Self {
        Self {
            explode: Some(offset),
        }
    }
}

/// One node of an assembly: a named pose frame holding either a part
/// or child nodes.
#[derive(Debug, Clone)]
pub struct AssemblyNode {
    /// Node name, unique among its siblings.
    pub name: String,
    /// Pose relative to the parent node.
    pub pose: Pose,
    /// Leaf payload, `None` for grouping nodes.
    pub part: Option<Part>,
    /// Annotation metadata.
    pub metadata: NodeMetadata,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl AssemblyNode {
    fn new(name: String, pose: Pose, part: Option<Part>, metadata: NodeMetadata) -> Self {
        Self {
            name,
            pose,
            part,
            metadata,
            children: Vec::new(),
            parent: None,
        }
    }

    /// Child node ids, in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parent node id; `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// An assembly: an arena of nodes under a single root frame.
#[derive(Debug, Clone)]
pub struct Assembly {
    nodes: SlotMap<NodeId, AssemblyNode>,
    root: NodeId,
}

impl Assembly {
    /// Create an assembly whose root node carries the given name, an
    /// identity pose, and no part.
    pub fn new(name: impl Into<String>) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(AssemblyNode::new(
            name.into(),
            Pose::identity(),
            None,
            NodeMetadata::default(),
        ));
        Self { nodes, root }
    }

    /// Id of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&AssemblyNode> {
        self.nodes.get(id)
    }

    /// Look up a node mutably by id.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut AssemblyNode> {
        self.nodes.get_mut(id)
    }

    /// Child ids of a node; empty for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the assembly holds only its root node.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Iterate over all nodes in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &AssemblyNode)> {
        self.nodes.iter()
    }

    fn attach(&mut self, parent: NodeId, mut node: AssemblyNode) -> Result<NodeId> {
        let parent_node = self.nodes.get(parent).ok_or(AssemblyError::NodeNotFound)?;
        if parent_node
            .children
            .iter()
            .any(|&child| self.nodes[child].name == node.name)
        {
            return Err(AssemblyError::DuplicateName {
                parent: parent_node.name.clone(),
                name: node.name,
            });
        }
        node.parent = Some(parent);
        let id = self.nodes.insert(node);
        self.nodes[parent].children.push(id);
        Ok(id)
    }

    /// Add a leaf node holding a part.
    pub fn add_part(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        part: Part,
        pose: Pose,
        metadata: NodeMetadata,
    ) -> Result<NodeId> {
        self.attach(
            parent,
            AssemblyNode::new(name.into(), pose, Some(part), metadata),
        )
    }

    /// Add a grouping node with no part payload.
    pub fn add_group(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        pose: Pose,
        metadata: NodeMetadata,
    ) -> Result<NodeId> {
        self.attach(parent, AssemblyNode::new(name.into(), pose, None, metadata))
    }

    /// Find a direct child by name.
    pub fn child_by_name(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&child| self.nodes[child].name == name)
    }

    /// Position of a node within its parent's child list.
    pub fn sibling_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.nodes.get(id)?.parent?;
        self.children(parent).iter().position(|&child| child == id)
    }

    /// Wrap a child node in a new grouping node that replaces it in the
    /// parent's child list.
    ///
    /// The wrapper takes over the child's name, pose, and metadata; the
    /// child keeps its name inside the wrapper with an identity pose and
    /// empty metadata. Anything later composed into the wrapper's pose
    /// (an explode offset, say) therefore moves the wrapped child and
    /// any sibling markers as one rigid unit.
    pub fn wrap_child(&mut self, child: NodeId) -> Result<NodeId> {
        let child_node = self.nodes.get(child).ok_or(AssemblyError::NodeNotFound)?;
        let parent = child_node.parent.ok_or(AssemblyError::CannotWrapRoot)?;
        let slot = self.nodes[parent]
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(AssemblyError::NodeNotFound)?;

        let child_node = &self.nodes[child];
        let mut wrapper = AssemblyNode::new(
            child_node.name.clone(),
            child_node.pose.clone(),
            None,
            child_node.metadata.clone(),
        );
        wrapper.parent = Some(parent);
        wrapper.children = vec![child];
        let wrapper_id = self.nodes.insert(wrapper);

        // Replace the child with its wrapper at the same sibling slot.
        self.nodes[parent].children[slot] = wrapper_id;

        let child_node = &mut self.nodes[child];
        child_node.parent = Some(wrapper_id);
        child_node.pose = Pose::identity();
        child_node.metadata = NodeMetadata::default();

        Ok(wrapper_id)
    }

    /// World-space pose of a node: its own pose composed through every
    /// ancestor up to the root.
    pub fn world_pose(&self, id: NodeId) -> Pose {
        let mut pose = match self.nodes.get(id) {
            Some(node) => node.pose.clone(),
            None => return Pose::identity(),
        };
        let mut current = self.nodes[id].parent;
        while let Some(ancestor) = current {
            let node = &self.nodes[ancestor];
            pose = node.pose.then(&pose);
            current = node.parent;
        }
        pose
    }
}

impl Index<NodeId> for Assembly {
    type Output = AssemblyNode;

    /// Panics if the id does not belong to this assembly. Ids are only
    /// ever produced by the assembly that owns them and nodes are never
    /// removed.
    fn index(&self, id: NodeId) -> &AssemblyNode {
        &self.nodes[id]
    }
}

impl IndexMut<NodeId> for Assembly {
    fn index_mut(&mut self, id: NodeId) -> &mut AssemblyNode {
        &mut self.nodes[id]
    }
}
