//! Outside-dismiss for popover-style controls.
//!
//! Every dismissible control owns an [`OverlayToken`]. While its overlay is
//! open the token sits in the [`DismissRegistry`] together with the nodes
//! that count as "inside": the control's own root and any portal-rendered
//! pieces attached to it. A pointer event is dispatched with the target's
//! ancestor path and every open overlay the path does not touch is closed.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexSet;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayToken(u64);

impl OverlayToken {
    pub fn next() -> Self {
        OverlayToken(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }

    /// DOM id the renderer gives the control's root element.
    pub fn dom_id(&self) -> String {
        format!("overlay-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId(value.to_string())
    }
}

#[derive(Debug, Default)]
pub struct DismissRegistry {
    open: IndexSet<OverlayToken>,
    boundaries: HashMap<OverlayToken, HashSet<NodeId>>,
    claimed: HashSet<OverlayToken>,
}

impl DismissRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, token: OverlayToken) {
        self.open.insert(token);
    }

    pub fn close(&mut self, token: OverlayToken) {
        self.open.shift_remove(&token);
    }

    pub fn is_open(&self, token: OverlayToken) -> bool {
        self.open.contains(&token)
    }

    /// Adds `node` to the token's boundary. Portal content that is not a
    /// structural descendant of the control is attached here.
    pub fn attach(&mut self, token: OverlayToken, node: impl Into<NodeId>) {
        self.boundaries.entry(token).or_default().insert(node.into());
    }

    pub fn detach(&mut self, token: OverlayToken, node: &NodeId) {
        if let Some(nodes) = self.boundaries.get_mut(&token) {
            nodes.remove(node);
        }
    }

    /// Forgets the token entirely, for controls being torn down.
    pub fn unregister(&mut self, token: OverlayToken) {
        self.open.shift_remove(&token);
        self.boundaries.remove(&token);
        self.claimed.remove(&token);
    }

    /// Marks the pointer event currently bubbling as originating inside the
    /// token's control. Used by renderers that see their own handlers fire
    /// but cannot report an ancestor path.
    pub fn claim(&mut self, token: OverlayToken) {
        self.claimed.insert(token);
    }

    fn contains(&self, token: OverlayToken, path: &[NodeId]) -> bool {
        self.boundaries
            .get(&token)
            .is_some_and(|nodes| path.iter().any(|node| nodes.contains(node)))
    }

    /// Closes every open overlay that neither contains a node of `path` nor
    /// was claimed during this event. Returns the closed tokens in opening
    /// order so their owners can drop their open flags.
    pub fn dispatch(&mut self, path: &[NodeId]) -> Vec<OverlayToken> {
        let closed: Vec<OverlayToken> = self
            .open
            .iter()
            .copied()
            .filter(|token| !self.claimed.contains(token) && !self.contains(*token, path))
            .collect();
        for token in &closed {
            self.open.shift_remove(token);
        }
        self.claimed.clear();
        if !closed.is_empty() {
            tracing::debug!(count = closed.len(), "dismissed overlays on outside click");
        }
        closed
    }
}
