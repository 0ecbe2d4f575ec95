//! Scope propagation.
//!
//! A single top-down pass that decides, for every node, which node supplies
//! its implicit receiver and whether it is a property access on that
//! receiver. Type resolution reads the result and never writes it.

use super::ast::{Ast, NodeId, NodeKind};

impl Ast {
    /// Assign `scope` and `direct_access` on every node.
    ///
    /// Parents are configured before their children, so each node only has
    /// to hand its own settings down one level.
    pub fn configure_scopes(&mut self) {
        let root = self.root();
        let root_node = self.node_mut(root);
        root_node.scope = None;
        root_node.direct_access = false;

        let order: Vec<NodeId> = self.preorder().collect();
        for id in order {
            for (child, scope, direct_access) in self.child_scopes(id) {
                let node = self.node_mut(child);
                node.scope = scope;
                node.direct_access = direct_access;
            }
        }
    }

    fn child_scopes(&self, id: NodeId) -> Vec<(NodeId, Option<NodeId>, bool)> {
        let node = self.node(id);
        match &node.kind {
            // The accessor resolves against the receiver.
            NodeKind::Property { prop, source } => {
                vec![(*source, node.scope, false), (*prop, Some(*source), true)]
            }
            // Filtering is transparent to access; the filter sees the source as `it`.
            NodeKind::Whose { source, filter } => vec![
                (*source, node.scope, node.direct_access),
                (*filter, Some(*source), false),
            ],
            _ => self
                .children(id)
                .into_iter()
                .map(|child| (child, node.scope, false))
                .collect(),
        }
    }
}
