//! Condition trie that maps bit-condition sequences to payloads.

use crate::condition::bit_condition::BitCondition;

/// Index of a node in the solver's arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The root node, which matches every record
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct ConditionNode<P> {
    /// Unused for the root
    condition: BitCondition,
    children: Vec<NodeId>,
    payloads: Vec<P>,
}

impl<P> ConditionNode<P> {
    fn new(condition: BitCondition) -> Self {
        Self {
            condition,
            children: Vec::new(),
            payloads: Vec::new(),
        }
    }
}

/// Stores payloads that can be found when a bit field matches a sequence of
/// bit conditions.
///
/// Each condition sequence is a path from the root. Sequences that share a
/// prefix share the nodes of that prefix, so a condition is tested once per
/// record no matter how many payloads sit below it.
///
/// Payloads are small handles (`Copy`); the solver never owns the data they
/// refer to.
#[derive(Clone, Debug)]
pub struct ConditionSolver<P> {
    nodes: Vec<ConditionNode<P>>,
    payload_count: usize,
}

impl<P: Copy> ConditionSolver<P> {
    /// Create an empty solver (root node only)
    pub fn new() -> Self {
        Self {
            nodes: vec![ConditionNode::new(BitCondition::default())],
            payload_count: 0,
        }
    }

    /// Store `payload` under the given condition sequence.
    ///
    /// Conditions equal in offset, length and value at the same depth share a
    /// node; payloads stored at the same node accumulate in insertion order.
    /// An empty sequence stores the payload on the root.
    pub fn add_conditions(&mut self, conditions: &[BitCondition], payload: P) -> NodeId {
        let mut current = NodeId::ROOT;
        for condition in conditions {
            let existing = self.nodes[current.index()]
                .children
                .iter()
                .copied()
                .find(|child| self.nodes[child.index()].condition == *condition);

            current = match existing {
                Some(child) => child,
                None => {
                    let child = NodeId(self.nodes.len() as u32);
                    self.nodes.push(ConditionNode::new(*condition));
                    self.nodes[current.index()].children.push(child);
                    child
                }
            };
        }
        self.nodes[current.index()].payloads.push(payload);
        self.payload_count += 1;
        current
    }

    /// Collect every payload whose conditions match `record`.
    ///
    /// Results are in pre-order: a node's own payloads come before those of
    /// its children, and children are visited in insertion order. A node
    /// whose condition fails hides its whole subtree.
    pub fn gather(&self, record: &[u8]) -> Vec<P> {
        let mut results = Vec::new();
        self.gather_into(record, &mut results);
        results
    }

    /// Like [`ConditionSolver::gather`] but appends to a caller-provided buffer.
    pub fn gather_into(&self, record: &[u8], results: &mut Vec<P>) {
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.index()];
            if id != NodeId::ROOT && !node.condition.matches(record) {
                continue;
            }
            results.extend_from_slice(&node.payloads);
            // Reversed so the first child is popped first.
            stack.extend(node.children.iter().rev().copied());
        }
    }

    /// Number of nodes, including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored payloads
    pub fn payload_count(&self) -> usize {
        self.payload_count
    }

    /// Check if no payload has been stored
    pub fn is_empty(&self) -> bool {
        self.payload_count == 0
    }

    /// Payloads stored directly on a node
    pub fn payloads_at(&self, id: NodeId) -> &[P] {
        &self.nodes[id.index()].payloads
    }
}

impl<P: Copy> Default for ConditionSolver<P> {
    fn default() -> Self {
        Self::new()
    }
}
