use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use log::trace;
use petgraph::{
    Directed, Direction,
    stable_graph::{Edges, Neighbors, NodeIndex, StableGraph},
    visit::{EdgeRef, IntoNodeIdentifiers},
};
use serde::{Deserialize, Serialize};

use crate::{Error, IrNode, PlainValue, Result, are_equivalent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// The weight of a graph edge: which operand slot of the consumer the
/// producer's result feeds.
pub struct OperandIndex(pub usize);

/// A computation DAG over [`IrNode`]s.
///
/// # Remarks
/// Nodes own their [`Value`](crate::Value) descriptors; edges carry the
/// [`OperandIndex`] binding a producer to one of its consumer's operand
/// slots. Well-formed graphs contain no cycles and exactly one incoming
/// edge per operand slot.
pub type IrGraph = StableGraph<IrNode, OperandIndex>;

/**
 * A wrapper for ascertaining the structure of the underlying graph.
 * This type is used in [`forward_traverse`] and [`forward_traverse_mut`]
 * callbacks.
 */
pub struct GraphQuery<'a, N, E>(pub &'a StableGraph<N, E>);

impl<'a, N, E> GraphQuery<'a, N, E> {
    /**
     * Creates a new [`GraphQuery`] from a reference to a
     * [`StableGraph`].
     */
    pub fn new(ir: &'a StableGraph<N, E>) -> Self {
        Self(ir)
    }

    /**
     * Gets a node from its index.
     */
    pub fn get_node(&self, x: NodeIndex) -> Option<&N> {
        self.0.node_weight(x)
    }

    /**
     * Gets information about the immediate parent or child nodes of
     * the node at the given index.
     *
     * # Remarks
     * [`Direction::Outgoing`] gives children, while
     * [`Direction::Incoming`] gives parents.
     */
    pub fn neighbors_directed(&self, x: NodeIndex, direction: Direction) -> Neighbors<E> {
        self.0.neighbors_directed(x, direction)
    }

    /**
     * Gets edges pointing at the parent or child nodes of the node at
     * the given index.
     *
     * # Remarks
     * [`Direction::Outgoing`] gives children, while
     * [`Direction::Incoming`] gives parents.
     */
    pub fn edges_directed(&self, x: NodeIndex, direction: Direction) -> Edges<E, Directed> {
        self.0.edges_directed(x, direction)
    }
}

impl<'a, N, E> From<&'a StableGraph<N, E>> for GraphQuery<'a, N, E> {
    fn from(x: &'a StableGraph<N, E>) -> Self {
        Self(x)
    }
}

#[derive(Clone)]
/**
 * A request to transform the graph as appropriate.
 */
pub enum Transform<N, E> {
    /**
     * Add an edge between two nodes.
     *
     * # Remarks
     * The tuple is of the form (from, to, edge).
     */
    AddEdge(TransformNodeIndex, TransformNodeIndex, E),

    /**
     * Add the given node to the graph.
     */
    AddNode(N),

    /**
     * Remove the node at the given index. This will implicitly remove
     * any edges referencing the node.
     */
    RemoveNode(TransformNodeIndex),

    /**
     * Remove an edge between two nodes.
     *
     * # Remarks
     * The tuple is of the form (from, to).
     */
    RemoveEdge(TransformNodeIndex, TransformNodeIndex),
}

/**
 * The index type for referring to nodes in the current transform list
 * that have not yet been added to the graph.
 */
pub type DeferredIndex = usize;

#[derive(Clone, Copy)]
/**
 * The index of a graph node, either in the graph itself or resulting
 * from a previous unapplied transformation.
 */
pub enum TransformNodeIndex {
    /**
     * Refers to the node in the graph at the contained index.
     */
    NodeIndex(NodeIndex),

    /**
     * Refers to the node resulting from a previous [`Transform::AddNode`]
     * transform.
     */
    DeferredIndex(DeferredIndex),
}

impl From<NodeIndex> for TransformNodeIndex {
    fn from(x: NodeIndex) -> Self {
        Self::NodeIndex(x)
    }
}

impl From<DeferredIndex> for TransformNodeIndex {
    fn from(x: DeferredIndex) -> Self {
        Self::DeferredIndex(x)
    }
}

#[derive(Clone)]
/**
 * A datastructure for holding a sequence of graph transformations.
 */
pub struct GraphTransforms<N, E> {
    transforms: Vec<Transform<N, E>>,
    inserted_node_ids: Vec<Option<NodeIndex>>,
}

impl<N, E> GraphTransforms<N, E> {
    /**
     * Creates a new [`GraphTransforms`].
     */
    pub fn new() -> Self {
        Self {
            transforms: vec![],
            inserted_node_ids: vec![],
        }
    }

    fn materialize_index(&self, id: TransformNodeIndex) -> NodeIndex {
        match id {
            TransformNodeIndex::NodeIndex(x) => x,
            TransformNodeIndex::DeferredIndex(x) => {
                self.inserted_node_ids[x].expect("Invalid transform node id.")
            }
        }
    }

    /**
     * Pushes a transform into the list and returns the index of the
     * pushed transform suitable for use in
     * [`TransformNodeIndex::DeferredIndex`].
     * This allows you to reference nodes that haven't yet been added to
     * the graph in subsequent transforms.
     *
     * # Remarks
     * It goes without saying, if the pushed transform isn't
     * [`Transform::AddNode`], you shouldn't attempt to use this index.
     */
    pub fn push(&mut self, t: Transform<N, E>) -> DeferredIndex {
        self.transforms.push(t);

        self.transforms.len() - 1
    }
}

impl<N, E> Default for GraphTransforms<N, E>
where
    N: Clone,
    E: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/**
 * A list of transformations that should be applied to the graph.
 */
pub trait TransformList<N, E>
where
    N: Clone,
    E: Clone,
{
    /**
     * Apply the transformations and return any added nodes.
     *
     * # Remarks
     * This consumes the transform list.
     */
    fn apply(self, graph: &mut StableGraph<N, E>) -> Vec<NodeIndex>;
}

// Make a surrogate implementation of the trait for traversal functions
// that don't mutate the graph.
impl<N, E> TransformList<N, E> for ()
where
    N: Clone,
    E: Clone,
{
    fn apply(self, _graph: &mut StableGraph<N, E>) -> Vec<NodeIndex> {
        vec![]
    }
}

impl<N, E> TransformList<N, E> for GraphTransforms<N, E>
where
    N: Clone,
    E: Clone,
{
    fn apply(mut self, graph: &mut StableGraph<N, E>) -> Vec<NodeIndex> {
        // Despite appearances, this is not redundant with
        // `self.inserted_node_ids`. `added_nodes` is a list of added
        // nodes, while the latter is indexable by the transform id and
        // will have `None` elements for transforms that don't add nodes.
        let mut added_nodes = vec![];

        for t in &self.transforms {
            let inserted_node = match t {
                Transform::AddNode(n) => Some(graph.add_node(n.clone())),
                Transform::AddEdge(start, end, info) => {
                    let start = self.materialize_index(*start);
                    let end = self.materialize_index(*end);

                    graph.add_edge(start, end, info.clone());

                    None
                }
                Transform::RemoveEdge(start, end) => {
                    let start = self.materialize_index(*start);
                    let end = self.materialize_index(*end);
                    let edge = graph.find_edge(start, end).expect("No such edge");

                    graph.remove_edge(edge);

                    None
                }
                Transform::RemoveNode(n) => {
                    let n = self.materialize_index(*n);
                    graph.remove_node(n);

                    None
                }
            };

            if let Some(node) = inserted_node {
                added_nodes.push(node);
            }

            self.inserted_node_ids.push(inserted_node);
        }

        added_nodes
    }
}

/**
 * A topological DAG traversal over an immutable graph.
 *
 * * `callback`: A closure that receives the current node index and an
 *   object allowing you to make graph queries. Errors returned by the
 *   closure abort the traversal and propagate to the caller.
 */
pub fn forward_traverse<N, E, F, Err>(
    graph: &StableGraph<N, E>,
    mut callback: F,
) -> std::result::Result<(), Err>
where
    F: FnMut(GraphQuery<N, E>, NodeIndex) -> std::result::Result<(), Err>,
{
    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut ready: Vec<NodeIndex> = graph
        .node_identifiers()
        .filter(|&x| {
            graph
                .neighbors_directed(x, Direction::Incoming)
                .next()
                .is_none()
        })
        .collect();

    while let Some(n) = ready.pop() {
        if !visited.insert(n) {
            continue;
        }

        callback(GraphQuery(graph), n)?;

        for i in graph.neighbors_directed(n, Direction::Outgoing) {
            let i_ready = graph
                .neighbors_directed(i, Direction::Incoming)
                .all(|m| visited.contains(&m));

            if i_ready && !visited.contains(&i) {
                ready.push(i);
            }
        }
    }

    Ok(())
}

/**
 * A specialized topological DAG traversal that allows the following graph
 * mutations during traversal:
 * * Delete the current node
 * * Insert nodes after the current node
 * * Add new nodes with no dependencies
 *
 * Any other graph mutation will likely result in unvisited nodes.
 *
 * * `callback`: A closure that receives the current node index and an
 *   object allowing you to make graph queries. This closure returns a
 *   transform list or an error. On success, the transformations are
 *   applied before continuing the traversal. Errors will be propagated
 *   to the caller.
 */
pub fn forward_traverse_mut<N, E, F, T, Err>(
    graph: &mut StableGraph<N, E>,
    mut callback: F,
) -> std::result::Result<(), Err>
where
    N: Clone,
    E: Clone,
    T: TransformList<N, E>,
    F: FnMut(GraphQuery<N, E>, NodeIndex) -> std::result::Result<T, Err>,
{
    let mut ready: HashSet<NodeIndex> = HashSet::new();
    let mut visited: HashSet<NodeIndex> = HashSet::new();

    let mut ready_nodes: Vec<NodeIndex> = graph
        .node_identifiers()
        .filter(|&x| {
            graph
                .neighbors_directed(x, Direction::Incoming)
                .next()
                .is_none()
        })
        .collect();

    ready.extend(ready_nodes.iter());

    while let Some(n) = ready_nodes.pop() {
        visited.insert(n);

        // Remember the next nodes from the current node in case it gets deleted.
        let next_nodes: Vec<NodeIndex> = graph
            .neighbors_directed(n, Direction::Outgoing)
            .collect();

        // If the node was deleted by a transformation, skip it.
        if !graph.contains_node(n) {
            continue;
        }

        let transforms = callback(GraphQuery(graph), n)?;

        // Apply the transforms the callback produced
        let added_nodes = transforms.apply(graph);

        let node_ready = |n: NodeIndex| {
            graph
                .neighbors_directed(n, Direction::Incoming)
                .all(|m| visited.contains(&m))
        };

        // If the node still exists, push all its ready dependents
        if graph.contains_node(n) {
            for i in graph.neighbors_directed(n, Direction::Outgoing) {
                if !ready.contains(&i) && node_ready(i) {
                    ready.insert(i);
                    ready_nodes.push(i);
                }
            }
        }

        // Iterate through the next nodes that existed before visiting this node.
        for i in next_nodes {
            if graph.contains_node(i) && !ready.contains(&i) && node_ready(i) {
                ready.insert(i);
                ready_nodes.push(i);
            }
        }

        // Check for any sources the callback may have added.
        for i in added_nodes {
            if graph
                .neighbors_directed(i, Direction::Incoming)
                .next()
                .is_none()
            {
                ready.insert(i);
                ready_nodes.push(i);
            }
        }
    }

    Ok(())
}

/// Returns the producers feeding `node_index`'s operand slots, in slot
/// order. Commutative consumers get a canonically sorted list so swapped
/// operands produce the same signature.
fn operand_sources(
    query: &GraphQuery<IrNode, OperandIndex>,
    node_index: NodeIndex,
    commutative: bool,
) -> Vec<NodeIndex> {
    let mut sources = query
        .edges_directed(node_index, Direction::Incoming)
        .map(|e| (*e.weight(), e.source()))
        .sorted_by_key(|(slot, _)| *slot)
        .map(|(_, source)| source)
        .collect::<Vec<_>>();

    if commutative {
        sources.sort();
    }

    sources
}

/**
 * For the given computation graph, perform common subexpression
 * elimination (CSE).
 *
 * # Remarks
 * CSE is an optimization that collapses and reuses redundant
 * computations. For example:
 * ```ignore
 * a = b + c * d
 * e = c * d + 42
 * ```
 * The `c * d` subexpression can be computed once and shared between
 * the two expressions.
 *
 * Two nodes merge only when they consume the same producers (in either
 * order, for commutative operations) and [`are_equivalent`] holds, so
 * the pass never conflates nodes that merely happen to produce equal
 * results.
 */
pub fn common_subexpression_elimination(graph: &mut IrGraph) {
    forward_traverse_mut(graph, |query, index| {
        let mut transforms: GraphTransforms<IrNode, OperandIndex> = GraphTransforms::new();

        // Children of this node that survived prior rounds, keyed by the
        // producers feeding them.
        let mut kept: Vec<(Vec<NodeIndex>, NodeIndex)> = vec![];

        let children = query
            .neighbors_directed(index, Direction::Outgoing)
            .collect::<HashSet<_>>();

        for child in children {
            // Unwrapping is okay because child is a node in the graph.
            let child_node = query.get_node(child).unwrap();

            // Sources and leaves have no operand edges and never merge here.
            let signature = operand_sources(&query, child, child_node.is_commutative());

            if signature.is_empty() {
                continue;
            }

            let equivalent = kept.iter().position(|(sig, candidate)| {
                *sig == signature && are_equivalent(child_node, query.get_node(*candidate).unwrap())
            });

            match equivalent {
                Some(at) => {
                    let keep = kept[at].1;

                    trace!("CSE: collapsing {child:?} into {keep:?}");

                    // Move all of the removed node's outgoing edges to the
                    // node we're keeping, then delete it.
                    let keep = TransformNodeIndex::NodeIndex(keep);

                    for e in query.edges_directed(child, Direction::Outgoing) {
                        let target = TransformNodeIndex::NodeIndex(e.target());

                        transforms.push(Transform::AddEdge(keep, target, *e.weight()));
                    }

                    transforms.push(Transform::RemoveNode(TransformNodeIndex::NodeIndex(child)));
                }
                None => {
                    kept.push((signature, child));
                }
            }
        }

        Ok::<_, std::convert::Infallible>(transforms)
    })
    .expect("Traverse closure should be infallible.");
}

/// Simulates an entire graph over plaintext data, returning every node's
/// result.
///
/// # Remarks
/// `arguments` bind positionally to the graph's
/// [`Input`](crate::Input) nodes by program index. Fails with
/// [`Error::MissingProgramInput`] when an input has no bound argument and
/// with [`Error::MissingOperand`] when the graph is missing a producer
/// edge for some operand slot.
pub fn simulate(
    graph: &IrGraph,
    arguments: &[PlainValue],
) -> Result<HashMap<NodeIndex, PlainValue>> {
    let mut results: HashMap<NodeIndex, PlainValue> = HashMap::new();

    forward_traverse(graph, |query, index| {
        // Unwrapping is okay because index is a node in the graph.
        let node = query.get_node(index).unwrap();

        let data = match node {
            IrNode::Constant(_) => vec![],
            IrNode::Input(input) => {
                let argument = arguments.get(input.index()).ok_or(
                    Error::MissingProgramInput {
                        index: input.index(),
                    },
                )?;

                vec![argument.clone()]
            }
            _ => {
                let mut edges = query
                    .edges_directed(index, Direction::Incoming)
                    .map(|e| (*e.weight(), e.source()))
                    .collect::<Vec<_>>();

                edges.sort_by_key(|(slot, _)| *slot);

                node.inputs()
                    .iter()
                    .enumerate()
                    .map(|(slot, _)| {
                        let source = edges
                            .iter()
                            .find(|(w, _)| w.0 == slot)
                            .map(|(_, source)| *source)
                            .ok_or(Error::MissingOperand { slot })?;

                        Ok(results[&source].clone())
                    })
                    .collect::<Result<Vec<_>>>()?
            }
        };

        let result = node.evaluate(&data)?;
        results.insert(index, result);

        Ok(())
    })?;

    Ok(results)
}
