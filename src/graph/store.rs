use std::collections::HashMap;

use super::types::{Edge, Id, Node};

/// Reasons a graph can be rejected at load time.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MalformedGraphError {
	/// Two nodes share an id.
	#[error("duplicate node id '{0}'")]
	DuplicateNode(Id),

	/// Two edges share an id.
	#[error("duplicate edge id '{0}'")]
	DuplicateEdge(Id),

	/// An edge endpoint names a node that does not exist.
	#[error("edge '{edge}' references unknown node '{endpoint}'")]
	DanglingEdge {
		/// The offending edge.
		edge: Id,
		/// The missing node.
		endpoint: Id,
	},
}

/// Immutable, id-indexed node/edge storage.
///
/// Nodes and edges keep their document order; incident edge lists per node
/// follow edge insertion order.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	node_index: HashMap<Id, usize>,
	edge_index: HashMap<Id, usize>,
	incident: Vec<Vec<usize>>,
}

impl GraphStore {
	/// Builds the lookup tables, rejecting duplicate ids and dangling endpoints.
	pub fn load(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, MalformedGraphError> {
		let mut node_index = HashMap::with_capacity(nodes.len());
		for (i, node) in nodes.iter().enumerate() {
			if node_index.insert(node.id.clone(), i).is_some() {
				return Err(MalformedGraphError::DuplicateNode(node.id.clone()));
			}
		}

		let mut edge_index = HashMap::with_capacity(edges.len());
		let mut incident = vec![Vec::new(); nodes.len()];
		for (i, edge) in edges.iter().enumerate() {
			if edge_index.insert(edge.id.clone(), i).is_some() {
				return Err(MalformedGraphError::DuplicateEdge(edge.id.clone()));
			}
			let endpoint = |id: &Id| {
				node_index
					.get(id)
					.copied()
					.ok_or_else(|| MalformedGraphError::DanglingEdge {
						edge: edge.id.clone(),
						endpoint: id.clone(),
					})
			};
			let (from, to) = (endpoint(&edge.from)?, endpoint(&edge.to)?);
			incident[from].push(i);
			if to != from {
				incident[to].push(i);
			}
		}

		Ok(Self {
			nodes,
			edges,
			node_index,
			edge_index,
			incident,
		})
	}

	/// Node with `id`, if any.
	pub fn get_node(&self, id: &Id) -> Option<&Node> {
		self.node_index.get(id).map(|&i| &self.nodes[i])
	}

	/// Edge with `id`, if any.
	pub fn get_edge(&self, id: &Id) -> Option<&Edge> {
		self.edge_index.get(id).map(|&i| &self.edges[i])
	}

	/// True when a node with `id` exists.
	pub fn contains(&self, id: &Id) -> bool {
		self.node_index.contains_key(id)
	}

	/// Edges with `id` as either endpoint, in insertion order. Unknown ids yield nothing.
	pub fn edges_touching<'a>(&'a self, id: &Id) -> impl Iterator<Item = &'a Edge> + use<'a> {
		self.node_index
			.get(id)
			.map(|&i| self.incident[i].as_slice())
			.unwrap_or_default()
			.iter()
			.map(|&e| &self.edges[e])
	}

	/// All nodes in document order.
	pub fn nodes(&self) -> impl Iterator<Item = &Node> {
		self.nodes.iter()
	}

	/// All edges in document order.
	pub fn edges(&self) -> impl Iterator<Item = &Edge> {
		self.edges.iter()
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of edges.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ids<'a>(edges: impl Iterator<Item = &'a Edge>) -> Vec<String> {
		edges.map(|e| e.id.to_string()).collect()
	}

	fn sample() -> GraphStore {
		GraphStore::load(
			vec![Node::new("A"), Node::new("B"), Node::new("C")],
			vec![
				Edge::new("e1", "A", "B"),
				Edge::new("e2", "C", "A"),
				Edge::new("e3", "B", "C"),
				Edge::new("e4", "A", "B"),
			],
		)
		.unwrap()
	}

	#[test]
	fn edges_touching_follows_insertion_order() {
		let graph = sample();
		assert_eq!(ids(graph.edges_touching(&"A".into())), ["e1", "e2", "e4"]);
		assert_eq!(ids(graph.edges_touching(&"B".into())), ["e1", "e3", "e4"]);
		assert_eq!(ids(graph.edges_touching(&"C".into())), ["e2", "e3"]);
	}

	#[test]
	fn unknown_node_has_no_edges() {
		let graph = sample();
		assert_eq!(graph.edges_touching(&"Z".into()).count(), 0);
		assert!(graph.get_node(&"Z".into()).is_none());
	}

	#[test]
	fn self_loop_listed_once() {
		let graph = GraphStore::load(vec![Node::new("A")], vec![Edge::new("loop", "A", "A")])
			.unwrap();
		assert_eq!(ids(graph.edges_touching(&"A".into())), ["loop"]);
	}

	#[test]
	fn lookup_by_id() {
		let graph = sample();
		assert_eq!(graph.get_node(&"B".into()).map(|n| &n.id), Some(&Id::from("B")));
		assert_eq!(graph.get_edge(&"e2".into()).map(|e| &e.from), Some(&Id::from("C")));
		assert_eq!((graph.node_count(), graph.edge_count()), (3, 4));
	}

	#[test]
	fn dangling_endpoint_rejected() {
		let err = GraphStore::load(vec![Node::new("A")], vec![Edge::new("e1", "A", "B")])
			.unwrap_err();
		assert_eq!(
			err,
			MalformedGraphError::DanglingEdge {
				edge: "e1".into(),
				endpoint: "B".into(),
			}
		);
	}

	#[test]
	fn duplicate_ids_rejected() {
		let err = GraphStore::load(vec![Node::new("A"), Node::new("A")], vec![]).unwrap_err();
		assert_eq!(err, MalformedGraphError::DuplicateNode("A".into()));

		let err = GraphStore::load(
			vec![Node::new("A"), Node::new("B")],
			vec![Edge::new("e", "A", "B"), Edge::new("e", "B", "A")],
		)
		.unwrap_err();
		assert_eq!(err, MalformedGraphError::DuplicateEdge("e".into()));
	}

	#[test]
	fn string_and_integer_ids_are_distinct() {
		let graph = GraphStore::load(vec![Node::new(1_i64), Node::new("1")], vec![]).unwrap();
		assert_eq!(graph.node_count(), 2);
		assert!(graph.contains(&Id::Int(1)));
		assert!(graph.contains(&Id::from("1")));
	}
}
