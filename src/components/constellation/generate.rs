//! Procedural layout and connection generation for star groups.
//!
//! Generation runs once per group, at spawn; nothing here is touched on
//! the frame path.

use std::f64::consts::TAU;

use rand::Rng;

use super::config::{ConstellationConfig, GenerationStrategy};
use super::geometry::{self, JointCheck};
use super::group::{Connection, Node};

/// Placement attempts per chain node before giving up and ending the
/// chain short of the requested count.
const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

/// Build a group's node layout and connection set around (cx, cy).
pub fn generate<R: Rng>(
	rng: &mut R,
	config: &ConstellationConfig,
	cx: f64,
	cy: f64,
	node_count: usize,
) -> (Vec<Node>, Vec<Connection>) {
	match config.strategy {
		GenerationStrategy::ConstrainedChain => {
			let nodes = chain_nodes(rng, cx, cy, node_count, config.node_spread);
			let connections = chain_connections(nodes.len());
			(nodes, connections)
		}
		GenerationStrategy::SpanningTree => {
			let nodes = scatter_nodes(rng, cx, cy, node_count, config.node_spread);
			let connections = spanning_tree_connections(rng, nodes.len());
			(nodes, connections)
		}
	}
}

fn random_offset<R: Rng>(rng: &mut R, spread: f64) -> (f64, f64) {
	let angle = rng.random::<f64>() * TAU;
	let dist = spread * (0.7 + rng.random::<f64>() * 0.5);
	(angle.cos() * dist, angle.sin() * dist)
}

/// Chain layout: each node is placed relative to the previous one, and the
/// joint angle at each interior node is constrained so the path reads as a
/// deliberate constellation rather than noise. At most one 45-85 degree
/// joint is allowed per chain.
fn chain_nodes<R: Rng>(rng: &mut R, cx: f64, cy: f64, count: usize, spread: f64) -> Vec<Node> {
	let mut nodes = vec![Node::new(rng, cx, cy)];
	if count < 2 {
		return nodes;
	}

	// Second node goes in any direction; no joint exists yet.
	let (dx, dy) = random_offset(rng, spread);
	let node = Node::new(rng, cx + dx, cy + dy);
	nodes.push(node);

	let mut sharp_used = false;
	for i in 2..count {
		let prev = (nodes[i - 1].x, nodes[i - 1].y);
		let prev_prev = (nodes[i - 2].x, nodes[i - 2].y);

		let mut placed = None;
		for _ in 0..MAX_PLACEMENT_ATTEMPTS {
			let (dx, dy) = random_offset(rng, spread);
			let candidate = (prev.0 + dx, prev.1 + dy);
			let joint = geometry::angle_at_vertex(prev_prev, prev, candidate);
			if let JointCheck::Accepted { uses_sharp } =
				geometry::check_joint_angle(joint, sharp_used)
			{
				sharp_used |= uses_sharp;
				placed = Some(candidate);
				break;
			}
		}

		// Attempt budget exhausted: the chain simply ends short. Expected
		// outcome, not an error.
		match placed {
			Some((x, y)) => nodes.push(Node::new(rng, x, y)),
			None => break,
		}
	}
	nodes
}

/// Chain connections: node i to node i+1, revealed in path order.
fn chain_connections(node_count: usize) -> Vec<Connection> {
	(0..node_count.saturating_sub(1))
		.map(|i| Connection::new(i, i + 1, i))
		.collect()
}

/// Organic layout: each node branches off a uniformly chosen earlier node
/// with no angle constraint.
fn scatter_nodes<R: Rng>(rng: &mut R, cx: f64, cy: f64, count: usize, spread: f64) -> Vec<Node> {
	let mut nodes = vec![Node::new(rng, cx, cy)];
	for _ in 1..count {
		let parent = rng.random_range(0..nodes.len());
		let (px, py) = (nodes[parent].x, nodes[parent].y);
		let (dx, dy) = random_offset(rng, spread);
		let node = Node::new(rng, px + dx, py + dy);
		nodes.push(node);
	}
	nodes
}

/// Random spanning tree over the node set, plus sometimes one extra edge
/// to close a cycle. Connectivity holds by construction: every edge joins
/// an unconnected node to the connected component.
fn spanning_tree_connections<R: Rng>(rng: &mut R, node_count: usize) -> Vec<Connection> {
	if node_count < 2 {
		return Vec::new();
	}

	let mut connections = Vec::with_capacity(node_count);
	let mut connected = vec![0];
	let mut pending: Vec<usize> = (1..node_count).collect();
	let mut order = 0;
	while !pending.is_empty() {
		let node = pending.swap_remove(rng.random_range(0..pending.len()));
		let anchor = connected[rng.random_range(0..connected.len())];
		connections.push(Connection::new(anchor, node, order));
		connected.push(node);
		order += 1;
	}

	// One optional cycle edge, skipping duplicates of existing edges.
	if node_count >= 4 && rng.random_bool(0.5) {
		for _ in 0..10 {
			let a = rng.random_range(0..node_count);
			let b = rng.random_range(0..node_count);
			if a == b {
				continue;
			}
			let duplicate = connections
				.iter()
				.any(|c| (c.a == a && c.b == b) || (c.a == b && c.b == a));
			if duplicate {
				continue;
			}
			connections.push(Connection::new(a, b, order));
			break;
		}
	}

	connections
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;
	use super::super::geometry::angle_at_vertex;

	fn reachable_from_zero(node_count: usize, connections: &[Connection]) -> usize {
		let mut seen = vec![false; node_count];
		let mut stack = vec![0];
		seen[0] = true;
		while let Some(n) = stack.pop() {
			for c in connections {
				let next = if c.a == n {
					c.b
				} else if c.b == n {
					c.a
				} else {
					continue;
				};
				if !seen[next] {
					seen[next] = true;
					stack.push(next);
				}
			}
		}
		seen.iter().filter(|s| **s).count()
	}

	fn config(strategy: GenerationStrategy) -> ConstellationConfig {
		ConstellationConfig {
			strategy,
			..ConstellationConfig::default()
		}
	}

	#[test]
	fn both_strategies_produce_connected_graphs() {
		for strategy in [
			GenerationStrategy::ConstrainedChain,
			GenerationStrategy::SpanningTree,
		] {
			let config = config(strategy);
			for seed in 0..200 {
				let mut rng = SmallRng::seed_from_u64(seed);
				let count = rng.random_range(config.min_nodes..=config.max_nodes);
				let (nodes, connections) = generate(&mut rng, &config, 400.0, 300.0, count);
				assert_eq!(
					reachable_from_zero(nodes.len(), &connections),
					nodes.len(),
					"disconnected graph for {strategy:?} seed {seed}"
				);
			}
		}
	}

	#[test]
	fn every_node_has_at_least_one_connection() {
		for strategy in [
			GenerationStrategy::ConstrainedChain,
			GenerationStrategy::SpanningTree,
		] {
			let config = config(strategy);
			for seed in 0..100 {
				let mut rng = SmallRng::seed_from_u64(seed);
				let (nodes, connections) = generate(&mut rng, &config, 0.0, 0.0, 5);
				for i in 0..nodes.len() {
					assert!(
						connections.iter().any(|c| c.a == i || c.b == i),
						"isolated node {i} for {strategy:?} seed {seed}"
					);
				}
			}
		}
	}

	#[test]
	fn chain_joints_stay_in_allowed_bands() {
		let config = config(GenerationStrategy::ConstrainedChain);
		for seed in 0..300 {
			let mut rng = SmallRng::seed_from_u64(seed);
			let (nodes, _) = generate(&mut rng, &config, 0.0, 0.0, 6);
			let mut sharp_joints = 0;
			for i in 2..nodes.len() {
				let joint = angle_at_vertex(
					(nodes[i - 2].x, nodes[i - 2].y),
					(nodes[i - 1].x, nodes[i - 1].y),
					(nodes[i].x, nodes[i].y),
				);
				let obtuse = joint > 95.0 && joint <= 175.0;
				let sharp = (45.0..85.0).contains(&joint);
				assert!(
					obtuse || sharp,
					"joint {joint} out of band for seed {seed}"
				);
				if sharp {
					sharp_joints += 1;
				}
			}
			assert!(sharp_joints <= 1, "{sharp_joints} sharp joints for seed {seed}");
		}
	}

	#[test]
	fn chain_spacing_within_spread_range() {
		let config = config(GenerationStrategy::ConstrainedChain);
		for seed in 0..100 {
			let mut rng = SmallRng::seed_from_u64(seed);
			let (nodes, _) = generate(&mut rng, &config, 0.0, 0.0, 5);
			for pair in nodes.windows(2) {
				let dist = ((pair[1].x - pair[0].x).powi(2) + (pair[1].y - pair[0].y).powi(2))
					.sqrt();
				assert!(dist >= config.node_spread * 0.7 - 1e-9);
				assert!(dist <= config.node_spread * 1.2 + 1e-9);
			}
		}
	}

	#[test]
	fn chain_orders_follow_path_order() {
		let config = config(GenerationStrategy::ConstrainedChain);
		let mut rng = SmallRng::seed_from_u64(7);
		let (nodes, connections) = generate(&mut rng, &config, 0.0, 0.0, 5);
		assert!(nodes.len() >= 2);
		assert!(nodes.len() <= 5);
		for (i, c) in connections.iter().enumerate() {
			assert_eq!((c.a, c.b, c.order), (i, i + 1, i));
		}
	}

	#[test]
	fn spanning_tree_has_no_duplicate_edges() {
		let config = config(GenerationStrategy::SpanningTree);
		for seed in 0..200 {
			let mut rng = SmallRng::seed_from_u64(seed);
			let (nodes, connections) = generate(&mut rng, &config, 0.0, 0.0, 6);
			assert_eq!(nodes.len(), 6);
			// A tree plus at most one cycle edge.
			assert!(connections.len() >= nodes.len() - 1);
			assert!(connections.len() <= nodes.len());
			for (i, c) in connections.iter().enumerate() {
				assert_ne!(c.a, c.b);
				assert_eq!(c.order, i);
				for other in &connections[i + 1..] {
					let same = (c.a == other.a && c.b == other.b)
						|| (c.a == other.b && c.b == other.a);
					assert!(!same, "duplicate edge for seed {seed}");
				}
			}
		}
	}

	#[test]
	fn single_node_request_yields_no_connections() {
		let config = config(GenerationStrategy::ConstrainedChain);
		let mut rng = SmallRng::seed_from_u64(0);
		let (nodes, connections) = generate(&mut rng, &config, 10.0, 10.0, 1);
		assert_eq!(nodes.len(), 1);
		assert!(connections.is_empty());
	}
}
