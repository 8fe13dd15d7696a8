//! A single star group and the per-connection lifecycle state machine.

use rand::Rng;

use super::config::ConstellationConfig;
use super::generate;

/// Smoothing factor applied per frame when easing a node's opacity toward
/// the brightest of its incident connections.
const NODE_EASE: f64 = 0.08;

/// Lifecycle of one connection. `Dead` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkState {
	Waiting,
	FadingIn,
	Bright,
	FadingOut,
	Dead,
}

#[derive(Clone, Debug)]
pub struct Node {
	pub x: f64,
	pub y: f64,
	/// Per-node oscillation offset in [0, 2pi) for the pulse effect.
	pub phase: f64,
	pub opacity: f64,
}

impl Node {
	pub fn new<R: Rng>(rng: &mut R, x: f64, y: f64) -> Self {
		Self {
			x,
			y,
			phase: rng.random::<f64>() * std::f64::consts::TAU,
			opacity: 0.0,
		}
	}
}

/// Edge between two node indices of the owning group.
#[derive(Clone, Debug)]
pub struct Connection {
	pub a: usize,
	pub b: usize,
	/// Reveal rank: delays this edge's fade-in by `order * line_stagger`.
	pub order: usize,
	pub opacity: f64,
	pub state: LinkState,
	/// Timestamp of the last state transition.
	pub state_start: f64,
}

impl Connection {
	pub fn new(a: usize, b: usize, order: usize) -> Self {
		Self {
			a,
			b,
			order,
			opacity: 0.0,
			state: LinkState::Waiting,
			state_start: 0.0,
		}
	}
}

/// One procedurally generated cluster of nodes and connections with an
/// independent birth/death lifecycle.
#[derive(Clone, Debug)]
pub struct Group {
	pub nodes: Vec<Node>,
	pub connections: Vec<Connection>,
	pub birth_time: f64,
	pub dead: bool,
}

impl Group {
	/// Generate a new group centered at (x, y). Layout is fixed at
	/// creation; only opacities change afterwards.
	pub fn spawn<R: Rng>(
		rng: &mut R,
		config: &ConstellationConfig,
		x: f64,
		y: f64,
		node_count: usize,
		time: f64,
	) -> Self {
		let (nodes, connections) = generate::generate(rng, config, x, y, node_count);
		Self {
			nodes,
			connections,
			birth_time: time,
			dead: false,
		}
	}

	/// Advance every connection's lifecycle and re-derive node opacities.
	/// `time` is the monotonic animation clock in ms.
	pub fn update(&mut self, time: f64, config: &ConstellationConfig) {
		let age = time - self.birth_time;

		// Census of bright lines, taken once before any transition so a
		// frame's evictions are based on a consistent snapshot.
		let mut bright_count = 0;
		let mut oldest_bright: Option<usize> = None;
		let mut oldest_start = f64::INFINITY;
		for (i, conn) in self.connections.iter().enumerate() {
			if conn.state == LinkState::Bright {
				bright_count += 1;
				if conn.state_start < oldest_start {
					oldest_start = conn.state_start;
					oldest_bright = Some(i);
				}
			}
		}

		for (i, conn) in self.connections.iter_mut().enumerate() {
			match conn.state {
				LinkState::Waiting => {
					if age >= conn.order as f64 * config.line_stagger {
						conn.state = LinkState::FadingIn;
						conn.state_start = time;
					}
				}
				LinkState::FadingIn => {
					let progress = (time - conn.state_start) / config.line_fade_in_time;
					conn.opacity = progress.min(1.0);
					if progress >= 1.0 {
						conn.state = LinkState::Bright;
						conn.state_start = time;
					}
				}
				LinkState::Bright => {
					conn.opacity = 1.0;
					let lit_for = time - conn.state_start;
					let over_cap =
						bright_count > config.max_bright_lines && oldest_bright == Some(i);
					if lit_for > config.line_visible_time || over_cap {
						conn.state = LinkState::FadingOut;
						conn.state_start = time;
					}
				}
				LinkState::FadingOut => {
					let progress = (time - conn.state_start) / config.line_fade_out_time;
					conn.opacity = (1.0 - progress).max(0.0);
					if progress >= 1.0 {
						conn.state = LinkState::Dead;
						conn.opacity = 0.0;
					}
				}
				LinkState::Dead => {}
			}
		}

		// A node glows as brightly as its brightest incident line, eased
		// so it never pops.
		for (i, node) in self.nodes.iter_mut().enumerate() {
			let target = self
				.connections
				.iter()
				.filter(|c| c.a == i || c.b == i)
				.map(|c| c.opacity)
				.fold(0.0, f64::max);
			node.opacity += (target - node.opacity) * NODE_EASE;
		}

		if self.connections.iter().all(|c| c.state == LinkState::Dead) {
			self.dead = true;
		}
	}
}
