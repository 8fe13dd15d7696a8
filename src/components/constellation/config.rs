/// How a group's node layout and connection set are produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationStrategy {
	/// Single path of nodes with joint-angle constraints between
	/// consecutive edges.
	ConstrainedChain,
	/// Random spanning tree with unconstrained placement, optionally
	/// closed into one cycle.
	SpanningTree,
}

/// Tunable parameters for the constellation overlay. One record covers
/// every variant; defaults match the production values.
#[derive(Clone, Debug)]
pub struct ConstellationConfig {
	pub strategy: GenerationStrategy,
	/// Hard cap on concurrently alive groups.
	pub max_groups: usize,
	pub min_nodes: usize,
	pub max_nodes: usize,
	/// Base distance between chained nodes, in pixels.
	pub node_spread: f64,
	/// Minimum time between group spawns, in ms.
	pub spawn_interval: f64,
	/// Inset from the viewport edges when picking a group center.
	pub spawn_padding: f64,
	pub line_fade_in_time: f64,
	pub line_fade_out_time: f64,
	/// Delay between consecutive edges starting their fade-in.
	pub line_stagger: f64,
	/// How long an edge stays fully lit before fading on its own.
	pub line_visible_time: f64,
	/// Spotlight cap: at most this many edges fully lit per group,
	/// oldest evicted first.
	pub max_bright_lines: usize,
}

impl Default for ConstellationConfig {
	fn default() -> Self {
		Self {
			strategy: GenerationStrategy::ConstrainedChain,
			max_groups: 3,
			min_nodes: 4,
			max_nodes: 5,
			node_spread: 110.0,
			spawn_interval: 5000.0,
			spawn_padding: 150.0,
			line_fade_in_time: 3000.0,
			line_fade_out_time: 4000.0,
			line_stagger: 2000.0,
			line_visible_time: 4000.0,
			max_bright_lines: 3,
		}
	}
}
