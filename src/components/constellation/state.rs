//! Group scheduling: spawning, per-frame updates, dead-group eviction.

use log::debug;
use rand::Rng;

use super::config::ConstellationConfig;
use super::group::Group;

/// Owns every live group plus the spawn timer. The RNG is injected so
/// spawn timing and generation can be replayed exactly in tests.
pub struct ConstellationState<R: Rng> {
	pub config: ConstellationConfig,
	pub groups: Vec<Group>,
	pub width: f64,
	pub height: f64,
	last_spawn: f64,
	rng: R,
}

impl<R: Rng> ConstellationState<R> {
	pub fn new(config: ConstellationConfig, width: f64, height: f64, rng: R) -> Self {
		Self {
			config,
			groups: Vec::new(),
			width,
			height,
			last_spawn: 0.0,
			rng,
		}
	}

	/// One animation step at monotonic time `time` (ms): spawn if the
	/// interval has elapsed and the cap allows, update every group, drop
	/// the dead ones.
	pub fn tick(&mut self, time: f64) {
		let alive = self.groups.iter().filter(|g| !g.dead).count();
		if alive < self.config.max_groups && time - self.last_spawn > self.config.spawn_interval
		{
			self.spawn_group(time);
		}

		// First frame, or right after a resize: don't wait out the
		// interval on an empty sky.
		if self.groups.is_empty() {
			self.spawn_group(time);
		}

		for group in &mut self.groups {
			group.update(time, &self.config);
		}
		self.groups.retain(|g| !g.dead);
	}

	fn spawn_group(&mut self, time: f64) {
		let pad = self.config.spawn_padding;
		let x = pad + self.rng.random::<f64>() * (self.width - pad * 2.0);
		let y = pad + self.rng.random::<f64>() * (self.height - pad * 2.0);
		let count = self
			.rng
			.random_range(self.config.min_nodes..=self.config.max_nodes);

		debug!("spawning group: {count} nodes at ({x:.0}, {y:.0})");
		self.groups
			.push(Group::spawn(&mut self.rng, &self.config, x, y, count, time));
		self.last_spawn = time;
	}

	/// Viewport changed: throw everything away and restart spawning. No
	/// attempt is made to reflow existing groups.
	pub fn resize(&mut self, width: f64, height: f64) {
		debug!("resize to {width:.0}x{height:.0}, resetting groups");
		self.width = width;
		self.height = height;
		self.groups.clear();
		self.last_spawn = 0.0;
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn state() -> ConstellationState<SmallRng> {
		ConstellationState::new(
			ConstellationConfig::default(),
			1280.0,
			800.0,
			SmallRng::seed_from_u64(42),
		)
	}

	#[test]
	fn first_tick_spawns_immediately() {
		let mut state = state();
		state.tick(0.0);
		assert_eq!(state.groups.len(), 1);
	}

	#[test]
	fn spawn_interval_gates_the_second_group() {
		let mut state = state();
		state.tick(0.0);
		state.tick(1000.0);
		state.tick(4999.0);
		assert_eq!(state.groups.len(), 1);
		state.tick(5001.0);
		assert_eq!(state.groups.len(), 2);
	}

	#[test]
	fn group_count_never_exceeds_cap() {
		let mut state = state();
		let cap = state.config.max_groups;
		let mut t = 0.0;
		while t < 120_000.0 {
			state.tick(t);
			assert!(state.groups.iter().filter(|g| !g.dead).count() <= cap);
			t += 100.0;
		}
	}

	#[test]
	fn dead_groups_are_evicted() {
		let mut state = state();
		state.config.line_stagger = 10.0;
		state.config.line_fade_in_time = 10.0;
		state.config.line_visible_time = 10.0;
		state.config.line_fade_out_time = 10.0;
		state.config.spawn_interval = 1e12;

		state.tick(0.0);
		let mut t = 0.0;
		// Drive the only group through its whole lifecycle; the manager
		// must drop it the tick it dies, then respawn via the empty-list
		// bypass.
		loop {
			t += 5.0;
			state.tick(t);
			assert!(state.groups.iter().all(|g| !g.dead));
			if state.groups.iter().any(|g| g.birth_time > 0.0) {
				break;
			}
			assert!(t < 60_000.0, "group never died");
		}
	}

	#[test]
	fn spawn_positions_respect_viewport_padding() {
		let mut state = state();
		state.config.spawn_interval = 0.0;
		let mut t = 0.0;
		for _ in 0..50 {
			t += 1.0;
			state.tick(t);
			for group in &state.groups {
				let (x, y) = (group.nodes[0].x, group.nodes[0].y);
				assert!(x >= state.config.spawn_padding && x <= state.width - state.config.spawn_padding);
				assert!(y >= state.config.spawn_padding && y <= state.height - state.config.spawn_padding);
			}
			state.groups.clear();
		}
	}

	#[test]
	fn node_counts_stay_in_configured_range() {
		let mut state = state();
		state.config.spawn_interval = 0.0;
		let mut t = 0.0;
		for _ in 0..50 {
			t += 1.0;
			state.tick(t);
			for group in &state.groups {
				assert!(group.nodes.len() <= state.config.max_nodes);
				// Chains may end short of the request but never below
				// the first two unconstrained nodes.
				assert!(group.nodes.len() >= 2);
			}
			state.groups.clear();
		}
	}

	#[test]
	fn resize_resets_and_respawns_immediately() {
		let mut state = state();
		state.tick(0.0);
		state.tick(6000.0);
		assert_eq!(state.groups.len(), 2);

		state.resize(640.0, 480.0);
		assert!(state.groups.is_empty());

		state.tick(6016.0);
		assert_eq!(state.groups.len(), 1);
		assert_eq!(state.groups[0].birth_time, 6016.0);
	}
}
