//! Vector geometry for chain generation.

/// Outcome of validating a candidate joint angle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JointCheck {
	Rejected,
	Accepted { uses_sharp: bool },
}

/// Angle in degrees at `prev` between the segment back to `prev_prev` and
/// the segment forward to `next`. A zero-length segment counts as straight
/// (180), which is never flagged as too sharp.
pub fn angle_at_vertex(prev_prev: (f64, f64), prev: (f64, f64), next: (f64, f64)) -> f64 {
	let (v1x, v1y) = (prev_prev.0 - prev.0, prev_prev.1 - prev.1);
	let (v2x, v2y) = (next.0 - prev.0, next.1 - prev.1);

	let dot = v1x * v2x + v1y * v2y;
	let mag1 = (v1x * v1x + v1y * v1y).sqrt();
	let mag2 = (v2x * v2x + v2y * v2y).sqrt();
	if mag1 == 0.0 || mag2 == 0.0 {
		return 180.0;
	}

	let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);
	cos_angle.acos().to_degrees()
}

/// Classify a joint angle for the constrained-chain generator.
///
/// Below 45 degrees reads as a kink, 85-95 as a suspicious right angle,
/// and above 175 as an accidental straight line; 45-85 is allowed once
/// per chain, tracked by `sharp_used`.
pub fn check_joint_angle(angle_deg: f64, sharp_used: bool) -> JointCheck {
	if angle_deg < 45.0 {
		return JointCheck::Rejected;
	}
	if angle_deg < 85.0 {
		if sharp_used {
			return JointCheck::Rejected;
		}
		return JointCheck::Accepted { uses_sharp: true };
	}
	if angle_deg <= 95.0 {
		return JointCheck::Rejected;
	}
	if angle_deg <= 175.0 {
		return JointCheck::Accepted { uses_sharp: false };
	}
	JointCheck::Rejected
}
