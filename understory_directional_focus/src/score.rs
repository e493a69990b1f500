// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate scoring.
//!
//! All scores are "higher is better"; a score of `0.0` or less means the
//! candidate is not a valid target in the requested direction.
//!
//! Distances are measured edge to edge. The *primary* axis is the axis of
//! movement, the *secondary* axis is the cross axis. A candidate is in the
//! reference's *shadow* when their secondary-axis ranges overlap, that is,
//! when sliding the reference along the direction of movement would hit it.

use kurbo::Rect;

use crate::manifold::{Manifolds, Span};
use crate::types::Direction;

/// Tangent of the half-angle of the projection cone (45 degrees).
const CONE_SLOPE: f64 = 1.0;

/// Integer weights of the projection score terms.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProjectionWeights {
    /// Weight of closeness along the direction of movement.
    pub primary_axis_distance: u32,
    /// Weight of closeness along the cross axis, for candidates outside the
    /// reference's shadow.
    pub secondary_axis_distance: u32,
    /// Weight of the fraction of the candidate inside the current manifold.
    pub percent_in_manifold_shadow: u32,
    /// Weight of the fraction of the candidate inside the reference's shadow.
    pub percent_in_shadow: u32,
}

impl Default for ProjectionWeights {
    fn default() -> Self {
        Self {
            primary_axis_distance: 15,
            secondary_axis_distance: 1,
            percent_in_manifold_shadow: 10_000,
            percent_in_shadow: 100,
        }
    }
}

impl ProjectionWeights {
    /// Score `candidate` for a move from `reference` in `direction`.
    ///
    /// `max_distance` normalizes the distance terms and must be positive.
    pub fn score(
        &self,
        direction: Direction,
        reference: Rect,
        candidate: Rect,
        manifolds: &Manifolds,
        max_distance: f64,
    ) -> f64 {
        let Some(primary) = primary_axis_distance(direction, reference, candidate) else {
            return 0.0;
        };
        let mut secondary = secondary_axis_distance(direction, reference, candidate);

        let (reference_span, potential) = cross_spans(direction, reference, candidate);
        let in_shadow = percent_in_shadow(reference_span, potential);
        let mut in_manifold = 0.0;
        if in_shadow > 0.0 {
            // Shadowed candidates are ranked by the shadow terms instead.
            if let Some(manifold) = manifolds.for_direction(direction) {
                in_manifold = percent_in_shadow(manifold, potential);
            }
            secondary = max_distance;
        }

        (1.0 - primary / max_distance) * f64::from(self.primary_axis_distance)
            + (1.0 - secondary / max_distance) * f64::from(self.secondary_axis_distance)
            + in_shadow * f64::from(self.percent_in_shadow)
            + in_manifold * f64::from(self.percent_in_manifold_shadow)
    }
}

/// Score `candidate` by distance alone.
///
/// With `rectilinear` unset only the primary-axis distance counts; otherwise
/// the primary and secondary distances are summed.
pub fn proximity_score(
    direction: Direction,
    reference: Rect,
    candidate: Rect,
    max_distance: f64,
    rectilinear: bool,
) -> f64 {
    let Some(primary) = primary_axis_distance(direction, reference, candidate) else {
        return 0.0;
    };
    let distance = if rectilinear {
        primary + secondary_axis_distance(direction, reference, candidate)
    } else {
        primary
    };
    1.0 - distance / max_distance
}

/// Distance from the leading edge of `reference` to the near edge of
/// `candidate` along `direction`.
///
/// Returns `None` when `candidate` does not lie in `direction`: it must start
/// beyond the leading edge, or overlap `reference` and extend past it.
/// Identical rectangles never have a primary-axis distance.
pub fn primary_axis_distance(direction: Direction, reference: Rect, candidate: Rect) -> Option<f64> {
    if reference == candidate {
        return None;
    }
    let overlapping = rects_overlap(reference, candidate);
    let r = reference;
    let c = candidate;
    match direction {
        Direction::Left if c.x1 <= r.x0 || (overlapping && c.x0 <= r.x0) => Some((r.x0 - c.x1).abs()),
        Direction::Right if c.x0 >= r.x1 || (overlapping && c.x1 >= r.x1) => Some((c.x0 - r.x1).abs()),
        Direction::Up if c.y1 <= r.y0 || (overlapping && c.y0 <= r.y0) => Some((r.y0 - c.y1).abs()),
        Direction::Down if c.y0 >= r.y1 || (overlapping && c.y1 >= r.y1) => Some((c.y0 - r.y1).abs()),
        _ => None,
    }
}

/// Gap between `reference` and `candidate` along the cross axis of
/// `direction`; `0.0` when their cross-axis ranges touch or overlap.
pub fn secondary_axis_distance(direction: Direction, reference: Rect, candidate: Rect) -> f64 {
    let (r, c) = cross_spans(direction, reference, candidate);
    if c.end < r.start {
        r.start - c.end
    } else if c.start > r.end {
        c.start - r.end
    } else {
        0.0
    }
}

/// Fraction of the smaller of the two spans covered by their intersection.
///
/// Returns `0.0` when the spans are disjoint or merely touch.
pub fn percent_in_shadow(reference: Span, potential: Span) -> f64 {
    if reference.start >= potential.end || reference.end <= potential.start {
        return 0.0;
    }
    let shadow = reference.end.min(potential.end) - reference.start.max(potential.start);
    let smaller = reference.len().min(potential.len());
    if smaller > 0.0 { shadow / smaller } else { 0.0 }
}

/// Whether `candidate` intersects the cone projected from `reference`'s
/// leading edge in `direction`, out to `max_distance`.
///
/// The cone opens at 45 degrees on each side of the direction of travel, so the
/// widest cross-section inside the candidate's extent is at its far edge.
pub fn in_cone(direction: Direction, reference: Rect, candidate: Rect, max_distance: f64) -> bool {
    let r = reference;
    let c = candidate;
    let (travel, near, far) = match direction {
        Direction::Left => (r.x0 - c.x0, r.y0, r.y1),
        Direction::Right => (c.x1 - r.x1, r.y0, r.y1),
        Direction::Up => (r.y0 - c.y0, r.x0, r.x1),
        Direction::Down => (c.y1 - r.y1, r.x0, r.x1),
        Direction::Next | Direction::Previous => return false,
    };
    if travel < 0.0 {
        return false;
    }
    let spread = travel.min(max_distance) * CONE_SLOPE;
    let (_, potential) = cross_spans(direction, reference, candidate);
    potential.start <= far + spread && potential.end >= near - spread
}

/// Largest distance, along both axes, from `reference` to the far corner of
/// `candidate`.
///
/// Always at least as large as the primary plus secondary distance of the
/// candidate, so normalizing by it keeps proximity scores non-negative.
pub fn max_directional_distance(direction: Direction, reference: Rect, candidate: Rect) -> f64 {
    let r = reference;
    let c = candidate;
    let dx = (c.x1 - r.x0).abs().max((r.x1 - c.x0).abs());
    let dy = (c.y1 - r.y0).abs().max((r.y1 - c.y0).abs());
    match direction {
        Direction::Next | Direction::Previous => 0.0,
        _ => dx + dy,
    }
}

/// Whether two rectangles share interior area.
pub(crate) fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// Whether `candidate` overlaps or lies within `exclusion`.
pub(crate) fn excluded(exclusion: Rect, candidate: Rect) -> bool {
    rects_overlap(exclusion, candidate) || encloses(exclusion, candidate)
}

/// Whether `outer` covers all of `inner`, edges included.
///
/// A candidate enclosing the reference is never a directional target.
pub(crate) fn encloses(outer: Rect, inner: Rect) -> bool {
    outer.x0 <= inner.x0 && outer.y0 <= inner.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

/// Cross-axis spans of `reference` and `candidate`.
fn cross_spans(direction: Direction, reference: Rect, candidate: Rect) -> (Span, Span) {
    if direction.is_horizontal() {
        (Span::vertical(reference), Span::vertical(candidate))
    } else {
        (Span::horizontal(reference), Span::horizontal(candidate))
    }
}
