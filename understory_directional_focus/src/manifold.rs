// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation manifolds: persisted per-axis alignment from prior moves.
//!
//! After a successful horizontal move, the horizontal manifold remembers the
//! vertical band shared by the old and new focus; the next horizontal move
//! then prefers candidates inside that band, so repeated Right presses keep
//! walking along the same row even across elements of different heights.

use kurbo::Rect;

use crate::types::Direction;

/// A closed range along one axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Span {
    /// Lower end.
    pub start: f64,
    /// Upper end.
    pub end: f64,
}

impl Span {
    /// Create a span.
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// The vertical extent of `rect`.
    pub const fn vertical(rect: Rect) -> Self {
        Self::new(rect.y0, rect.y1)
    }

    /// The horizontal extent of `rect`.
    pub const fn horizontal(rect: Rect) -> Self {
        Self::new(rect.x0, rect.x1)
    }

    /// Length of the span.
    pub fn len(self) -> f64 {
        self.end - self.start
    }

    /// Whether the span has no positive length.
    pub fn is_empty(self) -> bool {
        self.end <= self.start
    }
}

/// Snapshot of both manifolds.
///
/// `horizontal` biases Left/Right moves and holds a vertical band;
/// `vertical` biases Up/Down moves and holds a horizontal band.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Manifolds {
    /// Band used while moving Left/Right.
    pub horizontal: Option<Span>,
    /// Band used while moving Up/Down.
    pub vertical: Option<Span>,
}

impl Manifolds {
    /// Manifolds aligned with `rect` on both axes.
    pub const fn from_rect(rect: Rect) -> Self {
        Self {
            horizontal: Some(Span::vertical(rect)),
            vertical: Some(Span::horizontal(rect)),
        }
    }

    /// The manifold relevant to a move in `direction`.
    pub fn for_direction(&self, direction: Direction) -> Option<Span> {
        if direction.is_horizontal() {
            self.horizontal
        } else if direction.is_vertical() {
            self.vertical
        } else {
            None
        }
    }
}

/// Owner of the current [`Manifolds`].
#[derive(Clone, Debug, Default)]
pub struct ManifoldTracker {
    current: Manifolds,
}

impl ManifoldTracker {
    /// Create a tracker with both manifolds unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot.
    pub fn get(&self) -> Manifolds {
        self.current
    }

    /// Return the current snapshot and clear both manifolds.
    pub fn reset(&mut self) -> Manifolds {
        core::mem::take(&mut self.current)
    }

    /// Overwrite the current snapshot.
    pub fn set(&mut self, manifolds: Manifolds) {
        self.current = manifolds;
    }

    /// Recompute the manifolds after a move in `direction` from `reference`
    /// to `winner`.
    pub fn update(&mut self, direction: Direction, reference: Rect, winner: Rect) {
        let m = &mut self.current;
        let h = *m.horizontal.get_or_insert(Span::vertical(reference));
        let v = *m.vertical.get_or_insert(Span::horizontal(reference));

        if direction.is_horizontal() {
            let narrowed = Span::new(
                h.start.max(reference.y0).max(winner.y0),
                h.end.min(reference.y1).min(winner.y1),
            );
            // No overlap left with the previous band: restart from the winner.
            m.horizontal = Some(if narrowed.is_empty() {
                Span::vertical(winner)
            } else {
                narrowed
            });
            m.vertical = Some(Span::horizontal(winner));
        } else if direction.is_vertical() {
            let narrowed = Span::new(
                v.start.max(reference.x0).max(winner.x0),
                v.end.min(reference.x1).min(winner.x1),
            );
            m.vertical = Some(if narrowed.is_empty() {
                Span::horizontal(winner)
            } else {
                narrowed
            });
            m.horizontal = Some(Span::vertical(winner));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_reset_round_trips() {
        let mut tracker = ManifoldTracker::new();
        let snapshot = Manifolds {
            horizontal: Some(Span::new(10.0, 20.0)),
            vertical: None,
        };
        tracker.set(snapshot);
        assert_eq!(tracker.reset(), snapshot);
        assert_eq!(tracker.get(), Manifolds::default());
    }

    #[test]
    fn horizontal_move_narrows_band_and_tracks_winner_column() {
        let mut tracker = ManifoldTracker::new();
        let reference = Rect::new(20.0, 200.0, 100.0, 260.0);
        let winner = Rect::new(120.0, 20.0, 240.0, 260.0);
        tracker.update(Direction::Right, reference, winner);

        let m = tracker.get();
        assert_eq!(m.horizontal, Some(Span::new(200.0, 260.0)));
        assert_eq!(m.vertical, Some(Span::new(120.0, 240.0)));
    }

    #[test]
    fn disjoint_move_restarts_band_from_winner() {
        let mut tracker = ManifoldTracker::new();
        tracker.set(Manifolds {
            horizontal: Some(Span::new(0.0, 10.0)),
            vertical: None,
        });
        let reference = Rect::new(0.0, 0.0, 10.0, 10.0);
        let winner = Rect::new(20.0, 50.0, 30.0, 60.0);
        tracker.update(Direction::Left, reference, winner);
        assert_eq!(tracker.get().horizontal, Some(Span::new(50.0, 60.0)));
    }

    #[test]
    fn vertical_move_updates_both_axes() {
        let mut tracker = ManifoldTracker::new();
        let reference = Rect::new(0.0, 0.0, 100.0, 100.0);
        let winner = Rect::new(50.0, 100.0, 150.0, 200.0);
        tracker.update(Direction::Down, reference, winner);

        let m = tracker.get();
        assert_eq!(m.vertical, Some(Span::new(50.0, 100.0)));
        assert_eq!(m.horizontal, Some(Span::new(100.0, 200.0)));
    }

    #[test]
    fn from_rect_aligns_both_axes() {
        let m = Manifolds::from_rect(Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(m.horizontal, Some(Span::new(2.0, 4.0)));
        assert_eq!(m.vertical, Some(Span::new(1.0, 3.0)));
        assert_eq!(m.for_direction(Direction::Up), m.vertical);
        assert_eq!(m.for_direction(Direction::Next), None);
    }
}
