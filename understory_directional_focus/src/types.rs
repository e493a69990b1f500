// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public value types: directions, strategies, query options, and candidates.

use kurbo::Rect;

/// Direction of focus navigation.
///
/// Only the four cardinal directions drive a spatial query. [`Direction::Next`]
/// and [`Direction::Previous`] exist so that callers mixing sequential and
/// spatial navigation can use [`Direction::reversed`] uniformly; a spatial
/// query issued with either of them yields no result.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Move towards smaller x.
    Left,
    /// Move towards larger x.
    Right,
    /// Move towards smaller y.
    Up,
    /// Move towards larger y.
    Down,
    /// Sequential forward movement (for example, Tab).
    Next,
    /// Sequential backward movement (for example, Shift+Tab).
    Previous,
}

impl Direction {
    /// Return the opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Next => Self::Previous,
            Self::Previous => Self::Next,
        }
    }

    /// Whether this is one of the four cardinal directions.
    #[must_use]
    pub const fn is_spatial(self) -> bool {
        matches!(self, Self::Left | Self::Right | Self::Up | Self::Down)
    }

    /// Whether movement happens along the x axis.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Whether movement happens along the y axis.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// Swap Left and Right; other directions are unchanged.
    ///
    /// Used to translate a physical direction into the logical direction of a
    /// right-to-left element.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            other => other,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Up => 2,
            Self::Down => 3,
            Self::Next => 4,
            Self::Previous => 5,
        }
    }
}

/// Scoring algorithm used to rank candidates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum NavigationStrategy {
    /// Cone-based projection, biased by shadows and manifolds.
    #[default]
    Projection,
    /// Distance along the navigation direction only.
    NavigationDirectionDistance,
    /// Manhattan distance over both axes.
    RectilinearDistance,
}

/// Per-element, per-direction strategy value as stored by the host.
///
/// [`StrategyPreference::Auto`] defers to the parent element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum StrategyPreference {
    /// Inherit from the parent element.
    #[default]
    Auto = 0,
    /// See [`NavigationStrategy::Projection`].
    Projection = 1,
    /// See [`NavigationStrategy::NavigationDirectionDistance`].
    NavigationDirectionDistance = 2,
    /// See [`NavigationStrategy::RectilinearDistance`].
    RectilinearDistance = 3,
}

impl StrategyPreference {
    /// Convert a raw discriminant back into a preference.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Auto),
            1 => Some(Self::Projection),
            2 => Some(Self::NavigationDirectionDistance),
            3 => Some(Self::RectilinearDistance),
            _ => None,
        }
    }

    /// The concrete strategy, or `None` for [`StrategyPreference::Auto`].
    pub const fn strategy(self) -> Option<NavigationStrategy> {
        match self {
            Self::Auto => None,
            Self::Projection => Some(NavigationStrategy::Projection),
            Self::NavigationDirectionDistance => {
                Some(NavigationStrategy::NavigationDirectionDistance)
            }
            Self::RectilinearDistance => Some(NavigationStrategy::RectilinearDistance),
        }
    }
}

/// Caller-supplied strategy override for a single query.
///
/// The discriminants are offset by one from [`StrategyPreference`], so every
/// value except [`NavigationStrategyOverride::None`] maps onto a preference
/// by subtracting one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum NavigationStrategyOverride {
    /// Use the strategy configured on the current element.
    #[default]
    None = 0,
    /// Use the strategy configured on the current element's parent.
    Auto = 1,
    /// Force [`NavigationStrategy::Projection`].
    Projection = 2,
    /// Force [`NavigationStrategy::NavigationDirectionDistance`].
    NavigationDirectionDistance = 3,
    /// Force [`NavigationStrategy::RectilinearDistance`].
    RectilinearDistance = 4,
}

impl NavigationStrategyOverride {
    /// Map this override onto the preference it stands for.
    pub const fn preference(self) -> Option<StrategyPreference> {
        match self {
            Self::None => None,
            other => StrategyPreference::from_u8(other as u8 - 1),
        }
    }
}

bitflags::bitflags! {
    /// Flags controlling a single directional query.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct QueryFlags: u8 {
        /// Use unclipped bounds for the current element and the candidates.
        const IGNORE_CLIPPING = 0b0000_0001;
        /// Never reject a candidate for being covered by another surface.
        const IGNORE_OCCLUSIVITY = 0b0000_0010;
        /// Skip the directional cone test of the projection strategy.
        const IGNORE_CONE = 0b0000_0100;
        /// Only descend into subtrees that are declared directional regions.
        const DIRECTIONAL_REGIONS_ONLY = 0b0000_1000;
        /// Update the persisted manifolds after a successful query.
        const UPDATE_MANIFOLD = 0b0001_0000;
        /// Seed the manifolds from the focus hint rectangle before searching.
        const UPDATE_MANIFOLDS_FROM_FOCUS_HINT = 0b0010_0000;
    }
}

impl Default for QueryFlags {
    fn default() -> Self {
        Self::IGNORE_CLIPPING | Self::UPDATE_MANIFOLD
    }
}

/// Options for a single directional query.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryOptions<K> {
    /// Bounds of the focused element.
    ///
    /// When `None`, the navigator asks the tree for the current element's
    /// bounds.
    pub focused_bounds: Option<Rect>,
    /// Rectangle standing in for the current element's geometry.
    ///
    /// When set, the current element contributes no geometric influence of
    /// its own.
    pub focus_hint: Option<Rect>,
    /// Restrict the search (and any override target) to this subtree.
    pub search_root: Option<K>,
    /// Candidates overlapping this rectangle are never selected.
    pub exclusion: Option<Rect>,
    /// Behavior flags.
    pub flags: QueryFlags,
    /// Strategy override for this query.
    pub strategy_override: NavigationStrategyOverride,
}

impl<K> Default for QueryOptions<K> {
    fn default() -> Self {
        Self {
            focused_bounds: None,
            focus_hint: None,
            search_root: None,
            exclusion: None,
            flags: QueryFlags::default(),
            strategy_override: NavigationStrategyOverride::None,
        }
    }
}

impl<K: Copy> QueryOptions<K> {
    /// Structural fingerprint of these options, used as part of a cache key.
    ///
    /// Rectangles contribute their exact bit patterns, so two options compare
    /// equal only when every field is identical.
    pub fn fingerprint(&self) -> OptionsFingerprint<K> {
        OptionsFingerprint {
            focused_bounds: self.focused_bounds.map(rect_bits),
            focus_hint: self.focus_hint.map(rect_bits),
            search_root: self.search_root,
            exclusion: self.exclusion.map(rect_bits),
            flags: self.flags.bits(),
            strategy_override: self.strategy_override as u8,
        }
    }
}

/// Hashable digest of [`QueryOptions`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OptionsFingerprint<K> {
    focused_bounds: Option<[u64; 4]>,
    focus_hint: Option<[u64; 4]>,
    search_root: Option<K>,
    exclusion: Option<[u64; 4]>,
    flags: u8,
    strategy_override: u8,
}

fn rect_bits(r: Rect) -> [u64; 4] {
    [r.x0.to_bits(), r.y0.to_bits(), r.x1.to_bits(), r.y1.to_bits()]
}

/// A focusable element considered during one query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate<K> {
    /// The element.
    pub id: K,
    /// Bounds in the tree's coordinate space.
    pub bounds: Rect,
    /// Heuristic score; only strictly positive scores can win.
    pub score: f64,
    /// Admitted because it can be scrolled into view by the active scroller
    /// or one of its outer scrollers. Such candidates skip the occlusion test.
    pub scroll_participant: bool,
}

impl<K> Candidate<K> {
    /// Create an unscored candidate.
    pub const fn new(id: K, bounds: Rect) -> Self {
        Self {
            id,
            bounds,
            score: 0.0,
            scroll_participant: false,
        }
    }
}
