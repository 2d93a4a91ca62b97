use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Identity of one drawn point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointKey {
    pub site: String,
    pub month_index: usize,
}

impl PointKey {
    #[must_use]
    pub fn new(site: impl Into<String>, month_index: usize) -> Self {
        Self {
            site: site.into(),
            month_index,
        }
    }
}

/// A hoverable point in viewport coordinates with its tooltip text.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverCandidate {
    pub key: PointKey,
    pub x: f64,
    pub y: f64,
    pub lines: SmallVec<[String; 3]>,
}

/// Point radii before and during hover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverRadii {
    pub rest: f64,
    pub hovered: f64,
}

impl Default for HoverRadii {
    fn default() -> Self {
        Self {
            rest: 5.0,
            hovered: 7.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipState {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub lines: SmallVec<[String; 3]>,
}

/// What a pointer event did to the hover state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverChange {
    Entered(PointKey),
    /// Hover moved straight from one point to another.
    Switched { from: PointKey, to: PointKey },
    /// Still over the same point; only the tooltip followed the pointer.
    Moved,
    Left(PointKey),
    Unchanged,
}

/// Pointer hover state over the points layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InteractionState {
    hovered: Option<PointKey>,
    pointer: Option<(f64, f64)>,
    tooltip: TooltipState,
    /// Tooltip placement relative to the pointer.
    tooltip_offset: (f64, f64),
}

impl InteractionState {
    #[must_use]
    pub fn new(tooltip_offset: (f64, f64)) -> Self {
        Self {
            tooltip_offset,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&PointKey> {
        self.hovered.as_ref()
    }

    #[must_use]
    pub fn pointer(&self) -> Option<(f64, f64)> {
        self.pointer
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    /// Hit-tests the pointer against `candidates`.
    ///
    /// A point is entered within its resting radius and kept while the
    /// pointer stays inside the enlarged hover radius.
    pub fn pointer_move(
        &mut self,
        x: f64,
        y: f64,
        candidates: &[HoverCandidate],
        radii: HoverRadii,
    ) -> HoverChange {
        self.pointer = Some((x, y));

        if let Some(current) = self.hovered.clone() {
            let still_inside = candidates
                .iter()
                .find(|candidate| candidate.key == current)
                .is_some_and(|candidate| distance(candidate, x, y) <= radii.hovered);
            if still_inside {
                self.place_tooltip(x, y);
                return HoverChange::Moved;
            }
        }

        let nearest = candidates
            .iter()
            .map(|candidate| (candidate, distance(candidate, x, y)))
            .filter(|(_, dist)| *dist <= radii.rest)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(candidate, _)| candidate);

        match (self.hovered.take(), nearest) {
            (None, None) => HoverChange::Unchanged,
            (Some(previous), None) => {
                self.tooltip = TooltipState::default();
                HoverChange::Left(previous)
            }
            (previous, Some(candidate)) => {
                self.hovered = Some(candidate.key.clone());
                self.tooltip.lines = candidate.lines.clone();
                self.tooltip.visible = true;
                self.place_tooltip(x, y);
                match previous {
                    Some(from) => HoverChange::Switched {
                        from,
                        to: candidate.key.clone(),
                    },
                    None => HoverChange::Entered(candidate.key.clone()),
                }
            }
        }
    }

    /// Pointer left the chart: revert hover and hide the tooltip.
    pub fn pointer_leave(&mut self) -> HoverChange {
        self.pointer = None;
        self.tooltip = TooltipState::default();
        match self.hovered.take() {
            Some(previous) => HoverChange::Left(previous),
            None => HoverChange::Unchanged,
        }
    }

    /// Drops hover state, e.g. after the data under the pointer changed.
    pub fn clear(&mut self) {
        self.hovered = None;
        self.tooltip = TooltipState::default();
    }

    fn place_tooltip(&mut self, x: f64, y: f64) {
        self.tooltip.x = x + self.tooltip_offset.0;
        self.tooltip.y = y + self.tooltip_offset.1;
    }
}

fn distance(candidate: &HoverCandidate, x: f64, y: f64) -> f64 {
    (candidate.x - x).hypot(candidate.y - y)
}
