//! Placement sequencer
//!
//! A placement asks for the shape, the height, the x radius and the y radius,
//! in that order. Each state carries the answers confirmed so far, so a
//! [`Placement`] can only be produced once all four are present. Cancelling
//! at any point drops everything and returns to idle.

pub mod prompt;

use anyhow::bail;

use crate::domain::{PixelRadii, ScreenPoint, ShapeKind};
use crate::session::state::SessionConfig;
use prompt::{Field, Prompt};

/// All four choices of a completed placement gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub anchor: ScreenPoint,
    pub kind: ShapeKind,
    pub height: i32,
    pub x_radius: i32,
    pub y_radius: i32,
}

impl Placement {
    pub fn radii(&self) -> PixelRadii {
        PixelRadii::new(self.x_radius as f32, self.y_radius as f32)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlacementState {
    #[default]
    Idle,
    ChoosingType {
        anchor: ScreenPoint,
    },
    ChoosingHeight {
        anchor: ScreenPoint,
        kind: ShapeKind,
    },
    ChoosingXRadius {
        anchor: ScreenPoint,
        kind: ShapeKind,
        height: i32,
    },
    ChoosingYRadius {
        anchor: ScreenPoint,
        kind: ShapeKind,
        height: i32,
        x_radius: i32,
    },
}

impl PlacementState {
    /// The field the current state is waiting for
    pub fn field(&self) -> Option<Field> {
        match self {
            PlacementState::Idle => None,
            PlacementState::ChoosingType { .. } => Some(Field::Shape),
            PlacementState::ChoosingHeight { .. } => Some(Field::Height),
            PlacementState::ChoosingXRadius { .. } => Some(Field::XRadius),
            PlacementState::ChoosingYRadius { .. } => Some(Field::YRadius),
        }
    }
}

/// Result of confirming an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Another choice is needed
    Next(Field),
    /// All choices confirmed; the sequencer is idle again
    Committed(Placement),
}

#[derive(Debug, Default)]
pub struct PlacementSequencer {
    state: PlacementState,
}

impl PlacementSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.state == PlacementState::Idle
    }

    /// Start a placement at `anchor`. Does nothing unless idle.
    pub fn begin(&mut self, anchor: ScreenPoint) -> bool {
        if !self.is_idle() {
            log::debug!("Placement already in progress, ignoring press at {:?}", anchor);
            return false;
        }
        self.state = PlacementState::ChoosingType { anchor };
        true
    }

    /// Current question, with defaults taken from the session
    pub fn prompt(&self, session: &SessionConfig) -> Option<Prompt> {
        self.state.field().map(|field| Prompt::new(field, session))
    }

    /// Confirm an answer for the current question.
    ///
    /// Out-of-range answers are refused and leave the state unchanged.
    pub fn confirm(&mut self, value: i32) -> anyhow::Result<Advance> {
        let Some(field) = self.state.field() else {
            bail!("no placement in progress");
        };
        if !field.accepts(value) {
            let (min, max, _) = field.range();
            bail!("{value} is outside {min}..={max}");
        }

        let (next, advance) = match self.state {
            PlacementState::Idle => bail!("no placement in progress"),
            PlacementState::ChoosingType { anchor } => {
                let Some(kind) = ShapeKind::from_code(value) else {
                    bail!("unknown shape code {value}");
                };
                (
                    PlacementState::ChoosingHeight { anchor, kind },
                    Advance::Next(Field::Height),
                )
            }
            PlacementState::ChoosingHeight { anchor, kind } => (
                PlacementState::ChoosingXRadius {
                    anchor,
                    kind,
                    height: value,
                },
                Advance::Next(Field::XRadius),
            ),
            PlacementState::ChoosingXRadius {
                anchor,
                kind,
                height,
            } => (
                PlacementState::ChoosingYRadius {
                    anchor,
                    kind,
                    height,
                    x_radius: value,
                },
                Advance::Next(Field::YRadius),
            ),
            PlacementState::ChoosingYRadius {
                anchor,
                kind,
                height,
                x_radius,
            } => (
                PlacementState::Idle,
                Advance::Committed(Placement {
                    anchor,
                    kind,
                    height,
                    x_radius,
                    y_radius: value,
                }),
            ),
        };

        log::debug!("Placement {:?} -> {:?}", self.state, next);
        self.state = next;
        Ok(advance)
    }

    /// Abandon the current placement, if any
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            log::debug!("Placement cancelled in {:?}", self.state);
        }
        self.state = PlacementState::Idle;
    }
}
