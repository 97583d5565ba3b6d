//! Normalizes pointer drag-and-drop and emulated touch dragging into a single
//! "piece dropped on slot" call.
//!
//! Pointer backends report which slot the pointer is over; touch backends only
//! report coordinates, so the adapter asks a [`HitTest`] which slot lies under
//! the touch point. Either way the gesture ends in exactly one
//! [`DropHandler::on_piece_dropped`] call, with `None` meaning "dropped on
//! nothing". Only one gesture may be in flight at a time.

use crate::error::QuizResult;
use crate::trace_table::PieceId;
use tracing::{debug, warn};

/// Raw gesture input from the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    DragStart { piece: PieceId },
    DragOver { slot: Option<String> },
    Drop { slot: String },
    /// Native drag finished. Without a preceding `Drop` this cancels.
    DragEnd,
    TouchStart { piece: PieceId, x: f32, y: f32 },
    TouchMove { x: f32, y: f32 },
    TouchEnd { x: f32, y: f32 },
}

/// Resolves a screen coordinate to the slot (variable name) under it.
pub trait HitTest {
    fn slot_at(&self, x: f32, y: f32) -> Option<String>;
}

/// Consumer of finished gestures.
pub trait DropHandler {
    fn on_piece_dropped(&mut self, piece: &PieceId, slot: Option<&str>) -> QuizResult<DropOutcome>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Placed { displaced: Option<PieceId> },
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// Event did not apply to the current gesture state.
    Ignored,
    PickedUp(PieceId),
    Hover(Option<String>),
    Dropped { piece: PieceId, outcome: DropOutcome },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFamily {
    Pointer,
    Touch,
}

#[derive(Debug, Clone, PartialEq)]
struct ActiveGesture {
    family: InputFamily,
    piece: PieceId,
    hover: Option<String>,
    /// Position of the touch follower element. Pointer drags have none.
    follower: Option<(f32, f32)>,
}

/// Axis-aligned slot rectangles; the simplest [`HitTest`].
#[derive(Debug, Clone, Default)]
pub struct SlotRegions {
    regions: Vec<(String, Rect)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }
}

impl SlotRegions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(mut self, variable: impl Into<String>, rect: Rect) -> Self {
        self.regions.push((variable.into(), rect));
        self
    }
}

impl HitTest for SlotRegions {
    fn slot_at(&self, x: f32, y: f32) -> Option<String> {
        // Later regions are drawn on top.
        self.regions
            .iter()
            .rev()
            .find(|(_, r)| r.contains(x, y))
            .map(|(v, _)| v.clone())
    }
}

/// For backends with no spatial layout: nothing is ever under a touch point.
pub struct NoHitTest;

impl HitTest for NoHitTest {
    fn slot_at(&self, _x: f32, _y: f32) -> Option<String> {
        None
    }
}

pub struct GestureAdapter<T: HitTest> {
    hit_test: T,
    active: Option<ActiveGesture>,
}

impl<T: HitTest> GestureAdapter<T> {
    pub fn new(hit_test: T) -> Self {
        Self {
            hit_test,
            active: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_piece(&self) -> Option<&PieceId> {
        self.active.as_ref().map(|g| &g.piece)
    }

    /// Slot currently highlighted as the drop candidate.
    pub fn highlighted(&self) -> Option<&str> {
        self.active.as_ref().and_then(|g| g.hover.as_deref())
    }

    pub fn follower(&self) -> Option<(f32, f32)> {
        self.active.as_ref().and_then(|g| g.follower)
    }

    pub fn handle<H: DropHandler>(
        &mut self,
        event: GestureEvent,
        handler: &mut H,
    ) -> QuizResult<GestureOutcome> {
        match event {
            GestureEvent::DragStart { piece } => Ok(self.begin(InputFamily::Pointer, piece, None)),
            GestureEvent::TouchStart { piece, x, y } => {
                Ok(self.begin(InputFamily::Touch, piece, Some((x, y))))
            }
            GestureEvent::DragOver { slot } => {
                let Some(g) = self.active_of(InputFamily::Pointer) else {
                    return Ok(GestureOutcome::Ignored);
                };
                g.hover = slot.clone();
                Ok(GestureOutcome::Hover(slot))
            }
            GestureEvent::TouchMove { x, y } => {
                let slot = self.hit_test.slot_at(x, y);
                let Some(g) = self.active_of(InputFamily::Touch) else {
                    return Ok(GestureOutcome::Ignored);
                };
                g.follower = Some((x, y));
                g.hover = slot.clone();
                Ok(GestureOutcome::Hover(slot))
            }
            GestureEvent::Drop { slot } => self.finish(InputFamily::Pointer, Some(slot), handler),
            GestureEvent::DragEnd => self.finish(InputFamily::Pointer, None, handler),
            GestureEvent::TouchEnd { x, y } => {
                let slot = self.hit_test.slot_at(x, y);
                self.finish(InputFamily::Touch, slot, handler)
            }
        }
    }

    fn begin(
        &mut self,
        family: InputFamily,
        piece: PieceId,
        at: Option<(f32, f32)>,
    ) -> GestureOutcome {
        if let Some(current) = &self.active {
            warn!(
                "ignoring {:?} start of '{}' while '{}' is still being dragged",
                family, piece, current.piece
            );
            return GestureOutcome::Ignored;
        }
        debug!("picked up '{}' via {:?}", piece, family);
        self.active = Some(ActiveGesture {
            family,
            piece: piece.clone(),
            hover: None,
            follower: at,
        });
        GestureOutcome::PickedUp(piece)
    }

    fn active_of(&mut self, family: InputFamily) -> Option<&mut ActiveGesture> {
        self.active.as_mut().filter(|g| g.family == family)
    }

    fn finish<H: DropHandler>(
        &mut self,
        family: InputFamily,
        slot: Option<String>,
        handler: &mut H,
    ) -> QuizResult<GestureOutcome> {
        if self.active_of(family).is_none() {
            return Ok(GestureOutcome::Ignored);
        }
        // Transient state goes away whether or not the drop is accepted.
        let Some(gesture) = self.active.take() else {
            return Ok(GestureOutcome::Ignored);
        };
        debug!("'{}' released over {:?}", gesture.piece, slot);
        let outcome = handler.on_piece_dropped(&gesture.piece, slot.as_deref())?;
        Ok(GestureOutcome::Dropped {
            piece: gesture.piece,
            outcome,
        })
    }
}
