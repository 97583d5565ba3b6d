pub mod engine;
pub mod pieces;
pub mod placement;
pub mod render;

pub use engine::{Advance, Phase, RowVerdict, SlotResult, TraceTableEngine};
pub use pieces::{Piece, PieceId};
pub use placement::PlacementTracker;
pub use render::{render_row, CompletedRow, RenderModel, SlotView};
