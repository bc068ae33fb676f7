//! Input records and derived results for each calculator.

mod dca;
mod position;
mod triangle;

pub use dca::{DcaInput, DcaResult, TargetDcaResult, TargetEntryInput};
pub use position::{OrderType, PositionInput, PositionMetrics};
pub use triangle::{ScenarioKind, TriangleInput, TriangleResult, TriangleScenario, TriangleSolution};
