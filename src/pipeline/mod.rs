pub mod dispatch;
pub mod format;
pub mod goal;
pub mod validate;

pub use dispatch::{GoalDispatcher, GoalOutput, PipelineConfig};
pub use format::ResultFormatter;
pub use goal::{Goal, GoalKind};
pub use validate::{InputValidator, ValidatedRequest};
