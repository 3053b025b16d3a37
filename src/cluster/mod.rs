pub mod refine;
pub mod seeding;

pub use refine::{LloydRefiner, RefineParams};
pub use seeding::KMeansPlusPlus;
