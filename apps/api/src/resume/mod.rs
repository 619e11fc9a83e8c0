// Resume record model and the structuring service that produces it.

pub mod lenient;
pub mod model;
pub mod prompts;
pub mod structurer;
