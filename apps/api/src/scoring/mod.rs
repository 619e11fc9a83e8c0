// ATS scoring: candidate-type classification and the section rubric.
// Everything here is pure and synchronous; no I/O, no LLM calls.

pub mod classifier;
pub mod keywords;
pub mod rubric;
pub mod verdict;

pub use classifier::{classify, CandidateType};
pub use rubric::{score, Section, SectionReport};
pub use verdict::Verdict;
