pub mod domain;
pub mod exchange;
pub mod report;

mod answers;
mod model;
mod session;

pub use answers::AnswerStore;
pub use model::{Capability, Model, Question, WEIGHT_CEILING};
pub use session::Assessment;
