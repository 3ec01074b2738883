mod countdown;
mod sampler;
mod service;
mod session;

pub use countdown::{Countdown, CountdownTick};
pub use sampler::QuestionSampler;
pub use service::QuizService;
pub use session::{AdvanceTicket, Feedback, QuizSession, SessionState, Unavailable};
