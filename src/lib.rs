pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod session;
pub mod signal;
pub mod sonar;
pub mod sweep;
pub mod wav;

pub use config::{Control, Demo, Scenario};
pub use error::{Result, SonarError};
pub use session::{Evaluation, Session};
pub use wav::save_trace_wav;
