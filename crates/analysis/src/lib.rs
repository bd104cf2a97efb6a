// In crates/analysis/src/lib.rs

//! The trade-analysis pipeline: request validation, client-side pacing, and the
//! service that forwards a validated batch to the feedback gateway.

pub mod error;
pub mod service;
pub mod session;
pub mod throttle;
pub mod validator;

// Re-export public types
pub use error::{Error, Result, ValidationError};
pub use service::{AnalysisEndpoint, AnalysisReply, AnalysisService, ReplyBody};
pub use session::{AnalysisSession, SessionOutcome, RECENT_TRADE_WINDOW};
pub use throttle::{ThrottleDecision, ThrottleState, COOLDOWN_MS};
pub use validator::validate;
