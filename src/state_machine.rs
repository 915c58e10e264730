//! Core session state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! `transition` maps (state, event) to a new state plus the effects the
//! session runtime must execute.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;


pub use effect::Effect;
pub use event::{Event, FollowUpPrompt};
pub use state::{Phase, SessionContext, SessionState};
pub use transition::{transition, TransitionError};
