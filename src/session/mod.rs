//! Round state machine and its inputs and outputs.
//!
//! ## Round lifecycle
//!
//! `Idle → Active → Ended`. [`Session::start_round`] enters `Active` from
//! any phase, restarting a round in progress. Running out of time is the
//! only way to `Ended`, either through [`Session::advance`] or
//! [`Session::force_timeout`].
//!
//! ## Deferred work
//!
//! Completing a word, showing the next one and clearing the completion
//! flash all happen after short delays. These are queued on the
//! [`Scheduler`] tagged with the round epoch; an action whose epoch no
//! longer matches, or that comes due after the round ended, is dropped.

mod engine;
mod event;
mod scheduler;
mod state;

pub use engine::Session;
pub use event::{SessionEvent, SessionInput};
pub use scheduler::{Deferred, Scheduled, Scheduler};
pub use state::{CompletedTask, RoundPhase, SessionRecord, TimerUrgency};
