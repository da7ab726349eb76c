//! Move lifecycle state machine.
//!
//! A [`Session`] consumes [`SessionEvent`]s and answers with [`Effect`]s.
//! A legal jump is committed in two phases: the move is announced and a
//! commit is scheduled, then the host feeds back
//! [`SessionEvent::DelayElapsed`] and the board is mutated.

mod effect;
mod event;
mod session;

pub use effect::{Effect, Notification};
pub use event::{MoveTicket, SessionEvent};
pub use session::{PendingCommit, Phase, Session};
