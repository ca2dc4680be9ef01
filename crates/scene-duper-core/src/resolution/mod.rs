pub mod action;
pub mod session;

pub use action::{DestroyRequest, ResolutionAction};
pub use session::{ResolutionOutcome, ReviewSession, SideState};
