pub mod guest;
pub mod intent;
pub mod needs;
pub mod thoughts;

pub use guest::{Guest, GuestState, Preferences, TicketType};
pub use intent::Intent;
pub use needs::{NeedType, Needs};
pub use thoughts::{Thought, ThoughtKind, ThoughtLog, ThoughtSubject};
