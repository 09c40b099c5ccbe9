//! Alpha Terminal Core Library
//!
//! Research tasks over the generative gateway, result normalization,
//! session state and the per-panel result guard.

pub mod config;
pub mod error;
pub mod research;
pub mod session;
pub mod slots;

pub use config::{AdminCredentials, TerminalConfig};
pub use error::{TerminalError, TerminalResult};
pub use research::{ResearchDesk, ResearchResult, ResearchTask};
pub use session::{Session, UserProfile};
pub use slots::{RequestTicket, Slot, SlotBoard};
