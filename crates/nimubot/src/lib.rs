//! Nimubot: a LINE chat bot that answers with anime rankings and searches.
//!
//! Incoming webhook batches are dispatched per event; text messages are routed
//! to a greeting, one of five ranked lists, or a title search against the
//! Jikan catalog, and answered with carousel replies.

pub mod carousel;
pub mod dispatcher;
pub mod line;
pub mod reply;
pub mod router;
pub mod server;

pub use carousel::{build_cards, Card};
pub use dispatcher::{DispatchError, EventDispatcher};
pub use line::{LineClient, MessagingPlatform};
pub use router::{route, CommandRouter, Route};
pub use server::AppState;
