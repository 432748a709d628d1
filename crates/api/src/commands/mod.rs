//! API commands - one module per service area
//!
//! Each module adds methods to [`SailthruClient`](crate::SailthruClient).

mod alert;
mod blast;
mod contacts;
mod content;
mod email;
mod horizon;
mod list;
mod postback;
mod purchase;
mod send;
mod stats;
mod template;

pub use alert::*;
pub use blast::*;
pub use content::*;
pub use email::*;
pub use horizon::*;
pub use purchase::*;
pub use send::*;
pub use stats::*;
