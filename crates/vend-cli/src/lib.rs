//! # vend-cli
//!
//! Interactive terminal front end for vend-kiosk-rs.
//!
//! This crate provides:
//! - `Terminal`, the line I/O seam, and `Console` over any reader/writer
//! - `TransactionController`, the purchase state machine
//! - `Session`, the repeat-until-exit loop with language selection
//! - `AppConfig`, runtime settings from the environment
//!
//! ## Conversation
//!
//! | Step | Prompt key | Accepts |
//! |------|------------|---------|
//! | Language | `language_prompt` | `english`, `arabic`, `en`, `ar` |
//! | Selection | `select_product` | catalog code, or `lang` |
//! | Payment | `payment_prompt` | decimal amount |
//! | Add-on | `add_on_prompt` | `yes`/`نعم`, `no`/`لا` |
//! | Continue | `yes_no_prompt` | `yes`/`نعم`, `no`/`لا` |

pub mod error;
pub mod session;
pub mod state;
pub mod terminal;
pub mod transaction;

pub use error::{KioskError, KioskResult};
pub use session::{Session, SessionEnd, SessionSummary};
pub use state::{AppConfig, LogFormat};
pub use terminal::{Console, Terminal};
pub use transaction::{Selection, Transaction, TransactionController};
