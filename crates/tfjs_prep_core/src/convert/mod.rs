//! Model conversion through the external converter.
//!
//! # Per-model flow
//!
//! ```text
//! Pending
//!     ├── source missing ──────────────────────────► Failed
//!     └── Converting
//!             ├── exit != 0 ───────────────────────► Failed
//!             ├── exit == 0, no manifest ──────────► Failed
//!             └── exit == 0, manifest present ─────► Succeeded
//! ```
//!
//! Every model reaches a terminal state; nothing is retried and no
//! failure stops the remaining models.

mod errors;
mod orchestrator;
mod types;

pub use errors::ConversionError;
pub use orchestrator::{ConversionOrchestrator, ConverterOptions};
pub use types::{ConversionOutcome, ConversionResult, ConversionSummary, ModelConfig, OutputFile};
