//! tfjs-prep core - converter repair and model conversion logic
//!
//! This crate contains all pipeline logic with zero CLI dependencies.
//! It is used by the `fix-tfjs` and `preconvert-models` binaries.
//!
//! Two independent flows live here:
//! 1. Locate the installed converter package and patch its sources
//!    (`locate` + `patch`)
//! 2. Drive the external converter over the configured models and emit
//!    the integration scaffold (`convert` + `report`)

pub mod config;
pub mod convert;
pub mod io;
pub mod locate;
pub mod logging;
pub mod patch;
pub mod report;
