//! Shared types for the personnel records service
//!
//! Domain models, the unified error system and small utilities used by the
//! server crate and by anything that talks to its JSON API.

pub mod error;
pub mod models;
pub mod util;
