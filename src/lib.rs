//! Headshot - restyle a portrait into a professional studio headshot.
//!
//! The core is split into a style catalog ([`style`]), a prompt compiler
//! ([`prompt`]), the image codec at the model boundary ([`codec`]) and the
//! single-attempt [`orchestrator`]. [`session`] gives callers single-flight
//! semantics on top of it.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod codec;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod model;
pub mod orchestrator;
pub mod output;
pub mod ports;
pub mod prompt;
pub mod session;
pub mod style;

pub use codec::{DecodedImage, EncodedImage};
pub use error::{GenerationFailure, HeadshotError};
pub use orchestrator::{GeneratedHeadshot, GenerationResult, Orchestrator};
pub use prompt::compile_prompt;
pub use session::{GenerationSession, SessionState};
pub use style::{Framing, Outfit, Pose, StyleAxis, StyleSelection};
