//! Value Objects - Immutable, identity-less domain primitives

pub mod modality;
pub mod tone;
pub mod tone_profile;

pub use modality::Modality;
pub use tone::Tone;
pub use tone_profile::{ToneProfile, VoiceSettings};
