//! Arcade Services Layer
//!
//! Collaborators at the edge of the core: keyboard state and settings files.

pub mod input;
pub mod settings;

pub use input::{InputSource, InputState, Key};
pub use settings::{Settings, SettingsError, SurfaceSettings};
