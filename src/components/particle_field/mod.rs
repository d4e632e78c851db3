//! Animated particle background.
//!
//! Renders a constellation-style particle field on a full-page HTML canvas:
//! - Drifting particles with damped velocity and toroidal edge wraparound
//! - Repulsion away from the mouse pointer
//! - Pseudo-depth shading (nearer particles are larger and more opaque)
//! - Fading lines between nearby particles, over a translucent motion trail
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{FieldConfig, ParticleFieldCanvas};
//!
//! view! {
//!     <ParticleFieldCanvas config=FieldConfig::default() />
//!     <main class="page-content">...</main>
//! }
//! ```

mod component;
pub mod config;
mod dom;
pub mod particles;
pub mod render;
pub mod surface;
pub mod theme;

pub use component::ParticleFieldCanvas;
pub use config::FieldConfig;
pub use particles::{Particle, ParticleField};
pub use theme::FieldTheme;
