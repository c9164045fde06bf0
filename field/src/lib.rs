//! Mouse reactive particle field.
//!
//! A fixed set of points is pushed or pulled by a pointer, springs back to
//! its home positions and is damped every frame. Some variants also connect
//! nearby points with lines. Nothing here draws, the renderer reads the
//! arrays of the current [`Frame`].

pub mod animation;
mod config;
pub mod forces;
pub mod layout;
pub mod palette;
mod point;
pub mod proximity;
mod system;
mod variant;

pub use animation::{Animation, FrameId, FrameScheduler, ListenerId, PointerSource};
pub use config::{Config, Preset};
pub use forces::Direction;
pub use point::{Edge, Frame, Point, MAX_POINTS};
pub use system::{ParticleSystem, State, POINTER_SCALE, TIME_STEP};
pub use variant::{FlowField, GridWave, NetworkGraph, RandomScatter, SphereShell, Variant, SNAP_DISTANCE};

#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error("Damping must be inside (0, 1), got {0}")]
	Damping(f32),

	#[error("Restoring coefficient must be inside [0, 1), got {0}")]
	Restore(f32),

	#[error("{name} must be positive, got {value}")]
	NotPositive { name: &'static str, value: f32 },

	#[error("{name} must not be negative, got {value}")]
	Negative { name: &'static str, value: f32 },

	#[error("{0} is not finite")]
	NotFinite(&'static str),

	#[error("At most {max} points are supported, got {0}", max = crate::MAX_POINTS)]
	TooManyPoints(usize),

	#[error("Invalid color {0:?}, expected #RRGGBB")]
	Color(String),

	#[error("Unknown variant {0:?}")]
	UnknownVariant(String),

	#[error("Unknown preset {0:?}")]
	UnknownPreset(String),

	#[error(transparent)]
	IO(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}
