mod host;
mod simulate;

pub use host::{HeadlessScheduler, PointerPath, Script, ScriptedSource};
pub use simulate::{run, Command, FrameDump, Statistics};

use colored::Colorize;
use field::{Preset, Variant};

#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error("Window size must be positive, got {0}x{1}")]
	Window(f32, f32),

	#[error(transparent)]
	Field(#[from] field::Error),

	#[error(transparent)]
	IO(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

/// Print the built in presets.
pub fn presets() {
	for preset in Preset::ALL {
		let config = preset.config();
		println!(
			"{} {: <15} {: >4} points  size {:.2}  rotation {:.3}  {}",
			format!("{: <8}", preset.name()).bold(),
			config.variant.name(),
			config.count,
			config.size,
			config.rotation_speed,
			config.color.dimmed(),
		);
	}
	let variants = Variant::ALL.map(Variant::name);
	println!("variants: {}", variants.join(", "));
}
