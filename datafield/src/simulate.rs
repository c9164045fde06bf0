use std::{
	fs::File,
	io::BufWriter,
	path::{Path, PathBuf},
	time::Instant,
};

use colored::Colorize;
use field::{palette, Animation, Config, Edge, Preset, State, Variant};
use nalgebra as na;

use crate::{Error, HeadlessScheduler, PointerPath, Script, ScriptedSource};

#[derive(clap::Parser)]
pub struct Command {
	/// Configuration file as JSON. The preset is ignored if specified.
	#[arg(long, short)]
	config: Option<PathBuf>,

	/// Preset used without a configuration file
	#[arg(long, short, default_value_t = Preset::Landing)]
	preset: Preset,

	/// Replace the variant of the preset or configuration file
	#[arg(long)]
	variant: Option<Variant>,

	/// Replace the point count
	#[arg(long)]
	count: Option<usize>,

	/// Seed for the layout and the pointer path
	#[arg(long)]
	seed: Option<u64>,

	/// Number of simulated frames
	#[arg(long, short, default_value_t = 600)]
	frames: u64,

	/// Movement of the pointer
	#[arg(long, value_enum, default_value_t = PointerPath::Circle)]
	pointer: PointerPath,

	/// Width of the simulated window in pixels
	#[arg(long, default_value_t = 1280.0)]
	width: f32,

	/// Height of the simulated window in pixels
	#[arg(long, default_value_t = 720.0)]
	height: f32,

	/// Statistics output as JSON
	#[arg(long, short)]
	output: Option<PathBuf>,

	/// Last frame output as JSON
	#[arg(long)]
	frame_output: Option<PathBuf>,

	/// Save the used configuration as JSON
	#[arg(long)]
	save_config: Option<PathBuf>,
}

impl Command {
	pub fn new(preset: Preset, frames: u64, pointer: PointerPath) -> Self {
		Self {
			config: None,
			preset,
			variant: None,
			count: None,
			seed: None,
			frames,
			pointer,
			width: 1280.0,
			height: 720.0,
			output: None,
			frame_output: None,
			save_config: None,
		}
	}

	/// Configuration after all overrides, validated.
	pub fn resolve(&self) -> Result<Config, Error> {
		let mut config = match &self.config {
			Some(path) => Config::from_file(path)?,
			None => self.preset.config(),
		};
		if let Some(variant) = self.variant {
			config.variant = variant;
		}
		if let Some(count) = self.count {
			config.count = count;
		}
		if self.seed.is_some() {
			config.seed = self.seed;
		}
		config.validate()?;
		if config.count == 0 {
			log::warn!("empty field, nothing moves");
		}
		Ok(config)
	}
}

#[derive(Debug, Default, serde::Serialize)]
pub struct Statistics {
	pub variant: String,
	pub points: usize,
	pub frames: u64,
	pub links: usize,
	pub max_speed: f32,
	pub speed_bound: f32,
	pub max_displacement: f32,
	pub final_displacement: f32,
	pub max_edges: usize,
	pub mean_edges: f32,
	pub pointer_travel: f32,
	pub frames_requested: u64,
	pub frames_cancelled: u64,
	pub seconds: f32,
}

impl Statistics {
	fn record(&mut self, state: &State) {
		self.frames += 1;
		self.max_speed = self.max_speed.max(state.max_speed());
		self.max_displacement = self.max_displacement.max(state.max_displacement());
		self.max_edges = self.max_edges.max(state.edges.len());
		self.mean_edges += (state.edges.len() as f32 - self.mean_edges) / self.frames as f32;
	}

	pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
		let file = File::create(path)?;
		serde_json::to_writer_pretty(BufWriter::new(file), self)?;
		Ok(())
	}

	pub fn print(&self) {
		println!("{} {} points", self.variant.bold(), self.points);
		println!("  frames        {} in {:.3}s", self.frames, self.seconds);
		println!("  speed         {:.4} (bound {:.4})", self.max_speed, self.speed_bound);
		println!(
			"  displacement  {:.4} max, {:.4} at the end",
			self.max_displacement, self.final_displacement
		);
		println!("  pointer       {:.3} moved", self.pointer_travel);
		println!("  edges         {} max, {:.1} mean, {} links", self.max_edges, self.mean_edges, self.links);
		if self.max_speed > self.speed_bound {
			println!("  {}", "speed above bound".red());
		}
	}
}

/// Everything drawn in the last frame.
#[derive(Debug, serde::Serialize)]
pub struct FrameDump {
	pub positions: Vec<[f32; 3]>,
	pub sizes: Vec<f32>,
	pub colors: Vec<[f32; 3]>,
	pub edges: Vec<(u32, u32, f32)>,
	pub links: Vec<(u32, u32, f32)>,
}

impl FrameDump {
	pub fn new(state: &State) -> Result<Self, Error> {
		let frame = state.frame_output();
		let base = palette::Color::from_hex(&state.config.color)?;
		let edges = |edges: &[Edge]| edges.iter().map(|e| (e.a, e.b, e.opacity)).collect::<Vec<_>>();
		Ok(Self {
			colors: palette::gradient(&frame.positions, base)
				.into_iter()
				.map(|c| [c.r, c.g, c.b])
				.collect(),
			positions: frame.positions.iter().map(|p| [p.x, p.y, p.z]).collect(),
			sizes: frame.sizes.to_vec(),
			edges: edges(frame.edges),
			links: edges(frame.links),
		})
	}

	pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
		let file = File::create(path)?;
		serde_json::to_writer(BufWriter::new(file), self)?;
		Ok(())
	}
}

/// Run the field headless with a scripted pointer.
pub fn run(command: Command) -> Result<Statistics, Error> {
	if !(command.width > 0.0 && command.height > 0.0) {
		return Err(Error::Window(command.width, command.height));
	}
	let config = command.resolve()?;
	if let Some(path) = &command.save_config {
		config.save(path)?;
	}

	let start = Instant::now();
	let mut scheduler = HeadlessScheduler::default();
	let mut source = ScriptedSource::default();
	let window = na::vector![command.width, command.height];
	let mut script = Script::new(command.pointer, config.seed, window);
	let mut statistics = Statistics {
		variant: config.variant.name().into(),
		points: config.count,
		..Default::default()
	};

	{
		let mut animation = Animation::start(config, &mut scheduler, &mut source)?;
		statistics.links = animation.state().links.len();

		for frame in 0..command.frames {
			if let Some(position) = script.next(frame) {
				animation.source().move_to(position);
			}
			if !animation.scheduler().has_pending() || !animation.frame() {
				break;
			}
			statistics.record(animation.state());
		}

		let state = animation.state();
		statistics.final_displacement = state.max_displacement();
		statistics.speed_bound = state.config.speed_bound(statistics.max_displacement);
		if let Some(path) = &command.frame_output {
			FrameDump::new(state)?.save(path)?;
		}
	}

	statistics.pointer_travel = script.travel();
	statistics.frames_requested = scheduler.requested;
	statistics.frames_cancelled = scheduler.cancelled;
	statistics.seconds = start.elapsed().as_secs_f32();
	log::info!(
		"{} frames of {} in {:.3}s",
		statistics.frames,
		statistics.variant,
		statistics.seconds
	);

	if let Some(path) = &command.output {
		statistics.save(path)?;
	}
	Ok(statistics)
}
