//! Frame loop glue between a host, the pointer input and a particle system.
//!
//! The host owns the actual frame callbacks and input events, the animation
//! only asks for the next frame and reads the latest pointer position.

use input::SharedPointer;

use crate::{Config, Error, Frame, ParticleSystem, State};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Source of frame callbacks.
///
/// After `request` the host calls [`Animation::frame`] once, unless the
/// request was cancelled before.
pub trait FrameScheduler {
	fn request(&mut self) -> FrameId;

	fn cancel(&mut self, id: FrameId);
}

/// Source of pointer movement, writing into the shared pointer until removed.
pub trait PointerSource {
	fn listen(&mut self, pointer: SharedPointer) -> ListenerId;

	/// Must release the shared pointer passed to `listen`.
	fn remove(&mut self, id: ListenerId);
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for &mut T {
	fn request(&mut self) -> FrameId {
		(**self).request()
	}

	fn cancel(&mut self, id: FrameId) {
		(**self).cancel(id)
	}
}

impl<T: PointerSource + ?Sized> PointerSource for &mut T {
	fn listen(&mut self, pointer: SharedPointer) -> ListenerId {
		(**self).listen(pointer)
	}

	fn remove(&mut self, id: ListenerId) {
		(**self).remove(id)
	}
}

/// Running particle field.
///
/// Stopping cancels the pending frame and removes the pointer listener, it
/// happens at the latest when the animation is dropped.
pub struct Animation<Scheduler: FrameScheduler, Source: PointerSource> {
	system: Box<dyn ParticleSystem>,
	state: State,
	pointer: SharedPointer,
	scheduler: Scheduler,
	source: Source,
	pending: Option<FrameId>,
	listener: Option<ListenerId>,
}

impl<Scheduler: FrameScheduler, Source: PointerSource> Animation<Scheduler, Source> {
	/// Start the variant named in the configuration.
	pub fn start(config: Config, scheduler: Scheduler, source: Source) -> Result<Self, Error> {
		Self::with_system(config.variant.system(), config, scheduler, source)
	}

	pub fn with_system(
		system: Box<dyn ParticleSystem>,
		config: Config,
		mut scheduler: Scheduler,
		mut source: Source,
	) -> Result<Self, Error> {
		config.validate()?;
		let state = system.init(&config);
		let pointer = SharedPointer::new();
		let listener = source.listen(pointer.clone());
		let pending = scheduler.request();
		log::info!("start {} with {} points", system.variant(), state.len());

		Ok(Self {
			system,
			state,
			pointer,
			scheduler,
			source,
			pending: Some(pending),
			listener: Some(listener),
		})
	}

	/// Run one requested frame and request the next.
	///
	/// Returns `false` without touching the state once stopped.
	pub fn frame(&mut self) -> bool {
		if self.pending.take().is_none() {
			return false;
		}
		let pointer = self.system.pointer_to_world(self.pointer.load());
		self.system.step(&mut self.state, pointer);
		self.pending = Some(self.scheduler.request());
		true
	}

	/// Stop the frame loop, calling it again does nothing.
	pub fn stop(&mut self) {
		let running = self.pending.is_some() || self.listener.is_some();
		if let Some(id) = self.pending.take() {
			self.scheduler.cancel(id);
		}
		if let Some(id) = self.listener.take() {
			self.source.remove(id);
		}
		self.state.clear_frame_buffers();
		if running {
			log::info!("stop {} after {} frames", self.system.variant(), self.state.frame);
		}
	}

	pub fn is_running(&self) -> bool {
		self.pending.is_some()
	}

	/// Replace the whole point set, the frame loop keeps its state.
	pub fn reconfigure(&mut self, config: Config) -> Result<(), Error> {
		config.validate()?;
		if config.variant != self.system.variant() {
			self.system = config.variant.system();
		}
		self.state = self.system.init(&config);
		log::info!("reconfigure to {} with {} points", self.system.variant(), self.state.len());
		Ok(())
	}

	pub fn state(&self) -> &State {
		&self.state
	}

	pub fn frame_output(&self) -> Frame<'_> {
		self.state.frame_output()
	}

	pub fn system(&self) -> &dyn ParticleSystem {
		self.system.as_ref()
	}

	/// Handle for writing pointer positions without a listener.
	pub fn pointer(&self) -> &SharedPointer {
		&self.pointer
	}

	pub fn scheduler(&self) -> &Scheduler {
		&self.scheduler
	}

	pub fn source(&self) -> &Source {
		&self.source
	}
}

impl<Scheduler: FrameScheduler, Source: PointerSource> Drop for Animation<Scheduler, Source> {
	fn drop(&mut self) {
		self.stop();
	}
}
