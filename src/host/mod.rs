//! A minimal per-sample host.
//!
//! [`ModuleRunner`] owns one module and its port storage and drives it one
//! frame at a time, the way a rack engine would. Tests, benches and the
//! monitor all go through it.

#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, PushError, RingBuffer};

use crate::modules::{Module, ModuleIo, ModuleKind, ModuleManifest, ProcessCtx};

pub struct ModuleRunner {
    module: Box<dyn Module>,
    io: ModuleIo,
    #[cfg(feature = "rtrb")]
    control: Option<Consumer<ParamChange>>,
}

impl ModuleRunner {
    pub fn new(module: Box<dyn Module>) -> Self {
        let io = ModuleIo::for_manifest(module.manifest());
        Self {
            module,
            io,
            #[cfg(feature = "rtrb")]
            control: None,
        }
    }

    pub fn for_kind(kind: ModuleKind, seed: u32) -> Self {
        Self::new(kind.build(seed))
    }

    pub fn manifest(&self) -> &'static ModuleManifest {
        self.module.manifest()
    }

    pub fn io(&self) -> &ModuleIo {
        &self.io
    }

    /// Set a knob, clamped to its configured range. Unknown indices are ignored.
    pub fn set_param(&mut self, index: usize, value: f32) {
        let manifest = self.module.manifest();
        if let (Some(slot), Some(config)) =
            (self.io.params.get_mut(index), manifest.params.get(index))
        {
            *slot = config.clamp(value);
        }
    }

    pub fn param(&self, index: usize) -> f32 {
        self.io.params[index]
    }

    pub fn patch_input(&mut self, index: usize, voltage: f32) {
        self.io.inputs[index].set(voltage);
    }

    pub fn unpatch_input(&mut self, index: usize) {
        self.io.inputs[index].unpatch();
    }

    pub fn output(&self, index: usize) -> f32 {
        self.io.outputs[index]
    }

    pub fn light(&self, index: usize) -> f32 {
        self.io.lights[index]
    }

    /// Run exactly one frame.
    pub fn process(&mut self, sample_rate: f32) {
        #[cfg(feature = "rtrb")]
        self.drain_control();

        let ctx = ProcessCtx::new(sample_rate);
        self.module.process(&mut self.io, &ctx);
    }

    /// Run one frame per slot of `out`, collecting output `port`.
    pub fn render(&mut self, out: &mut [f32], sample_rate: f32, port: usize) {
        for sample in out.iter_mut() {
            self.process(sample_rate);
            *sample = self.io.outputs[port];
        }
    }
}

#[cfg(feature = "rtrb")]
const PARAM_QUEUE_SIZE: usize = 64;

/// A knob change sent from a control thread to the audio thread.
#[cfg(feature = "rtrb")]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamChange {
    pub index: usize,
    pub value: f32,
}

/// Control-side end of a runner's parameter queue.
#[cfg(feature = "rtrb")]
pub struct ParamHandle {
    tx: Producer<ParamChange>,
}

#[cfg(feature = "rtrb")]
impl ParamHandle {
    /// Queue a change for the next frame. A full queue hands the change back.
    pub fn set(&mut self, index: usize, value: f32) -> Result<(), ParamChange> {
        match self.tx.push(ParamChange { index, value }) {
            Ok(()) => Ok(()),
            Err(PushError::Full(change)) => Err(change),
        }
    }

    pub fn slots(&self) -> usize {
        self.tx.slots()
    }
}

#[cfg(feature = "rtrb")]
impl ModuleRunner {
    /// Attach a parameter queue with room for `capacity` pending changes.
    ///
    /// Pending changes are applied at the start of every frame, before the
    /// module runs. Replaces any queue attached earlier.
    pub fn with_control(mut self, capacity: usize) -> (Self, ParamHandle) {
        let (tx, rx) = RingBuffer::<ParamChange>::new(capacity.max(1));
        self.control = Some(rx);
        (self, ParamHandle { tx })
    }

    /// Same as [`ModuleRunner::with_control`] with the default queue size.
    pub fn controlled(self) -> (Self, ParamHandle) {
        self.with_control(PARAM_QUEUE_SIZE)
    }

    fn drain_control(&mut self) {
        while let Some(change) = self.control.as_mut().and_then(|rx| rx.pop().ok()) {
            self.set_param(change.index, change.value);
        }
    }
}
