use crate::modules::{Module, ModuleIo, ModuleManifest, ParamConfig, ProcessCtx};

/// Gate level while a button is held.
pub const GATE_VOLTAGE: f32 = 12.0;

/// Light decay time constant, in seconds.
const LIGHT_LAMBDA: f32 = 0.075;

pub const BUTTON_COUNT: usize = 9;

const fn button(name: &'static str) -> ParamConfig {
    ParamConfig::new(name, 0.0, 1.0, 0.0)
}

pub static MANIFEST: ModuleManifest = ModuleManifest {
    name: "Buttons",
    params: &[
        button("Button 1"),
        button("Button 2"),
        button("Button 3"),
        button("Button 4"),
        button("Button 5"),
        button("Button 6"),
        button("Button 7"),
        button("Button 8"),
        button("Button 9"),
    ],
    inputs: &[],
    outputs: &[
        "Gate 1", "Gate 2", "Gate 3", "Gate 4", "Gate 5", "Gate 6", "Gate 7", "Gate 8", "Gate 9",
    ],
    lights: &[
        "Button 1", "Button 2", "Button 3", "Button 4", "Button 5", "Button 6", "Button 7",
        "Button 8", "Button 9",
    ],
};

/// Nine momentary buttons. Each gate is high only while its button is held;
/// its light jumps to full on press and fades out after release.
#[derive(Debug, Default)]
pub struct ButtonsModule {
    lights: [f32; BUTTON_COUNT],
}

impl ButtonsModule {
    pub fn new() -> Self {
        Self {
            lights: [0.0; BUTTON_COUNT],
        }
    }
}

impl Module for ButtonsModule {
    fn manifest(&self) -> &'static ModuleManifest {
        &MANIFEST
    }

    fn process(&mut self, io: &mut ModuleIo, ctx: &ProcessCtx) {
        let decay = ctx.sample_time() / LIGHT_LAMBDA;

        for (i, light) in self.lights.iter_mut().enumerate() {
            let pressed = io.params[i] > 0.0;
            if pressed {
                *light = 1.0;
            }
            *light -= *light * decay;

            io.outputs[i] = if pressed { GATE_VOLTAGE } else { 0.0 };
            io.lights[i] = *light;
        }
    }
}
