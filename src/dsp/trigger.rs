/// Rising-edge detector with hysteresis.
///
/// The state goes high once the input reaches `high` and only drops again
/// once the input falls to `low` or below. Readings between the two thresholds
/// keep whatever state was last entered, so a noisy gate hovering around a
/// single threshold does not retrigger.
#[derive(Debug, Clone, Copy)]
pub struct SchmittTrigger {
    low: f32,
    high: f32,
    state: bool,
}

impl SchmittTrigger {
    pub fn new() -> Self {
        Self::with_thresholds(0.0, 1.0)
    }

    pub fn with_thresholds(low: f32, high: f32) -> Self {
        Self {
            low,
            high,
            state: false,
        }
    }

    /// Feed one sample. Returns `true` only on the sample where the state goes high.
    #[inline]
    pub fn process(&mut self, input: f32) -> bool {
        if self.state {
            if input <= self.low {
                self.state = false;
            }
            false
        } else if input >= self.high {
            self.state = true;
            true
        } else {
            false
        }
    }

    pub fn is_high(&self) -> bool {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = false;
    }
}

impl Default for SchmittTrigger {
    fn default() -> Self {
        Self::new()
    }
}
