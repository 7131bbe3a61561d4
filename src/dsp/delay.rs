/// Fixed-capacity ring buffer of past samples.
///
/// `write` stores the newest sample; reads address history by "samples ago",
/// where 0 is the sample just written. The capacity is set at construction and
/// never changes, so nothing here allocates after `with_capacity`.
pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl DelayLine {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity.max(1)],
            write_pos: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Longest delay, in samples, that still addresses stored history.
    pub fn max_delay(&self) -> usize {
        self.buffer.len() - 1
    }

    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
        self.buffer[self.write_pos] = sample;
    }

    /// Sample written `delay_samples` writes ago, clamped to the capacity.
    #[inline]
    pub fn read(&self, delay_samples: usize) -> f32 {
        let len = self.buffer.len();
        let delay_samples = delay_samples.min(len - 1);
        self.buffer[(self.write_pos + len - delay_samples) % len]
    }

    /// Linearly interpolated read at a fractional delay.
    ///
    /// Negative delays read the newest sample; delays past `max_delay` read
    /// the oldest.
    #[inline]
    pub fn read_interpolated(&self, delay_samples: f32) -> f32 {
        let delay = delay_samples.clamp(0.0, self.max_delay() as f32);
        let whole = delay.floor();
        let frac = delay - whole;
        let whole = whole as usize;

        let a = self.read(whole);
        if frac == 0.0 {
            return a;
        }
        let b = self.read(whole + 1);
        a + (b - a) * frac
    }

    /// Write `sample` and return the sample from `delay_samples` ago.
    pub fn next_sample(&mut self, sample: f32, delay_samples: usize) -> f32 {
        self.write(sample);
        self.read(delay_samples)
    }

    pub fn render(&mut self, buffer: &mut [f32], delay_samples: usize) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, delay_samples);
        }
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}
