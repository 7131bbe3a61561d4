//! FFT spectrum of a fixed-length block.
//!
//! Used to check tonal balance in tests (pink against white noise, filter
//! slopes) and by the monitor's spectrum view.

use std::{f32::consts::PI, sync::Arc};

use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// Power floor, keeps the dB conversion finite on silence.
const POWER_FLOOR: f32 = 1e-12;

/// Lowest frequency shown by [`SpectrumAnalyzer::log_bins`].
const DISPLAY_MIN_HZ: f32 = 20.0;

pub struct SpectrumAnalyzer {
    /// Hann window coefficients
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// Linear power of bins 0..=len/2 from the last analysed block
    power: Vec<f32>,
    sample_rate: f32,
}

impl SpectrumAnalyzer {
    /// `buffer_len` is the FFT size; `analyze` only accepts blocks of exactly
    /// that length.
    pub fn new(buffer_len: usize, sample_rate: f32) -> Self {
        let buffer_len = buffer_len.max(2);
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(buffer_len);

        // Hann window - reduces spectral leakage
        let denom = (buffer_len - 1) as f32;
        let window = (0..buffer_len)
            .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / denom).cos()))
            .collect();

        Self {
            window,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); buffer_len],
            power: vec![POWER_FLOOR; buffer_len / 2 + 1],
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Width of one FFT bin in Hz.
    pub fn bin_width(&self) -> f32 {
        self.sample_rate / self.len() as f32
    }

    /// Window and transform `buffer`. Returns false, leaving the previous
    /// spectrum in place, when the length does not match.
    pub fn analyze(&mut self, buffer: &[f32]) -> bool {
        if buffer.len() != self.window.len() {
            return false;
        }

        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }

        self.fft.process(&mut self.scratch);

        for (power, bin) in self.power.iter_mut().zip(&self.scratch) {
            *power = bin.norm_sqr().max(POWER_FLOOR);
        }
        true
    }

    fn bin_for(&self, freq: f32) -> usize {
        let index = (freq / self.bin_width()).round().max(0.0) as usize;
        index.min(self.power.len() - 1)
    }

    /// Power at the bin nearest `freq`, in dB.
    pub fn power_db(&self, freq: f32) -> f32 {
        10.0 * self.power[self.bin_for(freq)].log10()
    }

    /// Mean linear power of the bins between `low` and `high` Hz, inclusive.
    pub fn band_power(&self, low: f32, high: f32) -> f32 {
        let (a, b) = (self.bin_for(low.min(high)), self.bin_for(low.max(high)));
        let band = &self.power[a..=b];
        band.iter().sum::<f32>() / band.len() as f32
    }

    /// `count` log-spaced (frequency Hz, power dB) points from 20 Hz up to
    /// Nyquist (capped at 20 kHz), for plotting.
    pub fn log_bins(&self, count: usize) -> Vec<(f64, f64)> {
        let max_freq = (self.sample_rate / 2.0).min(20_000.0).max(1.0) as f64;
        let min_freq = (DISPLAY_MIN_HZ as f64).min(max_freq);
        let ratio = max_freq / min_freq;

        (0..count)
            .map(|i| {
                let t = if count > 1 {
                    i as f64 / (count - 1) as f64
                } else {
                    0.0
                };
                let freq = min_freq * ratio.powf(t);
                (freq, self.power_db(freq as f32) as f64)
            })
            .collect()
    }
}
