//! Sinusoidal dune terrain
//!
//! The ground is an analytic height field: a baseline plus a sum of sine
//! waves. Heights follow screen convention, so larger y is lower on screen.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// One sine term of the height field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveComponent {
    pub amplitude: f64,
    pub frequency: f64,
}

impl WaveComponent {
    pub const fn new(amplitude: f64, frequency: f64) -> Self {
        Self {
            amplitude,
            frequency,
        }
    }

    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        self.amplitude * (self.frequency * x).sin()
    }
}

/// Hand-picked dunes for reproducible sessions and tests
pub const FIXTURE_WAVES: [WaveComponent; 10] = [
    WaveComponent::new(22.5, 0.0023),
    WaveComponent::new(14.0, 0.0071),
    WaveComponent::new(27.3, 0.0012),
    WaveComponent::new(11.8, 0.0094),
    WaveComponent::new(19.6, 0.0047),
    WaveComponent::new(25.1, 0.0031),
    WaveComponent::new(16.4, 0.0058),
    WaveComponent::new(12.9, 0.0085),
    WaveComponent::new(29.2, 0.0016),
    WaveComponent::new(18.7, 0.0064),
];

/// Immutable wave set for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    waves: Vec<WaveComponent>,
    baseline: f64,
}

impl Terrain {
    pub fn new(waves: Vec<WaveComponent>, baseline: f64) -> Self {
        Self { waves, baseline }
    }

    /// Level ground at `baseline`
    pub fn flat(baseline: f64) -> Self {
        Self::new(Vec::new(), baseline)
    }

    /// The literal fixture dunes at the given baseline
    pub fn fixture(baseline: f64) -> Self {
        Self::new(FIXTURE_WAVES.to_vec(), baseline)
    }

    /// Draw `settings.wave_count` waves uniformly from the configured ranges.
    ///
    /// The same seed always yields the same dunes.
    pub fn generate(seed: u64, settings: &Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let waves = (0..settings.wave_count)
            .map(|_| WaveComponent {
                amplitude: rng.random_range(settings.amplitude_min..=settings.amplitude_max),
                frequency: rng.random_range(settings.frequency_min..=settings.frequency_max),
            })
            .collect();
        Self::new(waves, settings.terrain_baseline)
    }

    pub fn waves(&self) -> &[WaveComponent] {
        &self.waves
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Terrain surface height at horizontal position `x`
    ///
    /// An empty wave set is level ground at the baseline.
    pub fn height_at(&self, x: f64) -> f64 {
        self.baseline + self.waves.iter().map(|w| w.eval(x)).sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::TAU;

    #[test]
    fn test_empty_terrain_is_baseline() {
        let terrain = Terrain::flat(600.0);
        for x in [-1e6, -3.5, 0.0, 42.0, 1e6] {
            assert_eq!(terrain.height_at(x), 600.0);
        }
    }

    #[test]
    fn test_zero_amplitudes_are_flat() {
        let waves = vec![WaveComponent::new(0.0, 0.004); 10];
        let terrain = Terrain::new(waves, 123.0);
        assert_eq!(terrain.height_at(987.6), 123.0);
    }

    #[test]
    fn test_fixture_golden_values() {
        let terrain = Terrain::fixture(600.0);
        assert_eq!(terrain.height_at(0.0), 600.0);
        assert!((terrain.height_at(250.0) - 735.368_743_559_085_8).abs() < 1e-9);
        assert!((terrain.height_at(-1234.5) - 545.340_679_803_118).abs() < 1e-9);
    }

    #[test]
    fn test_generate_is_deterministic_and_in_range() {
        let settings = Settings::default();
        let a = Terrain::generate(7, &settings);
        let b = Terrain::generate(7, &settings);
        let c = Terrain::generate(8, &settings);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.waves().len(), settings.wave_count);
        for w in a.waves() {
            assert!((settings.amplitude_min..=settings.amplitude_max).contains(&w.amplitude));
            assert!((settings.frequency_min..=settings.frequency_max).contains(&w.frequency));
        }
    }

    #[test]
    fn test_generate_degenerate_range() {
        let settings = Settings {
            amplitude_min: 15.0,
            amplitude_max: 15.0,
            wave_count: 4,
            ..Settings::default()
        };
        let terrain = Terrain::generate(1, &settings);
        assert!(terrain.waves().iter().all(|w| w.amplitude == 15.0));
    }

    proptest! {
        #[test]
        fn prop_height_is_sum_of_sines(
            waves in prop::collection::vec((0.0f64..50.0, 0.0001f64..0.05), 0..12),
            baseline in -1000.0f64..1000.0,
            x in -10_000.0f64..10_000.0,
        ) {
            let waves: Vec<_> = waves.into_iter().map(|(a, f)| WaveComponent::new(a, f)).collect();
            let expected = baseline + waves.iter().map(|w| w.amplitude * (w.frequency * x).sin()).sum::<f64>();
            let terrain = Terrain::new(waves, baseline);
            prop_assert!((terrain.height_at(x) - expected).abs() < 1e-9);
        }

        #[test]
        fn prop_single_wave_is_periodic(
            amplitude in 1.0f64..30.0,
            frequency in 0.001f64..0.01,
            x in -5_000.0f64..5_000.0,
        ) {
            let terrain = Terrain::new(vec![WaveComponent::new(amplitude, frequency)], 0.0);
            let period = TAU / frequency;
            prop_assert!((terrain.height_at(x) - terrain.height_at(x + period)).abs() < 1e-6);
        }
    }
}
