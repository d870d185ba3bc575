//! Frequency-spectrum snapshots for audio-reactive anchors.
//!
//! Audio capture and analysis live outside this crate. A backend implements
//! [`SpectrumSource`] and exposes one byte per frequency band, `0..=255`,
//! index = band. The controller only reads normalized band amplitudes.

/// One snapshot of per-band amplitudes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spectrum {
    bands: Vec<u8>,
}

impl Spectrum {
    /// A silent spectrum with `band_count` bands.
    pub fn silent(band_count: usize) -> Self {
        Self {
            bands: vec![0; band_count],
        }
    }

    pub fn from_bytes(bands: Vec<u8>) -> Self {
        Self { bands }
    }

    /// Amplitude of `band` normalized to `[0, 1]`. Missing bands read as 0.
    pub fn band(&self, band: usize) -> f32 {
        self.bands
            .get(band)
            .map(|&b| b as f32 / u8::MAX as f32)
            .unwrap_or(0.0)
    }

    /// Raw byte amplitudes.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bands
    }

    /// Mutable raw amplitudes, for backends that fill in place.
    #[inline]
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bands
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}

/// Something that can produce a fresh [`Spectrum`] each frame.
pub trait SpectrumSource {
    /// Refresh the snapshot.
    fn update(&mut self);

    /// The most recent snapshot.
    fn spectrum(&self) -> &Spectrum;
}

/// A source that always reports the spectrum it was given.
///
/// Useful for tests and for feeding pre-analysed data.
#[derive(Debug, Clone, Default)]
pub struct StaticSpectrum {
    spectrum: Spectrum,
}

impl StaticSpectrum {
    pub fn new(spectrum: Spectrum) -> Self {
        Self { spectrum }
    }

    /// Replace the reported spectrum.
    pub fn set(&mut self, spectrum: Spectrum) {
        self.spectrum = spectrum;
    }
}

impl SpectrumSource for StaticSpectrum {
    fn update(&mut self) {}

    fn spectrum(&self) -> &Spectrum {
        &self.spectrum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_normalized() {
        let s = Spectrum::from_bytes(vec![0, 51, 255]);
        assert_eq!(s.band(0), 0.0);
        assert!((s.band(1) - 0.2).abs() < 1e-6);
        assert_eq!(s.band(2), 1.0);
    }

    #[test]
    fn test_missing_band_is_silent() {
        let s = Spectrum::silent(4);
        assert_eq!(s.len(), 4);
        assert_eq!(s.band(100), 0.0);
    }

    #[test]
    fn test_static_source() {
        let mut source = StaticSpectrum::new(Spectrum::from_bytes(vec![10, 20]));
        source.update();
        assert_eq!(source.spectrum().bytes(), &[10, 20]);

        source.set(Spectrum::silent(3));
        assert_eq!(source.spectrum().len(), 3);
    }
}
