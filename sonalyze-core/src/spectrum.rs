/// Maximum number of bars drawn for a spectrum.
pub const MAX_SPECTRUM_BINS: usize = 50;

/// One bar of a downsampled spectrum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpectrumPoint {
    /// Bin index (0-based)
    pub frequency: usize,
    /// Mean amplitude of the samples that fell into this bin
    pub amplitude: f64,
}

/// Average `samples` into at most [`MAX_SPECTRUM_BINS`] bins.
///
/// Bin size is `ceil(len / 50)`; the last bin may be shorter and is averaged
/// over the samples it actually holds.
pub fn bin_spectrum(samples: &[f64]) -> Vec<SpectrumPoint> {
    if samples.is_empty() {
        return Vec::new();
    }
    let bin_size = samples.len().div_ceil(MAX_SPECTRUM_BINS);

    samples
        .chunks(bin_size)
        .enumerate()
        .map(|(i, bin)| SpectrumPoint {
            frequency: i,
            amplitude: bin.iter().sum::<f64>() / bin.len() as f64,
        })
        .collect()
}

/// Parse a server-serialized spectrum (a JSON array of numbers).
pub fn parse_spectrum(serialized: &str) -> Result<Vec<f64>, String> {
    serde_json::from_str::<Vec<f64>>(serialized)
        .map_err(|e| format!("invalid frequency spectrum: {e}"))
}

/// Parse and bin a serialized spectrum for charting.
///
/// Malformed input is logged and yields an empty chart.
pub fn render_spectrum(serialized: &str) -> Vec<SpectrumPoint> {
    match parse_spectrum(serialized) {
        Ok(samples) => bin_spectrum(&samples),
        Err(e) => {
            log::error!("{e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_keeps_every_sample() {
        let points = bin_spectrum(&[1.0, 2.0, 3.0]);
        assert_eq!(points.len(), 3);
        assert_eq!(points[2], SpectrumPoint { frequency: 2, amplitude: 3.0 });
    }

    #[test]
    fn test_bins_are_means() {
        // 100 samples -> bin size 2 -> 50 bins
        let samples: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let points = bin_spectrum(&samples);
        assert_eq!(points.len(), 50);
        assert_eq!(points[0].amplitude, 0.5);
        assert_eq!(points[49].frequency, 49);
        assert_eq!(points[49].amplitude, 98.5);
    }

    #[test]
    fn test_uneven_tail_bin() {
        // 101 samples -> bin size 3 -> 34 bins, last holds [99, 100]
        let samples: Vec<f64> = (0..101).map(|i| i as f64).collect();
        let points = bin_spectrum(&samples);
        assert_eq!(points.len(), 34);
        let last = points.last().unwrap();
        assert_eq!(last.frequency, 33);
        assert_eq!(last.amplitude, 99.5);
    }

    #[test]
    fn test_never_more_than_fifty_bins() {
        for n in [1usize, 49, 50, 51, 99, 149, 1000, 1025, 4097] {
            let samples = vec![1.0; n];
            let points = bin_spectrum(&samples);
            assert!(points.len() <= MAX_SPECTRUM_BINS, "n={n} gave {}", points.len());
            let bin_size = n.div_ceil(MAX_SPECTRUM_BINS);
            for (k, p) in points.iter().enumerate() {
                assert_eq!(p.frequency, (k * bin_size) / bin_size);
            }
        }
    }

    #[test]
    fn test_render_parses_json() {
        let points = render_spectrum("[0.0, 1.0, 2.0, 3.5]");
        assert_eq!(points.len(), 4);
        assert_eq!(points[3].amplitude, 3.5);
    }

    #[test]
    fn test_malformed_input_is_empty() {
        assert!(render_spectrum("not json").is_empty());
        assert!(render_spectrum("{\"a\": 1}").is_empty());
        assert!(render_spectrum("[1, \"two\", 3]").is_empty());
        assert!(render_spectrum("").is_empty());
    }

    #[test]
    fn test_empty_array_is_empty() {
        assert!(render_spectrum("[]").is_empty());
    }
}
