//! Configuration parameters for chroma extraction

/// Chroma extraction parameters
#[derive(Debug, Clone)]
pub struct ChromaConfig {
    /// FFT frame size in samples (default: 4096)
    /// 4096 at 44100 Hz gives ~10.7 Hz bin resolution
    pub frame_size: usize,

    /// Hop size between frames in samples (default: 2048, 50% overlap)
    pub hop_size: usize,

    /// Lowest analyzed frequency in Hz (default: 27.5, A0)
    pub min_frequency: f64,

    /// Highest analyzed frequency in Hz (default: 4186.0, C8)
    pub max_frequency: f64,

    /// Tuning reference for A4 in Hz (default: 440.0)
    pub tuning_frequency: f64,
}

impl Default for ChromaConfig {
    fn default() -> Self {
        Self {
            frame_size: 4096,
            hop_size: 2048,
            min_frequency: 27.5,
            max_frequency: 4186.0,
            tuning_frequency: 440.0,
        }
    }
}
