//! Audio-thread processor: band splitting, level metering, solo routing and
//! spectrum analysis in one block call.

use std::sync::Arc;

use trinity_analysis::SpectrumAnalyzer;
use trinity_core::{validate_stream, TrinityConfig};
use trinity_dsp::{route, BandSplitter, CrossoverFreqs, LevelTracker};

use crate::handle::{Shared, TrinityHandle};
use crate::{Result, Sample, SignalGenerator, TrinityProcessorBuilder};

/// Three-band crossover meter and spectrum analyzer.
///
/// `prepare` and the setters run at configuration time and may allocate.
/// [`TrinityProcessor::process`] runs on the audio thread: it never blocks,
/// allocates, logs or fails.
///
/// # Example
///
/// ```rust
/// use trinity::TrinityProcessor;
///
/// let mut processor = TrinityProcessor::builder()
///     .crossovers(150.0, 2500.0)
///     .build()?;
/// processor.prepare(48000.0, 128, 2)?;
///
/// let mut left = vec![0.25f32; 128];
/// let mut right = vec![-0.25f32; 128];
/// processor.process(&mut [&mut left[..], &mut right[..]]);
///
/// assert!(processor.handle().total_level() > 0.0);
/// # Ok::<(), trinity::Error>(())
/// ```
pub struct TrinityProcessor {
    config: TrinityConfig,
    shared: Arc<Shared>,
    splitters: Vec<BandSplitter>,
    levels: LevelTracker,
    analyzer: SpectrumAnalyzer,
    generator: Option<Box<dyn SignalGenerator>>,
    sample_rate: f64,
    block_size: usize,
    prepared: bool,
}

impl std::fmt::Debug for TrinityProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrinityProcessor")
            .field("config", &self.config)
            .field("num_channels", &self.splitters.len())
            .field("sample_rate", &self.sample_rate)
            .field("block_size", &self.block_size)
            .field("prepared", &self.prepared)
            .field("has_generator", &self.generator.is_some())
            .finish()
    }
}

impl TrinityProcessor {
    /// Create a new processor builder
    pub fn builder() -> TrinityProcessorBuilder {
        TrinityProcessorBuilder::default()
    }

    /// Create an unprepared processor from a validated config.
    pub fn new(config: TrinityConfig) -> Result<Self> {
        config.validate()?;
        let fft_size = config.fft_size();
        Ok(Self {
            shared: Arc::new(Shared::new(&config.params, config.num_bands)),
            splitters: Vec::new(),
            levels: LevelTracker::new(),
            analyzer: SpectrumAnalyzer::new(fft_size, config.num_bands),
            generator: None,
            sample_rate: 0.0,
            block_size: 0,
            prepared: false,
            config,
        })
    }

    /// Handle for the UI thread.
    pub fn handle(&self) -> TrinityHandle {
        TrinityHandle::new(Arc::clone(&self.shared))
    }

    pub fn config(&self) -> &TrinityConfig {
        &self.config
    }

    #[inline]
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Sample rate of the last successful `prepare`, or 0 before it.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Block size announced by the host; blocks of other sizes still work.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn num_channels(&self) -> usize {
        self.splitters.len()
    }

    /// Size all buffers for a stream and clear every piece of state.
    ///
    /// On error the processor keeps its previous configuration.
    pub fn prepare(&mut self, sample_rate: f64, block_size: usize, num_channels: usize) -> Result<()> {
        validate_stream(sample_rate, block_size, num_channels)?;
        let freqs = CrossoverFreqs::new(self.config.low_mid_hz, self.config.mid_high_hz);
        freqs.validate(sample_rate)?;

        if self.splitters.len() == num_channels {
            for splitter in &mut self.splitters {
                splitter.prepare(freqs, sample_rate)?;
            }
        } else {
            self.splitters = (0..num_channels)
                .map(|_| BandSplitter::new(freqs, sample_rate))
                .collect::<std::result::Result<Vec<_>, _>>()?;
        }
        self.levels = LevelTracker::new();
        self.shared.publisher.clear();
        let params = self.shared.params.snapshot();
        self.analyzer.prepare(sample_rate, &params, &self.shared.publisher);

        let display_max_hz = self.shared.publisher.display_max_hz();
        if let Some(generator) = self.generator.as_mut() {
            generator.prepare(sample_rate, display_max_hz);
        }

        self.sample_rate = sample_rate;
        self.block_size = block_size;
        self.prepared = true;

        tracing::info!(
            sample_rate,
            block_size,
            num_channels,
            fft_size = self.config.fft_size(),
            num_bands = self.config.num_bands,
            display_max_hz,
            "trinity processor prepared"
        );
        Ok(())
    }

    /// Clear filter, FIFO and smoothing state without reallocating.
    pub fn reset(&mut self) {
        for splitter in &mut self.splitters {
            splitter.reset();
        }
        self.levels = LevelTracker::new();
        self.analyzer.reset();
    }

    /// Install a test-signal source. Prepared immediately if the processor
    /// already is.
    pub fn set_signal_generator(&mut self, mut generator: Box<dyn SignalGenerator>) {
        if self.prepared {
            generator.prepare(self.sample_rate, self.shared.publisher.display_max_hz());
        }
        self.generator = Some(generator);
        tracing::debug!("signal generator installed");
    }

    pub fn clear_signal_generator(&mut self) -> Option<Box<dyn SignalGenerator>> {
        self.generator.take()
    }

    /// Process one planar block in place.
    ///
    /// Unprepared processors leave the buffer untouched. Channels beyond the
    /// prepared count pass through and are not analyzed. Only the frames
    /// present in every analyzed channel are processed.
    pub fn process<S: Sample>(&mut self, channels: &mut [&mut [S]]) {
        if !self.prepared {
            return;
        }

        let params = self.shared.params.snapshot();
        self.analyzer.begin_block(&params, &self.shared.publisher);

        let active = channels.len().min(self.splitters.len());
        let frames = channels[..active].iter().map(|ch| ch.len()).min().unwrap_or(0);
        let inv_active = if active > 0 { 1.0 / active as f32 } else { 0.0 };
        let generate = self.generator.as_ref().is_some_and(|g| g.is_enabled());

        for i in 0..frames {
            if generate {
                if let Some(generator) = self.generator.as_mut() {
                    let value = S::from_f32(generator.next_sample());
                    for ch in channels.iter_mut() {
                        if let Some(sample) = ch.get_mut(i) {
                            *sample = value;
                        }
                    }
                }
            }

            let mut mono = 0.0f32;
            for (ch, splitter) in channels[..active].iter_mut().zip(self.splitters.iter_mut()) {
                let input = ch[i].to_f32();
                let bands = splitter.split(input);
                self.levels.observe(input, &bands);
                ch[i] = S::from_f32(route(params.solo, &bands));
                if input.is_finite() {
                    mono += input;
                }
            }

            if active > 0 {
                self.analyzer.push(mono * inv_active, &params);
            }
        }

        let levels = self.levels.finish_block();
        self.shared.publisher.levels().store(&levels);
        self.analyzer.end_block(&self.shared.publisher);
    }
}
