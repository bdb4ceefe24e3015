//! Color cycle orchestration
//!
//! Builds the ownership registry and cycle length once, then produces one
//! frame per frame index in ascending order. Frames may be computed
//! concurrently; the output order always matches frame order.
//!
//! # Example
//!
//! ```
//! use colorcycle::group::parse_group;
//! use colorcycle::orchestrator::CycleOrchestrator;
//! use image::RgbImage;
//!
//! let groups = vec![parse_group("#ff0000,#00ff00,#0000ff").unwrap()];
//! let source = RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 0, 255]).unwrap();
//!
//! let orchestrator = CycleOrchestrator::new(groups).unwrap();
//! let frames = orchestrator.generate(&source).unwrap();
//! assert_eq!(frames.len(), 3);
//! ```

use image::RgbImage;
use rayon::prelude::*;
use thiserror::Error;

use crate::cycle::checked_cycle_length;
use crate::frame_map::{build_frame_map, SubstitutionTable};
use crate::group::ColorGroup;
use crate::registry::{ColorGroupRegistry, DuplicateColor};
use crate::renderer::{render_frame, RenderError};

/// Error type for frame generation. Any error aborts the whole run.
#[derive(Debug, Error)]
pub enum CycleError {
    /// The LCM of group lengths does not fit in memory-addressable range
    #[error("cycle length overflows: the LCM of group lengths is too large")]
    CycleTooLong,
    /// Frame buffer could not be rendered
    #[error("frame {frame}: {source}")]
    Render {
        frame: usize,
        #[source]
        source: RenderError,
    },
    /// Out of memory holding the frame sequence
    #[error("out of memory buffering {frames} frames")]
    OutOfMemory { frames: usize },
    /// Worker pool could not be started
    #[error("failed to start worker pool: {0}")]
    ThreadPool(String),
    /// The frame consumer rejected a frame
    #[error("frame {frame}: {message}")]
    Sink { frame: usize, message: String },
}

/// Number of progress lines logged over one cycle.
const PROGRESS_STEPS: usize = 10;

/// Frames rendered per worker before results are appended in order.
const BATCH_PER_JOB: usize = 4;

/// Default number of parallel jobs (uses available parallelism).
fn default_jobs() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// Drives frame generation for a fixed set of groups.
#[derive(Debug, Clone)]
pub struct CycleOrchestrator {
    groups: Vec<ColorGroup>,
    registry: ColorGroupRegistry,
    warnings: Vec<DuplicateColor>,
    frame_count: usize,
    jobs: usize,
}

impl CycleOrchestrator {
    /// Set up registry and cycle length for `groups`.
    pub fn new(groups: Vec<ColorGroup>) -> Result<Self, CycleError> {
        let (registry, warnings) = ColorGroupRegistry::build(&groups);
        let frame_count = checked_cycle_length(&groups).ok_or(CycleError::CycleTooLong)?;

        log::info!(
            "{} groups, {} targeted colors, {} frames",
            groups.len(),
            registry.len(),
            frame_count
        );

        Ok(Self { groups, registry, warnings, frame_count, jobs: default_jobs() })
    }

    /// Set the number of parallel jobs. `1` renders sequentially.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    pub fn groups(&self) -> &[ColorGroup] {
        &self.groups
    }

    pub fn registry(&self) -> &ColorGroupRegistry {
        &self.registry
    }

    /// Duplicate-color records found while building the registry.
    pub fn warnings(&self) -> &[DuplicateColor] {
        &self.warnings
    }

    /// Total number of frames in one full cycle.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Substitution table for a single frame index.
    pub fn frame_map(&self, frame: usize) -> SubstitutionTable {
        build_frame_map(frame, &self.groups, &self.registry)
    }

    /// Render a single frame index.
    pub fn render(&self, source: &RgbImage, frame: usize) -> Result<RgbImage, CycleError> {
        log::debug!("rendering frame {}/{}", frame + 1, self.frame_count);
        let table = self.frame_map(frame);
        let image =
            render_frame(source, &table).map_err(|source| CycleError::Render { frame, source })?;

        let step = (self.frame_count / PROGRESS_STEPS).max(1);
        if (frame + 1) % step == 0 {
            log::info!("rendered frame {}/{}", frame + 1, self.frame_count);
        }
        Ok(image)
    }

    /// Generate the full ordered frame sequence.
    ///
    /// Either every frame is returned in frame order or the run fails with
    /// nothing returned. The frame vector is reserved up front, so a cycle
    /// too large to buffer fails before any frame is rendered.
    pub fn generate(&self, source: &RgbImage) -> Result<Vec<RgbImage>, CycleError> {
        let mut frames = Vec::new();
        frames
            .try_reserve_exact(self.frame_count)
            .map_err(|_| CycleError::OutOfMemory { frames: self.frame_count })?;

        if self.jobs <= 1 || self.frame_count <= 1 {
            for frame in 0..self.frame_count {
                frames.push(self.render(source, frame)?);
            }
            return Ok(frames);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| CycleError::ThreadPool(e.to_string()))?;

        // Batches keep the first error from waiting on the rest of the cycle.
        // Indexed collect keeps frame order within a batch.
        let batch = self.jobs.saturating_mul(BATCH_PER_JOB);
        pool.install(|| -> Result<Vec<RgbImage>, CycleError> {
            for start in (0..self.frame_count).step_by(batch) {
                let end = start.saturating_add(batch).min(self.frame_count);
                let rendered = (start..end)
                    .into_par_iter()
                    .map(|frame| self.render(source, frame))
                    .collect::<Result<Vec<_>, _>>()?;
                frames.extend(rendered);
            }
            Ok(frames)
        })
    }

    /// Render frames in order and hand each one to `sink` as soon as it is
    /// ready, so at most one frame is held in memory.
    ///
    /// Stops at the first sink or render error.
    pub fn stream<F, E>(&self, source: &RgbImage, mut sink: F) -> Result<usize, CycleError>
    where
        F: FnMut(usize, RgbImage) -> Result<(), E>,
        E: std::fmt::Display,
    {
        for frame in 0..self.frame_count {
            let image = self.render(source, frame)?;
            sink(frame, image)
                .map_err(|e| CycleError::Sink { frame, message: e.to_string() })?;
        }
        Ok(self.frame_count)
    }
}
