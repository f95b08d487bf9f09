//! Thumbgen Processing Library
//!
//! The event-driven transform pipeline: eligibility guard, deterministic
//! destination-path derivation, scratch staging, the resize/encode transform
//! primitive, and the orchestrator that sequences
//! guard → fetch → transform → store → record → cleanup.

pub mod guard;
pub mod paths;
pub mod pipeline;
pub mod resize;
pub mod scratch;
pub mod transformer;

// Re-export commonly used types
pub use guard::{check_eligibility, is_eligible, SkipReason};
pub use paths::thumbnail_path;
pub use pipeline::{PipelineError, ProcessOutcome, ThumbnailPipeline};
pub use resize::ImageResize;
pub use scratch::ScratchArea;
pub use transformer::{TransformError, TransformOutput, Transformer};
