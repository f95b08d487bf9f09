//! Eligibility guard.
//!
//! Pure predicate over an incoming object descriptor. Safe to call
//! speculatively or repeatedly; re-evaluating the same descriptor always
//! yields the same verdict. A negative verdict is an intentional no-op for
//! the orchestrator, not an error.

use std::fmt;
use thumbgen_core::constants::IMAGE_CONTENT_TYPE_PREFIX;
use thumbgen_core::{Config, ObjectDescriptor};

/// Why an object was not processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Content type absent or not in the image media family.
    NotAnImage,
    /// Object already lives in the thumbnail namespace (anti-recursion).
    InThumbnailFolder,
    /// Base name carries the thumbnail marker (redundant anti-recursion
    /// check for unexpected path shapes).
    HasThumbnailPrefix,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotAnImage => write!(f, "not an image"),
            SkipReason::InThumbnailFolder => write!(f, "already in thumbnail folder"),
            SkipReason::HasThumbnailPrefix => write!(f, "already carries thumbnail prefix"),
        }
    }
}

/// Evaluate the guard rules in order; the first failing rule wins.
pub fn check_eligibility(
    descriptor: &ObjectDescriptor,
    config: &Config,
) -> Result<(), SkipReason> {
    let is_image = descriptor
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with(IMAGE_CONTENT_TYPE_PREFIX));
    if !is_image {
        return Err(SkipReason::NotAnImage);
    }

    if descriptor
        .dir()
        .split('/')
        .any(|segment| segment == config.thumbnail_folder)
    {
        return Err(SkipReason::InThumbnailFolder);
    }

    if descriptor.file_name().starts_with(&config.thumbnail_prefix) {
        return Err(SkipReason::HasThumbnailPrefix);
    }

    Ok(())
}

/// Boolean form of [`check_eligibility`].
pub fn is_eligible(descriptor: &ObjectDescriptor, config: &Config) -> bool {
    check_eligibility(descriptor, config).is_ok()
}
