//! Platform eligibility checks.

use crosspost_core::{ContentKind, Platform};
use crosspost_error::{ValidationError, ValidationErrorKind};
use std::collections::BTreeSet;

/// Check that `platforms` is non-empty and every entry accepts `kind`.
///
/// Pure set membership against the fixed policy: no I/O, no side effects.
/// The first offending platform (in platform order) is reported.
///
/// # Examples
///
/// ```
/// use crosspost_client::validate;
/// use crosspost_core::{ContentKind, Platform};
/// use std::collections::BTreeSet;
///
/// let ok = BTreeSet::from([Platform::TikTok, Platform::X]);
/// assert!(validate(ContentKind::Photos, &ok).is_ok());
///
/// let bad = BTreeSet::from([Platform::Instagram]);
/// let err = validate(ContentKind::Text, &bad).unwrap_err();
/// assert_eq!(err.platform(), Some(Platform::Instagram));
/// ```
pub fn validate(kind: ContentKind, platforms: &BTreeSet<Platform>) -> Result<(), ValidationError> {
    if platforms.is_empty() {
        return Err(ValidationError::new(ValidationErrorKind::NoPlatforms { kind }));
    }

    match platforms.iter().find(|platform| !kind.allows(**platform)) {
        Some(platform) => Err(ValidationError::new(ValidationErrorKind::InvalidPlatform {
            kind,
            platform: *platform,
        })),
        None => Ok(()),
    }
}
