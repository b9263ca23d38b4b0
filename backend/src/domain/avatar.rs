//! Avatar URLs derived from email addresses.
//!
//! Avatars point at Gravatar's identicon service keyed by the MD5 digest of
//! the address. When no digest can be computed the generator degrades to
//! Gravatar's "mystery person" image instead of failing, so avatar generation
//! never blocks user creation.

use thiserror::Error;
use tracing::warn;

/// URL returned when no digest is available.
pub const AVATAR_FALLBACK_URL: &str = "https://gravatar.com/avatar/?d=mp";

const AVATAR_BASE_URL: &str = "https://gravatar.com/avatar/";

/// The digest primitive could not be used in this runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{algorithm} digest is unavailable")]
pub struct DigestUnavailable {
    algorithm: &'static str,
}

impl DigestUnavailable {
    /// Report `algorithm` as unavailable.
    #[must_use]
    pub const fn new(algorithm: &'static str) -> Self {
        Self { algorithm }
    }
}

/// Hex digest of an email address.
#[cfg_attr(test, mockall::automock)]
pub trait EmailDigest: Send + Sync {
    /// Lowercase hexadecimal digest of `email`.
    fn hex_digest(&self, email: &str) -> Result<String, DigestUnavailable>;
}

/// MD5, as expected by Gravatar.
#[derive(Debug, Default, Clone, Copy)]
pub struct Md5Digest;

impl EmailDigest for Md5Digest {
    fn hex_digest(&self, email: &str) -> Result<String, DigestUnavailable> {
        Ok(format!("{:x}", md5::compute(email.as_bytes())))
    }
}

enum AvatarHash {
    Digest(String),
    Unavailable,
}

impl AvatarHash {
    fn into_url(self) -> String {
        match self {
            Self::Digest(hex) => format!("{AVATAR_BASE_URL}{hex}?d=identicon"),
            Self::Unavailable => AVATAR_FALLBACK_URL.to_owned(),
        }
    }
}

/// Builds avatar URLs with a pluggable digest.
///
/// # Examples
/// ```
/// use user_directory::domain::avatar::AvatarGenerator;
///
/// let url = AvatarGenerator::default().generate("sam@frogs.com");
/// assert_eq!(
///     url,
///     "https://gravatar.com/avatar/08b7610b558a4cbbd20ae99072801f4d?d=identicon"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct AvatarGenerator<D = Md5Digest> {
    digest: D,
}

impl Default for AvatarGenerator<Md5Digest> {
    fn default() -> Self {
        Self::new(Md5Digest)
    }
}

impl<D: EmailDigest> AvatarGenerator<D> {
    /// Use `digest` to key avatars.
    pub fn new(digest: D) -> Self {
        Self { digest }
    }

    /// Avatar URL for `email`.
    pub fn generate(&self, email: &str) -> String {
        let hash = match self.digest.hex_digest(email) {
            Ok(hex) => AvatarHash::Digest(hex),
            Err(err) => {
                warn!(error = %err, "falling back to placeholder avatar");
                AvatarHash::Unavailable
            }
        };
        hash.into_url()
    }
}
