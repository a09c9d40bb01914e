use thiserror::Error;
use url::Url;

/// Shown when an illustration cannot be generated.
pub const DEFAULT_PLACEHOLDER_URL: &str = "https://picsum.photos/800/450?grayscale";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ImageError {
    #[error("image reference cannot be empty")]
    Empty,

    #[error("invalid image reference: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrigin {
    Generated,
    Placeholder,
}

/// A displayable illustration: a `data:` URI from the generator or a placeholder URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    url: Url,
    origin: ImageOrigin,
}

impl ImageRef {
    /// Wrap base64-encoded image bytes in a `data:` URI.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::Empty` when there are no bytes.
    pub fn from_base64(mime_type: &str, base64_bytes: &str) -> Result<Self, ImageError> {
        let bytes = base64_bytes.trim();
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        let mime = match mime_type.trim() {
            "" => "image/jpeg",
            other => other,
        };
        let url = parse(&format!("data:{mime};base64,{bytes}"))?;
        Ok(Self {
            url,
            origin: ImageOrigin::Generated,
        })
    }

    /// # Errors
    ///
    /// Returns `ImageError` when `raw` is empty or not an absolute URL.
    pub fn placeholder(raw: &str) -> Result<Self, ImageError> {
        Ok(Self {
            url: parse(raw)?,
            origin: ImageOrigin::Placeholder,
        })
    }

    /// The built-in placeholder.
    ///
    /// # Panics
    ///
    /// Panics if `DEFAULT_PLACEHOLDER_URL` is not a valid URL.
    #[must_use]
    pub fn default_placeholder() -> Self {
        Self::placeholder(DEFAULT_PLACEHOLDER_URL).expect("default placeholder url should be valid")
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn origin(&self) -> ImageOrigin {
        self.origin
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.origin == ImageOrigin::Placeholder
    }
}

fn parse(raw: &str) -> Result<Url, ImageError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ImageError::Empty);
    }
    Url::parse(trimmed).map_err(|err| ImageError::InvalidUrl(err.to_string()))
}
