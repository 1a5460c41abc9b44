//! Request body buffering.
//!
//! An HTTP body is a single-read stream. Signature verification has to read
//! all of it, and the handler that runs afterwards needs the very same bytes.
//! [`BufferedBody`] drains the stream once into an immutable buffer that can
//! then hand out any number of independent readers.

use std::io::{Cursor, Read};
use std::sync::Arc;

use thiserror::Error;

/// Reading the body failed before a verdict could be reached.
#[derive(Debug, Error)]
#[error("failed to read request body: {0}")]
pub struct BodyReadError(#[from] std::io::Error);

/// An owned, immutable copy of a request body.
///
/// Clones share the same allocation.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BufferedBody(Arc<[u8]>);

impl BufferedBody {
    /// Drain `reader` to the end.
    ///
    /// # Errors
    ///
    /// Returns [`BodyReadError`] if the underlying read fails.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self, BodyReadError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::from(bytes))
    }

    /// Borrow the buffered bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// A fresh reader positioned at the start of the body.
    #[must_use]
    pub fn reader(&self) -> Cursor<Self> {
        Cursor::new(self.clone())
    }

    /// Copy the bytes into a new `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the body is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for BufferedBody {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for BufferedBody {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Arc::from(bytes))
    }
}

impl From<&[u8]> for BufferedBody {
    fn from(bytes: &[u8]) -> Self {
        Self(Arc::from(bytes))
    }
}

impl From<BufferedBody> for Vec<u8> {
    fn from(body: BufferedBody) -> Self {
        body.0.to_vec()
    }
}

// Bodies carry verification tokens, so only the size is printed.
impl std::fmt::Debug for BufferedBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferedBody")
            .field("len", &self.0.len())
            .finish()
    }
}
