/// There are but three failures, and verification only ever reports one of them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// Buffer of the wrong size, digest of the wrong length, or a salt length
    /// that does not fit the key and digest.
    InvalidArgument,
    /// The RSA primitive or the RNG failed.
    Engine,
    /// The signature does not verify, for whichever reason.
    InvalidSignature,
}

/// [`Error`] or success.
pub type Result<T> = core::result::Result<T, Error>;
