//! Scratch memory for one sign or verify operation.
//!
//! Callers hand in a byte buffer of at least [`workmem_size`] bytes, laid out as
//!
//! ```ignore
//! +-------------------+---------------------------------+-----------+
//! |  seed (hLen + 4)  |           block (k)             | digest    |
//! +-------------------+---------------------------------+-----------+
//! ```
//!
//! - `seed`: the MGF1 input block `H || C`. Once the mask is applied it is free,
//!   and verification stores the zero prefix of M' in it.
//! - `block`: the encoded message, right-aligned (there is a leading zero byte
//!   if emLen = k - 1). The salt is generated directly into its slot in DB.
//!   When verifying, this receives the output of the public key operation,
//!   and DB is unmasked in place.
//! - `digest`: mHash. When verifying, H' overwrites it.
//!
//! The entire buffer is zeroized when the [`Workmem`] goes out of scope.

use zeroize::Zeroize;

use crate::{Error, Result};

/// Bytes of scratch memory needed for a modulus of `modulus_size` bytes and a
/// digest of `digest_size` bytes.
///
/// For instance, RSA-2048 with SHA-256 needs 324 bytes.
/// Saturates at `usize::MAX` for sizes no buffer can have.
pub const fn workmem_size(modulus_size: usize, digest_size: usize) -> usize {
    modulus_size.saturating_add(digest_size.saturating_mul(2)).saturating_add(4)
}

pub(crate) struct Workmem<'a> {
    buf: &'a mut [u8],
    modulus_size: usize,
    digest_size: usize,
}

/// The three disjoint areas of a [`Workmem`].
pub(crate) struct Regions<'w> {
    pub seed: &'w mut [u8],
    pub block: &'w mut [u8],
    pub digest: &'w mut [u8],
}

impl<'a> Workmem<'a> {
    pub fn new(buf: &'a mut [u8], modulus_size: usize, digest_size: usize) -> Result<Self> {
        if buf.len() < workmem_size(modulus_size, digest_size) {
            log::debug!("workmem of {} bytes too small", buf.len());
            return Err(Error::InvalidArgument);
        }
        Ok(Self { buf, modulus_size, digest_size })
    }

    pub fn regions(&mut self) -> Regions<'_> {
        let (seed, rest) = self.buf.split_at_mut(self.digest_size + 4);
        let (block, rest) = rest.split_at_mut(self.modulus_size);
        let digest = &mut rest[..self.digest_size];
        Regions { seed, block, digest }
    }
}

impl Drop for Workmem<'_> {
    fn drop(&mut self) {
        self.buf.zeroize();
    }
}
