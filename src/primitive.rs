//! The RSA primitive.
//!
//! Modular exponentiation itself is not implemented here: keys bring their own,
//! typically backed by a hardware accelerator. This module only fixes the
//! interface ([RSASP1][rsasp] and [RSAVP1][rsavp]) and how exclusive access to
//! the accelerator is scoped.
//!
//! [rsasp]: https://tools.ietf.org/html/rfc8017#section-5.2.1
//! [rsavp]: https://tools.ietf.org/html/rfc8017#section-5.2.2

use core::ops::Deref;

use crate::Result;

/// Bytes needed for `bits` bits, `ceil(bits / 8)` without overflow.
pub(crate) const fn bytes_for_bits(bits: usize) -> usize {
    bits / 8 + (bits % 8 != 0) as usize
}

/// An RSA key, as far as padding is concerned: a modulus size.
pub trait RsaKey {
    /// Bit length of the modulus, `modBits` in RFC 8017.
    fn modulus_bits(&self) -> usize;

    /// Byte length of the modulus, `k` in RFC 8017.
    fn size(&self) -> usize {
        bytes_for_bits(self.modulus_bits())
    }

    /// Claim exclusive use of the engine performing the exponentiation.
    ///
    /// Every successful `acquire` is paired with exactly one [`release`][RsaKey::release].
    fn acquire(&self) -> Result<()> {
        Ok(())
    }

    /// Give the engine back.
    fn release(&self) {}
}

/// Private key operation ("signature primitive", or "private permutation").
pub trait PrivateRsaPrimitive: RsaKey {
    /// Writes `message^d mod n` to `signature`, big-endian, left-padded to its length.
    ///
    /// Both slices have length [`size`][RsaKey::size].
    fn signature_primitive(&self, message: &[u8], signature: &mut [u8]) -> Result<()>;
}

/// Public key operation ("verification primitive", or "public permutation").
pub trait PublicRsaPrimitive: RsaKey {
    /// Writes `signature^e mod n` to `message`, big-endian, left-padded to its length.
    ///
    /// Both slices have length [`size`][RsaKey::size]. Signature representatives
    /// out of range are the implementation's to reject.
    fn verification_primitive(&self, signature: &[u8], message: &mut [u8]) -> Result<()>;
}

/// Exclusive access to a key's engine, released when dropped.
pub(crate) struct Lease<'k, K: RsaKey + ?Sized>(&'k K);

impl<'k, K: RsaKey + ?Sized> Lease<'k, K> {
    pub fn acquire(key: &'k K) -> Result<Self> {
        key.acquire()?;
        Ok(Self(key))
    }
}

impl<K: RsaKey + ?Sized> Deref for Lease<'_, K> {
    type Target = K;
    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl<K: RsaKey + ?Sized> Drop for Lease<'_, K> {
    fn drop(&mut self) {
        self.0.release();
    }
}
