//! RSASSA-PSS signature generation and verification (RFC 8017, section 8.1).

use core::fmt;
use core::marker::PhantomData;

use digest::Digest;
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::padding::{encode_in_place, verify_in_place, Layout};
use crate::primitive::{bytes_for_bits, Lease, PrivateRsaPrimitive, PublicRsaPrimitive, RsaKey};
use crate::workmem::{workmem_size, Workmem};
use crate::{Error, Result};

/// ## Probabilistic Signature Scheme
///
/// Signatures with digest `H`, MGF1 over `H`, and a fixed salt length.
///
/// No operation allocates: the caller provides scratch memory of
/// [`workmem_size`] bytes (see [`Pss::workmem_size`]), which is wiped
/// before any operation returns.
pub struct Pss<H: Digest> {
    salt_len: usize,
    __: PhantomData<fn() -> H>,
}

/// Salt length equal to the digest length, the usual choice.
impl<H: Digest> Default for Pss<H> {
    fn default() -> Self {
        Self::with_salt_len(H::output_size())
    }
}

impl<H: Digest> Clone for Pss<H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H: Digest> Copy for Pss<H> {}

impl<H: Digest> fmt::Debug for Pss<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pss")
            .field("digest_size", &H::output_size())
            .field("salt_len", &self.salt_len)
            .finish()
    }
}

impl<H: Digest> Pss<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any salt length is accepted here, including zero; it is checked
    /// against the key when signing.
    pub fn with_salt_len(salt_len: usize) -> Self {
        Self { salt_len, __: PhantomData }
    }

    pub fn salt_len(&self) -> usize {
        self.salt_len
    }

    /// Scratch memory needed for operations with `key`.
    pub fn workmem_size<K: RsaKey + ?Sized>(key: &K) -> usize {
        workmem_size(key.size(), H::output_size())
    }

    /// Sign the digest of a message.
    ///
    /// Writes the signature to the first `k` bytes of `signature` and returns `k`,
    /// the size of the modulus in bytes.
    pub fn sign_digest<K, R>(
        &self,
        key: &K,
        digest: &[u8],
        rng: R,
        workmem: &mut [u8],
        signature: &mut [u8],
    ) -> Result<usize>
    where
        K: PrivateRsaPrimitive + ?Sized,
        R: CryptoRng + RngCore,
    {
        let (layout, mut workmem) = self.prepare_signing(key, workmem, signature)?;
        if digest.len() != H::output_size() {
            log::debug!("digest of {} bytes, expected {}", digest.len(), H::output_size());
            return Err(Error::InvalidArgument);
        }
        workmem.regions().digest.copy_from_slice(digest);

        self.sign_prehashed(key, &layout, rng, &mut workmem, signature)
    }

    /// Hash and sign a message.
    pub fn sign_message<K, R>(
        &self,
        key: &K,
        message: &[u8],
        rng: R,
        workmem: &mut [u8],
        signature: &mut [u8],
    ) -> Result<usize>
    where
        K: PrivateRsaPrimitive + ?Sized,
        R: CryptoRng + RngCore,
    {
        let (layout, mut workmem) = self.prepare_signing(key, workmem, signature)?;
        hash_into::<H>(message, workmem.regions().digest);

        self.sign_prehashed(key, &layout, rng, &mut workmem, signature)
    }

    /// Verify a signature on the digest of a message.
    ///
    /// All verification failures are reported as [`Error::InvalidSignature`].
    pub fn verify_digest<K>(
        &self,
        key: &K,
        digest: &[u8],
        signature: &[u8],
        workmem: &mut [u8],
    ) -> Result<()>
    where
        K: PublicRsaPrimitive + ?Sized,
    {
        let (layout, mut workmem) = self.prepare_verification(key, signature, workmem)?;
        if digest.len() != H::output_size() {
            log::debug!("digest of {} bytes, expected {}", digest.len(), H::output_size());
            return Err(Error::InvalidArgument);
        }
        workmem.regions().digest.copy_from_slice(digest);

        self.verify_prehashed(key, &layout, signature, &mut workmem)
    }

    /// Hash a message and verify a signature on it.
    pub fn verify_message<K>(
        &self,
        key: &K,
        message: &[u8],
        signature: &[u8],
        workmem: &mut [u8],
    ) -> Result<()>
    where
        K: PublicRsaPrimitive + ?Sized,
    {
        let (layout, mut workmem) = self.prepare_verification(key, signature, workmem)?;
        hash_into::<H>(message, workmem.regions().digest);

        self.verify_prehashed(key, &layout, signature, &mut workmem)
    }

    fn prepare_signing<'w, K: RsaKey + ?Sized>(
        &self,
        key: &K,
        workmem: &'w mut [u8],
        signature: &[u8],
    ) -> Result<(Layout, Workmem<'w>)> {
        let k = consistent_size(key)?;
        log::trace!("pss sign: k = {}, hLen = {}, sLen = {}", k, H::output_size(), self.salt_len);

        if signature.len() < k {
            log::debug!("signature buffer of {} bytes, need {}", signature.len(), k);
            return Err(Error::InvalidArgument);
        }

        // 3. of EMSA-PSS-ENCODE
        let layout = Layout::new(key.modulus_bits(), H::output_size(), self.salt_len).ok_or_else(|| {
            log::debug!("salt of {} bytes does not fit", self.salt_len);
            Error::InvalidArgument
        })?;

        let workmem = Workmem::new(workmem, k, H::output_size())?;
        Ok((layout, workmem))
    }

    fn prepare_verification<'w, K: RsaKey + ?Sized>(
        &self,
        key: &K,
        signature: &[u8],
        workmem: &'w mut [u8],
    ) -> Result<(Layout, Workmem<'w>)> {
        let k = consistent_size(key)?;
        log::trace!("pss verify: k = {}, hLen = {}, sLen = {}", k, H::output_size(), self.salt_len);

        // 1. of RSASSA-PSS-VERIFY
        if signature.len() != k {
            log::debug!("signature of {} bytes, expected {}", signature.len(), k);
            return Err(Error::InvalidArgument);
        }

        // 3. of EMSA-PSS-VERIFY
        let layout = Layout::new(key.modulus_bits(), H::output_size(), self.salt_len).ok_or_else(|| {
            log::debug!("invalid signature");
            Error::InvalidSignature
        })?;

        let workmem = Workmem::new(workmem, k, H::output_size())?;
        Ok((layout, workmem))
    }

    fn sign_prehashed<K, R>(
        &self,
        key: &K,
        layout: &Layout,
        mut rng: R,
        workmem: &mut Workmem<'_>,
        signature: &mut [u8],
    ) -> Result<usize>
    where
        K: PrivateRsaPrimitive + ?Sized,
        R: CryptoRng + RngCore,
    {
        let k = layout.modulus_size();

        // 4.
        rng.try_fill_bytes(&mut workmem.regions().block[layout.salt()])
            .map_err(|_| {
                log::debug!("no salt from RNG");
                Error::Engine
            })?;

        encode_in_place(&mut H::new(), layout, workmem.regions())?;

        let lease = Lease::acquire(key)?;
        lease.signature_primitive(workmem.regions().block, &mut signature[..k])?;
        drop(lease);

        #[cfg(feature = "hex-debug")]
        log::trace!("signature: {}", delog::hex_str!(&signature[..k]));

        Ok(k)
    }

    fn verify_prehashed<K>(
        &self,
        key: &K,
        layout: &Layout,
        signature: &[u8],
        workmem: &mut Workmem<'_>,
    ) -> Result<()>
    where
        K: PublicRsaPrimitive + ?Sized,
    {
        let lease = Lease::acquire(key)?;
        lease.verification_primitive(signature, workmem.regions().block)?;
        drop(lease);

        verify_in_place(&mut H::new(), layout, workmem.regions()).map_err(|error| {
            log::debug!("invalid signature");
            error
        })
    }
}

/// The modulus size, if the key's byte and bit sizes agree
/// (the most significant byte of the modulus is not zero).
fn consistent_size<K: RsaKey + ?Sized>(key: &K) -> Result<usize> {
    let k = key.size();
    if k == 0 || k != bytes_for_bits(key.modulus_bits()) {
        log::debug!("key of {} bytes has a {} bit modulus", k, key.modulus_bits());
        return Err(Error::InvalidArgument);
    }
    Ok(k)
}

/// mHash = Hash(M), leaving no copy behind.
fn hash_into<H: Digest>(message: &[u8], digest: &mut [u8]) {
    let mut hasher = H::new();
    hasher.update(message);
    let mut m_hash = hasher.finalize();
    digest.copy_from_slice(&m_hash);
    m_hash[..].zeroize();
}
