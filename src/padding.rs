//! Padding for RSA signatures: EMSA-PSS.
//!
//! Main reference is RFC 8017 (PKCS #1 v2.2), section 9.1.
//!
//! RSASSA-PSS means: RSA Signature Scheme with Appendix, with Probabilistic Signature Scheme.
//! The RFC allows flexibility in the salt length, which we pass through unrestricted
//! (zero included), and a choice of mask generating function, which we restrict to MGF1
//! with the same digest as the message hash.
//!
//! Everything happens inside the caller's [workmem][crate::workmem_size], the encoded
//! message is never copied around. The [`emsa_pss_encode`] and [`emsa_pss_verify`] entry
//! points exist for callers who bring their own RSA handling, [`Pss`][crate::Pss] wires
//! them to a key.

use core::ops::Range;

use digest::Digest;
use subtle::{Choice, ConstantTimeEq};

use crate::primitive::bytes_for_bits;
use crate::workmem::{Regions, Workmem};
use crate::{Error, Result};

/// The zero octets that precede mHash in M'.
const PADDING1: [u8; 8] = [0; 8];

/// Trailer field of the encoded message.
const TRAILER: u8 = 0xbc;

/// Mask Generating Function 1, XOR'ed into `data`.
///
/// `seed` is the MGF1 input block: the seed proper, followed by four bytes
/// that receive the big-endian block counter. Zeroed `data` yields the plain mask.
///
/// Fails with [`Error::InvalidArgument`] if `seed` has no room for the counter.
///
/// The counter overflows after 2^32 digest blocks, far beyond any modulus,
/// so this is not checked.
pub fn xor_mgf1<H: Digest>(hasher: &mut H, seed: &mut [u8], data: &mut [u8]) -> Result<()> {
    let seed_len = seed.len().checked_sub(4).ok_or(Error::InvalidArgument)?;
    hasher.reset();
    let h_len = H::output_size();
    let mut c: u32 = 0;
    // "If either iterator returns None, next from the zipped iterator will return None"
    // So in the inner zipped loop, if the chunk is undersized, all is good
    for chunk in data.chunks_mut(h_len) {
        seed[seed_len..].copy_from_slice(&c.to_be_bytes());
        hasher.update(&seed[..]);
        for (byte_to_mask, masking_byte) in chunk.iter_mut().zip(hasher.finalize_reset().iter()) {
            *byte_to_mask ^= *masking_byte;
        }
        c += 1;
    }
    Ok(())
}

/// Bits of the leading block byte that must be zero, for a modulus of `mod_bits` bits.
///
/// These are the bits at or above the position of the modulus' most significant bit.
/// With emBits = modBits - 1, this covers the leftmost 8*emLen - emBits bits of EM,
/// and the entire leading zero byte of the block if modBits = 1 (mod 8).
fn msb_mask(mod_bits: usize) -> u8 {
    let shift = (mod_bits + 7) % 8;
    (0xffu32 << shift) as u8
}

/// Where things are in the block, for given modulus, digest and salt sizes.
///
/// ```ignore
/// __________________________________________________________________
///
///                              +-----------+
///                              |     M     |
///                              +-----------+
///                                    |
///                                    V
///                                  Hash
///                                    |
///                                    V
///                      +--------+----------+----------+
///                 M' = |Padding1|  mHash   |   salt   |
///                      +--------+----------+----------+
///                                     |
///           +--------+----------+     V
///     DB =  |Padding2|   salt   |   Hash
///           +--------+----------+     |
///                     |               |
///                     V               |
///                    xor <--- MGF <---|
///                     |               |
///                     |               |
///                     V               V
///           +-------------------+----------+--+
///     EM =  |    maskedDB       |     H    |bc|
///           +-------------------+----------+--+
/// __________________________________________________________________
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Layout {
    mod_bits: usize,
    modulus_size: usize,
    em_len: usize,
    h_len: usize,
    salt_len: usize,
}

impl Layout {
    /// `None` if emLen < hLen + sLen + 2.
    pub fn new(mod_bits: usize, h_len: usize, salt_len: usize) -> Option<Self> {
        let em_bits = mod_bits.checked_sub(1)?;
        let em_len = bytes_for_bits(em_bits);
        let needed = h_len.checked_add(salt_len)?.checked_add(2)?;
        if em_len < needed {
            return None;
        }
        Some(Self {
            mod_bits,
            modulus_size: bytes_for_bits(mod_bits),
            em_len,
            h_len,
            salt_len,
        })
    }

    pub fn modulus_size(&self) -> usize {
        self.modulus_size
    }

    /// DB, or maskedDB.
    fn db(&self) -> Range<usize> {
        (self.modulus_size - self.em_len)..self.hash().start
    }

    /// PS, not counting the leading zero byte of the block.
    fn padding2(&self) -> Range<usize> {
        self.db().start..(self.salt().start - 1)
    }

    pub fn salt(&self) -> Range<usize> {
        (self.hash().start - self.salt_len)..self.hash().start
    }

    /// H
    fn hash(&self) -> Range<usize> {
        (self.modulus_size - self.h_len - 1)..(self.modulus_size - 1)
    }
}

/// EMSA-PSS-ENCODE, steps 5 to 12, in place.
///
/// Expects mHash in `digest` and the salt in its slot of `block`.
pub(crate) fn encode_in_place<H: Digest>(hasher: &mut H, layout: &Layout, regions: Regions<'_>) -> Result<()> {
    let Regions { seed, block, digest } = regions;
    let h_len = layout.h_len;

    // 5. + 6.
    hasher.reset();
    hasher.update(&PADDING1);
    hasher.update(&digest[..]);
    hasher.update(&block[layout.salt()]);
    let hash = hasher.finalize_reset();

    // 7. + 8.
    // zeroing starts at the beginning of the block, covering a leading zero byte
    let separator = layout.salt().start - 1;
    block[..separator].fill(0);
    block[separator] = 1;

    // 9. + 10.
    seed[..h_len].copy_from_slice(&hash);
    xor_mgf1(hasher, seed, &mut block[layout.db()])?;

    // 11.
    block[0] &= !msb_mask(layout.mod_bits);

    // 12.
    block[layout.hash()].copy_from_slice(&hash);
    block[layout.modulus_size - 1] = TRAILER;
    Ok(())
}

/// EMSA-PSS-VERIFY, steps 4 to 14, in place.
///
/// Expects the output of the public key operation in `block` and mHash in `digest`.
///
/// All checks are folded into one [`Choice`], so a rejection looks the same
/// whichever check failed, and takes the same time.
pub(crate) fn verify_in_place<H: Digest>(hasher: &mut H, layout: &Layout, regions: Regions<'_>) -> Result<()> {
    let Regions { seed, block, digest } = regions;
    let h_len = layout.h_len;
    let mask = msb_mask(layout.mod_bits);

    // 4.
    let mut valid: Choice = block[layout.modulus_size - 1].ct_eq(&TRAILER);

    // 6.
    valid &= (block[0] & mask).ct_eq(&0);

    // 5. + 7. + 8.
    seed[..h_len].copy_from_slice(&block[layout.hash()]);
    xor_mgf1(hasher, seed, &mut block[layout.db()])?;

    // 9.
    block[0] &= !mask;

    // 10.
    let padding2 = block[layout.padding2()].iter().fold(0u8, |acc, byte| acc | byte);
    valid &= padding2.ct_eq(&0);
    valid &= block[layout.salt().start - 1].ct_eq(&1);

    // 11. + 12. + 13.
    // the seed is spent, reuse it for the zeros of M'
    seed[..PADDING1.len()].copy_from_slice(&PADDING1);
    hasher.update(&seed[..PADDING1.len()]);
    hasher.update(&digest[..]);
    hasher.update(&block[layout.salt()]);
    digest.copy_from_slice(&hasher.finalize_reset());

    // 14.
    valid &= digest.ct_eq(&block[layout.hash()]);

    if bool::from(valid) {
        Ok(())
    } else {
        Err(Error::InvalidSignature)
    }
}

/// EMSA-PSS-ENCODE with an explicit salt.
///
/// Writes the encoded message to `encoded`, which must be exactly as long as the
/// modulus (`k` bytes): EM is right-aligned, preceded by a zero byte if emLen = k - 1.
/// This is the integer the private key operation expects.
///
/// Fails with [`Error::InvalidArgument`] if emLen < hLen + sLen + 2, or if any
/// buffer has the wrong size.
pub fn emsa_pss_encode<H: Digest>(
    m_hash: &[u8],
    salt: &[u8],
    mod_bits: usize,
    workmem: &mut [u8],
    encoded: &mut [u8],
) -> Result<()> {
    let h_len = H::output_size();
    let layout = Layout::new(mod_bits, h_len, salt.len()).ok_or(Error::InvalidArgument)?;
    if m_hash.len() != h_len || encoded.len() != layout.modulus_size() {
        return Err(Error::InvalidArgument);
    }

    let mut workmem = Workmem::new(workmem, layout.modulus_size(), h_len)?;
    let regions = workmem.regions();
    regions.digest.copy_from_slice(m_hash);
    regions.block[layout.salt()].copy_from_slice(salt);

    encode_in_place(&mut H::new(), &layout, workmem.regions())?;
    encoded.copy_from_slice(workmem.regions().block);
    Ok(())
}

/// EMSA-PSS-VERIFY.
///
/// `encoded` is the output of the public key operation, exactly `k` bytes long.
///
/// Every inconsistency, including a salt length too large for the modulus,
/// is reported as [`Error::InvalidSignature`]. Buffers of the wrong size are
/// [`Error::InvalidArgument`].
pub fn emsa_pss_verify<H: Digest>(
    m_hash: &[u8],
    salt_len: usize,
    mod_bits: usize,
    encoded: &[u8],
    workmem: &mut [u8],
) -> Result<()> {
    let h_len = H::output_size();
    let modulus_size = bytes_for_bits(mod_bits);
    if m_hash.len() != h_len || encoded.len() != modulus_size {
        return Err(Error::InvalidArgument);
    }
    let mut workmem = Workmem::new(workmem, modulus_size, h_len)?;

    // 3.
    let layout = Layout::new(mod_bits, h_len, salt_len).ok_or(Error::InvalidSignature)?;

    let regions = workmem.regions();
    regions.digest.copy_from_slice(m_hash);
    regions.block.copy_from_slice(encoded);

    verify_in_place(&mut H::new(), &layout, workmem.regions())
}
