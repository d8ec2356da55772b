//! Keys, vectors, and deterministic RNGs for the tests.
//!
//! The keys are textbook RSA over `num-bigint`, with counters standing in for
//! an accelerator that needs to be claimed and given back.

use core::cell::Cell;
use core::num::NonZeroU32;

pub use hex_literal::hex;
use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};

use crate::{Error, PrivateRsaPrimitive, PublicRsaPrimitive, Result, RsaKey};

pub struct TestKey {
    n: BigUint,
    e: BigUint,
    d: BigUint,
    bits: usize,
    size: Option<usize>,
    busy: bool,
    failing: bool,
    acquired: Cell<usize>,
    released: Cell<usize>,
}

impl TestKey {
    fn new(n: &[u8], d: &[u8]) -> Self {
        let n = BigUint::from_bytes_be(n);
        Self {
            bits: n.bits() as usize,
            n,
            e: BigUint::from(65537u32),
            d: BigUint::from_bytes_be(d),
            size: None,
            busy: false,
            failing: false,
            acquired: Cell::new(0),
            released: Cell::new(0),
        }
    }

    /// (acquired, released)
    pub fn leases(&self) -> (usize, usize) {
        (self.acquired.get(), self.released.get())
    }

    pub fn with_busy_engine(self) -> Self {
        Self { busy: true, ..self }
    }

    pub fn with_failing_primitive(self) -> Self {
        Self { failing: true, ..self }
    }

    /// Claim a byte size that may disagree with the modulus.
    pub fn with_size(self, size: usize) -> Self {
        Self { size: Some(size), ..self }
    }

    fn exponentiate(&self, input: &[u8], exponent: &BigUint, output: &mut [u8]) -> Result<()> {
        if self.failing {
            return Err(Error::Engine);
        }
        let input = BigUint::from_bytes_be(input);
        if input >= self.n {
            return Err(Error::Engine);
        }
        let result = input.modpow(exponent, &self.n).to_bytes_be();
        let offset = output.len().checked_sub(result.len()).ok_or(Error::Engine)?;
        output.iter_mut().for_each(|byte| *byte = 0);
        output[offset..].copy_from_slice(&result);
        Ok(())
    }
}

impl RsaKey for TestKey {
    fn modulus_bits(&self) -> usize {
        self.bits
    }

    fn size(&self) -> usize {
        self.size.unwrap_or((self.bits + 7) / 8)
    }

    fn acquire(&self) -> Result<()> {
        if self.busy {
            return Err(Error::Engine);
        }
        self.acquired.set(self.acquired.get() + 1);
        Ok(())
    }

    fn release(&self) {
        self.released.set(self.released.get() + 1);
        assert!(self.released.get() <= self.acquired.get());
    }
}

impl PrivateRsaPrimitive for TestKey {
    fn signature_primitive(&self, message: &[u8], signature: &mut [u8]) -> Result<()> {
        assert_eq!(message.len(), self.size());
        self.exponentiate(message, &self.d, signature)
    }
}

impl PublicRsaPrimitive for TestKey {
    fn verification_primitive(&self, signature: &[u8], message: &mut [u8]) -> Result<()> {
        assert_eq!(signature.len(), self.size());
        self.exponentiate(signature, &self.e, message)
    }
}

/// Key of the external SHA-1 vector [`SIG_512_SHA1`].
pub fn key512() -> TestKey {
    TestKey::new(
        &hex!("b2990f49c47dfa8cd400ae6a4d1b8a3b6a13642b23f28b003bfb97790ade9a4cc82b8b2a81747ddec08b6296e53a08c331687ef25c4bf4936ba1c0e6041e9d15"),
        &hex!("8abd6a69f4d1a4b487f0ab8d7aaefd38609405c999984e30f567e1e8aeeff44e8b18bdb1ec78dfa31a55e32a48d7fb131f5af1f44d7d6b2ced2a9df5e5ae4535"),
    )
}

/// One bit past a byte boundary, so emLen = k - 1.
pub fn key1025() -> TestKey {
    TestKey::new(
        &hex!("01846c013655a5343aea74c73812601ecef84fd613c386138f507853f9b9d0fb6374957ebe5314bf2fdd55169ceb62ad28554296d8b112d52fe1bfe426535876fef7af0a0625649ddea48798c999da66b4172c8d996a0b693fbeed6519b66ad27d4aaa2718c81bb88ee035b33566f07468dc9ccece2b68e4279813b6964c6279fb"),
        &hex!("0130f30ebc96df1e33873169db46e9fa262a639bc266869442b73dd14845afa23e822080a2725dde8078b7be0a32ef84dd1e9b2a0d347081b996f66debfd117e513f344878778ffc82301e653e62aaf7f7f83a731f209e330b0e949a2ff5316c3768801994a38a99f213b579c1b7d66a220a173075ec17ddca75fa51578b554209"),
    )
}

pub fn key1028() -> TestKey {
    TestKey::new(
        &hex!("0c0832ff3a396b2a884fab6d0296df3648cc94d042e0d1169d76e273c7125cc870137ad6eac88ec856a25eedb4ca8d678f233098a5fb1b85460f6c0f5a1e24f35ad3a5c54a51dd963af88cb939f67677f2bffd77cc333b27556ade26c5499e135565268adeb3f68316806c8d02f5f0794091306b2e9685cd040b9103a372b00b0b"),
        &hex!("067faf3bd7f107873395049c9e976afce1194f0fa5efd43f88d19bc2b9359bd3cf6556261b2e34a0d4da62b7b5bce9df939a88370affb47fa9b5cec20404e0246598ce7aa116d56e18eb95b77276289a76fbe215e303a5531ad0db9d374f77cfe4ae36c523cc483472817f3740c22d79b579249b5edb074c3fd5d2b3ef26055591"),
    )
}

/// Encoding of `b"yamnord"` for [`key1025`], SHA-256, salt `00 01 .. 1f`.
pub const EM_1025_SHA256: [u8; 129] = hex!("00a11236a7d7dc4e701f60ed629101a9d3dd2480c9e9b2c3e3ad086224f7a0b1542fd8fa60e752cfb6ba699c0f1266fedd00d3e9381600d6347010c77c12a7248fc3c229a75d5d3882fa9d34946f9b12cf627c8c2789d535fb2c588a73a7d3d88337a09fa53bab3b4a3fefa6bebc2abd9ee0743a1e42885250c5bcd69f4e48d8bc");

/// Encoding of `b"yamnord"` for [`key1028`], SHA-1, no salt.
pub const EM_1028_SHA1: [u8; 129] = hex!("02d0e73f75739981421e9e40554fb9853c44b45235421b3151bc0c0e038cde71b5a63fe7c6f15a2722041e0349ea950bf6efa1317a71c242cff6e0eeb31c1643b699708310eac68b8b78477058be041c349ae3c4a48d4077cd5f85377ac3cb218890b24acfd6e17cb43125debc762a40d3a4057a685ff4ea04958e8b61931850bc");

/// Encoding recovered from [`SIG_512_SHA1`].
pub const EM_512_SHA1: [u8; 64] = hex!("6f537a8bc4e1789192b235f5bbafc5bef2427ffd41a734221f350d230904bc98ff7bb8ffd0310f29986a50de52ec32d4b1ddf919ca013ae7dab17668cc9c6cbc");

/// Signature of [`EM_1025_SHA256`].
pub const SIG_1025_SHA256: [u8; 129] = hex!("004b95733a2b0600ca3b9ff93014c6333579771f09dd1ab114abe1ea72a33ac3cb74bfc6f2d1b8b88717f2ea127016be1a6c098cc4f04d570eeed303ac0e12f0380affc3c54b952b66b1707eabcc9cf2eeaa09744cdfac0e85369d48217bfd4615dad680ade43bfc60fbd5ef29bf782f74fd55d85ca01c3dfc6d7d7742752e1434");

/// Signature of [`EM_1028_SHA1`].
pub const SIG_1028_SHA1: [u8; 129] = hex!("0464aef5a02f6ee7bfbe5b4b765c10d903684af31e3e72851891b212db7d134933ed4654037d1012899c32354575e04b825e97ca86c93258e3908541a234c0472e4536f3a3dcabf2f6071c3d5549a090d63821644fb13ba8f461a76048b96c557ab5d27db3b8453673043ea8e4a4bffdda20b5e7cb46e7b967cf37b74edac71890");

/// Signature of `b"test\n"` with SHA-1 and a 20 byte salt, made elsewhere.
pub const SIG_512_SHA1: [u8; 64] = hex!("6f86f26b14372b2279f79fb6807c49889835c204f71e38249b4c5601462da8ae30f26ffdd9c13f1c75eee172bebe7b7c89f2f1526c722833b9737d6c172a962f");

pub fn sha1(data: &[u8]) -> Vec<u8> {
    use sha1::Digest;
    sha1::Sha1::digest(data).to_vec()
}

pub fn sha256(data: &[u8]) -> Vec<u8> {
    use sha2::Digest;
    sha2::Sha256::digest(data).to_vec()
}

/// Outputs 0, 1, 2, ... (wrapping), one byte at a time.
pub struct CountingRng(pub u64);

impl RngCore for CountingRng {
    fn next_u32(&mut self) -> u32 {
        rand_core::impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest.iter_mut() {
            *byte = self.0 as u8;
            self.0 = self.0.wrapping_add(1);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for CountingRng {}

/// Out of entropy.
pub struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        panic!("no entropy")
    }

    fn next_u64(&mut self) -> u64 {
        panic!("no entropy")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        panic!("no entropy")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> core::result::Result<(), rand_core::Error> {
        Err(rand_core::Error::from(NonZeroU32::new(rand_core::Error::CUSTOM_START).unwrap()))
    }
}

impl CryptoRng for FailingRng {}
