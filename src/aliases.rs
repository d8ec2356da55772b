//! Scratch memory sizes by key and digest size, and `Pss` by digest.

use crate::workmem::workmem_size;

pub const WORKMEM_1K_SHA1: usize = workmem_size(128, 20);
pub const WORKMEM_1K_SHA256: usize = workmem_size(128, 32);
pub const WORKMEM_1K_SHA384: usize = workmem_size(128, 48);
pub const WORKMEM_1K_SHA512: usize = workmem_size(128, 64);

pub const WORKMEM_2K_SHA1: usize = workmem_size(256, 20);
pub const WORKMEM_2K_SHA256: usize = workmem_size(256, 32);
pub const WORKMEM_2K_SHA384: usize = workmem_size(256, 48);
pub const WORKMEM_2K_SHA512: usize = workmem_size(256, 64);

pub const WORKMEM_3K_SHA1: usize = workmem_size(384, 20);
pub const WORKMEM_3K_SHA256: usize = workmem_size(384, 32);
pub const WORKMEM_3K_SHA384: usize = workmem_size(384, 48);
pub const WORKMEM_3K_SHA512: usize = workmem_size(384, 64);

pub const WORKMEM_4K_SHA1: usize = workmem_size(512, 20);
pub const WORKMEM_4K_SHA256: usize = workmem_size(512, 32);
pub const WORKMEM_4K_SHA384: usize = workmem_size(512, 48);
pub const WORKMEM_4K_SHA512: usize = workmem_size(512, 64);

#[cfg(feature = "sha1-sig")]
pub type PssSha1 = crate::Pss<sha1::Sha1>;

#[cfg(feature = "sha2-sig")]
pub type PssSha224 = crate::Pss<sha2::Sha224>;
#[cfg(feature = "sha2-sig")]
pub type PssSha256 = crate::Pss<sha2::Sha256>;
#[cfg(feature = "sha2-sig")]
pub type PssSha384 = crate::Pss<sha2::Sha384>;
#[cfg(feature = "sha2-sig")]
pub type PssSha512 = crate::Pss<sha2::Sha512>;
