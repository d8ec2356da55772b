#![cfg_attr(not(test), no_std)]
//! RSASSA-PSS signatures (RFC 8017, section 8.1) without allocation.
//!
//! The RSA primitive is not part of this library: keys implement
//! [`PrivateRsaPrimitive`] and [`PublicRsaPrimitive`], usually on top of a
//! hardware accelerator. What is here is the EMSA-PSS encoding with MGF1,
//! its constant-time verification, and the plumbing around them.
//!
//! All operations work in caller-provided scratch memory, see [`workmem_size`]
//! and the `WORKMEM_*` constants.

mod aliases;
pub use aliases::*;
mod error;
pub use error::{Error, Result};
pub mod padding;
mod primitive;
pub use primitive::{PrivateRsaPrimitive, PublicRsaPrimitive, RsaKey};
mod pss;
pub use pss::Pss;
mod workmem;
pub use workmem::workmem_size;

#[cfg(test)]
mod fixtures;
