//! `ftools` decays fission products and reports what is left, by element
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use ftools_chain as chain;

#[doc(inline)]
pub use ftools_format as format;

#[cfg(feature = "iaea")]
#[cfg_attr(docsrs, doc(cfg(feature = "iaea")))]
#[doc(inline)]
pub use ftools_iaea as iaea;
