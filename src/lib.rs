#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use cm_reflect as reflect;
pub use cm_serial as serial;
pub use cm_utils as utils;
