//! CRC-16 protection for optical-disc Q-subchannel frames.
//!
//! ```text
//! [payload] [!CRC16 BE]      p(x) = x^16 + x^12 + x^5 + 1, init 0
//! ```
//!
//! [`protocol`] holds the checksum core: computation, trailer filling and
//! single-bit repair. [`scan`] applies it to buffers of consecutive frames.

pub mod config;
pub mod hex;
pub mod log;
pub mod protocol;
pub mod scan;
