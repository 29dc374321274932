//! linksim core - DSP primitives shared by the link simulator
//!
//! This crate provides the sample types, root-raised-cosine filter design,
//! centered convolution and spectrum estimation used by every stage of the
//! simulated transmit/receive chain.

pub mod buffer;
pub mod filter;
pub mod fft;
pub mod error;

pub use error::{CoreError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        buffer::{Complex, Sample, Waveform},
        filter::{convolve_same, RrcFilter, RrcParams},
        fft::{power_spectrum, FftProcessor},
        error::{CoreError, Result},
    };
}
