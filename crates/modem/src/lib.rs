//! linksim modem - transmit and receive stages of the simulated link
//!
//! This crate provides line coding, RRC pulse shaping and matched
//! filtering, coherent carrier mixing, block-averaged symbol timing
//! recovery and hard bit decisions, plus `Transmitter`/`Receiver` types
//! that chain them with a shared parameter set.

pub mod bpsk;
pub mod carrier;
pub mod common;
pub mod line_code;
pub mod pulse;
pub mod timing;
pub mod error;

pub use error::{ModemError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        bpsk::{Receiver, RxOutput, Transmitter, TxOutput},
        carrier::{demodulate, mix, modulate},
        common::LinkParams,
        line_code::{decide, decide_with_policy, encode, Decision, ErasurePolicy, LineCode},
        pulse::{matched_filter, shape},
        timing::{recover_timing, TimingEstimate, TimingRecovery},
        error::{ModemError, Result},
    };
}
