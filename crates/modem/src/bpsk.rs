//! Binary antipodal (BPSK) transmitter and receiver chains

use crate::carrier;
use crate::common::LinkParams;
use crate::line_code::{self, Decision, ErasurePolicy, LineCode};
use crate::pulse;
use crate::timing::{TimingEstimate, TimingRecovery};
use crate::Result;
use linksim_core::buffer::{Complex, Sample};
use linksim_core::filter::RrcFilter;
use serde::{Deserialize, Serialize};

/// Intermediate transmit-side waveforms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxOutput {
    pub symbols: Vec<f64>,
    pub shaped: Vec<f64>,
    pub modulated: Vec<f64>,
}

/// BPSK transmitter: line coding, RRC pulse shaping, carrier up-conversion
#[derive(Debug, Clone)]
pub struct Transmitter {
    params: LinkParams,
    filter: RrcFilter,
}

impl Transmitter {
    /// Create a transmitter and design its pulse-shaping kernel
    pub fn new(params: &LinkParams) -> Result<Self> {
        let rrc = params.validate()?;
        Ok(Self {
            params: *params,
            filter: RrcFilter::design(rrc),
        })
    }

    pub fn params(&self) -> &LinkParams {
        &self.params
    }

    pub fn filter(&self) -> &RrcFilter {
        &self.filter
    }

    pub fn line_encode(&self, bits: &[u8], code: LineCode) -> Result<Vec<f64>> {
        line_code::encode(bits, code)
    }

    pub fn pulse_shape(&self, symbols: &[f64]) -> Result<Vec<f64>> {
        pulse::shape(symbols, self.filter.taps(), self.params.sps)
    }

    pub fn modulate(&self, baseband: &[f64]) -> Vec<f64> {
        carrier::modulate(
            baseband,
            self.params.carrier_frequency,
            self.params.sps,
            self.params.carrier_phase,
        )
    }

    /// Run the full transmit chain
    pub fn transmit(&self, bits: &[u8], code: LineCode) -> Result<TxOutput> {
        let symbols = self.line_encode(bits, code)?;
        let shaped = self.pulse_shape(&symbols)?;
        let modulated = self.modulate(&shaped);

        tracing::debug!(
            "Transmitted {} bits as {} {} symbols, {} samples",
            bits.len(),
            symbols.len(),
            code,
            modulated.len()
        );

        Ok(TxOutput {
            symbols,
            shaped,
            modulated,
        })
    }
}

/// Intermediate receive-side waveforms and the final decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RxOutput {
    pub demodulated: Vec<Complex>,
    pub filtered: Vec<Complex>,
    pub timing: TimingEstimate<Complex>,
    pub decision: Decision,
}

/// BPSK receiver: coherent down-conversion, matched filter, timing
/// recovery and coding-aware hard decision
#[derive(Debug, Clone)]
pub struct Receiver {
    params: LinkParams,
    filter: RrcFilter,
    timing: TimingRecovery,
    erasure_policy: ErasurePolicy,
}

impl Receiver {
    /// Create a receiver and design its matched-filter kernel.
    ///
    /// Timing recovery is centered: the leading matched-filter transient
    /// can make the phase just before each symbol instant the strongest,
    /// and plain decimation would then drop the first symbol.
    pub fn new(params: &LinkParams) -> Result<Self> {
        let rrc = params.validate()?;
        Ok(Self {
            params: *params,
            filter: RrcFilter::design(rrc),
            timing: TimingRecovery::default().centered(),
            erasure_policy: ErasurePolicy::default(),
        })
    }

    pub fn with_timing_recovery(mut self, timing: TimingRecovery) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_erasure_policy(mut self, policy: ErasurePolicy) -> Self {
        self.erasure_policy = policy;
        self
    }

    pub fn params(&self) -> &LinkParams {
        &self.params
    }

    pub fn filter(&self) -> &RrcFilter {
        &self.filter
    }

    pub fn demodulate<T: Sample>(&self, passband: &[T]) -> Vec<T> {
        carrier::demodulate(
            passband,
            self.params.carrier_frequency,
            self.params.sps,
            self.params.carrier_phase,
        )
    }

    pub fn matched_filter<T: Sample>(&self, baseband: &[T]) -> Vec<T> {
        pulse::matched_filter(baseband, self.filter.taps())
    }

    pub fn recover_timing<T: Sample>(&self, filtered: &[T]) -> Result<TimingEstimate<T>> {
        self.timing.recover(filtered, self.params.sps)
    }

    pub fn decide<T: Sample>(&self, samples: &[T], code: LineCode) -> Result<Decision> {
        line_code::decide_with_policy(samples, code, self.erasure_policy)
    }

    /// Run the full receive chain
    pub fn receive(&self, received: &[Complex], code: LineCode) -> Result<RxOutput> {
        let demodulated = self.demodulate(received);
        let filtered = self.matched_filter(&demodulated);
        let timing = self.recover_timing(&filtered)?;
        let decision = self.decide(&timing.samples, code)?;

        tracing::debug!(
            "Received {} samples, timing offset {}, {} bits decided",
            received.len(),
            timing.offset,
            decision.len()
        );

        Ok(RxOutput {
            demodulated,
            filtered,
            timing,
            decision,
        })
    }
}
