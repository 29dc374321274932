//! End-to-end link simulation: request in, report out

use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use linksim_channel::prelude::*;
use linksim_core::buffer::{Complex, Waveform};
use linksim_core::fft::power_spectrum;
use linksim_modem::prelude::*;

use crate::ber::{bit_error_rate, BerStats};

/// One simulation run as requested by a front end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationRequest {
    /// Number of random source bits
    pub n_bits: usize,
    /// Line code used at both ends
    pub line_code: LineCode,
    /// FFT size for the transmit spectrum; no spectrum when unset
    pub spectrum_size: Option<usize>,
    /// Channel between transmitter and receiver
    pub channel: ChannelModel,
}

impl Default for SimulationRequest {
    fn default() -> Self {
        Self {
            n_bits: 100,
            line_code: LineCode::Nrz,
            spectrum_size: None,
            channel: ChannelModel::default(),
        }
    }
}

/// Everything a presentation layer needs to display a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub params: LinkParams,
    pub request: SimulationRequest,
    pub original_bits: Vec<u8>,
    pub symbols: Vec<f64>,
    pub shaped: Waveform<f64>,
    pub modulated: Waveform<f64>,
    pub received: Waveform<Complex>,
    pub demodulated: Waveform<Complex>,
    pub filtered: Waveform<Complex>,
    pub timing_offset: usize,
    pub timing_phase: isize,
    pub recovered_samples: Vec<Complex>,
    pub decision: Decision,
    pub stats: BerStats,
    pub tx_spectrum: Option<Vec<f64>>,
}

impl SimulationReport {
    pub fn recovered_bits(&self) -> &[u8] {
        &self.decision.bits
    }

    pub fn ber(&self) -> f64 {
        self.stats.ber
    }
}

/// Transmitter/receiver pair built from one parameter set.
///
/// The simulator keeps no per-run state; the same instance can serve any
/// number of requests.
#[derive(Debug, Clone)]
pub struct LinkSimulator {
    params: LinkParams,
    transmitter: Transmitter,
    receiver: Receiver,
}

impl LinkSimulator {
    /// Build both ends of the link
    pub fn new(params: LinkParams) -> Result<Self> {
        let transmitter = Transmitter::new(&params).context("Failed to build transmitter")?;
        let receiver = Receiver::new(&params).context("Failed to build receiver")?;

        Ok(Self {
            params,
            transmitter,
            receiver,
        })
    }

    /// Replace the receiver, e.g. to change timing recovery or erasure policy
    pub fn with_receiver(mut self, receiver: Receiver) -> Self {
        self.receiver = receiver;
        self
    }

    pub fn params(&self) -> &LinkParams {
        &self.params
    }

    pub fn transmitter(&self) -> &Transmitter {
        &self.transmitter
    }

    pub fn receiver(&self) -> &Receiver {
        &self.receiver
    }

    /// Generate random bits and run them through the link
    pub fn run<R: Rng + ?Sized>(
        &self,
        request: &SimulationRequest,
        rng: &mut R,
    ) -> Result<SimulationReport> {
        let bits = generate_bits(request.n_bits, rng);
        self.run_bits(bits, request, rng)
    }

    /// Run caller-supplied bits through the link
    pub fn run_bits<R: Rng + ?Sized>(
        &self,
        bits: Vec<u8>,
        request: &SimulationRequest,
        rng: &mut R,
    ) -> Result<SimulationReport> {
        let sps = self.params.sps;
        let code = request.line_code;

        let tx = self
            .transmitter
            .transmit(&bits, code)
            .context("Transmit chain failed")?;

        let received = Channel::new(request.channel)
            .transmit(&tx.modulated, rng)
            .context("Channel failed")?;
        debug!("Channel {:?} produced {} samples", request.channel, received.len());

        let rx = self
            .receiver
            .receive(&received, code)
            .context("Receive chain failed")?;

        let stats = bit_error_rate(&bits, &rx.decision.bits);
        info!(
            "{} bits, {} coding, {:?}: BER {:.4} ({}/{} errors)",
            bits.len(),
            code,
            request.channel,
            stats.ber,
            stats.errors,
            stats.compared
        );

        let tx_spectrum = match request.spectrum_size {
            Some(size) => Some(
                power_spectrum(&tx.modulated, size).context("Failed to compute spectrum")?,
            ),
            None => None,
        };

        Ok(SimulationReport {
            params: self.params,
            request: *request,
            original_bits: bits,
            symbols: tx.symbols,
            shaped: Waveform::from_samples(tx.shaped, sps)?,
            modulated: Waveform::from_samples(tx.modulated, sps)?,
            received: Waveform::from_samples(received, sps)?,
            demodulated: Waveform::from_samples(rx.demodulated, sps)?,
            filtered: Waveform::from_samples(rx.filtered, sps)?,
            timing_offset: rx.timing.offset,
            timing_phase: rx.timing.phase,
            recovered_samples: rx.timing.samples,
            decision: rx.decision,
            stats,
            tx_spectrum,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(n_bits: usize, line_code: LineCode, channel: ChannelModel) -> SimulationRequest {
        SimulationRequest {
            n_bits,
            line_code,
            channel,
            spectrum_size: None,
        }
    }

    #[test]
    fn test_simulation_request_default() {
        let request = SimulationRequest::default();
        assert_eq!(request.n_bits, 100);
        assert_eq!(request.line_code, LineCode::Nrz);
        assert_eq!(request.channel, ChannelModel::Awgn { snr_db: 10.0 });
    }

    #[test]
    fn test_report_shapes() {
        let simulator = LinkSimulator::new(LinkParams::default()).unwrap();
        let req = request(20, LineCode::Manchester, ChannelModel::Ideal);
        let report = simulator.run(&req, &mut seeded_rng(1)).unwrap();

        assert_eq!(report.original_bits.len(), 20);
        assert_eq!(report.symbols.len(), 40);
        assert_eq!(report.shaped.len(), 40 * 16);
        assert_eq!(report.modulated.len(), 40 * 16);
        assert_eq!(report.received.len(), 40 * 16);
        assert_eq!(report.filtered.samples_per_symbol(), 16);
        assert!(report.timing_offset < 16);
        assert!(report.tx_spectrum.is_none());
    }

    #[test]
    fn test_noiseless_random_bits() {
        let simulator = LinkSimulator::new(LinkParams::default()).unwrap();
        for code in LineCode::ALL {
            for seed in 0..4 {
                let req = request(64, code, ChannelModel::Ideal);
                let report = simulator.run(&req, &mut seeded_rng(seed)).unwrap();
                assert_eq!(report.stats.errors, 0, "{} seed {}", code, seed);
                assert_eq!(report.stats.compared, 64);
            }
        }
    }

    #[test]
    fn test_spectrum_is_attached() {
        let simulator = LinkSimulator::new(LinkParams::default()).unwrap();
        let mut req = request(32, LineCode::Nrz, ChannelModel::Ideal);
        req.spectrum_size = Some(128);
        let report = simulator.run(&req, &mut seeded_rng(2)).unwrap();
        assert_eq!(report.tx_spectrum.map(|s| s.len()), Some(128));
    }

    #[test]
    fn test_invalid_spectrum_size_fails() {
        let simulator = LinkSimulator::new(LinkParams::default()).unwrap();
        let mut req = request(32, LineCode::Nrz, ChannelModel::Ideal);
        req.spectrum_size = Some(100);
        assert!(simulator.run(&req, &mut seeded_rng(2)).is_err());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = LinkParams {
            span: 0,
            ..LinkParams::default()
        };
        assert!(LinkSimulator::new(params).is_err());
    }
}
