//! # Wavefunction Time Evolution
//!
//! Explicit finite-difference integration of the 1-D time-dependent
//! Schrödinger equation (ħ = m = 1) for a Gaussian packet, optionally
//! against a square barrier. The wavefunction is split into real and
//! imaginary parts updated in a staggered leapfrog:
//!
//! R^{n+1} = R^n + dt·H I^{n+1/2}
//! I^{n+3/2} = I^{n+1/2} − dt·H R^{n+1}
//!
//! with H ψ = −½ ψ″ + V ψ on a hard-walled grid. The explicit scheme is
//! conditionally stable; inputs with dt/dx² > 0.5 are rejected.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::validate::{check_positive, check_range};

/// Stability bound on dt/dx² for the explicit update
const STABILITY_LIMIT: f64 = 0.5;

/// Square potential barrier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barrier {
    /// Left edge as a fraction of the grid (0..1)
    pub start_frac: f64,

    /// Right edge as a fraction of the grid (0..1)
    pub end_frac: f64,

    /// Barrier height (natural energy units)
    pub height: f64,
}

/// Input parameters for a wavefunction evolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantumInput {
    /// Number of grid points
    pub grid_points: u32,

    /// Number of time steps
    pub steps: u32,

    /// Grid spacing
    pub dx: f64,

    /// Time step
    pub dt: f64,

    /// Packet center as a fraction of the grid (0..1)
    pub center_frac: f64,

    /// Packet width in grid units
    pub width: f64,

    /// Initial momentum (wavenumber)
    pub momentum: f64,

    /// Optional square barrier
    pub barrier: Option<Barrier>,
}

impl QuantumInput {
    /// Validate input parameters, including the explicit-scheme stability bound.
    pub fn validate(&self) -> CalcResult<()> {
        check_range("grid_points", self.grid_points as f64, 8.0, 4096.0)?;
        check_range("steps", self.steps as f64, 1.0, 100_000.0)?;
        check_positive("dx", self.dx)?;
        check_positive("dt", self.dt)?;
        check_range("center_frac", self.center_frac, 0.0, 1.0)?;
        check_positive("width", self.width)?;
        if !self.momentum.is_finite() {
            return Err(CalcError::invalid_input(
                "momentum",
                self.momentum.to_string(),
                "Momentum must be a finite number",
            ));
        }
        let ratio = self.dt / (self.dx * self.dx);
        if ratio > STABILITY_LIMIT {
            return Err(CalcError::invalid_input(
                "dt",
                self.dt.to_string(),
                format!(
                    "dt/dx^2 = {:.3} exceeds the stability limit {}",
                    ratio, STABILITY_LIMIT
                ),
            ));
        }
        if let Some(barrier) = &self.barrier {
            check_range("start_frac", barrier.start_frac, 0.0, 1.0)?;
            check_range("end_frac", barrier.end_frac, 0.0, 1.0)?;
            if barrier.end_frac <= barrier.start_frac {
                return Err(CalcError::invalid_input(
                    "end_frac",
                    barrier.end_frac.to_string(),
                    "Barrier end must be greater than its start",
                ));
            }
        }
        Ok(())
    }
}

/// Results from a wavefunction evolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantumResult {
    /// Probability density |ψ|² per grid point after the final step
    pub density: Vec<f64>,

    /// Norm after the final step (initial norm is 1)
    pub final_norm: f64,

    /// |final_norm − 1|; a proxy for integration error
    pub norm_drift: f64,

    /// Probability found to the right of the barrier (transmission),
    /// when a barrier was given
    pub transmission: Option<f64>,
}

/// Apply H ψ = −½ ψ″ + V ψ with hard-wall boundaries.
fn hamiltonian(psi: &[f64], potential: &[f64], dx: f64, out: &mut [f64]) {
    let n = psi.len();
    let inv_dx2 = 1.0 / (dx * dx);
    out[0] = 0.0;
    out[n - 1] = 0.0;
    for i in 1..n - 1 {
        let second = (psi[i + 1] - 2.0 * psi[i] + psi[i - 1]) * inv_dx2;
        out[i] = -0.5 * second + potential[i] * psi[i];
    }
}

/// Evolve the packet and report the final density and norm drift.
pub fn calculate(input: &QuantumInput) -> CalcResult<QuantumResult> {
    input.validate()?;

    let n = input.grid_points as usize;
    let dx = input.dx;

    // Potential
    let mut potential = vec![0.0; n];
    if let Some(barrier) = &input.barrier {
        let start = (barrier.start_frac * n as f64) as usize;
        let end = ((barrier.end_frac * n as f64) as usize).min(n);
        for v in &mut potential[start..end] {
            *v = barrier.height;
        }
    }

    // Initial Gaussian packet with a momentum phase
    let center = input.center_frac * n as f64;
    let mut real = vec![0.0; n];
    let mut imag = vec![0.0; n];
    for i in 0..n {
        let x = i as f64 - center;
        let envelope = (-x * x / (4.0 * input.width * input.width)).exp();
        let phase = input.momentum * i as f64 * dx;
        real[i] = envelope * phase.cos();
        imag[i] = envelope * phase.sin();
    }
    // Hard walls
    real[0] = 0.0;
    imag[0] = 0.0;
    real[n - 1] = 0.0;
    imag[n - 1] = 0.0;

    // Normalize to unit probability
    let norm: f64 = real
        .iter()
        .zip(&imag)
        .map(|(r, i)| (r * r + i * i) * dx)
        .sum();
    if norm <= 0.0 {
        return Err(CalcError::domain(
            "wavefunction",
            "Initial packet has zero norm on this grid",
        ));
    }
    let scale = 1.0 / norm.sqrt();
    for (r, i) in real.iter_mut().zip(imag.iter_mut()) {
        *r *= scale;
        *i *= scale;
    }

    // Offset the imaginary part by a half step for the leapfrog
    let mut h = vec![0.0; n];
    hamiltonian(&real, &potential, dx, &mut h);
    for i in 0..n {
        imag[i] -= 0.5 * input.dt * h[i];
    }

    for _ in 0..input.steps {
        hamiltonian(&imag, &potential, dx, &mut h);
        for i in 0..n {
            real[i] += input.dt * h[i];
        }
        hamiltonian(&real, &potential, dx, &mut h);
        for i in 0..n {
            imag[i] -= input.dt * h[i];
        }
    }

    // Undo the half-step stagger before measuring
    hamiltonian(&real, &potential, dx, &mut h);
    let imag_sync: Vec<f64> = imag
        .iter()
        .zip(&h)
        .map(|(i, h)| i + 0.5 * input.dt * h)
        .collect();

    let density: Vec<f64> = real
        .iter()
        .zip(&imag_sync)
        .map(|(r, i)| r * r + i * i)
        .collect();
    let final_norm: f64 = density.iter().map(|d| d * dx).sum();

    let transmission = input.barrier.as_ref().map(|barrier| {
        let end = ((barrier.end_frac * n as f64) as usize).min(n);
        density[end..].iter().map(|d| d * dx).sum::<f64>() / final_norm
    });

    Ok(QuantumResult {
        density,
        final_norm,
        norm_drift: (final_norm - 1.0).abs(),
        transmission,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn free_packet() -> QuantumInput {
        QuantumInput {
            grid_points: 256,
            steps: 500,
            dx: 0.1,
            dt: 0.001,
            center_frac: 0.5,
            width: 10.0,
            momentum: 1.0,
            barrier: None,
        }
    }

    #[test]
    fn test_norm_is_conserved() {
        let result = calculate(&free_packet()).unwrap();
        assert!(
            result.norm_drift < 1e-3,
            "norm drift too large: {}",
            result.norm_drift
        );
    }

    #[test]
    fn test_packet_moves_with_momentum() {
        let input = free_packet();
        let result = calculate(&input).unwrap();

        // Center of mass should drift in the +x direction
        let n = input.grid_points as usize;
        let com: f64 = result
            .density
            .iter()
            .enumerate()
            .map(|(i, d)| i as f64 * d)
            .sum::<f64>()
            / result.density.iter().sum::<f64>();
        assert!(com > n as f64 * 0.5, "packet did not move: com = {}", com);
    }

    #[test]
    fn test_stability_guard() {
        let mut input = free_packet();
        input.dt = 0.1; // dt/dx^2 = 10
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_barrier_splits_probability() {
        let mut input = free_packet();
        input.steps = 6000;
        input.center_frac = 0.3;
        input.barrier = Some(Barrier {
            start_frac: 0.55,
            end_frac: 0.6,
            height: 0.4,
        });
        let result = calculate(&input).unwrap();
        let t = result.transmission.unwrap();
        // Partial tunnelling: some probability crosses, some reflects
        assert!(t > 0.0 && t < 1.0, "transmission = {}", t);
    }

    #[test]
    fn test_density_length_matches_grid() {
        let result = calculate(&free_packet()).unwrap();
        assert_eq!(result.density.len(), 256);
    }

    #[test]
    fn test_barrier_ordering_enforced() {
        let mut input = free_packet();
        input.barrier = Some(Barrier {
            start_frac: 0.7,
            end_frac: 0.6,
            height: 1.0,
        });
        assert!(calculate(&input).is_err());
    }
}
