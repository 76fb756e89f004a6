//! # Simple Harmonic Motion
//!
//! Kinematics of an undamped mass-spring oscillator. The angular frequency
//! comes either from an explicit frequency or from mass and spring constant
//! (ω = √(k/m)).

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::validate::{check_positive, check_range};

/// Source of the oscillation frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Oscillator {
    /// Frequency given directly in hertz
    Frequency { hz: f64 },

    /// Mass on a spring: ω = sqrt(k / m)
    MassSpring {
        /// Mass in kilograms
        mass_kg: f64,
        /// Spring constant in newtons per meter
        spring_n_per_m: f64,
    },
}

/// Input parameters for a simple-harmonic-motion calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShmInput {
    /// Amplitude in meters
    pub amplitude_m: f64,

    /// Frequency source
    pub oscillator: Oscillator,

    /// Phase offset in radians
    pub phase_rad: f64,

    /// Time at which to evaluate the motion, in seconds
    pub time_s: f64,
}

impl ShmInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        check_positive("amplitude_m", self.amplitude_m)?;
        check_range("time_s", self.time_s, 0.0, 1e9)?;
        match &self.oscillator {
            Oscillator::Frequency { hz } => check_positive("hz", *hz)?,
            Oscillator::MassSpring {
                mass_kg,
                spring_n_per_m,
            } => {
                check_positive("mass_kg", *mass_kg)?;
                check_positive("spring_n_per_m", *spring_n_per_m)?;
            }
        }
        if !self.phase_rad.is_finite() {
            return Err(CalcError::invalid_input(
                "phase_rad",
                self.phase_rad.to_string(),
                "Phase must be a finite number",
            ));
        }
        Ok(())
    }

    /// Angular frequency ω in rad/s.
    pub fn angular_frequency(&self) -> f64 {
        match &self.oscillator {
            Oscillator::Frequency { hz } => 2.0 * std::f64::consts::PI * hz,
            Oscillator::MassSpring {
                mass_kg,
                spring_n_per_m,
            } => (spring_n_per_m / mass_kg).sqrt(),
        }
    }
}

/// Results from a simple-harmonic-motion calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShmResult {
    /// Angular frequency ω (rad/s)
    pub angular_frequency: f64,

    /// Period T = 2π/ω (s)
    pub period: f64,

    /// Frequency f = 1/T (Hz)
    pub frequency: f64,

    /// Displacement x(t) = A·cos(ωt + φ) (m)
    pub displacement: f64,

    /// Velocity v(t) = -Aω·sin(ωt + φ) (m/s)
    pub velocity: f64,

    /// Acceleration a(t) = -Aω²·cos(ωt + φ) (m/s²)
    pub acceleration: f64,

    /// Maximum speed Aω (m/s)
    pub max_speed: f64,

    /// Maximum acceleration Aω² (m/s²)
    pub max_acceleration: f64,

    /// Total mechanical energy ½kA² (J); None when only a frequency was given
    pub total_energy: Option<f64>,
}

/// Evaluate the motion at the requested time.
pub fn calculate(input: &ShmInput) -> CalcResult<ShmResult> {
    input.validate()?;

    let omega = input.angular_frequency();
    let phase = omega * input.time_s + input.phase_rad;
    let a = input.amplitude_m;

    let total_energy = match &input.oscillator {
        Oscillator::MassSpring { spring_n_per_m, .. } => Some(0.5 * spring_n_per_m * a * a),
        Oscillator::Frequency { .. } => None,
    };

    Ok(ShmResult {
        angular_frequency: omega,
        period: 2.0 * std::f64::consts::PI / omega,
        frequency: omega / (2.0 * std::f64::consts::PI),
        displacement: a * phase.cos(),
        velocity: -a * omega * phase.sin(),
        acceleration: -a * omega * omega * phase.cos(),
        max_speed: a * omega,
        max_acceleration: a * omega * omega,
        total_energy,
    })
}
