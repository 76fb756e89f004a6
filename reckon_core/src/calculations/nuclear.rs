//! # Nuclear Binding Energy
//!
//! Semi-empirical mass formula (Bethe-Weizsäcker) with the textbook fitted
//! coefficients:
//!
//! B(Z,N) = a_v·A − a_s·A^(2/3) − a_c·Z(Z−1)/A^(1/3) − a_a·(N−Z)²/A + δ(Z,N)
//!
//! with pairing δ = +a_p/√A for even-even nuclei, −a_p/√A for odd-odd, and
//! zero for odd-A.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Volume coefficient (MeV)
const A_V: f64 = 15.75;
/// Surface coefficient (MeV)
const A_S: f64 = 17.8;
/// Coulomb coefficient (MeV)
const A_C: f64 = 0.711;
/// Asymmetry coefficient (MeV)
const A_A: f64 = 23.7;
/// Pairing amplitude (MeV); δ = ±A_P/√A
const A_P: f64 = 11.18;

/// Input parameters for a binding-energy calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingEnergyInput {
    /// Proton count Z
    pub protons: u32,

    /// Neutron count N
    pub neutrons: u32,
}

impl BindingEnergyInput {
    /// Mass number A = Z + N.
    pub fn mass_number(&self) -> u32 {
        self.protons + self.neutrons
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.protons == 0 {
            return Err(CalcError::invalid_input(
                "protons",
                "0",
                "At least one proton is required",
            ));
        }
        if self.mass_number() > 300 {
            return Err(CalcError::invalid_input(
                "neutrons",
                self.neutrons.to_string(),
                "Mass number above 300 is outside the formula's fitted range",
            ));
        }
        Ok(())
    }
}

/// Pairing parity of a nucleus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parity {
    EvenEven,
    OddA,
    OddOdd,
}

/// Results from a binding-energy calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingEnergyResult {
    /// Mass number A
    pub mass_number: u32,

    /// Total binding energy (MeV)
    pub binding_energy_mev: f64,

    /// Binding energy per nucleon (MeV)
    pub per_nucleon_mev: f64,

    /// Pairing parity applied
    pub parity: Parity,

    /// Individual terms (volume, surface, coulomb, asymmetry, pairing)
    pub terms: SemfTerms,
}

/// The five SEMF terms, signed as they enter the sum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemfTerms {
    pub volume: f64,
    pub surface: f64,
    pub coulomb: f64,
    pub asymmetry: f64,
    pub pairing: f64,
}

/// Compute the semi-empirical binding energy of a nucleus.
pub fn calculate(input: &BindingEnergyInput) -> CalcResult<BindingEnergyResult> {
    input.validate()?;

    let z = input.protons as f64;
    let n = input.neutrons as f64;
    let a = z + n;

    let volume = A_V * a;
    let surface = -A_S * a.powf(2.0 / 3.0);
    let coulomb = -A_C * z * (z - 1.0) / a.powf(1.0 / 3.0);
    let asymmetry = -A_A * (n - z).powi(2) / a;

    let (parity, pairing) = match (input.protons % 2, input.neutrons % 2) {
        (0, 0) => (Parity::EvenEven, A_P / a.sqrt()),
        (1, 1) => (Parity::OddOdd, -A_P / a.sqrt()),
        _ => (Parity::OddA, 0.0),
    };

    let binding_energy = volume + surface + coulomb + asymmetry + pairing;

    Ok(BindingEnergyResult {
        mass_number: input.mass_number(),
        binding_energy_mev: binding_energy,
        per_nucleon_mev: binding_energy / a,
        parity,
        terms: SemfTerms {
            volume,
            surface,
            coulomb,
            asymmetry,
            pairing,
        },
    })
}
