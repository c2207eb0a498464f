//! Energy tables resolved at one temperature, as scaled integers.

#[cfg(test)]
mod test;

use rustc_hash::FxHashMap as HashMap;
use tracing::debug;

use crate::{BpEnergy, Energies, LoopEnergy, MAX_LOOP_LEN, Polymer, interpret_bytes, key_len};

/// A free energy in units of `1 / scale` kcal/mol.
pub type Dg = i64;

/// kcal/(mol·K)
pub const GAS_CONSTANT: f64 = 1.9872e-3;
pub const KELVIN: f64 = 273.15;

/// Penalty applied to an isolated base pair, in kcal/mol.
pub const ISOLATED_PAIR_PENALTY: f64 = 1600.0;
/// Penalty per A·T/U pair closing a loop, in kcal/mol.
pub const CLOSING_AT_PENALTY: f64 = 0.5;
/// Penalty per base of internal loop asymmetry, in kcal/mol.
pub const LOOP_ASYMMETRY_PENALTY: f64 = 0.3;

/// Find the free energy given delta h, s and temp
///
/// # Args
///
/// - d_h: The enthalpy increment in kcal / mol
/// - d_s: The entropy increment in cal / mol
/// - temp: The temperature in Kelvin
///
/// # Returns
///
/// The free energy increment in kcal / (mol x K)
pub fn calc_d_g(d_h: f64, d_s: f64, temp: f64) -> f64 {
    d_h - temp * (d_s / 1000.0)
}

/// Estimate the free energy of length query_len based on one of length known_len.
///
/// The Jacobson-Stockmayer entry extrapolation formula is used
/// for bulges, hairpins, etc that fall outside the 30nt upper limit
/// for pre-calculated free-energies. See SantaLucia and Hicks (2004).
///
/// # Args
///
/// - query_len: Length of element without known free energy value
/// - known_len: Length of element with known free energy value (d_g_x)
/// - d_g_x: The free energy of the element known_len
/// - temp: Temperature in Kelvin
///
/// # Returns
///
/// The free energy for a structure of length query_len
pub fn calc_j_s(query_len: usize, known_len: usize, d_g_x: f64, temp: f64) -> f64 {
    d_g_x + 2.44 * GAS_CONSTANT * temp * (query_len as f64 / known_len as f64).ln()
}

/// Free energies of loops by length, extrapolated past [`MAX_LOOP_LEN`].
#[derive(Debug, Clone)]
pub struct LoopTable {
    values: [Dg; MAX_LOOP_LEN],
    /// Scaled Jacobson-Stockmayer coefficient.
    extrapolation: f64,
}

impl LoopTable {
    fn new(loops: &LoopEnergy, temp: f64, scale: Dg, extrapolation: f64) -> Self {
        let mut values = [0; MAX_LOOP_LEN];
        for (slot, &(d_h, d_s)) in values.iter_mut().zip(loops.iter()) {
            *slot = to_scaled(calc_d_g(d_h, d_s, temp), scale);
        }
        Self {
            values,
            extrapolation,
        }
    }

    /// The energy of a loop of `len` unpaired bases. `len` must not be zero.
    pub fn get(&self, len: usize) -> Dg {
        debug_assert!(len != 0);

        match self.values.get(len.wrapping_sub(1)) {
            Some(&d_g) => d_g,
            None => {
                let ratio = len as f64 / MAX_LOOP_LEN as f64;
                self.values[MAX_LOOP_LEN - 1] + (self.extrapolation * ratio.ln()).round() as Dg
            }
        }
    }
}

/// Motif free energies keyed by packed sequence bytes.
#[derive(Debug, Clone, Default)]
pub struct DgMap {
    values: HashMap<u64, Dg>,
}

impl DgMap {
    fn new(energies: &BpEnergy, temp: f64, scale: Dg) -> Self {
        Self::filtered(energies, temp, scale, |_| true)
    }

    fn filtered(energies: &BpEnergy, temp: f64, scale: Dg, keep: impl Fn(u64) -> bool) -> Self {
        let values = energies
            .iter()
            .filter(|&(k, _)| keep(k))
            .map(|(k, (d_h, d_s))| (k, to_scaled(calc_d_g(d_h, d_s, temp), scale)))
            .collect();
        Self { values }
    }

    pub fn get<const N: usize>(&self, b: [u8; N]) -> Option<Dg> {
        self.values.get(&interpret_bytes(b.iter())).copied()
    }

    /// Looks up a motif of up to eight bytes; longer slices are never keyed.
    pub fn get_slice(&self, b: &[u8]) -> Option<Dg> {
        if b.len() > 8 {
            return None;
        }
        self.values.get(&interpret_bytes(b.iter())).copied()
    }

    pub fn contains_key<const N: usize>(&self, b: [u8; N]) -> bool {
        self.get(b).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A parameter set resolved at one temperature and scale.
#[derive(Debug, Clone)]
pub struct Params {
    pub polymer: Polymer,
    /// Kelvin
    pub temp: f64,
    /// Energy units per kcal/mol.
    pub scale: Dg,
    pub hairpin_loops: LoopTable,
    pub bulge_loops: LoopTable,
    pub internal_loops: LoopTable,
    pub nn: DgMap,
    pub internal_mm: DgMap,
    pub terminal_mm: DgMap,
    pub de: DgMap,
    /// Bonuses keyed by the whole hairpin, closing pair included.
    pub tri_loops: DgMap,
    pub tetra_loops: DgMap,
    pub hexa_loops: DgMap,
    /// a, b, c, d of the multi-branch energy function.
    pub multibranch: [Dg; 4],
    pub closing_at: Dg,
    pub asymmetry: Dg,
    pub isolated: Dg,
}

fn to_scaled(kcal: f64, scale: Dg) -> Dg {
    (kcal * scale as f64).round() as Dg
}

impl Params {
    /// Converts a scaled energy back to kcal/mol.
    pub fn to_kcal(&self, e: Dg) -> f64 {
        e as f64 / self.scale as f64
    }

    /// Converts kcal/mol to a scaled energy.
    pub fn scaled(&self, kcal: f64) -> Dg {
        to_scaled(kcal, self.scale)
    }

    /// The special hairpin bonus for a loop including its closing pair.
    pub fn special_hairpin(&self, hairpin: &[u8]) -> Option<Dg> {
        match hairpin.len() {
            5 => self.tri_loops.get_slice(hairpin),
            6 => self.tetra_loops.get_slice(hairpin),
            8 => self.hexa_loops.get_slice(hairpin),
            _ => None,
        }
    }
}

impl Energies {
    /// Resolve every table at `temp_c` (°C), scaled by `scale`.
    pub fn params(&self, temp_c: f64, scale: Dg) -> Params {
        let temp = temp_c + KELVIN;
        let extrapolation = scale as f64 * 2.44 * GAS_CONSTANT * temp;
        let special = |len: usize| match &self.tri_tetra_loops {
            Some(loops) => DgMap::filtered(loops, temp, scale, |k| key_len(k) == len),
            None => DgMap::default(),
        };
        let (a, b, c, d) = self.multibranch;

        let params = Params {
            polymer: self.polymer,
            temp,
            scale,
            hairpin_loops: LoopTable::new(&self.hairpin_loops, temp, scale, extrapolation),
            bulge_loops: LoopTable::new(&self.bulge_loops, temp, scale, extrapolation),
            internal_loops: LoopTable::new(&self.internal_loops, temp, scale, extrapolation),
            nn: DgMap::new(&self.nn, temp, scale),
            internal_mm: DgMap::new(&self.internal_mm, temp, scale),
            terminal_mm: DgMap::new(&self.terminal_mm, temp, scale),
            de: DgMap::new(&self.de, temp, scale),
            tri_loops: special(5),
            tetra_loops: special(6),
            hexa_loops: special(8),
            multibranch: [a, b, c, d].map(|x| to_scaled(x, scale)),
            closing_at: to_scaled(CLOSING_AT_PENALTY, scale),
            asymmetry: to_scaled(LOOP_ASYMMETRY_PENALTY, scale),
            isolated: to_scaled(ISOLATED_PAIR_PENALTY, scale),
        };
        debug!(
            polymer = %self.polymer,
            temp,
            scale,
            stacks = params.nn.len(),
            "resolved energy parameters"
        );
        params
    }
}
