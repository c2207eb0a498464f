#![doc = include_str!("../README.md")]

mod util;

pub mod config;
pub mod dna;
pub mod error;
pub mod fold;
pub mod params;
pub mod rna;

use std::{
    fmt::Display,
    sync::{Arc, LazyLock},
};

use rustc_hash::FxHashMap as HashMap;

pub use config::FoldOptions;
pub use error::{FoldError, SeqResult};
pub use fold::{
    Context, Desc, Folded, Value, dg, dg_cache, fold, fold_many, fold_with, try_dg, try_dg_cache,
    try_fold,
};
pub use params::Params;
pub use util::{is_dna, is_rna};

pub type Cache = Vec<Vec<f64>>;

/// Enthalpy (kcal/mol) and entropy (cal/(mol·K)) change of a motif.
pub type Energy = (f64, f64);

/// a, b, c, d in a linear multi-branch energy change function.
pub type MultiBranch = (f64, f64, f64, f64);

/// Loops longer than this are extrapolated.
pub const MAX_LOOP_LEN: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polymer {
    Dna,
    Rna,
}

impl Display for Polymer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Polymer::Dna => write!(f, "DNA"),
            Polymer::Rna => write!(f, "RNA"),
        }
    }
}

/// A temperature independent nearest-neighbour parameter set.
#[derive(Debug)]
pub struct Energies {
    pub polymer: Polymer,
    pub bulge_loops: LoopEnergy,
    pub complement: Comp,
    pub de: BpEnergy,
    pub hairpin_loops: LoopEnergy,
    pub multibranch: MultiBranch,
    pub internal_loops: LoopEnergy,
    pub internal_mm: BpEnergy,
    pub nn: BpEnergy,
    pub terminal_mm: BpEnergy,
    pub tri_tetra_loops: Option<BpEnergy>,
}

#[derive(Debug)]
pub struct Comp([Option<u8>; 256]);

impl FromIterator<(u8, u8)> for Comp {
    fn from_iter<T: IntoIterator<Item = (u8, u8)>>(iter: T) -> Self {
        let mut this = Self([None; 256]);
        for (i, b) in iter {
            this.0[i as usize] = Some(b);
        }
        this
    }
}

impl Comp {
    pub fn get(&self, b: u8) -> Option<u8> {
        self.0[b as usize]
    }

    /// Whether `a` and `b` form a Watson-Crick pair.
    pub fn pairs(&self, a: u8, b: u8) -> bool {
        self.get(a) == Some(b)
    }
}

/// Energies of loops of length 1 through [`MAX_LOOP_LEN`].
#[derive(Debug)]
pub struct LoopEnergy([Energy; MAX_LOOP_LEN]);

impl LoopEnergy {
    /// Energy of a loop of `len` bases, `None` beyond the tabulated range.
    pub fn get(&self, len: usize) -> Option<Energy> {
        len.checked_sub(1).and_then(|i| self.0.get(i)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Energy> {
        self.0.iter()
    }
}

impl From<[Energy; MAX_LOOP_LEN]> for LoopEnergy {
    fn from(value: [Energy; MAX_LOOP_LEN]) -> Self {
        Self(value)
    }
}

/// Collects `(length, energy)` entries; lengths left out stay at zero.
impl FromIterator<(usize, Energy)> for LoopEnergy {
    fn from_iter<T: IntoIterator<Item = (usize, Energy)>>(iter: T) -> Self {
        let mut values = [(0.0, 0.0); MAX_LOOP_LEN];
        for (len, v) in iter {
            if let Some(slot) = len.checked_sub(1).and_then(|i| values.get_mut(i)) {
                *slot = v;
            }
        }
        Self(values)
    }
}

/// Motif energies keyed by up to eight bytes of sequence, e.g. `b"AC/TG"`.
#[derive(Debug, Default)]
pub struct BpEnergy {
    values: HashMap<u64, Energy>,
}

/// Packs up to eight bytes big-endian into a key, zero padded on the right.
pub fn interpret_bytes<'a>(mut b: impl Iterator<Item = &'a u8>) -> u64 {
    u64::from_be_bytes(std::array::from_fn(|_| b.next().copied().unwrap_or(0)))
}

/// Number of bytes packed into a key by [`interpret_bytes`].
pub fn key_len(key: u64) -> usize {
    8 - (key.trailing_zeros() / 8) as usize
}

impl BpEnergy {
    pub fn new<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = (&'a [u8], Energy)>,
    {
        let values = values
            .into_iter()
            .map(|(b, v)| {
                debug_assert!(b.len() <= 8);
                (interpret_bytes(b.iter()), v)
            })
            .collect();
        Self { values }
    }

    /// Like [`BpEnergy::new`], also keying each motif read from the opposite
    /// strand. A reversed key only overwrites an existing entry if `replace`.
    pub fn build<'a, I>(replace: bool, iter: I) -> Self
    where
        I: IntoIterator<Item = (&'a [u8], Energy)>,
    {
        let mut values = HashMap::default();

        for (b, v) in iter {
            debug_assert!(b.len() <= 8);
            let forward = interpret_bytes(b.iter());
            let backward = interpret_bytes(b.iter().rev());

            values.insert(forward, v);
            if replace || !values.contains_key(&backward) {
                values.insert(backward, v);
            }
        }

        Self { values }
    }

    pub fn get<const N: usize>(&self, i: [u8; N]) -> Option<Energy> {
        self.get_ref(i).copied()
    }

    pub fn get_ref<const N: usize>(&self, b: [u8; N]) -> Option<&Energy> {
        self.values.get(&interpret_bytes(b.iter()))
    }

    pub fn contains_key<const N: usize>(&self, i: [u8; N]) -> bool {
        self.get_ref(i).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Packed keys and their energies.
    pub fn iter(&self) -> impl Iterator<Item = (u64, Energy)> + '_ {
        self.values.iter().map(|(&k, &v)| (k, v))
    }
}

/// The DNA and RNA parameter sets, built once and shared read-only between
/// folding contexts.
#[derive(Debug, Clone)]
pub struct Models {
    dna: Arc<Energies>,
    rna: Arc<Energies>,
}

impl Default for Models {
    fn default() -> Self {
        Self::new()
    }
}

impl Models {
    pub fn new() -> Self {
        Self {
            dna: Arc::new(dna::energies()),
            rna: Arc::new(rna::energies()),
        }
    }

    /// A process wide instance, built on first use.
    pub fn shared() -> &'static Models {
        static MODELS: LazyLock<Models> = LazyLock::new(Models::new);
        &MODELS
    }

    pub fn dna(&self) -> &Arc<Energies> {
        &self.dna
    }

    pub fn rna(&self) -> &Arc<Energies> {
        &self.rna
    }

    /// Picks the parameter set for an uppercase sequence. DNA wins when the
    /// sequence is valid as both.
    pub fn select(&self, seq: &[u8]) -> SeqResult<&Arc<Energies>> {
        if is_dna(seq) {
            return Ok(&self.dna);
        }
        if is_rna(seq) {
            return Ok(&self.rna);
        }
        if seq.contains(&b'T') && seq.contains(&b'U') {
            return Err(FoldError::DnaOrRna);
        }

        let mut unknown: Vec<u8> = seq
            .iter()
            .copied()
            .filter(|b| !b"ACGTU".contains(b))
            .collect();
        unknown.sort_unstable();
        unknown.dedup();
        Err(FoldError::UnknownBp(
            String::from_utf8_lossy(&unknown).into_owned(),
        ))
    }
}
