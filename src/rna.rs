//! RNA enthalpy and entropy change parameters.
//!
//! Loop, dangling end and terminal mismatch parameters are published as
//! free energies at 37 °C only. They are stored here as purely entropic
//! terms (ΔH = 0) that reproduce the tabulated ΔG at 37 °C.

use crate::{BpEnergy, Comp, Energies, Energy, LoopEnergy, MAX_LOOP_LEN, MultiBranch, Polymer};

const T37: f64 = 310.15;
const RT37: f64 = 1.9872e-3 * T37;

const BASES: [u8; 4] = *b"ACGU";

/// A purely entropic term with free energy `d_g` at 37 °C.
fn from_d_g37(d_g: f64) -> Energy {
    (0.0, -d_g * 1000.0 / T37)
}

/// a, b, c, d in a linear multi-branch energy change function.
///
/// a + b per helix + c per unpaired base, d when every helix abuts its
/// neighbour.
///
/// Mathews, Sabina, Zuker & Turner (1999), J Mol Biol 288: 911-940
pub const fn multibranch() -> MultiBranch {
    (3.4, 0.4, 0.0, 2.0)
}

pub fn complement() -> Comp {
    static RAW_COMPLEMENT: [(u8, u8); 4] = [
        (b'A', b'U'),
        (b'U', b'A'),
        (b'G', b'C'),
        (b'C', b'G'),
    ];

    Comp::from_iter(RAW_COMPLEMENT)
}

/// Xia, SantaLucia, Burkard, Kierzek, Schroeder, Jiao, Cox & Turner (1998),
/// Biochemistry 37: 14719-14735
pub fn nn() -> BpEnergy {
    static RAW_NN: [(&[u8], Energy); 10] = [
        (b"AA/UU", (-6.82, -19.0)),
        (b"AU/UA", (-9.38, -26.7)),
        (b"UA/AU", (-7.69, -20.5)),
        (b"CU/GA", (-10.48, -27.1)),
        (b"CA/GU", (-10.44, -26.9)),
        (b"GU/CA", (-11.40, -29.5)),
        (b"GA/CU", (-12.44, -32.5)),
        (b"CG/GC", (-10.64, -26.7)),
        (b"GG/CC", (-13.39, -32.7)),
        (b"GC/CG", (-14.88, -36.9)),
    ];

    BpEnergy::build(false, RAW_NN)
}

/// Free energy of a 1x1 internal loop closed by two G-C pairs.
const INT11_GC: f64 = 0.4;
/// Added per A-U pair closing a 1x1 internal loop.
const INT11_AU: f64 = 0.7;
/// A G·G mismatch in a 1x1 internal loop.
const INT11_GG: f64 = -1.7;

/// Single mismatches `PX/QY` flanked by two pairs, X 3' of P and Y 5' of Q.
///
/// A 1x1 internal loop is scored as two of these, one per closing pair, so
/// the loop energy is split evenly between its halves: 0.4 kcal/mol for the
/// loop, 0.7 per A-U closing pair and -1.7 for a G·G mismatch, after the
/// 1x1 table of Mathews et al. (2004).
pub fn internal_mm() -> BpEnergy {
    let comp = complement();
    let mut raw: Vec<([u8; 5], Energy)> = Vec::with_capacity(96);
    for p in BASES {
        let Some(q) = comp.get(p) else {
            continue;
        };
        for x in BASES {
            for y in BASES {
                if comp.pairs(x, y) {
                    continue;
                }
                let mut d_g = INT11_GC / 2.0;
                if matches!(p, b'A' | b'U') {
                    d_g += INT11_AU;
                }
                if x == b'G' && y == b'G' {
                    d_g += (INT11_GG - INT11_GC) / 2.0;
                }
                raw.push(([p, x, b'/', q, y], from_d_g37(d_g)));
            }
        }
    }

    BpEnergy::build(false, raw.iter().map(|(k, v)| (&k[..], *v)))
}

/// Tetraloop bonuses keyed by the loop and its closing pair.
///
/// Mathews, Sabina, Zuker & Turner (1999), J Mol Biol 288: 911-940
pub fn tetra_loops() -> BpEnergy {
    static RAW_TETRA_LOOPS: [(&[u8], f64); 30] = [
        (b"GGGGAC", -3.0),
        (b"GGUGAC", -3.0),
        (b"CGAAAG", -3.0),
        (b"GGAGAC", -3.0),
        (b"CGCAAG", -3.0),
        (b"GGAAAC", -3.0),
        (b"CGGAAG", -3.0),
        (b"CUUCGG", -3.0),
        (b"CGUGAG", -3.0),
        (b"CGAAGG", -2.5),
        (b"CUACGG", -2.5),
        (b"GGCAAC", -2.5),
        (b"CGCGAG", -2.5),
        (b"UGAGAG", -2.5),
        (b"CGAGAG", -2.0),
        (b"AGAAAU", -2.0),
        (b"CGUAAG", -2.0),
        (b"CUAACG", -2.0),
        (b"UGAAAG", -2.0),
        (b"GGAAGC", -1.5),
        (b"GGGAAC", -1.5),
        (b"UGAAAA", -1.5),
        (b"AGCAAU", -1.5),
        (b"AGUAAU", -1.5),
        (b"CGGGAG", -1.5),
        (b"AGUGAU", -1.5),
        (b"GGCGAC", -1.5),
        (b"GGGAGC", -1.5),
        (b"GUGAAC", -1.5),
        (b"UGGAAA", -1.5),
    ];

    BpEnergy::new(
        RAW_TETRA_LOOPS
            .iter()
            .map(|&(loop_seq, d_g)| (loop_seq, from_d_g37(d_g))),
    )
}

/// 3' dangling ends, ΔG at 37 °C: a base in A, C, G, U order on the 3' side
/// of the first base of the pair.
///
/// Serra & Turner (1995), Methods Enzymol 259: 242-261
static RAW_DANGLE_3: [([u8; 2], [f64; 4]); 4] = [
    (*b"CG", [-1.1, -0.4, -1.3, -0.6]),
    (*b"GC", [-1.7, -0.8, -1.7, -1.2]),
    (*b"AU", [-0.7, -0.1, -0.7, -0.1]),
    (*b"UA", [-0.8, -0.5, -0.8, -0.6]),
];

/// 5' dangling ends, ΔG at 37 °C, laid out as [`RAW_DANGLE_3`].
static RAW_DANGLE_5: [([u8; 2], [f64; 4]); 4] = [
    (*b"CG", [-0.5, -0.3, -0.2, -0.3]),
    (*b"GC", [-0.2, -0.3, -0.0, -0.0]),
    (*b"AU", [-0.3, -0.3, -0.4, -0.2]),
    (*b"UA", [-0.3, -0.1, -0.2, -0.2]),
];

fn dangle(table: &[([u8; 2], [f64; 4]); 4], pair: [u8; 2], x: u8) -> Option<f64> {
    let (_, row) = table.iter().find(|(p, _)| *p == pair)?;
    let col = BASES.iter().position(|&b| b == x)?;
    Some(row[col])
}

/// RNA dangling ends, keyed `.Q/XP` for X 3' of P and `XP/.Q` for X 5' of P,
/// P paired with Q.
pub fn de() -> BpEnergy {
    let mut raw: Vec<([u8; 5], Energy)> = Vec::with_capacity(32);
    for (table, three_prime) in [(&RAW_DANGLE_3, true), (&RAW_DANGLE_5, false)] {
        for ([p, q], row) in table {
            for (&x, &d_g) in BASES.iter().zip(row) {
                let key = if three_prime {
                    [b'.', *q, b'/', x, *p]
                } else {
                    [x, *p, b'/', b'.', *q]
                };
                raw.push((key, from_d_g37(d_g)));
            }
        }
    }

    BpEnergy::build(false, raw.iter().map(|(k, v)| (&k[..], *v)))
}

/// Terminal mismatches `PX/QY`: X 3' of P and Y 5' of Q, P paired with Q,
/// X and Y unpaired.
///
/// Approximated as the sum of the two dangling ends.
pub fn terminal_mm() -> BpEnergy {
    let comp = complement();
    let mut raw: Vec<([u8; 5], Energy)> = Vec::with_capacity(48);
    for ([p, q], _) in &RAW_DANGLE_3 {
        for x in BASES {
            for y in BASES {
                if comp.pairs(x, y) {
                    continue;
                }
                let (Some(d3), Some(d5)) = (
                    dangle(&RAW_DANGLE_3, [*p, *q], x),
                    dangle(&RAW_DANGLE_5, [*q, *p], y),
                ) else {
                    continue;
                };
                raw.push(([*p, x, b'/', *q, y], from_d_g37(d3 + d5)));
            }
        }
    }

    BpEnergy::build(false, raw.iter().map(|(k, v)| (&k[..], *v)))
}

/// Tabulated loop free energies at 37 °C, extended past the last entry with
/// `coefficient * ln(n / last)`.
fn loop_energy(known: &[f64], coefficient: f64) -> LoopEnergy {
    let last = known.len();
    let last_d_g = known.last().copied().unwrap_or(0.0);
    let values: [Energy; MAX_LOOP_LEN] = std::array::from_fn(|i| {
        let len = i + 1;
        let d_g = match known.get(i) {
            Some(&d_g) => d_g,
            None => last_d_g + coefficient * (len as f64 / last as f64).ln(),
        };
        from_d_g37(d_g)
    });
    LoopEnergy::from(values)
}

/// Hairpin loop initiation
///
/// Mathews, Disney, Childs, Schroeder, Zuker & Turner (2004), PNAS 101: 7287-7292
pub fn hairpin_loops() -> LoopEnergy {
    loop_energy(&[0.0, 0.0, 5.4, 5.6, 5.7, 5.4, 6.0, 6.1, 6.2], 1.75 * RT37)
}

/// Bulge loop initiation. A single bulged base keeps the intervening stack.
///
/// Mathews et al. (2004)
pub fn bulge_loops() -> LoopEnergy {
    loop_energy(&[3.8, 2.8, 3.2, 3.6, 4.0, 4.4], 1.75 * RT37)
}

/// Internal loop initiation
///
/// Mathews et al. (2004)
pub fn internal_loops() -> LoopEnergy {
    loop_energy(&[0.0, 0.5, 1.6, 1.1, 2.0, 2.0], 1.08)
}

/// The RNA parameter set.
pub fn energies() -> Energies {
    Energies {
        polymer: Polymer::Rna,
        bulge_loops: bulge_loops(),
        complement: complement(),
        de: de(),
        hairpin_loops: hairpin_loops(),
        multibranch: multibranch(),
        internal_loops: internal_loops(),
        internal_mm: internal_mm(),
        nn: nn(),
        terminal_mm: terminal_mm(),
        tri_tetra_loops: Some(tetra_loops()),
    }
}
