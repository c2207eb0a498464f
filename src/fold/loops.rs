//! Free energy increments of the loops closed by a base pair.
//!
//! Every function works on scaled energies from [`Params`] and returns `None`
//! when a table entry the loop needs is missing, which rules the loop out.

use crate::{
    params::{Dg, Params},
    util::ToIsize,
};

use super::MIN_LOOP_SEPARATION;

/// Return a stack representation, a key for the NN maps
///
/// # Args
///
/// - s: Sequence being folded
/// - i: leftmost index
/// - i1: index to right of i
/// - j: rightmost index
/// - j1: index to left of j
///
/// # Returns
///
/// - [`[u8; 5]`]: string representation of the pair, `.` for negative indices
pub fn calc_pair(
    s: &[u8],
    i: impl ToIsize,
    i1: impl ToIsize,
    j: impl ToIsize,
    j1: impl ToIsize,
) -> [u8; 5] {
    let (i, i1, j, j1) = (i.to_isize(), i1.to_isize(), j.to_isize(), j1.to_isize());
    [
        if i >= 0 { s[i as usize] } else { b'.' },
        if i1 >= 0 { s[i1 as usize] } else { b'.' },
        b'/',
        if j >= 0 { s[j as usize] } else { b'.' },
        if j1 >= 0 { s[j1 as usize] } else { b'.' },
    ]
}

/// Whether a pair is closed by anything weaker than G·C.
pub fn closing_at(a: u8, b: u8) -> bool {
    !matches!((a, b), (b'G', b'C') | (b'C', b'G'))
}

/// Get the free energy for a stack.
///
/// Using the indexes i and j, check whether it's at the end of
/// the sequence or internal. Then check whether it's a match
/// or mismatch, and return.
///
/// Two edge-cases are terminal mismatches and dangling ends.
/// The energy of a dangling end is added to the energy of a pair
/// where i XOR j is at the sequence's end.
///
/// # Args
///
/// - seq: The full folding sequence
/// - i: The start index on left side of the pair/stack, -1 for a dangling end
/// - i1: The index to the right of i
/// - j: The end index on right side of the pair/stack
/// - j1: The index to the left of j
/// - params: Resolved energies
///
/// # Returns
///
/// - The free energy of the NN pairing, `None` if it isn't tabulated
pub fn calc_stack(
    seq: &[u8],
    i: impl ToIsize,
    i1: impl ToIsize,
    j: impl ToIsize,
    j1: impl ToIsize,
    params: &Params,
) -> Option<Dg> {
    let (i, i1, j, j1) = (i.to_isize(), i1.to_isize(), j.to_isize(), j1.to_isize());
    if [i, i1, j, j1].iter().any(|&x| x >= seq.len() as isize) {
        return Some(0);
    }

    let pair = calc_pair(seq, i, i1, j, j1);

    if [i, i1, j, j1].contains(&-1) {
        // it's a dangling end
        return params.de.get(pair);
    }
    let (i, j) = (i as usize, j as usize);
    let last = seq.len() - 1;

    if i > 0 && j < last {
        // it's internal
        return params.nn.get(pair).or_else(|| params.internal_mm.get(pair));
    }

    let d_g = params.nn.get(pair).or_else(|| params.terminal_mm.get(pair))?;

    let pair_de = match (i, j) {
        // it's terminal
        (0, j) if j == last => return Some(d_g),
        // it's dangling on left
        (_, j) if j == last => [seq[i - 1], seq[i], b'/', b'.', seq[j]],
        // it's dangling on right
        _ => [b'.', seq[i], b'/', seq[j + 1], seq[j]],
    };
    Some(d_g + params.de.get(pair_de).unwrap_or(0))
}

/// Calculate the free energy of a hairpin.
///
/// # Args
///
/// - seq: The sequence we're folding
/// - i: The index of start of hairpin
/// - j: The index of end of hairpin
/// - params: Resolved energies
///
/// # Returns
///
/// - The free energy increment from the hairpin structure
pub fn hairpin(seq: &[u8], i: usize, j: usize, params: &Params) -> Option<Dg> {
    if j - i < MIN_LOOP_SEPARATION {
        return None;
    }

    let hairpin = &seq[i..=j];
    let hairpin_len = hairpin.len() - 2;
    let pair = calc_pair(seq, i, i + 1, j, j - 1);

    // bonus for a known tri, tetra or hexa loop
    let mut d_g = params.special_hairpin(hairpin).unwrap_or(0);

    // add penalty based on size
    d_g += params.hairpin_loops.get(hairpin_len);

    // add penalty for a terminal mismatch
    if hairpin_len > 3
        && let Some(mm) = params.terminal_mm.get(pair)
    {
        d_g += mm;
    }

    // add penalty if length 3 and AT closing, formula 8 from SantaLucia, 2004
    if hairpin_len == 3 && closing_at(seq[i], seq[j]) {
        d_g += params.closing_at;
    }

    Some(d_g)
}

/// Calculate the free energy associated with a bulge.
///
/// # Args
///
/// - seq: The full folding sequence
/// - i: The start index of the bulge
/// - i1: The index to the right of i
/// - j: The end index of the bulge
/// - j1: The index to the left of j
/// - params: Resolved energies
///
/// # Returns
///
/// - The increment in free energy from the bulge
pub fn bulge(
    seq: &[u8],
    i: usize,
    i1: usize,
    j: usize,
    j1: usize,
    params: &Params,
) -> Option<Dg> {
    let loop_len = (i1 - i - 1).max(j - j1 - 1);
    if loop_len == 0 {
        return None;
    }

    // add penalty based on size
    let mut d_g = params.bulge_loops.get(loop_len);

    if loop_len == 1 {
        // if len 1, include the delta G of intervening NN (SantaLucia 2004)
        if !params.nn.contains_key(calc_pair(seq, i, i1, j, j1)) {
            return None;
        }
        d_g += calc_stack(seq, i, i1, j, j1, params)?;
    }

    // penalize AT terminal bonds
    for (a, b) in [(seq[i], seq[j]), (seq[i1], seq[j1])] {
        if closing_at(a, b) {
            d_g += params.closing_at;
        }
    }

    Some(d_g)
}

/// Calculate the free energy of an internal loop.
///
/// The first and last bp of both left and right sequences
/// are not themselves parts of the loop, but are the terminal
/// bp on either side of it. They are needed for when there's
/// a single internal looping bp (where just the mismatching
/// free energies are used)
///
/// This is adapted from the "Internal Loops" section of SantaLucia/Hicks, 2004
///
/// # Args
///
/// - seq: The sequence we're folding
/// - i: The index of the start of structure on left side
/// - i1: The index to the right of i
/// - j: The index of the end of structure on right side
/// - j1: The index to the left of j
/// - params: Resolved energies
///
/// # Returns
///
/// - The free energy associated with the internal loop
pub fn internal_loop(
    seq: &[u8],
    i: usize,
    i1: usize,
    j: usize,
    j1: usize,
    params: &Params,
) -> Option<Dg> {
    let loop_left = i1 - i - 1;
    let loop_right = j - j1 - 1;
    if loop_left == 0 || loop_right == 0 {
        return None;
    }

    // single bp mismatch, sum up the two single mismatch pairs
    if loop_left == 1 && loop_right == 1 {
        let mm_left = calc_stack(seq, i, i + 1, j, j - 1, params)?;
        let mm_right = calc_stack(seq, i1 - 1, i1, j1 + 1, j1, params)?;
        return Some(mm_left + mm_right);
    }

    // apply a penalty based on loop size
    let mut d_g = params.internal_loops.get(loop_left + loop_right);

    // apply an asymmetry penalty
    d_g += params.asymmetry * loop_left.abs_diff(loop_right) as Dg;

    // apply penalty based on the mismatching pairs on either side of the loop
    d_g += params.terminal_mm.get(calc_pair(seq, i, i + 1, j, j - 1))?;
    d_g += params.terminal_mm.get(calc_pair(seq, i1 - 1, i1, j1 + 1, j1))?;

    Some(d_g)
}

/// The side of a helix that faces a multi-branch loop.
///
/// `a` is the paired base whose 5' neighbour lies in the loop, `b` its partner
/// whose 3' neighbour lies in the loop.
#[derive(Debug, Clone, Copy)]
struct Face {
    a: usize,
    b: usize,
}

impl Face {
    /// Terminal mismatch of both loop neighbours.
    fn mismatch(self, seq: &[u8], params: &Params) -> Option<Dg> {
        params
            .terminal_mm
            .get([seq[self.a - 1], seq[self.a], b'/', seq[self.b + 1], seq[self.b]])
    }

    /// The base 3' of `b` dangling on the pair.
    fn dangle_3(self, seq: &[u8], params: &Params) -> Option<Dg> {
        params
            .de
            .get([b'.', seq[self.a], b'/', seq[self.b + 1], seq[self.b]])
    }

    /// The base 5' of `a` dangling on the pair.
    fn dangle_5(self, seq: &[u8], params: &Params) -> Option<Dg> {
        params
            .de
            .get([seq[self.a - 1], seq[self.a], b'/', b'.', seq[self.b]])
    }
}

/// A scored multi-branch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiLoop {
    pub e: Dg,
    pub unpaired: usize,
}

/// Calculate a multi-branch energy penalty using a linear formula.
///
/// From Jaeger, Turner, and Zuker, 1989.
/// Found to be better than logarithmic in Ward, et al. 2017
///
/// Unpaired bases next to a helix stabilise it as a terminal mismatch, or as
/// a dangling end when only one side is unpaired. A lone base between two
/// helices goes to whichever gains more from it. Missing dangling end and
/// mismatch entries count as zero.
///
/// # Args
///
/// - seq: The sequence being folded
/// - i: The index of the closing pair's left base
/// - j: The index of the closing pair's right base
/// - branches: The pairs of the inner helices, in order
/// - params: Resolved energies
///
/// # Returns
///
/// - The loop energy, excluding the energy of the branches themselves
pub fn multi_branch(
    seq: &[u8],
    i: usize,
    j: usize,
    branches: &[(usize, usize)],
    params: &Params,
) -> MultiLoop {
    // helices around the loop, starting with the closing pair seen from inside
    let faces: Vec<Face> = std::iter::once(Face { a: j, b: i })
        .chain(branches.iter().map(|&(a, b)| Face { a, b }))
        .collect();
    let helices = faces.len();

    // unpaired bases following each face's `b`
    let gaps: Vec<usize> = (0..helices)
        .map(|index| {
            let next = match faces.get(index + 1) {
                Some(face) => face.a,
                None => j,
            };
            next - faces[index].b - 1
        })
        .collect();

    let mut e_sum = 0;
    for (index, &face) in faces.iter().enumerate() {
        let gap_before = gaps[(index + helices - 1) % helices];
        let gap_after = gaps[index];
        if gap_after == 0 {
            continue;
        }

        e_sum += if gap_before > 0 {
            face.mismatch(seq, params).unwrap_or(0)
        } else {
            let mut de = face.dangle_3(seq, params).unwrap_or(0);
            if gap_after == 1 {
                let next = faces[(index + 1) % helices];
                de = de.min(next.dangle_5(seq, params).unwrap_or(0));
            }
            de
        };
    }

    let unpaired: usize = gaps.iter().sum();

    // penalty for unmatched bp and multi-branch
    let [a, b, c, d] = params.multibranch;
    let mut e = if unpaired == 0 {
        a + d
    } else {
        a + b * helices as Dg + c * unpaired as Dg
    };

    if closing_at(seq[i], seq[j]) {
        e += params.closing_at;
    }

    MultiLoop {
        e: e + e_sum,
        unpaired,
    }
}
