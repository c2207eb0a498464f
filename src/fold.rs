//! Predict nucleic acid secondary structure

mod loops;
#[cfg(test)]
mod test;

use std::{
    fmt::Display,
    ops::{Index, IndexMut},
    sync::Arc,
};

use rayon::prelude::*;
use tracing::{debug, instrument, trace};

use crate::{
    Cache, Energies, FoldOptions, Models,
    error::{FoldError, SeqResult},
    params::{Dg, Params},
    util::{ByteStr, round2},
};

pub use loops::{
    MultiLoop, bulge, calc_pair, calc_stack, closing_at, hairpin, internal_loop, multi_branch,
};

/// Paired bases must be at least this far apart, leaving a loop of three.
pub const MIN_LOOP_SEPARATION: usize = 4;

pub type Indices = Vec<(usize, usize)>;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Desc {
    Hairpin([u8; 5]),
    Stack([u8; 5]),
    StackDe([u8; 5]),
    /// A single mismatch, technically an interior loop of 1
    Mismatch([u8; 7]),
    Bulge(usize),
    InteriorLoop(usize, usize),
    /// Unpaired bases and helices of a multi-branch loop
    Bifurcation(usize, usize),
    /// Helices on an exterior stretch
    Exterior(usize),
    Isolated,
}

impl std::fmt::Debug for Desc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Desc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Desc::Hairpin(pair) => write!(f, "HAIRPIN:{}", ByteStr(pair)),
            Desc::Stack(pair) => write!(f, "STACK:{}", ByteStr(pair)),
            Desc::StackDe(pair) => write!(f, "STACK_DE:{}", ByteStr(pair)),
            Desc::Mismatch(stack) => write!(f, "STACK:{}", ByteStr(stack)),
            Desc::Bulge(n) => write!(f, "BULGE:{n}"),
            Desc::InteriorLoop(l, r) => write!(f, "INTERIOR_LOOP:{l}/{r}"),
            Desc::Bifurcation(unpaired, helices) => {
                write!(f, "BIFURCATION:{unpaired}n/{helices}h")
            }
            Desc::Exterior(helices) => write!(f, "EXTERIOR:{helices}h"),
            Desc::Isolated => write!(f, "ISOLATED"),
        }
    }
}

/// A structure stored in a cache cell.
///
/// In V, `ij` holds the pairs directly enclosed by the cell's closing pair.
/// In W, it holds the outermost pairs of the span.
#[derive(Debug, Clone)]
pub struct Structure {
    pub e: Dg,
    pub desc: Desc,
    pub ij: Indices,
}

impl PartialEq for Structure {
    fn eq(&self, other: &Self) -> bool {
        self.e == other.e && self.ij == other.ij
    }
}

impl Structure {
    pub fn new(e: Dg, desc: Desc, ij: Indices) -> Self {
        Self { e, desc, ij }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    #[default]
    Unresolved,
    /// No legal structure
    Invalid,
    Resolved(Structure),
}

impl Cell {
    pub fn structure(&self) -> Option<&Structure> {
        match self {
            Cell::Resolved(s) => Some(s),
            _ => None,
        }
    }

    pub fn e(&self) -> Option<Dg> {
        self.structure().map(|s| s.e)
    }
}

impl From<Option<Structure>> for Cell {
    fn from(value: Option<Structure>) -> Self {
        value.map_or(Cell::Invalid, Cell::Resolved)
    }
}

/// Upper triangle of an n x n matrix of cells, `(i, j)` with `i <= j`.
#[derive(Debug, Clone)]
pub struct Matrix {
    cells: Box<[Cell]>,
    len: usize,
}

impl Matrix {
    pub fn new(len: usize) -> Self {
        let cells = vec![Cell::Unresolved; len * (len + 1) / 2].into_boxed_slice();
        Self { cells, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn slot(&self, i: usize, j: usize) -> usize {
        assert!(
            i <= j && j < self.len,
            "({i}, {j}) is outside a {0}x{0} triangle",
            self.len
        );
        i * (2 * self.len - i + 1) / 2 + (j - i)
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&Cell> {
        (i <= j && j < self.len).then(|| &self.cells[self.slot(i, j)])
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Cell;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.cells[self.slot(i, j)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        let slot = self.slot(i, j);
        &mut self.cells[slot]
    }
}

/// A sequence with its filled V and W caches.
#[derive(Debug)]
pub struct Context {
    energies: Arc<Energies>,
    params: Params,
    seq: Vec<u8>,
    /// - v: best structure where V(i,j) bond
    v: Matrix,
    /// - w: best structure of the span W(i,j)
    w: Matrix,
}

impl Context {
    /// Validate `seq` and fill its caches at `temp` °C.
    pub fn new(seq: &[u8], temp: Option<f64>) -> SeqResult<Self> {
        Self::with_options(seq, &FoldOptions::at(temp), Models::shared())
    }

    #[instrument(skip_all, name = "context", fields(len = seq.len()))]
    pub fn with_options(seq: &[u8], options: &FoldOptions, models: &Models) -> SeqResult<Self> {
        options.validate()?;

        let seq = seq.to_ascii_uppercase();
        let energies = Arc::clone(models.select(&seq)?);
        let params = energies.params(options.temp, options.scale);
        debug!(
            polymer = %energies.polymer,
            temp = options.temp,
            scale = options.scale,
            "folding"
        );

        let n = seq.len();
        let mut ctx = Self {
            energies,
            params,
            seq,
            v: Matrix::new(n),
            w: Matrix::new(n),
        };
        ctx.fill()?;
        Ok(ctx)
    }

    pub fn seq(&self) -> &[u8] {
        &self.seq
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    pub fn energies(&self) -> &Arc<Energies> {
        &self.energies
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Kelvin
    pub fn temp(&self) -> f64 {
        self.params.temp
    }

    pub fn v(&self) -> &Matrix {
        &self.v
    }

    pub fn w(&self) -> &Matrix {
        &self.w
    }

    /// Fill both caches by increasing span so every read finds a filled cell.
    fn fill(&mut self) -> SeqResult<()> {
        let n = self.seq.len();
        for span in 0..n {
            for i in 0..n - span {
                let j = i + span;
                if span < MIN_LOOP_SEPARATION {
                    self.v[(i, j)] = Cell::Invalid;
                    self.w[(i, j)] = Cell::Invalid;
                    continue;
                }
                let cell = v(self, i, j)?;
                self.v[(i, j)] = cell;
                let cell = w(self, i, j)?;
                self.w[(i, j)] = cell;
            }
            trace!(span, "filled");
        }
        Ok(())
    }

    fn v_at(&self, i: usize, j: usize) -> SeqResult<Option<&Structure>> {
        resolved(&self.v, i, j, "V")
    }

    fn w_at(&self, i: usize, j: usize) -> SeqResult<Option<&Structure>> {
        resolved(&self.w, i, j, "W")
    }

    /// The minimum free energy structure of the whole sequence.
    pub fn folded(&self) -> Folded {
        let values = traceback(self);
        // a non-empty traceback started from W(0, n-1)
        let e = if values.is_empty() {
            None
        } else {
            self.w[(0, self.len() - 1)]
                .e()
                .map(|e| self.params.to_kcal(e))
        };
        Folded { values, e }
    }
}

fn resolved<'a>(
    m: &'a Matrix,
    i: usize,
    j: usize,
    cache: &'static str,
) -> SeqResult<Option<&'a Structure>> {
    match &m[(i, j)] {
        Cell::Unresolved => Err(FoldError::Fill { cache, i, j }),
        Cell::Invalid => Ok(None),
        Cell::Resolved(s) => Ok(Some(s)),
    }
}

/// Keep `candidate` if it is strictly lower than the current best.
fn keep_min(best: &mut Option<Structure>, e: Dg, candidate: impl FnOnce() -> Structure) {
    if best.as_ref().is_none_or(|b| e < b.e) {
        *best = Some(candidate());
    }
}

/// Find the lowest free energy structure in the Sij subsequence
///
/// Figure 2B in Zuker and Stiegler, 1981
///
/// # Args
///
/// - ctx: The context being filled, holding every shorter span
/// - i: The start index
/// - j: The end index (inclusive)
///
/// # Returns
///
/// - The W(i,j) cell
pub fn w(ctx: &Context, i: usize, j: usize) -> SeqResult<Cell> {
    if j - i < MIN_LOOP_SEPARATION {
        return Ok(Cell::Invalid);
    }

    let mut best = None;

    // i or j left unpaired
    for (i1, j1) in [(i + 1, j), (i, j - 1)] {
        if let Some(s) = ctx.w_at(i1, j1)? {
            keep_min(&mut best, s.e, || s.clone());
        }
    }

    // i and j paired
    if let Some(s) = ctx.v_at(i, j)? {
        keep_min(&mut best, s.e, || Structure::new(s.e, s.desc, vec![(i, j)]));
    }

    // two exterior stretches side by side
    for k in i + MIN_LOOP_SEPARATION..j - MIN_LOOP_SEPARATION {
        let (Some(l), Some(r)) = (ctx.w_at(i, k)?, ctx.w_at(k + 1, j)?) else {
            continue;
        };
        let e = l.e + r.e;
        keep_min(&mut best, e, || {
            let ij: Indices = l.ij.iter().chain(&r.ij).copied().collect();
            Structure::new(e, Desc::Exterior(ij.len()), ij)
        });
    }

    Ok(best.into())
}

/// Find the minimum free energy of the structure between i and j, given
/// that they pair
///
/// See: Figure 2B of Zuker, 1981
///
/// # Args
///
/// - ctx: The context being filled, holding every shorter span
/// - i: The start index
/// - j: The end index (inclusive)
///
/// # Returns
///
/// - The V(i,j) cell, invalid if i and j don't bp
pub fn v(ctx: &Context, i: usize, j: usize) -> SeqResult<Cell> {
    let seq = ctx.seq.as_slice();
    let n = seq.len();
    let params = &ctx.params;
    let comp = &ctx.energies.complement;

    // the ends must basepair for V(i,j)
    if j - i < MIN_LOOP_SEPARATION || !comp.pairs(seq[i], seq[j]) {
        return Ok(Cell::Invalid);
    }

    // if the basepair is isolated, penalize at 1,600 kcal/mol
    // heuristic for speeding this up
    // from https://www.ncbi.nlm.nih.gov/pubmed/10329189
    let isolated_outer = i == 0 || j == n - 1 || !comp.pairs(seq[i - 1], seq[j + 1]);
    let isolated_inner = !comp.pairs(seq[i + 1], seq[j - 1]);
    if isolated_outer && isolated_inner {
        return Ok(Cell::Resolved(Structure::new(
            params.isolated,
            Desc::Isolated,
            Indices::new(),
        )));
    }

    let mut best = None;

    // E1 = FH(i, j); hairpin
    if let Some(e) = hairpin(seq, i, j, params) {
        let pair = calc_pair(seq, i, i + 1, j, j - 1);
        keep_min(&mut best, e, || {
            Structure::new(e, Desc::Hairpin(pair), Indices::new())
        });
    }

    // E2 = min{FL(i, j, i', j') + V(i', j')}, i<i'<j'<j
    // stacking region or bulge or interior loop; Figure 2A(2)
    for i1 in i + 1..j - MIN_LOOP_SEPARATION {
        for j1 in i1 + MIN_LOOP_SEPARATION..j {
            // i1 and j1 must match
            if !comp.pairs(seq[i1], seq[j1]) {
                continue;
            }
            let Some(inner) = ctx.v_at(i1, j1)? else {
                continue;
            };

            let stack = i1 == i + 1 && j1 == j - 1;
            let bulge_left = i1 > i + 1;
            let bulge_right = j1 < j - 1;

            let (e, desc) = if stack {
                // it's a neighboring/stacking pair in a helix
                let Some(e) = calc_stack(seq, i, i1, j, j1, params) else {
                    continue;
                };
                let pair = calc_pair(seq, i, i1, j, j1);
                if (i > 0 && j == n - 1) || (i == 0 && j < n - 1) {
                    // there's a dangling end
                    (e, Desc::StackDe(pair))
                } else {
                    (e, Desc::Stack(pair))
                }
            } else if bulge_left && bulge_right {
                // flanking bases that stack make this a stack or bulge instead
                let pair_left = calc_pair(seq, i, i + 1, j, j - 1);
                let pair_right = calc_pair(seq, i1 - 1, i1, j1 + 1, j1);
                if params.nn.contains_key(pair_left) || params.nn.contains_key(pair_right) {
                    continue;
                }

                // it's an interior loop
                let Some(e) = internal_loop(seq, i, i1, j, j1, params) else {
                    continue;
                };
                if i1 - i == 2 && j - j1 == 2 {
                    let [a, b, c] = [seq[i], seq[i + 1], seq[i1]];
                    let [x, y, z] = [seq[j], seq[j - 1], seq[j1]];
                    (e, Desc::Mismatch([a, b, c, b'/', x, y, z]))
                } else {
                    (e, Desc::InteriorLoop(i1 - i - 1, j - j1 - 1))
                }
            } else {
                // it's a bulge on one side
                let Some(e) = bulge(seq, i, i1, j, j1, params) else {
                    continue;
                };
                (e, Desc::Bulge((i1 - i - 1).max(j - j1 - 1)))
            };

            let e = e + inner.e;
            keep_min(&mut best, e, || Structure::new(e, desc, vec![(i1, j1)]));
        }
    }

    // E3 = min{W(i+1,i') + W(i'+1,j-1)}, i+1<i'<j-2
    // a multi-branch loop closed by (i, j)
    let mut branches = Indices::new();
    for k in i + 1 + MIN_LOOP_SEPARATION..j.saturating_sub(1 + MIN_LOOP_SEPARATION) {
        let (Some(l), Some(r)) = (ctx.w_at(i + 1, k)?, ctx.w_at(k + 1, j - 1)?) else {
            continue;
        };

        branches.clear();
        branches.extend(l.ij.iter().chain(&r.ij));
        let multi = multi_branch(seq, i, j, &branches, params);

        let e = multi.e + l.e + r.e;
        keep_min(&mut best, e, || {
            let desc = Desc::Bifurcation(multi.unpaired, branches.len() + 1);
            Structure::new(e, desc, branches.clone())
        });
    }

    Ok(best.into())
}

/// A single structure with a free energy, description, and closing pair.
#[derive(Debug, Clone)]
pub struct Value {
    /// kcal/mol
    pub e: f64,
    pub desc: Desc,
    pub ij: Indices,
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.e == other.e && self.ij == other.ij
    }
}

impl Value {
    pub fn new(e: f64, desc: Desc, ij: Indices) -> Self {
        Self { e, desc, ij }
    }
}

/// Traceback thru the V(i,j) and W(i,j) caches to find the structure
///
/// Starts from the exterior pairs of W(0,n-1) and walks each pair's
/// enclosed pairs through V, outside in. Each structure's energy is its
/// V(i,j) less the V of the pairs it encloses.
///
/// # Args
///
/// - ctx: A filled context
///
/// # Returns
///
/// - The structures of the minimum free energy fold, empty when no
///   structure is more stable than the unfolded strand
#[instrument(skip_all, fields(len = ctx.len()))]
pub fn traceback(ctx: &Context) -> Vec<Value> {
    let Some(root) = ctx
        .len()
        .checked_sub(1)
        .and_then(|last| ctx.w[(0, last)].structure())
    else {
        return Vec::new();
    };

    // the unfolded strand has a free energy of 0
    if root.e >= 0 {
        debug!(e = root.e, "no stable structure");
        return Vec::new();
    }

    let mut values = Vec::new();
    let mut stack: Indices = root.ij.iter().rev().copied().collect();
    while let Some((i, j)) = stack.pop() {
        let Some(s) = ctx.v[(i, j)].structure() else {
            continue;
        };

        let inner: Dg = s.ij.iter().filter_map(|&ij| ctx.v[ij].e()).sum();
        values.push(Value::new(
            ctx.params.to_kcal(s.e - inner),
            s.desc,
            vec![(i, j)],
        ));
        stack.extend(s.ij.iter().rev());
    }

    debug!(structures = values.len(), "traced back");
    values
}

/// The structures of a minimum free energy fold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Folded {
    values: Vec<Value>,
    /// W(0, n-1) in kcal/mol, `None` when nothing folds
    e: Option<f64>,
}

impl Folded {
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The dot bracket notation of the fold, see [`dot_bracket`].
    pub fn dot_bracket(&self) -> String {
        dot_bracket(&self.values)
    }

    /// Total free energy in kcal/mol, infinite when nothing folds.
    ///
    /// Converted once from the scaled total, so it matches the sum of the
    /// values up to float rounding.
    pub fn mfe(&self) -> f64 {
        self.e.unwrap_or(f64::INFINITY)
    }
}

/// Get the dot bracket notation for a secondary structure.
///
/// # Args
///
/// - values: A list of structures, usually from the fold function
///
/// # Returns
///
/// - The dot bracket notation, running to the last paired base
pub fn dot_bracket(values: &[Value]) -> String {
    let Some(len) = values.iter().flat_map(|v| &v.ij).map(|&(_, j)| j + 1).max() else {
        return String::new();
    };

    let mut result = vec!['.'; len];
    for (i, j) in values.iter().flat_map(|v| &v.ij) {
        result[*i] = '(';
        result[*j] = ')';
    }
    result.into_iter().collect()
}

/// Fold the DNA or RNA sequence and return the lowest free energy structure.
///
/// Based on the approach described in:
/// Zuker and Stiegler, 1981
/// <https://www.ncbi.nlm.nih.gov/pmc/articles/PMC326673/pdf/nar00394-0137.pdf>
///
/// "Isolated" matching bp are penalized in V(i,j). This is based on an
/// approach described in:
/// Mathews, Sabina, Zuker and Turner, 1999
/// <https://www.ncbi.nlm.nih.gov/pubmed/10329189>
///
/// # Args
///
/// - seq: The sequence to fold
/// - temp: The temperature the fold takes place in, in Celcius
///
/// # Returns
///
/// - [`Folded`]: The structures. Stacks, bulges, hairpins, etc.
///
/// # Panics
///
/// If the sequence is neither DNA nor RNA
pub fn fold(seq: &[u8], temp: Option<f64>) -> Folded {
    try_fold(seq, temp).expect("Invalid Sequence Inputted")
}

/// A non-panicing version of [`fold`]
pub fn try_fold(seq: &[u8], temp: Option<f64>) -> SeqResult<Folded> {
    fold_with(seq, &FoldOptions::at(temp))
}

/// Fold with explicit options.
pub fn fold_with(seq: &[u8], options: &FoldOptions) -> SeqResult<Folded> {
    Ok(Context::with_options(seq, options, Models::shared())?.folded())
}

/// Fold many sequences in parallel.
pub fn fold_many<S>(seqs: &[S], options: &FoldOptions) -> Vec<SeqResult<Folded>>
where
    S: AsRef<[u8]> + Sync,
{
    let models = Models::shared();
    seqs.par_iter()
        .map(|seq| Ok(Context::with_options(seq.as_ref(), options, models)?.folded()))
        .collect()
}

/// Fold the sequence and return just the delta G of the structure
///
/// # Args
///
/// - seq: The sequence to fold
/// - temp: The temperature to fold at
///
/// # Returns
///
/// - [`f64`]: The minimum free energy of the folded sequence, infinite if
///   nothing folds
pub fn dg(seq: &[u8], temp: Option<f64>) -> f64 {
    try_dg(seq, temp).expect("Invalid Sequence Inputted")
}

/// A non-panicing version of [`dg`]
pub fn try_dg(seq: &[u8], temp: Option<f64>) -> SeqResult<f64> {
    Ok(round2(try_fold(seq, temp)?.mfe()))
}

/// Fold a nucleic acid sequence and return the estimated dg of each (i,j) pairing.
///
/// # Args
///
/// - seq: The nucleic acid sequence to fold
/// - temp: The temperature to fold at
///
/// # Returns
///
/// - [`Cache`]: A 2D matrix where each (i, j) pairing corresponds to the
///   minimum free energy between i and j, infinite where nothing folds
pub fn dg_cache(seq: &[u8], temp: Option<f64>) -> Cache {
    try_dg_cache(seq, temp).expect("Invalid Sequence Inputted")
}

/// A non-panicing version of [`dg_cache`]
pub fn try_dg_cache(seq: &[u8], temp: Option<f64>) -> SeqResult<Cache> {
    let ctx = Context::new(seq, temp)?;
    let n = ctx.len();
    Ok((0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    ctx.w
                        .get(i, j)
                        .and_then(Cell::e)
                        .map_or(f64::INFINITY, |e| ctx.params.to_kcal(e))
                })
                .collect()
        })
        .collect())
}
