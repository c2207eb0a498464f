//! Test DNA/RNA folding.

use std::sync::Arc;

use approx::assert_relative_eq;

use super::{Cell, Context, Desc, Folded, Matrix};
use crate::{FoldError, FoldOptions, Models, params::Params};

fn dna() -> Params {
    Models::shared().dna().params(37.0, 100)
}

fn rna() -> Params {
    Models::shared().rna().params(37.0, 100)
}

fn assert_balanced(folded: &Folded) {
    let mut depth = 0usize;
    for c in folded.dot_bracket().chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1).expect("unopened bracket"),
            _ => {}
        }
    }
    assert_eq!(depth, 0);
}

/// Fold function.
#[test]
#[should_panic]
fn test_fold_p1() {
    // should throw if a nonsense sequence is provided
    super::dg(b"EASFEASFAST", Some(37.0));
}

#[test]
#[should_panic]
fn test_fold_p2() {
    // U and T, mix of RNA and DNA
    super::dg(b"ATGCATGACGATUU", Some(37.0));
}

#[test]
fn test_alphabet_errors() {
    let err = super::try_fold(b"EASFEASFAST", None).unwrap_err();
    assert!(err.is_alphabet());
    assert_eq!(err, FoldError::UnknownBp("EFS".to_owned()));

    let err = super::try_fold(b"ATGCATGACGATUU", None).unwrap_err();
    assert_eq!(err, FoldError::DnaOrRna);

    let err = super::fold_with(b"GGGGAAAACCCC", &FoldOptions::default().with_scale(-1));
    assert_eq!(err, Err(FoldError::InvalidScale(-1)));
}

/// Scales too large for the penalties to sum in an i64 are refused up front.
#[test]
fn test_oversized_scale() {
    let seq = b"GGGAGGTCGTTACATCTGGGTAACACCGGTACTGATCCGGTGACCTCCC";
    let scale = 10_000_000_000_000_000;
    let err = super::fold_with(seq, &FoldOptions::default().with_scale(scale));
    assert_eq!(err, Err(FoldError::InvalidScale(scale)));

    // the finest accepted scale still folds
    let options = FoldOptions::default().with_scale(crate::config::MAX_SCALE);
    let folded = super::fold_with(seq, &options).unwrap();
    assert_relative_eq!(folded.mfe(), super::dg(seq, None), epsilon = 0.2);
}

#[test]
fn test_fold_s1() {
    // not throw
    super::dg(b"ATGGATTTAGATAGAT", None);
}

/// Gather a cache of the folded structure.
#[test]
fn test_fold_cache() {
    let seq = b"GGGAGGTCGTTACATCTGGGTAACACCGGTACTGATCCGGTGACCTCCC";
    let cache = super::dg_cache(seq, None);
    let seq_dg = super::dg(seq.as_slice(), None);

    assert_eq!(cache.len(), seq.len());
    assert_relative_eq!(seq_dg, cache[0][seq.len() - 1], epsilon = 0.01);

    // nothing folds below the diagonal or over short spans
    assert_eq!(cache[5][2], f64::INFINITY);
    assert_eq!(cache[0][3], f64::INFINITY);
}

/// DNA folding to find min energy secondary structure.
#[test]
fn test_fold_dna() {
    // UNAFold's estimates for free energy estimates of DNA oligos
    let unafold_dgs = [
        ("GGGAGGTCGTTACATCTGGGTAACACCGGTACTGATCCGGTGACCTCCC", -10.94), // branched structure
        (
            "GGGAGGTCGCTCCAGCTGGGAGGAGCGTTGGGGGTATATACCCCCAACACCGGTACTGATCCGGTGACCTCCC",
            -23.4,
        ), // branched structure
        ("TAGCTCAGCTGGGAGAGCGCCTGCTTTGCACGCAGGAGGT", -6.85),
        ("TGAGACGGAAGGGGATGATTGTCCCCTTCCGTCTCA", -18.10),
        ("ACCCCCTCCTTCCTTGGATCAAGGGGCTCAA", -3.65),
    ];

    for (seq, ufold) in unafold_dgs {
        let d = super::dg(seq.as_bytes(), Some(37.0));

        // a 60% difference
        let delta = (0.6 * d.min(ufold)).abs();
        assert_relative_eq!(d, ufold, epsilon = delta);
    }
}

/// A hairpin with a four base stem.
#[test]
fn test_fold_hairpin() {
    let folded = super::fold(b"GGGGAAAACCCC", None);
    assert_eq!(folded.dot_bracket(), "((((....))))");
    assert_relative_eq!(folded.mfe(), -3.5, epsilon = 1e-9);
    assert_relative_eq!(super::dg(b"GGGGAAAACCCC", None), -3.5);

    let descs: Vec<String> = folded.values().iter().map(|v| v.desc.to_string()).collect();
    assert_eq!(
        descs,
        ["STACK:GG/CC", "STACK:GG/CC", "STACK:GG/CC", "HAIRPIN:GA/CA"]
    );

    // case doesn't matter
    assert_eq!(super::fold(b"ggggaaaacccc", None), folded);
}

/// A single mismatch inside an RNA helix is a 1x1 internal loop.
#[test]
fn test_fold_rna_single_mismatch() {
    let folded = super::fold(b"GGGGAGGGGUUUUCCCCACCCC", None);
    assert_eq!(folded.dot_bracket(), "((((.((((....)))).))))");
    assert!(
        folded
            .values()
            .iter()
            .any(|v| v.desc.to_string() == "STACK:GAG/CAC" && v.ij == [(3, 18)])
    );

    let params = rna();
    let seq = b"GGGGAGGGGUUUUCCCCACCCC";
    let e = super::internal_loop(seq, 3, 5, 18, 16, &params).unwrap();
    assert_relative_eq!(params.to_kcal(e), 0.4, epsilon = 1e-9);
}

#[test]
fn test_fold_rna_hairpin() {
    let folded = super::fold(b"GGGGAAAUCCCC", None);
    assert_eq!(folded.dot_bracket(), "((((....))))");
    assert_relative_eq!(folded.mfe(), -4.15, epsilon = 1e-9);
}

/// Two hairpins side by side split the exterior loop.
#[test]
fn test_fold_exterior_split() {
    let seq = b"GGGGAAAACCCCTTTTTGGGGAAAACCCC";
    let folded = super::fold(seq, None);
    assert_eq!(folded.dot_bracket(), "((((....)))).....((((....))))");

    let cache = super::dg_cache(seq, None);
    let last = seq.len() - 1;
    assert_relative_eq!(
        cache[0][last],
        cache[0][11] + cache[12][last],
        epsilon = 1e-9
    );
    assert_relative_eq!(folded.mfe(), cache[0][last], epsilon = 1e-9);

    let left: f64 = folded
        .values()
        .iter()
        .filter(|v| v.ij[0].1 <= 11)
        .map(|v| v.e)
        .sum();
    assert_relative_eq!(left, cache[0][11], epsilon = 1e-9);
}

/// Sequences too short to hold a stable structure fold to nothing.
#[test]
fn test_fold_short() {
    for seq in [&b"AAAA"[..], b"", b"GCAGC", b"GGAACC", b"CCCCC"] {
        let folded = super::fold(seq, None);
        assert!(folded.is_empty(), "{seq:?}");
        assert_eq!(folded.dot_bracket(), "");
        assert_eq!(folded.mfe(), f64::INFINITY);
    }

    // every DNA pentamer
    for code in 0..4usize.pow(5) {
        let seq: Vec<u8> = (0..5).map(|k| b"ACGT"[(code >> (2 * k)) & 3]).collect();
        assert!(super::fold(&seq, None).is_empty());
    }
}

#[test]
fn test_fold_is_deterministic() {
    let seq = b"TAGCTCAGCTGGGAGAGCGCCTGCTTTGCACGCAGGAGGT";
    let first = super::fold(seq, None);
    let second = super::fold(seq, None);
    assert_eq!(first, second);
    assert_eq!(first.dot_bracket(), second.dot_bracket());
    assert_eq!(first.mfe(), second.mfe());
}

#[test]
fn test_dot_bracket_balanced() {
    let seqs = [
        &b"GGGAGGTCGTTACATCTGGGTAACACCGGTACTGATCCGGTGACCTCCC"[..],
        b"TGAGACGGAAGGGGATGATTGTCCCCTTCCGTCTCA",
        b"ACCCCCTCCTTCCTTGGATCAAGGGGCTCAA",
        b"ACGCTCACCGTGCCCAGTGAGCGA",
        b"GGGGAAAUCCCC",
    ];
    for seq in seqs {
        let folded = super::fold(seq, None);
        assert_balanced(&folded);
        assert!(folded.dot_bracket().len() <= seq.len());
        for v in folded.values() {
            let (i, j) = v.ij[0];
            assert!(j - i >= super::MIN_LOOP_SEPARATION);
        }
    }
}

fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .rev()
        .map(|b| match b {
            b'A' => b'T',
            b'T' => b'A',
            b'G' => b'C',
            _ => b'G',
        })
        .collect()
}

/// The dot bracket of the other strand, padded to the sequence length.
fn mirror(db: &str, len: usize) -> String {
    format!("{db:.<len$}")
        .chars()
        .rev()
        .map(|c| match c {
            '(' => ')',
            ')' => '(',
            c => c,
        })
        .collect()
}

/// A sequence and its reverse complement fold into mirror images.
#[test]
fn test_mirror_symmetry() {
    let seq = b"GGGAGGTCGTTACATCTGGGTAACACCGGTACTGATCCGGTGACCTCCC";
    let other = reverse_complement(seq);
    assert_ne!(other, seq);

    let folded = super::fold(seq, None);
    let other_folded = super::fold(&other, None);
    assert_eq!(
        format!("{:.<1$}", other_folded.dot_bracket(), seq.len()),
        mirror(&folded.dot_bracket(), seq.len())
    );

    // a self complementary sequence is its own mirror
    let seq = b"GGGGAATTCCCC";
    assert_eq!(reverse_complement(seq), seq);
    let db = super::fold(seq, None).dot_bracket();
    assert_eq!(db, "((((....))))");
    assert_eq!(mirror(&db, seq.len()), db);

    // hairpin mismatches read the loop bases, which differ between strands
    let seq = b"GGGGAAAACCCC";
    let other = super::fold(&reverse_complement(seq), None);
    assert_eq!(other.dot_bracket(), "((((....))))");
    assert_ne!(super::dg(seq, None), other.mfe());
}

/// Heating never stabilises the hairpin and eventually melts it.
#[test]
fn test_fold_melts() {
    let seq = b"GGGGAAAACCCC";
    let mut last = super::dg(seq, Some(20.0));
    for temp in [37.0, 50.0, 70.0, 90.0, 110.0, 150.0] {
        let next = super::dg(seq, Some(temp));
        assert!(next >= last, "{temp}: {next} < {last}");
        last = next;
    }

    let melted = super::fold(seq, Some(150.0));
    assert!(melted.is_empty());
    assert_eq!(melted.mfe(), f64::INFINITY);
}

/// Fold a multibranch structure.
#[test]
fn test_multibranch() {
    let seq = b"GGGAGGTCGTTACATCTGGGTAACACCGGTACTGATCCGGTGACCTCCC"; // branch

    let folded = super::fold(seq, None);
    assert_eq!(folded.mfe(), super::dg(seq, None));
    let sum: f64 = folded.values().iter().map(|v| v.e).sum();
    assert_relative_eq!(sum, folded.mfe(), epsilon = 1e-9);
    assert!(
        folded
            .values()
            .iter()
            .any(|v| matches!(v.desc, Desc::Bifurcation(..)) && v.ij.contains(&(7, 41)))
    );
}

#[test]
fn test_fold_many() {
    let seqs = [&b"GGGGAAAACCCC"[..], b"EASFEASFAST", b"GGGGAAAUCCCC"];
    let results = super::fold_many(&seqs, &FoldOptions::default());
    assert_eq!(results.len(), 3);
    assert_eq!(results[0], Ok(super::fold(seqs[0], None)));
    assert!(results[1].as_ref().is_err_and(FoldError::is_alphabet));
    assert_eq!(results[2], Ok(super::fold(seqs[2], None)));
}

/// Every cell is settled once the context exists.
#[test]
fn test_context_filled() {
    let ctx = Context::new(b"GGGAGGTCGTTACATCTGGGTAACACCGGTACTGATCCGGTGACCTCCC", None).unwrap();
    let n = ctx.len();
    assert_relative_eq!(ctx.temp(), 310.15, epsilon = 1e-9);
    for i in 0..n {
        for j in i..n {
            for m in [ctx.v(), ctx.w()] {
                let cell = &m[(i, j)];
                assert_ne!(cell, &Cell::Unresolved, "({i}, {j})");
                if j - i < super::MIN_LOOP_SEPARATION {
                    assert_eq!(cell, &Cell::Invalid);
                }
            }
        }
    }
    assert!(ctx.v().get(3, 2).is_none());
    assert!(ctx.v().get(0, n).is_none());
}

/// Reading a cell the fill hasn't reached is an error, not a guess.
#[test]
fn test_unfilled_cells() {
    let energies = Arc::clone(Models::shared().dna());
    let params = energies.params(37.0, 100);
    let seq = b"GGGGAAAACCCC".to_vec();
    let n = seq.len();
    let ctx = Context {
        energies,
        params,
        seq,
        v: Matrix::new(n),
        w: Matrix::new(n),
    };

    assert_eq!(
        super::w(&ctx, 0, n - 1),
        Err(FoldError::Fill {
            cache: "W",
            i: 1,
            j: n - 1
        })
    );
    assert_eq!(
        super::v(&ctx, 0, n - 1),
        Err(FoldError::Fill {
            cache: "V",
            i: 1,
            j: 8
        })
    );
}

#[test]
fn test_isolated_pair() {
    let seq = b"TTTTCTTTTGTTTT";
    let ctx = Context::new(seq, None).unwrap();
    let cell = ctx.v()[(4, 9)].structure().unwrap();
    assert_eq!(cell.desc, Desc::Isolated);
    assert_eq!(cell.e, ctx.params().isolated);
    assert!(ctx.folded().is_empty());
}

/// Create a pair for stack checking.
#[test]
fn test_pair() {
    let seq = b"ATGGAATAGTG";
    assert_eq!(super::calc_pair(seq, 0, 1, 9, 10).as_slice(), b"AT/TG");
    assert_eq!(super::calc_pair(seq, -1, 1, 9, 10).as_slice(), b".T/TG");
}

/// Calc delta G of a stack.
#[test]
fn test_stack() {
    let seq = b"GCTCAGCTGGGAGAGC";
    let params = dna();
    let e = super::calc_stack(seq, 1, 2, 14, 13, &params).unwrap();
    assert_relative_eq!(params.to_kcal(e), -1.29, epsilon = 0.01);

    let seq = b"GCUCAGCUGGGAGAGC";
    let params = rna();
    let e = super::calc_stack(seq, 1, 2, 14, 13, &params).unwrap();
    assert_relative_eq!(params.to_kcal(e), -2.1, epsilon = 0.1);
}

/// Calc delta G calc of a bulge.
#[test]
fn test_bulge() {
    // bulge of CAT on one side and AG on other
    // pg 429 of SantaLucia, 2004
    let seq = b"ACCCCCATCCTTCCTTGAGTCAAGGGGCTCAA";
    let params = dna();

    let pair_dg = super::bulge(seq, 5, 7, 18, 17, &params).unwrap();
    assert_relative_eq!(3.22, params.to_kcal(pair_dg), epsilon = 0.4);
}

/// Calc delta G of a hairpin structure.
#[test]
fn test_hairpin() {
    let params = dna();

    // = b"CCTTGG"
    let seq = b"ACCCCCTCCTTCCTTGGATCAAGGGGCTCAA";
    let hairpin_dg = super::hairpin(seq, 11, 16, &params).unwrap();
    // differs from Unafold
    assert_relative_eq!(params.to_kcal(hairpin_dg), 4.3, epsilon = 1.0);

    // page 428 of SantaLucia, 2004
    // = b"CGCAAG"
    let seq = b"ACCCGCAAGCCCTCCTTCCTTGGATCAAGGGGCTCAA";
    let hairpin_dg = super::hairpin(seq, 3, 8, &params).unwrap();
    assert_relative_eq!(0.67, params.to_kcal(hairpin_dg), epsilon = 0.1);

    // loop of seven closed by C-G with a U/C mismatch
    let seq = b"CUUUGCACG";
    let params = rna();
    let hairpin_dg = super::hairpin(seq, 0, 8, &params).unwrap();
    assert_relative_eq!(params.to_kcal(hairpin_dg), 5.1, epsilon = 0.01);

    assert_eq!(super::hairpin(seq, 0, 3, &params), None);
}

/// Calc dg of an internal loop.
#[test]
fn test_internal_loop() {
    let seq = b"ACCCCCTCCTTCCTTGGATCAAGGGGCTCAA";
    let i = 6;
    let j = 21;
    let params = dna();
    let dg = super::internal_loop(seq, i, i + 4, j, j - 4, &params).unwrap();
    assert_relative_eq!(params.to_kcal(dg), 3.5, epsilon = 0.1);

    // one sided loops are bulges
    assert_eq!(super::internal_loop(seq, i, i + 1, j, j - 4, &params), None);
}

/// Uneven sides of an internal loop cost extra per base of difference.
#[test]
fn test_internal_loop_asymmetry() {
    let params = dna();

    // 3x3, GA/CA and AG/AC mismatches on either side
    let even = b"GAAAGTTTTCAAAC";
    let even_dg = super::internal_loop(even, 0, 4, 13, 9, &params).unwrap();

    // 2x4, same length and mismatches
    let uneven = b"GAAGTTTTCAAAAC";
    let uneven_dg = super::internal_loop(uneven, 0, 3, 13, 8, &params).unwrap();

    assert_eq!(uneven_dg - even_dg, 2 * params.asymmetry);
}

#[test]
fn test_multi_branch_penalty() {
    // two helices abutting each other and the closing pair
    let seq = b"GGGGAAAACCCCGGGGAAAACCCC";
    let params = dna();
    let (a, d) = (params.multibranch[0], params.multibranch[3]);
    let branches = [(1, 11), (12, 22)];
    let multi = super::multi_branch(seq, 0, 23, &branches, &params);
    assert_eq!(multi.unpaired, 0);
    assert_eq!(multi.e, a + d);

    // the same loop closed by A-T
    let seq = b"AGGGAAAACCCCGGGGAAAACCCT";
    let multi = super::multi_branch(seq, 0, 23, &branches, &params);
    assert_eq!(multi.e, a + d + params.closing_at);
}
