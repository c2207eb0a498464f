use approx::assert_relative_eq;

use super::*;
use crate::Models;

fn dna37() -> Params {
    Models::shared().dna().params(37.0, 100)
}

#[test]
fn test_calc_d_g() {
    assert_relative_eq!(calc_d_g(-9.8, -24.4, 310.15), -2.23234, epsilon = 1e-9);
}

#[test]
fn test_scaled_stacks() {
    let params = dna37();
    assert_relative_eq!(params.temp, 310.15, epsilon = 1e-9);
    assert_eq!(params.nn.get(*b"GC/CG"), Some(-223));
    // read from the other strand
    assert_eq!(params.nn.get(*b"TG/AC"), params.nn.get(*b"CA/GT"));
    assert_relative_eq!(params.to_kcal(-223), -2.23);
}

#[test]
fn test_constants() {
    let params = dna37();
    assert_eq!(params.closing_at, 50);
    assert_eq!(params.asymmetry, 30);
    assert_eq!(params.isolated, 160_000);
    assert_eq!(params.multibranch, [260, 20, 20, 200]);

    let coarse = Models::shared().dna().params(37.0, 10);
    assert_eq!(coarse.isolated, 16_000);
    assert_eq!(coarse.scaled(0.26), 3);
}

#[test]
fn test_loop_extrapolation() {
    let params = dna37();
    let loops = &params.hairpin_loops;

    // 0 - 310.15 * -20.3 / 1000
    assert_eq!(loops.get(30), 630);

    let expected = calc_j_s(60, 30, 6.296, 310.15);
    assert_relative_eq!(params.to_kcal(loops.get(60)), expected, epsilon = 0.01);

    let mut last = loops.get(30);
    for len in 31..200 {
        let next = loops.get(len);
        assert!(next >= last, "{len}: {next} < {last}");
        last = next;
    }
}

#[test]
fn test_special_hairpins() {
    let params = dna37();
    assert_eq!(params.special_hairpin(b"CGAAG"), Some(-200));
    assert_eq!(params.special_hairpin(b"CGCAAG"), Some(-160));
    assert_eq!(params.special_hairpin(b"CGAAAG"), Some(-110));
    assert_eq!(params.special_hairpin(b"CGAAAAG"), None);
    assert_eq!(params.tri_loops.len(), 16);
    assert!(params.hexa_loops.is_empty());

    let rna = Models::shared().rna().params(37.0, 100);
    assert_eq!(rna.special_hairpin(b"CGAAG"), None);
    assert_eq!(rna.special_hairpin(b"CUUCGG"), Some(-300));
    assert_eq!(rna.tetra_loops.len(), 30);
}

#[test]
fn test_temperature_dependence() {
    let dna = Models::shared().dna();
    let cold = dna.params(20.0, 100);
    let hot = dna.params(90.0, 100);

    let (Some(c), Some(h)) = (cold.nn.get(*b"GG/CC"), hot.nn.get(*b"GG/CC")) else {
        panic!("missing stack");
    };
    assert!(c < h);
    assert!(cold.hairpin_loops.get(10) < hot.hairpin_loops.get(10));
}
