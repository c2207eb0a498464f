/// Whether `seq` consists of DNA bases only.
pub fn is_dna(seq: &[u8]) -> bool {
    seq.iter().all(|b| b"ACGT".contains(b))
}

/// Whether `seq` consists of RNA bases only.
pub fn is_rna(seq: &[u8]) -> bool {
    seq.iter().all(|b| b"ACGU".contains(b))
}

#[derive(Debug, Default)]
pub struct ByteStr<B>(pub B);

impl<B: AsRef<[u8]>> std::fmt::Display for ByteStr<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .as_ref()
                .iter()
                .map(|&b| b as char)
                .collect::<String>()
        )
    }
}

pub trait ToIsize {
    fn to_isize(self) -> isize;
}

impl ToIsize for usize {
    fn to_isize(self) -> isize {
        self as isize
    }
}

impl ToIsize for isize {
    fn to_isize(self) -> isize {
        self
    }
}

impl ToIsize for i32 {
    fn to_isize(self) -> isize {
        self as isize
    }
}

/// Round to two decimal
pub fn round2(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabets() {
        assert!(is_dna(b"ACGT"));
        assert!(is_dna(b""));
        assert!(!is_dna(b"ACGU"));
        assert!(is_rna(b"ACGU"));
        assert!(!is_rna(b"ACGTN"));
    }

    #[test]
    fn byte_str() {
        assert_eq!(ByteStr(b"GC/CG").to_string(), "GC/CG");
    }

    #[test]
    fn rounding() {
        assert_eq!(round2(-3.456), -3.46);
        assert_eq!(round2(f64::INFINITY), f64::INFINITY);
    }
}
