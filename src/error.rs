use thiserror::Error;

pub type SeqResult<T> = Result<T, FoldError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FoldError {
    #[error("sequence mixes T and U, it is neither DNA nor RNA")]
    DnaOrRna,

    #[error("unknown base(s) '{0}': only A, C, G, T and U are accepted")]
    UnknownBp(String),

    #[error("scale must be between 1 and {max}, got {0}", max = crate::config::MAX_SCALE)]
    InvalidScale(i64),

    #[error("{cache}({i}, {j}) was read before it was filled")]
    Fill {
        cache: &'static str,
        i: usize,
        j: usize,
    },
}

impl FoldError {
    /// Whether the sequence itself was rejected.
    pub fn is_alphabet(&self) -> bool {
        matches!(self, FoldError::DnaOrRna | FoldError::UnknownBp(_))
    }
}
