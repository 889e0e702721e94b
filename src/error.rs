use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("max level {0} out of range 1..={limit}", limit = crate::options::MAX_LEVEL_LIMIT)]
    InvalidMaxLevel(usize),
    #[error("promotion probability {0} must be in (0, 1)")]
    InvalidProbability(f64),
}
