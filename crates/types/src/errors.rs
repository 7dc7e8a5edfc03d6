pub type Result<T> = std::result::Result<T, PoolMathError>;

/// Every failure a pool conversion can report. None of them are recovered
/// internally; the caller decides what to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PoolMathError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("invalid price range: {0}")]
    InvalidRange(&'static str),
    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(&'static str),
    /// Outside `[MIN_TICK, MAX_TICK]`, or the sqrt ratio equivalent.
    #[error("tick out of bounds [-887272, 887272]: {0}")]
    OutOfBoundsTick(&'static str)
}
