use thiserror::Error;

/// Unrecoverable faults. Any of these aborts the whole call; the driver
/// resets its sweep state before returning, so the instance stays usable.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ClipError {
    #[error("coordinate exceeds range bounds")]
    CoordinateOutOfRange,

    #[error("local minimum has no right bound")]
    MissingRightBound,

    #[error("intersection events could not be reordered onto adjacent edges")]
    IntersectionOrder,

    #[error("maxima pair missing or left unresolved")]
    MaximaPair,

    #[error("edge promoted past the end of its bound")]
    EdgePromotion,

    #[error("output ring hole linkage is broken")]
    HoleLinkage,

    #[error("zero denominator in extended-precision division")]
    ZeroDenominator,
}
