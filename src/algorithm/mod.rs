/// Packed possibility bitsets over pattern indices
pub mod bitset;
/// Run driver and output rendering
pub mod executor;
/// Lowest-entropy cell selection and weighted collapse
pub mod observer;
/// Arc-consistency propagation over the elimination worklist
pub mod propagation;
/// Mutable superposition state with incremental entropy bookkeeping
pub mod wave;

pub use executor::{OverlappingModel, RunStatus};
pub use observer::ObserveOutcome;
pub use wave::Wave;
