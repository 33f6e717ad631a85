//! Algorithm constants and runtime configuration defaults

/// Default edge length N of extracted patterns
pub const DEFAULT_TILE_SIZE: usize = 3;

/// Default output width in cells
pub const DEFAULT_OUTPUT_WIDTH: usize = 48;

/// Default output height in cells
pub const DEFAULT_OUTPUT_HEIGHT: usize = 48;

/// Default dihedral symmetry level (full D4)
pub const DEFAULT_SYMMETRY: u8 = 8;

// Support counters are u16, so pattern indices must fit one
/// Maximum number of distinct patterns the solver supports
pub const MAX_PATTERN_COUNT: usize = u16::MAX as usize;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed output dimension in cells
pub const MAX_OUTPUT_DIMENSION: usize = 10_000;

// Strictly below any achievable entropy gap between unequal cells
/// Scale of the deterministic tie-breaking jitter added during observation
pub const ENTROPY_JITTER: f64 = 1e-6;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";

// Progress bar display settings
/// Minimum cell count before a progress bar is worth showing
pub const PROGRESS_MIN_CELLS: usize = 512;
