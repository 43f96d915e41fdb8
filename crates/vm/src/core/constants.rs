/// The divisor separating an instruction word's opcode from its parameter mode digits.
pub const OPCODE_DIVISOR: i64 = 100;

/// The base of each parameter mode digit.
pub const MODE_BASE: i64 = 10;

/// The maximum number of operands any instruction consumes.
pub const MAX_OPERANDS: usize = 3;

/// The initial capacity reserved past the loaded program image.
pub const MEMORY_HEADROOM: usize = 1024;

/// Writes at most this many words past the end of the dense memory region grow it. Writes
/// further out are kept in a sparse map.
pub const DENSE_GAP: usize = 4096;
