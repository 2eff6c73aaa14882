//! Property-based tests cross-checking the big number types against native and reference
//! arithmetic.
