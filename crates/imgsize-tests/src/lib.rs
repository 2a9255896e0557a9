//! End-to-end tests for the imgsize crates.
//!
//! Each test runs the library pipeline the binary uses: validate, decode,
//! compute the target size, resample, write, and reads the result back.
