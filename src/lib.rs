//! Board API Load Tests
//!
//! Load and performance test programs for the board HTTP API (authentication,
//! signup, post listing). Virtual-user scheduling, request dispatch, and
//! metric aggregation are delegated to [goose](https://docs.rs/goose); this
//! crate only defines the load profiles, the per-iteration request logic, and
//! the pass/fail thresholds evaluated when a run ends.
//!
//! ## Running Tests
//!
//! ```bash
//! # Start the board API on localhost:8080, then run a scenario:
//! cargo run --release --bin load_test
//! cargo run --release --bin post_list_test
//!
//! # Goose's own flags (e.g. --host) may override the built-in defaults:
//! cargo run --release --bin stress_test -- --host http://localhost:9090
//!
//! # Live verification tests (soft-skip when the server is down):
//! cargo test
//! ```

pub mod checks;
pub mod context;
pub mod helpers;
pub mod profile;
pub mod setup;
pub mod thresholds;


/// Base URL for the board API under test
pub const BASE_URL: &str = "http://localhost:8080";

/// Fixed known-good account used by the setup phase of the post-list test.
/// Reused across runs; the account must already exist in the target system.
pub const TEST_EMAIL: &str = "test@example.com";

/// Password shared by the fixed test account and every generated signup
pub const TEST_PASSWORD: &str = "Test1234!@";
