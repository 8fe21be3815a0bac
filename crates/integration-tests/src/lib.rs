//! End-to-end tests live under `tests/`; see `tests/common` for the harness.
