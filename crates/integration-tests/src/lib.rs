//! End-to-end tests for the errata rendering boundary live under `tests/`
