// Library target exists for the integration tests in tests/.
// The binary entry point is main.rs; this file re-declares the module tree
// so the test suite can import types via `wordling::session::*` etc.
// Most code is only exercised through the binary, so suppress dead_code
// warnings.
#![allow(dead_code)]

// Public: used directly by integration tests
pub mod app;
pub mod audio;
pub mod catalog;
pub mod config;
pub mod session;
pub mod ui;

// Private: only the binary's event loop needs it
mod event;
