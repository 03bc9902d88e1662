//! Integration tests that run builds against a stand-in compiler.

#![cfg(unix)]

mod build_tests;
mod common;
