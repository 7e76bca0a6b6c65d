//! Tests for the CLI module
//!
//! Argument parsing, configuration file handling and script parsing.
