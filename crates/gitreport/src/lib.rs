// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitreport library
//!
//! This module exports the configuration and pipeline of the gitreport
//! binary for use in integration tests and as a library.

pub mod config;
pub mod pipeline;
pub mod settings;
