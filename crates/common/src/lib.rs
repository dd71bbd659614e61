// VODB - Visual Object Debugger
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! VODB Common - Shared types and utilities for VODB components
//!
//! This crate provides the variable snapshot model exchanged between the
//! debug-event source, the changelog engine and the panel server, together
//! with the logging setup used by every VODB binary and test suite.

/// Variable snapshot model: variables, relations, edge identity and node id prefixes
pub mod types;

/// Logging setup and utilities for consistent logging across VODB components
pub mod logging;

pub use logging::*;
pub use types::*;
