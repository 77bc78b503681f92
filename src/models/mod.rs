// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: accepted formats, the coordinate mapper and its readings.

pub mod format;
pub mod mapper;
pub mod reading;
pub mod settings;
