// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for uploaded images, reading export and settings.

pub mod media;
pub mod serialization;
