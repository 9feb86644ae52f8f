// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod api;
pub mod cli;
pub mod commands;
pub mod dashboard;
pub mod db;
pub mod models;
pub mod overview;
pub mod range;
pub mod settings;
pub mod utils;
