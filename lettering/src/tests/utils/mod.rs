// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod asserts;
mod env;
mod provider;

pub(crate) use asserts::{assert_eq_glyphs, assert_rect, chars, positions};
pub(crate) use env::TestEnv;
pub(crate) use provider::BoxFontProvider;
