// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(feature = "markup")]
mod test_markup;
mod utils;
