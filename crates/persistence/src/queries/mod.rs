// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `people`: roster lookups
//! - `absences`: absence lookups

pub mod absences;
pub mod people;

pub use absences::list_absences;
pub use people::list_people;
