// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! - `people`: roster inserts, updates and deletes
//! - `absences`: absence inserts, updates and deletes

pub mod absences;
pub mod people;

pub use absences::{delete_absence, delete_absences_for_person, insert_absence, update_absence};
pub use people::{delete_person, insert_person, update_person};
