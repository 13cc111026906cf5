// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{Absence, Shift};
use time::Date;

/// Resolves the shift an absence occupies on a given day.
///
/// # Arguments
///
/// * `absence` - The absence record
/// * `date` - The day to resolve
///
/// # Returns
///
/// The exception's shift when one exists for `date`, otherwise the
/// absence's default shift. Whether `date` lies inside the absence is
/// the caller's concern.
#[must_use]
pub fn effective_shift(absence: &Absence, date: Date) -> Shift {
    absence
        .exception_for(date)
        .unwrap_or(absence.default_shift)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::{PersonId, Reason};
    use time::macros::date;

    fn make_absence() -> Absence {
        let mut absence: Absence = Absence::new(
            PersonId::new(1),
            Reason::Ferias,
            date!(2024 - 03 - 01),
            date!(2024 - 03 - 05),
            Shift::Integral,
        );
        absence
            .set_exception(date!(2024 - 03 - 03), Shift::Matutino)
            .unwrap();
        absence
    }

    #[test]
    fn test_default_shift_without_exception() {
        let absence: Absence = make_absence();
        assert_eq!(effective_shift(&absence, date!(2024 - 03 - 01)), Shift::Integral);
        assert_eq!(effective_shift(&absence, date!(2024 - 03 - 05)), Shift::Integral);
    }

    #[test]
    fn test_exception_overrides_default() {
        let absence: Absence = make_absence();
        assert_eq!(effective_shift(&absence, date!(2024 - 03 - 03)), Shift::Matutino);
    }

    #[test]
    fn test_integral_covers_and_conflicts_with_everything() {
        for shift in Shift::ALL {
            assert!(Shift::Integral.covers(shift));
            assert!(Shift::Integral.conflicts_with(shift));
            assert!(shift.conflicts_with(Shift::Integral));
        }
    }

    #[test]
    fn test_half_shifts_do_not_collide() {
        assert!(!Shift::Matutino.conflicts_with(Shift::Vespertino));
        assert!(!Shift::Vespertino.conflicts_with(Shift::Matutino));
        assert!(!Shift::Matutino.covers(Shift::Vespertino));
        assert!(!Shift::Matutino.covers(Shift::Integral));
        assert!(Shift::Matutino.covers(Shift::Matutino));
    }
}
