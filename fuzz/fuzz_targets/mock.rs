use arbitrary::{Arbitrary, Unstructured};
use strftime_sql::Time;

#[derive(Debug)]
pub(super) struct MockTime {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    microsecond: u32,
    day_of_week: u8,
    day_of_year: u16,
}

// Generate fields within the ranges the `Time` contract guarantees.
impl<'a> Arbitrary<'a> for MockTime {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self {
            year: u.arbitrary()?,
            month: u.int_in_range(1..=12)?,
            day: u.int_in_range(1..=31)?,
            hour: u.int_in_range(0..=23)?,
            minute: u.int_in_range(0..=59)?,
            second: u.int_in_range(0..=59)?,
            microsecond: u.int_in_range(0..=999_999)?,
            day_of_week: u.int_in_range(0..=6)?,
            day_of_year: u.int_in_range(1..=366)?,
        })
    }
}

impl Time for MockTime {
    fn year(&self) -> i32 {
        self.year
    }

    fn month(&self) -> u8 {
        self.month
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn hour(&self) -> u8 {
        self.hour
    }

    fn minute(&self) -> u8 {
        self.minute
    }

    fn second(&self) -> u8 {
        self.second
    }

    fn microsecond(&self) -> u32 {
        self.microsecond
    }

    fn day_of_week(&self) -> u8 {
        self.day_of_week
    }

    fn day_of_year(&self) -> u16 {
        self.day_of_year
    }
}
