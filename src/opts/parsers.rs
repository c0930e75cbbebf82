use std::str::FromStr;

use crate::prelude::*;

pub fn precision(value: &str) -> Result<usize> {
    match usize::from_str(value)? {
        value @ 4..=6 => Ok(value),
        value => Err(anyhow!("{} decimal digits are not supported, expected 4 to 6", value)),
    }
}
