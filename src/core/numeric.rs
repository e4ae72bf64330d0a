//! Stat string parsing
//!
//! Weapon and unit characteristics arrive as free-form strings: flat numbers
//! ("4", "-1"), thresholds ("3+"), or dice averages ("D6", "D3+1", "2D6").
//! Everything resolves to an expected value. Garbage resolves to 0.

use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{char, digit1, multispace0};
use nom::combinator::{all_consuming, map_res, opt};
use nom::number::complete::double;
use nom::sequence::{preceded, terminated};
use nom::{IResult, Parser};

/// `[k]Dn[+m]` - mean of k n-sided dice plus a flat bonus
fn dice(input: &str) -> IResult<&str, f64> {
    let (input, count) = opt(map_res(digit1, str::parse::<u32>)).parse(input)?;
    let (input, _) = tag_no_case("d").parse(input)?;
    let (input, sides) = map_res(digit1, str::parse::<u32>).parse(input)?;
    let (input, bonus) =
        opt(preceded((multispace0, char('+'), multispace0), double)).parse(input)?;

    let mean = if sides == 0 {
        0.0
    } else {
        f64::from(count.unwrap_or(1)) * (f64::from(sides) + 1.0) / 2.0
    };
    Ok((input, mean + bonus.unwrap_or(0.0)))
}

/// Plain number, optionally written as a roll threshold ("3+")
fn flat(input: &str) -> IResult<&str, f64> {
    terminated(double, opt(char('+'))).parse(input)
}

/// Parse a stat string into its expected value
///
/// Never fails: empty or unparsable input yields 0.
pub fn parse_numeric(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match all_consuming(alt((dice, flat))).parse(trimmed) {
        Ok((_, value)) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Same as [`parse_numeric`] for a characteristic that may be missing
pub fn parse_optional(text: Option<&str>) -> f64 {
    text.map(parse_numeric).unwrap_or(0.0)
}
