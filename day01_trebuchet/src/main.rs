use std::collections::BTreeMap;
use sdk::*;
use sdk::anyhow::anyhow;

lazy_static! {
    static ref DIGITS: BTreeMap<&'static str, u32> = [
        ("one", 1),
        ("two", 2),
        ("three", 3),
        ("four", 4),
        ("five", 5),
        ("six", 6),
        ("seven", 7),
        ("eight", 8),
        ("nine", 9),
    ].into_iter().collect();
}

fn main() -> Result<()> {
    run(|mode, lines| calibration_sum(lines, mode))
}

fn calibration_sum(lines: &[String], mode: Mode) -> Result<u32> {
    let mut sum = 0;
    for (i, line) in lines.iter().enumerate() {
        let value = calibration_value(line, mode)
            .ok_or_else(|| anyhow!("Unable to extract digits from line {}: {line}", i + 1))?;
        trace!("Calibration for {line}: {value}");
        sum += value;
    }
    Ok(sum)
}

/// First and last digit of `line` read as a two digit number.
fn calibration_value(line: &str, mode: Mode) -> Option<u32> {
    let mut digits = digits(line, mode);
    let first = digits.next()?;
    let last = digits.last().unwrap_or(first);
    Some(first * 10 + last)
}

// Every digit in order of where it starts; spelled words may overlap ("twone" is 2, 1)
fn digits(line: &str, mode: Mode) -> impl Iterator<Item=u32> + '_ {
    let bytes = line.as_bytes();
    (0..bytes.len()).filter_map(move |start| {
        let rest = &bytes[start..];
        if rest[0].is_ascii_digit() {
            return Some(u32::from(rest[0] - b'0'));
        }
        match mode {
            Mode::PartOne => None,
            Mode::PartTwo => DIGITS
                .iter()
                .find(|(word, _)| rest.starts_with(word.as_bytes()))
                .map(|(_, value)| *value),
        }
    })
}
