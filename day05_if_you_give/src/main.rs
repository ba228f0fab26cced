use sdk::*;
use crate::almanac::Almanac;
use crate::remap::CategoryOrder;

mod almanac;
mod remap;

fn main() -> Result<()> {
    run(answer)
}

fn answer(mode: Mode, lines: &[String]) -> Result<u64> {
    let almanac = Almanac::parse(lines, CategoryOrder::standard())?;
    debug!("Parsed almanac: {almanac:?}");
    match mode {
        Mode::PartOne => {
            debug!("Final seed locations: {:?}", almanac.locations());
            Ok(almanac.lowest_location()?)
        }
        // Seed ranges are left unsolved
        Mode::PartTwo => Err(SolveError::NotImplemented(mode).into()),
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use sdk::{Mode, SolveError};
    use crate::answer;

    const EXAMPLE: &str = indoc! {"
        seeds: 79 14 55 13

        seed-to-soil map:
        50 98 2
        52 50 48

        soil-to-fertilizer map:
        0 15 37
        37 52 2
        39 0 15

        fertilizer-to-water map:
        49 53 8
        0 11 42
        42 0 7
        57 7 4

        water-to-light map:
        88 18 7
        18 25 70

        light-to-temperature map:
        45 77 23
        81 45 19
        68 64 13

        temperature-to-humidity map:
        0 69 1
        1 0 69

        humidity-to-location map:
        60 56 37
        56 93 4
    "};

    fn lines(input: &str) -> Vec<String> {
        input.lines().map(str::to_owned).filter(|l| !l.is_empty()).collect()
    }

    #[test]
    fn part_one_lowest_location() {
        assert_eq!(answer(Mode::PartOne, &lines(EXAMPLE)).unwrap(), 35);
        assert!(answer(Mode::PartOne, &lines("seeds: x")).is_err());
    }

    #[test]
    fn part_two_not_implemented() {
        let error = answer(Mode::PartTwo, &lines(EXAMPLE)).unwrap_err();
        assert_eq!(
            error.downcast_ref::<SolveError>(),
            Some(&SolveError::NotImplemented(Mode::PartTwo)),
        );
    }
}
