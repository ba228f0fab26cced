use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use sdk::*;
use sdk::anyhow::anyhow;
use sdk::winnow::ascii::{alpha1, dec_uint, digit1};
use sdk::winnow::combinator::{preceded, separated};
use sdk::winnow::{Parser, PResult};

fn main() -> Result<()> {
    run(|mode, lines| {
        let games = parse_games(lines)?;
        debug!("Parsed {} games", games.len());
        let answer = match mode {
            Mode::PartOne => possible_id_sum(&games) as u64,
            Mode::PartTwo => minimum_power_sum(&games),
        };
        Ok(answer)
    })
}

fn parse_games(lines: &[String]) -> Result<Vec<Game>> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            Game::parse
                .parse(line.as_str())
                .map_err(|e| anyhow!("Unable to parse game on line {}: {e}", i + 1))
        })
        .collect()
}

/// Sum of the IDs of games that could have been played with the bag in [`Color::limit`].
///
/// An ID listed twice counts once, and not at all if either game is impossible.
fn possible_id_sum(games: &[Game]) -> usize {
    let all: BTreeSet<usize> = games.iter().map(|g| g.id).collect();
    let impossible: BTreeSet<usize> = games
        .iter()
        .filter(|g| !g.is_possible())
        .map(|g| g.id)
        .collect();
    all.difference(&impossible).sum()
}

/// Sum of the minimum-bag powers, one per ID. A repeated ID keeps the power of its last game.
fn minimum_power_sum(games: &[Game]) -> u64 {
    let mut powers: BTreeMap<usize, u64> = BTreeMap::new();
    for game in games {
        let power = game.power();
        trace!("Game {}: minimum bag {:?}, power {power}", game.id, game.minimum_bag());
        powers.insert(game.id, power);
    }
    powers.values().sum()
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Ord, Eq)]
enum Color {
    Red,
    Green,
    Blue,
}

impl Color {
    // Cubes of each color in the bag for part one
    fn limit(self) -> u32 {
        match self {
            Color::Red => 12,
            Color::Green => 13,
            Color::Blue => 14,
        }
    }
}

impl FromStr for Color {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "red" => Ok(Color::Red),
            "green" => Ok(Color::Green),
            "blue" => Ok(Color::Blue),
            other => Err(ParseError(format!("can't parse `{other}` as Color"))),
        }
    }
}

type Reveal = BTreeMap<Color, u32>;

#[derive(Debug, Clone)]
struct Game {
    id: usize,
    reveals: Vec<Reveal>,
}

impl Game {
    // Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red
    fn parse(input: &mut &str) -> PResult<Self> {
        (
            preceded("Game ", digit1.try_map(usize::from_str)),
            preceded(": ", separated(1.., Self::parse_reveal, "; ")),
        )
            .map(|(id, reveals): (usize, Vec<Reveal>)| Game { id, reveals })
            .parse_next(input)
    }

    // 1 green, 3 red, 6 blue
    fn parse_reveal(input: &mut &str) -> PResult<Reveal> {
        separated(1.., Self::parse_count, ", ")
            .map(|counts: Vec<(Color, u32)>| counts.into_iter().collect())
            .parse_next(input)
    }

    // 3 red
    fn parse_count(input: &mut &str) -> PResult<(Color, u32)> {
        (dec_uint::<_, u32, _>, ' ', alpha1.parse_to::<Color>())
            .map(|(count, _, color)| (color, count))
            .parse_next(input)
    }

    fn is_possible(&self) -> bool {
        for reveal in &self.reveals {
            for (color, count) in reveal {
                if *count > color.limit() {
                    debug!("Game {}: {count} {color:?} is more than {}", self.id, color.limit());
                    return false;
                }
            }
        }
        true
    }

    // The fewest cubes of each color that make every reveal possible
    fn minimum_bag(&self) -> Reveal {
        let mut bag = Reveal::new();
        for reveal in &self.reveals {
            for (color, count) in reveal {
                let seen = bag.entry(*color).or_default();
                *seen = (*seen).max(*count);
            }
        }
        bag
    }

    // Colors never revealed don't take part in the product
    fn power(&self) -> u64 {
        self.minimum_bag().values().map(|c| u64::from(*c)).product()
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use sdk::winnow::Parser;
    use crate::{minimum_power_sum, parse_games, possible_id_sum, Color, Game, Reveal};

    const EXAMPLE: &str = indoc! {"
        Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green
        Game 2: 1 blue, 2 green; 3 green, 4 blue, 1 red; 1 green, 1 blue
        Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red
        Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red
        Game 5: 6 red, 1 blue, 3 green; 2 blue, 1 red, 2 green
    "};

    fn example() -> Vec<Game> {
        let lines: Vec<String> = EXAMPLE.lines().map(str::to_owned).collect();
        parse_games(&lines).unwrap()
    }

    #[test]
    fn parse_reveals() {
        let game = Game::parse
            .parse("Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red")
            .unwrap();
        assert_eq!(game.id, 3);
        let expected: Vec<Reveal> = vec![
            [(Color::Green, 8), (Color::Blue, 6), (Color::Red, 20)].into_iter().collect(),
            [(Color::Blue, 5), (Color::Red, 4), (Color::Green, 13)].into_iter().collect(),
            [(Color::Green, 5), (Color::Red, 1)].into_iter().collect(),
        ];
        assert_eq!(game.reveals, expected);
    }

    #[test]
    fn parse_failures() {
        let cases = [
            "Game 1: 3 purple",
            "Game one: 3 red",
            "Game 1 3 red",
            "Game 1: 3 red;",
            "Round 1: 3 red",
        ];
        for case in cases {
            assert!(Game::parse.parse(case).is_err(), "{case}");
        }
    }

    #[test]
    fn possible_games() {
        assert_eq!(possible_id_sum(&example()), 8);
    }

    #[test]
    fn duplicate_ids_count_once() {
        let lines = vec![
            "Game 7: 1 red".to_owned(),
            "Game 7: 2 red".to_owned(),
            "Game 8: 1 blue".to_owned(),
            "Game 8: 15 blue".to_owned(),
        ];
        assert_eq!(possible_id_sum(&parse_games(&lines).unwrap()), 7);
    }

    #[test]
    fn duplicate_ids_keep_last_power() {
        let lines = vec![
            "Game 7: 2 red, 3 blue".to_owned(),
            "Game 7: 5 green".to_owned(),
            "Game 8: 4 blue".to_owned(),
        ];
        assert_eq!(minimum_power_sum(&parse_games(&lines).unwrap()), 9);
    }

    #[test]
    fn large_game_ids() {
        let game = Game::parse.parse("Game 4294967296: 1 red").unwrap();
        assert_eq!(game.id, 4_294_967_296);
    }

    #[test]
    fn powers() {
        let powers: Vec<_> = example().iter().map(Game::power).collect();
        assert_eq!(powers, vec![48, 12, 1560, 630, 36]);
        assert_eq!(minimum_power_sum(&example()), 2286);
    }

    #[test]
    fn power_skips_unseen_colors() {
        let game = Game::parse.parse("Game 1: 3 red; 4 red, 2 blue").unwrap();
        assert_eq!(game.power(), 8);
    }

    #[test]
    fn bad_line_reports_position() {
        let lines = vec!["Game 1: 1 red".to_owned(), "Game 2 1 red".to_owned()];
        let error = parse_games(&lines).unwrap_err();
        assert!(error.to_string().contains("line 2"), "{error}");
    }
}
