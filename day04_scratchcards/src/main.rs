use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use sdk::*;
use sdk::anyhow::anyhow;

fn main() -> Result<()> {
    run(|mode, lines| {
        let cards = lines
            .iter()
            .enumerate()
            .map(|(i, line)| Card::parse(line).map_err(|e| e.context(format!("line {}", i + 1))))
            .collect::<Result<Vec<_>>>()?;
        debug!("Cards: {cards:?}");
        let answer = match mode {
            Mode::PartOne => total_points(&cards)?,
            Mode::PartTwo => tally(&cards),
        };
        Ok(answer)
    })
}

fn total_points(cards: &[Card]) -> Result<usize> {
    cards.iter().try_fold(0_usize, |total, card| {
        total
            .checked_add(card.points()?)
            .ok_or(anyhow!("Point total overflows at card {}", card.number))
    })
}

/// Total cards held once every win has been paid out in copies of the following cards.
fn tally(cards: &[Card]) -> usize {
    // card #, count
    let mut collected: BTreeMap<usize, usize> = BTreeMap::new();
    for card in cards {
        let num_collected = {
            let num_collected = collected.entry(card.number).or_default();
            *num_collected += 1;
            *num_collected
        };

        let matches = card.count_matches();
        if matches > 0 {
            let copies: Vec<_> = (0..matches).map(|i| i + 1 + card.number).collect();
            trace!("Card {}: {matches} matches, wins copies of {copies:?}", card.number);

            for card_num in copies {
                (*collected.entry(card_num).or_default()) += num_collected;
            }
        } else {
            trace!("Card {}: {matches} matches", card.number);
        }
    }
    // Copies of cards past the end of the table don't exist
    let known: BTreeSet<usize> = cards.iter().map(|c| c.number).collect();
    collected
        .iter()
        .filter(|(number, _)| known.contains(number))
        .map(|(_, count)| count)
        .sum()
}

#[derive(Debug, Clone)]
struct Card {
    number: usize,
    winning_numbers: BTreeSet<usize>,
    picked_numbers: BTreeSet<usize>,
}

impl Card {
    // Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53
    fn parse(input: &str) -> Result<Self> {
        trace!("Parsing {input}");
        let (header, body) = input.split_once(':')
            .ok_or(anyhow!("unable to split header and body of `{input}`"))?;
        let (card, card_number) = header.split_once(' ')
            .ok_or(anyhow!("unable to split 'Card' and card number"))?;
        if card != "Card" {
            return Err(anyhow!("Header {card} is not 'Card'"));
        }
        let card_number = usize::from_str(card_number.trim())?;

        let (winning_line, chosen_line) = body.split_once('|')
            .ok_or(anyhow!("Unable to split winning and chosen numbers of `{input}`"))?;

        fn parse_numbers(number_line: &str) -> Result<BTreeSet<usize>> {
            let mut numbers = BTreeSet::new();
            for number in number_line.split_whitespace() {
                numbers.insert(usize::from_str(number)?);
            }
            Ok(numbers)
        }

        Ok(Card {
            number: card_number,
            winning_numbers: parse_numbers(winning_line)?,
            picked_numbers: parse_numbers(chosen_line)?,
        })
    }

    fn points(&self) -> Result<usize> {
        match self.count_matches() {
            0 => Ok(0),
            more => u32::try_from(more - 1)
                .ok()
                .and_then(|exponent| 2_usize.checked_pow(exponent))
                .ok_or(anyhow!("Card {} with {more} matches overflows its points", self.number)),
        }
    }

    fn count_matches(&self) -> usize {
        self.picked_numbers.intersection(&self.winning_numbers).count()
    }
}
