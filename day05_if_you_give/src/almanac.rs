use std::collections::BTreeMap;
use sdk::*;
use sdk::anyhow::anyhow;
use sdk::winnow::ascii::{dec_uint, space0, space1};
use sdk::winnow::combinator::{preceded, separated};
use sdk::winnow::token::take_while;
use sdk::winnow::{Parser, PResult};
use crate::remap::{resolve, solve, Category, CategoryOrder, RangeRule, RuleSets};

#[derive(Debug, Clone)]
pub struct Almanac {
    pub seeds: Vec<u64>,
    pub order: CategoryOrder,
    pub rules: RuleSets,
}

impl Almanac {
    /// Reads the seeds line and every `<from>-to-<to> map:` block, checking each map
    /// against `order`. Blank lines are skipped.
    pub fn parse(lines: &[impl AsRef<str>], order: CategoryOrder) -> Result<Self> {
        let mut lines = lines
            .iter()
            .map(|l| l.as_ref().trim())
            .enumerate()
            .filter(|(_, l)| !l.is_empty());

        let (_, seeds) = lines.next().ok_or(anyhow!("Missing seeds line in input"))?;
        let seeds = parse_seeds
            .parse(seeds)
            .map_err(|e| anyhow!("Unable to parse seeds line: {e}"))?;

        let mut rules = RuleSets::default();
        let mut active: Option<Category> = None;
        for (i, line) in lines {
            if line.starts_with(|c: char| c.is_ascii_digit()) {
                let from = active
                    .as_ref()
                    .ok_or(anyhow!("Found rule on line {} before any map header", i + 1))?;
                let rule = parse_rule
                    .parse(line)
                    .map_err(|e| anyhow!("Unable to parse rule on line {}: {e}", i + 1))?;
                rules.entry(from.clone()).push(rule);
            } else {
                let (from, to) = parse_header
                    .parse(line)
                    .map_err(|e| anyhow!("Unable to parse map header on line {}: {e}", i + 1))?;
                if !order.contains(&from) {
                    return Err(anyhow!(
                        "Map on line {} starts from unknown category `{from}`",
                        i + 1
                    ));
                }
                if order.next(&from) != Some(&to) {
                    return Err(anyhow!(
                        "Map on line {} goes from `{from}` to `{to}`, which does not follow it",
                        i + 1
                    ));
                }
                trace!("Line {}: reading {from}-to-{to} map", i + 1);
                active = Some(from);
            }
        }

        Ok(Almanac { seeds, order, rules })
    }

    /// Where every seed ends up.
    pub fn locations(&self) -> BTreeMap<u64, u64> {
        self.seeds
            .iter()
            .map(|seed| (*seed, resolve(self.order.first(), *seed, &self.rules, &self.order)))
            .collect()
    }

    pub fn lowest_location(&self) -> std::result::Result<u64, SolveError> {
        solve(&self.seeds, &self.rules, &self.order)
    }
}

// seeds: 79 14 55 13
fn parse_seeds(input: &mut &str) -> PResult<Vec<u64>> {
    preceded(
        ("seeds:", space0),
        separated(1.., dec_uint::<_, u64, _>, space1),
    )
        .parse_next(input)
}

// seed-to-soil map:
fn parse_header(input: &mut &str) -> PResult<(Category, Category)> {
    (
        take_while(1.., |c: char| c.is_alphanumeric()),
        "-to-",
        take_while(1.., |c: char| c.is_alphanumeric()),
        " map:",
    )
        .map(|(from, _, to, _): (&str, _, &str, _)| (Category::new(from), Category::new(to)))
        .parse_next(input)
}

// 50 98 2
fn parse_rule(input: &mut &str) -> PResult<RangeRule> {
    (
        dec_uint::<_, u64, _>,
        preceded(space1, dec_uint::<_, u64, _>),
        preceded(space1, dec_uint::<_, u64, _>),
    )
        .try_map(|(destination, source, length)| RangeRule::new(destination, source, length))
        .parse_next(input)
}
