use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;
use sdk::*;

pub const STANDARD_CATEGORIES: [&str; 8] = [
    "seed",
    "soil",
    "fertilizer",
    "water",
    "light",
    "temperature",
    "humidity",
    "location",
];

#[derive(Debug, Clone, PartialOrd, PartialEq, Ord, Eq)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Category(name.into())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Never empty, no repeats
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOrder(Vec<Category>);

impl CategoryOrder {
    pub fn new(
        categories: impl IntoIterator<Item=Category>,
    ) -> std::result::Result<Self, ParseError> {
        let categories: Vec<_> = categories.into_iter().collect();
        if categories.is_empty() {
            return Err(ParseError("category order needs at least one category".to_string()));
        }
        for (i, category) in categories.iter().enumerate() {
            if categories[..i].contains(category) {
                return Err(ParseError(format!(
                    "category `{category}` appears twice in the order"
                )));
            }
        }
        Ok(CategoryOrder(categories))
    }

    /// seed → soil → fertilizer → water → light → temperature → humidity → location
    pub fn standard() -> Self {
        CategoryOrder(STANDARD_CATEGORIES.into_iter().map(Category::new).collect())
    }

    pub fn first(&self) -> &Category {
        &self.0[0]
    }

    pub fn contains(&self, category: &Category) -> bool {
        self.0.contains(category)
    }

    pub fn next(&self, category: &Category) -> Option<&Category> {
        let index = self.0.iter().position(|c| c == category)?;
        self.0.get(index + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRule {
    source: Range<u64>,
    destination_start: u64,
}

impl RangeRule {
    pub fn new(
        destination_start: u64,
        source_start: u64,
        length: u64,
    ) -> std::result::Result<Self, ParseError> {
        if length == 0 {
            return Err(ParseError(format!(
                "rule `{destination_start} {source_start} {length}` is empty"
            )));
        }
        let source_end = source_start.checked_add(length);
        let destination_end = destination_start.checked_add(length);
        match (source_end, destination_end) {
            (Some(source_end), Some(_)) => Ok(RangeRule {
                source: source_start..source_end,
                destination_start,
            }),
            _ => Err(ParseError(format!(
                "rule `{destination_start} {source_start} {length}` overflows the identifier space"
            ))),
        }
    }

    pub fn covers(&self, id: u64) -> bool {
        self.source.contains(&id)
    }

    pub fn map(&self, id: u64) -> Option<u64> {
        if self.covers(id) {
            Some(self.destination_start + (id - self.source.start))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet(Vec<RangeRule>);

impl RuleSet {
    pub fn push(&mut self, rule: RangeRule) {
        self.0.push(rule);
    }

    // First rule wins if the input overlaps
    pub fn lookup(&self, id: u64) -> Option<&RangeRule> {
        self.0.iter().find(|rule| rule.covers(id))
    }

    pub fn apply(&self, id: u64) -> u64 {
        self.lookup(id).and_then(|rule| rule.map(id)).unwrap_or(id)
    }
}

impl FromIterator<RangeRule> for RuleSet {
    fn from_iter<T: IntoIterator<Item=RangeRule>>(iter: T) -> Self {
        RuleSet(iter.into_iter().collect())
    }
}

/// Rule sets keyed by the category they map *from*.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSets(BTreeMap<Category, RuleSet>);

impl RuleSets {
    pub fn get(&self, category: &Category) -> Option<&RuleSet> {
        self.0.get(category)
    }

    pub fn entry(&mut self, category: Category) -> &mut RuleSet {
        self.0.entry(category).or_default()
    }

    // A category without any rules passes everything through
    fn apply(&self, category: &Category, id: u64) -> u64 {
        self.get(category).map_or(id, |rules| rules.apply(id))
    }
}

/// Carries `start_id` from `start_category` to the last category of `category_order`.
pub fn resolve(
    start_category: &Category,
    start_id: u64,
    rule_sets: &RuleSets,
    category_order: &CategoryOrder,
) -> u64 {
    let mut category = start_category;
    let mut id = start_id;
    while let Some(next) = category_order.next(category) {
        let mapped = rule_sets.apply(category, id);
        trace!("{category} {id} -> {next} {mapped}");
        category = next;
        id = mapped;
    }
    id
}

pub fn solve(
    seed_ids: &[u64],
    rule_sets: &RuleSets,
    category_order: &CategoryOrder,
) -> std::result::Result<u64, SolveError> {
    let start = category_order.first();
    seed_ids
        .iter()
        .map(|seed| resolve(start, *seed, rule_sets, category_order))
        .min()
        .ok_or(SolveError::Empty("seeds"))
}
