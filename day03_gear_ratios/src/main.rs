use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use sdk::*;
use sdk::anyhow::anyhow;

fn main() -> Result<()> {
    run(|mode, lines| {
        let schematic = Schematic::parse(lines)?;
        let answer = match mode {
            Mode::PartOne => schematic.part_number_sum(),
            Mode::PartTwo => schematic.gear_ratio_sum()?,
        };
        Ok(answer)
    })
}

#[derive(Debug, Clone)]
struct Schematic {
    data: Vec<SchematicData>,
    // Each cell points at the element covering it; rows keep their own length
    rows: Vec<Vec<Option<SchematicData>>>,
}

impl Schematic {
    fn parse(lines: &[impl AsRef<str>]) -> Result<Self> {
        let mut data = Vec::new();
        let mut rows = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            let mut current_row = Vec::new();
            let mut current = TokenBuffer::default();
            for (col, char) in line.as_ref().chars().enumerate() {
                current_row.push(None);
                if char.is_ascii_digit() {
                    current.push(char, col);
                    continue;
                }
                Self::finish_number(&mut data, &mut current_row, &mut current, row)?;
                if is_symbol(char) {
                    let element = SchematicData {
                        element: SchematicElement::Symbol(char),
                        row,
                        start: col,
                        end: col + 1,
                    };
                    data.push(element);
                    current_row[col] = Some(element);
                }
            }
            Self::finish_number(&mut data, &mut current_row, &mut current, row)?;
            rows.push(current_row);
        }
        let schematic = Schematic { data, rows };
        trace!("Loaded schematic: {schematic:?}");
        Ok(schematic)
    }

    fn finish_number(
        data: &mut Vec<SchematicData>,
        row: &mut [Option<SchematicData>],
        number: &mut TokenBuffer,
        row_index: usize,
    ) -> Result<()> {
        if let Some((number, start)) = number.take() {
            let element = SchematicData {
                element: SchematicElement::Number(usize::from_str(&number)?),
                row: row_index,
                start,
                end: start + number.len(),
            };
            data.push(element);
            for cell in &mut row[start..element.end] {
                *cell = Some(element);
            }
        }
        Ok(())
    }

    fn cell(&self, row: usize, col: usize) -> Option<SchematicData> {
        self.rows.get(row)?.get(col).copied().flatten()
    }

    /// Everything touching `feature`, diagonals included.
    fn neighbors(&self, feature: &SchematicData) -> BTreeSet<SchematicData> {
        let mut neighbors = BTreeSet::new();
        for row in feature.row.saturating_sub(1)..=feature.row + 1 {
            for col in feature.start.saturating_sub(1)..=feature.end {
                if let Some(element) = self.cell(row, col) {
                    if element != *feature {
                        neighbors.insert(element);
                    }
                }
            }
        }
        neighbors
    }

    // A number is a part number if it is adjacent (including diagonals) to a symbol
    fn part_numbers(&self) -> Vec<usize> {
        self.data
            .iter()
            .filter_map(|feature| {
                let number = feature.element.number()?;
                let symbol = self.neighbors(feature).into_iter().find(SchematicData::is_symbol);
                match symbol {
                    Some(symbol) => {
                        trace!(
                            "{number} (row {}, col {}) touches {}",
                            feature.row,
                            feature.start,
                            symbol.element
                        );
                        Some(number)
                    }
                    None => {
                        let (row, col) = (feature.row, feature.start);
                        trace!("{number} (row {row}, col {col}) does not match");
                        None
                    }
                }
            })
            .collect()
    }

    fn part_number_sum(&self) -> usize {
        self.part_numbers().into_iter().sum()
    }

    // A gear is a `*` touching exactly two numbers; its ratio is their product
    fn gear_ratios(&self) -> Result<Vec<usize>> {
        self.data
            .iter()
            .filter(|feature| feature.element.symbol() == Some('*'))
            .filter_map(|feature| {
                let numbers: Vec<_> = self
                    .neighbors(feature)
                    .into_iter()
                    .filter_map(|n| n.element.number())
                    .collect();
                match numbers.as_slice() {
                    &[a, b] => Some(a.checked_mul(b).ok_or(anyhow!(
                        "Gear ratio {a} * {b} (row {}, col {}) overflows",
                        feature.row,
                        feature.start
                    ))),
                    _ => None,
                }
            })
            .collect()
    }

    fn gear_ratio_sum(&self) -> Result<usize> {
        self.gear_ratios()?
            .into_iter()
            .try_fold(0_usize, |total, ratio| total.checked_add(ratio))
            .ok_or(anyhow!("Gear ratio sum overflows"))
    }
}

// Anything but blanks, digits and letters
fn is_symbol(c: char) -> bool {
    c != '.' && !c.is_ascii_digit() && !c.is_alphabetic()
}

#[derive(Debug, Clone, Default)]
struct TokenBuffer {
    data: Option<(String, usize)>,
}

impl TokenBuffer {
    fn push(&mut self, c: char, i: usize) {
        match &mut self.data {
            Some((data, _)) => data.push(c),
            data @ None => *data = Some((c.to_string(), i)),
        }
    }

    fn take(&mut self) -> Option<(String, usize)> {
        self.data.take()
    }
}

#[derive(Debug, Clone, Copy, PartialOrd, PartialEq, Ord, Eq)]
struct SchematicData {
    element: SchematicElement,
    row: usize,
    start: usize,
    end: usize,
}

impl SchematicData {
    fn is_symbol(&self) -> bool {
        matches!(self.element, SchematicElement::Symbol(_))
    }
}

#[derive(Debug, Clone, Copy, PartialOrd, PartialEq, Ord, Eq)]
enum SchematicElement {
    Number(usize),
    Symbol(char),
}

impl SchematicElement {
    fn number(self) -> Option<usize> {
        match self {
            SchematicElement::Number(n) => Some(n),
            _ => None,
        }
    }

    fn symbol(self) -> Option<char> {
        match self {
            SchematicElement::Symbol(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for SchematicElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchematicElement::Number(n) => write!(f, "{n}"),
            SchematicElement::Symbol(c) => write!(f, "{c}"),
        }
    }
}
