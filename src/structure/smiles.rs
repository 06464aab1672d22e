//! SMILES line notation to molecular graph.

use crate::error::DecodeError;
use std::collections::BTreeMap;

const ELEMENTS: &[&str] = &[
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh",
    "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Largest formal charge magnitude accepted in a bracket atom.
const MAX_CHARGE: u8 = 15;

/// Elements allowed outside brackets, two-letter symbols first.
const ORGANIC: &[&str] = &["Cl", "Br", "B", "C", "N", "O", "P", "S", "F", "I"];
const AROMATIC_ORGANIC: &[&str] = &["b", "c", "n", "o", "p", "s"];
const AROMATIC_BRACKET: &[&str] = &["se", "as", "te", "b", "c", "n", "o", "p", "s"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Quadruple,
    Aromatic,
}

impl BondOrder {
    fn valence(self) -> u32 {
        match self {
            Self::Single | Self::Aromatic => 1,
            Self::Double => 2,
            Self::Triple => 3,
            Self::Quadruple => 4,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Atom {
    /// Element symbol, capitalized even for aromatic atoms; `*` for wildcards.
    pub element: &'static str,
    pub aromatic: bool,
    pub bracket: bool,
    pub isotope: Option<u16>,
    pub charge: i8,
    /// Hydrogen count written inside brackets.
    pub hydrogens: Option<u8>,
    pub chiral: bool,
    pub class: Option<u32>,
}

impl Atom {
    fn organic(element: &'static str, aromatic: bool) -> Self {
        Self {
            element,
            aromatic,
            bracket: false,
            isotope: None,
            charge: 0,
            hydrogens: None,
            chiral: false,
            class: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bond {
    pub a: usize,
    pub b: usize,
    pub order: BondOrder,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
}

impl Molecule {
    pub fn neighbors(&self, atom: usize) -> impl Iterator<Item = usize> + '_ {
        self.bonds.iter().filter_map(move |b| {
            if b.a == atom {
                Some(b.b)
            } else if b.b == atom {
                Some(b.a)
            } else {
                None
            }
        })
    }

    pub fn degree(&self, atom: usize) -> usize {
        self.neighbors(atom).count()
    }

    pub fn bond_between(&self, a: usize, b: usize) -> bool {
        self.bonds
            .iter()
            .any(|bond| (bond.a, bond.b) == (a, b) || (bond.a, bond.b) == (b, a))
    }

    /// Hydrogens to draw next to the atom label: the bracket count, or for
    /// organic-subset atoms the lowest standard valence that fits the bonds.
    pub fn implicit_hydrogens(&self, atom: usize) -> u8 {
        let a = &self.atoms[atom];
        if a.bracket {
            return a.hydrogens.unwrap_or(0);
        }
        let mut used: u32 = self
            .bonds
            .iter()
            .filter(|b| b.a == atom || b.b == atom)
            .map(|b| b.order.valence())
            .sum();
        if a.aromatic {
            used += 1;
        }
        let valences: &[u32] = match a.element {
            "B" => &[3],
            "C" => &[4],
            "N" => &[3, 5],
            "O" => &[2],
            "P" => &[3, 5],
            "S" => &[2, 4, 6],
            "F" | "Cl" | "Br" | "I" => &[1],
            _ => &[],
        };
        valences
            .iter()
            .find(|&&v| v >= used)
            .map_or(0, |&v| (v - used) as u8)
    }

    /// Connected components, each listing atom indices in ascending order.
    pub fn components(&self) -> Vec<Vec<usize>> {
        let mut component = vec![usize::MAX; self.atoms.len()];
        let mut out: Vec<Vec<usize>> = Vec::new();
        for start in 0..self.atoms.len() {
            if component[start] != usize::MAX {
                continue;
            }
            let id = out.len();
            let mut members = Vec::new();
            let mut stack = vec![start];
            component[start] = id;
            while let Some(atom) = stack.pop() {
                members.push(atom);
                for n in self.neighbors(atom) {
                    if component[n] == usize::MAX {
                        component[n] = id;
                        stack.push(n);
                    }
                }
            }
            members.sort_unstable();
            out.push(members);
        }
        out
    }
}

struct OpenRing {
    atom: usize,
    order: Option<BondOrder>,
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    mol: Molecule,
    prev: Option<usize>,
    pending: Option<(BondOrder, usize)>,
    branches: Vec<(Option<usize>, usize)>,
    rings: BTreeMap<u16, OpenRing>,
}

/// Parses a SMILES string. Parsing stops at the first whitespace, the rest of
/// the line being a free-text name.
pub fn parse(input: &str) -> Result<Molecule, DecodeError> {
    let end = input
        .find(char::is_whitespace)
        .unwrap_or(input.len());
    let input = &input[..end];
    if input.is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut parser = Parser {
        input,
        pos: 0,
        mol: Molecule::default(),
        prev: None,
        pending: None,
        branches: Vec::new(),
        rings: BTreeMap::new(),
    };
    parser.run()?;
    Ok(parser.mol)
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_at(&self, skip: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(skip)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn unexpected(&self, ch: char) -> DecodeError {
        DecodeError::UnexpectedChar {
            ch,
            offset: self.pos,
        }
    }

    fn run(&mut self) -> Result<(), DecodeError> {
        while let Some(c) = self.peek() {
            let offset = self.pos;
            match c {
                '(' => {
                    if self.prev.is_none() || self.pending.is_some() {
                        return Err(DecodeError::UnbalancedBranch { offset });
                    }
                    self.bump();
                    self.branches.push((self.prev, offset));
                }
                ')' => {
                    if let Some((_, bond_offset)) = self.pending {
                        return Err(DecodeError::DanglingBond {
                            offset: bond_offset,
                        });
                    }
                    let (anchor, _) = self
                        .branches
                        .pop()
                        .ok_or(DecodeError::UnbalancedBranch { offset })?;
                    self.bump();
                    self.prev = anchor;
                }
                '-' | '=' | '#' | '$' | ':' | '/' | '\\' => {
                    if self.pending.is_some() {
                        return Err(self.unexpected(c));
                    }
                    if self.prev.is_none() {
                        return Err(DecodeError::DanglingBond { offset });
                    }
                    self.bump();
                    let order = match c {
                        '=' => BondOrder::Double,
                        '#' => BondOrder::Triple,
                        '$' => BondOrder::Quadruple,
                        ':' => BondOrder::Aromatic,
                        _ => BondOrder::Single,
                    };
                    self.pending = Some((order, offset));
                }
                '.' => {
                    if let Some((_, bond_offset)) = self.pending {
                        return Err(DecodeError::DanglingBond {
                            offset: bond_offset,
                        });
                    }
                    self.bump();
                    self.prev = None;
                }
                '0'..='9' | '%' => self.ring_bond()?,
                '[' => {
                    let atom = self.bracket_atom()?;
                    self.add_atom(atom);
                }
                '*' => {
                    self.bump();
                    self.add_atom(Atom::organic("*", false));
                }
                c if c.is_ascii_alphabetic() => {
                    let atom = self.organic_atom()?;
                    self.add_atom(atom);
                }
                _ => return Err(self.unexpected(c)),
            }
        }

        if let Some((_, offset)) = self.pending {
            return Err(DecodeError::DanglingBond { offset });
        }
        if let Some(&(_, offset)) = self.branches.last() {
            return Err(DecodeError::UnbalancedBranch { offset });
        }
        if let Some(&label) = self.rings.keys().next() {
            return Err(DecodeError::UnclosedRing { label });
        }
        if self.mol.atoms.is_empty() {
            return Err(DecodeError::Empty);
        }
        Ok(())
    }

    fn add_atom(&mut self, atom: Atom) {
        let idx = self.mol.atoms.len();
        self.mol.atoms.push(atom);
        if let Some(prev) = self.prev {
            let order = match self.pending.take() {
                Some((order, _)) => order,
                None => self.default_order(prev, idx),
            };
            self.mol.bonds.push(Bond {
                a: prev,
                b: idx,
                order,
            });
        }
        self.prev = Some(idx);
    }

    fn default_order(&self, a: usize, b: usize) -> BondOrder {
        if self.mol.atoms[a].aromatic && self.mol.atoms[b].aromatic {
            BondOrder::Aromatic
        } else {
            BondOrder::Single
        }
    }

    fn ring_bond(&mut self) -> Result<(), DecodeError> {
        let offset = self.pos;
        let label = match self.bump() {
            Some('%') => {
                let hi = self.bump().and_then(|c| c.to_digit(10));
                let lo = self.bump().and_then(|c| c.to_digit(10));
                match (hi, lo) {
                    (Some(hi), Some(lo)) => (hi * 10 + lo) as u16,
                    _ => return Err(DecodeError::UnexpectedChar { ch: '%', offset }),
                }
            }
            Some(c) => c.to_digit(10).unwrap_or(0) as u16,
            None => return Ok(()),
        };
        let Some(current) = self.prev else {
            return Err(DecodeError::UnexpectedChar {
                ch: self.input[offset..].chars().next().unwrap_or('%'),
                offset,
            });
        };
        let pending = self.pending.take().map(|(order, _)| order);

        match self.rings.remove(&label) {
            Some(open) => {
                if open.atom == current || self.mol.bond_between(open.atom, current) {
                    return Err(DecodeError::InvalidRingBond { label, offset });
                }
                let order = match (open.order, pending) {
                    (Some(a), Some(b)) if a != b => {
                        return Err(DecodeError::RingBondConflict { label, offset });
                    }
                    (Some(order), _) | (None, Some(order)) => order,
                    (None, None) => self.default_order(open.atom, current),
                };
                self.mol.bonds.push(Bond {
                    a: open.atom,
                    b: current,
                    order,
                });
            }
            None => {
                self.rings.insert(
                    label,
                    OpenRing {
                        atom: current,
                        order: pending,
                    },
                );
            }
        }
        Ok(())
    }

    fn organic_atom(&mut self) -> Result<Atom, DecodeError> {
        let offset = self.pos;
        let rest = &self.input[self.pos..];
        if let Some(&symbol) = ORGANIC.iter().find(|s| rest.starts_with(**s)) {
            self.pos += symbol.len();
            return Ok(Atom::organic(symbol, false));
        }
        if let Some(&symbol) = AROMATIC_ORGANIC.iter().find(|s| rest.starts_with(**s)) {
            self.pos += symbol.len();
            return Ok(Atom::organic(element_of(symbol), true));
        }
        let symbol: String = rest.chars().take(2).collect();
        Err(DecodeError::UnknownElement { symbol, offset })
    }

    fn bracket_atom(&mut self) -> Result<Atom, DecodeError> {
        let open = self.pos;
        self.bump();

        let isotope_at = self.pos;
        let isotope = match self.number()? {
            Some(n) => Some(
                u16::try_from(n)
                    .map_err(|_| DecodeError::NumberOutOfRange { offset: isotope_at })?,
            ),
            None => None,
        };

        let (element, aromatic) = self.bracket_element(open)?;
        let mut atom = Atom {
            element,
            aromatic,
            bracket: true,
            isotope,
            charge: 0,
            hydrogens: None,
            chiral: false,
            class: None,
        };

        if self.peek() == Some('@') {
            self.bump();
            if self.peek() == Some('@') {
                self.bump();
            } else if matches!(
                (self.peek(), self.peek_at(1)),
                (Some('T'), Some('H' | 'B')) | (Some('A'), Some('L')) | (Some('S'), Some('P')) | (Some('O'), Some('H'))
            ) {
                self.bump();
                self.bump();
                self.number()?;
            }
            atom.chiral = true;
        }

        if self.peek() == Some('H') {
            self.bump();
            let count_at = self.pos;
            let count = match self.number()? {
                Some(n) => u8::try_from(n)
                    .map_err(|_| DecodeError::NumberOutOfRange { offset: count_at })?,
                None => 1,
            };
            atom.hydrogens = Some(count);
        }

        if let Some(sign @ ('+' | '-')) = self.peek() {
            let offset = self.pos;
            self.bump();
            let magnitude = match self.number()? {
                Some(n) => n,
                None => {
                    let mut n = 1;
                    while self.peek() == Some(sign) {
                        self.bump();
                        n += 1;
                    }
                    n
                }
            };
            if magnitude > MAX_CHARGE as u32 {
                return Err(DecodeError::InvalidCharge {
                    offset,
                    max: MAX_CHARGE,
                });
            }
            // Bounded by MAX_CHARGE, fits i8.
            let magnitude = magnitude as i8;
            atom.charge = if sign == '+' { magnitude } else { -magnitude };
        }

        if self.peek() == Some(':') {
            self.bump();
            atom.class = Some(self.number()?.unwrap_or(0));
        }

        match self.bump() {
            Some(']') => Ok(atom),
            Some(c) => Err(DecodeError::UnexpectedChar {
                ch: c,
                offset: self.pos - c.len_utf8(),
            }),
            None => Err(DecodeError::UnclosedBracket { offset: open }),
        }
    }

    fn bracket_element(&mut self, open: usize) -> Result<(&'static str, bool), DecodeError> {
        let offset = self.pos;
        let rest = &self.input[self.pos..];
        if rest.starts_with('*') {
            self.pos += 1;
            return Ok(("*", false));
        }
        if let Some(&symbol) = AROMATIC_BRACKET.iter().find(|s| rest.starts_with(**s)) {
            self.pos += symbol.len();
            return Ok((element_of(symbol), true));
        }
        let mut chars = rest.chars();
        let Some(first) = chars.next() else {
            return Err(DecodeError::UnclosedBracket { offset: open });
        };
        if !first.is_ascii_uppercase() {
            return Err(DecodeError::UnexpectedChar { ch: first, offset });
        }
        if let Some(second) = chars.next().filter(char::is_ascii_lowercase) {
            let two: String = [first, second].iter().collect();
            if let Some(symbol) = lookup_element(&two) {
                self.pos += 2;
                return Ok((symbol, false));
            }
        }
        match lookup_element(&first.to_string()) {
            Some(symbol) => {
                self.pos += 1;
                Ok((symbol, false))
            }
            None => Err(DecodeError::UnknownElement {
                symbol: rest.chars().take(2).collect(),
                offset,
            }),
        }
    }

    /// Reads a run of digits; `None` when there is none.
    fn number(&mut self) -> Result<Option<u32>, DecodeError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        if start == self.pos {
            return Ok(None);
        }
        self.input[start..self.pos]
            .parse()
            .map(Some)
            .map_err(|_| DecodeError::NumberOutOfRange { offset: start })
    }
}

fn lookup_element(symbol: &str) -> Option<&'static str> {
    ELEMENTS.iter().copied().find(|e| *e == symbol)
}

/// Capitalized element for an aromatic symbol.
fn element_of(aromatic: &str) -> &'static str {
    match aromatic {
        "b" => "B",
        "c" => "C",
        "n" => "N",
        "o" => "O",
        "p" => "P",
        "s" => "S",
        "se" => "Se",
        "as" => "As",
        "te" => "Te",
        _ => "*",
    }
}
