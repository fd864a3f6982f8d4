//! Platform versions and composer-style version constraints.
//!
//! Only the subset of the composer grammar that extension metadata uses in
//! practice is supported: `^`, `~`, comparison operators, `*` and `x`
//! wildcards, hyphen ranges, `||` alternatives and space or comma
//! separated conjunctions. Stability flags (`@dev`) are ignored.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ConstraintError;

/// A `major.minor.patch` version with an optional pre-release suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Option<String>,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre: None,
        }
    }

    /// Parse `9`, `9.5`, `9.5.11`, `v10.1.0` or `10.0.0-beta2`.
    /// Missing components default to zero.
    pub fn parse(input: &str) -> Result<Self, ConstraintError> {
        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);
        let (core, pre) = match trimmed.find(['-', '+']) {
            Some(idx) => (&trimmed[..idx], Some(trimmed[idx + 1..].to_string())),
            None => (trimmed, None),
        };
        let parts: Vec<&str> = core.split('.').collect();
        if core.is_empty() || parts.len() > 4 {
            return Err(ConstraintError::InvalidVersion(input.to_string()));
        }
        let mut numbers = [0u64; 3];
        for (slot, part) in numbers.iter_mut().zip(parts.iter()) {
            *slot = part
                .parse()
                .map_err(|_| ConstraintError::InvalidVersion(input.to_string()))?;
        }
        Ok(Self {
            major: numbers[0],
            minor: numbers[1],
            patch: numbers[2],
            pre: pre.filter(|p| !p.is_empty()),
        })
    }

    /// Parse a contributed release number such as `8.x-1.4` or `2.0.3`,
    /// dropping the legacy `<core>.x-` prefix.
    pub fn parse_release(input: &str) -> Result<Self, ConstraintError> {
        let trimmed = input.trim();
        let stripped = match trimmed.split_once(".x-") {
            Some((core, rest)) if core.chars().all(|c| c.is_ascii_digit()) => rest,
            _ => trimmed,
        };
        Self::parse(stripped)
    }

    /// `X.Y.0` for this version.
    pub fn minor_floor(&self) -> Self {
        Self::new(self.major, self.minor, 0)
    }

    /// First release of the following major line.
    pub fn next_major(&self) -> Self {
        Self::new(self.major + 1, 0, 0)
    }

    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some()
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.pre, &other.pre) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{pre}")?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Bound {
    op: Op,
    version: Version,
}

impl Bound {
    fn new(op: Op, version: Version) -> Self {
        Self { op, version }
    }

    fn allows(&self, candidate: &Version) -> bool {
        let ord = candidate.cmp(&self.version);
        match self.op {
            Op::Eq => ord == Ordering::Equal,
            Op::Ne => ord != Ordering::Equal,
            Op::Gt => ord == Ordering::Greater,
            Op::Ge => ord != Ordering::Less,
            Op::Lt => ord == Ordering::Less,
            Op::Le => ord != Ordering::Greater,
        }
    }
}

/// A parsed composer-style constraint: a disjunction of conjunctions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    raw: String,
    alternatives: Vec<Vec<Bound>>,
}

impl Constraint {
    pub fn parse(input: &str) -> Result<Self, ConstraintError> {
        let invalid = |reason: &str| ConstraintError::InvalidConstraint {
            constraint: input.to_string(),
            reason: reason.to_string(),
        };

        if input.trim().is_empty() {
            return Err(invalid("empty constraint"));
        }

        let mut alternatives = Vec::new();
        for alternative in input.split('|').map(str::trim).filter(|a| !a.is_empty()) {
            let tokens = tokenize(alternative);
            if tokens.is_empty() {
                return Err(invalid("empty alternative"));
            }
            let mut bounds = Vec::new();
            let mut idx = 0;
            while idx < tokens.len() {
                // Hyphen range: `1.0 - 2.0`.
                if idx + 2 < tokens.len() && tokens[idx + 1] == "-" {
                    let low = parse_partial(&tokens[idx]).ok_or_else(|| invalid("bad range start"))?;
                    let high = parse_partial(&tokens[idx + 2]).ok_or_else(|| invalid("bad range end"))?;
                    bounds.push(Bound::new(Op::Ge, low.floor()));
                    bounds.push(match high.ceiling() {
                        Some(ceiling) => Bound::new(Op::Lt, ceiling),
                        None => Bound::new(Op::Le, high.floor()),
                    });
                    idx += 3;
                    continue;
                }
                let parsed = parse_term(&tokens[idx]).ok_or_else(|| invalid("unrecognised term"))?;
                bounds.extend(parsed);
                idx += 1;
            }
            alternatives.push(bounds);
        }

        if alternatives.is_empty() {
            return Err(invalid("no alternatives"));
        }

        Ok(Self {
            raw: input.trim().to_string(),
            alternatives,
        })
    }

    /// Whether `version` satisfies at least one alternative.
    pub fn allows(&self, version: &Version) -> bool {
        self.alternatives
            .iter()
            .any(|bounds| bounds.iter().all(|b| b.allows(version)))
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Constraint {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Split one alternative into terms, gluing a dangling operator onto the
/// version that follows it (`>= 8.8` is one term).
fn tokenize(alternative: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut pending_op: Option<String> = None;
    for raw in alternative.split([' ', ',', '\t']).filter(|t| !t.is_empty()) {
        if raw.chars().all(|c| matches!(c, '<' | '>' | '=' | '!' | '^' | '~')) {
            pending_op = Some(raw.to_string());
            continue;
        }
        match pending_op.take() {
            Some(op) => tokens.push(format!("{op}{raw}")),
            None => tokens.push(raw.to_string()),
        }
    }
    tokens
}

/// A version with possibly-missing or wildcard components.
struct Partial {
    numbers: Vec<u64>,
    pre: Option<String>,
}

impl Partial {
    fn floor(&self) -> Version {
        Version {
            major: self.numbers.first().copied().unwrap_or(0),
            minor: self.numbers.get(1).copied().unwrap_or(0),
            patch: self.numbers.get(2).copied().unwrap_or(0),
            pre: self.pre.clone(),
        }
    }

    /// Exclusive upper bound for a wildcard/partial version
    /// (`9` → `10.0.0`, `9.1` → `9.2.0`); `None` when fully specified.
    fn ceiling(&self) -> Option<Version> {
        match self.numbers.len() {
            0 => None,
            1 => Some(Version::new(self.numbers[0] + 1, 0, 0)),
            2 => Some(Version::new(self.numbers[0], self.numbers[1] + 1, 0)),
            _ => None,
        }
    }
}

fn parse_partial(input: &str) -> Option<Partial> {
    let input = input.split('@').next().unwrap_or(input);
    let input = input.strip_prefix(['v', 'V']).unwrap_or(input);
    if input.is_empty() {
        return None;
    }
    let (core, pre) = match input.find('-') {
        Some(idx) => (&input[..idx], Some(input[idx + 1..].to_string())),
        None => (input, None),
    };
    let mut numbers = Vec::new();
    for part in core.split('.') {
        if matches!(part, "x" | "X" | "*") {
            break;
        }
        numbers.push(part.parse().ok()?);
    }
    if numbers.len() > 4 {
        return None;
    }
    numbers.truncate(3);
    // `dev` suffixes mark a branch, not a pre-release ordering.
    let pre = pre.filter(|p| !p.is_empty() && p != "dev");
    Some(Partial { numbers, pre })
}

fn parse_term(term: &str) -> Option<Vec<Bound>> {
    if matches!(term, "*" | "x" | "X") {
        return Some(Vec::new());
    }

    if let Some(rest) = term.strip_prefix('^') {
        let partial = parse_partial(rest)?;
        let low = partial.floor();
        let high = match (partial.numbers.first(), partial.numbers.get(1)) {
            (Some(&major), _) if major > 0 => Version::new(major + 1, 0, 0),
            (Some(_), Some(&minor)) if minor > 0 || partial.numbers.len() == 2 => {
                Version::new(0, minor + 1, 0)
            }
            (Some(_), None) => Version::new(1, 0, 0),
            _ => Version::new(0, 0, low.patch + 1),
        };
        return Some(vec![Bound::new(Op::Ge, low), Bound::new(Op::Lt, high)]);
    }

    if let Some(rest) = term.strip_prefix('~') {
        let partial = parse_partial(rest)?;
        let low = partial.floor();
        let high = match partial.numbers.len() {
            0 => return None,
            1 | 2 => Version::new(low.major + 1, 0, 0),
            _ => Version::new(low.major, low.minor + 1, 0),
        };
        return Some(vec![Bound::new(Op::Ge, low), Bound::new(Op::Lt, high)]);
    }

    let (op, rest) = if let Some(rest) = term.strip_prefix(">=") {
        (Some(Op::Ge), rest)
    } else if let Some(rest) = term.strip_prefix("<=") {
        (Some(Op::Le), rest)
    } else if let Some(rest) = term.strip_prefix("!=") {
        (Some(Op::Ne), rest)
    } else if let Some(rest) = term.strip_prefix("==") {
        (None, rest)
    } else if let Some(rest) = term.strip_prefix('>') {
        (Some(Op::Gt), rest)
    } else if let Some(rest) = term.strip_prefix('<') {
        (Some(Op::Lt), rest)
    } else if let Some(rest) = term.strip_prefix('=') {
        (None, rest)
    } else {
        (None, term)
    };

    let partial = parse_partial(rest)?;
    if partial.numbers.is_empty() {
        return if op.is_none() { Some(Vec::new()) } else { None };
    }
    let wildcard = rest.contains(['x', 'X', '*']);
    match op {
        Some(op) => Some(vec![Bound::new(op, partial.floor())]),
        None if wildcard => {
            let high = partial.ceiling()?;
            Some(vec![
                Bound::new(Op::Ge, partial.floor()),
                Bound::new(Op::Lt, high),
            ])
        }
        None => Some(vec![Bound::new(Op::Eq, partial.floor())]),
    }
}
