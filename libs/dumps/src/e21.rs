use super::{data_lines, Dump, ParseError};

use nalgebra::DVector;
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;

/// An error norm reported by the solver for each refinement test
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Norm {
    /// L²(0, T; L²(Ω))
    L2L2,
    /// L²(Ω) at the final time
    L2T,
    /// √ε L²(0, T; H¹(Ω)); only non-zero for problems with diffusion
    L2H1,
    /// L^∞(0, T; L²(Ω))
    LinfL2,
}

impl Norm {
    pub const ALL: [Self; 4] = [Self::L2L2, Self::L2T, Self::L2H1, Self::LinfL2];

    /// The substring identifying lines which report this norm
    pub const fn key(self) -> &'static str {
        match self {
            Self::L2L2 => "l2l2",
            Self::L2T => "l2T",
            Self::L2H1 => "l2h1",
            Self::LinfL2 => "linfl2",
        }
    }
}

impl fmt::Display for Norm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A column of an error report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Dofs,
    /// Space polynomial degree
    P,
    /// Time polynomial degree
    Q,
    /// Space diagram size
    H,
    /// Time step size
    Tau,
    Error(Norm),
}

impl Field {
    fn is_integer(&self) -> bool {
        matches!(self, Self::Dofs | Self::P | Self::Q)
    }
}

/// Associates a substring with the column it feeds
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub pattern: &'static str,
    pub field: Field,
}

const fn rule(pattern: &'static str, field: Field) -> FieldRule {
    FieldRule { pattern, field }
}

/// Rules tested (in order) against every line of an error report.
///
/// Matching is plain substring containment: a line feeds every column whose pattern it contains.
/// The value is always the last space-separated token of the line.
pub const FIELD_RULES: [FieldRule; 9] = [
    rule("DoFs:", Field::Dofs),
    rule("p:", Field::P),
    rule("q:", Field::Q),
    rule("h:", Field::H),
    rule("t:", Field::Tau),
    rule(Norm::L2L2.key(), Field::Error(Norm::L2L2)),
    rule(Norm::L2T.key(), Field::Error(Norm::L2T)),
    rule(Norm::L2H1.key(), Field::Error(Norm::L2H1)),
    rule(Norm::LinfL2.key(), Field::Error(Norm::LinfL2)),
];

/// Nominal space (`p`) and time (`q`) polynomial degrees of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NominalOrders {
    pub p: i32,
    pub q: i32,
}

impl NominalOrders {
    /// The additive space-time comparison is only meaningful when both terms decay at the same rate
    pub fn are_balanced(&self) -> bool {
        self.p == self.q
    }
}

/// One refinement test
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceRecord {
    pub dofs: usize,
    pub p: i32,
    pub q: i32,
    pub h: f64,
    pub tau: f64,
    pub errors: SmallVec<[(Norm, f64); 4]>,
}

/// All refinement tests of an error report, stored column-wise.
///
/// Tests are kept in file order, which is assumed to go from the coarsest to the finest discretization.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceTable {
    dofs: Vec<usize>,
    p: Vec<i32>,
    q: Vec<i32>,
    h: DVector<f64>,
    tau: DVector<f64>,
    errors: BTreeMap<Norm, DVector<f64>>,
}

impl ConvergenceTable {
    /// Number of refinement tests
    pub fn len(&self) -> usize {
        self.dofs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dofs.is_empty()
    }

    pub fn dofs(&self) -> &[usize] {
        &self.dofs
    }

    /// Every `p:` entry of the report (only the first one is authoritative)
    pub fn p(&self) -> &[i32] {
        &self.p
    }

    /// Every `q:` entry of the report (only the first one is authoritative)
    pub fn q(&self) -> &[i32] {
        &self.q
    }

    pub fn h(&self) -> &DVector<f64> {
        &self.h
    }

    pub fn tau(&self) -> &DVector<f64> {
        &self.tau
    }

    pub fn nominal_orders(&self) -> NominalOrders {
        NominalOrders {
            p: self.p[0],
            q: self.q[0],
        }
    }

    /// The error series of a norm, if the report contains it
    pub fn error(&self, norm: Norm) -> Option<&DVector<f64>> {
        self.errors.get(&norm)
    }

    /// Norms present in the report
    pub fn norms(&self) -> impl Iterator<Item = Norm> + '_ {
        self.errors.keys().copied()
    }

    pub fn record(&self, index: usize) -> Option<ConvergenceRecord> {
        let orders = self.nominal_orders();

        self.dofs.get(index).map(|dofs| ConvergenceRecord {
            dofs: *dofs,
            p: orders.p,
            q: orders.q,
            h: self.h[index],
            tau: self.tau[index],
            errors: self
                .errors
                .iter()
                .map(|(norm, values)| (*norm, values[index]))
                .collect(),
        })
    }

    pub fn records(&self) -> impl Iterator<Item = ConvergenceRecord> + '_ {
        (0..self.len()).filter_map(move |index| self.record(index))
    }
}

impl Dump for ConvergenceTable {
    const EXTENSION: &'static str = "e21";

    fn parse(contents: &str) -> Result<Self, ParseError> {
        let mut columns = Columns::default();

        for (line_number, line) in data_lines(contents) {
            let token = line.split(' ').last().unwrap_or_default();

            for rule in FIELD_RULES.iter().filter(|rule| line.contains(rule.pattern)) {
                columns.push(rule, token, line_number)?;
            }
        }

        columns.into_table()
    }
}

#[derive(Default)]
struct Columns {
    dofs: Vec<usize>,
    p: Vec<i32>,
    q: Vec<i32>,
    h: Vec<f64>,
    tau: Vec<f64>,
    errors: BTreeMap<Norm, Vec<f64>>,
}

impl Columns {
    fn push(&mut self, rule: &FieldRule, token: &str, line: usize) -> Result<(), ParseError> {
        let unreadable = || {
            ParseError::malformed(
                line,
                format!(
                    "cannot read `{}` as {} for `{}`",
                    token,
                    if rule.field.is_integer() { "an integer" } else { "a real number" },
                    rule.pattern
                ),
            )
        };

        match rule.field {
            Field::Dofs => self.dofs.push(token.parse().map_err(|_| unreadable())?),
            Field::P => self.p.push(token.parse().map_err(|_| unreadable())?),
            Field::Q => self.q.push(token.parse().map_err(|_| unreadable())?),
            Field::H => self.h.push(token.parse().map_err(|_| unreadable())?),
            Field::Tau => self.tau.push(token.parse().map_err(|_| unreadable())?),
            Field::Error(norm) => {
                let value: f64 = token.parse().map_err(|_| unreadable())?;
                self.errors.entry(norm).or_default().push(value);
            }
        }

        Ok(())
    }

    fn into_table(self) -> Result<ConvergenceTable, ParseError> {
        let tests = self.dofs.len();

        if tests == 0 {
            return Err(ParseError::Inconsistent(String::from("no `DoFs:` entries")));
        }
        if self.p.is_empty() || self.q.is_empty() {
            return Err(ParseError::Inconsistent(String::from(
                "missing polynomial degrees (`p:` and `q:` entries)",
            )));
        }

        let check_length = |name: &str, len: usize| {
            if len == tests {
                Ok(())
            } else {
                Err(ParseError::Inconsistent(format!(
                    "{} `DoFs:` entries but {} `{}` entries",
                    tests, len, name
                )))
            }
        };

        check_length("h:", self.h.len())?;
        check_length("t:", self.tau.len())?;
        for (norm, values) in self.errors.iter() {
            check_length(norm.key(), values.len())?;
        }

        tracing::debug!(
            tests,
            norms = self.errors.len(),
            "read error report"
        );

        Ok(ConvergenceTable {
            dofs: self.dofs,
            p: self.p,
            q: self.q,
            h: DVector::from_vec(self.h),
            tau: DVector::from_vec(self.tau),
            errors: self
                .errors
                .into_iter()
                .map(|(norm, values)| (norm, DVector::from_vec(values)))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SINGLE_TEST: &str = "DoFs: 10\np: 1\nq: 1\nh: 0.5\nt: 0.5\nl2l2: 0.01\n";

    #[test]
    fn single_test_report() {
        let table = ConvergenceTable::parse(SINGLE_TEST).unwrap();

        assert_eq!(table.dofs(), &[10]);
        assert_eq!(table.p(), &[1]);
        assert_eq!(table.q(), &[1]);
        assert_eq!(table.h().as_slice(), &[0.5]);
        assert_eq!(table.tau().as_slice(), &[0.5]);
        assert_eq!(table.error(Norm::L2L2).unwrap().as_slice(), &[0.01]);
        assert!(table.error(Norm::L2T).is_none());
        assert_eq!(table.nominal_orders(), NominalOrders { p: 1, q: 1 });
    }

    #[test]
    fn solver_report_from_file() {
        let table = ConvergenceTable::from_file("./test_input/thConvergence_1_1.e21").unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.dofs(), &[576, 2304, 9216]);
        assert_eq!(table.nominal_orders(), NominalOrders { p: 1, q: 1 });
        assert_eq!(table.norms().collect::<Vec<_>>(), vec![Norm::L2L2, Norm::L2T, Norm::L2H1]);

        for norm in table.norms() {
            assert_eq!(table.error(norm).unwrap().len(), table.len());
        }
        assert_eq!(table.h().len(), table.len());
        assert_eq!(table.tau().len(), table.len());

        assert_relative_eq!(table.h()[2], 0.0883883476483184);
        assert_relative_eq!(table.tau()[0], 0.25);
        assert_relative_eq!(table.error(Norm::L2H1).unwrap()[1], 0.0143203711214);

        let last = table.record(2).unwrap();
        assert_eq!(last.dofs, 9216);
        assert_eq!(last.errors.len(), 3);
        assert_eq!(table.records().count(), 3);
    }

    #[test]
    fn lines_feed_every_matching_column() {
        // "h: " and "t: " both appear on the same line
        let table = ConvergenceTable::parse("DoFs: 4\np: 2\nq: 2\nh: t: 0.125\n").unwrap();

        assert_eq!(table.h().as_slice(), &[0.125]);
        assert_eq!(table.tau().as_slice(), &[0.125]);
    }

    #[test]
    fn unrecognised_lines_are_ignored() {
        let report = format!("[Ivo] Error\nsomething else entirely\n{}", SINGLE_TEST);
        let table = ConvergenceTable::parse(&report).unwrap();

        assert_eq!(table.len(), 1);
    }

    #[test]
    fn unreadable_value_is_malformed() {
        match ConvergenceTable::parse("DoFs: ten\np: 1\nq: 1\nh: 0.5\nt: 0.5\n") {
            Err(ParseError::Malformed { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected a Malformed error, got {:?}", other),
        }
    }

    #[test]
    fn every_column_reports_unreadable_values() {
        for (report, bad_line) in [
            ("DoFs: 10\np: one\nq: 1\nh: 0.5\nt: 0.5\n", 2),
            ("DoFs: 10\np: 1\nq: 1\nh: 0.5\nt: half\n", 5),
            ("DoFs: 10\np: 1\nq: 1\nh: 0.5\nt: 0.5\nl2l2: n/a\n", 6),
        ] {
            match ConvergenceTable::parse(report) {
                Err(ParseError::Malformed { line, .. }) => assert_eq!(line, bad_line),
                other => panic!("expected a Malformed error, got {:?}", other),
            }
        }
    }

    #[test]
    fn columns_must_have_matching_lengths() {
        assert!(matches!(
            ConvergenceTable::parse("DoFs: 10\nDoFs: 20\np: 1\nq: 1\nh: 0.5\nh: 0.25\nt: 0.5\n"),
            Err(ParseError::Inconsistent(_))
        ));
        assert!(matches!(
            ConvergenceTable::parse(""),
            Err(ParseError::Inconsistent(_))
        ));
    }
}
