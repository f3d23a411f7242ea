use super::{data_lines, Dump, ParseError};

/// A pointwise evaluation of the numerical solution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub t: f64,
    pub value: f64,
}

/// Solution samples, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionSamples {
    pub samples: Vec<Sample>,
}

impl SolutionSamples {
    /// `[min, max]` of the sampled values. `None` if there are no samples.
    pub fn value_range(&self) -> Option<[f64; 2]> {
        self.samples.iter().fold(None, |acc, s| match acc {
            None => Some([s.value, s.value]),
            Some([min, max]) => Some([min.min(s.value), max.max(s.value)]),
        })
    }
}

impl Dump for SolutionSamples {
    const EXTENSION: &'static str = "s21";

    /// Each line holds exactly four comma separated values: `x,y,t,value`.
    ///
    /// Unlike the polygon formats there is no per-line recovery; any malformed line fails the whole dump.
    fn parse(contents: &str) -> Result<Self, ParseError> {
        let samples = data_lines(contents)
            .map(|(line_number, line)| read_sample(line_number, line))
            .collect::<Result<Vec<Sample>, ParseError>>()?;

        tracing::debug!(samples = samples.len(), "read solution samples");

        Ok(Self { samples })
    }
}

fn read_sample(line_number: usize, line: &str) -> Result<Sample, ParseError> {
    let tokens: Vec<&str> = line.split(',').collect();
    if tokens.len() != 4 {
        return Err(ParseError::malformed(
            line_number,
            format!("expected 4 comma separated values, found {}", tokens.len()),
        ));
    }

    let mut values = [0.0; 4];
    for (value, token) in values.iter_mut().zip(tokens) {
        *value = token.trim().parse().map_err(|_| {
            ParseError::malformed(line_number, format!("cannot read `{}` as a real number", token))
        })?;
    }

    let [x, y, t, value] = values;
    Ok(Sample { x, y, t, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_from_file() {
        let samples = SolutionSamples::from_file("./test_input/Test_Problem_Solution.s21").unwrap();

        assert_eq!(samples.samples.len(), 4);
        assert_eq!(
            samples.samples[2],
            Sample {
                x: 0.5,
                y: 0.5,
                t: 0.5,
                value: 0.125
            }
        );
        assert_eq!(samples.value_range(), Some([-0.5, 0.25]));
    }

    #[test]
    fn short_line_fails_the_dump() {
        match SolutionSamples::parse("0,0,0,1\n0,0,1\n1,1,1,1\n") {
            Err(ParseError::Malformed { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected a Malformed error, got {:?}", other),
        }
    }

    #[test]
    fn unreadable_value_fails_the_dump() {
        assert!(matches!(
            SolutionSamples::parse("0,0,zero,1\n"),
            Err(ParseError::Malformed { line: 1, .. })
        ));
    }
}
