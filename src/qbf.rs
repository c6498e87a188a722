//! Maximum quadratic binary function, optionally knapsack-constrained.
//!
//! For a matrix `A` the objective of a subset `S` is
//! `f(S) = sum over i, j in S of A[i][j]`, maximized. The evaluator reports
//! `-f(S)` so the engines can minimize it. With a knapsack, every element
//! carries a weight and the total weight of `S` may not exceed the capacity.
//!
//! Instance files (`n`, capacity, `n` weights, then the upper triangle of
//! `A` row by row) are read by [`Qbf::from_reader`] and friends.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use crate::error::EvaluatorError;
use crate::evaluator::Evaluator;
use crate::solution::Solution;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Knapsack {
    weights: Vec<f64>,
    capacity: f64,
}

/// A (knapsack) QBF instance.
///
/// # Examples
///
/// ```
/// use u_grasp::qbf::Qbf;
/// use u_grasp::{Evaluator, Solution};
///
/// let qbf = Qbf::new(vec![vec![1.0, 2.0], vec![0.0, -4.0]])
///     .with_knapsack(vec![1.0, 1.0], 1.0);
/// let both = Solution::from_elements([0, 1]);
/// assert_eq!(qbf.evaluate(&both), 1.0);
/// assert!(!qbf.fits(1, &Solution::from_elements([0])));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Qbf {
    matrix: Vec<Vec<f64>>,
    knapsack: Option<Knapsack>,
}

impl Qbf {
    /// Creates an unconstrained instance. The domain size is the number of rows.
    ///
    /// The matrix is not checked here; [`Evaluator::validate`] reports
    /// ragged rows and non-finite entries before a run starts.
    pub fn new(matrix: Vec<Vec<f64>>) -> Self {
        Self {
            matrix,
            knapsack: None,
        }
    }

    /// Adds a knapsack constraint.
    pub fn with_knapsack(mut self, weights: Vec<f64>, capacity: f64) -> Self {
        self.knapsack = Some(Knapsack { weights, capacity });
        self
    }

    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }

    pub fn capacity(&self) -> Option<f64> {
        self.knapsack.as_ref().map(|k| k.capacity)
    }

    /// Total weight of `solution`, or zero without a knapsack.
    pub fn weight(&self, solution: &Solution) -> f64 {
        match &self.knapsack {
            Some(k) => solution.iter().map(|&e| k.weights[e]).sum(),
            None => 0.0,
        }
    }

    /// `A[i][i] + sum over j in S, j != i of (A[i][j] + A[j][i])`.
    fn contribution(&self, i: usize, solution: &Solution) -> f64 {
        let row = &self.matrix[i];
        let mut sum = row[i];
        for &j in solution {
            if j != i {
                sum += row[j] + self.matrix[j][i];
            }
        }
        sum
    }

    /// Loads a knapsack instance from a file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, QbfLoadError> {
        let file = File::open(path)?;
        Self::from_bufread(BufReader::new(file))
    }

    /// Loads a knapsack instance from any reader.
    pub fn from_reader<R: Read>(r: R) -> Result<Self, QbfLoadError> {
        Self::from_bufread(BufReader::new(r))
    }

    /// Loads a knapsack instance from buffered input.
    pub fn from_bufread<R: BufRead>(rdr: R) -> Result<Self, QbfLoadError> {
        let mut sc = Scanner::new(rdr);
        let n: usize = sc.next()?;
        if n == 0 {
            return Err(QbfLoadError::EmptyInstance);
        }
        let capacity: f64 = sc.next()?;
        let weights = (0..n).map(|_| sc.next()).collect::<Result<Vec<f64>, _>>()?;

        let mut matrix = vec![vec![0.0; n]; n];
        for (i, row) in matrix.iter_mut().enumerate() {
            for a in row.iter_mut().skip(i) {
                *a = sc.next()?;
            }
        }

        let qbf = Self::new(matrix).with_knapsack(weights, capacity);
        qbf.validate()?;
        Ok(qbf)
    }
}

impl FromStr for Qbf {
    type Err = QbfLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_reader(s.as_bytes())
    }
}

impl Evaluator for Qbf {
    fn domain_size(&self) -> usize {
        self.matrix.len()
    }

    fn evaluate(&self, solution: &Solution) -> f64 {
        let mut f = 0.0;
        for &i in solution {
            let row = &self.matrix[i];
            for &j in solution {
                f += row[j];
            }
        }
        -f
    }

    fn insertion_cost(&self, element: usize, solution: &Solution) -> f64 {
        if solution.contains(element) {
            return 0.0;
        }
        -self.contribution(element, solution)
    }

    fn removal_cost(&self, element: usize, solution: &Solution) -> f64 {
        if !solution.contains(element) {
            return 0.0;
        }
        self.contribution(element, solution)
    }

    fn exchange_cost(&self, element_in: usize, element_out: usize, solution: &Solution) -> f64 {
        if element_in == element_out {
            return 0.0;
        }
        if solution.contains(element_in) {
            return self.removal_cost(element_out, solution);
        }
        if !solution.contains(element_out) {
            return self.insertion_cost(element_in, solution);
        }
        // The insertion term counted the pair with `element_out` still present.
        self.insertion_cost(element_in, solution)
            + self.removal_cost(element_out, solution)
            + self.matrix[element_in][element_out]
            + self.matrix[element_out][element_in]
    }

    fn admits(&self, element: usize) -> bool {
        self.knapsack
            .as_ref()
            .is_none_or(|k| k.weights[element] <= k.capacity)
    }

    fn fits(&self, element: usize, solution: &Solution) -> bool {
        self.knapsack
            .as_ref()
            .is_none_or(|k| self.weight(solution) + k.weights[element] <= k.capacity)
    }

    fn validate(&self) -> Result<(), EvaluatorError> {
        let n = self.matrix.len();
        for (i, row) in self.matrix.iter().enumerate() {
            if row.len() != n {
                return Err(EvaluatorError::DimensionMismatch {
                    what: "matrix row",
                    expected: n,
                    found: row.len(),
                });
            }
            if let Some(j) = row.iter().position(|a| !a.is_finite()) {
                return Err(EvaluatorError::NonFinite {
                    what: "matrix",
                    index: i * n + j,
                });
            }
        }
        if let Some(k) = &self.knapsack {
            if k.weights.len() != n {
                return Err(EvaluatorError::DimensionMismatch {
                    what: "weights",
                    expected: n,
                    found: k.weights.len(),
                });
            }
            if let Some(i) = k.weights.iter().position(|w| !w.is_finite()) {
                return Err(EvaluatorError::NonFinite {
                    what: "weights",
                    index: i,
                });
            }
            if !(k.capacity >= 0.0) {
                return Err(EvaluatorError::NegativeCapacity(k.capacity));
            }
        }
        Ok(())
    }
}

/// Failure to load a QBF instance.
#[derive(Debug)]
pub enum QbfLoadError {
    /// Reading the input failed.
    Io(std::io::Error),
    /// The input ended before the instance was complete.
    UnexpectedEof,
    /// A token is not a number of the expected kind.
    Parse {
        token: String,
        type_name: &'static str,
    },
    /// The instance declares zero elements.
    EmptyInstance,
    /// The data was read but does not form a valid instance.
    Invalid(EvaluatorError),
}

impl fmt::Display for QbfLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof => write!(f, "unexpected end of input while reading instance"),
            Self::Parse { token, type_name } => {
                write!(f, "could not parse token '{token}' as {type_name}")
            }
            Self::EmptyInstance => write!(f, "instance size must be positive"),
            Self::Invalid(e) => write!(f, "invalid instance: {e}"),
        }
    }
}

impl std::error::Error for QbfLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for QbfLoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<EvaluatorError> for QbfLoadError {
    fn from(e: EvaluatorError) -> Self {
        Self::Invalid(e)
    }
}

/// Whitespace-delimited tokens; `#` starts a comment running to end of line.
struct Scanner<R> {
    rdr: R,
    line: String,
    tokens: Vec<String>,
}

impl<R: BufRead> Scanner<R> {
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            line: String::new(),
            tokens: Vec::new(),
        }
    }

    fn next<T: FromStr>(&mut self) -> Result<T, QbfLoadError> {
        while self.tokens.is_empty() {
            self.line.clear();
            if self.rdr.read_line(&mut self.line)? == 0 {
                return Err(QbfLoadError::UnexpectedEof);
            }
            let content = self.line.split('#').next().unwrap_or_default();
            // Stored reversed so `pop` yields tokens in reading order.
            self.tokens = content.split_whitespace().rev().map(str::to_owned).collect();
        }
        let token = self.tokens.pop().unwrap_or_default();
        token.parse::<T>().map_err(|_| QbfLoadError::Parse {
            token,
            type_name: std::any::type_name::<T>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Qbf {
        Qbf::new(vec![
            vec![2.0, -3.0, 1.0, 0.0],
            vec![0.0, 1.0, 4.0, -2.0],
            vec![0.0, 0.0, -1.0, 3.0],
            vec![0.0, 0.0, 0.0, -2.0],
        ])
    }

    fn evaluated(qbf: &Qbf, elements: &[usize]) -> Solution {
        let mut sol = Solution::from_elements(elements.iter().copied());
        qbf.refresh_cost(&mut sol);
        sol
    }

    #[test]
    fn test_evaluate_is_negated_quadratic_form() {
        let qbf = sample();
        assert_eq!(qbf.evaluate(&Solution::empty()), 0.0);
        assert_eq!(qbf.evaluate(&Solution::from_elements([1, 2])), -4.0);
        assert_eq!(qbf.evaluate(&Solution::from_elements([0, 1, 3])), 4.0);
        assert_eq!(qbf.evaluate(&Solution::from_elements([0, 1, 2, 3])), -3.0);
    }

    #[test]
    fn test_deltas_match_full_evaluation() {
        let qbf = sample();
        let sol = evaluated(&qbf, &[0, 2]);

        let mut with_one = sol.clone();
        with_one.insert(1);
        assert_eq!(
            sol.cost + qbf.insertion_cost(1, &sol),
            qbf.evaluate(&with_one)
        );

        let mut without_zero = sol.clone();
        without_zero.remove(0);
        assert_eq!(
            sol.cost + qbf.removal_cost(0, &sol),
            qbf.evaluate(&without_zero)
        );

        let mut swapped = sol.clone();
        swapped.remove(0);
        swapped.insert(1);
        assert_eq!(
            sol.cost + qbf.exchange_cost(1, 0, &sol),
            qbf.evaluate(&swapped)
        );
    }

    #[test]
    fn test_degenerate_deltas() {
        let qbf = sample();
        let sol = evaluated(&qbf, &[0, 2]);
        assert_eq!(qbf.insertion_cost(0, &sol), 0.0);
        assert_eq!(qbf.removal_cost(3, &sol), 0.0);
        assert_eq!(qbf.exchange_cost(2, 2, &sol), 0.0);
        assert_eq!(qbf.exchange_cost(2, 0, &sol), qbf.removal_cost(0, &sol));
        assert_eq!(qbf.exchange_cost(1, 3, &sol), qbf.insertion_cost(1, &sol));
    }

    #[test]
    fn test_knapsack_feasibility() {
        let qbf = sample().with_knapsack(vec![1.0, 2.0, 3.0, 5.0], 4.0);
        assert!(qbf.admits(2));
        assert!(!qbf.admits(3));
        let sol = Solution::from_elements([0, 1]);
        assert_eq!(qbf.weight(&sol), 3.0);
        assert!(!qbf.fits(2, &sol));
        assert!(qbf.fits(2, &Solution::from_elements([0])));
        assert_eq!(qbf.capacity(), Some(4.0));
        assert_eq!(sample().capacity(), None);
        assert!(sample().fits(3, &Solution::from_elements([0, 1, 2])));
    }

    #[test]
    fn test_validate() {
        assert!(sample().validate().is_ok());
        assert_eq!(
            Qbf::new(vec![vec![1.0, 2.0]]).validate(),
            Err(EvaluatorError::DimensionMismatch {
                what: "matrix row",
                expected: 1,
                found: 2
            })
        );
        assert_eq!(
            Qbf::new(vec![vec![0.0, 1.0], vec![f64::NAN, 0.0]]).validate(),
            Err(EvaluatorError::NonFinite {
                what: "matrix",
                index: 2
            })
        );
        assert!(matches!(
            sample().with_knapsack(vec![1.0; 3], 1.0).validate(),
            Err(EvaluatorError::DimensionMismatch { what: "weights", .. })
        ));
        assert_eq!(
            sample().with_knapsack(vec![1.0; 4], -1.0).validate(),
            Err(EvaluatorError::NegativeCapacity(-1.0))
        );
    }

    #[test]
    fn test_load_instance() {
        let text = "\
# tiny instance
3 5.0
2 3 4
1 -2 3
  4 0   # second row
    -1
";
        let qbf: Qbf = text.parse().unwrap();
        assert_eq!(qbf.domain_size(), 3);
        assert_eq!(qbf.capacity(), Some(5.0));
        assert_eq!(
            qbf.matrix(),
            &[
                vec![1.0, -2.0, 3.0],
                vec![0.0, 4.0, 0.0],
                vec![0.0, 0.0, -1.0]
            ]
        );
        assert_eq!(qbf.weight(&Solution::from_elements([0, 2])), 6.0);
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            "2 1.0 1 1 0 0".parse::<Qbf>(),
            Err(QbfLoadError::UnexpectedEof)
        ));
        assert!(matches!(
            "0 1.0".parse::<Qbf>(),
            Err(QbfLoadError::EmptyInstance)
        ));
        match "1 1.0 x 0".parse::<Qbf>() {
            Err(QbfLoadError::Parse { token, .. }) => assert_eq!(token, "x"),
            other => panic!("expected parse error, got {other:?}"),
        }
        assert!(matches!(
            "1 -1.0 1 0".parse::<Qbf>(),
            Err(QbfLoadError::Invalid(EvaluatorError::NegativeCapacity(_)))
        ));
    }

    fn instance_and_subset() -> impl Strategy<Value = (Qbf, Vec<bool>, usize, usize)> {
        (2usize..8).prop_flat_map(|n| {
            (
                prop::collection::vec(prop::collection::vec(-10i32..10, n), n),
                prop::collection::vec(any::<bool>(), n),
                0..n,
                0..n,
            )
                .prop_map(|(m, mask, a, b)| {
                    let matrix = m
                        .into_iter()
                        .map(|row| row.into_iter().map(f64::from).collect())
                        .collect();
                    (Qbf::new(matrix), mask, a, b)
                })
        })
    }

    proptest! {
        #[test]
        fn prop_deltas_agree_with_evaluate((qbf, mask, a, b) in instance_and_subset()) {
            let sol = evaluated(&qbf, &(0..mask.len()).filter(|&i| mask[i]).collect::<Vec<_>>());

            let mut ins = sol.clone();
            ins.insert(a);
            prop_assert_eq!(sol.cost + qbf.insertion_cost(a, &sol), qbf.evaluate(&ins));

            let mut rem = sol.clone();
            rem.remove(a);
            prop_assert_eq!(sol.cost + qbf.removal_cost(a, &sol), qbf.evaluate(&rem));

            if !sol.contains(a) && sol.contains(b) {
                let mut ex = sol.clone();
                ex.remove(b);
                ex.insert(a);
                prop_assert_eq!(sol.cost + qbf.exchange_cost(a, b, &sol), qbf.evaluate(&ex));
            }
        }
    }
}
