//! Small dense linear algebra for least squares
//!
//! Window regressions have a handful of columns, so the design matrix is
//! decomposed directly with one-sided Jacobi rotations (Hestenes SVD) rather
//! than through its normal matrix, which would square the condition number.
//! Singular values below `f64::EPSILON * max(rows, cols) * sigma_max` are
//! treated as zero, which yields the minimum-norm solution when window
//! columns are collinear.

/// Upper bound on Jacobi sweeps; small matrices converge in well under ten.
const MAX_SWEEPS: usize = 60;

/// Singular value decomposition `A = U diag(s) V'` of a dense matrix.
#[derive(Debug, Clone)]
pub struct Svd {
    /// Singular values, unsorted
    singular_values: Vec<f64>,
    /// `left[k]` is `U[:, k] * singular_values[k]`, a column of length `rows`
    left: Vec<Vec<f64>>,
    /// `right[k]` is the unit vector `V[:, k]`
    right: Vec<Vec<f64>>,
    rows: usize,
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn rotate(columns: &mut [Vec<f64>], p: usize, q: usize, c: f64, s: f64) {
    let (head, tail) = columns.split_at_mut(q);
    for (xp, xq) in head[p].iter_mut().zip(tail[0].iter_mut()) {
        let (a, b) = (*xp, *xq);
        *xp = c * a - s * b;
        *xq = s * a + c * b;
    }
}

impl Svd {
    /// Decompose a `rows x cols` matrix given as rows.
    pub fn new(matrix: &[Vec<f64>]) -> Self {
        let rows = matrix.len();
        let cols = matrix.first().map_or(0, Vec::len);

        let mut left: Vec<Vec<f64>> = (0..cols)
            .map(|j| matrix.iter().map(|row| row[j]).collect())
            .collect();
        let mut right: Vec<Vec<f64>> = (0..cols)
            .map(|j| (0..cols).map(|i| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();

        // Columns this small are below any rank cutoff; rotating them only
        // chases rounding noise.
        let frobenius: f64 = left.iter().map(|c| dot(c, c)).sum();
        let negligible = f64::EPSILON * f64::EPSILON * frobenius;

        for _ in 0..MAX_SWEEPS {
            let mut rotated = false;
            for p in 0..cols {
                for q in (p + 1)..cols {
                    let alpha = dot(&left[p], &left[p]);
                    let beta = dot(&left[q], &left[q]);
                    if alpha <= negligible || beta <= negligible {
                        continue;
                    }
                    let gamma = dot(&left[p], &left[q]);
                    if gamma.abs() <= f64::EPSILON * (alpha * beta).sqrt() {
                        continue;
                    }

                    let zeta = (beta - alpha) / (2.0 * gamma);
                    let t = zeta.signum() / (zeta.abs() + (zeta * zeta + 1.0).sqrt());
                    let c = 1.0 / (t * t + 1.0).sqrt();
                    let s = t * c;

                    rotate(&mut left, p, q, c, s);
                    rotate(&mut right, p, q, c, s);
                    rotated = true;
                }
            }
            if !rotated {
                break;
            }
        }

        let singular_values = left.iter().map(|c| dot(c, c).sqrt()).collect();
        Self {
            singular_values,
            left,
            right,
            rows,
        }
    }

    pub fn singular_values(&self) -> &[f64] {
        &self.singular_values
    }

    /// Number of singular values above the rank cutoff.
    pub fn rank(&self) -> usize {
        let cutoff = self.cutoff();
        self.singular_values.iter().filter(|&&s| s > cutoff).count()
    }

    /// Minimum-norm least-squares solution of `A x = b`.
    pub fn solve(&self, b: &[f64]) -> Vec<f64> {
        let cutoff = self.cutoff();
        let mut x = vec![0.0; self.right.len()];

        for ((sigma, u), v) in self
            .singular_values
            .iter()
            .zip(&self.left)
            .zip(&self.right)
        {
            if *sigma <= cutoff {
                continue;
            }
            // `u` carries a factor of sigma, hence the square.
            let weight = dot(u, b) / (sigma * sigma);
            for (xi, vi) in x.iter_mut().zip(v) {
                *xi += weight * vi;
            }
        }

        x
    }

    fn cutoff(&self) -> f64 {
        let max = self.singular_values.iter().cloned().fold(0.0_f64, f64::max);
        f64::EPSILON * self.rows.max(self.right.len()) as f64 * max
    }
}
