//! Variable domains
//!
//! Per-gene bounds used by clamp strategies, population generators and
//! domain-aware operators.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive bounds for a single gene position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Lower bound (inclusive)
    pub low: f64,
    /// Upper bound (inclusive)
    pub high: f64,
}

impl Domain {
    /// Create a new domain
    ///
    /// # Panics
    /// Panics if low > high
    pub fn new(low: f64, high: f64) -> Self {
        assert!(
            low <= high,
            "Invalid domain: low ({}) must be <= high ({})",
            low,
            high
        );
        Self { low, high }
    }

    /// Create a symmetric domain centered at 0
    pub fn symmetric(half_width: f64) -> Self {
        Self::new(-half_width, half_width)
    }

    /// Create the unit domain [0, 1]
    pub fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Get the width (high - low)
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Get the center point
    pub fn center(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    /// Check if a value is within the domain
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    /// Clip a value to the domain
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.low, self.high)
    }

    /// Fold an out-of-domain value back across the violated bound.
    ///
    /// Values already inside the domain are returned unchanged.
    pub fn reflect(&self, value: f64) -> f64 {
        if self.contains(value) {
            return value;
        }
        let range = self.range();
        if range == 0.0 {
            return self.low;
        }
        // Fold into a period of 2 * range, then mirror the upper half.
        let mut offset = (value - self.low) % (2.0 * range);
        if offset < 0.0 {
            offset += 2.0 * range;
        }
        if offset <= range {
            self.low + offset
        } else {
            self.low + 2.0 * range - offset
        }
    }

    /// Wrap an out-of-domain value around modularly.
    ///
    /// Values already inside the domain are returned unchanged.
    pub fn wrap(&self, value: f64) -> f64 {
        if self.contains(value) {
            return value;
        }
        let range = self.range();
        if range == 0.0 {
            return self.low;
        }
        let mut offset = (value - self.low) % range;
        if offset < 0.0 {
            offset += range;
        }
        self.low + offset
    }

    /// Draw a uniform random value from the domain
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.range() == 0.0 {
            self.low
        } else {
            rng.gen_range(self.low..=self.high)
        }
    }
}

impl From<(f64, f64)> for Domain {
    fn from((low, high): (f64, f64)) -> Self {
        Self::new(low, high)
    }
}

/// Ordered per-gene domains for a whole chromosome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDomains {
    /// One domain per gene position
    pub domains: Vec<Domain>,
}

impl VariableDomains {
    /// Create from explicit per-gene domains
    pub fn new(domains: Vec<Domain>) -> Self {
        Self { domains }
    }

    /// Create uniform domains for all gene positions
    pub fn uniform(domain: Domain, dimension: usize) -> Self {
        Self {
            domains: vec![domain; dimension],
        }
    }

    /// Create symmetric domains for all gene positions
    pub fn symmetric(half_width: f64, dimension: usize) -> Self {
        Self::uniform(Domain::symmetric(half_width), dimension)
    }

    /// Number of gene positions covered
    pub fn dimension(&self) -> usize {
        self.domains.len()
    }

    /// Get the domain of a specific gene position
    pub fn get(&self, index: usize) -> Option<&Domain> {
        self.domains.get(index)
    }

    /// Clip every gene of a chromosome into its domain, in place
    pub fn clamp_chromosome(&self, chromosome: &mut [f64]) {
        for (gene, domain) in chromosome.iter_mut().zip(&self.domains) {
            *gene = domain.clamp(*gene);
        }
    }

    /// Check if every gene of a chromosome lies within its domain
    pub fn contains_chromosome(&self, chromosome: &[f64]) -> bool {
        chromosome
            .iter()
            .enumerate()
            .all(|(i, &gene)| self.domains.get(i).is_some_and(|d| d.contains(gene)))
    }
}

impl FromIterator<Domain> for VariableDomains {
    fn from_iter<I: IntoIterator<Item = Domain>>(iter: I) -> Self {
        Self {
            domains: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<(f64, f64)> for VariableDomains {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        Self {
            domains: iter.into_iter().map(Domain::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_new() {
        let d = Domain::new(-5.0, 5.0);
        assert_eq!(d.low, -5.0);
        assert_eq!(d.high, 5.0);
        assert_eq!(d.range(), 10.0);
        assert_eq!(d.center(), 0.0);
    }

    #[test]
    #[should_panic(expected = "Invalid domain")]
    fn test_domain_invalid() {
        Domain::new(5.0, -5.0);
    }

    #[test]
    fn test_domain_contains_and_clamp() {
        let d = Domain::new(-5.0, 5.0);
        assert!(d.contains(0.0));
        assert!(d.contains(-5.0));
        assert!(d.contains(5.0));
        assert!(!d.contains(5.1));
        assert_eq!(d.clamp(10.0), 5.0);
        assert_eq!(d.clamp(-10.0), -5.0);
        assert_eq!(d.clamp(1.0), 1.0);
    }

    #[test]
    fn test_domain_reflect() {
        let d = Domain::new(0.0, 10.0);
        assert_eq!(d.reflect(3.0), 3.0);
        assert_eq!(d.reflect(12.0), 8.0);
        assert_eq!(d.reflect(-2.0), 2.0);
        // Two full periods out still folds back inside.
        assert!(d.contains(d.reflect(47.0)));
        assert!(d.contains(d.reflect(-33.0)));
    }

    #[test]
    fn test_domain_wrap() {
        let d = Domain::new(0.0, 10.0);
        assert_eq!(d.wrap(3.0), 3.0);
        assert_eq!(d.wrap(12.0), 2.0);
        assert_eq!(d.wrap(-2.0), 8.0);
        assert!(d.contains(d.wrap(123.4)));
        assert!(d.contains(d.wrap(-123.4)));
    }

    #[test]
    fn test_domain_degenerate() {
        let d = Domain::new(2.0, 2.0);
        assert_eq!(d.reflect(5.0), 2.0);
        assert_eq!(d.wrap(-1.0), 2.0);
        let mut rng = rand::thread_rng();
        assert_eq!(d.sample(&mut rng), 2.0);
    }

    #[test]
    fn test_domain_sample_in_range() {
        let d = Domain::new(-3.0, 7.0);
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            assert!(d.contains(d.sample(&mut rng)));
        }
    }

    #[test]
    fn test_variable_domains_uniform() {
        let vd = VariableDomains::symmetric(5.0, 3);
        assert_eq!(vd.dimension(), 3);
        assert_eq!(vd.get(0), Some(&Domain::symmetric(5.0)));
        assert_eq!(vd.get(3), None);
    }

    #[test]
    fn test_variable_domains_clamp_chromosome() {
        let vd = VariableDomains::symmetric(5.0, 3);
        let mut chromosome = vec![-10.0, 0.0, 10.0];
        vd.clamp_chromosome(&mut chromosome);
        assert_eq!(chromosome, vec![-5.0, 0.0, 5.0]);
    }

    #[test]
    fn test_variable_domains_contains_chromosome() {
        let vd = VariableDomains::symmetric(5.0, 3);
        assert!(vd.contains_chromosome(&[0.0, -5.0, 5.0]));
        assert!(!vd.contains_chromosome(&[0.0, -6.0, 5.0]));
    }

    #[test]
    fn test_variable_domains_from_tuples() {
        let vd: VariableDomains = vec![(0.0, 1.0), (-10.0, 10.0)].into_iter().collect();
        assert_eq!(vd.dimension(), 2);
        assert_eq!(vd.get(1), Some(&Domain::new(-10.0, 10.0)));
    }
}
