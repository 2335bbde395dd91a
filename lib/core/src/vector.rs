use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Added to every L2 norm before dividing, so a zero vector stays zero
pub const NORM_EPSILON: f64 = 1e-6;

/// Named axes of a [`FeatureVector`], in their fixed storage order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Cost,
    Climate,
    Green,
    Nightlife,
    JobMarket,
    Safety,
    International,
    Walkability,
    Culture,
    Health,
    AirQuality,
}

impl Dimension {
    pub const COUNT: usize = 11;

    pub const ALL: [Dimension; Dimension::COUNT] = [
        Dimension::Cost,
        Dimension::Climate,
        Dimension::Green,
        Dimension::Nightlife,
        Dimension::JobMarket,
        Dimension::Safety,
        Dimension::International,
        Dimension::Walkability,
        Dimension::Culture,
        Dimension::Health,
        Dimension::AirQuality,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Cost => "cost",
            Dimension::Climate => "climate",
            Dimension::Green => "green",
            Dimension::Nightlife => "nightlife",
            Dimension::JobMarket => "job_market",
            Dimension::Safety => "safety",
            Dimension::International => "international",
            Dimension::Walkability => "walkability",
            Dimension::Culture => "culture",
            Dimension::Health => "health",
            Dimension::AirQuality => "air_quality",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dimension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::ALL
            .iter()
            .copied()
            .find(|d| d.name() == s.trim())
            .ok_or_else(|| Error::UnknownDimension(s.to_string()))
    }
}

/// Fixed-size feature vector addressed by [`Dimension`]
///
/// The dimension set lives in the type, so any two vectors are always
/// comparable component by component.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    data: [f64; Dimension::COUNT],
}

impl FeatureVector {
    #[inline]
    #[must_use]
    pub fn zeros() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn from_array(data: [f64; Dimension::COUNT]) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> &[f64; Dimension::COUNT] {
        &self.data
    }

    #[inline]
    pub fn get(&self, dim: Dimension) -> f64 {
        self.data[dim.index()]
    }

    #[inline]
    pub fn set(&mut self, dim: Dimension, value: f64) {
        self.data[dim.index()] = value;
    }

    #[inline]
    pub fn add(&mut self, dim: Dimension, delta: f64) {
        self.data[dim.index()] += delta;
    }

    /// (dimension, value) pairs in storage order
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        Dimension::ALL.iter().map(move |d| (*d, self.data[d.index()]))
    }

    #[inline]
    pub fn dot(&self, other: &FeatureVector) -> f64 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Euclidean norm
    #[inline]
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Divide every component by `norm + NORM_EPSILON`
    #[inline]
    pub fn l2_normalize(&mut self) {
        let denom = self.norm() + NORM_EPSILON;
        for x in &mut self.data {
            *x /= denom;
        }
    }

    #[inline]
    #[must_use]
    pub fn l2_normalized(&self) -> Self {
        let mut v = *self;
        v.l2_normalize();
        v
    }

    /// Cosine similarity of the epsilon-normalized vectors
    #[inline]
    pub fn cosine_similarity(&self, other: &FeatureVector) -> f64 {
        self.l2_normalized().dot(&other.l2_normalized())
    }
}

impl Index<Dimension> for FeatureVector {
    type Output = f64;

    fn index(&self, dim: Dimension) -> &f64 {
        &self.data[dim.index()]
    }
}

impl IndexMut<Dimension> for FeatureVector {
    fn index_mut(&mut self, dim: Dimension) -> &mut f64 {
        &mut self.data[dim.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_order_matches_index() {
        for (i, dim) in Dimension::ALL.iter().enumerate() {
            assert_eq!(dim.index(), i);
        }
        assert_eq!(Dimension::ALL[0], Dimension::Cost);
        assert_eq!(Dimension::ALL[10], Dimension::AirQuality);
    }

    #[test]
    fn test_dimension_parse() {
        assert_eq!("job_market".parse::<Dimension>().unwrap(), Dimension::JobMarket);
        assert_eq!(" air_quality ".parse::<Dimension>().unwrap(), Dimension::AirQuality);
        assert!("weather".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_cosine_similarity() {
        let mut v1 = FeatureVector::zeros();
        v1.set(Dimension::Cost, 1.0);
        let v2 = v1;
        assert!((v1.cosine_similarity(&v2) - 1.0).abs() < 1e-5);

        let mut v3 = FeatureVector::zeros();
        v3.set(Dimension::Green, 1.0);
        assert!(v1.cosine_similarity(&v3).abs() < 1e-9);
    }

    #[test]
    fn test_l2_normalize_zero_vector_stays_zero() {
        let v = FeatureVector::zeros().l2_normalized();
        assert_eq!(v, FeatureVector::zeros());
    }

    #[test]
    fn test_l2_normalize_unit_norm() {
        let mut v = FeatureVector::zeros();
        v.set(Dimension::Climate, 3.0);
        v.set(Dimension::Health, 4.0);
        let n = v.l2_normalized();
        assert!((n.norm() - 1.0).abs() < 1e-6);
        assert!((n[Dimension::Climate] - 3.0 / (5.0 + NORM_EPSILON)).abs() < 1e-12);
    }

    #[test]
    fn test_iter_yields_all_dimensions() {
        let v = FeatureVector::from_array([1.0; Dimension::COUNT]);
        let dims: Vec<Dimension> = v.iter().map(|(d, _)| d).collect();
        assert_eq!(dims, Dimension::ALL.to_vec());
    }

    #[test]
    fn test_serializes_dimension_names() {
        let json = serde_json::to_string(&Dimension::JobMarket).unwrap();
        assert_eq!(json, "\"job_market\"");
    }
}
