//! Vector normalization
//!
//! Column-wise min-max scaling across a collection of feature vectors, and
//! per-vector L2 normalization.

use citymatch_core::{CityMatrix, Dimension, FeatureVector};
use serde::{Deserialize, Serialize};

/// Per-dimension minimum and maximum observed over a collection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    data_min: [f64; Dimension::COUNT],
    data_max: [f64; Dimension::COUNT],
}

impl MinMaxScaler {
    /// Computes the min and max of each dimension. `None` for an empty collection.
    pub fn fit<'a>(vectors: impl IntoIterator<Item = &'a FeatureVector>) -> Option<Self> {
        let mut data_min = [f64::INFINITY; Dimension::COUNT];
        let mut data_max = [f64::NEG_INFINITY; Dimension::COUNT];
        let mut seen = false;

        for v in vectors {
            seen = true;
            for (j, &val) in v.as_array().iter().enumerate() {
                if val < data_min[j] {
                    data_min[j] = val;
                }
                if val > data_max[j] {
                    data_max[j] = val;
                }
            }
        }

        seen.then_some(Self { data_min, data_max })
    }

    pub fn data_min(&self, dim: Dimension) -> f64 {
        self.data_min[dim.index()]
    }

    pub fn data_max(&self, dim: Dimension) -> f64 {
        self.data_max[dim.index()]
    }

    /// Maps each component to `[0, 1]`; a constant column maps to 0
    pub fn transform(&self, v: &FeatureVector) -> FeatureVector {
        let mut out = FeatureVector::zeros();
        for dim in Dimension::ALL {
            let j = dim.index();
            let range = self.data_max[j] - self.data_min[j];
            let scaled = if range != 0.0 {
                (v.get(dim) - self.data_min[j]) / range
            } else {
                0.0
            };
            out.set(dim, scaled);
        }
        out
    }
}

/// Min-max scale a collection in place, column by column
pub fn min_max_normalize(vectors: &mut [FeatureVector]) {
    if let Some(scaler) = MinMaxScaler::fit(vectors.iter()) {
        for v in vectors.iter_mut() {
            *v = scaler.transform(v);
        }
    }
}

/// Min-max scale every row of a city matrix in place
pub fn min_max_normalize_matrix(matrix: &mut CityMatrix) {
    if let Some(scaler) = MinMaxScaler::fit(matrix.rows().iter().map(|(_, v)| v)) {
        for v in matrix.rows_mut() {
            *v = scaler.transform(v);
        }
    }
}

/// `v / (||v|| + 1e-6)`
pub fn l2_normalize(v: &FeatureVector) -> FeatureVector {
    v.l2_normalized()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(values: [f64; Dimension::COUNT]) -> FeatureVector {
        FeatureVector::from_array(values)
    }

    #[test]
    fn test_min_max_maps_extremes_exactly() {
        let mut vectors = vec![
            vector([-1200.0, -3.0, 0.2, 5.1, 30000.0, 31000.0, 1.0, 40.0, 9.1, 120.0, 30.0]),
            vector([-800.0, -40.0, 0.7, 7.9, 61000.0, 62000.0, 1.5, 95.0, 12.3, 130.0, 10.0]),
            vector([-1000.0, -12.0, 0.4, 6.0, 45000.0, 45500.0, 0.0, 60.0, 10.0, 125.0, 22.0]),
        ];
        min_max_normalize(&mut vectors);

        for dim in Dimension::ALL {
            let col: Vec<f64> = vectors.iter().map(|v| v.get(dim)).collect();
            let min = col.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = col.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(min, 0.0, "min of {dim}");
            assert_eq!(max, 1.0, "max of {dim}");
        }
        assert!((vectors[2].get(Dimension::Cost) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_constant_column_maps_to_zero() {
        let mut a = FeatureVector::zeros();
        let mut b = FeatureVector::zeros();
        a.set(Dimension::Green, 7.0);
        b.set(Dimension::Green, 7.0);
        a.set(Dimension::Cost, 1.0);
        b.set(Dimension::Cost, 3.0);

        let mut vectors = vec![a, b];
        min_max_normalize(&mut vectors);

        assert_eq!(vectors[0].get(Dimension::Green), 0.0);
        assert_eq!(vectors[1].get(Dimension::Green), 0.0);
        assert!(vectors.iter().all(|v| v.as_array().iter().all(|x| x.is_finite())));
        assert_eq!(vectors[1].get(Dimension::Cost), 1.0);
    }

    #[test]
    fn test_empty_collection_is_untouched() {
        let mut vectors: Vec<FeatureVector> = Vec::new();
        min_max_normalize(&mut vectors);
        assert!(vectors.is_empty());
        assert!(MinMaxScaler::fit(vectors.iter()).is_none());
    }

    #[test]
    fn test_normalize_matrix_rows() {
        let mut low = FeatureVector::zeros();
        low.set(Dimension::Health, 100.0);
        let mut high = FeatureVector::zeros();
        high.set(Dimension::Health, 150.0);

        let mut matrix = CityMatrix::from_rows(vec![
            ("Low".to_string(), low),
            ("High".to_string(), high),
        ]);
        min_max_normalize_matrix(&mut matrix);

        assert_eq!(matrix.get("Low").unwrap()[Dimension::Health], 0.0);
        assert_eq!(matrix.get("High").unwrap()[Dimension::Health], 1.0);
    }

    #[test]
    fn test_l2_normalize() {
        let v = vector([1.0; Dimension::COUNT]);
        let n = l2_normalize(&v);
        assert!((n.norm() - 1.0).abs() < 1e-6);
        assert_eq!(l2_normalize(&FeatureVector::zeros()), FeatureVector::zeros());
    }
}
