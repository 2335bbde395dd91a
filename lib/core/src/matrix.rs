use crate::record::SkippedRecord;
use crate::vector::{Dimension, FeatureVector};
use ahash::AHashMap;
use serde::Serialize;

/// Ordered rows of (city id, feature vector)
///
/// Row order is the order of the source records and is the tie-break order
/// for ranking.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CityMatrix {
    /// (city id, vector) in source order
    rows: Vec<(String, FeatureVector)>,
    /// First row of each id
    #[serde(skip)]
    index: AHashMap<String, usize>,
    skipped: Vec<SkippedRecord>,
}

impl CityMatrix {
    /// Empty matrix
    pub fn new() -> Self {
        Self::default()
    }

    /// Matrix holding `rows` in the given order
    pub fn from_rows(rows: Vec<(String, FeatureVector)>) -> Self {
        let mut matrix = Self::new();
        for (city, vector) in rows {
            matrix.push(city, vector);
        }
        matrix
    }

    /// Append a row; a repeated id keeps the first row for lookups
    pub fn push(&mut self, city: impl Into<String>, vector: FeatureVector) {
        let city = city.into();
        self.index.entry(city.clone()).or_insert(self.rows.len());
        self.rows.push((city, vector));
    }

    /// Note a record that was left out of the matrix
    pub fn record_skip(&mut self, skipped: SkippedRecord) {
        self.skipped.push(skipped);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Vector of the first row with id `city`
    pub fn get(&self, city: &str) -> Option<&FeatureVector> {
        self.index.get(city).map(|&i| &self.rows[i].1)
    }

    /// Every row, including repeated ids
    pub fn rows(&self) -> &[(String, FeatureVector)] {
        &self.rows
    }

    /// Mutable vectors in row order
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut FeatureVector> {
        self.rows.iter_mut().map(|(_, v)| v)
    }

    /// Row ids in order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(id, _)| id.as_str())
    }

    /// All values of one dimension, in row order
    pub fn column(&self, dim: Dimension) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |(_, v)| v.get(dim))
    }

    /// Records that could not be vectorized while building this matrix
    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec_with(dim: Dimension, value: f64) -> FeatureVector {
        let mut v = FeatureVector::zeros();
        v.set(dim, value);
        v
    }

    #[test]
    fn test_push_and_lookup() {
        let mut matrix = CityMatrix::new();
        matrix.push("Lisbon", vec_with(Dimension::Climate, 1.0));
        matrix.push("Porto", vec_with(Dimension::Climate, 2.0));

        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix.get("Porto").unwrap()[Dimension::Climate], 2.0);
        assert!(matrix.get("Faro").is_none());
        assert_eq!(matrix.ids().collect::<Vec<_>>(), vec!["Lisbon", "Porto"]);
    }

    #[test]
    fn test_duplicate_id_keeps_first_for_lookup() {
        let matrix = CityMatrix::from_rows(vec![
            ("Paris".to_string(), vec_with(Dimension::Cost, 1.0)),
            ("Paris".to_string(), vec_with(Dimension::Cost, 9.0)),
        ]);
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix.get("Paris").unwrap()[Dimension::Cost], 1.0);
    }

    #[test]
    fn test_column() {
        let matrix = CityMatrix::from_rows(vec![
            ("a".to_string(), vec_with(Dimension::Green, 3.0)),
            ("b".to_string(), vec_with(Dimension::Green, 5.0)),
        ]);
        assert_eq!(matrix.column(Dimension::Green).collect::<Vec<_>>(), vec![3.0, 5.0]);
    }
}
