//! The typed, homogeneous dataset every sort operates on

use super::DataKind;
use crate::core::{BenchError, Result};
use crate::sort::is_sorted;
use serde::{Deserialize, Serialize};
use std::collections::TryReserveError;

/// A homogeneous sequence of values of one [`DataKind`]
///
/// The variant is the kind tag, so a payload can never mix kinds. Every
/// instance owns its storage outright: [`deep_copy`](Self::deep_copy) and
/// `clone` duplicate each element (each `String` gets its own buffer) and
/// dropping a dataset releases it, strings first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values")]
pub enum TypedDataset {
    /// 64-bit integers
    Int64(Vec<i64>),
    /// 64-bit floats
    Float64(Vec<f64>),
    /// Single characters
    Char(Vec<char>),
    /// Independently owned strings
    String(Vec<String>),
}

impl TypedDataset {
    /// An empty dataset of the given kind
    pub fn empty(kind: DataKind) -> Self {
        match kind {
            DataKind::Int64 => TypedDataset::Int64(Vec::new()),
            DataKind::Float64 => TypedDataset::Float64(Vec::new()),
            DataKind::Char => TypedDataset::Char(Vec::new()),
            DataKind::String => TypedDataset::String(Vec::new()),
        }
    }

    /// Build a dataset from manually entered text, one entry per element
    ///
    /// Integers and reals are parsed after trimming; reals must be finite.
    /// A character entry keeps its first character. A string entry is kept
    /// verbatim. Blank entries are rejected for every kind.
    ///
    /// ```rust
    /// use parallel_sort_bench::{DataKind, TypedDataset};
    ///
    /// let data = TypedDataset::from_entries(DataKind::Int64, &["5", " 3", "1"]).unwrap();
    /// assert_eq!(data, TypedDataset::Int64(vec![5, 3, 1]));
    /// ```
    pub fn from_entries<S: AsRef<str>>(kind: DataKind, entries: &[S]) -> Result<Self> {
        let invalid =
            |index: usize, raw: &str| BenchError::invalid_entry(index, raw, kind.display_name());

        let mut dataset = Self::with_capacity(kind, entries.len())?;
        for (index, entry) in entries.iter().enumerate() {
            let raw = entry.as_ref();
            let text = raw.trim();
            if text.is_empty() {
                return Err(invalid(index, raw));
            }

            match &mut dataset {
                TypedDataset::Int64(values) => {
                    values.push(text.parse().map_err(|_| invalid(index, raw))?)
                }
                TypedDataset::Float64(values) => {
                    let value: f64 = text.parse().map_err(|_| invalid(index, raw))?;
                    if !value.is_finite() {
                        return Err(invalid(index, raw));
                    }
                    values.push(value);
                }
                TypedDataset::Char(values) => {
                    // non-empty after trim
                    if let Some(c) = text.chars().next() {
                        values.push(c);
                    }
                }
                TypedDataset::String(values) => values.push(raw.to_string()),
            }
        }
        Ok(dataset)
    }

    /// An empty dataset with room for `capacity` elements
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::AllocationFailure`] if the memory cannot be reserved.
    pub fn with_capacity(kind: DataKind, capacity: usize) -> Result<Self> {
        let mut dataset = Self::empty(kind);
        let reserved = match &mut dataset {
            TypedDataset::Int64(v) => v.try_reserve_exact(capacity),
            TypedDataset::Float64(v) => v.try_reserve_exact(capacity),
            TypedDataset::Char(v) => v.try_reserve_exact(capacity),
            TypedDataset::String(v) => v.try_reserve_exact(capacity),
        };
        reserved.map_err(|_| BenchError::allocation(capacity, kind.display_name()))?;
        Ok(dataset)
    }

    /// Element kind of this dataset
    pub fn kind(&self) -> DataKind {
        match self {
            TypedDataset::Int64(_) => DataKind::Int64,
            TypedDataset::Float64(_) => DataKind::Float64,
            TypedDataset::Char(_) => DataKind::Char,
            TypedDataset::String(_) => DataKind::String,
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            TypedDataset::Int64(v) => v.len(),
            TypedDataset::Float64(v) => v.len(),
            TypedDataset::Char(v) => v.len(),
            TypedDataset::String(v) => v.len(),
        }
    }

    /// True if the dataset holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fully independent copy of this dataset
    ///
    /// Unlike `clone`, running out of memory is reported as
    /// [`BenchError::AllocationFailure`] instead of aborting, and no
    /// partially copied dataset is ever returned.
    pub fn deep_copy(&self) -> Result<Self> {
        let kind = self.kind();
        let oom = || BenchError::allocation(self.len(), kind.display_name());

        let copy = match self {
            TypedDataset::Int64(src) => TypedDataset::Int64(copy_slice(src).map_err(|_| oom())?),
            TypedDataset::Float64(src) => {
                TypedDataset::Float64(copy_slice(src).map_err(|_| oom())?)
            }
            TypedDataset::Char(src) => TypedDataset::Char(copy_slice(src).map_err(|_| oom())?),
            TypedDataset::String(src) => {
                let mut dst = Vec::new();
                dst.try_reserve_exact(src.len()).map_err(|_| oom())?;
                for value in src {
                    let mut owned = String::new();
                    owned.try_reserve_exact(value.len()).map_err(|_| oom())?;
                    owned.push_str(value);
                    dst.push(owned);
                }
                TypedDataset::String(dst)
            }
        };
        Ok(copy)
    }

    /// True if every adjacent pair is in non-decreasing order for this kind
    pub fn is_sorted(&self) -> bool {
        match self {
            TypedDataset::Int64(v) => is_sorted(v),
            TypedDataset::Float64(v) => is_sorted(v),
            TypedDataset::Char(v) => is_sorted(v),
            TypedDataset::String(v) => is_sorted(v),
        }
    }

    /// Element `index` formatted for display, floats with two decimals
    pub fn display_value(&self, index: usize) -> Option<String> {
        match self {
            TypedDataset::Int64(v) => v.get(index).map(|x| x.to_string()),
            TypedDataset::Float64(v) => v.get(index).map(|x| format!("{:.2}", x)),
            TypedDataset::Char(v) => v.get(index).map(|x| x.to_string()),
            TypedDataset::String(v) => v.get(index).cloned(),
        }
    }

    /// Every element formatted with [`display_value`](Self::display_value)
    pub fn display_values(&self) -> Vec<String> {
        (0..self.len()).filter_map(|i| self.display_value(i)).collect()
    }
}

fn copy_slice<T: Copy>(src: &[T]) -> std::result::Result<Vec<T>, TryReserveError> {
    let mut dst = Vec::new();
    dst.try_reserve_exact(src.len())?;
    dst.extend_from_slice(src);
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_kind() {
        for kind in DataKind::ALL {
            let data = TypedDataset::empty(kind);
            assert_eq!(data.kind(), kind);
            assert!(data.is_empty());
            assert!(data.is_sorted());
        }
    }

    #[test]
    fn test_deep_copy_strings_are_independent() {
        let original = TypedDataset::String(vec!["pear".into(), "apple".into()]);
        let mut copy = original.deep_copy().unwrap();
        assert_eq!(copy, original);

        if let (TypedDataset::String(src), TypedDataset::String(dst)) = (&original, &copy) {
            assert_ne!(src[0].as_ptr(), dst[0].as_ptr());
        }

        if let TypedDataset::String(values) = &mut copy {
            values[0].push_str("s");
            values.swap(0, 1);
        }
        assert_eq!(
            original,
            TypedDataset::String(vec!["pear".into(), "apple".into()])
        );
    }

    #[test]
    fn test_is_sorted_per_kind() {
        assert!(TypedDataset::Int64(vec![1, 3, 3, 5]).is_sorted());
        assert!(!TypedDataset::Int64(vec![5, 3]).is_sorted());
        assert!(TypedDataset::Float64(vec![-1.5, 0.0, 2.25]).is_sorted());
        assert!(TypedDataset::Char(vec!['A', 'B', 'Z']).is_sorted());
        assert!(!TypedDataset::Char(vec!['b', 'A']).is_sorted());
        assert!(TypedDataset::String(vec!["ab".into(), "abc".into(), "b".into()]).is_sorted());
        assert!(TypedDataset::Int64(vec![42]).is_sorted());
    }

    #[test]
    fn test_from_entries() {
        let floats = TypedDataset::from_entries(DataKind::Float64, &["1.5", "2"]).unwrap();
        assert_eq!(floats, TypedDataset::Float64(vec![1.5, 2.0]));

        let chars = TypedDataset::from_entries(DataKind::Char, &["xyz", "A"]).unwrap();
        assert_eq!(chars, TypedDataset::Char(vec!['x', 'A']));

        let strings = TypedDataset::from_entries(DataKind::String, &["hello world"]).unwrap();
        assert_eq!(strings, TypedDataset::String(vec!["hello world".into()]));
    }

    #[test]
    fn test_from_entries_rejects_bad_input() {
        let err = TypedDataset::from_entries(DataKind::Int64, &["1", "two"]).unwrap_err();
        assert!(matches!(err, BenchError::InvalidEntry { index: 1, .. }));

        let err = TypedDataset::from_entries(DataKind::Float64, &["NaN"]).unwrap_err();
        assert!(matches!(err, BenchError::InvalidEntry { index: 0, .. }));

        let err = TypedDataset::from_entries(DataKind::String, &["ok", "  "]).unwrap_err();
        assert!(matches!(err, BenchError::InvalidEntry { index: 1, .. }));
    }

    #[test]
    fn test_display_values() {
        let data = TypedDataset::Float64(vec![1.0, 2.346]);
        assert_eq!(data.display_values(), ["1.00", "2.35"]);
        assert_eq!(data.display_value(5), None);
    }

    #[test]
    fn test_serde_shape() {
        let data = TypedDataset::Int64(vec![2, 1]);
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, r#"{"kind":"Int64","values":[2,1]}"#);
    }
}
