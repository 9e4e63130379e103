// File: crates/chart-core/src/series.rs
// Summary: Labeled line series model.

#[derive(Clone, Debug)]
pub struct Series {
    /// Legend text.
    pub label: String,
    pub data_xy: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), data_xy: Vec::new() }
    }

    pub fn with_data(label: impl Into<String>, data: Vec<(f64, f64)>) -> Self {
        Self { label: label.into(), data_xy: data }
    }

    /// Zip parallel x/y columns into a series. Extra values on the longer side are dropped.
    pub fn from_columns(label: impl Into<String>, xs: &[f64], ys: &[f64]) -> Self {
        let data = xs.iter().copied().zip(ys.iter().copied()).collect();
        Self::with_data(label, data)
    }

    pub fn len(&self) -> usize { self.data_xy.len() }

    pub fn is_empty(&self) -> bool { self.data_xy.is_empty() }

    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.data_xy.iter().map(|&(x, _)| x)
    }

    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.data_xy.iter().map(|&(_, y)| y)
    }
}
