use crate::core::types::{AxisDirection, AxisId, DataPoint};

/// Borrowed view of one plotted series and the axes it is bound to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesView<'a> {
    pub x_axis: usize,
    pub y_axis: usize,
    pub points: &'a [DataPoint],
}

impl SeriesView<'_> {
    #[must_use]
    pub fn is_bound_to(&self, axis: AxisId) -> bool {
        match axis.direction {
            AxisDirection::X => self.x_axis == axis.index,
            AxisDirection::Y => self.y_axis == axis.index,
        }
    }
}

/// Data layer query used to anchor relative time labels.
pub trait SeriesDataSource {
    fn series(&self) -> Vec<SeriesView<'_>>;
}

/// Owned series data, mainly for hosts without their own data layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesData {
    pub x_axis: usize,
    pub y_axis: usize,
    pub points: Vec<DataPoint>,
}

impl SeriesData {
    #[must_use]
    pub fn new(points: Vec<DataPoint>) -> Self {
        Self {
            x_axis: 1,
            y_axis: 1,
            points,
        }
    }

    #[must_use]
    pub fn with_axes(mut self, x_axis: usize, y_axis: usize) -> Self {
        self.x_axis = x_axis;
        self.y_axis = y_axis;
        self
    }

    #[must_use]
    pub fn view(&self) -> SeriesView<'_> {
        SeriesView {
            x_axis: self.x_axis,
            y_axis: self.y_axis,
            points: &self.points,
        }
    }
}

impl SeriesDataSource for [SeriesData] {
    fn series(&self) -> Vec<SeriesView<'_>> {
        self.iter().map(SeriesData::view).collect()
    }
}

impl SeriesDataSource for Vec<SeriesData> {
    fn series(&self) -> Vec<SeriesView<'_>> {
        self.as_slice().series()
    }
}

impl SeriesDataSource for [SeriesView<'_>] {
    fn series(&self) -> Vec<SeriesView<'_>> {
        self.to_vec()
    }
}

/// Earliest coordinate along `axis` over every finite point of every series
/// bound to it; `None` when the axis has no points.
#[must_use]
pub fn resolve_first_sample<S>(source: &S, axis: AxisId) -> Option<f64>
where
    S: SeriesDataSource + ?Sized,
{
    source
        .series()
        .iter()
        .filter(|series| series.is_bound_to(axis))
        .flat_map(|series| series.points.iter())
        .map(|point| axis.component(*point))
        .filter(|value| value.is_finite())
        .reduce(f64::min)
}
