//! Line-chart feed: per-subject, time-sorted series plus axis extents.
//!
//! [`plan_series`] is a pure function of the full dataset, the selected
//! subjects and an optional time window, so every checkbox toggle or brush
//! recomputes the plan from scratch.

use serde::{Deserialize, Serialize};

use crate::selection::{SubjectSelection, TimedValue};

/// Inclusive range of time steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: u64,
    pub end: u64,
}

impl TimeWindow {
    /// A window from two brush edges, in either order.
    pub fn new(a: u64, b: u64) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Window from optional bounds; an open side extends to `full`.
    ///
    /// Only two explicit bounds are swapped; a lone bound past the data
    /// yields a window with no data in it.
    pub fn from_bounds(start: Option<u64>, end: Option<u64>, full: TimeWindow) -> Option<Self> {
        match (start, end) {
            (None, None) => None,
            (Some(start), Some(end)) => Some(Self::new(start, end)),
            (Some(start), None) => Some(Self {
                start,
                end: full.end.max(start),
            }),
            (None, Some(end)) => Some(Self {
                start: full.start.min(end),
                end,
            }),
        }
    }

    pub fn contains(&self, time: u64) -> bool {
        (self.start..=self.end).contains(&time)
    }
}

/// Closed value range for a continuous axis or color scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    pub fn of<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        values.into_iter().fold(None, |extent, value| {
            Some(match extent {
                None => Extent {
                    min: value,
                    max: value,
                },
                Some(Extent { min, max }) => Extent {
                    min: min.min(value),
                    max: max.max(value),
                },
            })
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub time: u64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub subject_id: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub series: Vec<Series>,
    /// Visible x domain: the window when one is set.
    pub x_extent: TimeWindow,
    pub y_extent: Extent,
    /// Domain of the unwindowed selection, restored by a zoom reset.
    pub full_x_extent: TimeWindow,
}

/// What a chart feed hands to the drawing layer. `T` is the chart payload;
/// line charts use [`ChartData`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderPlan<T = ChartData> {
    /// Nothing to draw; show the message instead of a chart.
    Placeholder { message: String },
    Chart(T),
}

pub const NO_SUBJECTS_SELECTED: &str = "No subjects selected.";
pub const NO_DATA_FOR_SELECTION: &str = "No data for the selected subjects.";
pub const NO_DATA_IN_WINDOW: &str = "No data in the selected time window.";

impl<T> RenderPlan<T> {
    pub(crate) fn placeholder(message: &str) -> Self {
        Self::Placeholder {
            message: message.to_string(),
        }
    }

    /// Placeholder for a selection that yields nothing to draw.
    pub(crate) fn empty_selection(selection: &SubjectSelection) -> Self {
        if selection.is_empty() {
            Self::placeholder(NO_SUBJECTS_SELECTED)
        } else {
            Self::placeholder(NO_DATA_FOR_SELECTION)
        }
    }

    pub fn chart(&self) -> Option<&T> {
        match self {
            Self::Chart(chart) => Some(chart),
            Self::Placeholder { .. } => None,
        }
    }
}

/// Time extent of the selected items, ignoring any window.
pub fn full_time_extent<T: TimedValue>(
    items: &[T],
    selection: &SubjectSelection,
) -> Option<TimeWindow> {
    selection.filter(items).fold(None, |extent, item| {
        let time = item.time();
        Some(match extent {
            None => TimeWindow::new(time, time),
            Some(window) => TimeWindow::new(window.start.min(time), window.end.max(time)),
        })
    })
}

/// Build the line-chart plan for the selected subjects.
///
/// Series appear in first-seen subject order with points sorted by time.
pub fn plan_series<T: TimedValue>(
    items: &[T],
    selection: &SubjectSelection,
    window: Option<TimeWindow>,
) -> RenderPlan {
    if selection.is_empty() {
        return RenderPlan::placeholder(NO_SUBJECTS_SELECTED);
    }
    let Some(full_x_extent) = full_time_extent(items, selection) else {
        return RenderPlan::placeholder(NO_DATA_FOR_SELECTION);
    };

    let mut series: Vec<Series> = Vec::new();
    for item in selection.filter(items) {
        if window.is_some_and(|w| !w.contains(item.time())) {
            continue;
        }
        let point = Point {
            time: item.time(),
            value: item.value(),
        };
        match series.iter_mut().find(|s| s.subject_id == item.subject_id()) {
            Some(existing) => existing.points.push(point),
            None => series.push(Series {
                subject_id: item.subject_id().to_string(),
                points: vec![point],
            }),
        }
    }
    for entry in &mut series {
        entry.points.sort_by_key(|point| point.time);
    }

    let values = series
        .iter()
        .flat_map(|entry| entry.points.iter().map(|point| point.value));
    let Some(y_extent) = Extent::of(values) else {
        return RenderPlan::placeholder(NO_DATA_IN_WINDOW);
    };

    RenderPlan::Chart(ChartData {
        series,
        x_extent: window.unwrap_or(full_x_extent),
        y_extent,
        full_x_extent,
    })
}
