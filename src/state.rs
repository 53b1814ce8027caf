use crate::color::ColorMap;
use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::model::{Dimension, Record, SurveyDataset};

/// Pie zoom step per button press.
pub const PIE_ZOOM_STEP: f64 = 0.1;
/// Zoom bounds: the lower bound keeps the pie visible; past 1.0 the wedges
/// grow beyond the chart square and are clipped to its region.
pub const PIE_ZOOM_RANGE: std::ops::RangeInclusive<f64> = 0.2..=3.0;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<SurveyDataset>,

    /// Current dropdown selection per dimension.
    pub selection: FilterSelection,

    /// Indices of records passing the current selection (cached; recomputed
    /// exactly once per filter change, consumed by all three charts).
    pub visible_indices: Vec<usize>,

    /// Stable gender → colour assignment for the pie chart, built from the
    /// full dataset's domain at load time.
    pub gender_colors: ColorMap,

    /// Pie chart radius multiplier. Independent of the filter selection and
    /// persists across filter changes.
    pub pie_zoom: f64,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selection: FilterSelection::default(),
            visible_indices: Vec::new(),
            gender_colors: ColorMap::default(),
            pie_zoom: 1.0,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: reset filters, rebuild colours.
    pub fn set_dataset(&mut self, dataset: SurveyDataset) {
        self.selection = FilterSelection::default();
        self.visible_indices = (0..dataset.len()).collect();
        self.gender_colors = ColorMap::new(dataset.domain(Dimension::Gender));
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Recompute `visible_indices` after a selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.selection);
        }
    }

    /// Replace one dimension's selection and refilter once.
    pub fn set_filter(&mut self, dim: Dimension, value: Option<String>) {
        self.selection.set(dim, value);
        self.refilter();
    }

    /// Restore the all-"All" selection and refilter.
    pub fn reset_filters(&mut self) {
        self.selection = FilterSelection::default();
        self.refilter();
    }

    /// Step the pie zoom. Does not touch the filter state or the cached
    /// filtered set; only the pie re-renders differently.
    pub fn zoom_pie(&mut self, steps: f64) {
        self.pie_zoom = (self.pie_zoom + steps * PIE_ZOOM_STEP)
            .clamp(*PIE_ZOOM_RANGE.start(), *PIE_ZOOM_RANGE.end());
    }

    /// The records passing the current filter, in source order.
    pub fn visible_records(&self) -> impl Iterator<Item = &Record> {
        let records = self
            .dataset
            .as_ref()
            .map(|ds| ds.records.as_slice())
            .unwrap_or(&[]);
        self.visible_indices.iter().map(move |&i| &records[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn dataset() -> SurveyDataset {
        let rec = |gender: &str, chain: &str, amount: f64| Record {
            gender: gender.to_string(),
            payment_method: "Cash".to_string(),
            chain: chain.to_string(),
            age: None,
            income: None,
            purchase_amount: Some(amount),
            family_size: None,
        };
        SurveyDataset::from_records(vec![
            rec("Female", "Kroger", 10.0),
            rec("Male", "Aldi", 20.0),
            rec("Female", "Aldi", 30.0),
        ])
    }

    #[test]
    fn load_shows_everything() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert!(state.selection.is_all());
    }

    #[test]
    fn filter_change_refilters_once_and_reset_restores() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        state.set_filter(Dimension::Chain, Some("Aldi".to_string()));
        assert_eq!(state.visible_indices, vec![1, 2]);

        state.reset_filters();
        assert!(state.selection.is_all());
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn zoom_is_clamped_and_survives_filter_changes() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        for _ in 0..100 {
            state.zoom_pie(1.0);
        }
        assert_eq!(state.pie_zoom, *PIE_ZOOM_RANGE.end());

        state.set_filter(Dimension::Gender, Some("Male".to_string()));
        assert_eq!(state.pie_zoom, *PIE_ZOOM_RANGE.end());

        for _ in 0..100 {
            state.zoom_pie(-1.0);
        }
        assert_eq!(state.pie_zoom, *PIE_ZOOM_RANGE.start());
    }
}
