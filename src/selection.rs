use crate::constants::TRAIN_COLORS;
use crate::models::Train;

/// Drawing state of one train's line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    /// Filtered out, or another train is selected
    Hidden,
    VisibleUnselected,
    VisibleSelected,
}

/// Filter and selection state over the loaded trains
///
/// `visible` is the full set in load order until a filter count is set, then
/// the first `n` trains by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartState {
    all: Vec<Train>,
    visible: Vec<Train>,
    filter_count: Option<usize>,
    selected: Option<String>,
}

impl ChartState {
    #[must_use]
    pub fn new(trains: Vec<Train>) -> Self {
        let mut state = Self::default();
        state.replace_trains(trains);
        state
    }

    /// Replace every train after a load
    ///
    /// An active filter is re-applied. A selection whose train is gone is cleared.
    pub fn replace_trains(&mut self, trains: Vec<Train>) {
        self.all = trains;
        self.refilter();
        if let Some(name) = &self.selected {
            if !self.all.iter().any(|t| &t.id == name) {
                self.selected = None;
            }
        }
    }

    /// Show only the first `count` trains sorted by name
    pub fn set_filter_count(&mut self, count: usize) {
        self.filter_count = Some(count);
        self.refilter();
    }

    fn refilter(&mut self) {
        self.visible = match self.filter_count {
            Some(count) => {
                let mut sorted = self.all.clone();
                sorted.sort_by(|a, b| a.id.cmp(&b.id));
                sorted.truncate(count);
                sorted
            }
            None => self.all.clone(),
        };
    }

    /// Select a train by name, or clear the selection with `None`
    ///
    /// Trains that are filtered out can be selected; their line stays hidden.
    pub fn select(&mut self, name: Option<&str>) {
        self.selected = name.map(ToString::to_string);
    }

    #[must_use]
    pub fn all(&self) -> &[Train] {
        &self.all
    }

    #[must_use]
    pub fn visible(&self) -> &[Train] {
        &self.visible
    }

    #[must_use]
    pub fn filter_count(&self) -> Option<usize> {
        self.filter_count
    }

    #[must_use]
    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected train, looked up in the full set
    #[must_use]
    pub fn selected_train(&self) -> Option<&Train> {
        let name = self.selected.as_deref()?;
        self.all.iter().find(|t| t.id == name)
    }

    #[must_use]
    pub fn line_state(&self, name: &str) -> LineState {
        if !self.visible.iter().any(|t| t.id == name) {
            return LineState::Hidden;
        }
        match self.selected.as_deref() {
            None => LineState::VisibleUnselected,
            Some(selected) if selected == name => LineState::VisibleSelected,
            Some(_) => LineState::Hidden,
        }
    }

    /// Colour of the train at `index` in the visible list
    #[must_use]
    pub fn color_of(index: usize) -> &'static str {
        TRAIN_COLORS[index % TRAIN_COLORS.len()]
    }
}
