// Line visibility - Isolate / restore state machine driven by legend clicks
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineVisibility {
    pub line_name: String,
    pub visibility: bool,
}

/// A click on a chart legend entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineClick {
    pub data_key: String,
}

impl LineClick {
    pub fn new(data_key: impl Into<String>) -> Self {
        Self {
            data_key: data_key.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityMode<'a> {
    Normal,
    Isolated(&'a str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityState {
    pub per_series: Vec<LineVisibility>,
    pub highlighted: Option<String>,
}

impl VisibilityState {
    /// Every line visible, nothing highlighted.
    pub fn new<S: AsRef<str>>(line_names: &[S]) -> Self {
        Self {
            per_series: line_names
                .iter()
                .map(|name| LineVisibility {
                    line_name: name.as_ref().to_string(),
                    visibility: true,
                })
                .collect(),
            highlighted: None,
        }
    }

    pub fn mode(&self) -> VisibilityMode<'_> {
        match &self.highlighted {
            Some(line) => VisibilityMode::Isolated(line),
            None => VisibilityMode::Normal,
        }
    }

    /// Unknown lines report as hidden.
    pub fn is_visible(&self, line_name: &str) -> bool {
        self.per_series
            .iter()
            .find(|line| line.line_name == line_name)
            .is_some_and(|line| line.visibility)
    }

    pub fn knows(&self, line_name: &str) -> bool {
        self.per_series.iter().any(|line| line.line_name == line_name)
    }

    /// Apply one legend click.
    ///
    /// From normal mode the clicked line is isolated. Clicking the isolated
    /// line again restores every line; clicking another line isolates that
    /// one instead. Clicks on lines this state does not track are ignored.
    pub fn on_click(self, click: &LineClick) -> Self {
        let target = click.data_key.as_str();
        if !self.knows(target) {
            tracing::debug!("Ignoring click on unknown line {}", target);
            return self;
        }

        if self.highlighted.as_deref() == Some(target) {
            self.restore()
        } else {
            self.isolate(target)
        }
    }

    fn isolate(self, target: &str) -> Self {
        Self {
            per_series: self
                .per_series
                .into_iter()
                .map(|line| LineVisibility {
                    visibility: line.line_name == target,
                    ..line
                })
                .collect(),
            highlighted: Some(target.to_string()),
        }
    }

    fn restore(self) -> Self {
        Self {
            per_series: self
                .per_series
                .into_iter()
                .map(|line| LineVisibility {
                    visibility: true,
                    ..line
                })
                .collect(),
            highlighted: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> VisibilityState {
        VisibilityState::new(&["Voltage", "Current", "Temperature"])
    }

    fn visible(state: &VisibilityState) -> Vec<&str> {
        state
            .per_series
            .iter()
            .filter(|line| line.visibility)
            .map(|line| line.line_name.as_str())
            .collect()
    }

    #[test]
    fn test_initial_state() {
        let state = state();
        assert_eq!(state.mode(), VisibilityMode::Normal);
        assert_eq!(visible(&state), vec!["Voltage", "Current", "Temperature"]);
    }

    #[test]
    fn test_click_isolates() {
        let state = state().on_click(&LineClick::new("Current"));

        assert_eq!(state.mode(), VisibilityMode::Isolated("Current"));
        assert_eq!(visible(&state), vec!["Current"]);
        assert!(!state.is_visible("Voltage"));
    }

    #[test]
    fn test_second_click_restores() {
        let state = state()
            .on_click(&LineClick::new("Current"))
            .on_click(&LineClick::new("Current"));

        assert_eq!(state, VisibilityState::new(&["Voltage", "Current", "Temperature"]));
    }

    #[test]
    fn test_click_other_line_moves_isolation() {
        let state = state()
            .on_click(&LineClick::new("Voltage"))
            .on_click(&LineClick::new("Temperature"));

        assert_eq!(state.mode(), VisibilityMode::Isolated("Temperature"));
        assert_eq!(visible(&state), vec!["Temperature"]);
    }

    #[test]
    fn test_unknown_line_is_ignored() {
        let before = state().on_click(&LineClick::new("Voltage"));
        let after = before.clone().on_click(&LineClick::new("Pressure"));
        assert_eq!(before, after);

        let normal = state().on_click(&LineClick::new("Pressure"));
        assert_eq!(normal, state());
    }

    #[test]
    fn test_empty_state() {
        let state = VisibilityState::new::<&str>(&[]).on_click(&LineClick::new("Voltage"));
        assert_eq!(state.mode(), VisibilityMode::Normal);
        assert!(state.per_series.is_empty());
    }
}
