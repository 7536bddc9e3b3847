//! UI events and the source the controller drains them from.

use std::collections::VecDeque;

use crate::fit::ComponentId;

/// A discrete user action that changes plot inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    ObjectSelected(String),
    /// "Clear Data" button.
    SelectionCleared,
    /// A validated temperature entry, Kelvin.
    TemperatureCommitted { component: ComponentId, kelvin: f64 },
    /// Intensity slider moved (log10 multiplier).
    IntensityChanged { component: ComponentId, log_scale: f64 },
    /// "Add Second Blackbody" checkbox.
    DiscToggled(bool),
    /// "Update Plot" button.
    UpdatePlot,
}

/// Anything that can hand pending events to the controller.
pub trait EventSource {
    fn next_event(&mut self) -> Option<UiEvent>;
}

/// FIFO of events queued by the widgets during a frame.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<UiEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: UiEvent) {
        self.pending.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl EventSource for EventQueue {
    fn next_event(&mut self) -> Option<UiEvent> {
        self.pending.pop_front()
    }
}

impl FromIterator<UiEvent> for EventQueue {
    fn from_iter<T: IntoIterator<Item = UiEvent>>(iter: T) -> Self {
        Self {
            pending: iter.into_iter().collect(),
        }
    }
}
