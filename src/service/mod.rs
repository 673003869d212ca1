//! Service composition: pools + provider adapter + retry engine +
//! response validation behind the two public operations.

pub mod analysis;
pub mod transcription;

pub use analysis::AnalysisService;
pub use transcription::TranscriptionService;

use crate::{Error, Result};
use once_cell::sync::OnceCell;

/// Process-lifetime holder for a service constructed once by the
/// composition root. Request handlers fetch through `get()`, which
/// fails fast with [`Error::NotInitialized`] before `init` has run.
pub struct ServiceSlot<T> {
    name: &'static str,
    cell: OnceCell<T>,
}

impl<T> ServiceSlot<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: OnceCell::new(),
        }
    }

    /// Install the service. Initialising twice is a wiring bug.
    pub fn init(&self, value: T) -> Result<()> {
        self.cell
            .set(value)
            .map_err(|_| Error::configuration(format!("{} is already initialised", self.name)))
    }

    pub fn get(&self) -> Result<&T> {
        self.cell
            .get()
            .ok_or_else(|| Error::not_initialized(self.name))
    }
}
