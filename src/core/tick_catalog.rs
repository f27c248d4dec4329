use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;

use crate::core::custom_tick::CustomTick;
use crate::core::tick::{TickDefinition, nominal_base};
use crate::core::tick_presets::PresetTick;
use crate::error::{RulerError, RulerResult};

/// Catalog entry: a definition together with its precomputed nominal base.
#[derive(Debug, Clone)]
pub struct TickEntry {
    definition: Arc<dyn TickDefinition>,
    base: i128,
}

impl TickEntry {
    fn new(definition: Arc<dyn TickDefinition>) -> RulerResult<Self> {
        let base = nominal_base(definition.increment(), definition.unit())?;
        Ok(Self { definition, base })
    }

    #[must_use]
    pub fn definition(&self) -> &Arc<dyn TickDefinition> {
        &self.definition
    }

    /// Nominal duration of one tick in nanoseconds.
    #[must_use]
    pub fn base(&self) -> i128 {
        self.base
    }

    fn same_granularity(&self, other: &dyn TickDefinition) -> bool {
        self.definition.unit() == other.unit() && self.definition.increment() == other.increment()
    }
}

/// Ordered set of tick granularities, coarsest first.
///
/// Ordering is kept by [`TickCatalog::register`]: base descending, then the
/// coarser unit, then the larger increment. Two entries never share a unit
/// and increment.
#[derive(Debug, Clone, Default)]
pub struct TickCatalog {
    entries: Vec<TickEntry>,
}

impl TickCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The eleven built-in granularities, from one year down to one millisecond.
    pub fn presets() -> RulerResult<Self> {
        let mut catalog = Self::new();
        for preset in PresetTick::ALL {
            catalog.register(Arc::new(preset))?;
        }
        Ok(catalog)
    }

    /// Validates and inserts a definition, restoring the ordering invariant.
    ///
    /// Returns the index the definition landed at.
    pub fn register(&mut self, definition: Arc<dyn TickDefinition>) -> RulerResult<usize> {
        definition.validate()?;
        if self
            .entries
            .iter()
            .any(|entry| entry.same_granularity(definition.as_ref()))
        {
            return Err(RulerError::DuplicateTick {
                unit: definition.unit().to_string(),
                increment: definition.increment(),
            });
        }

        let entry = TickEntry::new(definition)?;
        let index = self
            .entries
            .partition_point(|existing| compare_entries(existing, &entry) == Ordering::Less);
        debug!(
            name = %entry.definition.name(),
            base = %entry.base,
            index,
            "register tick definition"
        );
        self.entries.insert(index, entry);
        Ok(index)
    }

    /// Registers a data-described granularity.
    pub fn register_custom(&mut self, tick: CustomTick) -> RulerResult<usize> {
        self.register(Arc::new(tick))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TickEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn entries(&self) -> &[TickEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &TickEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Index of the entry holding exactly this definition instance.
    #[must_use]
    pub fn position(&self, definition: &Arc<dyn TickDefinition>) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| Arc::ptr_eq(&entry.definition, definition))
    }

    /// Index of the entry with the given unit and increment.
    #[must_use]
    pub fn position_of(&self, definition: &dyn TickDefinition) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.same_granularity(definition))
    }
}

fn compare_entries(left: &TickEntry, right: &TickEntry) -> Ordering {
    right
        .base
        .cmp(&left.base)
        .then_with(|| left.definition.unit().cmp(&right.definition.unit()))
        .then_with(|| {
            right
                .definition
                .increment()
                .cmp(&left.definition.increment())
        })
}
