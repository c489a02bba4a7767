use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::context::{ErrorPolicy, FilterOptions, Mode};
use crate::errors::Result;
use crate::filter::{Filter, FilterSpec};

/// =========================
/// Public API (Engine)
/// =========================

/// A compiled filter set plus the options it runs with.
///
/// Building the engine parses every path and compiles every pattern once;
/// `run` can then be called any number of times, from any thread. Each run
/// works on its own copies of the instances.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    filters: Vec<Filter>,
    options: FilterOptions,
    has_replace: bool,
}

impl FilterEngine {
    pub fn new(specs: &[FilterSpec], options: FilterOptions) -> Result<Self> {
        let filters = specs.iter().map(Filter::compile).collect::<Result<Vec<_>>>()?;
        let has_replace = filters.iter().any(Filter::is_replace);
        Ok(Self {
            filters,
            options,
            has_replace,
        })
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn options(&self) -> FilterOptions {
        self.options
    }

    /// Filter `instances`, returning copies of the ones kept, in input order.
    ///
    /// When the set holds a `replace` filter every instance is returned,
    /// rewritten where the pattern was found, and mode/compound are ignored.
    pub fn run(&self, instances: &[Value]) -> Result<Vec<Value>> {
        let mut results = Vec::new();
        for (idx, original) in instances.iter().enumerate() {
            let mut instance = original.clone();
            match self.keep(&mut instance) {
                Ok(true) => results.push(instance),
                Ok(false) => trace!(idx, "instance dropped"),
                Err(e) if self.options.on_error == ErrorPolicy::Skip => {
                    warn!(idx, error = %e, "skipping instance");
                }
                Err(e) => return Err(e),
            }
        }
        debug!(
            filters = self.filters.len(),
            mode = %self.options.mode,
            compound = self.options.compound,
            replace = self.has_replace,
            input = instances.len(),
            output = results.len(),
            "filter run complete"
        );
        Ok(results)
    }

    fn keep(&self, instance: &mut Value) -> Result<bool> {
        let short_circuit = !self.options.compound && !self.has_replace;
        let mut match_count = 0;
        for filter in &self.filters {
            if filter.evaluate(instance)?.matched {
                match_count += 1;
                if short_circuit {
                    break;
                }
            }
        }
        if self.has_replace {
            return Ok(true);
        }
        let matched = if self.options.compound {
            match_count == self.filters.len()
        } else {
            match_count > 0
        };
        Ok(match self.options.mode {
            Mode::Inclusive => matched,
            Mode::Exclusive => !matched,
        })
    }
}

/// =========================
/// Public API (Library funcs)
/// =========================

/// Filter `instances` with `filters` in one call.
pub fn filter_data(
    instances: &[Value],
    filters: &[FilterSpec],
    options: FilterOptions,
) -> Result<Vec<Value>> {
    FilterEngine::new(filters, options)?.run(instances)
}

/// JSON-level entry: `data` is one instance or an array of instances,
/// `filters` is one spec object or an array of them.
pub fn filter_value(data: &Value, filters: &Value, options: FilterOptions) -> Result<Vec<Value>> {
    let specs = FilterSpec::list_from_value(filters)?;
    match data {
        Value::Array(items) => filter_data(items, &specs, options),
        single => filter_data(std::slice::from_ref(single), &specs, options),
    }
}
