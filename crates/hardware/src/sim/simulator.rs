//! Top-level simulator: owns the bus, the caches, and the cores side by side.
//!
//! Owning the parts in one struct avoids back-pointers between components:
//! the bus receives the cache registry on every tick, and cores reach the bus
//! through the `BusPort` trait, so coherence state is mutated only through
//! message passing inside a single-threaded step.

use crate::common::constants::NUM_CORES;
use crate::common::error::SimError;
use crate::config::Config;
use crate::core::cache::Cache;
use crate::core::driver::Core;
use crate::sim::trace::{trace_path, TraceReader};
use crate::soc::bus::Bus;
use crate::stats::Report;

/// The fixed four-core system: bus, private caches, and trace-driven cores.
pub struct Simulator {
    config: Config,
    bus: Bus,
    caches: Vec<Cache>,
    cores: Vec<Core>,
    cycle: u64,
}

impl Simulator {
    /// Builds the system from `config`.
    ///
    /// Geometry is validated before anything is constructed. Trace files that
    /// cannot be opened are reported by the reader and replayed as empty.
    pub fn new(config: Config) -> Result<Self, SimError> {
        config.cache.validate()?;

        let caches = (0..NUM_CORES)
            .map(|id| Cache::new(id, &config.cache))
            .collect();
        let cores = (0..NUM_CORES)
            .map(|id| {
                let reader = TraceReader::open(&trace_path(&config.trace_prefix, id));
                Core::new(id, reader)
            })
            .collect();
        let bus = Bus::new(&config.cache);

        Ok(Self {
            config,
            bus,
            caches,
            cores,
            cycle: 0,
        })
    }

    /// Advances the system by one global cycle: bus phase, then core phase.
    ///
    /// The bus runs first so that completions of the previous cycle are
    /// visible to cores within the same cycle, while requests the cores push
    /// now are not arbitrated before the next cycle.
    pub fn step(&mut self) {
        self.bus.tick(self.cycle, &mut self.caches);
        for (core, cache) in self.cores.iter_mut().zip(self.caches.iter_mut()) {
            core.tick(self.cycle, cache, &mut self.bus);
        }
        self.cycle += 1;
    }

    /// Runs until every core has exhausted its trace; returns the final
    /// cycle count, which is also stamped on every core as its total
    /// execution cycles.
    pub fn run(&mut self) -> u64 {
        while !self.finished() {
            self.step();
        }
        for core in &mut self.cores {
            core.stats.total_cycles = self.cycle;
        }
        self.cycle
    }

    fn finished(&self) -> bool {
        self.cores.iter().all(Core::is_finished)
    }

    /// Snapshot of all counters for reporting.
    pub fn report(&self) -> Report {
        Report::collect(&self.config, &self.cores, &self.caches, &self.bus)
    }

    /// Current global cycle.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// The configuration this system was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The cache attached to core `id`.
    pub fn cache(&self, id: usize) -> &Cache {
        &self.caches[id]
    }

    /// Core `id`.
    pub fn core(&self, id: usize) -> &Core {
        &self.cores[id]
    }

    /// The shared bus.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }
}
