use crate::areas::repository::Repository;
use crate::config::Config;
use crate::events::Event;

impl Repository {
    /// Replace the configuration at runtime
    ///
    /// Shrinking `max_staged` evicts the oldest staged entries and shrinking
    /// `max_stashes` drops the oldest stashes. The commit ceiling applies at the next
    /// commit or `gc`.
    pub fn update_config(&mut self, config: Config) {
        let evicted = self.index.set_capacity(config.max_staged);
        let dropped = self.stashes.set_capacity(config.max_stashes);
        if !evicted.is_empty() || !dropped.is_empty() {
            tracing::warn!(
                evicted = evicted.len(),
                dropped_stashes = dropped.len(),
                "configuration shrank bounded areas"
            );
        }

        self.config = config;
        tracing::debug!(config = ?self.config, "configuration updated");
        self.emit(Event::ConfigUpdate);
    }
}
