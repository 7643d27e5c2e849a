use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("ARCHIVIST_LOG_LEVEL")
            && !level.is_empty()
        {
            self.log_level = level;
        }

        if let Ok(schedule) = std::env::var("ARCHIVIST_SCHEDULE")
            && !schedule.trim().is_empty()
        {
            self.daemon.schedule = schedule;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_env::{ENV_LOCK, EnvVarGuard};

    #[test]
    fn env_overrides_replace_log_level_and_schedule() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let _level = EnvVarGuard::set("ARCHIVIST_LOG_LEVEL", "debug");
        let _schedule = EnvVarGuard::set("ARCHIVIST_SCHEDULE", "0 30 1 * * *");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.daemon.schedule, "0 30 1 * * *");
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let _level = EnvVarGuard::set("ARCHIVIST_LOG_LEVEL", "");
        let _schedule = EnvVarGuard::unset("ARCHIVIST_SCHEDULE");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.log_level, "info");
        assert_eq!(config.daemon.schedule, "0 0 2 * * *");
    }
}
