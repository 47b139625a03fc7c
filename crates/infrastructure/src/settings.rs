use std::sync::atomic::{AtomicBool, Ordering};

use application::FederationSettings;
use config::FederationConfig;

/// 由配置初始化的联邦设置，输入状态开关可在运行时切换
#[derive(Debug)]
pub struct ConfiguredFederationSettings {
    typing_indicator_enabled: AtomicBool,
    home_server_domain: String,
}

impl ConfiguredFederationSettings {
    pub fn new(typing_indicator_enabled: bool, home_server_domain: impl Into<String>) -> Self {
        Self {
            typing_indicator_enabled: AtomicBool::new(typing_indicator_enabled),
            home_server_domain: home_server_domain.into(),
        }
    }

    pub fn from_config(config: &FederationConfig) -> Self {
        Self::new(
            config.federation.typing_indicator_enabled,
            config.matrix.home_server_domain.clone(),
        )
    }

    pub fn set_typing_indicator_enabled(&self, enabled: bool) {
        self.typing_indicator_enabled.store(enabled, Ordering::Relaxed);
    }
}

impl FederationSettings for ConfiguredFederationSettings {
    fn is_typing_indicator_enabled(&self) -> bool {
        self.typing_indicator_enabled.load(Ordering::Relaxed)
    }

    fn home_server_domain(&self) -> String {
        self.home_server_domain.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_follow_config_and_runtime_toggle() {
        let mut config = FederationConfig::default();
        config.matrix.home_server_domain = "example.org".into();
        config.federation.typing_indicator_enabled = false;

        let settings = ConfiguredFederationSettings::from_config(&config);
        assert!(!settings.is_typing_indicator_enabled());
        assert_eq!(settings.home_server_domain(), "example.org");

        settings.set_typing_indicator_enabled(true);
        assert!(settings.is_typing_indicator_enabled());
    }
}
