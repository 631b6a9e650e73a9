//! Configuration for the composite flows

use campus_shared::OtpConfig;

/// Minimum accepted password length for resets
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone)]
pub struct AuthFlowConfig {
    /// Shortest password accepted by reset-password
    pub min_password_length: usize,
    /// Hand the email to a spawned task so send and resend answer without
    /// waiting on the email collaborator
    pub background_delivery: bool,
}

impl Default for AuthFlowConfig {
    fn default() -> Self {
        Self {
            min_password_length: MIN_PASSWORD_LENGTH,
            background_delivery: false,
        }
    }
}

impl From<&OtpConfig> for AuthFlowConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            background_delivery: config.background_delivery,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_config() {
        let config = AuthFlowConfig::from(&OtpConfig::default());
        assert!(config.background_delivery);
        assert_eq!(config.min_password_length, MIN_PASSWORD_LENGTH);

        let inline = OtpConfig {
            background_delivery: false,
            ..OtpConfig::default()
        };
        assert!(!AuthFlowConfig::from(&inline).background_delivery);
    }
}
