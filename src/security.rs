use std::sync::{PoisonError, RwLock};
use subtle::ConstantTimeEq;

/// Constant-time string comparison to prevent timing attacks.
/// Use this for session tokens and other secrets presented by a client.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Tracks the one browser session allowed into the admin panel.
///
/// A token is issued on sign-in and carried in the admin cookie; issuing a
/// new one invalidates the previous holder.
#[derive(Debug, Default)]
pub struct AdminGate {
    token: RwLock<Option<String>>,
}

impl AdminGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> String {
        let token = uuid::Uuid::new_v4().simple().to_string();
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        token
    }

    pub fn verify(&self, presented: &str) -> bool {
        match self
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_deref()
        {
            Some(expected) => constant_time_compare(expected, presented),
            None => false,
        }
    }

    pub fn revoke(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("token123", "token123"));
        assert!(!constant_time_compare("token123", "token124"));
        assert!(!constant_time_compare("token123", "token12"));
        assert!(!constant_time_compare("", "token"));
    }

    // ==================== AdminGate Tests ====================

    #[test]
    fn test_gate_starts_closed() {
        let gate = AdminGate::new();
        assert!(!gate.verify(""));
        assert!(!gate.verify("anything"));
    }

    #[test]
    fn test_issued_token_verifies() {
        let gate = AdminGate::new();
        let token = gate.issue();

        assert!(gate.verify(&token));
        assert!(!gate.verify("forged"));
    }

    #[test]
    fn test_reissue_invalidates_previous_token() {
        let gate = AdminGate::new();
        let first = gate.issue();
        let second = gate.issue();

        assert!(!gate.verify(&first));
        assert!(gate.verify(&second));
    }

    #[test]
    fn test_revoke() {
        let gate = AdminGate::new();
        let token = gate.issue();
        gate.revoke();

        assert!(!gate.verify(&token));
        assert!(!gate.verify(""));
    }
}
