use serde::{Deserialize, Serialize};

use crate::Result;

/// A feature area whose visibility is granted separately from admin rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Training,
    Events,
}

impl Module {
    pub const ALL: [Module; 2] = [Module::Training, Module::Events];

    pub fn as_str(self) -> &'static str {
        match self {
            Module::Training => "training",
            Module::Events => "events",
        }
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three flags the dashboard renders from.
///
/// Only constructible through [`Capabilities::admin`] or
/// [`Capabilities::member`], so an admin always carries both module flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    is_admin: bool,
    has_training_access: bool,
    has_events_access: bool,
}

impl Capabilities {
    pub const NONE: Capabilities = Capabilities {
        is_admin: false,
        has_training_access: false,
        has_events_access: false,
    };

    pub fn admin() -> Self {
        Self {
            is_admin: true,
            has_training_access: true,
            has_events_access: true,
        }
    }

    pub fn member(has_training_access: bool, has_events_access: bool) -> Self {
        Self {
            is_admin: false,
            has_training_access,
            has_events_access,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn has_training_access(&self) -> bool {
        self.has_training_access
    }

    pub fn has_events_access(&self) -> bool {
        self.has_events_access
    }

    pub fn has_module_access(&self, module: Module) -> bool {
        match module {
            Module::Training => self.has_training_access,
            Module::Events => self.has_events_access,
        }
    }
}

/// Capability checks and sign-out for the current user.
#[allow(async_fn_in_trait)]
pub trait AuthorizationService {
    async fn is_admin(&self) -> Result<bool>;
    async fn has_module_access(&self, module: Module) -> Result<bool>;
    async fn sign_out(&self) -> Result<()>;
}

/// Resolve the current user's capabilities.
///
/// Checks run one after the other: admin first, then training, then events.
/// Admins skip the module checks. A check that fails counts as not granted.
pub async fn resolve_capabilities<A: AuthorizationService>(auth: &A) -> Capabilities {
    match auth.is_admin().await {
        Ok(true) => return Capabilities::admin(),
        Ok(false) => {}
        Err(error) => {
            tracing::warn!(%error, "admin check failed, treating user as non-admin");
        }
    }

    let training = check_module(auth, Module::Training).await;
    let events = check_module(auth, Module::Events).await;

    Capabilities::member(training, events)
}

async fn check_module<A: AuthorizationService>(auth: &A, module: Module) -> bool {
    auth.has_module_access(module)
        .await
        .unwrap_or_else(|error| {
            tracing::warn!(%error, %module, "module access check failed, denying access");
            false
        })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::err;

    /// Scripted authorization backend that records the calls it receives.
    #[derive(Default)]
    pub struct FakeAuth {
        pub admin: Option<bool>,
        pub training: Option<bool>,
        pub events: Option<bool>,
        pub sign_out_fails: bool,
        pub calls: RefCell<Vec<String>>,
    }

    impl FakeAuth {
        pub fn granting(admin: bool, training: bool, events: bool) -> Self {
            Self {
                admin: Some(admin),
                training: Some(training),
                events: Some(events),
                ..Default::default()
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    fn answer(flag: Option<bool>, what: &str) -> Result<bool> {
        flag.ok_or_else(|| err!("{what} check unavailable"))
    }

    impl AuthorizationService for FakeAuth {
        async fn is_admin(&self) -> Result<bool> {
            self.calls.borrow_mut().push("is_admin".into());
            answer(self.admin, "admin")
        }

        async fn has_module_access(&self, module: Module) -> Result<bool> {
            self.calls.borrow_mut().push(format!("module:{module}"));
            match module {
                Module::Training => answer(self.training, "training"),
                Module::Events => answer(self.events, "events"),
            }
        }

        async fn sign_out(&self) -> Result<()> {
            self.calls.borrow_mut().push("sign_out".into());
            if self.sign_out_fails {
                return Err(err!("sign-out rejected"));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn admin_overrides_module_grants() {
        let auth = FakeAuth::granting(true, false, false);

        let caps = resolve_capabilities(&auth).await;

        assert!(caps.is_admin());
        assert!(caps.has_training_access());
        assert!(caps.has_events_access());
        assert_eq!(auth.calls(), ["is_admin"]);
    }

    #[tokio::test]
    async fn non_admin_checks_modules_in_order() {
        let auth = FakeAuth::granting(false, true, false);

        let caps = resolve_capabilities(&auth).await;

        assert_eq!(caps, Capabilities::member(true, false));
        assert_eq!(auth.calls(), ["is_admin", "module:training", "module:events"]);
    }

    #[tokio::test]
    async fn failed_checks_deny() {
        let auth = FakeAuth {
            admin: None,
            training: None,
            events: Some(true),
            ..Default::default()
        };

        let caps = resolve_capabilities(&auth).await;

        assert_eq!(caps, Capabilities::member(false, true));
    }

    #[test]
    fn module_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Module::Training).unwrap(), "\"training\"");
        assert_eq!(
            serde_json::from_str::<Module>("\"events\"").unwrap(),
            Module::Events
        );
    }

    #[test]
    fn has_module_access_matches_flags() {
        let caps = Capabilities::member(false, true);
        assert!(!caps.has_module_access(Module::Training));
        assert!(caps.has_module_access(Module::Events));
        assert!(Capabilities::admin().has_module_access(Module::Training));
        assert_eq!(Capabilities::default(), Capabilities::NONE);
    }

    #[test]
    fn admin_always_carries_both_modules() {
        let mut every = vec![Capabilities::NONE, Capabilities::default(), Capabilities::admin()];
        for training in [false, true] {
            for events in [false, true] {
                every.push(Capabilities::member(training, events));
            }
        }

        for caps in every {
            if caps.is_admin() {
                assert!(caps.has_training_access() && caps.has_events_access(), "{caps:?}");
            }
        }
    }
}
