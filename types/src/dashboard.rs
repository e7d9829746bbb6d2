use tokio_util::sync::CancellationToken;

use crate::{
    capability::{AuthorizationService, Capabilities, resolve_capabilities},
    device::{DeviceType, ReferenceDataService},
};

/// A piece of dashboard state ready to be committed to the view.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardUpdate {
    Capabilities(Capabilities),
    DeviceTypes(Vec<DeviceType>),
}

/// Load everything the dashboard needs.
///
/// Capabilities are committed first so the tiles can render while device
/// types are still loading. A failed device-type fetch is logged and
/// leaves the previous list in place. Nothing is committed once `cancel`
/// has fired.
pub async fn initialize<A, R, F>(auth: &A, reference: &R, cancel: &CancellationToken, mut apply: F)
where
    A: AuthorizationService,
    R: ReferenceDataService,
    F: FnMut(DashboardUpdate),
{
    let capabilities = resolve_capabilities(auth).await;
    if cancel.is_cancelled() {
        return;
    }
    apply(DashboardUpdate::Capabilities(capabilities));

    let result = reference.list_device_types().await;
    if cancel.is_cancelled() {
        return;
    }
    match result {
        Ok(device_types) => apply(DashboardUpdate::DeviceTypes(device_types)),
        Err(error) => tracing::error!(%error, "error loading device types"),
    }
}

/// Sign out, then run `leave` whether or not the backend accepted it.
/// A rejected sign-out is only logged.
pub async fn sign_out<A, F>(auth: &A, leave: F)
where
    A: AuthorizationService,
    F: FnOnce(),
{
    if let Err(error) = auth.sign_out().await {
        tracing::warn!(%error, "sign-out failed");
    }
    leave();
}

#[cfg(test)]
mod tests {
    use std::{
        cell::Cell,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::{
        layer::{Context, Layer, SubscriberExt},
        registry::Registry,
    };

    use super::*;
    use crate::{Result, capability::tests::FakeAuth, device::DeviceModel, err};

    struct FakeReference {
        result: Option<Vec<DeviceType>>,
        /// Cancelled while the fetch is in flight, simulating an unmount.
        cancel_during_fetch: Option<CancellationToken>,
        fetches: Cell<usize>,
    }

    impl FakeReference {
        fn ok(device_types: Vec<DeviceType>) -> Self {
            Self {
                result: Some(device_types),
                cancel_during_fetch: None,
                fetches: Cell::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                result: None,
                cancel_during_fetch: None,
                fetches: Cell::new(0),
            }
        }
    }

    impl ReferenceDataService for FakeReference {
        async fn list_device_types(&self) -> Result<Vec<DeviceType>> {
            self.fetches.set(self.fetches.get() + 1);
            if let Some(cancel) = &self.cancel_during_fetch {
                cancel.cancel();
            }
            self.result
                .clone()
                .ok_or_else(|| err!("relation \"device_types\" does not exist"))
        }
    }

    /// Counts events at one level.
    #[derive(Clone)]
    struct LevelCount {
        level: Level,
        seen: Arc<AtomicUsize>,
    }

    impl LevelCount {
        fn new(level: Level) -> Self {
            Self {
                level,
                seen: Arc::default(),
            }
        }

        fn get(&self) -> usize {
            self.seen.load(Ordering::SeqCst)
        }
    }

    impl<S: Subscriber> Layer<S> for LevelCount {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == self.level {
                self.seen.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn device_type(id: &str, name: &str, models: &[&str]) -> DeviceType {
        DeviceType {
            id: id.into(),
            name: name.into(),
            description: format!("{name} devices"),
            models: models
                .iter()
                .enumerate()
                .map(|(i, m)| DeviceModel {
                    id: format!("{id}-{i}"),
                    name: m.to_string(),
                })
                .collect(),
        }
    }

    async fn run(
        auth: &FakeAuth,
        reference: &FakeReference,
        cancel: &CancellationToken,
    ) -> Vec<DashboardUpdate> {
        let mut updates = Vec::new();
        initialize(auth, reference, cancel, |u| updates.push(u)).await;
        updates
    }

    #[tokio::test]
    async fn commits_capabilities_then_device_types() {
        let auth = FakeAuth::granting(false, true, false);
        let types = vec![
            device_type("a", "Analyzer", &["A-100", "A-200"]),
            device_type("s", "Scanner", &["S-1"]),
        ];
        let reference = FakeReference::ok(types.clone());

        let updates = run(&auth, &reference, &CancellationToken::new()).await;

        assert_eq!(
            updates,
            [
                DashboardUpdate::Capabilities(Capabilities::member(true, false)),
                DashboardUpdate::DeviceTypes(types),
            ]
        );
    }

    #[tokio::test]
    async fn keeps_service_order() {
        let auth = FakeAuth::granting(true, false, false);
        let types = vec![
            device_type("1", "Beta", &[]),
            device_type("2", "Alpha", &[]),
        ];
        let reference = FakeReference::ok(types);

        let updates = run(&auth, &reference, &CancellationToken::new()).await;

        let Some(DashboardUpdate::DeviceTypes(list)) = updates.last() else {
            panic!("device types were not committed: {updates:?}");
        };
        let names: Vec<_> = list.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Beta", "Alpha"]);
    }

    #[tokio::test]
    async fn failed_fetch_commits_no_list() {
        let auth = FakeAuth::granting(true, false, false);
        let reference = FakeReference::failing();

        let updates = run(&auth, &reference, &CancellationToken::new()).await;

        assert_eq!(updates, [DashboardUpdate::Capabilities(Capabilities::admin())]);
        assert_eq!(reference.fetches.get(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_logs_one_error() {
        let errors = LevelCount::new(Level::ERROR);
        let _guard = tracing::subscriber::set_default(Registry::default().with(errors.clone()));

        // Capability failures are warnings and must not show up here.
        let auth = FakeAuth::default();
        let reference = FakeReference::failing();

        let updates = run(&auth, &reference, &CancellationToken::new()).await;

        assert_eq!(updates, [DashboardUpdate::Capabilities(Capabilities::NONE)]);
        assert_eq!(errors.get(), 1);
    }

    #[tokio::test]
    async fn successful_load_logs_no_error() {
        let errors = LevelCount::new(Level::ERROR);
        let _guard = tracing::subscriber::set_default(Registry::default().with(errors.clone()));

        let auth = FakeAuth::granting(false, true, true);
        let reference = FakeReference::ok(vec![device_type("a", "Analyzer", &["A-1"])]);

        run(&auth, &reference, &CancellationToken::new()).await;

        assert_eq!(errors.get(), 0);
    }

    #[tokio::test]
    async fn device_types_load_even_when_checks_fail() {
        let auth = FakeAuth::default();
        let reference = FakeReference::ok(vec![device_type("x", "Meter", &["M1"])]);

        let updates = run(&auth, &reference, &CancellationToken::new()).await;

        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0], DashboardUpdate::Capabilities(Capabilities::NONE));
    }

    #[tokio::test]
    async fn cancelled_before_start_commits_nothing() {
        let auth = FakeAuth::granting(true, true, true);
        let reference = FakeReference::ok(vec![]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let updates = run(&auth, &reference, &cancel).await;

        assert!(updates.is_empty());
    }

    #[tokio::test]
    async fn cancelled_mid_fetch_drops_device_types() {
        let auth = FakeAuth::granting(false, false, true);
        let cancel = CancellationToken::new();
        let reference = FakeReference {
            cancel_during_fetch: Some(cancel.clone()),
            ..FakeReference::ok(vec![device_type("a", "Analyzer", &[])])
        };

        let updates = run(&auth, &reference, &cancel).await;

        assert_eq!(
            updates,
            [DashboardUpdate::Capabilities(Capabilities::member(false, true))]
        );
    }

    #[tokio::test]
    async fn sign_out_leaves_after_success() {
        let auth = FakeAuth::default();
        let left = Cell::new(false);

        sign_out(&auth, || left.set(true)).await;

        assert!(left.get());
        assert_eq!(auth.calls(), ["sign_out"]);
    }

    #[tokio::test]
    async fn sign_out_leaves_even_when_rejected() {
        let warnings = LevelCount::new(Level::WARN);
        let _guard = tracing::subscriber::set_default(Registry::default().with(warnings.clone()));
        let auth = FakeAuth {
            sign_out_fails: true,
            ..Default::default()
        };
        let left = Cell::new(false);

        sign_out(&auth, || left.set(true)).await;

        assert!(left.get());
        assert_eq!(auth.calls(), ["sign_out"]);
        assert_eq!(warnings.get(), 1);
    }
}
