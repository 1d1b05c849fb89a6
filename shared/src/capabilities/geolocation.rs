use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::error::LocationUnavailable;

/// Single-shot device position request. The shell answers once; there is
/// no watch or tracking mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum GeolocationOperation {
    GetCurrentPosition { timeout_ms: u64, high_accuracy: bool },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DevicePosition {
    pub lat: f64,
    pub lng: f64,
    pub accuracy_m: Option<f64>,
}

pub type LocationResult = Result<DevicePosition, LocationUnavailable>;

impl Operation for GeolocationOperation {
    type Output = LocationResult;
}

pub struct Geolocation<E> {
    context: CapabilityContext<GeolocationOperation, E>,
}

impl<Ev> Capability<Ev> for Geolocation<Ev> {
    type Operation = GeolocationOperation;
    type MappedSelf<MappedEv> = Geolocation<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Geolocation::new(self.context.map_event(f))
    }
}

impl<E> Geolocation<E>
where
    E: Send + 'static,
{
    #[must_use]
    pub fn new(context: CapabilityContext<GeolocationOperation, E>) -> Self {
        Self { context }
    }

    pub fn get_current_position<F>(&self, timeout_ms: u64, make_event: F)
    where
        F: FnOnce(LocationResult) -> E + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let result = ctx
                .request_from_shell(GeolocationOperation::GetCurrentPosition {
                    timeout_ms,
                    high_accuracy: true,
                })
                .await;
            ctx.update_app(make_event(result));
        });
    }
}
