use crate::types::HealthRes;

/// Health check shared by every API surface.
pub struct HealthService;

impl HealthService {
    /// Reports the service as alive. There are no dependencies to probe.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Report simplifier is alive".into(),
        }
    }
}
