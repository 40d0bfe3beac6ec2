use serde::Serialize;

pub const BANNER: &str = "AUTO-GEN API running";

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub ok: bool,
}

pub struct HealthController;

impl HealthController {
    pub fn banner(&self) -> &'static str {
        BANNER
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus { ok: true }
    }
}
