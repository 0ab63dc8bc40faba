//! Pool gauges, refreshed by the task spawned in `create_pool`.

use prometheus::{register_gauge_vec, register_int_gauge_vec, GaugeVec, IntGaugeVec};
use sqlx::PgPool;

lazy_static::lazy_static! {
    static ref POOL_CONNECTIONS: IntGaugeVec = register_int_gauge_vec!(
        "db_pool_connections",
        "Connections held by the pool, by state (idle, in_use, limit)",
        &["service", "state"]
    ).expect("db_pool_connections registers once");

    static ref POOL_SATURATION: GaugeVec = register_gauge_vec!(
        "db_pool_saturation_ratio",
        "Checked-out connections divided by the pool limit",
        &["service"]
    ).expect("db_pool_saturation_ratio registers once");
}

/// Point-in-time view of a pool's occupancy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PoolSnapshot {
    pub idle: i64,
    pub in_use: i64,
    pub limit: i64,
}

impl PoolSnapshot {
    pub fn of(pool: &PgPool) -> Self {
        Self::from_counts(
            pool.size(),
            pool.num_idle(),
            pool.options().get_max_connections(),
        )
    }

    fn from_counts(size: u32, idle: usize, limit: u32) -> Self {
        let idle = idle as i64;
        Self {
            idle,
            in_use: (size as i64 - idle).max(0),
            limit: limit as i64,
        }
    }

    pub fn saturation(&self) -> f64 {
        if self.limit == 0 {
            0.0
        } else {
            self.in_use as f64 / self.limit as f64
        }
    }
}

pub(crate) fn update_pool_metrics(pool: &PgPool, service: &str) {
    let snapshot = PoolSnapshot::of(pool);

    for (state, value) in [
        ("idle", snapshot.idle),
        ("in_use", snapshot.in_use),
        ("limit", snapshot.limit),
    ] {
        POOL_CONNECTIONS.with_label_values(&[service, state]).set(value);
    }
    POOL_SATURATION
        .with_label_values(&[service])
        .set(snapshot.saturation());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturation_counts_checked_out_connections() {
        let snapshot = PoolSnapshot::from_counts(8, 2, 10);
        assert_eq!(snapshot.in_use, 6);
        assert!((snapshot.saturation() - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_pool_is_not_saturated() {
        let snapshot = PoolSnapshot::from_counts(0, 0, 0);
        assert_eq!(snapshot.saturation(), 0.0);
        assert_eq!(snapshot.in_use, 0);
    }
}
