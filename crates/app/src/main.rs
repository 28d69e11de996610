use anyhow::Context;

use stockroom_infra::{StockroomConfig, seed, today};

fn main() -> anyhow::Result<()> {
    let config = StockroomConfig::from_env().context("failed to load configuration")?;
    stockroom_observability::init(config.log_format);

    let room = seed::bakery();
    let dashboard = room.dashboard();
    tracing::info!(
        materials = dashboard.total_materials,
        critical = dashboard.critical_count,
        pending_orders = dashboard.order_stats.pending,
        total_value = dashboard.total_value,
        net_movement = dashboard.movements.net(),
        "session loaded"
    );

    let critical = room.critical_materials();
    if !critical.is_empty() {
        tracing::warn!(
            count = critical.len(),
            "materials at or below minimum stock, replenishment needed"
        );
    }

    let json = serde_json::to_string(&dashboard.to_json()?)?;
    tracing::info!(dashboard = %json, "dashboard");

    let exporter = config.exporter();
    let paths = exporter
        .export_all(&room, today())
        .with_context(|| format!("failed to export into {}", exporter.dir().display()))?;
    for path in paths {
        tracing::info!(path = %path.display(), "exported");
    }

    Ok(())
}
