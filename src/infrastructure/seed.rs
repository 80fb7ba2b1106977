// Demo fleet loaded into an empty store
use crate::domain::asset::{Asset, DataSource, Sensor, SensorReading, SensorType};
use crate::domain::criticality::CriticalityAssessment;
use crate::domain::fmeca::FailureMode;
use chrono::{DateTime, Duration, Utc};

/// A small fleet with enough history to exercise every dashboard view.
/// Histories are deterministic so restarts show the same trends.
pub fn demo_assets(now: DateTime<Utc>) -> Vec<Asset> {
    let mut crusher = Asset::new("a1", "Trit P 006", "Crushing area");
    crusher.mtbf = 1500.0;
    crusher.mttr = 4.0;
    crusher.criticality = Some(CriticalityAssessment {
        probability: 1,
        impact_environment: 2,
        impact_economic: 5,
        impact_human: 2,
    });
    crusher.sensors.push(
        with_history(
            Sensor::new("IOT-01", SensorType::Vibration, "mm/s", 4.5, DataSource::Continuous)
                .with_label("Vibration L1 (Online)"),
            now,
            40,
            Duration::hours(1),
            |i| 0.5 + 1.0 * wave(i),
        ),
    );
    crusher.sensors.push(
        with_history(
            Sensor::new("IOT-03", SensorType::Temperature, "°C", 85.0, DataSource::Continuous)
                .with_label("Bearing temperature"),
            now,
            20,
            Duration::days(1),
            |i| 38.0 + 5.0 * wave(i),
        ),
    );

    let mut conveyor = Asset::new("a2", "Conveyor TC-12", "Stockyard");
    conveyor.mtbf = 900.0;
    conveyor.mttr = 6.5;
    conveyor.criticality = Some(CriticalityAssessment {
        probability: 3,
        impact_environment: 2,
        impact_economic: 4,
        impact_human: 3,
    });
    conveyor.sensors.push(with_history(
        Sensor::new("MOA_G", SensorType::Vibration, "G", 3.0, DataSource::Periodic)
            .with_label("MOA (G)"),
        now,
        12,
        Duration::days(7),
        |i| 1.2 + 0.6 * wave(i),
    ));
    conveyor.set_fmeca(vec![
        FailureMode::new("fm-1", 7, 5, 4).with_residual(7, 2, 3),
        FailureMode::new("fm-2", 5, 5, 5),
    ]);

    let mut fan = Asset::new("a3", "Exhaust fan VE-3", "Kiln");
    fan.mtbf = 2100.0;
    fan.mttr = 3.0;
    fan.sensors.push(with_history(
        Sensor::new("IOT-VIBRATION", SensorType::Vibration, "mm/s", 4.5, DataSource::Continuous)
            .with_label("vibration (Online)"),
        now,
        40,
        Duration::hours(1),
        |i| 3.0 + 2.0 * wave(i),
    ));

    let mut fleet = vec![crusher, conveyor, fan];
    for asset in &mut fleet {
        asset.normalize();
    }
    fleet
}

/// Smooth 0..=1 oscillation.
fn wave(i: usize) -> f64 {
    ((i as f64 * 0.7).sin() + 1.0) / 2.0
}

fn with_history<F>(mut sensor: Sensor, now: DateTime<Utc>, count: usize, step: Duration, value: F) -> Sensor
where
    F: Fn(usize) -> f64,
{
    let readings = (0..count)
        .map(|i| {
            let age = (count - 1 - i) as i32;
            SensorReading::new(now - step * age, value(i))
        })
        .collect();
    sensor.replace_history(readings);
    sensor
}
