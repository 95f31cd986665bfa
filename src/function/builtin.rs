//! Built-in functions: world, coordinates, direction, FPS, clock and memory

use tracing::debug;

use super::{ActiveFunction, Function, RegisteredFunction, UpdateEvent};
use crate::host::{HostState, Position};
use crate::value::Value;

const MIB: u64 = 1024 * 1024;

/// All built-in functions in registration order
pub fn all() -> Vec<RegisteredFunction> {
    vec![
        RegisteredFunction::active(WorldFunction::default()),
        RegisteredFunction::stateless(CoordinateFunction::new(Axis::X)),
        RegisteredFunction::stateless(CoordinateFunction::new(Axis::Y)),
        RegisteredFunction::stateless(CoordinateFunction::new(Axis::Z)),
        RegisteredFunction::stateless(DirFunction),
        RegisteredFunction::stateless(FpsFunction),
        RegisteredFunction::stateless(ClockFunction { seconds: true }),
        RegisteredFunction::stateless(ClockFunction { seconds: false }),
        RegisteredFunction::stateless(MemoryFunction::new(MemoryMetric::Max)),
        RegisteredFunction::stateless(MemoryFunction::new(MemoryMetric::Used)),
        RegisteredFunction::stateless(MemoryFunction::new(MemoryMetric::Percent)),
    ]
}

/// Name of the world the player is currently in, fed by world change events
#[derive(Debug, Default)]
pub struct WorldFunction {
    current: Option<String>,
}

impl Function for WorldFunction {
    fn name(&self) -> &str {
        "world"
    }

    fn translated_name(&self) -> &str {
        "World"
    }

    fn value(&self, _host: &dyn HostState, _argument: Option<&str>) -> Value {
        self.current.as_deref().into()
    }
}

impl ActiveFunction for WorldFunction {
    fn init(&mut self) {
        self.current = None;
    }

    fn on_enable(&mut self) -> bool {
        true
    }

    fn on_disable(&mut self) {
        self.current = None;
    }

    fn on_update(&mut self, event: &UpdateEvent) {
        if let UpdateEvent::WorldChanged { world } = event {
            debug!(target: "functions", "World changed to {:?}", world);
            self.current = world.clone();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Player coordinate on one axis
///
/// Without an argument the block coordinate is returned. An argument of `0`
/// to `3` returns the exact coordinate rounded to that many decimals.
#[derive(Debug)]
pub struct CoordinateFunction {
    axis: Axis,
}

impl CoordinateFunction {
    pub fn new(axis: Axis) -> Self {
        Self { axis }
    }

    fn component(&self, position: Position) -> f64 {
        match self.axis {
            Axis::X => position.x,
            Axis::Y => position.y,
            Axis::Z => position.z,
        }
    }
}

impl Function for CoordinateFunction {
    fn name(&self) -> &str {
        match self.axis {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }

    fn translated_name(&self) -> &str {
        match self.axis {
            Axis::X => "X Coordinate",
            Axis::Y => "Y Coordinate",
            Axis::Z => "Z Coordinate",
        }
    }

    fn value(&self, host: &dyn HostState, argument: Option<&str>) -> Value {
        let Some(position) = host.position() else {
            return Value::Absent;
        };
        let coordinate = self.component(position);

        match argument.map(str::trim) {
            None | Some("") => Value::Integer(coordinate.floor() as i64),
            Some(decimals) => match decimals.parse::<i32>() {
                Ok(d @ 0..=3) => {
                    let factor = 10f64.powi(d);
                    Value::Float((coordinate * factor).round() / factor)
                }
                _ => Value::Absent,
            },
        }
    }
}

/// Compass direction the player is facing
#[derive(Debug)]
pub struct DirFunction;

const COMPASS: [&str; 8] = ["S", "SW", "W", "NW", "N", "NE", "E", "SE"];

/// Map a yaw angle to an 8-point compass direction (0 = south, 90 = west)
pub fn compass_direction(yaw: f32) -> &'static str {
    let normalized = yaw.rem_euclid(360.0);
    let sector = ((normalized + 22.5) / 45.0).floor() as usize % COMPASS.len();
    COMPASS[sector]
}

impl Function for DirFunction {
    fn name(&self) -> &str {
        "dir"
    }

    fn aliases(&self) -> &[&str] {
        &["direction"]
    }

    fn translated_name(&self) -> &str {
        "Direction"
    }

    fn value(&self, host: &dyn HostState, _argument: Option<&str>) -> Value {
        host.yaw().map(compass_direction).into()
    }
}

#[derive(Debug)]
pub struct FpsFunction;

impl Function for FpsFunction {
    fn name(&self) -> &str {
        "fps"
    }

    fn translated_name(&self) -> &str {
        "FPS"
    }

    fn value(&self, host: &dyn HostState, _argument: Option<&str>) -> Value {
        host.fps().into()
    }
}

/// Local time, `clock` with seconds and `clockm` without
#[derive(Debug)]
pub struct ClockFunction {
    seconds: bool,
}

impl Function for ClockFunction {
    fn name(&self) -> &str {
        if self.seconds {
            "clock"
        } else {
            "clockm"
        }
    }

    fn translated_name(&self) -> &str {
        if self.seconds {
            "Clock"
        } else {
            "Clock (minutes)"
        }
    }

    fn value(&self, host: &dyn HostState, _argument: Option<&str>) -> Value {
        let pattern = if self.seconds { "%H:%M:%S" } else { "%H:%M" };
        host.local_time()
            .map(|time| time.format(pattern).to_string())
            .into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryMetric {
    Max,
    Used,
    Percent,
}

/// Memory usage in MiB, or used memory as a percentage of max
#[derive(Debug)]
pub struct MemoryFunction {
    metric: MemoryMetric,
}

impl MemoryFunction {
    pub fn new(metric: MemoryMetric) -> Self {
        Self { metric }
    }
}

impl Function for MemoryFunction {
    fn name(&self) -> &str {
        match self.metric {
            MemoryMetric::Max => "mem_max",
            MemoryMetric::Used => "mem_used",
            MemoryMetric::Percent => "mem_pct",
        }
    }

    fn aliases(&self) -> &[&str] {
        match self.metric {
            MemoryMetric::Max => &["memmax"],
            MemoryMetric::Used => &["memused"],
            MemoryMetric::Percent => &["mempct"],
        }
    }

    fn translated_name(&self) -> &str {
        match self.metric {
            MemoryMetric::Max => "Max Memory (MB)",
            MemoryMetric::Used => "Used Memory (MB)",
            MemoryMetric::Percent => "Used Memory (%)",
        }
    }

    fn value(&self, host: &dyn HostState, _argument: Option<&str>) -> Value {
        let Some(memory) = host.memory() else {
            return Value::Absent;
        };
        match self.metric {
            MemoryMetric::Max => Value::Integer((memory.max_bytes / MIB) as i64),
            MemoryMetric::Used => Value::Integer((memory.used_bytes / MIB) as i64),
            MemoryMetric::Percent if memory.max_bytes == 0 => Value::Absent,
            MemoryMetric::Percent => {
                Value::Integer((memory.used_bytes.saturating_mul(100) / memory.max_bytes) as i64)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::GameSnapshot;
    use chrono::NaiveTime;

    #[test]
    fn test_builtin_names_unique() {
        let functions = all();
        let mut names: Vec<String> = functions
            .iter()
            .flat_map(|f| f.all_names().map(str::to_lowercase).collect::<Vec<_>>())
            .collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_coordinates_floor_to_block() {
        let host = GameSnapshot::new().with_position(10.7, 64.0, -3.2);
        let x = CoordinateFunction::new(Axis::X);
        let z = CoordinateFunction::new(Axis::Z);
        assert_eq!(x.value(&host, None), Value::Integer(10));
        assert_eq!(z.value(&host, None), Value::Integer(-4));
    }

    #[test]
    fn test_coordinate_decimals_argument() {
        let host = GameSnapshot::new().with_position(10.756, 64.0, 0.0);
        let x = CoordinateFunction::new(Axis::X);
        assert_eq!(x.value(&host, Some("2")), Value::Float(10.76));
        assert_eq!(x.value(&host, Some("9")), Value::Absent);
        assert_eq!(x.value(&host, Some("two")), Value::Absent);
    }

    #[test]
    fn test_coordinates_absent_out_of_session() {
        let y = CoordinateFunction::new(Axis::Y);
        assert_eq!(y.value(&GameSnapshot::new(), None), Value::Absent);
    }

    #[test]
    fn test_compass_direction() {
        assert_eq!(compass_direction(0.0), "S");
        assert_eq!(compass_direction(90.0), "W");
        assert_eq!(compass_direction(180.0), "N");
        assert_eq!(compass_direction(-90.0), "E");
        assert_eq!(compass_direction(200.0), "N");
        assert_eq!(compass_direction(225.0), "NE");
        assert_eq!(compass_direction(359.0), "S");
    }

    #[test]
    fn test_clock_formats() {
        let time = NaiveTime::from_hms_opt(9, 4, 7).unwrap();
        let host = GameSnapshot::new().with_time(time);
        let clock = ClockFunction { seconds: true };
        let clockm = ClockFunction { seconds: false };
        assert_eq!(clock.value(&host, None), Value::text("09:04:07"));
        assert_eq!(clockm.value(&host, None), Value::text("09:04"));
    }

    #[test]
    fn test_memory_metrics() {
        let host = GameSnapshot::new().with_memory(4096 * MIB, 1024 * MIB);
        let max = MemoryFunction::new(MemoryMetric::Max);
        let used = MemoryFunction::new(MemoryMetric::Used);
        let pct = MemoryFunction::new(MemoryMetric::Percent);
        assert_eq!(max.value(&host, None), Value::Integer(4096));
        assert_eq!(used.value(&host, None), Value::Integer(1024));
        assert_eq!(pct.value(&host, None), Value::Integer(25));
    }

    #[test]
    fn test_memory_percent_without_max() {
        let host = GameSnapshot::new().with_memory(0, 0);
        let pct = MemoryFunction::new(MemoryMetric::Percent);
        assert_eq!(pct.value(&host, None), Value::Absent);
    }

    #[test]
    fn test_world_tracks_events() {
        let host = GameSnapshot::new();
        let mut world = WorldFunction::default();
        world.init();
        assert_eq!(world.value(&host, None), Value::Absent);

        world.on_update(&UpdateEvent::WorldChanged {
            world: Some("WC1".to_string()),
        });
        assert_eq!(world.value(&host, None), Value::text("WC1"));

        world.on_disable();
        assert_eq!(world.value(&host, None), Value::Absent);
    }
}
