//! Test utilities for building a controller on mock hardware

use super::mock_hardware::{MockClock, MockEncoders, MockImu, MockMotors};
use balancer::{BalanceConfig, Balancer, Vector3};

/// Accelerometer reading for 1 g
pub const ACCEL_1G: i16 = 16_384;

/// Gravity vector for a robot tilted `deg` degrees from vertical
pub fn accel_at_angle(deg: f32) -> Vector3 {
    let rad = deg.to_radians();
    Vector3::new(
        (rad.cos() * ACCEL_1G as f32) as i16,
        0,
        (rad.sin() * ACCEL_1G as f32) as i16,
    )
}

/// A controller wired to mock hardware, with handles kept for scripting
pub struct Rig {
    pub balancer: Balancer<MockImu, MockEncoders, MockMotors, MockClock>,
    pub imu: MockImu,
    pub encoders: MockEncoders,
    pub motors: MockMotors,
    pub clock: MockClock,
}

impl Rig {
    pub fn new(config: BalanceConfig) -> Self {
        let imu = MockImu::new();
        let encoders = MockEncoders::new();
        let motors = MockMotors::new();
        let clock = MockClock::new();

        // Upright and still unless a test says otherwise
        imu.set_accel(accel_at_angle(0.0));

        let balancer = Balancer::new(
            config,
            imu.clone(),
            encoders.clone(),
            motors.clone(),
            clock.clone(),
        )
        .expect("test config should be valid");

        Self {
            balancer,
            imu,
            encoders,
            motors,
            clock,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(BalanceConfig::default())
    }

    /// Advance the clock by one nominal period and run `update`
    pub fn tick(&mut self) -> bool {
        let period = self.balancer.config().update_period_ms;
        self.clock.advance(period);
        self.balancer.update()
    }

    /// Run `n` nominal ticks
    pub fn ticks(&mut self, n: usize) {
        for _ in 0..n {
            assert!(self.tick(), "tick should run after a full period");
        }
    }

    /// Tick upright and still until the controller starts balancing
    pub fn bring_up(&mut self) {
        self.imu.set_gyro_y(0);
        self.imu.set_accel(accel_at_angle(0.0));
        let dwell = self.balancer.config().dwell_ticks as usize;
        self.ticks(dwell + 1);
        assert!(self.balancer.is_balancing());
    }
}
