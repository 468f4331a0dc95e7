// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Top-level balancing controller.
//!
//! [`Balancer`] owns the IMU, wheel encoders, motor driver and clock, and runs a fixed-period
//! two-state machine:
//!
//! - **Fallen**: motors off, distances and motor speed held at zero, angle re-anchored from the
//!   accelerometer whenever the robot is still. Starts balancing once `|angle|` has stayed below
//!   the start threshold for more than `dwell_ticks` ticks.
//! - **Balancing**: every tick the common-mode motor speed is nudged by a combination of angle,
//!   distance and speed terms. Gives up once `|angle|` has stayed above the stop threshold for more
//!   than `dwell_ticks` ticks.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! balancer.setup(&mut delay)?;
//!
//! loop {
//!     balancer.update();
//!     // Other non-blocking work; `update` is a no-op until the period has elapsed.
//! }
//! ```

use embedded_hal::delay::DelayNs;

use crate::config::BalanceConfig;
use crate::control::{AngleEstimator, Debounce, GyroCalibrator, Odometry, TickScheduler};
use crate::error::{ConfigError, Error};
use crate::interface::{Clock, ImuReading, Imu, MotorDriver, WheelEncoders};
use crate::motors::{clamp_speed, MotorOutput};

/// State of the balancing state machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BalanceState {
    Fallen,
    Balancing,
}

/// Snapshot of the controller state, for logging or host-side feedback.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Telemetry {
    pub state: BalanceState,
    /// Millidegrees
    pub angle: i32,
    /// Degrees per second
    pub angle_rate: i32,
    pub motor_speed: i16,
    pub distance_left: i32,
    pub distance_right: i32,
    pub speed_left: i32,
    pub speed_right: i32,
    pub delayed: bool,
}

/// Balancing controller and the hardware it drives.
pub struct Balancer<IMU, ENC, MOT, CLK> {
    imu: IMU,
    encoders: ENC,
    motors: MOT,
    clock: CLK,

    config: BalanceConfig,
    estimator: AngleEstimator,
    odometry: Odometry,
    output: MotorOutput,
    scheduler: TickScheduler,
    debounce: Debounce,
    state: BalanceState,

    /// Common-mode motor speed. Accumulated across ticks while balancing.
    motor_speed: i16,
    last_reading: ImuReading,
    sensor_faults: u32,
}

impl<IMU, ENC, MOT, CLK> Balancer<IMU, ENC, MOT, CLK>
where
    IMU: Imu,
    ENC: WheelEncoders,
    MOT: MotorDriver,
    CLK: Clock,
{
    /// Create a controller in the fallen state. The configuration is validated first.
    pub fn new(
        config: BalanceConfig,
        imu: IMU,
        encoders: ENC,
        motors: MOT,
        clock: CLK,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            imu,
            encoders,
            motors,
            clock,

            config,
            estimator: AngleEstimator::new(config.gyro_lsb_per_dps),
            odometry: Odometry::new(),
            output: MotorOutput::new(config.distance_diff_response, config.wheel_limit()),
            scheduler: TickScheduler::new(config.update_period_ms),
            debounce: Debounce::new(config.dwell_ticks),
            state: BalanceState::Fallen,

            motor_speed: 0,
            last_reading: ImuReading::default(),
            sensor_faults: 0,
        })
    }

    /// One-time bring-up: initialize the IMU, let it settle, calibrate the gyro, and start the tick
    /// clock.
    ///
    /// IMU init is retried `init_attempts` times, `init_retry_delay_ms` apart. On
    /// [`Error::SensorNotDetected`] the robot cannot sense tilt and the host should halt (see
    /// [`crate::hw::fault::halt`]).
    pub fn setup<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<IMU::Error>> {
        self.init_imu(delay)?;

        // Wait for IMU readings to stabilize.
        delay.delay_ms(self.config.settle_time_ms);

        self.calibrate(delay)?;

        self.odometry.set_baseline(self.encoders.counts());
        self.scheduler.reset(self.clock.now_ms());

        #[cfg(feature = "defmt")]
        defmt::info!("Balancer ready");

        Ok(())
    }

    fn init_imu<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<IMU::Error>> {
        let mut attempt: u8 = 1;
        loop {
            match self.imu.init() {
                Ok(()) => return Ok(()),
                Err(e) if attempt >= self.config.init_attempts => {
                    #[cfg(feature = "defmt")]
                    defmt::error!("Failed to detect and initialize IMU after {} attempts", attempt);

                    return Err(Error::SensorNotDetected(e));
                }
                Err(_) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("IMU init attempt {} failed, retrying", attempt);

                    attempt += 1;
                    delay.delay_ms(self.config.init_retry_delay_ms);
                }
            }
        }
    }

    /// Re-measure the zero-rate gyro offset. The robot must be stationary.
    pub fn calibrate<D: DelayNs>(&mut self, delay: &mut D) -> Result<i32, Error<IMU::Error>> {
        let calibrator =
            GyroCalibrator::new(self.config.calibration_samples, self.config.calibration_delay_ms);
        let offset = calibrator.calibrate(&mut self.imu, delay)?;
        self.estimator.set_offset(offset);
        Ok(offset)
    }

    /// Run one control tick if the period has elapsed. Returns whether a tick ran.
    ///
    /// Never blocks and never fails: late ticks set [`is_update_delayed`](Self::is_update_delayed),
    /// IMU read errors reuse the last good sample.
    pub fn update(&mut self) -> bool {
        let Some(elapsed) = self.poll_tick() else {
            return false;
        };

        self.update_sensors(elapsed);
        self.odometry.apply_drive_ticks(self.config.drive_policy);

        match self.state {
            BalanceState::Balancing => {
                self.balance();

                let tilted = self.estimator.angle().unsigned_abs()
                    > self.config.stop_balancing_angle as u32;
                if self.debounce.update(tilted) {
                    self.state = BalanceState::Fallen;
                    self.lying_down();

                    #[cfg(feature = "defmt")]
                    defmt::info!("Fallen: angle={}", self.estimator.angle());
                }
            }
            BalanceState::Fallen => {
                self.lying_down();

                let upright = self.estimator.angle().unsigned_abs()
                    < self.config.start_balancing_angle as u32;
                if self.debounce.update(upright) {
                    self.state = BalanceState::Balancing;

                    #[cfg(feature = "defmt")]
                    defmt::info!("Balancing: angle={}", self.estimator.angle());
                }
            }
        }

        true
    }

    /// Keep the angle and odometry current without touching the motors, so balancing can resume
    /// immediately after the host hands the motors back.
    ///
    /// Gated by the same period as [`update`](Self::update). Drive ticks are not applied.
    pub fn update_sensors_only(&mut self) -> bool {
        let Some(elapsed) = self.poll_tick() else {
            return false;
        };
        self.update_sensors(elapsed);
        true
    }

    /// Set the commanded wheel rate in encoder ticks per update. Unequal values turn.
    pub fn drive(&mut self, left: i16, right: i16) {
        self.odometry.drive(left, right);
    }

    /// Zero the distance accumulators, e.g. after a large intentional move.
    pub fn reset_encoders(&mut self) {
        self.odometry.reset_distances();
    }

    #[inline]
    pub fn is_balancing(&self) -> bool {
        self.state == BalanceState::Balancing
    }

    /// Whether the last tick ran more than one millisecond past its period.
    #[inline]
    pub fn is_update_delayed(&self) -> bool {
        self.scheduler.is_delayed()
    }

    #[inline]
    pub fn state(&self) -> BalanceState {
        self.state
    }

    /// Tilt from vertical in millidegrees.
    #[inline]
    pub fn angle(&self) -> i32 {
        self.estimator.angle()
    }

    /// Pitch rate in deg/s.
    #[inline]
    pub fn angle_rate(&self) -> i32 {
        self.estimator.angle_rate()
    }

    #[inline]
    pub fn motor_speed(&self) -> i16 {
        self.motor_speed
    }

    #[inline]
    pub fn distance_left(&self) -> i32 {
        self.odometry.distance_left()
    }

    #[inline]
    pub fn distance_right(&self) -> i32 {
        self.odometry.distance_right()
    }

    #[inline]
    pub fn speed_left(&self) -> i32 {
        self.odometry.speed_left()
    }

    #[inline]
    pub fn speed_right(&self) -> i32 {
        self.odometry.speed_right()
    }

    /// Zero-rate gyro offset in raw units.
    #[inline]
    pub fn gyro_offset(&self) -> i32 {
        self.estimator.offset()
    }

    /// Number of IMU read errors absorbed by the control loop.
    #[inline]
    pub fn sensor_faults(&self) -> u32 {
        self.sensor_faults
    }

    /// Last wheel commands sent to the driver, before direction flips.
    #[inline]
    pub fn last_motor_command(&self) -> (i16, i16) {
        self.output.last()
    }

    #[inline]
    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            state: self.state,
            angle: self.estimator.angle(),
            angle_rate: self.estimator.angle_rate(),
            motor_speed: self.motor_speed,
            distance_left: self.odometry.distance_left(),
            distance_right: self.odometry.distance_right(),
            speed_left: self.odometry.speed_left(),
            speed_right: self.odometry.speed_right(),
            delayed: self.scheduler.is_delayed(),
        }
    }

    /// Turn turbo mode on or off. Takes effect on the next tick.
    pub fn set_turbo(&mut self, turbo: bool) {
        self.config.turbo = turbo;
        self.output.set_driver_limit(self.config.wheel_limit());
    }

    pub fn flip_left_motor(&mut self, flip: bool) {
        self.output.flip_left(flip);
    }

    pub fn flip_right_motor(&mut self, flip: bool) {
        self.output.flip_right(flip);
    }

    /// Direct access to the motor driver while the host owns the motors.
    #[inline]
    pub fn motors_mut(&mut self) -> &mut MOT {
        &mut self.motors
    }

    /// Tear down the controller and return the hardware.
    pub fn free(self) -> (IMU, ENC, MOT, CLK) {
        (self.imu, self.encoders, self.motors, self.clock)
    }

    fn poll_tick(&mut self) -> Option<u16> {
        let now = self.clock.now_ms();
        self.scheduler.poll(now)
    }

    fn read_imu(&mut self) -> ImuReading {
        match self.imu.read() {
            Ok(reading) => self.last_reading = reading,
            Err(nb::Error::WouldBlock) => {}
            Err(nb::Error::Other(_)) => {
                self.sensor_faults = self.sensor_faults.wrapping_add(1);

                #[cfg(feature = "defmt")]
                defmt::warn!("IMU read failed, reusing last sample");
            }
        }
        self.last_reading
    }

    fn update_sensors(&mut self, elapsed_ms: u16) {
        let reading = self.read_imu();
        self.estimator.integrate_gyro(reading.gyro.y, elapsed_ms);
        self.odometry.update(self.encoders.counts());
    }

    /// One step of the balancing law.
    fn balance(&mut self) {
        let cfg = &self.config;

        // Bleed off gyro drift with a ~10 s time constant; while balancing, the average angle must
        // be zero or the robot would fall.
        self.estimator.decay(cfg.drift_decay);

        // How far, in millidegrees, the robot is from a trajectory that rises to vertical with no
        // speed left at the top.
        let rising_angle_offset = (self.estimator.angle_rate() as i64)
            .saturating_mul(cfg.angle_rate_ratio as i64)
            .saturating_add(self.estimator.angle() as i64);

        // The response is added to the motor speed rather than replacing it: a change in speed is
        // what tilts the robot.
        // Saturates for extreme gains.
        let response = (cfg.angle_response as i64)
            .saturating_mul(rising_angle_offset)
            .saturating_add(
                (cfg.distance_response as i64).saturating_mul(self.odometry.distance_sum() as i64),
            )
            .saturating_add(
                (cfg.speed_response as i64).saturating_mul(self.odometry.speed_sum() as i64),
            );
        let increment = response / 100 / cfg.gear_ratio as i64;

        let speed = (self.motor_speed as i64)
            .saturating_add(increment)
            .clamp(i32::MIN as i64, i32::MAX as i64);
        self.motor_speed = clamp_speed(speed as i32, cfg.speed_limit());

        self.output.command(
            &mut self.motors,
            self.motor_speed,
            self.odometry.distance_diff(),
        );
    }

    /// Hold everything at rest while fallen.
    fn lying_down(&mut self) {
        self.motor_speed = 0;
        self.odometry.reset_distances();
        self.output.stop(&mut self.motors);

        // Only trust the accelerometer while the robot is still.
        let accel = self.last_reading.accel;
        self.estimator
            .reanchor(accel.x, accel.z, self.config.rest_rate_threshold);
    }
}
