//! Homing sequence
//!
//! 1. Sensor arm: timed run against its hard stop
//! 2. Flipper: timed run against its rest stop
//! 3. Sensor arm: relative move to the park position
//! 4. Flipper: small relative move off the rest stop
//! 5. Turntable: free run until the proximity sensor sees the reference
//!    mark, then stop
//!
//! Steps run strictly in this order, each waiting for the previous one.
//! The turntable search is bounded by the configured timeout.

use embedded_hal_async::delay::DelayNs;

use crate::config::HomingConfig;
use crate::kinematics::{Motor, Rig};
use crate::traits::{Actuator, ActuatorFault, ProximitySensor, SensorFault};

/// Homing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingError {
    /// An actuator faulted during homing
    Actuator(Motor, ActuatorFault),
    /// The proximity sensor could not be read
    Sensor(SensorFault),
    /// The turntable reference mark was not found in time
    Incomplete,
}

/// Run the homing sequence
///
/// On success the rig is homed: reference orientation, unlocked, arm
/// parked, turntable on a quarter position. On failure the rig stays
/// un-homed and the turntable is stopped.
pub async fn home_rig<A, P, D>(
    rig: &mut Rig<A>,
    proximity: &mut P,
    delay: &mut D,
) -> Result<(), HomingError>
where
    A: Actuator,
    P: ProximitySensor,
    D: DelayNs,
{
    info!("homing");
    rig.invalidate();
    let config = *rig.config();

    debug!("arm to hard stop");
    rig.actuator(Motor::Arm)
        .run_timed_to_end(config.arm.homing_speed, config.arm.homing_time_ms)
        .await
        .map_err(|f| fault(Motor::Arm, f))?;

    debug!("flipper to rest stop");
    rig.actuator(Motor::Flipper)
        .run_timed_to_end(config.flipper.homing_speed, config.flipper.homing_time_ms)
        .await
        .map_err(|f| fault(Motor::Flipper, f))?;

    rig.actuator(Motor::Arm)
        .run_relative(config.arm.park_offset, config.arm.speed)
        .await
        .map_err(|f| fault(Motor::Arm, f))?;

    rig.actuator(Motor::Flipper)
        .run_relative(config.flipper.rest_offset, config.flipper.speed)
        .await
        .map_err(|f| fault(Motor::Flipper, f))?;

    debug!("searching turntable reference");
    let table = rig.actuator(Motor::Turntable);
    find_reference(table, proximity, delay, &config.homing, config.turntable.homing_speed).await?;

    rig.mark_homed();
    info!("homing complete");
    Ok(())
}

/// Free-run the turntable until the proximity reading exceeds the threshold
async fn find_reference<A, P, D>(
    table: &mut A,
    proximity: &mut P,
    delay: &mut D,
    homing: &HomingConfig,
    speed: i32,
) -> Result<(), HomingError>
where
    A: Actuator,
    P: ProximitySensor,
    D: DelayNs,
{
    table
        .run_until_stopped(speed)
        .map_err(|f| fault(Motor::Turntable, f))?;

    let mut waited_ms = 0u32;
    loop {
        let reading = match proximity.read_proximity() {
            Ok(r) => r,
            Err(e) => {
                warn!("proximity read failed: {}", e);
                let _ = table.stop();
                return Err(HomingError::Sensor(e));
            }
        };
        if reading > homing.proximity_threshold {
            break;
        }
        if waited_ms >= homing.timeout_ms {
            error!("turntable reference not found after {} ms", waited_ms);
            let _ = table.stop();
            return Err(HomingError::Incomplete);
        }
        delay.delay_ms(homing.poll_interval_ms).await;
        waited_ms = waited_ms.saturating_add(homing.poll_interval_ms);
    }

    table.stop().map_err(|f| fault(Motor::Turntable, f))?;
    table
        .wait_until_idle()
        .await
        .map_err(|f| fault(Motor::Turntable, f))
}

fn fault(motor: Motor, f: ActuatorFault) -> HomingError {
    warn!("homing: {} fault {}", motor, f);
    HomingError::Actuator(motor, f)
}
