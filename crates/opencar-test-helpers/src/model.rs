//! Steady-state bicycle model.
//!
//! Linear single-track model with tire stiffness scaled from a reference
//! sedan, the same parameterisation used when fitting lateral controllers.

use opencar_lateral::{ACCELERATION_DUE_TO_GRAVITY, VehicleModel};

/// Standard cargo mass added to curb weight (kg).
pub const STD_CARGO_KG: f64 = 136.0;

const REFERENCE_MASS: f64 = 1326.0 + STD_CARGO_KG;
const REFERENCE_WHEELBASE: f64 = 2.70;
const REFERENCE_CENTER_TO_FRONT: f64 = REFERENCE_WHEELBASE * 0.4;
const REFERENCE_CENTER_TO_REAR: f64 = REFERENCE_WHEELBASE - REFERENCE_CENTER_TO_FRONT;
const REFERENCE_TIRE_STIFFNESS_FRONT: f64 = 192_150.0;
const REFERENCE_TIRE_STIFFNESS_REAR: f64 = 202_500.0;

/// Steady-state bicycle model parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BicycleModel {
    /// Vehicle mass including cargo (kg)
    pub mass: f64,
    /// Wheelbase (m)
    pub wheelbase: f64,
    /// Center of mass to front axle (m)
    pub center_to_front: f64,
    /// Steering ratio
    pub steer_ratio: f64,
    /// Front tire cornering stiffness (N/rad)
    pub tire_stiffness_front: f64,
    /// Rear tire cornering stiffness (N/rad)
    pub tire_stiffness_rear: f64,
}

impl BicycleModel {
    /// Build a model, scaling tire stiffness from the reference vehicle.
    pub fn new(
        curb_mass: f64,
        wheelbase: f64,
        center_to_front_ratio: f64,
        steer_ratio: f64,
        tire_stiffness_factor: f64,
    ) -> Self {
        let mass = curb_mass + STD_CARGO_KG;
        let center_to_front = wheelbase * center_to_front_ratio;
        let center_to_rear = wheelbase - center_to_front;
        let tire_stiffness_front = REFERENCE_TIRE_STIFFNESS_FRONT * tire_stiffness_factor * mass
            / REFERENCE_MASS
            * (center_to_rear / wheelbase)
            / (REFERENCE_CENTER_TO_REAR / REFERENCE_WHEELBASE);
        let tire_stiffness_rear = REFERENCE_TIRE_STIFFNESS_REAR * tire_stiffness_factor * mass
            / REFERENCE_MASS
            * (center_to_front / wheelbase)
            / (REFERENCE_CENTER_TO_FRONT / REFERENCE_WHEELBASE);
        Self {
            mass,
            wheelbase,
            center_to_front,
            steer_ratio,
            tire_stiffness_front,
            tire_stiffness_rear,
        }
    }

    /// Opel Corsa F parameters.
    pub fn psa() -> Self {
        Self::new(1530.0, 2.54, 0.44, 17.6, 1.03)
    }

    /// Slip factor; negative for an understeering vehicle.
    pub fn slip_factor(&self) -> f64 {
        let center_to_rear = self.wheelbase - self.center_to_front;
        self.mass
            * (self.tire_stiffness_front * self.center_to_front
                - self.tire_stiffness_rear * center_to_rear)
            / (self.wheelbase
                * self.wheelbase
                * self.tire_stiffness_front
                * self.tire_stiffness_rear)
    }

    fn curvature_factor(&self, speed: f64) -> f64 {
        1.0 / (1.0 - self.slip_factor() * speed * speed) / self.wheelbase
    }

    fn roll_compensation(&self, roll: f64, speed: f64) -> f64 {
        let sf = self.slip_factor();
        if sf.abs() < 1e-6 {
            0.0
        } else {
            ACCELERATION_DUE_TO_GRAVITY * roll / ((1.0 / sf) - speed * speed)
        }
    }
}

impl VehicleModel for BicycleModel {
    fn steer_from_curvature(&self, curvature: f64, speed: f64, roll: f64) -> f64 {
        (curvature - self.roll_compensation(roll, speed)) * self.steer_ratio
            / self.curvature_factor(speed)
    }
}
