//! Cross-crate test harness for OpenCar
//!
//! [`ControlLoop`] wires the full cycle the way a host would: raw frames
//! through the codec into a [`BusSnapshot`], the snapshot through the state
//! decoder, and the decoded state plus an [`ActuatorRequest`] through the
//! control encoder.

#![deny(rust_2018_idioms)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::print_stdout)]

use std::sync::Arc;

use anyhow::Result;
use opencar_can_common::{BusSnapshot, CanFrame};
use opencar_carstate::{CarStateDecoder, VehicleState};
use opencar_controller::{ActuatorRequest, CarController, EngagementState};
use opencar_lateral::VehicleModel;
use opencar_profile::VehicleProfile;
use opencar_test_helpers::prelude::{PsaInputs, TableCodec, psa_codec};
use tracing::{debug, info};

/// One completed control cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Cycle {
    pub vehicle: VehicleState,
    pub frames: Vec<CanFrame>,
}

impl Cycle {
    pub fn frames_at(&self, address: u32) -> impl Iterator<Item = &CanFrame> + '_ {
        self.frames.iter().filter(move |f| f.address() == address)
    }
}

/// Decoder, encoder and engagement state for one simulated vehicle.
pub struct ControlLoop {
    codec: TableCodec,
    decoder: CarStateDecoder,
    controller: CarController<TableCodec>,
    state: EngagementState,
}

impl ControlLoop {
    pub fn new(profile: VehicleProfile) -> Result<Self> {
        Self::with_model(profile, None)
    }

    pub fn with_model(
        profile: VehicleProfile,
        model: Option<Arc<dyn VehicleModel>>,
    ) -> Result<Self> {
        let decoder = CarStateDecoder::new(&profile);
        let controller = CarController::new(profile, psa_codec(), model)?;
        Ok(Self {
            codec: psa_codec(),
            decoder,
            controller,
            state: EngagementState::new(),
        })
    }

    pub fn codec(&self) -> &TableCodec {
        &self.codec
    }

    pub fn controller(&self) -> &CarController<TableCodec> {
        &self.controller
    }

    pub fn state(&self) -> &EngagementState {
        &self.state
    }

    /// Run one cycle from fixture inputs, going through raw frames.
    pub fn step(&mut self, inputs: &PsaInputs, request: &ActuatorRequest) -> Result<Cycle> {
        let frames = inputs.frames(&self.codec);
        let snapshot = BusSnapshot::from_frames(&self.codec, &frames)?;
        self.step_snapshot(&snapshot, request)
    }

    /// Run one cycle from an already decoded snapshot.
    pub fn step_snapshot(
        &mut self,
        snapshot: &BusSnapshot,
        request: &ActuatorRequest,
    ) -> Result<Cycle> {
        let vehicle = self.decoder.update(snapshot)?;
        let frames = self.controller.encode(&mut self.state, &vehicle, request)?;
        Ok(Cycle { vehicle, frames })
    }

    /// Run `cycles` identical cycles and collect them.
    pub fn run(
        &mut self,
        cycles: usize,
        inputs: &PsaInputs,
        request: &ActuatorRequest,
    ) -> Result<Vec<Cycle>> {
        (0..cycles).map(|_| self.step(inputs, request)).collect()
    }
}

/// Install a test-writer subscriber once per test binary.
pub fn init_test_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter("opencar_controller=debug,opencar_carstate=debug,opencar_profile=debug")
        .with_test_writer()
        .try_init();
    if installed.is_err() {
        debug!("tracing subscriber already installed");
        return;
    }
    info!("integration test tracing initialized");
}
