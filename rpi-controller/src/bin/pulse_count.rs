use std::io;
use std::ops::ControlFlow;

use chrono::Utc;
use color_eyre::Result;
use ldrpulse::config::{Invocation, PulseCounterConfig};
use ldrpulse::{count_pulses, EnergyMeter, LightSensor, PulseCounter};
use ldrpulse_rpi::ChargeTimeProbe;
use rppal::gpio::Gpio;
use tokio::sync::mpsc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    ldrpulse_rpi::init_tracing()?;

    let config = match PulseCounterConfig::from_args(std::env::args().skip(1))? {
        Invocation::Run(config) => config,
        Invocation::Help => {
            println!("{}", PulseCounterConfig::USAGE);
            return Ok(());
        }
    };

    let gpio = Gpio::new()?;
    let mut ldr = LightSensor::new(
        ChargeTimeProbe::new(&gpio, config.sensor.pin)?,
        config.sensor.sensor_options(),
    )?;
    let mut meter = EnergyMeter::new(config.flash_rate, config.start_kwh, Utc::now());
    tracing::info!(
        pin = config.sensor.pin,
        threshold = config.sensor.threshold,
        flash_rate = meter.flash_rate(),
        "counting light pulses"
    );

    let (pulse_tx, mut pulse_rx) = mpsc::unbounded_channel();
    // sampling blocks for the whole discharge and charge cycle
    let sampler = tokio::task::spawn_blocking(move || {
        let counter = PulseCounter::new();
        count_pulses(&mut ldr, &counter, |pulses| {
            match pulse_tx.send((pulses, Utc::now())) {
                Ok(()) => ControlFlow::Continue(()),
                Err(_) => ControlFlow::Break(()),
            }
        })
    });

    let mut out = io::stdout().lock();
    while let Some((pulses, at)) = pulse_rx.recv().await {
        let recorded = meter.record_pulse(at);
        tracing::trace!(pulses, recorded, %at, "pulse");
        let report = config.report.then(|| meter.report());
        ldrpulse_rpi::write_pulse(&mut out, pulses, report.as_ref())?;
    }

    sampler.await??;
    Ok(())
}
