use std::io;

use color_eyre::Result;
use ldrpulse::config::{Invocation, SensorConfig};
use ldrpulse::{EdgeReporter, LightSensor};
use ldrpulse_rpi::ChargeTimeProbe;
use rppal::gpio::Gpio;

fn main() -> Result<()> {
    color_eyre::install()?;
    ldrpulse_rpi::init_tracing()?;

    let config = match SensorConfig::from_args(std::env::args().skip(1))? {
        Invocation::Run(config) => config,
        Invocation::Help => {
            println!("{}", SensorConfig::USAGE);
            return Ok(());
        }
    };

    let gpio = Gpio::new()?;
    let ldr = LightSensor::new(
        ChargeTimeProbe::new(&gpio, config.pin)?,
        config.sensor_options(),
    )?;
    tracing::info!(pin = config.pin, threshold = config.threshold, "waiting for light");

    match EdgeReporter::new(ldr, io::stdout().lock()).run()? {}
}
