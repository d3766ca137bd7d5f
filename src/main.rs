use rppal::gpio::Gpio;

use std::time::Duration;
use std::thread::sleep;

use ldrpulse::config::{Invocation, ProbeConfig};
use ldrpulse::{LightSensor, SensorOptions};
use ldrpulse_rpi::ChargeTimeProbe;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    ldrpulse_rpi::init_tracing()?;

    let config = match ProbeConfig::from_args(std::env::args().skip(1))? {
        Invocation::Run(config) => config,
        Invocation::Help => {
            println!("{}", ProbeConfig::USAGE);
            return Ok(());
        }
    };

    let gpio = Gpio::new()?;
    let mut ldr = LightSensor::new(
        ChargeTimeProbe::new(&gpio, config.pin)?,
        SensorOptions::default().with_queue_len(config.queue_len),
    )?;
    tracing::info!(pin = config.pin, queue_len = config.queue_len, "probing");

    loop {
        let reading = ldr.poll()?;
        println!("{:.3} {}", reading.value, reading.state);
        sleep(Duration::from_secs(1))
    }
}
