use color_eyre::Result;
use ldrpulse::config::{Invocation, PinSetterConfig};
use ldrpulse::pin::apply;
use rppal::gpio::Gpio;

fn main() -> Result<()> {
    color_eyre::install()?;
    ldrpulse_rpi::init_tracing()?;

    let config = match PinSetterConfig::from_args(std::env::args().skip(1))? {
        Invocation::Run(config) => config,
        Invocation::Help => {
            println!("{}", PinSetterConfig::USAGE);
            return Ok(());
        }
    };

    let gpio = Gpio::new()?;
    let mut pin = ldrpulse_rpi::open_output(&gpio, config.pin)?;
    let level = apply(&mut pin, config.action)?;
    tracing::info!(pin = config.pin, action = %config.action, %level, "pin set");
    Ok(())
}
