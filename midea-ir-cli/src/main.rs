extern crate pretty_env_logger;
#[macro_use]
extern crate log;

use color_eyre::eyre::WrapErr;
use midea_ir::ir::format::Midea;
use midea_ir::ir::midea::types::{MideaMode, MideaPacket, MideaState, MOVE_DEFLECTOR};
use midea_ir::ir::midea::MideaAc;
use midea_ir::ir::output::gpio::GpioPort;
use midea_ir::ir::output::{ChannelConfig, IrOut};
use midea_ir::ir::pulse::PulseTrain;
use midea_ir::ir::types::{IrFormat, IrPulseBytes};
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
struct AcState {
    /// Send the power off command instead
    #[structopt(short, long)]
    off: bool,
    #[structopt(short, long, default_value = "auto")]
    mode: MideaMode,
    /// Celsius, 17 to 30
    #[structopt(short, long, default_value = "24", allow_hyphen_values = true)]
    temperature: i32,
    /// 0 is automatic, 1 to 3 are low to high
    #[structopt(short, long, default_value = "0")]
    fan: u8,
}

impl From<&AcState> for MideaState {
    fn from(state: &AcState) -> Self {
        MideaState {
            temperature: state.temperature,
            fan_level: state.fan,
            mode: state.mode,
            enabled: !state.off,
        }
    }
}

#[derive(StructOpt, Debug)]
struct ChannelOpt {
    #[structopt(short, long, default_value = "0")]
    channel: u8,
    /// BCM gpio number of the ir led
    #[structopt(short, long, default_value = "13")]
    pin: u8,
    /// Carrier duty cycle in percent
    #[structopt(short, long, default_value = "25")]
    duty_cycle: u8,
}

impl ChannelOpt {
    fn config(&self) -> ChannelConfig {
        let config = ChannelConfig::new(self.channel, self.pin);
        let carrier_frequency = config.carrier_frequency;
        config.with_carrier(carrier_frequency, self.duty_cycle)
    }
}

#[derive(StructOpt, Debug)]
enum Opt {
    /// Send a full state to the air conditioner
    Send {
        #[structopt(flatten)]
        state: AcState,
        #[structopt(flatten)]
        channel: ChannelOpt,
    },
    /// Nudge the air deflector
    Deflector {
        #[structopt(flatten)]
        channel: ChannelOpt,
    },
    /// Print the encoded signal without sending it
    Encode {
        #[structopt(flatten)]
        state: AcState,
        /// Encode the deflector command instead of the state
        #[structopt(long)]
        deflector: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    color_eyre::install()?;

    let opts = Opt::from_args();

    debug!("opts: {:?}", opts);

    match opts {
        Opt::Send { state, channel } => {
            let mut ir_out = IrOut::start(GpioPort::new(), channel.config(), MideaAc::default())?;
            ir_out.send_target(|ac| ac.state_set(MideaState::from(&state)))?;
            ir_out.stop().await?;
            println!("Finished sending!");
        }
        Opt::Deflector { channel } => {
            let mut ir_out = IrOut::start(GpioPort::new(), channel.config(), MideaAc::default())?;
            ir_out.send_target(|ac| ac.move_deflector())?;
            ir_out.stop().await?;
            println!("Finished sending!");
        }
        Opt::Encode { state, deflector } => {
            let (bytes, seq) = if deflector {
                (
                    IrPulseBytes(MOVE_DEFLECTOR.to_vec()),
                    Midea::encode_single(MOVE_DEFLECTOR)
                        .wrap_err("Could not encode deflector command")?,
                )
            } else {
                let packet = MideaPacket::from(&MideaState::from(&state));
                (
                    IrPulseBytes::from(packet),
                    Midea::encode(packet.to_bytes()).wrap_err("Could not encode state")?,
                )
            };
            println!("Packet: {}", bytes);
            println!("Durations ({}): {}", seq.len(), seq);
            println!("Pulse units:");
            for pair in PulseTrain::from(&seq).as_ref() {
                println!(
                    "  {:>5} {:?}\t{:>5} {:?}",
                    pair.first.duration, pair.first.level, pair.second.duration, pair.second.level
                );
            }
            println!("Total: {}us", seq.total_duration().as_micros());
        }
    }

    Ok(())
}
