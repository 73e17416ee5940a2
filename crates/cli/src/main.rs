mod report;

use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, WrapErr};
use rlc_solve::{CircuitInputs, RawInputs, Topology, solve};
use tracing_subscriber::EnvFilter;

/// Series and parallel RLC circuit calculator.
///
/// Values accept SI prefixes (k, m, u, n, p, meg) and unit noise (`4.7kohm`, `100 nF`).
/// A trailing `l` or `c` marks a value as a reactance in ohms, `z` as the total
/// impedance, `w`/`s`/`q` as a power.
#[derive(Parser)]
#[command(name = "rlc-solve", version)]
struct Cli {
    #[arg(short = 'U', long, default_value = "")]
    voltage: String,

    #[arg(short = 'I', long, default_value = "")]
    current: String,

    #[arg(short = 'f', long, default_value = "")]
    frequency: String,

    #[arg(short = 'R', long, default_value = "")]
    resistance: String,

    #[arg(short = 'C', long, default_value = "")]
    capacitance: String,

    #[arg(short = 'L', long, default_value = "")]
    inductance: String,

    #[arg(short = 'Z', long, default_value = "")]
    impedance: String,

    #[arg(short = 'P', long, default_value = "")]
    power: String,

    #[arg(short, long, value_enum, default_value_t = TopologyArg::Series)]
    topology: TopologyArg,

    /// Read malformed values as blank instead of rejecting them
    #[arg(long)]
    lenient: bool,

    /// Log every derivation step to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum TopologyArg {
    Series,
    Parallel,
}

impl From<TopologyArg> for Topology {
    fn from(value: TopologyArg) -> Self {
        match value {
            TopologyArg::Series => Topology::Series,
            TopologyArg::Parallel => Topology::Parallel,
        }
    }
}

impl Cli {
    fn raw_inputs(&self) -> RawInputs {
        RawInputs {
            voltage: self.voltage.clone(),
            current: self.current.clone(),
            frequency: self.frequency.clone(),
            resistance: self.resistance.clone(),
            capacitance: self.capacitance.clone(),
            inductance: self.inductance.clone(),
            impedance: self.impedance.clone(),
            power: self.power.clone(),
        }
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let raw = cli.raw_inputs();
    let parsed = if cli.lenient {
        raw.parse_all()
    } else {
        raw.try_parse_all().into_diagnostic()?
    };
    let inputs = CircuitInputs::from_parsed(parsed).into_diagnostic()?;

    let topology = Topology::from(cli.topology);
    let result = solve(&inputs, topology)
        .into_diagnostic()
        .wrap_err_with(|| format!("Cannot solve the {topology} circuit"))?;

    print!("{}", report::render(&inputs, &result));
    Ok(())
}
