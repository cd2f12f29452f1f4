use clap::Parser;

use logic_nets::analysis::{function_statistics, statistics};
use logic_nets::convert::ConvertConfig;
use logic_nets::network::{Network, NetworkKind};
use logic_nets::signal::Signal;
use logic_nets::store::{Kind, Object, Stores};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Adder width in bits.
    #[arg(value_name = "INT", default_value = "4")]
    bits: usize,

    /// Copy gates one by one instead of recognizing majority and xor windows.
    #[clap(long)]
    no_patterns: bool,

    /// Enumeration limit for truth-table conversions.
    #[clap(long, value_name = "INT", default_value = "16")]
    limit: usize,
}

/// Ripple-carry adder `a + b` with a carry-out output.
fn adder(bits: usize) -> Network {
    let mut net = Network::new(NetworkKind::Aig).with_name(format!("adder{}", bits));
    let a: Vec<_> = (0..bits).map(|i| net.add_input(format!("a{}", i))).collect();
    let b: Vec<_> = (0..bits).map(|i| net.add_input(format!("b{}", i))).collect();

    let mut carry = Signal::zero();
    for i in 0..bits {
        let t = net.create_xor(a[i], b[i]);
        let sum = net.create_xor(t, carry);
        net.add_output(format!("s{}", i), sum);
        carry = net.create_maj(a[i], b[i], carry);
    }
    net.add_output("cout", carry);
    net
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let config = ConvertConfig::default()
        .with_detect_patterns(!args.no_patterns)
        .with_enumeration_limit(args.limit);

    let mut stores = Stores::new();
    stores.push(Object::Network(adder(args.bits)));

    for kind in [Kind::Mig, Kind::Mixed] {
        stores.convert(Kind::Aig, kind, &config)?;
    }
    stores.convert(Kind::Aig, Kind::Functions, &config)?;
    match stores.convert(Kind::Aig, Kind::TruthTable, &config) {
        Ok(_) => {
            stores.convert(Kind::TruthTable, Kind::Aig, &config)?;
        }
        Err(e) => println!("Skipping truth tables: {}", e),
    }

    for (i, net) in stores.aigs.iter().enumerate() {
        println!("AIG #{}: {}", i, statistics(net, true));
    }
    println!("MIG: {}", statistics(stores.migs.current()?, false));
    println!("mixed: {}", statistics(stores.mixed.current()?, false));
    println!("functions: {}", function_statistics(stores.functions.current()?));

    let time_total = time_total.elapsed();
    println!("\nAll done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
