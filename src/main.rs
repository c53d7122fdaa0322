use anyhow::Context;
use clap::Parser;
use pinsym::*;
use std::process;

fn main() {
    // Initialize logger with custom format to hide module paths
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{} {} pinsym] {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
                record.level(),
                record.args()
            )
        })
        .init();

    let args = Cli::parse();

    if args.debug {
        log::set_max_level(log::LevelFilter::Debug);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: &Cli) -> anyhow::Result<()> {
    let config = args.resolve_config()?;

    let report = generate(&config)
        .with_context(|| format!("generating symbol from {}", config.input.display()))?;

    println!("✓ Symbol generated: {}", config.symbol.symbol_name);
    println!("Pins: {} (left {}, right {})", report.pin_count, report.left_pins, report.right_pins);
    if !report.left_groups.is_empty() || !report.right_groups.is_empty() {
        println!("Left groups:  {}", group_list(&report.left_groups));
        println!("Right groups: {}", group_list(&report.right_groups));
    }
    println!("Output file: {}", report.output.display());

    Ok(())
}

fn group_list(groups: &[String]) -> String {
    if groups.is_empty() {
        "-".to_string()
    } else {
        groups.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_side_prints_a_dash() {
        assert_eq!(group_list(&[]), "-");
        assert_eq!(group_list(&["POWER".to_string(), "PA".to_string()]), "POWER, PA");
    }
}
