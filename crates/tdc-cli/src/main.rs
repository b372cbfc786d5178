use clap::{value_parser, Arg, Command, ValueHint};
use tdc_cli::input::Settings;
use tdc_cli::runner::Runner;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::default()
        .filter_level(log::LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("TDC_LOG", "error,tdc_core=info,tdc_cli=info"))
        .init();

    let matches = Command::new("tdc")
        .version(clap::crate_version!())
        .about("Filter Comet PSM search results in place by target/decoy competition FDR")
        .arg(
            Arg::new("psm_file")
                .required(true)
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .help("Path to Comet PSMs (TSV or TXT). The file is rewritten in place.")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("fdr")
                .long("fdr")
                .value_parser(value_parser!(f64))
                .default_value("0.05")
                .help("FDR cutoff to filter by (inclusive), default is 0.05")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("decoy-prefix")
                .long("decoy-prefix")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .default_value("DECOY_")
                .help("Prefix marking decoy protein entries, default is DECOY_")
                .value_hint(ValueHint::Other),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    let settings = Settings::from_arguments(matches)?;
    Runner::new(settings).run()
}
