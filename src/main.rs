use clap::Parser;
use modulo_lab::utils::error::{ErrorSeverity, LabError};
use modulo_lab::utils::{logger, validation::Validate};
use modulo_lab::{CliConfig, Command, Exporter, Lab, LabConfig, LocalStorage, OutputFormat, Report};

fn load_config(cli: &CliConfig) -> modulo_lab::Result<LabConfig> {
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            LabConfig::from_file(path)?
        }
        None => LabConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn print_report(report: &Report, format: OutputFormat) -> modulo_lab::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", report.render_json()?),
    }
    Ok(())
}

async fn run(cli: CliConfig) -> modulo_lab::Result<()> {
    let config = load_config(&cli)?;
    let lab = Lab::new(config.clone());

    let report = match cli.command {
        Command::Day { day } => lab.day(day.as_deref())?,
        Command::Schedule { interval } => lab.schedule(&interval)?,
        Command::Shift { hour } => lab.shift(&hour)?,
        Command::Batch { total, size } => lab.batch(&total, &size)?,
        Command::Partition { record, servers } => lab.partition(&record, &servers)?,
        Command::Categorize { product } => lab.categorize(&product)?,
        Command::AbTest { user } => lab.ab_test(&user)?,
        Command::LoadBalance { request, servers } => lab.load_balance(&request, &servers)?,
        Command::Similar { content } => lab.similar(&content)?,
        Command::Cluster { user } => lab.cluster(&user)?,
        Command::Offer { customer, interval } => lab.offer(&customer, &interval)?,
        Command::Notify { notification } => lab.notify(&notification)?,
        Command::GameDay { day } => lab.game_day(&day)?,
        Command::Backup { day, interval } => lab.backup(&day, &interval)?,
        Command::Fizzbuzz { n } => lab.fizzbuzz(&n)?,
        Command::Simulate { kind } => lab.simulate(kind)?,
        Command::Export { output, compress } => {
            let mut config = config;
            if let Some(output) = output {
                config.export.output_path = output;
            }
            config.export.compress |= compress;
            config.validate()?;

            let output_path = config.export.output_path.clone();
            let storage = LocalStorage::new(output_path.clone());
            let summary = Exporter::new(storage, config).export().await?;

            tracing::info!("✅ Export completed: {} file(s)", summary.files.len());
            println!("📁 Output saved to: {}", output_path);
            for file in &summary.files {
                println!("  {}", file);
            }
            return Ok(());
        }
    };

    print_report(&report, cli.format)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli).await {
        report_failure(&e);
    }

    Ok(())
}

fn report_failure(e: &LabError) {
    tracing::error!(
        "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 依嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
}
